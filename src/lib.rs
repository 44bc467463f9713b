//! # Compressed Image Format
//!
//! A 24-bit RGB raster (at most 240x240) is quantized to 6 bits per channel
//! (`channel & 0xFC`) and packed as a sequence of run tokens, MSB first:
//!
//! ```text
//!         ┌────────┬────────┬────────┬───────────┐
//!         │ ΔR / 4 │ ΔG / 4 │ ΔB / 4 │ run       │   one token per run
//!         └────────┴────────┴────────┴───────────┘
//!           signed   signed   signed   unsigned
//! ```
//!
//! Deltas are taken against the colour of the previous run, starting from
//! black. `run` counts the pixels repeating the colour *after* the first one.
//!
//! ## Signed delta code
//!
//! ```text
//!  v <= 0:  1 × |v|    0  1
//!  v >  0:  1 × (v-1)  0  0
//! ```
//!
//! So `0 => 01`, `1 => 00`, `-1 => 101`, `2 => 100`.
//!
//! ## Run length code
//!
//! ```text
//!  v == 0:  0
//!  v >= 1:  1  (1 b)*  0
//!              ▲
//!              └─ one continuation pair per bit below the highest set bit
//! ```
//!
//! So `0 => 0`, `1 => 10`, `2 => 1100`, `5 => 110110`.
//!
//! The stream has no terminator and no length field.
//! The decoder MUST know the pixel count, which is `width * height`.

#[macro_use]
extern crate log;

pub mod bits;
pub mod bmp;
pub mod code;
pub mod dump;
mod encode;
mod error;
mod pixel;
mod token;
mod verify;

pub use bits::{BitReader, BitWriter};
pub use bmp::{read_bmp, Bitmap};
pub use code::{RunLengthCode, SignedDeltaCode};
pub use encode::{compress, compress_verified, CompressedImage};
pub use error::{Error, Result};
pub use pixel::{PixelBuffer, QuantizedColor};
pub use token::{RunToken, RunTokens, Tokens};
pub use verify::verify;

/// largest width or height the display can show
pub const MAX_DIMENSION: usize = 240;
/// clears the two low-order bits of a channel
const QUANT_MASK: u8 = 0xFC;
/// one quantization step
const QUANT_STEP: i32 = 4;
/// bytes per pixel in the source buffer
const CHANNELS: usize = 3;
