use crate::{Error, Result, CHANNELS, MAX_DIMENSION, QUANT_MASK, QUANT_STEP};
use std::fmt;

/// A borrowed row-major RGB raster, 3 bytes per pixel, no padding.
#[derive(Clone, Copy)]
pub struct PixelBuffer<'a> {
    width: usize,
    height: usize,
    data: &'a [u8],
}

impl<'a> PixelBuffer<'a> {
    /// Checks the display bound first, then that `data` holds exactly
    /// `3 * width * height` bytes.
    pub fn new(width: usize, height: usize, data: &'a [u8]) -> Result<Self> {
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(Error::InputTooLarge { width, height });
        }
        if width == 0 || height == 0 {
            return Err(Error::EmptyImage);
        }
        let expected = CHANNELS * width * height;
        if data.len() != expected {
            return Err(Error::BufferLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(PixelBuffer {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    /// Quantized colour of pixel `index`.
    pub fn get(&self, index: usize) -> Option<QuantizedColor> {
        let start = index.checked_mul(CHANNELS)?;
        let rgb = self.data.get(start..start.checked_add(CHANNELS)?)?;
        Some(QuantizedColor::new(rgb[0], rgb[1], rgb[2]))
    }

    pub fn quantized(&self) -> impl Iterator<Item = QuantizedColor> + 'a {
        self.data
            .chunks_exact(CHANNELS)
            .map(|rgb| QuantizedColor::new(rgb[0], rgb[1], rgb[2]))
    }
}

impl fmt::Debug for PixelBuffer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// An RGB colour with the two low-order bits of each channel cleared.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct QuantizedColor([u8; 3]);

impl QuantizedColor {
    pub const BLACK: QuantizedColor = QuantizedColor([0, 0, 0]);

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        QuantizedColor([r & QUANT_MASK, g & QUANT_MASK, b & QUANT_MASK])
    }

    pub fn r(&self) -> u8 {
        self.0[0]
    }

    pub fn g(&self) -> u8 {
        self.0[1]
    }

    pub fn b(&self) -> u8 {
        self.0[2]
    }

    pub fn channels(&self) -> [u8; 3] {
        self.0
    }

    /// Per-channel difference `self - old` in quantization steps.
    pub fn delta_from(&self, old: QuantizedColor) -> [i32; 3] {
        let mut ret = [0; 3];
        for (d, (new, old)) in ret.iter_mut().zip(self.0.iter().zip(old.0)) {
            *d = (*new as i32 - old as i32) / QUANT_STEP;
        }
        ret
    }

    /// Applies a delta in quantization steps. Channels wrap modulo 256,
    /// the way an 8-bit accumulator on the display would.
    pub fn apply(&self, delta: [i32; 3]) -> QuantizedColor {
        let mut ret = self.0;
        for (c, d) in ret.iter_mut().zip(delta) {
            *c = c.wrapping_add(d.wrapping_mul(QUANT_STEP) as u8);
        }
        QuantizedColor(ret)
    }
}

impl fmt::Debug for QuantizedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r(), self.g(), self.b())
    }
}
