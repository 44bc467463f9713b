use crate::bits::BitWriter;
use crate::pixel::PixelBuffer;
use crate::token::{RunTokens, Tokens};
use crate::{verify, Error, Result, CHANNELS};

/// A packed image ready for the display: dimensions plus the token stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedImage {
    width: u8,
    height: u8,
    payload: Vec<u8>,
}

impl CompressedImage {
    /// Wraps an existing payload, e.g. one read back from storage.
    pub fn from_parts(width: u8, height: u8, payload: Vec<u8>) -> Self {
        CompressedImage {
            width,
            height,
            payload,
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Payload bytes, MSB first within each byte.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    pub fn tokens(&self) -> Tokens<'_> {
        Tokens::new(&self.payload, self.pixel_count())
    }

    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }
}

pub fn compress(pixels: &PixelBuffer) -> Result<CompressedImage> {
    let (width, height) = dimensions(pixels)?;
    let mut w = BitWriter::with_capacity(CHANNELS * pixels.len())?;
    let mut count = 0;
    for token in RunTokens::new(pixels) {
        debug!("token {count}: {token:?}");
        token.write(&mut w);
        count += 1;
    }
    debug!(
        "{count} tokens, {} bits in {} bytes",
        w.bit_len(),
        w.len()
    );
    Ok(CompressedImage {
        width,
        height,
        payload: w.into_bytes(),
    })
}

/// Compresses and round-trips the result, so a returned image is always
/// known to decode back to the quantized input.
pub fn compress_verified(pixels: &PixelBuffer) -> Result<CompressedImage> {
    let img = compress(pixels)?;
    verify(pixels, &img)?;
    Ok(img)
}

fn dimensions(pixels: &PixelBuffer) -> Result<(u8, u8)> {
    let too_large = || Error::InputTooLarge {
        width: pixels.width(),
        height: pixels.height(),
    };
    let width = u8::try_from(pixels.width()).map_err(|_| too_large())?;
    let height = u8::try_from(pixels.height()).map_err(|_| too_large())?;
    Ok((width, height))
}
