//! Reads 24-bit BMP files into the flat RGB layout the encoder consumes.

use crate::pixel::PixelBuffer;
use crate::{Error, Result};
use image::{DynamicImage, GenericImageView, ImageFormat};
use std::io::Read;

/// offset of biBitCount in BITMAPFILEHEADER + BITMAPINFOHEADER
const BIT_COUNT_OFFSET: usize = 28;

/// An owned top-down raster, R,G,B per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Bitmap {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Uncompressed size at 6 bits per channel, what the display would need
    /// without the run coding.
    pub fn quantized_size(&self) -> usize {
        (18 * self.width * self.height + 7) / 8
    }

    pub fn pixels(&self) -> Result<PixelBuffer<'_>> {
        PixelBuffer::new(self.width, self.height, &self.data)
    }
}

pub fn read_bmp<R: Read>(mut reader: R) -> Result<Bitmap> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    debug!("bitmap file {} bytes", bytes.len());

    let bit_count = bytes
        .get(BIT_COUNT_OFFSET..BIT_COUNT_OFFSET + 2)
        .map(|b| u16::from_le_bytes([b[0], b[1]]));
    debug!("biBitCount = {bit_count:?}");

    if bytes.starts_with(b"BM") && matches!(bit_count, Some(bits) if bits != 24) {
        return Err(Error::UnsupportedBitmap(
            "only 24bit bitmaps supported".to_string(),
        ));
    }

    let img = image::load_from_memory_with_format(&bytes, ImageFormat::Bmp)?;
    debug!("biWidth x biHeight = {} x {}", img.width(), img.height());

    let color = img.color();
    match img {
        DynamicImage::ImageRgb8(rgb) => {
            let (width, height) = rgb.dimensions();
            Ok(Bitmap {
                width: width as usize,
                height: height as usize,
                data: rgb.into_raw(),
            })
        }
        _ => Err(Error::UnsupportedBitmap(format!(
            "unexpected colour type {color:?}"
        ))),
    }
}
