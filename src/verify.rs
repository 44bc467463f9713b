use crate::bits::BitReader;
use crate::encode::CompressedImage;
use crate::pixel::{PixelBuffer, QuantizedColor};
use crate::token::RunToken;
use crate::{Error, Result};

/// Decodes `img` and compares every pixel with the quantized source.
///
/// Fails with the index of the first pixel that differs, or that the
/// payload ends before reaching.
pub fn verify(pixels: &PixelBuffer, img: &CompressedImage) -> Result<()> {
    let mut reader = BitReader::new(img.payload());
    let mut color = QuantizedColor::BLACK;
    let mut run = 0;
    for index in 0..img.pixel_count() {
        if run == 0 {
            let Some(token) = RunToken::read(&mut reader) else {
                warn!("payload ended at bit {} before pixel {index}", reader.position());
                return Err(Error::VerificationMismatch { index });
            };
            trace!("pixel {index}: {token:?}");
            color = color.apply(token.delta);
            run = token.run;
        } else {
            run -= 1;
        }

        match pixels.get(index) {
            Some(expected) if expected == color => {}
            Some(expected) => {
                warn!("pixel {index}: decoded {color:?}, expected {expected:?}");
                return Err(Error::VerificationMismatch { index });
            }
            None => {
                warn!("pixel {index}: source has only {} pixels", pixels.len());
                return Err(Error::VerificationMismatch { index });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::verify;
    use crate::encode::{compress, CompressedImage};
    use crate::pixel::PixelBuffer;
    use crate::Error;
    use crate::tests::setup;

    /// xorshift32, enough to make noisy test images
    fn noise(seed: &mut u32) -> u8 {
        *seed ^= *seed << 13;
        *seed ^= *seed >> 17;
        *seed ^= *seed << 5;
        (*seed >> 24) as u8
    }

    fn mismatch_at(res: crate::Result<()>) -> Option<usize> {
        match res {
            Err(Error::VerificationMismatch { index }) => Some(index),
            _ => None,
        }
    }

    #[test]
    fn test_verify_scenarios() {
        setup();
        let cases: [(usize, usize, Vec<u8>); 4] = [
            (1, 1, vec![0, 0, 0]),
            (2, 1, vec![0, 0, 0, 4, 0, 0]),
            (3, 1, vec![252; 9]),
            (2, 2, vec![255, 0, 255, 1, 254, 2, 1, 254, 3, 128, 128, 128]),
        ];
        for (width, height, data) in cases.into_iter() {
            let pixels = PixelBuffer::new(width, height, &data).unwrap();
            let img = compress(&pixels).unwrap();
            verify(&pixels, &img).unwrap();
        }
    }

    #[test]
    fn test_verify_noise() {
        setup();
        let mut seed = 0x2019_0808;
        for (width, height) in [(1, 240), (240, 1), (17, 13), (240, 240)] {
            let data: Vec<u8> = (0..3 * width * height).map(|_| noise(&mut seed)).collect();
            let pixels = PixelBuffer::new(width, height, &data).unwrap();
            let img = compress(&pixels).unwrap();
            verify(&pixels, &img).unwrap();
        }
    }

    #[test]
    fn test_verify_banded() {
        setup();
        // long horizontal bands with a gentle gradient, like a photo sky
        let (width, height) = (240, 240);
        let data: Vec<u8> = (0..width * height)
            .flat_map(|i| {
                let y = (i / width) as u8;
                [y / 2, 100u8.wrapping_add(y / 3), 255 - y]
            })
            .collect();
        let pixels = PixelBuffer::new(width, height, &data).unwrap();
        let img = compress(&pixels).unwrap();
        verify(&pixels, &img).unwrap();
        assert!(img.len() < data.len() / 100);
    }

    #[test]
    fn test_corrupted_bit() {
        setup();
        let data = [0, 0, 0, 4, 0, 0];
        let pixels = PixelBuffer::new(2, 1, &data).unwrap();
        let payload = compress(&pixels).unwrap().into_payload();
        assert_eq!(payload, vec![0x54, 0x28]);

        // sign bit of the second token's red delta: 1 becomes 0
        let img = CompressedImage::from_parts(2, 1, vec![0x54, 0x28 ^ 0x80]);
        assert_eq!(mismatch_at(verify(&pixels, &img)), Some(1));

        // first bit of the stream: red delta becomes -2
        let img = CompressedImage::from_parts(2, 1, vec![0x54 ^ 0x80, 0x28]);
        assert_eq!(mismatch_at(verify(&pixels, &img)), Some(0));
    }

    #[test]
    fn test_truncated_payload() {
        setup();
        let data = [0, 0, 0, 4, 0, 0];
        let pixels = PixelBuffer::new(2, 1, &data).unwrap();
        let img = CompressedImage::from_parts(2, 1, vec![0x54]);
        assert_eq!(mismatch_at(verify(&pixels, &img)), Some(1));
        let img = CompressedImage::from_parts(2, 1, vec![]);
        assert_eq!(mismatch_at(verify(&pixels, &img)), Some(0));
    }

    #[test]
    fn test_source_exhausted() {
        setup();
        let data = [0, 0, 0];
        let pixels = PixelBuffer::new(1, 1, &data).unwrap();
        // claims two pixels: one black token with run 1
        let img = CompressedImage::from_parts(2, 1, vec![0b0101_0110]);
        assert_eq!(mismatch_at(verify(&pixels, &img)), Some(1));
    }
}
