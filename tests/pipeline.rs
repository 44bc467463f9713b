use cimage::{compress, compress_verified, dump, read_bmp, verify, CompressedImage, Error, RunToken};
use image::{DynamicImage, ImageOutputFormat, RgbImage};
use std::io::Cursor;

fn bmp_bytes(img: RgbImage) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut out, ImageOutputFormat::Bmp)
        .unwrap();
    out.into_inner()
}

#[test]
fn test_bmp_to_c_source() {
    // left half red, right half blue, bottom-up storage must not leak through
    let img = RgbImage::from_fn(4, 2, |x, _| {
        if x < 2 {
            image::Rgb([255, 0, 0])
        } else {
            image::Rgb([0, 0, 255])
        }
    });
    let bmp = read_bmp(&bmp_bytes(img)[..]).unwrap();
    let pixels = bmp.pixels().unwrap();
    let cimg = compress_verified(&pixels).unwrap();
    assert_eq!(
        cimg.tokens().collect::<Vec<_>>(),
        vec![
            RunToken::new(63, 0, 0, 1),
            RunToken::new(-63, 0, 63, 1),
            RunToken::new(63, 0, -63, 1),
            RunToken::new(-63, 0, 63, 1),
        ]
    );

    let mut out = vec![];
    dump::write_c(&cimg, "image", &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("#include \"display.h\"\n"));
    assert!(text.contains("\t.width = 4,\n\t.height = 2,\n"));
    let bytes = text.matches("0x").count();
    assert_eq!(bytes, cimg.len());
}

#[test]
fn test_verify_against_other_image() {
    let a = RgbImage::from_pixel(3, 3, image::Rgb([10, 20, 30]));
    let mut b = a.clone();
    b.put_pixel(1, 2, image::Rgb([10, 20, 40]));
    let a = read_bmp(&bmp_bytes(a)[..]).unwrap();
    let b = read_bmp(&bmp_bytes(b)[..]).unwrap();
    let cimg = compress(&a.pixels().unwrap()).unwrap();
    match verify(&b.pixels().unwrap(), &cimg) {
        Err(Error::VerificationMismatch { index }) => assert_eq!(index, 7),
        other => panic!("expected mismatch, got {other:?}"),
    }
}

#[test]
fn test_stored_payload_round_trip() {
    let img = RgbImage::from_fn(240, 240, |x, y| {
        image::Rgb([(x / 8) as u8 * 8, (y / 8) as u8 * 8, ((x + y) / 16) as u8 * 4])
    });
    let bmp = read_bmp(&bmp_bytes(img)[..]).unwrap();
    let pixels = bmp.pixels().unwrap();
    let cimg = compress_verified(&pixels).unwrap();
    assert!(cimg.len() < bmp.quantized_size());

    let stored = CompressedImage::from_parts(cimg.width(), cimg.height(), cimg.payload().to_vec());
    verify(&pixels, &stored).unwrap();
}
