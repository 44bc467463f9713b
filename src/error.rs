use std::collections::TryReserveError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("image larger than 240x240 display ({width}x{height})")]
    InputTooLarge { width: usize, height: usize },

    #[error("image has no pixels")]
    EmptyImage,

    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferLength { expected: usize, actual: usize },

    #[error("could not allocate output buffer")]
    Allocation(#[from] TryReserveError),

    #[error("compare failed at pixel {index}")]
    VerificationMismatch { index: usize },

    #[error("error reading bitmap: {0}")]
    Bitmap(#[from] image::ImageError),

    #[error("error reading bitmap: {0}")]
    UnsupportedBitmap(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
