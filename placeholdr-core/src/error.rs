//! Error types for placeholdr-core

use thiserror::Error;

/// Rejected image request parameters
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageRequestError {
    #[error("Invalid {name}: {value:?} is not a positive integer")]
    InvalidDimension { name: &'static str, value: String },

    #[error("Requested {width}x{height} exceeds the {max}px limit")]
    DimensionTooLarge { width: u64, height: u64, max: u32 },

    #[error("Invalid square: {0:?}")]
    InvalidSquare(String),
}

/// Errors from image renderers
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Cannot render an empty {width}x{height} image")]
    EmptyCanvas { width: u32, height: u32 },
}
