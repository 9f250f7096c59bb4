//! Image request handling: parameter validation and rendering

mod render;
mod request;

pub use render::{ImageRenderer, PlaceholderRenderer, RenderParams, RenderedImage};
pub use request::{ImageRequest, MAX_DIMENSION};
