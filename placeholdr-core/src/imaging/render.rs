//! Placeholder image rendering

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage, imageops};

use crate::error::RenderError;

const BACKGROUND: Rgba<u8> = Rgba([204, 204, 204, 255]);
const FOREGROUND: Rgba<u8> = Rgba([150, 150, 150, 255]);
const CAPTION_BAND: Rgba<u8> = Rgba([96, 96, 96, 255]);

/// What to draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderParams {
    pub width: u32,
    pub height: u32,
    /// Crop to a centered square of this side (clamped to the smaller side)
    pub square: Option<u32>,
    pub text: Option<String>,
}

/// Encoded image ready to be sent
#[derive(Debug, Clone)]
pub struct RenderedImage {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

/// Produces the image body for a validated request.
///
/// Implementations are called from a blocking thread and must not touch
/// the stats state.
pub trait ImageRenderer: Send + Sync {
    fn render(&self, params: &RenderParams) -> Result<RenderedImage, RenderError>;
}

/// Grey box with both diagonals and a border, encoded as PNG.
///
/// When overlay text is requested a dark band marks the caption area.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderRenderer;

impl PlaceholderRenderer {
    pub fn new() -> Self {
        Self
    }

    fn draw(&self, params: &RenderParams) -> RgbaImage {
        let (width, height) = (params.width, params.height);
        let mut canvas = RgbaImage::from_pixel(width, height, BACKGROUND);

        if params.text.is_some() {
            let top = height / 3;
            let bottom = (height - top).max(top + 1).min(height);
            for y in top..bottom {
                for x in 0..width {
                    canvas.put_pixel(x, y, CAPTION_BAND);
                }
            }
        }

        let steps = width.max(height);
        for i in 0..steps {
            let x = (u64::from(i) * u64::from(width) / u64::from(steps)) as u32;
            let y = (u64::from(i) * u64::from(height) / u64::from(steps)) as u32;
            canvas.put_pixel(x, y, FOREGROUND);
            canvas.put_pixel(width - 1 - x, y, FOREGROUND);
        }

        for x in 0..width {
            canvas.put_pixel(x, 0, FOREGROUND);
            canvas.put_pixel(x, height - 1, FOREGROUND);
        }
        for y in 0..height {
            canvas.put_pixel(0, y, FOREGROUND);
            canvas.put_pixel(width - 1, y, FOREGROUND);
        }

        match params.square {
            Some(side) => {
                let side = side.min(width).min(height);
                let x = (width - side) / 2;
                let y = (height - side) / 2;
                imageops::crop_imm(&canvas, x, y, side, side).to_image()
            }
            None => canvas,
        }
    }
}

impl ImageRenderer for PlaceholderRenderer {
    fn render(&self, params: &RenderParams) -> Result<RenderedImage, RenderError> {
        if params.width == 0 || params.height == 0 || params.square == Some(0) {
            return Err(RenderError::EmptyCanvas {
                width: params.width,
                height: params.height,
            });
        }

        let canvas = self.draw(params);
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(canvas).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;

        Ok(RenderedImage {
            bytes,
            content_type: "image/png",
        })
    }
}
