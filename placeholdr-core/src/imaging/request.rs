//! Validation and normalization of `/img/:width/:height` requests

use crate::error::ImageRequestError;
use crate::stats::{Observation, Size};

use super::RenderParams;

/// Largest width or height the service will render
pub const MAX_DIMENSION: u32 = 2000;

/// A validated image request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub size: Size,
    /// Side of the centered square crop, if requested
    pub square: Option<u32>,
    /// Overlay text, never empty
    pub text: Option<String>,
    /// Request path rebuilt with its query in canonical order
    pub path: String,
}

impl ImageRequest {
    /// Validate raw route parameters.
    ///
    /// `path` is the request path as received (without query string); the
    /// other arguments are the raw path segments and query values.
    pub fn parse(
        path: &str,
        width: &str,
        height: &str,
        square: Option<&str>,
        text: Option<&str>,
    ) -> Result<Self, ImageRequestError> {
        let w = parse_dimension("width", width)?;
        let h = parse_dimension("height", height)?;

        if w > u64::from(MAX_DIMENSION) || h > u64::from(MAX_DIMENSION) {
            return Err(ImageRequestError::DimensionTooLarge {
                width: w,
                height: h,
                max: MAX_DIMENSION,
            });
        }

        let square = match square {
            Some(raw) => parse_square(raw)?,
            None => None,
        };
        let text = text.filter(|t| !t.is_empty()).map(str::to_string);

        let mut normalized = path.to_string();
        if let Some(square) = square {
            normalized.push_str(&format!("?square={}", square));
        }
        if let Some(text) = &text {
            let separator = if square.is_some() { '&' } else { '?' };
            normalized.push(separator);
            normalized.push_str("text=");
            normalized.push_str(&urlencoding::encode(text));
        }

        Ok(Self {
            // Both bounded by MAX_DIMENSION above.
            size: Size::new(w as u32, h as u32),
            square,
            text,
            path: normalized,
        })
    }

    /// Stats contribution of this request
    pub fn observation(&self, referrer: Option<&str>) -> Observation {
        Observation {
            path: self.path.clone(),
            text: self.text.clone(),
            size: self.size,
            referrer: referrer.map(str::to_string),
        }
    }

    /// What the renderer should draw
    pub fn render_params(&self) -> RenderParams {
        RenderParams {
            width: self.size.w,
            height: self.size.h,
            square: self.square,
            text: self.text.clone(),
        }
    }
}

/// Split an optional sign from the leading run of ASCII digits.
fn integer_prefix(raw: &str) -> (bool, &str, &str) {
    let (negative, unsigned) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    (negative, &unsigned[..end], &unsigned[end..])
}

fn parse_dimension(name: &'static str, raw: &str) -> Result<u64, ImageRequestError> {
    let invalid = || ImageRequestError::InvalidDimension {
        name,
        value: raw.to_string(),
    };

    let (negative, digits, rest) = integer_prefix(raw);
    if negative || digits.is_empty() || !rest.is_empty() {
        return Err(invalid());
    }

    // Too many digits for u64 is still "a number", just far too big.
    let value = digits.parse::<u64>().unwrap_or(u64::MAX);
    if value == 0 {
        return Err(invalid());
    }
    Ok(value)
}

/// `None` means the parameter carried no number at all and is ignored.
fn parse_square(raw: &str) -> Result<Option<u32>, ImageRequestError> {
    let invalid = || ImageRequestError::InvalidSquare(raw.to_string());

    if raw.is_empty() {
        return Err(invalid());
    }

    let (negative, digits, rest) = integer_prefix(raw);
    if digits.is_empty() {
        return Ok(None);
    }
    if negative || !rest.is_empty() {
        return Err(invalid());
    }

    match digits.parse::<u64>() {
        Ok(0) => Err(invalid()),
        Ok(value) => Ok(Some(u32::try_from(value).unwrap_or(u32::MAX))),
        Err(_) => Ok(Some(u32::MAX)),
    }
}
