//! Payload and projection types for the stats engine

use std::fmt;

use serde::{Deserialize, Serialize};

/// Requested image dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

impl Size {
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.w, self.h)
    }
}

/// Selects one of the four value stores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatCategory {
    Paths,
    Texts,
    Sizes,
    Referrers,
}

impl StatCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paths => "paths",
            Self::Texts => "texts",
            Self::Sizes => "sizes",
            Self::Referrers => "referrers",
        }
    }
}

impl fmt::Display for StatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A payload for any store.
///
/// Paths, texts and referrers hold [`StatValue::Text`]; sizes hold
/// [`StatValue::Size`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Text(String),
    Size(Size),
}

impl From<String> for StatValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for StatValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Size> for StatValue {
    fn from(value: Size) -> Self {
        Self::Size(value)
    }
}

/// A size together with how often it was requested
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeCount {
    pub w: u32,
    pub h: u32,
    pub n: u64,
}

/// A referrer together with how often it was seen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferrerCount {
    #[serde(rename = "ref")]
    pub referrer: String,
    pub n: u64,
}
