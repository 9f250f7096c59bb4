//! placeholdr-core: Core library for the placeholdr image service
//!
//! This crate provides the pieces the HTTP layer is built on:
//!
//! - **Usage stats** - [`StatsAggregator`] folds every served image request
//!   into deduplicated [`ValueStore`]s and a newest-first [`HitWindow`], and
//!   answers the recent / top-N / hit-bucket queries of the reporting API
//! - **Image requests** - [`ImageRequest`] validates `/img/:width/:height`
//!   parameters and builds the normalized path recorded in the stats
//! - **Rendering** - [`ImageRenderer`] trait and the PNG
//!   [`PlaceholderRenderer`]
//!
//! # Quick Start
//!
//! ```
//! use placeholdr_core::{ImageRequest, StatsAggregator};
//!
//! let stats = StatsAggregator::new();
//! let request = ImageRequest::parse("/img/300/200", "300", "200", None, Some("hi")).unwrap();
//! stats.observe(&request.observation(Some("https://example.com/")));
//!
//! assert_eq!(stats.recent_paths(10), vec!["/img/300/200?text=hi"]);
//! assert_eq!(stats.top_sizes(10)[0].n, 1);
//! ```

pub mod error;
pub mod imaging;
pub mod stats;

// Re-export key types for convenience
pub use error::{ImageRequestError, RenderError};
pub use imaging::{
    ImageRenderer, ImageRequest, MAX_DIMENSION, PlaceholderRenderer, RenderParams, RenderedImage,
};
pub use stats::{
    DEFAULT_HIT_BUCKETS_MS, DEFAULT_LIMIT, HitBucket, HitBuckets, HitWindow, Observation,
    ReferrerCount, Size, SizeCount, StatCategory, StatRecord, StatValue, StatsAggregator,
    StatsState, ValueStore,
};
