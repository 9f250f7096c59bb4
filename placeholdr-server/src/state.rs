//! Shared application state for the placeholdr server

use std::sync::Arc;

use chrono::{DateTime, Utc};
use placeholdr_core::{DEFAULT_LIMIT, ImageRenderer, PlaceholderRenderer, StatsAggregator};

/// Shared application state accessible by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Usage statistics fed by the image route and read by `/stats`
    pub stats: Arc<StatsAggregator>,
    /// Renderer for image bodies
    pub renderer: Arc<dyn ImageRenderer>,
    /// Items returned by list endpoints when no `limit` is given
    pub default_limit: usize,
    /// When the server started
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Create a new AppState with default components
    pub fn new() -> Self {
        Self::with_components(
            Arc::new(StatsAggregator::new()),
            Arc::new(PlaceholderRenderer::new()),
        )
    }

    /// Create AppState with custom components (for testing)
    pub fn with_components(stats: Arc<StatsAggregator>, renderer: Arc<dyn ImageRenderer>) -> Self {
        Self {
            stats,
            renderer,
            default_limit: DEFAULT_LIMIT,
            started_at: Utc::now(),
        }
    }

    /// Override the default list size of the reporting endpoints
    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }

    /// Returns how long the server has been running
    pub fn uptime_seconds(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use placeholdr_core::HitBuckets;

    #[test]
    fn test_app_state_new() {
        let state = AppState::new();
        assert!(state.uptime_seconds() >= 0);
        assert_eq!(state.default_limit, DEFAULT_LIMIT);
        assert_eq!(state.stats.total_hits(), 0);
    }

    #[test]
    fn test_app_state_with_components() {
        let stats = Arc::new(StatsAggregator::with_buckets(HitBuckets::new([1_000])));
        let state = AppState::with_components(stats.clone(), Arc::new(PlaceholderRenderer))
            .with_default_limit(3);

        assert_eq!(state.default_limit, 3);
        assert_eq!(state.stats.buckets().thresholds_ms(), &[1_000]);
        assert!(Arc::ptr_eq(&state.stats, &stats));
    }
}
