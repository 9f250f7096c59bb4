//! Usage stats reporting endpoints
//!
//! All list endpoints take an optional `limit` query parameter. Without it
//! the configured default applies; a value that is not a non-negative
//! integer returns an empty list.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use placeholdr_core::{HitBucket, ReferrerCount, Size, SizeCount, stats::parse_limit};
use tracing::debug;

use crate::state::AppState;

/// Raw query pairs as extracted by the list endpoints
pub type RawLimitQuery = Result<Query<Vec<(String, String)>>, QueryRejection>;

/// The `limit` value shared by the list endpoints
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LimitQuery {
    pub limit: Option<String>,
}

impl LimitQuery {
    /// Pick `limit` out of the query pairs.
    ///
    /// A repeated `limit` or an unreadable query string is kept as an
    /// unparseable value, so the endpoint answers with an empty list.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let mut values = pairs
            .iter()
            .filter(|(key, _)| key == "limit")
            .map(|(_, value)| value.as_str());
        let limit = match (values.next(), values.next()) {
            (None, _) => None,
            (Some(value), None) => Some(value.to_string()),
            (Some(_), Some(_)) => Some(String::new()),
        };
        Self { limit }
    }

    fn extract(query: RawLimitQuery) -> Self {
        match query {
            Ok(Query(pairs)) => Self::from_pairs(&pairs),
            Err(e) => {
                debug!(error = %e, "Unreadable list query");
                Self {
                    limit: Some(String::new()),
                }
            }
        }
    }

    fn resolve(&self, state: &AppState) -> usize {
        parse_limit(self.limit.as_deref(), state.default_limit)
    }
}

/// GET /stats/paths/recent
pub async fn recent_paths(
    State(state): State<Arc<AppState>>,
    query: RawLimitQuery,
) -> Json<Vec<String>> {
    Json(state.stats.recent_paths(LimitQuery::extract(query).resolve(&state)))
}

/// GET /stats/texts/recent
pub async fn recent_texts(
    State(state): State<Arc<AppState>>,
    query: RawLimitQuery,
) -> Json<Vec<String>> {
    Json(state.stats.recent_texts(LimitQuery::extract(query).resolve(&state)))
}

/// GET /stats/sizes/recent
pub async fn recent_sizes(
    State(state): State<Arc<AppState>>,
    query: RawLimitQuery,
) -> Json<Vec<Size>> {
    Json(state.stats.recent_sizes(LimitQuery::extract(query).resolve(&state)))
}

/// GET /stats/sizes/top
pub async fn top_sizes(
    State(state): State<Arc<AppState>>,
    query: RawLimitQuery,
) -> Json<Vec<SizeCount>> {
    Json(state.stats.top_sizes(LimitQuery::extract(query).resolve(&state)))
}

/// GET /stats/referrers/top
pub async fn top_referrers(
    State(state): State<Arc<AppState>>,
    query: RawLimitQuery,
) -> Json<Vec<ReferrerCount>> {
    Json(state.stats.top_referrers(LimitQuery::extract(query).resolve(&state)))
}

/// GET /stats/hits
pub async fn hits(State(state): State<Arc<AppState>>) -> Json<Vec<HitBucket>> {
    Json(state.stats.hits())
}

/// DELETE /stats
pub async fn reset(State(state): State<Arc<AppState>>) -> StatusCode {
    state.stats.reset();
    StatusCode::OK
}
