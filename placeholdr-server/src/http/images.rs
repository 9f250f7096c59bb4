//! Placeholder image endpoint

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use placeholdr_core::{ImageRequest, ImageRequestError};
use serde::Deserialize;
use tracing::{debug, error};

use crate::state::AppState;

/// Query params for image requests
#[derive(Debug, Default, Deserialize)]
pub struct ImageQuery {
    pub square: Option<String>,
    pub text: Option<String>,
}

/// Status code sent for a rejected request
pub fn rejection_status(error: &ImageRequestError) -> StatusCode {
    match error {
        ImageRequestError::DimensionTooLarge { .. } => StatusCode::FORBIDDEN,
        ImageRequestError::InvalidDimension { .. } | ImageRequestError::InvalidSquare(_) => {
            StatusCode::BAD_REQUEST
        }
    }
}

/// GET /img/:width/:height
///
/// Records the request in the usage stats, then renders the image on a
/// blocking thread. The stats lock is released before rendering starts.
pub async fn serve_image(
    State(state): State<Arc<AppState>>,
    Path((width, height)): Path<(String, String)>,
    Query(query): Query<ImageQuery>,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    let request = match ImageRequest::parse(
        uri.path(),
        &width,
        &height,
        query.square.as_deref(),
        query.text.as_deref(),
    ) {
        Ok(request) => request,
        Err(e) => {
            debug!(path = uri.path(), error = %e, "Rejected image request");
            return rejection_status(&e).into_response();
        }
    };

    let referrer = headers
        .get(header::REFERER)
        .map(|value| String::from_utf8_lossy(value.as_bytes()));
    state
        .stats
        .observe(&request.observation(referrer.as_deref()));

    let renderer = Arc::clone(&state.renderer);
    let params = request.render_params();
    match tokio::task::spawn_blocking(move || renderer.render(&params)).await {
        Ok(Ok(rendered)) => (
            [
                (header::CONTENT_TYPE, rendered.content_type),
                (header::CACHE_CONTROL, "no-store"),
            ],
            rendered.bytes,
        )
            .into_response(),
        Ok(Err(e)) => {
            error!(path = %request.path, "Failed to render image: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
        Err(e) => {
            error!(path = %request.path, "Render task failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
