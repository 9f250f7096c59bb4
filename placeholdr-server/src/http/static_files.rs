//! Static file serving for the embedded landing page

use axum::{
    body::Body,
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

/// Embedded public assets (compiled into binary)
#[derive(RustEmbed)]
#[folder = "public/"]
struct PublicAssets;

/// Handler for serving static files from embedded assets
///
/// `/` maps to `index.html`; anything that is not an embedded file is a 404.
pub async fn static_handler(uri: Uri) -> impl IntoResponse {
    let path = match uri.path().trim_start_matches('/') {
        "" => "index.html",
        path => path,
    };

    serve_file(path).unwrap_or_else(|| StatusCode::NOT_FOUND.into_response())
}

/// Serve a file from embedded assets
fn serve_file(path: &str) -> Option<Response<Body>> {
    let file = PublicAssets::get(path)?;

    // Determine content type from file extension
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime.as_ref())
        .body(Body::from(file.data.into_owned()))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum_test::TestServer;

    fn create_test_app() -> Router {
        Router::new().fallback(static_handler)
    }

    #[tokio::test]
    async fn test_root_serves_index() {
        let server = TestServer::new(create_test_app()).unwrap();

        let response = server.get("/").await;
        response.assert_status_ok();
        assert!(response.text().contains("placeholdr"));
        assert!(
            response
                .header(header::CONTENT_TYPE)
                .to_str()
                .unwrap()
                .starts_with("text/html")
        );
    }

    #[tokio::test]
    async fn test_stylesheet_content_type() {
        let server = TestServer::new(create_test_app()).unwrap();

        let response = server.get("/style.css").await;
        response.assert_status_ok();
        assert!(
            response
                .header(header::CONTENT_TYPE)
                .to_str()
                .unwrap()
                .starts_with("text/css")
        );
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let server = TestServer::new(create_test_app()).unwrap();

        server
            .get("/nope.js")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
