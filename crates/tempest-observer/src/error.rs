//! Error types for the dashboard HTTP layer.
//!
//! [`ObserverError`] can be converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors that can occur in the dashboard HTTP layer.
///
/// Missing observation data is never an error; it is served as `null`.
#[derive(Debug, thiserror::Error)]
pub enum ObserverError {
    /// The requested route does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The dashboard page failed to render.
    #[error("render error: {0}")]
    Render(#[from] minijinja::Error),
}

impl IntoResponse for ObserverError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::NotFound(path) => (StatusCode::NOT_FOUND, format!("no route for {path}")),
            Self::Render(e) => {
                tracing::error!(error = %e, "dashboard render failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    String::from("dashboard could not be rendered"),
                )
            }
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
