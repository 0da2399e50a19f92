use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use super::render::Renderer;

/// Errors that end a page request with a non-200 status.
///
/// Search failures are not represented here; they render as an empty result
/// list instead.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl PageError {
    #[must_use]
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    #[must_use]
    pub fn video_not_found(id: &str) -> Self {
        Self::NotFound(format!("Video {id} could not be found"))
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::BadRequest(msg) | Self::NotFound(msg) => msg,
        }
    }

    /// Renders the error with the site's templates.
    #[must_use]
    pub fn render(&self, renderer: &Renderer) -> Response {
        let status = self.status();
        let heading = status.canonical_reason().unwrap_or("Error");
        (status, Html(renderer.error_page(heading, self.message()))).into_response()
    }
}
