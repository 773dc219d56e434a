use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use lectura_common::InferenceError;
use lectura_document::ExtractionError;
use serde::Serialize;

use crate::views::ErrorPage;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("no PDF file was uploaded")]
    MissingFile,

    #[error("could not read the upload: {0}")]
    Multipart(#[from] MultipartError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error("failed to render page: {0}")]
    Render(#[from] askama::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingFile => StatusCode::BAD_REQUEST,
            ApiError::Multipart(e) => e.status(),
            ApiError::Extraction(ExtractionError::Load(_) | ExtractionError::Page { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Extraction(_) | ApiError::Inference(_) | ApiError::Render(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::MissingFile => "MISSING_FILE",
            ApiError::Multipart(_) => "BAD_UPLOAD",
            ApiError::Extraction(_) => "EXTRACTION_FAILED",
            ApiError::Inference(_) => "INFERENCE_FAILED",
            ApiError::Render(_) => "INTERNAL",
        }
    }

    fn log(&self) {
        if self.status().is_server_error() {
            tracing::error!(code = self.code(), error = %self, "request failed");
        } else {
            tracing::warn!(code = self.code(), error = %self, "request rejected");
        }
    }
}

/// JSON error body, for the `/api` routes.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code(),
                message: self.to_string(),
            },
        };
        (self.status(), Json(body)).into_response()
    }
}

/// The same errors rendered as an HTML page, for the browser routes.
#[derive(Debug)]
pub struct PageError(pub ApiError);

impl<E> From<E> for PageError
where
    E: Into<ApiError>,
{
    fn from(err: E) -> Self {
        PageError(err.into())
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let err = self.0;
        err.log();
        let status = err.status();
        let page = ErrorPage {
            status: status.as_u16(),
            message: err.to_string(),
        };
        match askama::Template::render(&page) {
            Ok(html) => (status, Html(html)).into_response(),
            Err(_) => (status, err.to_string()).into_response(),
        }
    }
}
