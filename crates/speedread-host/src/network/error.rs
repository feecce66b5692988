use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

pub type Result<T> = std::result::Result<T, ContentError>;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Invalid JSON body")]
    InvalidJson,

    #[error("Missing or invalid \"text\" field")]
    InvalidText,

    #[error("Invalid content id")]
    InvalidId,

    #[error("Content too large. Max {max} bytes.")]
    TooLarge { max: usize },

    #[error("Rate limit exceeded. Max {max} requests per {window_secs} seconds.")]
    RateLimited {
        max: usize,
        window_secs: u64,
        retry_after_secs: u64,
    },

    #[error("Content not found or expired")]
    NotFound,

    #[error("Not found")]
    NoRoute,
}

impl ContentError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidJson | Self::InvalidText | Self::InvalidId => StatusCode::BAD_REQUEST,
            Self::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::NotFound | Self::NoRoute => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ContentError {
    fn into_response(self) -> Response {
        let status = self.status();
        let retry_after = match &self {
            Self::RateLimited {
                retry_after_secs, ..
            } => Some(*retry_after_secs),
            _ => None,
        };

        let mut response = (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response();

        if let Some(secs) = retry_after {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs));
        }
        response
    }
}
