//! API error responses.
//!
//! Every error leaves the server as `{"error": "..."}` with an
//! appropriate status. The messages for invalid URLs and the
//! unconfigured classifier are part of the client contract; clients
//! display them verbatim.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use linkstash_core::StashError;

pub const INVALID_URL_MESSAGE: &str = "Please enter a valid URL (e.g., https://example.com)";
pub const UNCONFIGURED_MESSAGE: &str = "Categorization service is not configured.";
pub const UNRETRIEVABLE_MESSAGE: &str =
    "Could not retrieve content from this URL. Please check the address and try again.";

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: message.into() }
    }

    pub fn invalid_url() -> Self {
        Self::bad_request(INVALID_URL_MESSAGE)
    }

    pub fn unconfigured() -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, message: UNCONFIGURED_MESSAGE.to_string() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, message: message.into() }
    }

    /// Map pipeline errors onto the API contract: bad input and
    /// unreachable pages are the client's problem, everything else is
    /// ours.
    pub fn from_pipeline(err: StashError) -> Self {
        match err {
            StashError::InvalidUrl(_) => Self::invalid_url(),
            StashError::Timeout { .. }
            | StashError::FetchExhausted { .. }
            | StashError::UpstreamStatus { .. }
            | StashError::HttpError(_) => Self::bad_request(UNRETRIEVABLE_MESSAGE),
            other => Self::internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url_maps_to_400() {
        let err = ApiError::from_pipeline(StashError::InvalidUrl("nope".to_string()));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, INVALID_URL_MESSAGE);
    }

    #[test]
    fn test_fetch_failure_maps_to_400() {
        let err = ApiError::from_pipeline(StashError::FetchExhausted {
            url: "https://example.com".to_string(),
            last: "HTTP 403".to_string(),
        });
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, UNRETRIEVABLE_MESSAGE);
    }

    #[test]
    fn test_storage_failure_maps_to_500() {
        let err = ApiError::from_pipeline(StashError::Storage("pool exhausted".to_string()));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
