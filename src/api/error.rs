use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use super::wire::ErrorBody;
use crate::DroughtWatchError;

/// Errors surfaced by HTTP handlers
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Region not found: {0}")]
    RegionNotFound(String),

    #[error("Route not found")]
    RouteNotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Request timed out")]
    Timeout,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error")]
    Internal(#[source] DroughtWatchError),
}

impl ApiError {
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::RegionNotFound(_) | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Timeout => StatusCode::REQUEST_TIMEOUT,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            ApiError::RegionNotFound(region) => ErrorBody {
                region: Some(region.clone()),
                ..ErrorBody::new("not_found")
            },
            ApiError::RouteNotFound => ErrorBody::new("not_found"),
            ApiError::MethodNotAllowed => ErrorBody::new("method_not_allowed"),
            ApiError::Timeout => ErrorBody::new("timeout"),
            ApiError::BadRequest(message) => ErrorBody {
                message: Some(message.clone()),
                ..ErrorBody::new("bad_request")
            },
            ApiError::Internal(_) => ErrorBody::new("internal"),
        }
    }
}

impl From<DroughtWatchError> for ApiError {
    fn from(err: DroughtWatchError) -> Self {
        match err {
            DroughtWatchError::NotFound { region } => ApiError::RegionNotFound(region),
            other => ApiError::Internal(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(source) = &self {
            error!(error = %source, "Request failed");
        }
        (self.status_code(), Json(self.body())).into_response()
    }
}
