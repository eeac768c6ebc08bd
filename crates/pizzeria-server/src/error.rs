//! API errors
//!
//! Handler failures become [`ApiError`] replies; filter rejections (bad form
//! bodies, unknown routes) are mapped by [`handle_rejection`].

use crate::cookie::CookieError;
use pizzeria_cart::CartError;
use pizzeria_rules::{EvaluationError, RuleError};
use serde::Serialize;
use std::convert::Infallible;
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Rejection, Reply};

/// Errors returned to HTTP clients
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Resource does not exist
    #[error("{0}")]
    NotFound(String),

    /// Request is well-formed HTTP but not a valid operation
    #[error("{0}")]
    BadRequest(String),

    /// Rule definition rejected by the registry
    #[error(transparent)]
    InvalidRule(#[from] RuleError),

    /// Rule set could not be run against the supplied facts
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    /// Resulting session no longer fits in a cookie
    #[error("{0}")]
    SessionTooLarge(String),

    /// Server-side failure
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Create not-found error
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Create bad-request error
    pub fn bad_request(reason: impl Into<String>) -> Self {
        Self::BadRequest(reason.into())
    }

    /// HTTP status for this error
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) | Self::InvalidRule(_) | Self::Evaluation(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::SessionTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CartError> for ApiError {
    fn from(e: CartError) -> Self {
        match e {
            CartError::ProductNotFound(id) => Self::NotFound(format!("product not found: {id}")),
            CartError::Session(e) => Self::Internal(e.to_string()),
        }
    }
}

impl From<CookieError> for ApiError {
    fn from(e: CookieError) -> Self {
        match e {
            CookieError::TooLarge { .. } => Self::SessionTooLarge(e.to_string()),
            e => Self::Internal(e.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

fn error_reply(status: StatusCode, message: String) -> Response {
    warp::reply::with_status(warp::reply::json(&ErrorBody { error: message }), status)
        .into_response()
}

impl Reply for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }
        error_reply(status, self.to_string())
    }
}

/// Map warp rejections to JSON error replies
///
/// # Errors
/// Never; every rejection becomes a reply.
pub async fn handle_rejection(err: Rejection) -> Result<Response, Infallible> {
    let (status, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "not found".to_string())
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, e.to_string())
    } else if let Some(e) = err.find::<warp::reject::PayloadTooLarge>() {
        (StatusCode::PAYLOAD_TOO_LARGE, e.to_string())
    } else if let Some(e) = err.find::<warp::reject::LengthRequired>() {
        (StatusCode::LENGTH_REQUIRED, e.to_string())
    } else if let Some(e) = err.find::<warp::reject::UnsupportedMediaType>() {
        (StatusCode::UNSUPPORTED_MEDIA_TYPE, e.to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "method not allowed".to_string())
    } else {
        tracing::error!(rejection = ?err, "unhandled rejection");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
    };

    Ok(error_reply(status, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pizzeria_catalog::ProductId;

    #[test]
    fn status_mapping() {
        assert_eq!(ApiError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::bad_request("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::from(RuleError::EmptyName).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(CartError::ProductNotFound(ProductId::new("p"))).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(CookieError::TooLarge { size: 5000, limit: 4096 }).status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            ApiError::from(CookieError::Key).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn reply_has_json_body() {
        let response = ApiError::bad_request("unknown action: bake").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()["content-type"],
            "application/json"
        );
    }
}
