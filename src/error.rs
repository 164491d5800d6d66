use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Failure of a service operation.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// A required input was absent. Detected before touching the store.
    #[error("{0}")]
    Validation(&'static str),
    #[error("malformed identifier {0:?}")]
    MalformedId(String),
    #[error("{0}")]
    NotFound(&'static str),
    #[error("Invalid credentials")]
    Auth,
    #[error("store error: {0:#}")]
    Store(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            // Bad credentials share the status of a missing field.
            ServiceError::Validation(_) | ServiceError::Auth => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            // Malformed ids are reported like any other store failure.
            ServiceError::MalformedId(_) | ServiceError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// A service failure bound to the operation that produced it, ready to be
/// rendered by the gateway.
#[derive(Debug)]
pub struct ApiError {
    pub source: ServiceError,
    /// Text sent back for server-side failures, e.g. "Signup failed".
    pub failure: &'static str,
}

impl ApiError {
    pub fn new(source: ServiceError, failure: &'static str) -> Self {
        Self { source, failure }
    }

    /// Adapter for `map_err` in handlers.
    pub fn with(failure: &'static str) -> impl Fn(ServiceError) -> Self {
        move |source| Self::new(source, failure)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.source.status();
        if status.is_server_error() {
            error!(error = %self.source, "{}", self.failure);
            (status, Json(json!({ "error": self.failure }))).into_response()
        } else {
            warn!(%status, reason = %self.source, "request rejected");
            (status, Json(json!({ "message": self.source.to_string() }))).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_the_taxonomy() {
        assert_eq!(
            ServiceError::Validation("All fields are required").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ServiceError::Auth.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ServiceError::NotFound("No books found for this user").status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::MalformedId("xyz".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ServiceError::Store(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn server_errors_hide_the_cause() {
        let res = ApiError::new(ServiceError::Store(anyhow::anyhow!("pool timed out")), "Signup failed")
            .into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(v, json!({ "error": "Signup failed" }));
    }

    #[tokio::test]
    async fn client_errors_carry_a_message() {
        let res = ApiError::new(ServiceError::Auth, "Login failed").into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(v, json!({ "message": "Invalid credentials" }));
    }
}
