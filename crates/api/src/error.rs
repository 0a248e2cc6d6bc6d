//! API error types with HTTP response mapping.

use application::ServiceError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::OrderError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from the client.
    BadRequest(String),
    /// Use-case error.
    Service(ServiceError),
}

impl ApiError {
    /// Builds the not-found error for an order id.
    pub fn order_not_found(order_id: &str) -> Self {
        ApiError::NotFound(format!("Order {order_id} not found"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Service(err) => service_error_to_response(err),
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn service_error_to_response(err: ServiceError) -> (StatusCode, String) {
    match &err {
        ServiceError::OrderAlreadyExists(_) => (StatusCode::CONFLICT, err.to_string()),
        ServiceError::Order(OrderError::InvalidStateTransition { .. }) => {
            (StatusCode::CONFLICT, err.to_string())
        }
        ServiceError::Order(OrderError::TotalOutOfRange) => {
            (StatusCode::BAD_REQUEST, OrderError::TotalOutOfRange.to_string())
        }
        ServiceError::Repository(_) => {
            tracing::error!(error = %err, "internal server error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError::Service(err)
    }
}
