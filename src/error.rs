// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

/// HTTP API error with appropriate status codes and client-friendly messages.
///
/// Every failure in the request pipeline is translated into exactly one of
/// these before it reaches the response boundary; handlers return
/// `Result<_, ApiError>` and let axum render the body.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 403 Forbidden
    Forbidden(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Internal(msg) => msg,
        }
    }

    /// Flat error body: `{"error": "..."}`
    pub fn to_json(&self) -> Value {
        json!({ "error": self.message() })
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

// Convert gateway error types to ApiError

impl From<crate::store::StoreError> for ApiError {
    fn from(err: crate::store::StoreError) -> Self {
        // Don't expose internal SQL errors to clients
        tracing::error!("store error: {}", err);
        ApiError::internal("Internal server error.")
    }
}

impl From<crate::identity::IdentityError> for ApiError {
    fn from(err: crate::identity::IdentityError) -> Self {
        use crate::identity::IdentityError;
        match err {
            IdentityError::NotConfigured => {
                tracing::error!("identity provider credentials missing");
                ApiError::unauthorized("Authentication failed.")
            }
            IdentityError::Rejected => ApiError::unauthorized("Invalid or expired token."),
            IdentityError::MissingSubject => {
                ApiError::unauthorized("Token did not resolve to a user.")
            }
            IdentityError::Transport(e) => {
                tracing::error!("identity provider request failed: {}", e);
                ApiError::unauthorized("Authentication failed.")
            }
            IdentityError::Malformed(msg) => {
                tracing::error!("identity provider response malformed: {}", msg);
                ApiError::unauthorized("Authentication failed.")
            }
        }
    }
}

impl From<crate::billing::BillingError> for ApiError {
    fn from(err: crate::billing::BillingError) -> Self {
        use crate::billing::BillingError;
        match err {
            BillingError::NotConfigured(what) => {
                tracing::error!("checkout configuration missing: {}", what);
                ApiError::internal("Checkout is not configured.")
            }
            other => {
                tracing::error!("checkout session creation failed: {}", other);
                ApiError::internal("Failed to create checkout session.")
            }
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_taxonomy() {
        assert_eq!(
            ApiError::bad_request("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::unauthorized("x").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::forbidden("x").status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::internal("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn body_is_flat_error_object() {
        let err = ApiError::forbidden("You do not own this deal.");
        assert_eq!(err.to_json(), json!({ "error": "You do not own this deal." }));
    }

    #[test]
    fn identity_rejection_maps_to_401() {
        let err: ApiError = crate::identity::IdentityError::Rejected.into();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.message(), "Invalid or expired token.");
    }

    #[test]
    fn missing_price_maps_to_500() {
        let err: ApiError =
            crate::billing::BillingError::NotConfigured("STRIPE_LICENSE_PRICE_ID").into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
