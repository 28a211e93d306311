use axum::{extract::Request, http::HeaderMap, middleware::Next, response::Response};

use crate::error::ApiError;
use crate::identity::IdentityClient;

/// Bearer authentication middleware.
///
/// Extracts the credential from the Authorization header, verifies it against
/// the identity provider, and injects the resulting Principal into the
/// request extensions. Every failure short-circuits with 401 before any
/// downstream stage runs. The raw token is never logged.
pub async fn bearer_auth_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers).map_err(ApiError::unauthorized)?;

    let principal = IdentityClient::verify(&token).await.map_err(|err| {
        tracing::warn!(path = %request.uri().path(), "authentication failed: {}", err);
        ApiError::from(err)
    })?;

    tracing::debug!(user_id = %principal.id, path = %request.uri().path(), "authenticated request");
    request.extensions_mut().insert(principal);

    Ok(next.run(request).await)
}

/// Extract the token segment from an `Authorization: Bearer <token>` header.
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| "Authorization header is missing.".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header.".to_string())?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| "Authorization header must use the Bearer scheme.".to_string())?;

    if token.trim().is_empty() {
        return Err("Token is missing from the Authorization header.".to_string());
    }

    Ok(token.to_string())
}
