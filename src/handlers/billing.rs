use axum::{response::IntoResponse, Extension, Json};
use serde_json::json;

use crate::billing::CheckoutClient;
use crate::error::ApiError;
use crate::identity::Principal;

use super::require_owner;

/// POST /create-checkout-session - request a hosted checkout URL for the
/// yearly license subscription on behalf of the caller.
pub async fn create_checkout_session(
    Extension(principal): Extension<Principal>,
) -> Result<impl IntoResponse, ApiError> {
    let owner = require_owner(&principal)?;

    let url = CheckoutClient::create_subscription_session(owner).await?;
    tracing::info!(user_id = %owner, "checkout session created");

    Ok(Json(json!({ "url": url })))
}
