use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ApiError;
use crate::identity::Principal;
use crate::records::{self, NewDeal};
use crate::store;

use super::require_owner;

/// POST /save - map the submitted valuation form into an owned deal and
/// persist it.
pub async fn save(
    Extension(principal): Extension<Principal>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let owner = require_owner(&principal)?;
    let deal: NewDeal = records::map_submission(body, &principal)?;

    let stored = store::deals::insert(deal).await?;
    tracing::info!(user_id = %owner, deal_id = %stored.id, "deal saved");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Deal saved successfully!", "deal": stored })),
    ))
}

/// GET /get-deals - list the caller's deals as the id + business name
/// projection.
pub async fn list(
    Extension(principal): Extension<Principal>,
) -> Result<impl IntoResponse, ApiError> {
    let owner = require_owner(&principal)?;
    let deals = store::deals::list_by_owner(owner).await?;

    Ok(Json(json!({ "deals": deals })))
}

/// GET /get-deal/:dealId - fetch one deal, released only to its owner.
pub async fn get(
    Extension(principal): Extension<Principal>,
    Path(deal_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let owner = require_owner(&principal)?;

    let deal_id = Uuid::parse_str(deal_id.trim())
        .map_err(|_| ApiError::bad_request("dealId must be a valid UUID."))?;

    let deal = store::deals::fetch_by_id(deal_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Deal not found."))?;

    // Ownership mismatch is a 403, never a 404: the row exists, the caller
    // just isn't allowed to see it.
    if deal.user_id != owner {
        tracing::warn!(user_id = %owner, deal_id = %deal_id, "ownership mismatch on deal fetch");
        return Err(ApiError::forbidden("You do not own this deal."));
    }

    Ok(Json(json!({ "deal": deal })))
}
