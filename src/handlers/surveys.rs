use axum::{http::StatusCode, response::IntoResponse, Extension, Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::identity::Principal;
use crate::records::{self, NewSurvey};
use crate::store;

use super::require_owner;

/// POST /save-survey - map and persist an onboarding survey for the caller.
pub async fn save(
    Extension(principal): Extension<Principal>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let owner = require_owner(&principal)?;
    let survey: NewSurvey = records::map_submission(body, &principal)?;

    let stored = store::surveys::insert(survey).await?;
    tracing::info!(user_id = %owner, survey_id = %stored.id, "survey saved");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Survey saved successfully!", "survey": stored })),
    ))
}
