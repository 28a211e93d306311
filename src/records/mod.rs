pub mod deal;
pub mod survey;

pub use deal::{Deal, DealSummary, NewDeal};
pub use survey::{NewSurvey, Survey};

use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;
use crate::identity::Principal;

/// A persisted-record kind that can be built from a submitted form body.
///
/// Adding a record kind means adding a type with a fixed field list and
/// implementing this trait; existing kinds are never touched.
pub trait Submission: DeserializeOwned {
    /// Record kind name, used in logs and client-facing messages.
    const KIND: &'static str;

    /// Stamp the owning principal. Always runs after deserialization, so a
    /// caller-supplied owner field can never survive the mapping.
    fn assign_owner(&mut self, owner: Uuid);
}

/// Map a raw request body into a record owned by the given principal.
///
/// The mapping is total over well-formed bodies: every destination field
/// reads one fixed body key, absent keys leave the field unset, and unknown
/// keys are ignored. Field-level range validation is left to the store's
/// schema constraints.
pub fn map_submission<T: Submission>(body: Value, principal: &Principal) -> Result<T, ApiError> {
    if !body.is_object() {
        return Err(ApiError::bad_request(format!(
            "Expected a JSON object for the {} payload.",
            T::KIND
        )));
    }

    let mut record: T = serde_json::from_value(body).map_err(|e| {
        tracing::debug!(kind = T::KIND, "submission rejected: {}", e);
        ApiError::bad_request(format!("Invalid {} payload: {}.", T::KIND, e))
    })?;

    record.assign_owner(principal.id);
    Ok(record)
}
