pub mod billing;
pub mod deals;
pub mod surveys;

use uuid::Uuid;

use crate::error::ApiError;
use crate::identity::Principal;

/// The owner-identity stage every authenticated route runs before touching a
/// gateway: the Principal must carry a usable identifier.
pub fn require_owner(principal: &Principal) -> Result<Uuid, ApiError> {
    if principal.id.is_nil() {
        return Err(ApiError::unauthorized(
            "Authenticated user has no usable id.",
        ));
    }
    Ok(principal.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nil_owner_is_unauthorized() {
        let principal = Principal {
            id: Uuid::nil(),
            email: None,
        };
        let err = require_owner(&principal).unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn real_owner_passes_through() {
        let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
        let principal = Principal { id, email: None };
        assert_eq!(require_owner(&principal).unwrap(), id);
    }
}
