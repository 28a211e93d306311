use std::sync::OnceLock;

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::config;

/// Authenticated identity derived from a verified credential.
///
/// Lives for one request: produced by the auth middleware, carried through
/// request extensions, never persisted.
#[derive(Debug, Clone)]
pub struct Principal {
    pub id: Uuid,
    pub email: Option<String>,
}

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("identity provider is not configured")]
    NotConfigured,

    #[error("token rejected by identity provider")]
    Rejected,

    #[error("verified token carries no usable user id")]
    MissingSubject,

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("unexpected identity provider response: {0}")]
    Malformed(String),
}

/// Shape of the provider's user-verification response. Only the fields the
/// pipeline consumes are read; everything else is ignored.
#[derive(Debug, Deserialize)]
struct ProviderUser {
    id: String,
    email: Option<String>,
}

/// Client for the identity provider's token verification endpoint.
///
/// One instance per process; the underlying connection pool is reused across
/// all requests. This is the only type that performs network I/O to the
/// identity provider.
pub struct IdentityClient {
    http: reqwest::Client,
    base_url: String,
    service_key: String,
}

impl IdentityClient {
    pub fn new(base_url: impl Into<String>, service_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            service_key: service_key.into(),
        }
    }

    /// Process-wide client, built from config on first use. `None` when the
    /// provider credentials are absent.
    fn instance() -> Option<&'static IdentityClient> {
        static INSTANCE: OnceLock<Option<IdentityClient>> = OnceLock::new();
        INSTANCE
            .get_or_init(|| {
                let identity = &config::config().identity;
                match (&identity.base_url, &identity.service_key) {
                    (Some(url), Some(key)) => Some(IdentityClient::new(url.clone(), key.clone())),
                    _ => None,
                }
            })
            .as_ref()
    }

    /// Verify a bearer credential against the configured provider.
    pub async fn verify(token: &str) -> Result<Principal, IdentityError> {
        let client = Self::instance().ok_or(IdentityError::NotConfigured)?;
        client.verify_token(token).await
    }

    /// Submit the token to the provider's user endpoint and map the result
    /// to a Principal.
    pub async fn verify_token(&self, token: &str) -> Result<Principal, IdentityError> {
        let url = format!("{}/auth/v1/user", self.base_url.trim_end_matches('/'));

        let response = self
            .http
            .get(url)
            .header("apikey", &self.service_key)
            .bearer_auth(token)
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Err(IdentityError::Rejected),
            status if !status.is_success() => {
                return Err(IdentityError::Malformed(format!(
                    "verification returned status {}",
                    status
                )))
            }
            _ => {}
        }

        let user: ProviderUser = response
            .json()
            .await
            .map_err(|e| IdentityError::Malformed(e.to_string()))?;

        principal_from_provider(user)
    }
}

fn principal_from_provider(user: ProviderUser) -> Result<Principal, IdentityError> {
    let id = Uuid::parse_str(&user.id).map_err(|_| IdentityError::MissingSubject)?;
    if id.is_nil() {
        return Err(IdentityError::MissingSubject);
    }
    Ok(Principal {
        id,
        email: user.email,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_user_maps_to_principal() {
        let user = ProviderUser {
            id: "5f4dcc3b-aaaa-4bbb-8ccc-0123456789ab".to_string(),
            email: Some("buyer@example.com".to_string()),
        };
        let principal = principal_from_provider(user).unwrap();
        assert_eq!(
            principal.id,
            Uuid::parse_str("5f4dcc3b-aaaa-4bbb-8ccc-0123456789ab").unwrap()
        );
        assert_eq!(principal.email.as_deref(), Some("buyer@example.com"));
    }

    #[test]
    fn nil_or_garbage_subject_is_rejected() {
        let nil = ProviderUser {
            id: Uuid::nil().to_string(),
            email: None,
        };
        assert!(matches!(
            principal_from_provider(nil),
            Err(IdentityError::MissingSubject)
        ));

        let garbage = ProviderUser {
            id: "not-a-uuid".to_string(),
            email: None,
        };
        assert!(matches!(
            principal_from_provider(garbage),
            Err(IdentityError::MissingSubject)
        ));
    }
}
