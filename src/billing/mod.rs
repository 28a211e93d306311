use std::sync::OnceLock;

use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::config;

const PROVIDER_API_BASE: &str = "https://api.stripe.com";

#[derive(Debug, Error)]
pub enum BillingError {
    #[error("missing configuration: {0}")]
    NotConfigured(&'static str),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("payment provider returned status {0}: {1}")]
    Provider(reqwest::StatusCode, String),

    #[error("payment provider response carried no checkout url")]
    MissingUrl,
}

/// The one field read out of the provider's session payload.
#[derive(Debug, Deserialize)]
struct CheckoutSession {
    url: Option<String>,
}

/// Client for the payment provider's hosted checkout API.
///
/// One instance per process. Configuration is held as options so the client
/// can exist in a partially configured deployment; each session request
/// checks its required settings before touching the network.
pub struct CheckoutClient {
    http: reqwest::Client,
    api_base: String,
    secret_key: Option<String>,
    license_price_id: Option<String>,
    client_url: Option<String>,
}

impl CheckoutClient {
    pub fn new(
        secret_key: Option<String>,
        license_price_id: Option<String>,
        client_url: Option<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: PROVIDER_API_BASE.to_string(),
            secret_key,
            license_price_id,
            client_url,
        }
    }

    fn instance() -> &'static CheckoutClient {
        static INSTANCE: OnceLock<CheckoutClient> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let cfg = config::config();
            CheckoutClient::new(
                cfg.billing.secret_key.clone(),
                cfg.billing.license_price_id.clone(),
                cfg.server.client_url.clone(),
            )
        })
    }

    /// Create a hosted checkout session for the yearly license subscription,
    /// on behalf of the given owner.
    pub async fn create_subscription_session(owner: Uuid) -> Result<String, BillingError> {
        Self::instance().create_session(owner).await
    }

    pub async fn create_session(&self, owner: Uuid) -> Result<String, BillingError> {
        // Required settings are checked before any provider call
        let price_id = self
            .license_price_id
            .as_deref()
            .ok_or(BillingError::NotConfigured("STRIPE_LICENSE_PRICE_ID"))?;
        let secret_key = self
            .secret_key
            .as_deref()
            .ok_or(BillingError::NotConfigured("STRIPE_SECRET_KEY"))?;
        let client_url = self
            .client_url
            .as_deref()
            .ok_or(BillingError::NotConfigured("CLIENT_URL"))?
            .trim_end_matches('/');

        // The {CHECKOUT_SESSION_ID} placeholder is resolved by the provider
        // at redirect time; the owner id rides along as opaque metadata for
        // later reconciliation.
        let params = [
            ("mode", "subscription".to_string()),
            ("line_items[0][price]", price_id.to_string()),
            ("line_items[0][quantity]", "1".to_string()),
            ("metadata[user_id]", owner.to_string()),
            (
                "success_url",
                format!("{}/success?session_id={{CHECKOUT_SESSION_ID}}", client_url),
            ),
            ("cancel_url", format!("{}/cancel", client_url)),
        ];

        let response = self
            .http
            .post(format!("{}/v1/checkout/sessions", self.api_base))
            .basic_auth(secret_key, None::<&str>)
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(BillingError::Provider(status, excerpt(&detail)));
        }

        let session: CheckoutSession = response.json().await?;
        session.url.ok_or(BillingError::MissingUrl)
    }
}

/// Keep provider error bodies short enough to log.
fn excerpt(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    }
}
