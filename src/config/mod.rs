use once_cell::sync::Lazy;
use std::env;

/// Process-wide configuration, read from the environment once at startup.
///
/// Provider credentials are optional on purpose: the server starts without
/// them and the routes that need a missing credential fail per-request, so a
/// partially configured deployment keeps the rest of its surface usable.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub identity: IdentityConfig,
    pub billing: BillingConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Base URL of the frontend; checkout redirect targets are built from it.
    pub client_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Identity provider project URL, e.g. https://abc.supabase.co
    pub base_url: Option<String>,
    /// Service-role key sent as the provider `apikey` header.
    pub service_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BillingConfig {
    pub secret_key: Option<String>,
    /// Price reference for the yearly license subscription.
    pub license_price_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            _ => Environment::Development,
        };

        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(3000);

        let database = DatabaseConfig {
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(match environment {
                    Environment::Production => 20,
                    Environment::Development => 5,
                }),
            acquire_timeout_secs: env::var("DATABASE_ACQUIRE_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        };

        Self {
            environment,
            server: ServerConfig {
                port,
                client_url: non_empty(env::var("CLIENT_URL").ok()),
            },
            identity: IdentityConfig {
                base_url: non_empty(env::var("SUPABASE_URL").ok()),
                service_key: non_empty(env::var("SUPABASE_SERVICE_ROLE_KEY").ok()),
            },
            billing: BillingConfig {
                secret_key: non_empty(env::var("STRIPE_SECRET_KEY").ok()),
                license_price_id: non_empty(env::var("STRIPE_LICENSE_PRICE_ID").ok()),
            },
            database,
        }
    }

    /// Log which external credentials are absent. Called once at startup so a
    /// misconfigured deployment is visible before the first failing request.
    pub fn report_missing(&self) {
        if self.identity.base_url.is_none() || self.identity.service_key.is_none() {
            tracing::warn!(
                "identity provider not configured (SUPABASE_URL / SUPABASE_SERVICE_ROLE_KEY); \
                 authenticated routes will reject all tokens"
            );
        }
        if self.billing.secret_key.is_none() {
            tracing::warn!("STRIPE_SECRET_KEY not set; checkout session creation will fail");
        }
        if self.billing.license_price_id.is_none() {
            tracing::warn!("STRIPE_LICENSE_PRICE_ID not set; checkout session creation will fail");
        }
        if self.server.client_url.is_none() {
            tracing::warn!("CLIENT_URL not set; checkout redirect targets cannot be built");
        }
    }
}

/// Treat empty env values the same as unset ones.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
