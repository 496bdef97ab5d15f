use std::env;
use std::time::Duration;

use auth::SecretError;
use auth::SigningSecret;
use auth::TokenLifetimes;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::domain::identity::models::IdentitySettings;
use crate::domain::identity::models::RefreshPolicy;

/// Legacy single-variable name for the signing secret.
const LEGACY_SECRET_VAR: &str = "JWT_SECRET";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Absent `url` selects the in-memory store.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_access_token_minutes")]
    pub access_token_minutes: i64,
    #[serde(default = "default_refresh_token_days")]
    pub refresh_token_days: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("access_token_minutes", &self.access_token_minutes)
            .field("refresh_token_days", &self.refresh_token_days)
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    #[serde(default = "default_hashing_timeout_ms")]
    pub hashing_timeout_ms: u64,
    #[serde(default)]
    pub refresh_policy: RefreshPolicy,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            hashing_timeout_ms: default_hashing_timeout_ms(),
            refresh_policy: RefreshPolicy::default(),
        }
    }
}

fn default_access_token_minutes() -> i64 {
    15
}

fn default_refresh_token_days() -> i64 {
    7
}

fn default_hashing_timeout_ms() -> u64 {
    5000
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, SERVER__HTTP_PORT, DATABASE__URL, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. `JWT_SECRET` as a fallback for `jwt.secret`
    ///
    /// # Errors
    /// Fails when `jwt.secret` is not set anywhere or a value has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let mut builder = ConfigBuilder::builder();
        if let Ok(secret) = env::var(LEGACY_SECRET_VAR) {
            builder = builder.set_default("jwt.secret", secret)?;
        }

        let configuration = builder
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::default().separator("__"))
            .build()?;

        configuration.try_deserialize()
    }

    /// Validated signing secret.
    ///
    /// # Errors
    /// * `Missing` - Secret is empty
    /// * `TooShort` - Secret is shorter than the minimum length
    pub fn signing_secret(&self) -> Result<SigningSecret, SecretError> {
        SigningSecret::new(self.jwt.secret.as_bytes())
    }

    /// Token lifetimes, or `None` when either is not positive or out of range.
    pub fn token_lifetimes(&self) -> Option<TokenLifetimes> {
        TokenLifetimes::new(
            chrono::Duration::try_minutes(self.jwt.access_token_minutes)?,
            chrono::Duration::try_days(self.jwt.refresh_token_days)?,
        )
    }

    pub fn identity_settings(&self) -> IdentitySettings {
        IdentitySettings {
            hashing_timeout: Duration::from_millis(self.auth.hashing_timeout_ms),
            refresh_policy: self.auth.refresh_policy,
        }
    }
}

/// Deserialize a configuration from an in-memory TOML document.
pub fn from_toml(document: &str) -> Result<Config, ConfigError> {
    ConfigBuilder::builder()
        .add_source(File::from_str(document, config::FileFormat::Toml))
        .build()
        .and_then(|c| c.try_deserialize())
}
