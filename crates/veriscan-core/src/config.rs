//! Configuration module
//!
//! Process configuration is read from the environment exactly once at startup
//! and is read-only thereafter.

use std::env;

use anyhow::bail;

/// Fireworks chat-completions endpoint base.
pub const FIREWORKS_API_BASE: &str = "https://api.fireworks.ai/inference/v1";

/// Vision model used for document reading.
pub const FIREWORKS_MODEL: &str = "accounts/fireworks/models/llama4-scout-instruct-basic";

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_JWT_SECRET: &str = "dev-secret-key";
const JWT_EXPIRY_HOURS: i64 = 24;

/// Process-wide configuration, established once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    /// Credential for the remote vision model. May be absent: the service then
    /// starts degraded and extraction calls fail with an extraction error.
    pub fireworks_api_key: Option<String>,
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    pub server_port: u16,
    pub environment: String,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let environment =
            env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let config = Config {
            fireworks_api_key: env::var("FIREWORKS_API_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:veriscan.db?mode=rwc".to_string()),
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string()),
            jwt_expiry_hours: JWT_EXPIRY_HOURS,
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            environment,
        };

        config.validate()?;
        Ok(config)
    }

    /// Fail fast on misconfiguration before the server starts serving.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.is_production() && self.jwt_secret == DEFAULT_JWT_SECRET {
            bail!("JWT_SECRET must be set in production");
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            fireworks_api_key: None,
            database_url: "sqlite::memory:".to_string(),
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            jwt_expiry_hours: JWT_EXPIRY_HOURS,
            server_port: DEFAULT_PORT,
            environment: "development".to_string(),
        }
    }

    #[test]
    fn test_default_secret_allowed_in_development() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_default_secret_rejected_in_production() {
        let mut config = base_config();
        config.environment = "production".to_string();
        assert!(config.validate().is_err());

        config.jwt_secret = "an-actual-secret-value".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_is_production_variants() {
        let mut config = base_config();
        assert!(!config.is_production());
        config.environment = "PROD".to_string();
        assert!(config.is_production());
    }
}
