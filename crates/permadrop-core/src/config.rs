//! Configuration module
//!
//! This module provides the gateway configuration: server settings, the
//! injected uploader wallet, and the destination folder for uploads.
//!
//! The wallet JWK is deliberately *only* accepted from the environment (an
//! inline JSON value or a file path) so credential material never lives in
//! source or version control.

use std::env;
use std::fs;

use uuid::Uuid;

const DEFAULT_PORT: u16 = 4000;

/// Application configuration for the upload gateway
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    /// Uploader wallet JWK as a JSON string. This single identity signs and
    /// pays for every upload regardless of any caller-supplied owner field.
    pub wallet_jwk: String,
    /// Destination folder for every uploaded entity.
    pub dest_folder_id: Uuid,
}

impl Config {
    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let wallet_jwk = match env::var("ARWEAVE_WALLET_JWK") {
            Ok(jwk) => jwk,
            Err(_) => {
                let path = env::var("ARWEAVE_WALLET_FILE").map_err(|_| {
                    anyhow::anyhow!(
                        "ARWEAVE_WALLET_JWK or ARWEAVE_WALLET_FILE must be set (uploader wallet)"
                    )
                })?;
                fs::read_to_string(&path).map_err(|e| {
                    anyhow::anyhow!("Failed to read wallet file {}: {}", path, e)
                })?
            }
        };

        let dest_folder_id = env::var("DEST_FOLDER_ID")
            .map_err(|_| anyhow::anyhow!("DEST_FOLDER_ID must be set"))?
            .parse::<Uuid>()
            .map_err(|_| anyhow::anyhow!("DEST_FOLDER_ID must be a valid UUID"))?;

        let config = Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            wallet_jwk,
            dest_folder_id,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let wallet: serde_json::Value = serde_json::from_str(&self.wallet_jwk)
            .map_err(|e| anyhow::anyhow!("Uploader wallet is not valid JSON: {}", e))?;
        if !wallet.is_object() {
            return Err(anyhow::anyhow!("Uploader wallet JWK must be a JSON object"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(environment: &str, wallet_jwk: &str) -> Config {
        Config {
            server_port: 4000,
            cors_origins: vec!["*".to_string()],
            environment: environment.to_string(),
            wallet_jwk: wallet_jwk.to_string(),
            dest_folder_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn test_validate_accepts_development_wildcard_cors() {
        let config = test_config("development", r#"{"kty":"RSA"}"#);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_production_wildcard_cors() {
        let config = test_config("production", r#"{"kty":"RSA"}"#);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_json_wallet() {
        let config = test_config("development", "not json");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_object_wallet() {
        let config = test_config("development", r#""just a string""#);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_is_production() {
        assert!(test_config("production", "{}").is_production());
        assert!(test_config("Prod", "{}").is_production());
        assert!(!test_config("development", "{}").is_production());
    }
}
