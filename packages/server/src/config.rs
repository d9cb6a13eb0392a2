use anyhow::Result;
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub openclaw_gateway_url: String,
    pub openclaw_gateway_token: Option<String>,
    /// Only required by migrate_cli; the worker itself owns no database.
    pub database_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            openclaw_gateway_url: env::var("OPENCLAW_GATEWAY_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:18789".to_string()),
            openclaw_gateway_token: env::var("OPENCLAW_GATEWAY_TOKEN").ok(),
            database_url: env::var("DATABASE_URL").ok(),
        })
    }
}
