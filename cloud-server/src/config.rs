//! Configuration module

use std::env;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    /// Allow cross-origin requests from any origin
    pub cors_allow_any: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            environment: "development".to_string(),
            cors_allow_any: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let environment = env::var("ENVIRONMENT").unwrap_or(defaults.environment);

        let cors_allow_any = env::var("CORS_ALLOW_ANY")
            .ok()
            .and_then(|v| parse_bool(&v))
            .unwrap_or(environment != "production");

        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            environment,
            cors_allow_any,
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
