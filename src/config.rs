use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub downstream: DownstreamConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DownstreamConfig {
    /// Base URL of the service the demo operation forwards to
    pub base_url: String,
    pub timeout_ms: u64,
}

impl DownstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Ok(Config {
            server: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("API_PORT")
                    .unwrap_or_else(|_| "8080".to_string())
                    .parse()
                    .context("API_PORT must be a valid port number")?,
            },
            downstream: DownstreamConfig {
                base_url: env::var("DOWNSTREAM_URL")
                    .unwrap_or_else(|_| "http://localhost:9090".to_string()),
                timeout_ms: env::var("DOWNSTREAM_TIMEOUT_MS")
                    .unwrap_or_else(|_| "5000".to_string())
                    .parse()
                    .context("DOWNSTREAM_TIMEOUT_MS must be a valid number")?,
            },
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
