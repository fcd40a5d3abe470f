use std::path::PathBuf;

use anyhow::Context;

use crate::metrics::DEFAULT_CAPACITY;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Directory served under `/static` (browser client), if any.
    pub static_dir: Option<PathBuf>,
    pub cors_permissive: bool,
    /// Recent operations kept for `/metrics/csv`.
    pub metrics_capacity: usize,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            static_dir: std::env::var("STATIC_DIR")
                .ok()
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from),
            cors_permissive: std::env::var("CORS_PERMISSIVE")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .context("CORS_PERMISSIVE must be true or false")?,
            metrics_capacity: match std::env::var("METRICS_CAPACITY") {
                Ok(raw) => raw
                    .parse()
                    .context("METRICS_CAPACITY must be a number")?,
                Err(_) => DEFAULT_CAPACITY,
            },
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
