//! Server configuration.
//!
//! Values come from command-line flags, falling back to environment
//! variables. A `.env` file in the working directory is loaded first.

use axum::http::HeaderValue;
use clap::Parser;

use crate::error::ConfigError;

/// Default per-connection outbound queue capacity
pub const DEFAULT_SEND_QUEUE_CAPACITY: usize = 64;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "studyhall-server",
    version,
    about = "Student records backend with a room relay over WebSocket"
)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "BIND_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Browser origin allowed by CORS (e.g. https://example.com)
    #[arg(long, env = "SITE_URL")]
    pub site_url: Option<String>,

    /// Frames buffered per relay connection before it is considered stuck
    #[arg(
        long,
        env = "SEND_QUEUE_CAPACITY",
        default_value_t = DEFAULT_SEND_QUEUE_CAPACITY,
        value_parser = parse_capacity
    )]
    pub send_queue_capacity: usize,

    /// Default log level when RUST_LOG is not set
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

fn parse_capacity(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("capacity must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            site_url: None,
            send_queue_capacity: DEFAULT_SEND_QUEUE_CAPACITY,
            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Load `.env` (if present) and parse flags and environment
    pub fn load() -> Self {
        let _ = dotenv::dotenv();
        Self::parse()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The CORS origin as a header value, if one is configured
    pub fn cors_origin(&self) -> Result<Option<HeaderValue>, ConfigError> {
        self.site_url
            .as_deref()
            .map(|url| {
                HeaderValue::from_str(url.trim_end_matches('/'))
                    .map_err(|_| ConfigError::InvalidSiteUrl(url.to_string()))
            })
            .transpose()
    }
}
