//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Upstream completion service configuration
    pub upstream: UpstreamConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Upstream completion service configuration
#[derive(Clone)]
pub struct UpstreamConfig {
    /// API key for the completion service.
    ///
    /// An unset key does not fail startup; requests fail when the
    /// upstream call is attempted.
    pub api_key: String,
}

impl std::fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the key itself
        f.debug_struct("UpstreamConfig")
            .field("api_key_len", &self.api_key.len())
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(3000),
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            },
            upstream: UpstreamConfig {
                api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            },
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_addr_joins_host_and_port() {
        let config = Config {
            server: ServerConfig {
                port: 3000,
                host: "0.0.0.0".to_string(),
            },
            upstream: UpstreamConfig {
                api_key: String::new(),
            },
        };
        assert_eq!(config.server_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn debug_output_hides_api_key() {
        let config = UpstreamConfig {
            api_key: "sk-secret".to_string(),
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("sk-secret"));
    }
}
