//! HTTP endpoint configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::config::{non_empty, parse_flag};

/// HTTP endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Port number to listen on.
    pub port: u16,

    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Enable CORS for browser clients.
    #[serde(default = "default_cors")]
    pub enable_cors: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors() -> bool {
    true
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            enable_cors: default_cors(),
        }
    }
}

impl HttpConfig {
    /// Load HTTP config from environment-style variables.
    pub fn from_vars(vars: &HashMap<String, String>) -> Self {
        let port = non_empty(vars, "RESOURCES_HTTP_PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or_else(default_port);
        let host = non_empty(vars, "RESOURCES_HTTP_HOST")
            .map(str::to_string)
            .unwrap_or_else(default_host);
        let enable_cors = non_empty(vars, "RESOURCES_HTTP_CORS")
            .map(|v| parse_flag(v, true))
            .unwrap_or_else(default_cors);

        Self {
            port,
            host,
            enable_cors,
        }
    }

    /// The address to bind to.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HttpConfig::default();
        assert_eq!(config.address(), "127.0.0.1:8080");
        assert!(config.enable_cors);
    }

    #[test]
    fn test_from_vars() {
        let vars: HashMap<String, String> = [
            ("RESOURCES_HTTP_PORT", "9090"),
            ("RESOURCES_HTTP_HOST", "0.0.0.0"),
            ("RESOURCES_HTTP_CORS", "off"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config = HttpConfig::from_vars(&vars);

        assert_eq!(config.address(), "0.0.0.0:9090");
        assert!(!config.enable_cors);
    }

    #[test]
    fn test_invalid_port_falls_back() {
        let vars: HashMap<String, String> =
            [("RESOURCES_HTTP_PORT".to_string(), "not-a-port".to_string())].into();

        assert_eq!(HttpConfig::from_vars(&vars).port, 8080);
    }
}
