//! Configuration schema (pipedag.toml)

use serde::{Deserialize, Serialize};

/// Environment variable overriding `server.host`
pub const HOST_ENV: &str = "PIPEDAG_HOST";

/// Environment variable overriding `server.port`
pub const PORT_ENV: &str = "PIPEDAG_PORT";

/// Listen address for the HTTP server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to bind
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for binding
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Cross-origin policy for browser clients
///
/// `"*"` in `allow_methods` or `allow_headers` means "any".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Origins allowed to call the API
    #[serde(default = "default_origins")]
    pub allow_origins: Vec<String>,

    /// Whether cookies and auth headers may be sent
    #[serde(default = "default_true")]
    pub allow_credentials: bool,

    #[serde(default = "wildcard")]
    pub allow_methods: Vec<String>,

    #[serde(default = "wildcard")]
    pub allow_headers: Vec<String>,
}

fn default_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

fn default_true() -> bool {
    true
}

fn wildcard() -> Vec<String> {
    vec!["*".to_string()]
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origins: default_origins(),
            allow_credentials: true,
            allow_methods: wildcard(),
            allow_headers: wildcard(),
        }
    }
}

impl CorsConfig {
    /// Check if any method is allowed
    pub fn any_method(&self) -> bool {
        self.allow_methods.iter().any(|m| m == "*")
    }

    /// Check if any request header is allowed
    pub fn any_header(&self) -> bool {
        self.allow_headers.iter().any(|h| h == "*")
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// HTTP listen address
    #[serde(default)]
    pub server: ServerConfig,

    /// Cross-origin policy
    #[serde(default)]
    pub cors: CorsConfig,
}

impl Config {
    /// Load config from TOML file
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        Self::from_toml(&contents)
    }

    /// Load config from TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Save config to TOML file
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        let toml = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path, toml).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Apply `PIPEDAG_HOST` / `PIPEDAG_PORT` overrides
    ///
    /// `lookup` is usually `|key| std::env::var(key).ok()`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(HOST_ENV) {
            self.server.host = host;
        }

        if let Some(port) = lookup(PORT_ENV) {
            self.server.port = port
                .parse()
                .map_err(|_| ConfigError::InvalidValue(PORT_ENV.to_string(), port))?;
        }

        Ok(())
    }
}

/// Config error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}
