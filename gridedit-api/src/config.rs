//! API Configuration Module
//!
//! Configuration for the listening address, CORS and the served grid.
//! Values are loaded from environment variables with sensible defaults
//! for development.

use crate::error::{ApiError, ApiResult};
use gridedit_core::GridConfig;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Default port when neither `PORT` nor `GRIDEDIT_API_PORT` is set.
pub const DEFAULT_PORT: u16 = 3000;

// ============================================================================
// API CONFIGURATION
// ============================================================================

/// API configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    // ========================================================================
    // Listener
    // ========================================================================
    /// Host or IP to bind.
    pub bind_host: String,

    /// Raw port value; validated by [`ApiConfig::bind_addr`].
    pub port: String,

    // ========================================================================
    // CORS Configuration
    // ========================================================================
    /// Allowed CORS origins (comma-separated in env var).
    /// Empty means allow all origins (dev mode).
    pub cors_origins: Vec<String>,

    /// Whether to allow credentials in CORS requests.
    pub cors_allow_credentials: bool,

    /// Max age for CORS preflight cache in seconds.
    pub cors_max_age_secs: u64,

    // ========================================================================
    // Grid
    // ========================================================================
    /// TOML file describing the served grid. `None` serves the demo grid.
    pub grid_config_path: Option<PathBuf>,

    /// Overrides the grid name from the grid configuration.
    pub grid_name: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT.to_string(),
            cors_origins: Vec::new(), // Empty = allow all
            cors_allow_credentials: false,
            cors_max_age_secs: 86400, // 24 hours
            grid_config_path: None,
            grid_name: None,
        }
    }
}

impl ApiConfig {
    /// Create ApiConfig from environment variables.
    ///
    /// Environment variables:
    /// - `GRIDEDIT_API_BIND`: Host to bind (default: 0.0.0.0)
    /// - `PORT` or `GRIDEDIT_API_PORT`: Port to bind (default: 3000)
    /// - `GRIDEDIT_CORS_ORIGINS`: Comma-separated allowed origins (empty = allow all)
    /// - `GRIDEDIT_CORS_ALLOW_CREDENTIALS`: "true" or "false" (default: false)
    /// - `GRIDEDIT_CORS_MAX_AGE_SECS`: Preflight cache duration (default: 86400)
    /// - `GRIDEDIT_GRID_CONFIG`: Path to a grid TOML file
    /// - `GRIDEDIT_GRID_NAME`: Grid name override
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let bind_host = lookup("GRIDEDIT_API_BIND").unwrap_or(defaults.bind_host);
        let port = lookup("PORT")
            .or_else(|| lookup("GRIDEDIT_API_PORT"))
            .unwrap_or(defaults.port);

        let cors_origins = lookup("GRIDEDIT_CORS_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let cors_allow_credentials = lookup("GRIDEDIT_CORS_ALLOW_CREDENTIALS")
            .map(|s| s.to_lowercase() == "true")
            .unwrap_or(false);

        let cors_max_age_secs = lookup("GRIDEDIT_CORS_MAX_AGE_SECS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.cors_max_age_secs);

        let grid_config_path = lookup("GRIDEDIT_GRID_CONFIG")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let grid_name = lookup("GRIDEDIT_GRID_NAME").filter(|s| !s.trim().is_empty());

        Self {
            bind_host,
            port,
            cors_origins,
            cors_allow_credentials,
            cors_max_age_secs,
            grid_config_path,
            grid_name,
        }
    }

    /// Socket address to listen on.
    pub fn bind_addr(&self) -> ApiResult<SocketAddr> {
        let port = self.port.parse::<u16>().map_err(|_| {
            ApiError::invalid_input(format!("Invalid port value: {}", self.port))
        })?;

        let addr = format!("{}:{}", self.bind_host, port);
        addr.parse::<SocketAddr>().map_err(|e| {
            ApiError::invalid_input(format!("Invalid bind address {}: {}", addr, e))
        })
    }

    /// Check if running in production mode (strict CORS).
    pub fn is_production(&self) -> bool {
        !self.cors_origins.is_empty()
    }

    /// Load the grid configuration file, if one is configured.
    ///
    /// The name override is applied to whichever configuration is
    /// returned, so callers pass the fallback they want overridden too.
    pub fn load_grid_config(&self, fallback: GridConfig) -> ApiResult<GridConfig> {
        let mut config = match &self.grid_config_path {
            Some(path) => {
                let source = std::fs::read_to_string(path).map_err(|e| {
                    ApiError::configuration_error(format!(
                        "Failed to read grid config {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                GridConfig::from_toml_str(&source)
                    .map_err(|e| ApiError::configuration_error(e.to_string()))?
            }
            None => fallback,
        };

        if let Some(name) = &self.grid_name {
            config.name = name.clone();
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> ApiConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_default_config() {
        let config = config_from(&[]);
        assert_eq!(config.bind_host, "0.0.0.0");
        assert_eq!(config.port, "3000");
        assert!(config.cors_origins.is_empty());
        assert!(!config.cors_allow_credentials);
        assert_eq!(config.cors_max_age_secs, 86400);
        assert!(config.grid_config_path.is_none());
        assert!(config.grid_name.is_none());
    }

    #[test]
    fn test_port_precedence() {
        let config = config_from(&[("PORT", "8080"), ("GRIDEDIT_API_PORT", "9090")]);
        assert_eq!(config.port, "8080");

        let config = config_from(&[("GRIDEDIT_API_PORT", "9090")]);
        assert_eq!(config.port, "9090");
    }

    #[test]
    fn test_bind_addr() -> ApiResult<()> {
        let config = config_from(&[("GRIDEDIT_API_BIND", "127.0.0.1"), ("PORT", "4000")]);
        assert_eq!(config.bind_addr()?.to_string(), "127.0.0.1:4000");
        Ok(())
    }

    #[test]
    fn test_bind_addr_rejects_bad_port() {
        let config = config_from(&[("PORT", "http")]);
        let err = config.bind_addr().expect_err("port must be numeric");
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert!(err.message.contains("http"));
    }

    #[test]
    fn test_cors_origins_are_split_and_trimmed() {
        let config = config_from(&[(
            "GRIDEDIT_CORS_ORIGINS",
            " https://a.example , ,https://b.example",
        )]);
        assert_eq!(
            config.cors_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
        assert!(config.is_production());
    }

    #[test]
    fn test_grid_name_override() -> ApiResult<()> {
        let config = config_from(&[("GRIDEDIT_GRID_NAME", "Posts")]);
        let grid = config.load_grid_config(GridConfig::new("Articles"))?;
        assert_eq!(grid.name, "Posts");
        Ok(())
    }

    #[test]
    fn test_missing_grid_config_file_is_configuration_error() {
        let config = config_from(&[("GRIDEDIT_GRID_CONFIG", "/nonexistent/grid.toml")]);
        let err = config
            .load_grid_config(GridConfig::new("Articles"))
            .expect_err("file does not exist");
        assert_eq!(err.code, ErrorCode::ConfigurationError);
    }
}
