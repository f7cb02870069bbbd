//! Configuration management for the weather dashboard
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::DashboardError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure for the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Open-Meteo forecast API settings
    #[serde(default)]
    pub open_meteo: OpenMeteoConfig,
    /// RainViewer radar API settings
    #[serde(default)]
    pub rainviewer: RainViewerConfig,
    /// National Weather Service API settings
    #[serde(default)]
    pub nws: NwsConfig,
    /// Outbound HTTP settings shared by all adapters
    #[serde(default)]
    pub http: HttpConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Dashboard HTTP server
    #[serde(default)]
    pub server: ServerConfig,
}

/// Open-Meteo API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenMeteoConfig {
    /// Base URL, `/forecast` is appended
    #[serde(default = "default_open_meteo_base_url")]
    pub base_url: String,
    /// Forecast horizon in days
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u32,
}

/// RainViewer API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RainViewerConfig {
    /// Weather maps index URL
    #[serde(default = "default_rainviewer_api_url")]
    pub api_url: String,
    /// Tile host used when the payload carries none
    #[serde(default = "default_rainviewer_tile_host")]
    pub default_tile_host: String,
}

/// NWS API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NwsConfig {
    #[serde(default = "default_nws_base_url")]
    pub base_url: String,
    /// Identifying User-Agent required by the NWS access policy
    #[serde(default = "default_nws_user_agent")]
    pub user_agent: String,
}

/// Outbound HTTP settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in seconds
    #[serde(default = "default_http_timeout")]
    pub timeout_seconds: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Dashboard server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
}

// Default value functions
fn default_open_meteo_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_forecast_days() -> u32 {
    7
}

fn default_rainviewer_api_url() -> String {
    "https://api.rainviewer.com/public/weather-maps.json".to_string()
}

fn default_rainviewer_tile_host() -> String {
    "https://tilecache.rainviewer.com".to_string()
}

fn default_nws_base_url() -> String {
    "https://api.weather.gov".to_string()
}

fn default_nws_user_agent() -> String {
    "weather-app/1.0".to_string()
}

fn default_http_timeout() -> u32 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    8080
}

impl Default for OpenMeteoConfig {
    fn default() -> Self {
        Self {
            base_url: default_open_meteo_base_url(),
            forecast_days: default_forecast_days(),
        }
    }
}

impl Default for RainViewerConfig {
    fn default() -> Self {
        Self {
            api_url: default_rainviewer_api_url(),
            default_tile_host: default_rainviewer_tile_host(),
        }
    }
}

impl Default for NwsConfig {
    fn default() -> Self {
        Self {
            base_url: default_nws_base_url(),
            user_agent: default_nws_user_agent(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_http_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            open_meteo: OpenMeteoConfig::default(),
            rainviewer: RainViewerConfig::default(),
            nws: NwsConfig::default(),
            http: HttpConfig::default(),
            logging: LoggingConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl HttpConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.into())
    }
}

impl DashboardConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. WXDASH_HTTP__TIMEOUT_SECONDS=10
        builder = builder.add_source(
            Environment::with_prefix("WXDASH")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: DashboardConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("weather-dashboard").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.open_meteo.base_url.is_empty() {
            self.open_meteo.base_url = default_open_meteo_base_url();
        }
        if self.open_meteo.forecast_days == 0 {
            self.open_meteo.forecast_days = default_forecast_days();
        }
        if self.rainviewer.api_url.is_empty() {
            self.rainviewer.api_url = default_rainviewer_api_url();
        }
        if self.rainviewer.default_tile_host.is_empty() {
            self.rainviewer.default_tile_host = default_rainviewer_tile_host();
        }
        if self.nws.base_url.is_empty() {
            self.nws.base_url = default_nws_base_url();
        }
        if self.http.timeout_seconds == 0 {
            self.http.timeout_seconds = default_http_timeout();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.server.host.is_empty() {
            self.server.host = default_server_host();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_urls()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_urls(&self) -> Result<()> {
        let urls = [
            ("Open-Meteo base URL", &self.open_meteo.base_url),
            ("RainViewer API URL", &self.rainviewer.api_url),
            ("RainViewer tile host", &self.rainviewer.default_tile_host),
            ("NWS base URL", &self.nws.base_url),
        ];

        for (name, url) in urls {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(DashboardError::config(format!(
                    "{name} must be a valid HTTP or HTTPS URL, got '{url}'"
                ))
                .into());
            }
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.http.timeout_seconds > 300 {
            return Err(DashboardError::config("HTTP timeout cannot exceed 300 seconds").into());
        }

        if !(1..=16).contains(&self.open_meteo.forecast_days) {
            return Err(DashboardError::config(
                "Open-Meteo forecast days must be between 1 and 16",
            )
            .into());
        }

        if self.server.port == 0 {
            return Err(DashboardError::config("Server port cannot be 0").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(DashboardError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(DashboardError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if self.nws.user_agent.trim().is_empty() {
            return Err(DashboardError::config(
                "NWS user agent cannot be empty, the service rejects anonymous requests",
            )
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = DashboardConfig::default();
        assert_eq!(config.open_meteo.base_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.open_meteo.forecast_days, 7);
        assert_eq!(config.nws.user_agent, "weather-app/1.0");
        assert_eq!(config.http.timeout(), Duration::from_secs(30));
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.server.port, 8080);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = DashboardConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = DashboardConfig::default();
        config.http.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));

        let mut config = DashboardConfig::default();
        config.open_meteo.forecast_days = 30;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_urls() {
        let mut config = DashboardConfig::default();
        config.nws.base_url = "api.weather.gov".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("NWS base URL"));
    }

    #[test]
    fn test_empty_user_agent_rejected() {
        let mut config = DashboardConfig::default();
        config.nws.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_defaults_fills_empty_fields() {
        let mut config = DashboardConfig::default();
        config.open_meteo.base_url.clear();
        config.http.timeout_seconds = 0;
        config.logging.format.clear();
        config.apply_defaults();
        assert_eq!(config.open_meteo.base_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.http.timeout_seconds, 30);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "weather-dashboard-config-{}.toml",
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[http]\ntimeout_seconds = 12\n\n[server]\nport = 9000").unwrap();

        let config = DashboardConfig::load_from_path(Some(path.clone())).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.http.timeout_seconds, 12);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.nws.base_url, "https://api.weather.gov");
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = DashboardConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("weather-dashboard"));
            assert!(path.to_string_lossy().contains("config.toml"));
        }
    }
}
