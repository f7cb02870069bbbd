//! Error types for the weather dashboard
//!
//! Fetch adapters never surface these to callers: upstream failures are
//! collapsed into `None` at the adapter boundary (see [`FetchError`]).
//! [`DashboardError`] covers everything around the adapters: configuration,
//! input validation and unusable upstream data.

use thiserror::Error;

/// Main error type for the dashboard
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// An upstream service gave no usable data
    #[error("Upstream unavailable: {service}")]
    Unavailable { service: Service },
}

/// External services the dashboard talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Alerts,
    Forecast,
    ModelComparison,
    Radar,
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Service::Alerts => "NWS alerts",
            Service::Forecast => "NWS forecast",
            Service::ModelComparison => "Open-Meteo model comparison",
            Service::Radar => "RainViewer radar",
        };
        f.write_str(name)
    }
}

impl DashboardError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn unavailable(service: Service) -> Self {
        Self::Unavailable { service }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            DashboardError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            DashboardError::Validation { message } => format!("Invalid input: {message}"),
            DashboardError::Unavailable { service } => match service {
                Service::Alerts => "Unable to fetch alerts. Please try again.".to_string(),
                Service::Forecast => {
                    "Unable to fetch forecast. Make sure coordinates are within the US.".to_string()
                }
                Service::ModelComparison => {
                    "Unable to fetch model data. Please try again.".to_string()
                }
                Service::Radar => "Unable to fetch radar data. Please try again.".to_string(),
            },
        }
    }
}

/// Why a single upstream call produced no data.
///
/// Only used for logging inside the adapters before the failure is
/// collapsed into `None`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("malformed payload: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Malformed(err.to_string())
    }
}
