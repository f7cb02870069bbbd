//! Tracing subscriber setup

use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;

/// Builds the filter, `RUST_LOG` wins over the configured level.
fn env_filter(logging: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level))
}

/// Installs the global subscriber. Fails if one is already set.
pub fn init(logging: &LoggingConfig) -> Result<()> {
    let filter = env_filter(logging);

    let installed = match logging.format.as_str() {
        "json" => fmt().json().with_env_filter(filter).try_init(),
        _ => fmt().pretty().with_env_filter(filter).try_init(),
    };

    installed.map_err(|e| anyhow!("Failed to install tracing subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        let logging = LoggingConfig::default();
        let _ = init(&logging);
        assert!(init(&logging).is_err());
    }
}
