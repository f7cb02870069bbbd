//! Fetch adapters for the upstream weather services
//!
//! Each adapter returns `Option`: transport errors, non-2xx statuses and
//! malformed payloads all come back as `None`. The cause is logged here and
//! goes no further.

use std::fmt::Display;
use std::sync::Arc;

use tracing::warn;

use crate::config::DashboardConfig;
use crate::transport::Transport;

pub mod nws;
pub mod open_meteo;
pub mod rainviewer;

pub use nws::NwsClient;
pub use open_meteo::OpenMeteoClient;
pub use rainviewer::{RainViewerClient, all_radar_frames, radar_tile_url};

/// Logs a failed fetch and turns the outcome into an `Option`
pub(crate) fn collapse<T, E: Display>(outcome: Result<T, E>, what: &str) -> Option<T> {
    match outcome {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("{} unavailable: {}", what, e);
            None
        }
    }
}

/// The three adapters sharing one transport
#[derive(Clone)]
pub struct WeatherServices {
    pub open_meteo: OpenMeteoClient,
    pub rainviewer: RainViewerClient,
    pub nws: NwsClient,
}

impl WeatherServices {
    pub fn new(transport: Arc<dyn Transport>, config: &DashboardConfig) -> Self {
        Self {
            open_meteo: OpenMeteoClient::new(transport.clone(), config.open_meteo.clone()),
            rainviewer: RainViewerClient::new(transport.clone(), config.rainviewer.clone()),
            nws: NwsClient::new(transport, config.nws.clone()),
        }
    }
}
