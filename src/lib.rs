//! Weather dashboard backend
//!
//! Fetches NWS alerts and point forecasts, Open-Meteo GFS/ECMWF model runs
//! and RainViewer radar frames, and turns them into chart and map
//! specifications that any frontend can render.

pub mod api;
pub mod charts;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod maps;
pub mod models;
pub mod telemetry;
pub mod transport;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use config::DashboardConfig;
pub use error::{DashboardError, FetchError, Service};
pub use models::{AlertFeature, Coordinates, ForecastPeriod, ForecastResponse, RadarFrame};
pub use transport::{GetRequest, HttpTransport, Transport};
pub use weather::WeatherServices;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
