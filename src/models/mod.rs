//! Data models for the weather dashboard
//!
//! Transient value objects organized by upstream service:
//! - Location: coordinates and validation
//! - Forecast: Open-Meteo requests, responses and model comparisons
//! - Radar: RainViewer payloads and frames
//! - Alert / Period: NWS alert features and forecast periods

pub mod alert;
pub mod forecast;
pub mod location;
pub mod period;
pub mod radar;

// Re-export all public types for convenient access
pub use alert::{AlertFeature, AlertProperties, Geometry, Severity};
pub use forecast::{
    DEFAULT_VARIABLES, ForecastRequest, ForecastResponse, HourlySeries, ModelComparison,
    WeatherModel,
};
pub use location::{Coordinates, US_CENTER};
pub use period::ForecastPeriod;
pub use radar::{RadarFrame, RadarPayload, RawRadarFrame};

use serde::de::{Deserialize, DeserializeOwned, Deserializer};
use serde_json::Value;

/// Decodes a field, falling back to its default when the value has the
/// wrong shape. Upstream entries with one odd field stay usable.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// Decodes a list entry by entry, dropping entries that do not decode
pub(crate) fn lenient_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let values = Vec::<Value>::deserialize(deserializer)?;
    Ok(values
        .into_iter()
        .filter_map(|value| T::deserialize(value).ok())
        .collect())
}
