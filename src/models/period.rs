//! NWS gridpoint forecast periods

use serde::{Deserialize, Serialize};

/// One period of an NWS point forecast, e.g. "Tonight"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPeriod {
    #[serde(default)]
    pub number: Option<u32>,
    pub name: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub is_daytime: Option<bool>,
    pub temperature: f64,
    pub temperature_unit: String,
    pub wind_speed: String,
    pub wind_direction: String,
    #[serde(default)]
    pub icon: Option<String>,
    pub short_forecast: String,
    pub detailed_forecast: String,
}

impl ForecastPeriod {
    /// Temperature with unit, e.g. `72°F`
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{}°{}", self.temperature, self.temperature_unit)
    }

    /// Wind with direction, e.g. `10 mph NW`
    #[must_use]
    pub fn format_wind(&self) -> String {
        format!("{} {}", self.wind_speed, self.wind_direction)
    }
}
