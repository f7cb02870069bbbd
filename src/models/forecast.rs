//! Open-Meteo forecast request and response models

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Coordinates;
use crate::DashboardError;

/// Hourly variables fetched when the caller asks for nothing specific
pub const DEFAULT_VARIABLES: [&str; 6] = [
    "temperature_2m",
    "relative_humidity_2m",
    "precipitation",
    "wind_speed_10m",
    "wind_direction_10m",
    "weather_code",
];

/// Numerical weather prediction model served by Open-Meteo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherModel {
    Gfs,
    Ecmwf,
}

impl WeatherModel {
    /// Value of the `models` query parameter
    #[must_use]
    pub fn api_id(self) -> &'static str {
        match self {
            WeatherModel::Gfs => "gfs_seamless",
            WeatherModel::Ecmwf => "ecmwf_ifs",
        }
    }

    /// Key used in comparison results
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            WeatherModel::Gfs => "gfs",
            WeatherModel::Ecmwf => "ecmwf",
        }
    }

    /// Display label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            WeatherModel::Gfs => "GFS",
            WeatherModel::Ecmwf => "ECMWF",
        }
    }
}

/// Validated forecast request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRequest {
    pub location: Coordinates,
    pub model: WeatherModel,
    pub variables: Vec<String>,
}

impl ForecastRequest {
    /// Request with the default variable set
    pub fn new(latitude: f64, longitude: f64, model: WeatherModel) -> Result<Self, DashboardError> {
        Ok(Self {
            location: Coordinates::validated(latitude, longitude)?,
            model,
            variables: default_variables(),
        })
    }

    /// Replace the variable set. Duplicates are dropped, order is kept.
    pub fn with_variables<I, S>(mut self, variables: I) -> Result<Self, DashboardError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for variable in variables {
            let variable = variable.into();
            if variable.trim().is_empty() {
                return Err(DashboardError::validation("Forecast variable names cannot be blank"));
            }
            if !unique.contains(&variable) {
                unique.push(variable);
            }
        }

        if unique.is_empty() {
            return Err(DashboardError::validation(
                "At least one forecast variable is required",
            ));
        }

        self.variables = unique;
        Ok(self)
    }
}

#[must_use]
pub fn default_variables() -> Vec<String> {
    DEFAULT_VARIABLES.iter().map(|v| (*v).to_string()).collect()
}

/// Forecast payload returned by Open-Meteo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub hourly_units: BTreeMap<String, String>,
    pub hourly: HourlySeries,
}

/// Hourly values keyed by variable name, aligned by index with `time`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlySeries {
    pub time: Vec<String>,
    #[serde(flatten)]
    pub variables: BTreeMap<String, Vec<Option<f64>>>,
}

impl ForecastResponse {
    /// Values of one hourly variable
    #[must_use]
    pub fn series(&self, variable: &str) -> Option<&[Option<f64>]> {
        self.hourly.variables.get(variable).map(Vec::as_slice)
    }

    /// Returns the name of the first requested variable that is missing or
    /// not aligned with `hourly.time`.
    #[must_use]
    pub fn misaligned_variable<'a, S: AsRef<str>>(&self, requested: &'a [S]) -> Option<&'a str> {
        let expected = self.hourly.time.len();
        requested.iter().map(|s| s.as_ref()).find(|variable| {
            self.series(variable)
                .is_none_or(|values| values.len() != expected)
        })
    }

    /// Number of hourly steps
    #[must_use]
    pub fn len(&self) -> usize {
        self.hourly.time.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hourly.time.is_empty()
    }
}

/// Forecasts of both models for the same point
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelComparison {
    pub gfs: Option<ForecastResponse>,
    pub ecmwf: Option<ForecastResponse>,
}

impl ModelComparison {
    #[must_use]
    pub fn get(&self, model: WeatherModel) -> Option<&ForecastResponse> {
        match model {
            WeatherModel::Gfs => self.gfs.as_ref(),
            WeatherModel::Ecmwf => self.ecmwf.as_ref(),
        }
    }

    /// True when neither model produced data
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.gfs.is_none() && self.ecmwf.is_none()
    }
}
