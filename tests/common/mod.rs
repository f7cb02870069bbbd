//! Stub transport and canned upstream payloads shared by the integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};
use weather_dashboard::api::AppState;
use weather_dashboard::{DashboardConfig, FetchError, GetRequest, Transport, WeatherServices};

pub const NWS: &str = "https://api.weather.gov";
pub const OPEN_METEO: &str = "https://api.open-meteo.com/v1/forecast";
pub const RAINVIEWER: &str = "https://api.rainviewer.com/public/weather-maps.json";
pub const GRID_FORECAST: &str = "https://api.weather.gov/gridpoints/OKX/33,35/forecast";

/// Answers by URL prefix, optionally narrowed by one query parameter.
/// Unknown URLs get a 404.
#[derive(Default)]
pub struct CannedTransport {
    routes: Vec<(String, Option<(String, String)>, Result<Value, FetchError>)>,
    calls: Mutex<Vec<GetRequest>>,
}

impl CannedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ok(mut self, url_prefix: &str, body: Value) -> Self {
        self.routes.push((url_prefix.to_string(), None, Ok(body)));
        self
    }

    pub fn err(mut self, url_prefix: &str, error: FetchError) -> Self {
        self.routes.push((url_prefix.to_string(), None, Err(error)));
        self
    }

    pub fn ok_for_model(mut self, model: &str, body: Value) -> Self {
        self.routes.push((
            OPEN_METEO.to_string(),
            Some(("models".to_string(), model.to_string())),
            Ok(body),
        ));
        self
    }

    pub fn calls(&self) -> Vec<GetRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, url_prefix: &str) -> usize {
        self.calls()
            .iter()
            .filter(|request| request.url.starts_with(url_prefix))
            .count()
    }
}

#[async_trait]
impl Transport for CannedTransport {
    async fn get_json(&self, request: &GetRequest) -> Result<Value, FetchError> {
        self.calls.lock().unwrap().push(request.clone());
        self.routes
            .iter()
            .find(|(prefix, query, _)| {
                request.url.starts_with(prefix.as_str())
                    && query
                        .as_ref()
                        .is_none_or(|(k, v)| request.query_value(k) == Some(v.as_str()))
            })
            .map_or(Err(FetchError::Status(404)), |(_, _, outcome)| outcome.clone())
    }
}

pub fn services(transport: Arc<CannedTransport>) -> WeatherServices {
    WeatherServices::new(transport, &DashboardConfig::default())
}

pub fn app_state(transport: Arc<CannedTransport>) -> AppState {
    AppState::new(services(transport))
}

pub fn polygon_alert(event: &str, severity: &str) -> Value {
    json!({
        "type": "Feature",
        "geometry": {
            "type": "Polygon",
            "coordinates": [[[-121.0, 36.0], [-120.0, 36.0], [-120.0, 37.0], [-121.0, 36.0]]]
        },
        "properties": {
            "event": event,
            "severity": severity,
            "areaDesc": "Fresno; Tulare",
            "headline": format!("{event} issued by NWS Hanford CA"),
            "description": "Dangerous conditions expected.",
            "instruction": null
        }
    })
}

pub fn alert_collection(features: Vec<Value>) -> Value {
    json!({"type": "FeatureCollection", "features": features})
}

pub fn point_lookup() -> Value {
    json!({"properties": {"forecast": GRID_FORECAST, "gridId": "OKX"}})
}

pub fn forecast_periods(count: usize) -> Value {
    let periods: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "number": i + 1,
                "name": if i == 0 { "Today".to_string() } else { format!("Period {}", i + 1) },
                "startTime": "2024-05-01T06:00:00-04:00",
                "endTime": "2024-05-01T18:00:00-04:00",
                "isDaytime": i % 2 == 0,
                "temperature": 70 - i as i64,
                "temperatureUnit": "F",
                "windSpeed": "10 mph",
                "windDirection": "SW",
                "icon": "https://api.weather.gov/icons/land/day/few?size=medium",
                "shortForecast": "Sunny",
                "detailedForecast": "Sunny, with a high near 70."
            })
        })
        .collect();
    json!({"properties": {"periods": periods}})
}

pub fn model_forecast(base_temperature: f64) -> Value {
    json!({
        "latitude": 40.71,
        "longitude": -74.0,
        "timezone": "America/New_York",
        "hourly_units": {"time": "iso8601", "temperature_2m": "°C"},
        "hourly": {
            "time": ["2024-05-01T00:00", "2024-05-01T01:00", "2024-05-01T02:00"],
            "temperature_2m": [base_temperature, base_temperature + 0.4, null],
            "relative_humidity_2m": [81.0, 83.0, 85.0],
            "precipitation": [0.0, 0.2, 1.1],
            "wind_speed_10m": [11.0, 12.3, 14.8],
            "wind_direction_10m": [200.0, 210.0, 215.0],
            "weather_code": [3.0, 61.0, 63.0]
        }
    })
}

pub fn radar_index() -> Value {
    json!({
        "version": "2.0",
        "generated": 1_700_001_300,
        "host": "https://tilecache.rainviewer.com",
        "radar": {
            "past": [
                {"time": 1_700_000_000, "path": "/v2/radar/1700000000"},
                {"time": 1_700_000_600, "path": "/v2/radar/1700000600"},
                {"time": 1_700_001_200, "path": "/v2/radar/1700001200"}
            ],
            "nowcast": []
        }
    })
}
