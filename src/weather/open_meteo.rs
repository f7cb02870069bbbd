//! Open-Meteo multi-model forecast client

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, instrument, warn};

use super::collapse;
use crate::config::OpenMeteoConfig;
use crate::error::FetchError;
use crate::models::forecast::default_variables;
use crate::models::{ForecastRequest, ForecastResponse, ModelComparison, WeatherModel};
use crate::transport::{GetRequest, Transport};

/// Client for the Open-Meteo `/forecast` endpoint
#[derive(Clone)]
pub struct OpenMeteoClient {
    transport: Arc<dyn Transport>,
    config: OpenMeteoConfig,
}

impl OpenMeteoClient {
    pub fn new(transport: Arc<dyn Transport>, config: OpenMeteoConfig) -> Self {
        Self { transport, config }
    }

    fn forecast_url(&self) -> String {
        format!("{}/forecast", self.config.base_url.trim_end_matches('/'))
    }

    /// Hourly forecast of one model, `None` if anything goes wrong.
    ///
    /// Coordinates are passed through unchecked. `variables` defaults to
    /// [`crate::models::DEFAULT_VARIABLES`]. A response that lacks a requested
    /// variable, or whose variable is not aligned with `hourly.time`, counts
    /// as malformed.
    #[instrument(skip(self, model, variables), fields(model = model.key()))]
    pub async fn fetch_model_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        model: WeatherModel,
        variables: Option<&[String]>,
    ) -> Option<ForecastResponse> {
        let defaults;
        let variables = match variables {
            Some(requested) if !requested.is_empty() => requested,
            _ => {
                defaults = default_variables();
                defaults.as_slice()
            }
        };

        let start = Instant::now();
        let outcome = self.request_forecast(latitude, longitude, model, variables).await;

        if let Ok(forecast) = &outcome {
            info!(
                "Retrieved {} forecast with {} hourly steps in {:.3}s",
                model.label(),
                forecast.len(),
                start.elapsed().as_secs_f64()
            );
        }

        collapse(outcome, "Open-Meteo forecast")
    }

    /// Same as [`Self::fetch_model_forecast`] for a validated request
    pub async fn fetch(&self, request: &ForecastRequest) -> Option<ForecastResponse> {
        self.fetch_model_forecast(
            request.location.latitude,
            request.location.longitude,
            request.model,
            Some(request.variables.as_slice()),
        )
        .await
    }

    /// GFS and ECMWF side by side. The two requests run concurrently and a
    /// failure of one leaves the other untouched.
    #[instrument(skip(self, variables))]
    pub async fn fetch_multi_model_comparison(
        &self,
        latitude: f64,
        longitude: f64,
        variables: Option<&[String]>,
    ) -> ModelComparison {
        let (gfs, ecmwf) = futures::join!(
            self.fetch_model_forecast(latitude, longitude, WeatherModel::Gfs, variables),
            self.fetch_model_forecast(latitude, longitude, WeatherModel::Ecmwf, variables),
        );

        if gfs.is_none() || ecmwf.is_none() {
            warn!(
                gfs = gfs.is_some(),
                ecmwf = ecmwf.is_some(),
                "Model comparison is incomplete"
            );
        }

        ModelComparison { gfs, ecmwf }
    }

    async fn request_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        model: WeatherModel,
        variables: &[String],
    ) -> Result<ForecastResponse, FetchError> {
        let request = GetRequest::new(self.forecast_url())
            .query("latitude", latitude)
            .query("longitude", longitude)
            .query("models", model.api_id())
            .query("hourly", variables.join(","))
            .query("timezone", "auto")
            .query("forecast_days", self.config.forecast_days);

        debug!("Open-Meteo request: {} {:?}", request.url, request.query);

        let body = self.transport.get_json(&request).await?;
        let forecast: ForecastResponse = serde_json::from_value(body)?;

        if let Some(variable) = forecast.misaligned_variable(variables) {
            return Err(FetchError::Malformed(format!(
                "hourly variable '{variable}' is missing or not aligned with hourly.time"
            )));
        }

        Ok(forecast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::stub::StubTransport;
    use serde_json::{Value, json};

    const URL: &str = "https://api.open-meteo.com/v1/forecast";

    fn body(temperature: f64) -> Value {
        json!({
            "latitude": 40.71,
            "longitude": -74.0,
            "timezone": "America/New_York",
            "hourly": {
                "time": ["2024-05-01T00:00", "2024-05-01T01:00"],
                "temperature_2m": [temperature, temperature + 1.0],
                "relative_humidity_2m": [80.0, 82.0],
                "precipitation": [0.0, 0.4],
                "wind_speed_10m": [10.0, 12.5],
                "wind_direction_10m": [180.0, 190.0],
                "weather_code": [3.0, 61.0]
            }
        })
    }

    fn client_with(stub: StubTransport) -> (OpenMeteoClient, Arc<StubTransport>) {
        let stub = Arc::new(stub);
        let client = OpenMeteoClient::new(stub.clone(), OpenMeteoConfig::default());
        (client, stub)
    }

    #[tokio::test]
    async fn test_request_parameters() {
        let (client, stub) = client_with(StubTransport::new().respond(URL, body(12.0)));

        let forecast = client
            .fetch_model_forecast(40.7128, -74.006, WeatherModel::Ecmwf, None)
            .await
            .unwrap();
        assert_eq!(forecast.len(), 2);

        let calls = stub.calls();
        assert_eq!(calls.len(), 1);
        let request = &calls[0];
        assert_eq!(request.url, URL);
        assert_eq!(request.query_value("latitude"), Some("40.7128"));
        assert_eq!(request.query_value("longitude"), Some("-74.006"));
        assert_eq!(request.query_value("models"), Some("ecmwf_ifs"));
        assert_eq!(
            request.query_value("hourly"),
            Some(
                "temperature_2m,relative_humidity_2m,precipitation,wind_speed_10m,wind_direction_10m,weather_code"
            )
        );
        assert_eq!(request.query_value("timezone"), Some("auto"));
        assert_eq!(request.query_value("forecast_days"), Some("7"));
    }

    #[tokio::test]
    async fn test_lengths_match_requested_variables() {
        let (client, _) = client_with(StubTransport::new().respond(URL, body(12.0)));
        let variables = vec!["temperature_2m".to_string(), "precipitation".to_string()];

        let forecast = client
            .fetch_model_forecast(40.0, -74.0, WeatherModel::Gfs, Some(variables.as_slice()))
            .await
            .unwrap();

        for variable in &variables {
            assert_eq!(forecast.series(variable).unwrap().len(), forecast.hourly.time.len());
        }
    }

    #[tokio::test]
    async fn test_missing_variable_is_absent() {
        let (client, _) = client_with(StubTransport::new().respond(URL, body(12.0)));
        let variables = vec!["cloud_cover".to_string()];

        let forecast = client
            .fetch_model_forecast(40.0, -74.0, WeatherModel::Gfs, Some(variables.as_slice()))
            .await;
        assert!(forecast.is_none());
    }

    #[tokio::test]
    async fn test_misaligned_series_is_absent() {
        let mut broken = body(12.0);
        broken["hourly"]["precipitation"] = json!([0.0]);
        let (client, _) = client_with(StubTransport::new().respond(URL, broken));

        let forecast = client
            .fetch_model_forecast(40.0, -74.0, WeatherModel::Gfs, None)
            .await;
        assert!(forecast.is_none());
    }

    #[tokio::test]
    async fn test_failures_are_absent() {
        let (client, _) = client_with(StubTransport::new().fail(URL, FetchError::Status(500)));
        assert!(
            client
                .fetch_model_forecast(40.0, -74.0, WeatherModel::Gfs, None)
                .await
                .is_none()
        );

        let (client, _) = client_with(StubTransport::new().respond(URL, json!({"error": true})));
        assert!(
            client
                .fetch_model_forecast(40.0, -74.0, WeatherModel::Gfs, None)
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_comparison_models_are_independent() {
        let stub = StubTransport::new()
            .respond_when(
                URL,
                ("models", "gfs_seamless"),
                Err(FetchError::Transport("connection refused".into())),
            )
            .respond_when(URL, ("models", "ecmwf_ifs"), Ok(body(15.0)));
        let (client, stub) = client_with(stub);

        let comparison = client.fetch_multi_model_comparison(40.0, -74.0, None).await;

        assert!(comparison.gfs.is_none());
        let ecmwf = comparison.ecmwf.unwrap();
        assert_eq!(ecmwf.series("temperature_2m").unwrap()[0], Some(15.0));
        assert_eq!(stub.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_validated_request() {
        let (client, stub) = client_with(StubTransport::new().respond(URL, body(12.0)));
        let request = ForecastRequest::new(47.0, 8.0, WeatherModel::Gfs)
            .unwrap()
            .with_variables(["temperature_2m"])
            .unwrap();

        assert!(client.fetch(&request).await.is_some());
        assert_eq!(stub.calls()[0].query_value("hourly"), Some("temperature_2m"));
    }
}
