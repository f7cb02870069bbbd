//! National Weather Service alerts and point forecasts
//!
//! Every request carries the identifying User-Agent and the GeoJSON `Accept`
//! header the NWS access policy asks for.

use std::sync::Arc;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument};

use super::collapse;
use crate::config::NwsConfig;
use crate::error::FetchError;
use crate::models::{AlertFeature, ForecastPeriod};
use crate::transport::{GetRequest, Transport};

const GEO_JSON: &str = "application/geo+json";

#[derive(Debug, Deserialize)]
struct AlertCollection {
    #[serde(deserialize_with = "crate::models::lenient_items")]
    features: Vec<AlertFeature>,
}

#[derive(Debug, Deserialize)]
struct PointResponse {
    properties: PointProperties,
}

#[derive(Debug, Deserialize)]
struct PointProperties {
    forecast: String,
}

#[derive(Debug, Deserialize)]
struct GridForecast {
    properties: GridForecastProperties,
}

#[derive(Debug, Deserialize)]
struct GridForecastProperties {
    periods: Vec<ForecastPeriod>,
}

/// Client for `api.weather.gov`
#[derive(Clone)]
pub struct NwsClient {
    transport: Arc<dyn Transport>,
    config: NwsConfig,
}

impl NwsClient {
    pub fn new(transport: Arc<dyn Transport>, config: NwsConfig) -> Self {
        Self { transport, config }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn get<T: DeserializeOwned>(&self, url: String) -> Result<T, FetchError> {
        let request = GetRequest::new(url)
            .header("User-Agent", self.config.user_agent.as_str())
            .header("Accept", GEO_JSON);

        debug!("NWS request: {}", request.url);
        let body = self.transport.get_json(&request).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Active alerts for a state, in the order NWS returns them.
    ///
    /// `None` when the service is unreachable or the body has no `features`.
    #[instrument(skip(self))]
    pub async fn fetch_alerts(&self, state_code: &str) -> Option<Vec<AlertFeature>> {
        let url = self.endpoint(&format!(
            "/alerts/active/area/{}",
            urlencoding::encode(state_code)
        ));

        let outcome = self
            .get::<AlertCollection>(url)
            .await
            .map(|collection| collection.features);

        if let Ok(features) = &outcome {
            info!("Found {} active alerts for {}", features.len(), state_code);
        }

        collapse(outcome, "NWS alerts")
    }

    /// Forecast periods for a point, nearest period first.
    ///
    /// Resolves the point to its gridpoint forecast URL first; when that
    /// lookup fails the forecast itself is never requested.
    #[instrument(skip(self))]
    pub async fn fetch_forecast(&self, latitude: f64, longitude: f64) -> Option<Vec<ForecastPeriod>> {
        let point = collapse(
            self.get::<PointResponse>(self.endpoint(&format!("/points/{latitude},{longitude}")))
                .await,
            "NWS point lookup",
        )?;

        debug!("Point resolved to forecast URL {}", point.properties.forecast);

        let forecast = collapse(
            self.get::<GridForecast>(point.properties.forecast).await,
            "NWS gridpoint forecast",
        )?;

        info!(
            "Retrieved {} forecast periods for {:.4}, {:.4}",
            forecast.properties.periods.len(),
            latitude,
            longitude
        );

        Some(forecast.properties.periods)
    }
}
