//! JSON endpoints of the dashboard
//!
//! Each handler fetches through the adapters, runs the normalizers and
//! returns ready-to-render chart and map specs.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, instrument};

use crate::charts::{
    ChartSpec, multi_variable_dashboard, precipitation_comparison_chart,
    temperature_comparison_chart, wind_comparison_chart,
};
use crate::dashboard::{Selections, Tab};
use crate::error::{DashboardError, Service};
use crate::maps::{
    self, MapSpec, RadarMapOptions, STATES, UsState, alerts_map, find_state, forecast_map,
};
use crate::models::{AlertFeature, Coordinates, ForecastPeriod, ForecastResponse, RadarFrame};
use crate::weather::{WeatherServices, all_radar_frames, rainviewer::resolve_index};

/// Forecast periods shown below the map
const FORECAST_PERIODS: usize = 5;
const MIN_RADAR_ZOOM: u8 = 3;
const MAX_RADAR_ZOOM: u8 = 10;
const DEFAULT_RADAR_ZOOM: u8 = 5;

/// Shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: WeatherServices,
    pub selections: Arc<Selections>,
}

impl AppState {
    pub fn new(services: WeatherServices) -> Self {
        Self {
            services,
            selections: Arc::new(Selections::new()),
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = match &self {
            DashboardError::Validation { .. } => StatusCode::BAD_REQUEST,
            DashboardError::Unavailable { .. } => StatusCode::BAD_GATEWAY,
            DashboardError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": self.user_message() }))).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, DashboardError>;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/states", get(list_states))
        .route("/alerts/{state}", get(get_alerts))
        .route("/forecast", get(get_forecast))
        .route("/models", get(get_models))
        .route("/radar", get(get_radar))
        .route("/selection/{tab}", get(get_selection).put(put_selection))
        .with_state(state)
}

/// Optional point in a query string. A complete point is used for that
/// request only; without one the tab's stored selection is used.
#[derive(Debug, Default, Deserialize)]
pub struct PointQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

async fn resolve_point(
    selections: &Selections,
    tab: Tab,
    query: &PointQuery,
) -> Result<Coordinates, DashboardError> {
    match (query.lat, query.lon) {
        (Some(latitude), Some(longitude)) => Coordinates::validated(latitude, longitude),
        (None, None) => Ok(selections.get(tab).await),
        _ => Err(DashboardError::validation(
            "lat and lon must be given together",
        )),
    }
}

async fn list_states() -> Json<Vec<UsState>> {
    Json(STATES.to_vec())
}

#[derive(Debug, Serialize)]
pub struct AlertView {
    pub title: String,
    pub event: String,
    pub severity: &'static str,
    pub color: &'static str,
    pub area: String,
    pub headline: Option<String>,
    pub description: Option<String>,
    pub instruction: Option<String>,
}

impl From<&AlertFeature> for AlertView {
    fn from(alert: &AlertFeature) -> Self {
        Self {
            title: alert.summary(),
            event: alert.event().to_string(),
            severity: alert.severity().label(),
            color: alert.severity().color(),
            area: alert.area().to_string(),
            headline: alert.properties.headline.clone(),
            description: alert.properties.description.clone(),
            instruction: alert.properties.instruction.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AlertsView {
    pub state: &'static str,
    pub name: &'static str,
    pub message: String,
    pub alerts: Vec<AlertView>,
    pub map: MapSpec,
}

#[instrument(skip(app))]
async fn get_alerts(
    State(app): State<AppState>,
    Path(state_code): Path<String>,
) -> ApiResult<AlertsView> {
    let state = find_state(&state_code.to_ascii_uppercase())
        .ok_or_else(|| DashboardError::validation(format!("Unknown state code: {state_code}")))?;

    let alerts = app
        .services
        .nws
        .fetch_alerts(state.code)
        .await
        .ok_or(DashboardError::unavailable(Service::Alerts))?;

    let message = if alerts.is_empty() {
        format!("No active alerts for {}", state.name)
    } else {
        format!("{} active alert(s) for {}", alerts.len(), state.name)
    };

    Ok(Json(AlertsView {
        state: state.code,
        name: state.name,
        message,
        alerts: alerts.iter().map(AlertView::from).collect(),
        map: alerts_map(&alerts, state.code),
    }))
}

#[derive(Debug, Serialize)]
pub struct ForecastView {
    pub location: Coordinates,
    pub title: String,
    pub periods: Vec<ForecastPeriod>,
    pub map: MapSpec,
}

#[instrument(skip(app))]
async fn get_forecast(
    State(app): State<AppState>,
    Query(query): Query<PointQuery>,
) -> ApiResult<ForecastView> {
    let point = resolve_point(&app.selections, Tab::Forecast, &query).await?;

    let mut periods = app
        .services
        .nws
        .fetch_forecast(point.latitude, point.longitude)
        .await
        .ok_or(DashboardError::unavailable(Service::Forecast))?;
    periods.truncate(FORECAST_PERIODS);

    Ok(Json(ForecastView {
        location: point,
        title: format!("Forecast for ({})", point.format_coordinates()),
        map: forecast_map(point.latitude, point.longitude, Some(&periods)),
        periods,
    }))
}

#[derive(Debug, Serialize)]
pub struct ModelCharts {
    pub dashboard: ChartSpec,
    pub temperature: ChartSpec,
    pub precipitation: ChartSpec,
    pub wind: ChartSpec,
}

#[derive(Debug, Serialize)]
pub struct ModelsView {
    pub location: Coordinates,
    pub gfs: Option<ForecastResponse>,
    pub ecmwf: Option<ForecastResponse>,
    pub charts: ModelCharts,
}

#[instrument(skip(app))]
async fn get_models(
    State(app): State<AppState>,
    Query(query): Query<PointQuery>,
) -> ApiResult<ModelsView> {
    let point = resolve_point(&app.selections, Tab::Models, &query).await?;

    let comparison = app
        .services
        .open_meteo
        .fetch_multi_model_comparison(point.latitude, point.longitude, None)
        .await;

    if comparison.is_empty() {
        return Err(DashboardError::unavailable(Service::ModelComparison));
    }

    let (gfs, ecmwf) = (comparison.gfs.as_ref(), comparison.ecmwf.as_ref());
    let charts = ModelCharts {
        dashboard: multi_variable_dashboard(gfs, ecmwf),
        temperature: temperature_comparison_chart(gfs, ecmwf),
        precipitation: precipitation_comparison_chart(gfs, ecmwf),
        wind: wind_comparison_chart(gfs, ecmwf),
    };

    Ok(Json(ModelsView {
        location: point,
        gfs: comparison.gfs,
        ecmwf: comparison.ecmwf,
        charts,
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct RadarQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    /// Any integer, clamped to the radar zoom range
    pub zoom: Option<i64>,
    /// Frame index, negative values count back from the newest
    pub frame: Option<isize>,
}

fn clamp_zoom(zoom: Option<i64>) -> u8 {
    zoom.map_or(DEFAULT_RADAR_ZOOM, |zoom| {
        let clamped = zoom.clamp(i64::from(MIN_RADAR_ZOOM), i64::from(MAX_RADAR_ZOOM));
        u8::try_from(clamped).unwrap_or(DEFAULT_RADAR_ZOOM)
    })
}

#[derive(Debug, Serialize)]
pub struct RadarView {
    pub location: Coordinates,
    pub zoom: u8,
    pub frames: Vec<RadarFrame>,
    pub selected: Option<usize>,
    pub captured_at: Option<String>,
    pub map: MapSpec,
}

#[instrument(skip(app))]
async fn get_radar(
    State(app): State<AppState>,
    Query(query): Query<RadarQuery>,
) -> ApiResult<RadarView> {
    let point_query = PointQuery {
        lat: query.lat,
        lon: query.lon,
    };
    let point = resolve_point(&app.selections, Tab::Radar, &point_query).await?;
    let zoom = clamp_zoom(query.zoom);

    let payload = app
        .services
        .rainviewer
        .fetch_radar_timestamps()
        .await
        .ok_or(DashboardError::unavailable(Service::Radar))?;
    let frames = all_radar_frames(&payload);

    let selected = match (frames.is_empty(), query.frame) {
        (true, _) => None,
        (false, frame) => {
            let index = frame.unwrap_or(-1);
            Some(resolve_index(frames.len(), index).ok_or_else(|| {
                DashboardError::validation(format!(
                    "Radar frame {index} is out of range for {} frames",
                    frames.len()
                ))
            })?)
        }
    };

    let frame = selected.and_then(|index| frames.get(index));
    info!(
        frames = frames.len(),
        selected = ?selected,
        "Serving radar view"
    );

    Ok(Json(RadarView {
        location: point,
        zoom,
        captured_at: frame.and_then(RadarFrame::format_time),
        map: maps::radar_map(RadarMapOptions {
            center: point,
            zoom,
            tile_url: frame.map(|frame| frame.url.clone()),
            selected: Some(point),
        }),
        selected,
        frames,
    }))
}

#[derive(Debug, Serialize)]
pub struct SelectionView {
    pub tab: Tab,
    pub location: Coordinates,
    pub label: String,
    pub map: MapSpec,
}

impl SelectionView {
    fn new(tab: Tab, location: Coordinates) -> Self {
        Self {
            tab,
            location,
            label: format!("Selected: {}", location.format_coordinates()),
            map: tab.picker_map(location),
        }
    }
}

async fn get_selection(State(app): State<AppState>, Path(tab): Path<Tab>) -> Json<SelectionView> {
    let location = app.selections.get(tab).await;
    Json(SelectionView::new(tab, location))
}

#[derive(Debug, Deserialize)]
pub struct SelectionUpdate {
    pub latitude: f64,
    pub longitude: f64,
}

async fn put_selection(
    State(app): State<AppState>,
    Path(tab): Path<Tab>,
    Json(update): Json<SelectionUpdate>,
) -> ApiResult<SelectionView> {
    let location = Coordinates::validated(update.latitude, update.longitude)?;
    app.selections.set(tab, location).await;
    Ok(Json(SelectionView::new(tab, location)))
}
