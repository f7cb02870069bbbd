//! Map builders for alerts, point forecasts, location picking and radar

use super::states::state_center;
use super::{BaseTiles, Layer, MapSpec, MarkerIcon, Popup, ShapeStyle};
use crate::models::{AlertFeature, Coordinates, ForecastPeriod, US_CENTER};

fn selection_marker(selected: Coordinates) -> Layer {
    Layer::Marker {
        position: selected,
        popup: Popup::plain(format!("Selected: {}", selected.format_coordinates())),
        icon: MarkerIcon::fa("red", "crosshairs"),
    }
}

fn alert_popup(alert: &AlertFeature) -> Popup {
    Popup::new(format!(
        "<b>{}</b><br><b>Severity:</b> {}<br><b>Area:</b> {}",
        alert.event(),
        alert.severity().label(),
        alert.area()
    ))
}

/// Active alerts of one state.
///
/// Polygon and MultiPolygon alerts become shapes in their severity color.
/// Alerts without a drawable geometry get a warning pin at the map center.
#[must_use]
pub fn alerts_map(alerts: &[AlertFeature], state_code: &str) -> MapSpec {
    let center = state_center(state_code).unwrap_or(US_CENTER);
    let mut map = MapSpec::new(center, 6, BaseTiles::Light);

    map.layers = alerts
        .iter()
        .map(|alert| match alert.polygon() {
            Some(geometry) => Layer::Shape {
                geometry: geometry.clone(),
                style: ShapeStyle::filled(alert.severity().color()),
                popup: alert_popup(alert),
            },
            None => Layer::Marker {
                position: center,
                popup: alert_popup(alert),
                icon: MarkerIcon::fa("red", "exclamation-triangle"),
            },
        })
        .collect();

    map
}

/// Forecast point with the current period in its popup
#[must_use]
pub fn forecast_map(latitude: f64, longitude: f64, periods: Option<&[ForecastPeriod]>) -> MapSpec {
    let position = Coordinates::new(latitude, longitude);
    let mut map = MapSpec::new(position, 10, BaseTiles::Light);

    let mut html = format!("<b>Forecast Location</b><br>Lat: {latitude:.4}<br>Lon: {longitude:.4}");
    if let Some(current) = periods.and_then(<[ForecastPeriod]>::first) {
        html.push_str(&format!(
            "<br><br><b>{}:</b><br>{}&deg;{}<br>{}",
            current.name, current.temperature, current.temperature_unit, current.short_forecast
        ));
    }

    map.layers.push(Layer::Marker {
        position,
        popup: Popup::new(html),
        icon: MarkerIcon::fa("blue", "cloud"),
    });

    map
}

#[derive(Debug, Clone, PartialEq)]
pub struct PickerOptions {
    pub center: Coordinates,
    pub zoom: u8,
    pub selected: Option<Coordinates>,
    pub tiles: BaseTiles,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            center: US_CENTER,
            zoom: 4,
            selected: None,
            tiles: BaseTiles::Light,
        }
    }
}

/// Blank map for choosing a point, with the current choice marked
#[must_use]
pub fn location_picker_map(options: PickerOptions) -> MapSpec {
    let mut map = MapSpec::new(options.center, options.zoom, options.tiles);
    map.layers.extend(options.selected.map(selection_marker));
    map
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadarMapOptions {
    pub center: Coordinates,
    pub zoom: u8,
    pub tile_url: Option<String>,
    pub selected: Option<Coordinates>,
}

impl Default for RadarMapOptions {
    fn default() -> Self {
        Self {
            center: US_CENTER,
            zoom: 4,
            tile_url: None,
            selected: None,
        }
    }
}

/// Dark map with an optional RainViewer overlay
#[must_use]
pub fn radar_map(options: RadarMapOptions) -> MapSpec {
    let mut map = MapSpec::new(options.center, options.zoom, BaseTiles::Dark);
    map.layer_control = true;

    if let Some(url_template) = options.tile_url.filter(|url| !url.is_empty()) {
        map.layers.push(Layer::Tiles {
            url_template,
            attribution: "RainViewer".to_string(),
            name: "Radar".to_string(),
            overlay: true,
            control: true,
            opacity: 0.7,
        });
    }

    map.layers.extend(options.selected.map(selection_marker));
    map
}
