//! Per-tab location selections
//!
//! The only mutable state of the dashboard. Handlers receive it by
//! reference; the adapters and builders never see it.

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

use crate::maps::{MapSpec, PickerOptions, RadarMapOptions, location_picker_map, radar_map};
use crate::models::{Coordinates, US_CENTER};

/// New York City, the initial point for the forecast and model tabs
pub const DEFAULT_POINT: Coordinates = Coordinates::new(40.7128, -74.0060);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    Forecast,
    Models,
    Radar,
}

impl Tab {
    #[must_use]
    pub fn default_selection(self) -> Coordinates {
        match self {
            Tab::Forecast | Tab::Models => DEFAULT_POINT,
            Tab::Radar => US_CENTER,
        }
    }

    /// Map the user clicks on to move this tab's selection
    #[must_use]
    pub fn picker_map(self, selected: Coordinates) -> MapSpec {
        match self {
            Tab::Forecast => location_picker_map(PickerOptions {
                center: selected,
                zoom: 5,
                selected: Some(selected),
                ..PickerOptions::default()
            }),
            Tab::Models => location_picker_map(PickerOptions {
                center: selected,
                zoom: 4,
                selected: Some(selected),
                ..PickerOptions::default()
            }),
            Tab::Radar => radar_map(RadarMapOptions {
                center: selected,
                zoom: 5,
                selected: Some(selected),
                ..RadarMapOptions::default()
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Points {
    forecast: Coordinates,
    models: Coordinates,
    radar: Coordinates,
}

impl Points {
    fn at(&self, tab: Tab) -> Coordinates {
        match tab {
            Tab::Forecast => self.forecast,
            Tab::Models => self.models,
            Tab::Radar => self.radar,
        }
    }

    fn slot(&mut self, tab: Tab) -> &mut Coordinates {
        match tab {
            Tab::Forecast => &mut self.forecast,
            Tab::Models => &mut self.models,
            Tab::Radar => &mut self.radar,
        }
    }
}

/// Selected coordinates of every tab
#[derive(Debug)]
pub struct Selections {
    points: RwLock<Points>,
}

impl Default for Selections {
    fn default() -> Self {
        Self {
            points: RwLock::new(Points {
                forecast: Tab::Forecast.default_selection(),
                models: Tab::Models.default_selection(),
                radar: Tab::Radar.default_selection(),
            }),
        }
    }
}

impl Selections {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, tab: Tab) -> Coordinates {
        self.points.read().await.at(tab)
    }

    /// Stores a new selection, returning the previous one
    pub async fn set(&self, tab: Tab, point: Coordinates) -> Coordinates {
        let mut points = self.points.write().await;
        let previous = std::mem::replace(points.slot(tab), point);
        if previous != point {
            info!(?tab, "Selection moved to {}", point.format_coordinates());
        }
        previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maps::BaseTiles;

    #[tokio::test]
    async fn test_defaults_and_updates() {
        let selections = Selections::new();
        assert_eq!(selections.get(Tab::Forecast).await, DEFAULT_POINT);
        assert_eq!(selections.get(Tab::Models).await, DEFAULT_POINT);
        assert_eq!(selections.get(Tab::Radar).await, US_CENTER);

        let denver = Coordinates::new(39.7392, -104.9903);
        assert_eq!(selections.set(Tab::Models, denver).await, DEFAULT_POINT);
        assert_eq!(selections.get(Tab::Models).await, denver);
        assert_eq!(selections.get(Tab::Forecast).await, DEFAULT_POINT);
    }

    #[test]
    fn test_picker_maps() {
        let forecast = Tab::Forecast.picker_map(DEFAULT_POINT);
        assert_eq!(forecast.zoom, 5);
        assert_eq!(forecast.center, DEFAULT_POINT);
        assert_eq!(forecast.markers().count(), 1);

        assert_eq!(Tab::Models.picker_map(DEFAULT_POINT).zoom, 4);

        let radar = Tab::Radar.picker_map(US_CENTER);
        assert_eq!(radar.base_tiles, BaseTiles::Dark);
        assert!(radar.layer_control);
    }

    #[test]
    fn test_tab_names() {
        let tab: Tab = serde_json::from_str("\"radar\"").unwrap();
        assert_eq!(tab, Tab::Radar);
        assert!(serde_json::from_str::<Tab>("\"alerts\"").is_err());
    }
}
