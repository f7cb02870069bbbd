//! Backend-neutral map specifications
//!
//! A [`MapSpec`] describes base tiles, a center, a zoom level and a stack of
//! layers. Any slippy-map library (Leaflet, OpenLayers, ...) can draw it.

use serde::{Deserialize, Serialize};

use crate::models::{Coordinates, Geometry};

pub mod states;
pub mod weather_maps;

pub use states::{STATES, UsState, find_state, state_center};
pub use weather_maps::{
    PickerOptions, RadarMapOptions, alerts_map, forecast_map, location_picker_map, radar_map,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BaseTiles {
    #[serde(rename = "CartoDB positron")]
    Light,
    #[serde(rename = "CartoDB dark_matter")]
    Dark,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Popup {
    pub html: String,
    pub max_width: Option<u32>,
}

impl Popup {
    fn new(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            max_width: Some(300),
        }
    }

    fn plain(text: impl Into<String>) -> Self {
        Self {
            html: text.into(),
            max_width: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    pub fill_color: String,
    pub color: String,
    pub weight: u32,
    pub fill_opacity: f32,
}

impl ShapeStyle {
    fn filled(color: &str) -> Self {
        Self {
            fill_color: color.to_string(),
            color: color.to_string(),
            weight: 2,
            fill_opacity: 0.4,
        }
    }
}

/// Font Awesome marker icon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerIcon {
    pub color: String,
    pub glyph: String,
    pub prefix: String,
}

impl MarkerIcon {
    fn fa(color: &str, glyph: &str) -> Self {
        Self {
            color: color.to_string(),
            glyph: glyph.to_string(),
            prefix: "fa".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Layer {
    /// GeoJSON polygon drawn with a fill
    Shape {
        geometry: Geometry,
        style: ShapeStyle,
        popup: Popup,
    },
    Marker {
        position: Coordinates,
        popup: Popup,
        icon: MarkerIcon,
    },
    /// XYZ tile overlay, `url_template` holds literal `{z}/{x}/{y}`
    Tiles {
        url_template: String,
        attribution: String,
        name: String,
        overlay: bool,
        control: bool,
        opacity: f32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSpec {
    pub center: Coordinates,
    pub zoom: u8,
    pub base_tiles: BaseTiles,
    pub layers: Vec<Layer>,
    pub layer_control: bool,
}

impl MapSpec {
    fn new(center: Coordinates, zoom: u8, base_tiles: BaseTiles) -> Self {
        Self {
            center,
            zoom,
            base_tiles,
            layers: Vec::new(),
            layer_control: false,
        }
    }

    pub fn shapes(&self) -> impl Iterator<Item = (&Geometry, &ShapeStyle)> {
        self.layers.iter().filter_map(|layer| match layer {
            Layer::Shape { geometry, style, .. } => Some((geometry, style)),
            _ => None,
        })
    }

    pub fn markers(&self) -> impl Iterator<Item = (&Coordinates, &Popup)> {
        self.layers.iter().filter_map(|layer| match layer {
            Layer::Marker { position, popup, .. } => Some((position, popup)),
            _ => None,
        })
    }

    /// URL template of the first tile overlay, if any
    #[must_use]
    pub fn tile_overlay(&self) -> Option<&str> {
        self.layers.iter().find_map(|layer| match layer {
            Layer::Tiles { url_template, .. } => Some(url_template.as_str()),
            _ => None,
        })
    }
}
