//! NWS alert features (GeoJSON)

use serde::{Deserialize, Serialize};

/// CAP severity attached to an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Severity {
    Extreme,
    Severe,
    Moderate,
    Minor,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Severity {
    /// Display label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Severity::Extreme => "Extreme",
            Severity::Severe => "Severe",
            Severity::Moderate => "Moderate",
            Severity::Minor => "Minor",
            Severity::Unknown => "Unknown",
        }
    }

    /// Map color for shapes of this severity
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Severity::Extreme => "#FF0000",
            Severity::Severe => "#FF6600",
            Severity::Moderate => "#FFCC00",
            Severity::Minor => "#00FF00",
            Severity::Unknown => "#808080",
        }
    }
}

/// A position is `[longitude, latitude]`, optionally followed by altitude
pub type Position = Vec<f64>;

/// Alert geometry. Anything that is not a polygon decodes as `Unsupported`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Polygon {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Position>>>,
    },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertProperties {
    #[serde(default, deserialize_with = "crate::models::lenient")]
    pub event: Option<String>,
    #[serde(default, deserialize_with = "crate::models::lenient")]
    pub severity: Severity,
    #[serde(default, deserialize_with = "crate::models::lenient")]
    pub area_desc: Option<String>,
    #[serde(default, deserialize_with = "crate::models::lenient")]
    pub headline: Option<String>,
    #[serde(default, deserialize_with = "crate::models::lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "crate::models::lenient")]
    pub instruction: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertFeature {
    #[serde(default, deserialize_with = "crate::models::lenient")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "crate::models::lenient")]
    pub properties: AlertProperties,
    #[serde(default, deserialize_with = "crate::models::lenient")]
    pub geometry: Option<Geometry>,
}

impl AlertFeature {
    #[must_use]
    pub fn event(&self) -> &str {
        self.properties.event.as_deref().unwrap_or("Unknown Event")
    }

    #[must_use]
    pub fn area(&self) -> &str {
        self.properties.area_desc.as_deref().unwrap_or("Unknown Area")
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.properties.severity
    }

    /// The geometry if it can be drawn as a filled shape
    #[must_use]
    pub fn polygon(&self) -> Option<&Geometry> {
        self.geometry.as_ref().filter(|geometry| {
            matches!(
                geometry,
                Geometry::Polygon { .. } | Geometry::MultiPolygon { .. }
            )
        })
    }

    /// Expander title, e.g. `Flood Warning - Severe`
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{} - {}", self.event(), self.severity().label())
    }
}
