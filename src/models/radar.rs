//! RainViewer radar payload and frames

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw weather-maps index from RainViewer.
///
/// Every field is optional so structurally odd payloads still decode and the
/// normalizers can decide what to make of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RadarPayload {
    #[serde(default, deserialize_with = "crate::models::lenient")]
    pub version: Option<String>,
    /// Unix time the index was generated
    #[serde(default, deserialize_with = "crate::models::lenient")]
    pub generated: Option<i64>,
    #[serde(default, deserialize_with = "crate::models::lenient")]
    pub host: Option<String>,
    #[serde(default, deserialize_with = "crate::models::lenient")]
    pub radar: Option<RadarTimeline>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RadarTimeline {
    #[serde(default, deserialize_with = "crate::models::lenient")]
    pub past: Option<Vec<RawRadarFrame>>,
    #[serde(default, deserialize_with = "crate::models::lenient")]
    pub nowcast: Option<Vec<RawRadarFrame>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRadarFrame {
    #[serde(default, deserialize_with = "crate::models::lenient")]
    pub time: Option<i64>,
    #[serde(default, deserialize_with = "crate::models::lenient")]
    pub path: Option<String>,
}

impl RadarPayload {
    /// Past frames, oldest first. Empty when the payload has none.
    #[must_use]
    pub fn past_frames(&self) -> &[RawRadarFrame] {
        self.radar
            .as_ref()
            .and_then(|radar| radar.past.as_deref())
            .unwrap_or_default()
    }
}

/// A radar frame ready for a tile layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadarFrame {
    /// Unix timestamp in seconds
    pub time: i64,
    /// Tile URL template with literal `{z}`, `{x}` and `{y}` placeholders
    pub url: String,
}

impl RadarFrame {
    #[must_use]
    pub fn captured_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.time, 0)
    }

    /// Caption shown next to the frame slider
    #[must_use]
    pub fn format_time(&self) -> Option<String> {
        self.captured_at()
            .map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
    }
}
