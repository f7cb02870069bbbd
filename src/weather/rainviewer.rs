//! RainViewer radar index client and frame normalizers

use std::sync::Arc;

use tracing::{info, instrument};

use super::collapse;
use crate::config::RainViewerConfig;
use crate::error::FetchError;
use crate::models::{RadarFrame, RadarPayload};
use crate::transport::{GetRequest, Transport};

/// Tile host used when the payload does not name one
pub const DEFAULT_TILE_HOST: &str = "https://tilecache.rainviewer.com";

/// Client for the RainViewer weather-maps index
#[derive(Clone)]
pub struct RainViewerClient {
    transport: Arc<dyn Transport>,
    config: RainViewerConfig,
}

impl RainViewerClient {
    pub fn new(transport: Arc<dyn Transport>, config: RainViewerConfig) -> Self {
        Self { transport, config }
    }

    /// Available radar frames, `None` on any failure
    #[instrument(skip(self))]
    pub async fn fetch_radar_timestamps(&self) -> Option<RadarPayload> {
        let outcome = self.request_index().await;

        if let Ok(payload) = &outcome {
            info!(
                "Retrieved radar index with {} past frames",
                payload.past_frames().len()
            );
        }

        collapse(outcome, "RainViewer radar index")
    }

    async fn request_index(&self) -> Result<RadarPayload, FetchError> {
        let request = GetRequest::new(&self.config.api_url);
        let body = self.transport.get_json(&request).await?;
        let mut payload: RadarPayload = serde_json::from_value(body)?;

        if payload.host.is_none() {
            payload.host = Some(self.config.default_tile_host.clone());
        }

        Ok(payload)
    }
}

fn tile_template(host: &str, path: &str) -> String {
    format!("{host}{path}/256/{{z}}/{{x}}/{{y}}/2/1_1.png")
}

fn tile_host(payload: &RadarPayload) -> &str {
    payload.host.as_deref().unwrap_or(DEFAULT_TILE_HOST)
}

/// Resolves a possibly negative index against a list of `len` items.
/// `-1` is the last item.
pub(crate) fn resolve_index(len: usize, index: isize) -> Option<usize> {
    if index < 0 {
        len.checked_sub(index.unsigned_abs())
    } else {
        let index = index.unsigned_abs();
        (index < len).then_some(index)
    }
}

/// Tile URL template of one past frame (`-1` is the most recent).
///
/// `None` when there are no frames, the index is out of range or the frame
/// has no path.
#[must_use]
pub fn radar_tile_url(payload: &RadarPayload, frame_index: isize) -> Option<String> {
    let frames = payload.past_frames();
    let frame = &frames[resolve_index(frames.len(), frame_index)?];
    let path = frame.path.as_deref()?;
    Some(tile_template(tile_host(payload), path))
}

/// All past frames in upstream order.
///
/// Never fails: if any frame lacks its time or path the result is empty.
#[must_use]
pub fn all_radar_frames(payload: &RadarPayload) -> Vec<RadarFrame> {
    let host = tile_host(payload);

    payload
        .past_frames()
        .iter()
        .map(|frame| {
            Some(RadarFrame {
                time: frame.time?,
                url: tile_template(host, frame.path.as_deref()?),
            })
        })
        .collect::<Option<Vec<_>>>()
        .unwrap_or_default()
}
