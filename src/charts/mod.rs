//! Backend-neutral chart specifications
//!
//! A [`ChartSpec`] only uses line, bar and filled-area primitives, so any
//! charting library can render it. Specs serialize to JSON for the web
//! frontend.

use serde::{Deserialize, Serialize};

pub mod model_comparison;

pub use model_comparison::{
    multi_variable_dashboard, precipitation_comparison_chart, temperature_comparison_chart,
    wind_comparison_chart,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceKind {
    Line,
    Bar,
    /// Line filled down to zero
    Area,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarMode {
    Group,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoverMode {
    XUnified,
}

/// Subplot position, 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub row: u8,
    pub col: u8,
}

/// One data series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub name: String,
    pub kind: TraceKind,
    pub x: Vec<String>,
    pub y: Vec<Option<f64>>,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    pub show_legend: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell: Option<Cell>,
}

impl Trace {
    fn new(
        name: impl Into<String>,
        kind: TraceKind,
        x: Vec<String>,
        y: Vec<Option<f64>>,
        color: &str,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            x,
            y,
            color: color.to_string(),
            line_width: None,
            opacity: None,
            fill_color: None,
            show_legend: true,
            cell: None,
        }
    }
}

/// Legend anchored at a relative position of the plot area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub x: f32,
    pub y: f32,
    pub x_anchor: String,
    pub y_anchor: String,
    pub horizontal: bool,
}

impl Legend {
    /// Top-left corner inside the plot
    #[must_use]
    pub fn top_left() -> Self {
        Self {
            x: 0.01,
            y: 0.99,
            x_anchor: "left".to_string(),
            y_anchor: "top".to_string(),
            horizontal: false,
        }
    }

    /// Horizontal strip just above the plot
    #[must_use]
    pub fn above() -> Self {
        Self {
            x: 0.01,
            y: 1.02,
            x_anchor: "left".to_string(),
            y_anchor: "top".to_string(),
            horizontal: true,
        }
    }
}

/// Subplot grid layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub rows: u8,
    pub cols: u8,
    pub subplot_titles: Vec<String>,
    pub vertical_spacing: f32,
    pub horizontal_spacing: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_axis_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_axis_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_mode: Option<BarMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover_mode: Option<HoverMode>,
    pub legend: Legend,
    pub show_legend: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<Grid>,
    pub traces: Vec<Trace>,
}

impl ChartSpec {
    /// Traces drawn in a subplot cell
    pub fn traces_in(&self, row: u8, col: u8) -> impl Iterator<Item = &Trace> {
        self.traces
            .iter()
            .filter(move |trace| trace.cell == Some(Cell { row, col }))
    }
}
