//! GFS vs ECMWF comparison charts
//!
//! A model contributes a trace only when its forecast is present and carries
//! the plotted variable. Missing forecasts simply leave the chart emptier.

use super::{BarMode, Cell, ChartSpec, Grid, HoverMode, Legend, Trace, TraceKind};
use crate::models::{ForecastResponse, WeatherModel};

const TEMPERATURE: &str = "temperature_2m";
const PRECIPITATION: &str = "precipitation";
const WIND_SPEED: &str = "wind_speed_10m";
const HUMIDITY: &str = "relative_humidity_2m";

fn line_color(model: WeatherModel) -> &'static str {
    match model {
        WeatherModel::Gfs => "#1f77b4",
        WeatherModel::Ecmwf => "#ff7f0e",
    }
}

fn fill_color(model: WeatherModel) -> &'static str {
    match model {
        WeatherModel::Gfs => "rgba(31, 119, 180, 0.2)",
        WeatherModel::Ecmwf => "rgba(255, 127, 14, 0.2)",
    }
}

/// One trace per model that has `variable`, GFS first
fn comparison_traces<F>(
    gfs: Option<&ForecastResponse>,
    ecmwf: Option<&ForecastResponse>,
    variable: &str,
    build: F,
) -> Vec<Trace>
where
    F: Fn(WeatherModel, Vec<String>, Vec<Option<f64>>) -> Trace,
{
    [(WeatherModel::Gfs, gfs), (WeatherModel::Ecmwf, ecmwf)]
        .into_iter()
        .filter_map(|(model, response)| {
            let response = response?;
            let values = response.series(variable)?;
            Some(build(model, response.hourly.time.clone(), values.to_vec()))
        })
        .collect()
}

fn single_chart(title: &str, y_axis_title: &str, traces: Vec<Trace>) -> ChartSpec {
    ChartSpec {
        title: title.to_string(),
        x_axis_title: Some("Time".to_string()),
        y_axis_title: Some(y_axis_title.to_string()),
        bar_mode: None,
        hover_mode: Some(HoverMode::XUnified),
        legend: Legend::top_left(),
        show_legend: true,
        height: None,
        grid: None,
        traces,
    }
}

/// Hourly temperature as lines
#[must_use]
pub fn temperature_comparison_chart(
    gfs: Option<&ForecastResponse>,
    ecmwf: Option<&ForecastResponse>,
) -> ChartSpec {
    let traces = comparison_traces(gfs, ecmwf, TEMPERATURE, |model, x, y| Trace {
        line_width: Some(2.0),
        ..Trace::new(model.label(), TraceKind::Line, x, y, line_color(model))
    });

    single_chart(
        "Temperature Forecast Comparison (GFS vs ECMWF)",
        "Temperature (C)",
        traces,
    )
}

/// Hourly precipitation as grouped bars
#[must_use]
pub fn precipitation_comparison_chart(
    gfs: Option<&ForecastResponse>,
    ecmwf: Option<&ForecastResponse>,
) -> ChartSpec {
    let traces = comparison_traces(gfs, ecmwf, PRECIPITATION, |model, x, y| Trace {
        opacity: Some(0.7),
        ..Trace::new(model.label(), TraceKind::Bar, x, y, line_color(model))
    });

    ChartSpec {
        bar_mode: Some(BarMode::Group),
        ..single_chart(
            "Precipitation Forecast Comparison (GFS vs ECMWF)",
            "Precipitation (mm)",
            traces,
        )
    }
}

/// Hourly wind speed as filled areas
#[must_use]
pub fn wind_comparison_chart(
    gfs: Option<&ForecastResponse>,
    ecmwf: Option<&ForecastResponse>,
) -> ChartSpec {
    let traces = comparison_traces(gfs, ecmwf, WIND_SPEED, |model, x, y| Trace {
        line_width: Some(2.0),
        fill_color: Some(fill_color(model).to_string()),
        ..Trace::new(model.label(), TraceKind::Area, x, y, line_color(model))
    });

    single_chart(
        "Wind Speed Forecast Comparison (GFS vs ECMWF)",
        "Wind Speed (km/h)",
        traces,
    )
}

/// 2×2 grid: temperature, precipitation, wind speed and humidity.
///
/// Only the temperature traces appear in the legend.
#[must_use]
pub fn multi_variable_dashboard(
    gfs: Option<&ForecastResponse>,
    ecmwf: Option<&ForecastResponse>,
) -> ChartSpec {
    let panels = [
        (TEMPERATURE, TraceKind::Line, "", Cell { row: 1, col: 1 }),
        (PRECIPITATION, TraceKind::Bar, " Precip", Cell { row: 1, col: 2 }),
        (WIND_SPEED, TraceKind::Line, " Wind", Cell { row: 2, col: 1 }),
        (HUMIDITY, TraceKind::Line, " Humidity", Cell { row: 2, col: 2 }),
    ];

    let traces = panels
        .into_iter()
        .flat_map(|(variable, kind, suffix, cell)| {
            comparison_traces(gfs, ecmwf, variable, move |model, x, y| Trace {
                opacity: (kind == TraceKind::Bar).then_some(0.7),
                show_legend: variable == TEMPERATURE,
                cell: Some(cell),
                ..Trace::new(
                    format!("{}{}", model.label(), suffix),
                    kind,
                    x,
                    y,
                    line_color(model),
                )
            })
        })
        .collect();

    ChartSpec {
        title: "Weather Model Comparison Dashboard".to_string(),
        x_axis_title: None,
        y_axis_title: None,
        bar_mode: None,
        hover_mode: None,
        legend: Legend::above(),
        show_legend: true,
        height: Some(600),
        grid: Some(Grid {
            rows: 2,
            cols: 2,
            subplot_titles: vec![
                "Temperature (C)".to_string(),
                "Precipitation (mm)".to_string(),
                "Wind Speed (km/h)".to_string(),
                "Humidity (%)".to_string(),
            ],
            vertical_spacing: 0.12,
            horizontal_spacing: 0.1,
        }),
        traces,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn forecast(temperature: f64) -> ForecastResponse {
        serde_json::from_value(json!({
            "latitude": 40.71,
            "longitude": -74.0,
            "hourly": {
                "time": ["2024-05-01T00:00", "2024-05-01T01:00"],
                "temperature_2m": [temperature, temperature + 0.5],
                "relative_humidity_2m": [70.0, 72.0],
                "precipitation": [0.0, 1.2],
                "wind_speed_10m": [8.0, 9.5]
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_only_present_model_is_plotted() {
        let ecmwf = forecast(14.0);
        let chart = temperature_comparison_chart(None, Some(&ecmwf));

        assert_eq!(chart.traces.len(), 1);
        let trace = &chart.traces[0];
        assert_eq!(trace.name, "ECMWF");
        assert_eq!(trace.color, "#ff7f0e");
        assert_eq!(trace.kind, TraceKind::Line);
        assert_eq!(trace.y, vec![Some(14.0), Some(14.5)]);
        assert_eq!(trace.x.len(), 2);
    }

    #[test]
    fn test_no_forecasts_no_traces() {
        assert!(temperature_comparison_chart(None, None).traces.is_empty());
        assert!(precipitation_comparison_chart(None, None).traces.is_empty());
        assert!(wind_comparison_chart(None, None).traces.is_empty());
        assert!(multi_variable_dashboard(None, None).traces.is_empty());
    }

    #[test]
    fn test_both_models_gfs_first() {
        let gfs = forecast(10.0);
        let ecmwf = forecast(11.0);

        let chart = precipitation_comparison_chart(Some(&gfs), Some(&ecmwf));
        assert_eq!(chart.bar_mode, Some(BarMode::Group));
        let names: Vec<_> = chart.traces.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["GFS", "ECMWF"]);
        assert!(chart.traces.iter().all(|t| t.kind == TraceKind::Bar));
        assert!(chart.traces.iter().all(|t| t.opacity == Some(0.7)));
    }

    #[test]
    fn test_wind_is_filled_area() {
        let gfs = forecast(10.0);
        let chart = wind_comparison_chart(Some(&gfs), None);

        assert_eq!(chart.traces.len(), 1);
        assert_eq!(chart.traces[0].kind, TraceKind::Area);
        assert_eq!(
            chart.traces[0].fill_color.as_deref(),
            Some("rgba(31, 119, 180, 0.2)")
        );
        assert_eq!(chart.y_axis_title.as_deref(), Some("Wind Speed (km/h)"));
    }

    #[test]
    fn test_missing_variable_skips_trace() {
        let mut gfs = forecast(10.0);
        gfs.hourly.variables.remove(WIND_SPEED);
        let ecmwf = forecast(11.0);

        let chart = wind_comparison_chart(Some(&gfs), Some(&ecmwf));
        assert_eq!(chart.traces.len(), 1);
        assert_eq!(chart.traces[0].name, "ECMWF");
    }

    #[test]
    fn test_dashboard_layout() {
        let gfs = forecast(10.0);
        let ecmwf = forecast(11.0);
        let chart = multi_variable_dashboard(Some(&gfs), Some(&ecmwf));

        assert_eq!(chart.traces.len(), 8);
        assert_eq!(chart.height, Some(600));
        assert_eq!(chart.grid.as_ref().map(|g| (g.rows, g.cols)), Some((2, 2)));

        let humidity: Vec<_> = chart.traces_in(2, 2).map(|t| t.name.as_str()).collect();
        assert_eq!(humidity, ["GFS Humidity", "ECMWF Humidity"]);

        let precipitation: Vec<_> = chart.traces_in(1, 2).collect();
        assert!(precipitation.iter().all(|t| t.kind == TraceKind::Bar));

        let in_legend: Vec<_> = chart
            .traces
            .iter()
            .filter(|t| t.show_legend)
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(in_legend, ["GFS", "ECMWF"]);
    }

    #[test]
    fn test_dashboard_with_one_model() {
        let gfs = forecast(10.0);
        let chart = multi_variable_dashboard(Some(&gfs), None);
        assert_eq!(chart.traces.len(), 4);
        assert!(chart.traces.iter().all(|t| t.name.starts_with("GFS")));
    }

    #[test]
    fn test_spec_serializes() {
        let gfs = forecast(10.0);
        let value = serde_json::to_value(temperature_comparison_chart(Some(&gfs), None)).unwrap();
        assert_eq!(value["hover_mode"], "x_unified");
        assert_eq!(value["traces"][0]["kind"], "line");
        assert!(value.get("grid").is_none());
    }
}
