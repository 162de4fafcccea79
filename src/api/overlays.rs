use std::ops::Range;

use serde::Serialize;

use crate::core::{Datum, TimeScale, ValueScale, Viewport};
use crate::error::ChartResult;
use crate::series::{PreparedSeries, ValueView};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

/// Polyline pieces; a new piece starts after every missing sample.
pub type LineSegments = Vec<Vec<PixelPoint>>;

/// Projects datums onto pixels, breaking the line where `y` is missing.
#[must_use]
pub fn project_line(data: &[Datum], time_scale: TimeScale, value_scale: ValueScale) -> LineSegments {
    let mut segments = LineSegments::new();
    let mut current = Vec::new();
    for datum in data {
        match datum.defined_y() {
            Some(value) => current.push(PixelPoint {
                x: time_scale.time_to_pixel(datum.x as f64),
                y: value_scale.value_to_pixel(value),
            }),
            None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// Pixel Y of the dashed capacity line, when it should be drawn.
///
/// Capacity compares against daily counts only, and a line sitting on
/// either band edge is hidden.
#[must_use]
pub fn capacity_line_y(series: &PreparedSeries, value_scale: ValueScale, view: ValueView) -> Option<f64> {
    if view != ValueView::Daily {
        return None;
    }
    let y = value_scale.value_to_pixel(series.effective_capacity()?);
    (y > 0.0 && y < value_scale.height()).then_some(y)
}

/// Maximal index runs where the value is defined and at or above capacity.
#[must_use]
pub fn excess_runs(data: &[Datum], capacity: f64) -> Vec<Range<usize>> {
    let mut runs = Vec::new();
    let mut start = None;
    for (index, datum) in data.iter().enumerate() {
        let over = datum.defined_y().is_some_and(|value| value >= capacity);
        match (over, start) {
            (true, None) => start = Some(index),
            (false, Some(run_start)) => {
                runs.push(run_start..index);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(run_start) = start {
        runs.push(run_start..data.len());
    }
    runs
}

/// Excess runs of the daily projection; empty in cumulative mode or without capacity.
#[must_use]
pub fn series_excess_runs(series: &PreparedSeries, view: ValueView) -> Vec<Range<usize>> {
    match (view, series.effective_capacity()) {
        (ValueView::Daily, Some(capacity)) => excess_runs(&series.projected.values, capacity),
        _ => Vec::new(),
    }
}

/// Hover dot positions for one series band.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct HoverMarker {
    pub x: Option<f64>,
    pub projected_y: Option<f64>,
    pub actual_y: Option<f64>,
}

#[must_use]
pub fn hover_marker(
    series: &PreparedSeries,
    view: ValueView,
    hover_index: Option<usize>,
    time_scale: TimeScale,
    value_scale: ValueScale,
) -> HoverMarker {
    let Some(index) = hover_index else {
        return HoverMarker::default();
    };
    let projected = series.projected_view(view).get(index).copied();
    let actual = series
        .actual_view(view)
        .and_then(|data| data.get(index).copied());

    HoverMarker {
        x: projected.map(|datum| time_scale.time_to_pixel(datum.x as f64)),
        projected_y: projected
            .and_then(Datum::defined_y)
            .map(|value| value_scale.value_to_pixel(value)),
        actual_y: actual
            .and_then(Datum::defined_y)
            .map(|value| value_scale.value_to_pixel(value)),
    }
}

/// Legend sparkline geometry.
///
/// The sparkline always spans the full result; `indicator_x` marks how far
/// the main chart currently reaches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SparklineWindow {
    pub scale: TimeScale,
    pub indicator_x: f64,
}

pub fn sparkline_window(
    domain_start_millis: f64,
    full_end_millis: f64,
    visible_max_millis: f64,
    width_px: u32,
) -> ChartResult<SparklineWindow> {
    let scale = TimeScale::new(
        domain_start_millis,
        full_end_millis,
        Viewport::new(width_px, 0),
    )?;
    Ok(SparklineWindow {
        scale,
        indicator_x: scale.time_to_pixel(visible_max_millis),
    })
}
