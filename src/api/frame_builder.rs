use std::ops::Range;
use std::time::Instant;

use chrono::NaiveDate;
use serde::Serialize;

use crate::core::primitives::today_utc;
use crate::core::{MonthTick, ScaleYType, TimeScale, ValueScale};
use crate::error::ChartResult;
use crate::interaction::InterventionTrackState;
use crate::model::{Intensity, Intervention, StrategyKey};
use crate::series::{ChartColor, PreparedSeries, ValueView};

use super::OutcomeChart;
use super::axis::{YAxisTick, x_axis_ticks, y_axis_ticks};
use super::hover_resolver::HoverResolution;
use super::legend::{LegendReadout, legend_readout};
use super::overlays::{
    HoverMarker, LineSegments, SparklineWindow, capacity_line_y, hover_marker, project_line,
    series_excess_runs, sparkline_window,
};

/// Everything one series band needs to draw, in band-local pixels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesFrame {
    pub title: String,
    pub color: ChartColor,
    /// Band top inside the plot.
    pub y: f64,
    pub projected_line: LineSegments,
    pub actual_line: Option<LineSegments>,
    pub capacity_y: Option<f64>,
    /// Index runs of the daily projection at or above capacity.
    pub excess_runs: Vec<Range<usize>>,
    pub hover_marker: HoverMarker,
    pub legend: LegendReadout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupFrame {
    pub scale: ValueScale,
    /// Drawn once per series band of the group.
    pub y_ticks: Vec<YAxisTick>,
    pub series: Vec<SeriesFrame>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterventionRangeFrame {
    pub x_start: f64,
    pub x_end: f64,
    pub degree: Intensity,
    /// Start date text (`1 Mar`), set only on the focused track's range
    /// containing the hover date.
    pub start_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterventionFrame {
    pub strategy: StrategyKey,
    pub title: &'static str,
    /// Track top inside the plot.
    pub y: f64,
    pub state: InterventionTrackState,
    pub ranges: Vec<InterventionRangeFrame>,
}

/// Render-ready snapshot of the chart for one animation frame.
///
/// Pure function of the inputs, the interaction state and `now`; building
/// it twice with the same arguments yields equal frames.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartFrame {
    pub width: f64,
    pub plot_height: f64,
    pub charts_height: f64,
    pub view: ValueView,
    pub scale_y_type: ScaleYType,
    pub time_scale: TimeScale,
    pub x_ticks: Vec<MonthTick>,
    pub hover: HoverResolution,
    pub groups: Vec<GroupFrame>,
    pub interventions: Vec<InterventionFrame>,
}

impl OutcomeChart {
    pub fn frame(&self, now: Instant, today: NaiveDate) -> ChartResult<ChartFrame> {
        let time_scale = self.time_scale(now)?;
        let value_scales = self.value_scales()?;
        let hover = self.resolve_hover(time_scale, today)?;
        let view = self.interaction.value_view();

        let groups = self
            .derived
            .prepared
            .iter()
            .zip(value_scales)
            .map(|(group, scale)| GroupFrame {
                scale,
                y_ticks: y_axis_ticks(scale, self.config.y_tick_count),
                series: group
                    .iter()
                    .map(|series| series_frame(series, view, hover.index, time_scale, scale))
                    .collect(),
            })
            .collect();

        let charts_height = self.charts_height();
        let focused = self.interaction.focused_intervention();
        let interventions = self
            .derived
            .interventions
            .iter()
            .enumerate()
            .map(|(index, intervention)| {
                intervention_frame(
                    intervention,
                    charts_height + index as f64 * self.config.intervention_track_height_px,
                    self.interaction.track_state(index),
                    time_scale,
                    hover.date.filter(|_| focused == Some(index)),
                )
            })
            .collect();

        Ok(ChartFrame {
            width: time_scale.width(),
            plot_height: self.plot_height(),
            charts_height,
            view,
            scale_y_type: self.interaction.scale_y_type(),
            time_scale,
            x_ticks: x_axis_ticks(time_scale)?,
            hover,
            groups,
            interventions,
        })
    }

    /// Frame for the current instant, with "today" taken from the host calendar.
    pub fn frame_now(&self) -> ChartResult<ChartFrame> {
        self.frame(Instant::now(), today_utc())
    }

    /// Legend sparkline geometry for a sparkline `width_px` wide.
    pub fn sparkline_window(&self, now: Instant, width_px: u32) -> ChartResult<SparklineWindow> {
        sparkline_window(
            self.domain_start_millis(),
            self.full_end_millis(),
            self.animated_visible_max(now),
            width_px,
        )
    }
}

fn series_frame(
    series: &PreparedSeries,
    view: ValueView,
    hover_index: Option<usize>,
    time_scale: TimeScale,
    scale: ValueScale,
) -> SeriesFrame {
    SeriesFrame {
        title: series.title.clone(),
        color: series.color,
        y: series.y,
        projected_line: project_line(series.projected_view(view), time_scale, scale),
        actual_line: series
            .actual_view(view)
            .map(|data| project_line(data, time_scale, scale)),
        capacity_y: capacity_line_y(series, scale, view),
        excess_runs: series_excess_runs(series, view),
        hover_marker: hover_marker(series, view, hover_index, time_scale, scale),
        legend: legend_readout(series, view, hover_index),
    }
}

fn intervention_frame(
    intervention: &Intervention,
    y: f64,
    state: InterventionTrackState,
    time_scale: TimeScale,
    label_date: Option<NaiveDate>,
) -> InterventionFrame {
    InterventionFrame {
        strategy: intervention.strategy,
        title: intervention.title,
        y,
        state,
        ranges: intervention
            .ranges
            .iter()
            .map(|range| InterventionRangeFrame {
                x_start: time_scale.time_to_pixel(range.start_millis() as f64),
                x_end: time_scale.time_to_pixel(range.end_millis() as f64),
                degree: range.degree,
                start_label: label_date
                    .filter(|date| range.start <= *date && *date < range.end)
                    .map(|_| range.start.format("%-d %b").to_string()),
            })
            .collect(),
    }
}
