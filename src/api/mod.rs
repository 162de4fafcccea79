//! Outcome chart facade and the per-frame derivations it exposes.

mod axis;
mod chart_config;
mod frame_builder;
mod hover_resolver;
mod label_format;
mod legend;
mod outcome_chart;
mod overlays;
mod scale_coordinator;

pub use axis::{YAxisTick, x_axis_ticks, y_axis_ticks};
pub use chart_config::OutcomeChartConfig;
pub use frame_builder::{
    ChartFrame, GroupFrame, InterventionFrame, InterventionRangeFrame, SeriesFrame,
};
pub use hover_resolver::HoverResolution;
pub use label_format::{format_abbreviated, format_count, format_thousands, format_tick_label};
pub use legend::{LegendReadout, LegendRow, legend_readout};
pub use outcome_chart::OutcomeChart;
pub use overlays::{
    HoverMarker, LineSegments, PixelPoint, SparklineWindow, capacity_line_y, excess_runs,
    hover_marker, project_line, series_excess_runs, sparkline_window,
};
