use std::time::Instant;

use tracing::trace;

use crate::core::{TimeScale, ValueScale, Viewport};
use crate::error::ChartResult;
use crate::series::group_extents;

use super::OutcomeChart;

pub(super) struct ScaleCoordinator;

impl ScaleCoordinator {
    /// Shared horizontal scale from the result start to the animated
    /// visible max.
    pub(super) fn time_scale(chart: &OutcomeChart, now: Instant) -> ChartResult<TimeScale> {
        let start = chart.domain_start_millis();
        let end = chart.animated_visible_max(now);
        let viewport = Viewport::new(chart.width_px, chart.plot_height().max(0.0) as u32);
        trace!(start, end, width = viewport.width, "time scale");
        TimeScale::new(start, end, viewport)
    }

    /// One vertical scale per group, spanning a single series band.
    pub(super) fn value_scales(chart: &OutcomeChart) -> ChartResult<Vec<ValueScale>> {
        let mode = chart.interaction.scale_y_type();
        group_extents(&chart.derived.prepared, chart.interaction.value_view())
            .into_iter()
            .map(|extent| ValueScale::from_extent(extent, mode, chart.config.series_height_px))
            .collect()
    }
}
