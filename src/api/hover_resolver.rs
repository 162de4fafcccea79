use chrono::NaiveDate;
use serde::Serialize;

use crate::core::primitives::{add_days, date_to_millis};
use crate::core::{TimeScale, bisect_left};
use crate::error::ChartResult;

use super::OutcomeChart;

/// Cross-series hover position shared by legend, markers and labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HoverResolution {
    pub index: Option<usize>,
    pub date: Option<NaiveDate>,
    pub today_x: f64,
    /// The "Today" label is hidden while the pointer hovers.
    pub show_today_label: bool,
}

impl OutcomeChart {
    pub(super) fn resolve_hover(
        &self,
        time_scale: TimeScale,
        today: NaiveDate,
    ) -> ChartResult<HoverResolution> {
        let hover_x = self.interaction.hover_x();
        let target = hover_x.map_or(date_to_millis(today) as f64, |x| {
            time_scale.pixel_to_time(x)
        });

        let index = self
            .derived
            .prepared
            .iter()
            .flatten()
            .next()
            .map(|series| series.projected.values.as_slice())
            .filter(|values| !values.is_empty())
            .map(|values| bisect_left(values, target).min(values.len() - 1));

        let date = match index.and_then(|index| self.output.time.timestamps.get(index)) {
            Some(&days) => Some(add_days(self.derived.t0, days)?),
            None => None,
        };

        Ok(HoverResolution {
            index,
            date,
            today_x: time_scale.date_to_pixel(today),
            show_today_label: hover_x.is_none(),
        })
    }
}
