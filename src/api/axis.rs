use serde::Serialize;

use crate::core::{MonthTick, TimeScale, ValueScale};
use crate::error::ChartResult;

use super::label_format::format_tick_label;

/// One horizontal grid tick inside a series band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YAxisTick {
    pub value: f64,
    pub y: f64,
    /// Round ticks get a full-width grid line and a label.
    pub round: bool,
    pub label: Option<String>,
}

/// Value ticks for a band, without the one sitting on the band's top edge.
#[must_use]
pub fn y_axis_ticks(scale: ValueScale, count: usize) -> Vec<YAxisTick> {
    scale
        .ticks(count)
        .into_iter()
        .filter_map(|value| {
            let y = scale.value_to_pixel(value);
            // A tick on the top edge bleeds into the band above.
            if y.abs() < 1e-9 {
                return None;
            }
            let round = scale.is_round_tick(value);
            Some(YAxisTick {
                value,
                y,
                round,
                label: round.then(|| format_tick_label(value)),
            })
        })
        .collect()
}

/// Monthly ticks for the shared horizontal axis.
pub fn x_axis_ticks(scale: TimeScale) -> ChartResult<Vec<MonthTick>> {
    scale.month_ticks()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScaleYType;

    #[test]
    fn linear_ticks_skip_the_top_edge() {
        let scale = ValueScale::from_extent(Some((0.0, 147.0)), ScaleYType::Linear, 128.0)
            .expect("scale");
        let ticks = y_axis_ticks(scale, 5);
        let values: Vec<f64> = ticks.iter().map(|tick| tick.value).collect();
        assert_eq!(values, vec![0.0, 50.0, 100.0, 150.0]);
        assert!(ticks.iter().all(|tick| tick.round && tick.label.is_some()));
    }

    #[test]
    fn log_ticks_label_powers_of_ten_only() {
        let scale = ValueScale::from_extent(Some((1.0, 100.0)), ScaleYType::Logarithmic, 128.0)
            .expect("scale");
        let ticks = y_axis_ticks(scale, 5);
        assert!(ticks.iter().all(|tick| tick.value < 100.0));
        let labeled: Vec<&str> = ticks
            .iter()
            .filter_map(|tick| tick.label.as_deref())
            .collect();
        assert_eq!(labeled, vec!["1", "10"]);
    }
}
