use chrono::NaiveDate;
use serde::Serialize;

use crate::core::Datum;
use crate::series::{ChartColor, PreparedSeries, ValueView};

use super::label_format::{format_abbreviated, format_count};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendRow {
    pub label: String,
    pub value_text: String,
    /// `"<amount> over"` badge text; daily view only.
    pub excess_text: Option<String>,
}

/// Legend block for one series at the hover index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendReadout {
    pub title: String,
    pub color: ChartColor,
    pub projected_peak: Option<NaiveDate>,
    pub projected: LegendRow,
    pub actual: Option<LegendRow>,
}

fn excess_text(value: Option<f64>, capacity: Option<f64>, view: ValueView) -> Option<String> {
    if view != ValueView::Daily {
        return None;
    }
    let value = value?;
    let capacity = capacity?;
    (value > capacity).then(|| format!("{} over", format_abbreviated(value - capacity)))
}

#[must_use]
pub fn legend_readout(
    series: &PreparedSeries,
    view: ValueView,
    hover_index: Option<usize>,
) -> LegendReadout {
    let sample_at = |data: &[Datum]| {
        hover_index
            .and_then(|index| data.get(index))
            .and_then(|datum| datum.defined_y())
    };
    let capacity = series.effective_capacity();

    let projected = sample_at(series.projected_view(view));
    let actual = series.actual.as_ref().map(|actual_data| {
        let value = series.actual_view(view).and_then(sample_at);
        LegendRow {
            label: actual_data
                .name
                .clone()
                .unwrap_or_else(|| "Actual".to_owned()),
            value_text: format_count(value),
            excess_text: excess_text(value, capacity, view),
        }
    });

    LegendReadout {
        title: series.title.clone(),
        color: series.color,
        projected_peak: series.projected_peak,
        projected: LegendRow {
            label: "Projected".to_owned(),
            value_text: format_count(projected),
            excess_text: excess_text(projected, capacity, view),
        },
        actual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::{ActualData, ProjectedData};

    fn series() -> PreparedSeries {
        let projected = vec![Datum::new(0, Some(90.0)), Datum::new(1, Some(12_345.0 + 100.0))];
        PreparedSeries {
            title: "Intensive Care Beds".to_owned(),
            color: ChartColor::Red,
            projected_peak: None,
            projected: ProjectedData {
                values: projected.clone(),
                cumulative: projected,
                variance: None,
                incidence: None,
            },
            actual: Some(ActualData {
                values: vec![Datum::new(0, None), Datum::new(1, Some(150.0))],
                cumulative: vec![Datum::new(0, None), Datum::new(1, Some(150.0))],
                name: None,
            }),
            capacity: Some(100.0),
            y: 0.0,
        }
    }

    #[test]
    fn excess_shows_only_above_capacity_in_daily_view() {
        let series = series();
        let below = legend_readout(&series, ValueView::Daily, Some(0));
        assert_eq!(below.projected.value_text, "90");
        assert_eq!(below.projected.excess_text, None);
        let actual = below.actual.expect("actual row");
        assert_eq!(actual.label, "Actual");
        assert_eq!(actual.value_text, "No Data");

        let above = legend_readout(&series, ValueView::Daily, Some(1));
        assert_eq!(above.projected.value_text, "12,445");
        assert_eq!(above.projected.excess_text.as_deref(), Some("12.3k over"));
        assert_eq!(
            above.actual.and_then(|row| row.excess_text).as_deref(),
            Some("50 over")
        );

        let cumulative = legend_readout(&series, ValueView::Cumulative, Some(1));
        assert_eq!(cumulative.projected.excess_text, None);
    }

    #[test]
    fn no_hover_index_reads_no_data() {
        let readout = legend_readout(&series(), ValueView::Daily, None);
        assert_eq!(readout.projected.value_text, "No Data");
    }
}
