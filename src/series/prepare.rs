use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::core::primitives::{add_days, day_offset_millis};
use crate::core::{Datum, SeriesValue, max_index};
use crate::error::{ChartError, ChartResult};
use crate::model::{CaseData, ModelOutput, SeverityMetrics};
use crate::series::{
    CaseDataAccessor, ChartColor, ChartSeriesConfig, MetricsAccessor,
};

/// Which of the two alternate views of a series is plotted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub enum ValueView {
    #[default]
    Daily,
    Cumulative,
}

impl ValueView {
    #[must_use]
    pub fn from_cumulative(cumulative: bool) -> Self {
        if cumulative {
            ValueView::Cumulative
        } else {
            ValueView::Daily
        }
    }
}

/// Everything the preparer reads. A change to any field requires a fresh
/// preparation.
#[derive(Debug, Clone, Copy)]
pub struct SeriesSource<'a> {
    pub metrics: &'a SeverityMetrics,
    pub case_data: Option<&'a CaseData>,
    pub timestamps: &'a [i64],
    pub t0: NaiveDate,
}

impl<'a> SeriesSource<'a> {
    pub fn from_output(output: &'a ModelOutput, case_data: Option<&'a CaseData>) -> ChartResult<Self> {
        Ok(Self {
            metrics: &output.aggregate.metrics,
            case_data,
            timestamps: &output.time.timestamps,
            t0: output.time.t0_date()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedData {
    pub values: Vec<Datum>,
    pub cumulative: Vec<Datum>,
    pub variance: Option<Vec<Datum>>,
    pub incidence: Option<Vec<Datum>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActualData {
    pub values: Vec<Datum>,
    pub cumulative: Vec<Datum>,
    pub name: Option<String>,
}

/// Materialized chart line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreparedSeries {
    pub title: String,
    pub color: ChartColor,
    /// Earliest day with the highest daily projected value.
    pub projected_peak: Option<NaiveDate>,
    pub projected: ProjectedData,
    pub actual: Option<ActualData>,
    pub capacity: Option<f64>,
    /// Top offset of this line's band inside the plot.
    pub y: f64,
}

impl PreparedSeries {
    #[must_use]
    pub fn projected_view(&self, view: ValueView) -> &[Datum] {
        match view {
            ValueView::Daily => &self.projected.values,
            ValueView::Cumulative => &self.projected.cumulative,
        }
    }

    #[must_use]
    pub fn actual_view(&self, view: ValueView) -> Option<&[Datum]> {
        self.actual.as_ref().map(|actual| match view {
            ValueView::Daily => actual.values.as_slice(),
            ValueView::Cumulative => actual.cumulative.as_slice(),
        })
    }

    /// Capacity that should be drawn: present and non-zero.
    #[must_use]
    pub fn effective_capacity(&self) -> Option<f64> {
        self.capacity.filter(|capacity| *capacity != 0.0 && capacity.is_finite())
    }
}

/// Negative samples are upstream data corrections and read as zero.
#[must_use]
pub fn clamp_sample(value: Option<f64>) -> Option<f64> {
    value.map(|value| if value < 0.0 { 0.0 } else { value })
}

/// Pairs `values[i]` with `t0 + timestamps[i]` days.
pub fn datumize<V: SeriesValue>(
    values: &[V],
    timestamps: &[i64],
    t0: NaiveDate,
) -> ChartResult<Vec<Datum>> {
    if values.len() > timestamps.len() {
        return Err(ChartError::SeriesLengthMismatch {
            values: values.len(),
            timestamps: timestamps.len(),
        });
    }

    Ok(values
        .iter()
        .zip(timestamps)
        .map(|(value, &days)| Datum::new(day_offset_millis(t0, days), clamp_sample(value.value())))
        .collect())
}

fn prepare_projected(accessor: &MetricsAccessor, source: &SeriesSource<'_>) -> ChartResult<Vec<Datum>> {
    datumize(&accessor.resolve(source.metrics), source.timestamps, source.t0)
}

fn prepare_actual(accessor: &CaseDataAccessor, source: &SeriesSource<'_>) -> ChartResult<Vec<Datum>> {
    let case_data = source.case_data.ok_or(ChartError::MissingCaseData)?;
    datumize(&accessor.resolve(case_data), source.timestamps, source.t0)
}

fn peak_date(values: &[Datum], source: &SeriesSource<'_>) -> ChartResult<Option<NaiveDate>> {
    let samples: Vec<Option<f64>> = values.iter().map(|datum| datum.y).collect();
    let Some(index) = max_index(&samples) else {
        return Ok(None);
    };
    let Some(&days) = source.timestamps.get(index) else {
        return Ok(None);
    };
    add_days(source.t0, days).map(Some)
}

/// Materializes every configured line, preserving the group/series shape.
///
/// Lines are stacked top to bottom in configuration order, `series_height`
/// apart. Requesting actual values without case data is a caller error.
pub fn prepare_series(
    config: &[Vec<ChartSeriesConfig>],
    source: &SeriesSource<'_>,
    series_height: f64,
) -> ChartResult<Vec<Vec<PreparedSeries>>> {
    let mut y = 0.0;
    let mut prepared = Vec::with_capacity(config.len());

    for group in config {
        let mut prepared_group = Vec::with_capacity(group.len());
        for series in group {
            let projected = ProjectedData {
                values: prepare_projected(&series.projected.values, source)?,
                cumulative: prepare_projected(&series.projected.cumulative, source)?,
                variance: series
                    .projected
                    .variance
                    .as_ref()
                    .map(|accessor| prepare_projected(accessor, source))
                    .transpose()?,
                incidence: series
                    .projected
                    .incidence
                    .as_ref()
                    .map(|accessor| prepare_projected(accessor, source))
                    .transpose()?,
            };
            let actual = match &series.actual {
                Some(accessors) => Some(ActualData {
                    values: prepare_actual(&accessors.values, source)?,
                    cumulative: prepare_actual(&accessors.cumulative, source)?,
                    name: accessors.name.clone(),
                }),
                None => None,
            };

            prepared_group.push(PreparedSeries {
                title: series.title.clone(),
                color: series.color,
                projected_peak: peak_date(&projected.values, source)?,
                projected,
                actual,
                capacity: series.capacity,
                y,
            });
            y += series_height;
        }
        prepared.push(prepared_group);
    }

    debug!(
        groups = prepared.len(),
        series = prepared.iter().map(Vec::len).sum::<usize>(),
        samples = source.timestamps.len(),
        "prepared outcome series"
    );
    Ok(prepared)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::primitives::{date_to_millis, parse_iso_date};

    #[test]
    fn datumize_clamps_negative_and_keeps_missing() {
        let t0 = parse_iso_date("2020-03-01").expect("date");
        let data = datumize(&[Some(-5.0), None, Some(3.0)], &[0, 1, 2], t0).expect("datums");
        let ys: Vec<Option<f64>> = data.iter().map(|datum| datum.y).collect();
        assert_eq!(ys, vec![Some(0.0), None, Some(3.0)]);
        assert_eq!(data[2].x, date_to_millis(t0) + 2 * 86_400_000);
    }

    #[test]
    fn datumize_rejects_values_past_timestamps() {
        let t0 = parse_iso_date("2020-03-01").expect("date");
        let err = datumize(&[1.0, 2.0], &[0], t0).expect_err("too many values");
        assert!(matches!(
            err,
            ChartError::SeriesLengthMismatch {
                values: 2,
                timestamps: 1
            }
        ));
    }

    #[test]
    fn clamp_and_view_helpers() {
        assert_eq!(clamp_sample(Some(-0.5)), Some(0.0));
        assert_eq!(clamp_sample(None), None);
        assert_eq!(ValueView::from_cumulative(true), ValueView::Cumulative);
    }
}
