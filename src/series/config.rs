use serde::{Deserialize, Serialize};

use crate::core::{cumsum, element_sum};
use crate::model::{BedCapacity, CaseDataKey, MetricKey, SeverityMetrics};
use crate::series::{CaseDataAccessor, MetricsAccessor};

/// Line palette shared by the chart and its legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartColor {
    Purple,
    Red,
    Green,
    Orange,
    Blue,
    Black,
    Pink,
}

impl ChartColor {
    #[must_use]
    pub fn hex(self) -> &'static str {
        match self {
            ChartColor::Purple => "#6F42C1",
            ChartColor::Red => "#D73A49",
            ChartColor::Green => "#28A745",
            ChartColor::Orange => "#F66A0A",
            ChartColor::Blue => "#0366D6",
            ChartColor::Black => "#050505",
            ChartColor::Pink => "#D03592",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProjectedAccessors {
    pub values: MetricsAccessor,
    pub cumulative: MetricsAccessor,
    pub variance: Option<MetricsAccessor>,
    pub incidence: Option<MetricsAccessor>,
}

#[derive(Debug, Clone)]
pub struct ActualAccessors {
    pub values: CaseDataAccessor,
    pub cumulative: CaseDataAccessor,
    /// Legend label for the actual row; `Actual` when unset.
    pub name: Option<String>,
}

/// Declarative description of one chart line.
#[derive(Debug, Clone)]
pub struct ChartSeriesConfig {
    pub title: String,
    pub color: ChartColor,
    pub projected: ProjectedAccessors,
    pub actual: Option<ActualAccessors>,
    /// Reference value drawn as a line; never part of the value extent.
    pub capacity: Option<f64>,
}

impl ChartSeriesConfig {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        color: ChartColor,
        values: impl Into<MetricsAccessor>,
        cumulative: impl Into<MetricsAccessor>,
    ) -> Self {
        Self {
            title: title.into(),
            color,
            projected: ProjectedAccessors {
                values: values.into(),
                cumulative: cumulative.into(),
                variance: None,
                incidence: None,
            },
            actual: None,
            capacity: None,
        }
    }

    #[must_use]
    pub fn with_actual(
        mut self,
        values: impl Into<CaseDataAccessor>,
        cumulative: impl Into<CaseDataAccessor>,
        name: Option<&str>,
    ) -> Self {
        self.actual = Some(ActualAccessors {
            values: values.into(),
            cumulative: cumulative.into(),
            name: name.map(str::to_owned),
        });
        self
    }

    #[must_use]
    pub fn with_capacity(mut self, capacity: Option<f64>) -> Self {
        self.capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_variance(mut self, variance: impl Into<MetricsAccessor>) -> Self {
        self.projected.variance = Some(variance.into());
        self
    }

    #[must_use]
    pub fn with_incidence(mut self, incidence: impl Into<MetricsAccessor>) -> Self {
        self.projected.incidence = Some(incidence.into());
        self
    }
}

/// Groups of lines; lines in one group share a vertical scale.
pub type ChartConfiguration = Vec<Vec<ChartSeriesConfig>>;

fn summed(metrics: &SeverityMetrics, keys: &[MetricKey]) -> Vec<f64> {
    let arrays: Vec<Option<&[f64]>> = keys.iter().map(|key| Some(metrics.series(*key))).collect();
    element_sum(&arrays).unwrap_or_default()
}

fn halved(values: &[f64]) -> Vec<f64> {
    values.iter().map(|value| value / 2.0).collect()
}

/// Deaths, infections, and hospital demand against optional bed capacity.
#[must_use]
pub fn default_outcome_configuration(capacity: Option<BedCapacity>) -> ChartConfiguration {
    vec![
        vec![
            ChartSeriesConfig::new(
                "Deaths",
                ChartColor::Black,
                MetricKey::IncDeath,
                MetricsAccessor::by_function(|m: &SeverityMetrics| cumsum(&m.inc_death)),
            )
            .with_actual(CaseDataKey::Deaths, CaseDataKey::CumulativeDeaths, None),
        ],
        vec![
            ChartSeriesConfig::new(
                "Infections",
                ChartColor::Blue,
                MetricsAccessor::by_function(|m: &SeverityMetrics| {
                    summed(
                        m,
                        &[
                            MetricKey::Mild,
                            MetricKey::Ili,
                            MetricKey::Sari,
                            MetricKey::Critical,
                        ],
                    )
                }),
                MetricsAccessor::by_function(|m: &SeverityMetrics| {
                    summed(
                        m,
                        &[
                            MetricKey::CumMild,
                            MetricKey::CumIli,
                            MetricKey::CumSari,
                            MetricKey::CumCritical,
                        ],
                    )
                }),
            )
            .with_actual(
                CaseDataKey::Confirmed,
                CaseDataKey::CumulativeConfirmed,
                Some("Confirmed"),
            ),
        ],
        vec![
            ChartSeriesConfig::new(
                "Normal Hospital Beds",
                ChartColor::Purple,
                MetricsAccessor::by_function(|m: &SeverityMetrics| {
                    summed(m, &[MetricKey::Sari, MetricKey::CritRecov])
                }),
                MetricsAccessor::by_function(|m: &SeverityMetrics| {
                    summed(m, &[MetricKey::CumSari, MetricKey::CumCritRecov])
                }),
            )
            .with_capacity(capacity.map(|beds| beds.normal_beds)),
            ChartSeriesConfig::new(
                "Intensive Care Beds",
                ChartColor::Orange,
                MetricKey::Critical,
                MetricKey::CumCritical,
            )
            .with_capacity(capacity.map(|beds| beds.icu_beds)),
            ChartSeriesConfig::new(
                "Ventilators Required",
                ChartColor::Pink,
                MetricsAccessor::by_function(|m: &SeverityMetrics| halved(&m.critical)),
                MetricsAccessor::by_function(|m: &SeverityMetrics| halved(&m.cum_critical)),
            ),
        ],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration_shape() {
        let config = default_outcome_configuration(Some(BedCapacity {
            normal_beds: 900.0,
            icu_beds: 120.0,
        }));
        let shape: Vec<usize> = config.iter().map(Vec::len).collect();
        assert_eq!(shape, vec![1, 1, 3]);
        assert_eq!(config[1][0].actual.as_ref().and_then(|a| a.name.as_deref()), Some("Confirmed"));
        assert_eq!(config[2][0].capacity, Some(900.0));
        assert_eq!(config[2][1].capacity, Some(120.0));
        assert_eq!(config[2][2].capacity, None);
    }

    #[test]
    fn composite_accessors_combine_metrics() {
        let metrics = SeverityMetrics {
            mild: vec![1.0, 1.0],
            ili: vec![2.0, 2.0],
            sari: vec![3.0, 3.0],
            critical: vec![4.0, 6.0],
            inc_death: vec![1.0, 2.0],
            ..SeverityMetrics::default()
        };
        let config = default_outcome_configuration(None);
        assert_eq!(config[0][0].projected.cumulative.resolve(&metrics).as_ref(), &[1.0, 3.0]);
        assert_eq!(config[1][0].projected.values.resolve(&metrics).as_ref(), &[10.0, 12.0]);
        assert_eq!(config[2][2].projected.values.resolve(&metrics).as_ref(), &[2.0, 3.0]);
    }
}
