//! Simulation result payload as produced by the model runner.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{add_days, parse_iso_date};
use crate::error::{ChartError, ChartResult};

/// Ordinal strength of one intervention strategy during one period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Mild,
    Moderate,
    Aggressive,
}

/// Intervention strategies rendered as timeline tracks, in track order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StrategyKey {
    SchoolClosure,
    SocialDistancing,
    CaseIsolation,
    VoluntaryHomeQuarantine,
}

impl StrategyKey {
    pub const ALL: [StrategyKey; 4] = [
        StrategyKey::SchoolClosure,
        StrategyKey::SocialDistancing,
        StrategyKey::CaseIsolation,
        StrategyKey::VoluntaryHomeQuarantine,
    ];

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            StrategyKey::SchoolClosure => "School Closures",
            StrategyKey::SocialDistancing => "Social Distancing",
            StrategyKey::CaseIsolation => "Case Isolation",
            StrategyKey::VoluntaryHomeQuarantine => "Voluntary Home Quarantine",
        }
    }
}

/// A caller-specified period with per-strategy intensities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterventionPeriod {
    pub start_date: String,
    #[serde(default)]
    pub reduction_population_contact: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_distancing: Option<Intensity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school_closure: Option<Intensity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_isolation: Option<Intensity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voluntary_home_quarantine: Option<Intensity>,
}

impl InterventionPeriod {
    #[must_use]
    pub fn new(start_date: impl Into<String>) -> Self {
        Self {
            start_date: start_date.into(),
            reduction_population_contact: 0.0,
            social_distancing: None,
            school_closure: None,
            case_isolation: None,
            voluntary_home_quarantine: None,
        }
    }

    #[must_use]
    pub fn with_intensity(mut self, strategy: StrategyKey, intensity: Option<Intensity>) -> Self {
        match strategy {
            StrategyKey::SchoolClosure => self.school_closure = intensity,
            StrategyKey::SocialDistancing => self.social_distancing = intensity,
            StrategyKey::CaseIsolation => self.case_isolation = intensity,
            StrategyKey::VoluntaryHomeQuarantine => self.voluntary_home_quarantine = intensity,
        }
        self
    }

    #[must_use]
    pub fn intensity(&self, strategy: StrategyKey) -> Option<Intensity> {
        match strategy {
            StrategyKey::SchoolClosure => self.school_closure,
            StrategyKey::SocialDistancing => self.social_distancing,
            StrategyKey::CaseIsolation => self.case_isolation,
            StrategyKey::VoluntaryHomeQuarantine => self.voluntary_home_quarantine,
        }
    }

    pub fn start(&self) -> ChartResult<NaiveDate> {
        parse_iso_date(&self.start_date)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelParameters {
    #[serde(default)]
    pub calibration_date: Option<String>,
    #[serde(default)]
    pub calibration_case_count: Option<f64>,
    #[serde(default)]
    pub calibration_death_count: Option<f64>,
    #[serde(default)]
    pub intervention_periods: Vec<InterventionPeriod>,
    #[serde(default)]
    pub r0: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInput {
    pub region: String,
    #[serde(default)]
    pub subregion: Option<String>,
    #[serde(default)]
    pub parameters: ModelParameters,
}

/// Day offsets of every reported sample, anchored at `t0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeAxis {
    pub t0: String,
    pub timestamps: Vec<i64>,
    pub extent: [i64; 2],
}

impl TimeAxis {
    pub fn t0_date(&self) -> ChartResult<NaiveDate> {
        parse_iso_date(&self.t0)
    }

    /// `t0 + extent[1]` days.
    pub fn end_date(&self) -> ChartResult<NaiveDate> {
        add_days(self.t0_date()?, self.extent[1])
    }
}

/// Named metric arrays of one simulation, all aligned with `TimeAxis::timestamps`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SeverityMetrics {
    #[serde(rename = "Mild", default)]
    pub mild: Vec<f64>,
    #[serde(rename = "ILI", default)]
    pub ili: Vec<f64>,
    #[serde(rename = "SARI", default)]
    pub sari: Vec<f64>,
    #[serde(rename = "Critical", default)]
    pub critical: Vec<f64>,
    #[serde(rename = "CritRecov", default)]
    pub crit_recov: Vec<f64>,
    #[serde(rename = "incDeath", default)]
    pub inc_death: Vec<f64>,
    #[serde(rename = "cumMild", default)]
    pub cum_mild: Vec<f64>,
    #[serde(rename = "cumILI", default)]
    pub cum_ili: Vec<f64>,
    #[serde(rename = "cumSARI", default)]
    pub cum_sari: Vec<f64>,
    #[serde(rename = "cumCritical", default)]
    pub cum_critical: Vec<f64>,
    #[serde(rename = "cumCritRecov", default)]
    pub cum_crit_recov: Vec<f64>,
}

impl SeverityMetrics {
    #[must_use]
    pub fn series(&self, key: MetricKey) -> &[f64] {
        match key {
            MetricKey::Mild => &self.mild,
            MetricKey::Ili => &self.ili,
            MetricKey::Sari => &self.sari,
            MetricKey::Critical => &self.critical,
            MetricKey::CritRecov => &self.crit_recov,
            MetricKey::IncDeath => &self.inc_death,
            MetricKey::CumMild => &self.cum_mild,
            MetricKey::CumIli => &self.cum_ili,
            MetricKey::CumSari => &self.cum_sari,
            MetricKey::CumCritical => &self.cum_critical,
            MetricKey::CumCritRecov => &self.cum_crit_recov,
        }
    }
}

/// Field name of one `SeverityMetrics` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricKey {
    #[serde(rename = "Mild")]
    Mild,
    #[serde(rename = "ILI")]
    Ili,
    #[serde(rename = "SARI")]
    Sari,
    #[serde(rename = "Critical")]
    Critical,
    #[serde(rename = "CritRecov")]
    CritRecov,
    #[serde(rename = "incDeath")]
    IncDeath,
    #[serde(rename = "cumMild")]
    CumMild,
    #[serde(rename = "cumILI")]
    CumIli,
    #[serde(rename = "cumSARI")]
    CumSari,
    #[serde(rename = "cumCritical")]
    CumCritical,
    #[serde(rename = "cumCritRecov")]
    CumCritRecov,
}

impl MetricKey {
    pub const ALL: [MetricKey; 11] = [
        MetricKey::Mild,
        MetricKey::Ili,
        MetricKey::Sari,
        MetricKey::Critical,
        MetricKey::CritRecov,
        MetricKey::IncDeath,
        MetricKey::CumMild,
        MetricKey::CumIli,
        MetricKey::CumSari,
        MetricKey::CumCritical,
        MetricKey::CumCritRecov,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            MetricKey::Mild => "Mild",
            MetricKey::Ili => "ILI",
            MetricKey::Sari => "SARI",
            MetricKey::Critical => "Critical",
            MetricKey::CritRecov => "CritRecov",
            MetricKey::IncDeath => "incDeath",
            MetricKey::CumMild => "cumMild",
            MetricKey::CumIli => "cumILI",
            MetricKey::CumSari => "cumSARI",
            MetricKey::CumCritical => "cumCritical",
            MetricKey::CumCritRecov => "cumCritRecov",
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MetricKey {
    type Err = ChartError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        MetricKey::ALL
            .into_iter()
            .find(|key| key.name() == value)
            .ok_or_else(|| ChartError::InvalidData(format!("unknown metric key {value:?}")))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Aggregate {
    pub metrics: SeverityMetrics,
}

/// Complete result of one model run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelOutput {
    pub metadata: ModelInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary_hash: Option<String>,
    pub time: TimeAxis,
    pub aggregate: Aggregate,
}

impl ModelOutput {
    pub fn from_json(json: &str) -> ChartResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn intervention_periods(&self) -> &[InterventionPeriod] {
        &self.metadata.parameters.intervention_periods
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OUTPUT_JSON: &str = r#"{
        "metadata": {
            "region": "US",
            "subregion": "US-NY",
            "parameters": {
                "calibrationDate": "2020-03-20",
                "calibrationCaseCount": 500,
                "calibrationDeathCount": 20,
                "r0": null,
                "interventionPeriods": [
                    {"startDate": "2020-03-01", "reductionPopulationContact": 10, "schoolClosure": "aggressive"},
                    {"startDate": "2020-03-11", "reductionPopulationContact": 0}
                ]
            }
        },
        "time": {"t0": "2020-03-01", "timestamps": [0, 1, 2], "extent": [0, 2]},
        "aggregate": {"metrics": {"Mild": [1, 2, 3], "incDeath": [0, 1, 0], "cumILI": [1, 1, 1]}}
    }"#;

    #[test]
    fn decodes_runner_payload() {
        let output = ModelOutput::from_json(OUTPUT_JSON).expect("decode");
        assert_eq!(output.metadata.subregion.as_deref(), Some("US-NY"));
        assert_eq!(output.intervention_periods().len(), 2);
        assert_eq!(
            output.intervention_periods()[0].intensity(StrategyKey::SchoolClosure),
            Some(Intensity::Aggressive)
        );
        assert_eq!(output.aggregate.metrics.series(MetricKey::Mild), &[1.0, 2.0, 3.0]);
        assert!(output.aggregate.metrics.series(MetricKey::Critical).is_empty());
        assert_eq!(
            output.time.end_date().expect("end"),
            NaiveDate::from_ymd_opt(2020, 3, 3).expect("date")
        );
    }

    #[test]
    fn metric_keys_round_trip_through_names() {
        for key in MetricKey::ALL {
            assert_eq!(key.name().parse::<MetricKey>().expect("known key"), key);
        }
        assert!("deaths".parse::<MetricKey>().is_err());
    }
}
