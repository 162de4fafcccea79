use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Real-world case counts aligned with the simulation's `t0` and extent.
///
/// Entries are `None` on days without reported data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseData {
    pub deaths: Vec<Option<f64>>,
    pub cumulative_deaths: Vec<Option<f64>>,
    pub confirmed: Vec<Option<f64>>,
    pub cumulative_confirmed: Vec<Option<f64>>,
}

impl CaseData {
    pub fn from_json(json: &str) -> ChartResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn series(&self, key: CaseDataKey) -> &[Option<f64>] {
        match key {
            CaseDataKey::Deaths => &self.deaths,
            CaseDataKey::CumulativeDeaths => &self.cumulative_deaths,
            CaseDataKey::Confirmed => &self.confirmed,
            CaseDataKey::CumulativeConfirmed => &self.cumulative_confirmed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CaseDataKey {
    Deaths,
    CumulativeDeaths,
    Confirmed,
    CumulativeConfirmed,
}

impl CaseDataKey {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            CaseDataKey::Deaths => "deaths",
            CaseDataKey::CumulativeDeaths => "cumulativeDeaths",
            CaseDataKey::Confirmed => "confirmed",
            CaseDataKey::CumulativeConfirmed => "cumulativeConfirmed",
        }
    }
}

impl FromStr for CaseDataKey {
    type Err = ChartError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        [
            CaseDataKey::Deaths,
            CaseDataKey::CumulativeDeaths,
            CaseDataKey::Confirmed,
            CaseDataKey::CumulativeConfirmed,
        ]
        .into_iter()
        .find(|key| key.name() == value)
        .ok_or_else(|| ChartError::InvalidData(format!("unknown case data key {value:?}")))
    }
}
