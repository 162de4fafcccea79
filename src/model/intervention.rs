use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::core::primitives::date_to_millis;
use crate::error::ChartResult;
use crate::model::{Intensity, InterventionPeriod, StrategyKey};

/// Half-open `[start, end)` span during which one strategy is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InterventionRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub degree: Intensity,
}

impl InterventionRange {
    #[must_use]
    pub fn start_millis(self) -> i64 {
        date_to_millis(self.start)
    }

    #[must_use]
    pub fn end_millis(self) -> i64 {
        date_to_millis(self.end)
    }
}

/// Timeline track for one strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Intervention {
    pub strategy: StrategyKey,
    pub title: &'static str,
    pub ranges: Vec<InterventionRange>,
}

/// Converts chronologically sorted intervention periods into one track per
/// strategy in `StrategyKey::ALL` order.
///
/// Period `i` spans up to the start of period `i + 1`; the last period runs to
/// `series_end`. A strategy missing from a period leaves a gap in its track.
pub fn derive_interventions(
    periods: &[InterventionPeriod],
    series_end: NaiveDate,
) -> ChartResult<Vec<Intervention>> {
    let mut tracks: IndexMap<StrategyKey, Intervention> = StrategyKey::ALL
        .into_iter()
        .map(|strategy| {
            (
                strategy,
                Intervention {
                    strategy,
                    title: strategy.title(),
                    ranges: Vec::new(),
                },
            )
        })
        .collect();

    for (index, period) in periods.iter().enumerate() {
        let start = period.start()?;
        let end = match periods.get(index + 1) {
            Some(next) => next.start()?,
            None => series_end,
        };
        for (strategy, track) in tracks.iter_mut() {
            if let Some(degree) = period.intensity(*strategy) {
                track.ranges.push(InterventionRange { start, end, degree });
            }
        }
    }

    let interventions: Vec<Intervention> = tracks.into_values().collect();
    debug!(
        periods = periods.len(),
        ranges = interventions.iter().map(|track| track.ranges.len()).sum::<usize>(),
        "derived intervention tracks"
    );
    Ok(interventions)
}
