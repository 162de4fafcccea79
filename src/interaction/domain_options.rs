use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::primitives::{add_days, add_months, date_to_millis};
use crate::error::ChartResult;

/// Width of the visible time window, measured from `t0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimeDomainWidth {
    Months(u32),
    FullRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeDomainOption {
    pub label: &'static str,
    pub width: TimeDomainWidth,
    pub disabled: bool,
}

pub type TimeDomainOptions = SmallVec<[TimeDomainOption; 3]>;

const PRESETS: [(&str, TimeDomainWidth); 3] = [
    ("6 Months", TimeDomainWidth::Months(6)),
    ("12 Months", TimeDomainWidth::Months(12)),
    ("Full Range", TimeDomainWidth::FullRange),
];

/// Window presets in priority order. A month preset is disabled when the
/// result ends before `t0 + months`.
pub fn time_domain_options(t0: NaiveDate, extent_end_days: i64) -> ChartResult<TimeDomainOptions> {
    let end = add_days(t0, extent_end_days)?;
    PRESETS
        .iter()
        .map(|&(label, width)| {
            let disabled = match width {
                TimeDomainWidth::Months(months) => add_months(t0, months)? > end,
                TimeDomainWidth::FullRange => false,
            };
            Ok(TimeDomainOption {
                label,
                width,
                disabled,
            })
        })
        .collect()
}

/// First enabled option, falling back to the full range.
#[must_use]
pub fn default_time_domain(options: &[TimeDomainOption]) -> TimeDomainWidth {
    options
        .iter()
        .find(|option| !option.disabled)
        .map_or(TimeDomainWidth::FullRange, |option| option.width)
}

/// Target upper bound of the horizontal domain, in UTC milliseconds.
pub fn visible_max_millis(
    t0: NaiveDate,
    width: TimeDomainWidth,
    extent_end_days: i64,
) -> ChartResult<i64> {
    let end = match width {
        TimeDomainWidth::Months(months) => add_months(t0, months)?,
        TimeDomainWidth::FullRange => add_days(t0, extent_end_days)?,
    };
    Ok(date_to_millis(end))
}
