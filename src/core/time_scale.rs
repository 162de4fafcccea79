use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::primitives::{add_months, date_to_millis, millis_to_date, next_month_start};
use crate::core::{LinearScale, Viewport};
use crate::error::{ChartError, ChartResult};

/// Month boundary tick on the horizontal axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthTick {
    pub date: NaiveDate,
    pub x: f64,
    /// Abbreviated month name (`Jan`, `Feb`, ...).
    pub label: String,
    /// Set on the first tick and whenever the year changes.
    pub year: Option<i32>,
}

/// Horizontal UTC time axis shared by every chart group.
///
/// The domain is kept in milliseconds since the epoch and mapped onto
/// `[0, width]` pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    linear: LinearScale,
}

impl TimeScale {
    pub fn new(start_millis: f64, end_millis: f64, viewport: Viewport) -> ChartResult<Self> {
        if viewport.width == 0 {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        if !start_millis.is_finite() || !end_millis.is_finite() {
            return Err(ChartError::InvalidData(
                "time domain must be finite".to_owned(),
            ));
        }

        let linear = LinearScale::new(start_millis, end_millis)?
            .with_range(0.0, f64::from(viewport.width))?;
        Ok(Self { linear })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.linear.domain()
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.linear.range().1
    }

    #[must_use]
    pub fn time_to_pixel(self, millis: f64) -> f64 {
        self.linear.map(millis)
    }

    #[must_use]
    pub fn date_to_pixel(self, date: NaiveDate) -> f64 {
        self.time_to_pixel(date_to_millis(date) as f64)
    }

    #[must_use]
    pub fn pixel_to_time(self, pixel: f64) -> f64 {
        self.linear.invert(pixel)
    }

    /// Copy of this scale with a different domain end and pixel width.
    pub fn rescaled(self, end_millis: f64, width_px: f64) -> ChartResult<Self> {
        let (start, _) = self.domain();
        let linear = LinearScale::new(start, end_millis)?.with_range(0.0, width_px)?;
        Ok(Self { linear })
    }

    /// One tick per calendar month start inside the domain.
    pub fn month_ticks(self) -> ChartResult<Vec<MonthTick>> {
        let (start, end) = self.domain();
        let (start, end) = if end < start { (end, start) } else { (start, end) };
        let (Some(first_day), Some(last_day)) = (millis_to_date(start), millis_to_date(end))
        else {
            return Ok(Vec::new());
        };

        let mut month = if first_day.day() == 1 && date_to_millis(first_day) as f64 >= start {
            first_day
        } else {
            next_month_start(first_day)?
        };

        let mut ticks = Vec::new();
        let mut previous_year = None;
        while month <= last_day {
            let year = (previous_year != Some(month.year())).then_some(month.year());
            previous_year = Some(month.year());
            ticks.push(MonthTick {
                date: month,
                x: self.date_to_pixel(month),
                label: month.format("%b").to_string(),
                year,
            });
            month = add_months(month, 1)?;
        }
        Ok(ticks)
    }
}
