use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::primitives::millis_to_date;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// One chart sample: UTC milliseconds paired with an optional value.
///
/// `y == None` means "no data" and is never the same thing as zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Datum {
    pub x: i64,
    pub y: Option<f64>,
}

impl Datum {
    #[must_use]
    pub fn new(x: i64, y: Option<f64>) -> Self {
        Self { x, y }
    }

    /// Returns the value when it can be drawn (present and finite).
    #[must_use]
    pub fn defined_y(self) -> Option<f64> {
        self.y.filter(|value| value.is_finite())
    }

    #[must_use]
    pub fn date(self) -> Option<NaiveDate> {
        millis_to_date(self.x as f64)
    }
}
