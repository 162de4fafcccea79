use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

const E10: f64 = 7.071_067_811_865_475; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Continuous linear mapping from a value domain onto a pixel range.
///
/// A zero-width domain maps every value onto the middle of the range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale domain must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start: 0.0,
            range_end: 1.0,
        })
    }

    pub fn with_range(mut self, range_start: f64, range_end: f64) -> ChartResult<Self> {
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }
        self.range_start = range_start;
        self.range_end = range_end;
        Ok(self)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let t = normalize(self.domain_start, self.domain_end, value);
        self.range_start + t * (self.range_end - self.range_start)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let t = normalize(self.range_start, self.range_end, pixel);
        self.domain_start + t * (self.domain_end - self.domain_start)
    }

    /// Extends the domain outwards to round step boundaries.
    ///
    /// Steps are recomputed until they stop changing, so the final domain is
    /// a whole multiple of the final tick step.
    #[must_use]
    pub fn nice(self, count: usize) -> Self {
        let (mut start, mut stop) = ordered(self.domain_start, self.domain_end);
        let reversed = self.domain_end < self.domain_start;
        let mut previous_step: Option<f64> = None;

        for _ in 0..10 {
            let Some(step) = tick_increment(start, stop, count) else {
                return self;
            };
            if previous_step == Some(step) {
                let (domain_start, domain_end) = if reversed {
                    (stop, start)
                } else {
                    (start, stop)
                };
                return Self {
                    domain_start,
                    domain_end,
                    ..self
                };
            }
            if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            }
            previous_step = Some(step);
        }
        self
    }

    /// Round tick values inside the domain, about `count` of them.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        let (start, stop) = ordered(self.domain_start, self.domain_end);
        let mut ticks = linear_ticks(start, stop, count);
        if self.domain_end < self.domain_start {
            ticks.reverse();
        }
        ticks
    }
}

fn normalize(start: f64, end: f64, value: f64) -> f64 {
    let span = end - start;
    if span == 0.0 || !span.is_finite() {
        0.5
    } else {
        (value - start) / span
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if b < a { (b, a) } else { (a, b) }
}

/// Tick step for `count` intervals over `[start, stop]`.
///
/// Positive results are the step itself; negative results `-k` encode a
/// fractional step of `1 / k` so that tick values stay exact.
#[must_use]
pub fn tick_increment(start: f64, stop: f64, count: usize) -> Option<f64> {
    let (_, _, increment) = tick_spec(start, stop, count)?;
    Some(increment)
}

fn tick_spec(start: f64, stop: f64, count: usize) -> Option<(i64, i64, f64)> {
    if count == 0 || !start.is_finite() || !stop.is_finite() || stop <= start {
        return None;
    }
    let step = (stop - start) / count as f64;
    let power = step.log10().floor();
    let error = step / 10_f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    if power < 0.0 {
        let increment = 10_f64.powf(-power) / factor;
        let mut i1 = (start * increment).round() as i64;
        let mut i2 = (stop * increment).round() as i64;
        if (i1 as f64) / increment < start {
            i1 += 1;
        }
        if (i2 as f64) / increment > stop {
            i2 -= 1;
        }
        Some((i1, i2, -increment))
    } else {
        let increment = 10_f64.powf(power) * factor;
        let mut i1 = (start / increment).round() as i64;
        let mut i2 = (stop / increment).round() as i64;
        if (i1 as f64) * increment < start {
            i1 += 1;
        }
        if (i2 as f64) * increment > stop {
            i2 -= 1;
        }
        Some((i1, i2, increment))
    }
}

/// Round values between `start` and `stop` (ascending input).
#[must_use]
pub fn linear_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if start == stop && start.is_finite() && count > 0 {
        return vec![start];
    }
    let Some((i1, i2, increment)) = tick_spec(start, stop, count) else {
        return Vec::new();
    };
    if i2 < i1 {
        return Vec::new();
    }
    (i1..=i2)
        .map(|index| {
            if increment < 0.0 {
                index as f64 / -increment
            } else {
                index as f64 * increment
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_and_inverts_with_inverted_range() {
        let scale = LinearScale::new(0.0, 200.0)
            .and_then(|scale| scale.with_range(128.0, 0.0))
            .expect("valid scale");
        assert_eq!(scale.map(0.0), 128.0);
        assert_eq!(scale.map(200.0), 0.0);
        assert_eq!(scale.map(100.0), 64.0);
        assert_eq!(scale.invert(64.0), 100.0);
    }

    #[test]
    fn degenerate_domain_maps_to_range_middle() {
        let scale = LinearScale::new(5.0, 5.0)
            .and_then(|scale| scale.with_range(100.0, 0.0))
            .expect("valid scale");
        assert_eq!(scale.map(5.0), 50.0);
        assert_eq!(scale.map(500.0), 50.0);
    }

    #[test]
    fn nice_rounds_domain_outwards() {
        let scale = LinearScale::new(0.0, 147.0).expect("valid scale").nice(10);
        assert_eq!(scale.domain(), (0.0, 160.0));

        let scale = LinearScale::new(0.13, 0.97).expect("valid scale").nice(10);
        assert_eq!(scale.domain(), (0.1, 1.0));
    }

    #[test]
    fn ticks_use_one_two_five_steps() {
        assert_eq!(linear_ticks(0.0, 10.0, 5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(linear_ticks(0.0, 1.0, 5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
        assert_eq!(linear_ticks(0.0, 160.0, 5), vec![0.0, 50.0, 100.0, 150.0]);
        assert!(linear_ticks(3.0, 1.0, 5).is_empty());
    }
}
