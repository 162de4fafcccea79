use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::LinearScale;
use crate::core::scale::linear_ticks;
use crate::error::{ChartError, ChartResult};

/// Vertical mapping mode selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScaleYType {
    #[default]
    Linear,
    /// Base-10 logarithmic; values below the domain collapse onto its floor.
    Logarithmic,
}

/// Per-group vertical scale mapped onto `[height, 0]` (larger values higher).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueScale {
    mode: ScaleYType,
    domain_start: f64,
    domain_end: f64,
    height_px: f64,
}

impl ValueScale {
    /// Builds a niced scale covering `extent`.
    ///
    /// A missing extent (no data anywhere in the group) falls back to
    /// `[0, 1]` in linear mode and `[1, 10]` in log mode.
    pub fn from_extent(
        extent: Option<(f64, f64)>,
        mode: ScaleYType,
        height_px: f64,
    ) -> ChartResult<Self> {
        if !height_px.is_finite() || height_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "value scale height must be finite and > 0".to_owned(),
            ));
        }

        let (min, max) = match extent {
            Some((min, max)) if min.is_finite() && max.is_finite() => (min.min(max), min.max(max)),
            Some(_) => {
                return Err(ChartError::InvalidData(
                    "value extent must be finite".to_owned(),
                ));
            }
            None => {
                warn!(?mode, "no values in group, using fallback value domain");
                match mode {
                    ScaleYType::Linear => (0.0, 1.0),
                    ScaleYType::Logarithmic => (1.0, 10.0),
                }
            }
        };

        let (domain_start, domain_end) = match mode {
            ScaleYType::Linear => LinearScale::new(min, max)?.nice(10).domain(),
            ScaleYType::Logarithmic => {
                // log10(0) is undefined and the lower extent is almost always 0.
                let lower = if min <= 0.0 { 1.0 } else { min };
                let upper = if max < lower {
                    warn!(min, max, "log extent below 1, collapsing value domain");
                    lower
                } else {
                    max
                };
                (
                    10_f64.powf(lower.log10().floor()),
                    10_f64.powf(upper.log10().ceil()),
                )
            }
        };

        Ok(Self {
            mode,
            domain_start,
            domain_end,
            height_px,
        })
    }

    #[must_use]
    pub fn mode(self) -> ScaleYType {
        self.mode
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.height_px
    }

    /// Maps a value to pixel Y inside the group (0 at the top).
    #[must_use]
    pub fn value_to_pixel(self, value: f64) -> f64 {
        let t = match self.mode {
            ScaleYType::Linear => ratio(self.domain_start, self.domain_end, value),
            ScaleYType::Logarithmic => {
                let clamped = value.clamp(self.domain_start, self.domain_end);
                ratio(
                    self.domain_start.log10(),
                    self.domain_end.log10(),
                    clamped.log10(),
                )
            }
        };
        self.height_px * (1.0 - t)
    }

    #[must_use]
    pub fn pixel_to_value(self, pixel: f64) -> f64 {
        let t = 1.0 - pixel / self.height_px;
        match self.mode {
            ScaleYType::Linear => self.domain_start + t * (self.domain_end - self.domain_start),
            ScaleYType::Logarithmic => {
                let t = t.clamp(0.0, 1.0);
                let (lo, hi) = (self.domain_start.log10(), self.domain_end.log10());
                10_f64.powf(lo + t * (hi - lo))
            }
        }
    }

    /// Axis tick values, roughly `count` of them.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        match self.mode {
            ScaleYType::Linear => linear_ticks(self.domain_start, self.domain_end, count),
            ScaleYType::Logarithmic => log_ticks(self.domain_start, self.domain_end, count),
        }
    }

    /// Linear ticks are always round; log ticks only at powers of ten.
    #[must_use]
    pub fn is_round_tick(self, tick: f64) -> bool {
        match self.mode {
            ScaleYType::Linear => true,
            ScaleYType::Logarithmic => tick > 0.0 && approx_integer(tick.log10()),
        }
    }
}

fn ratio(start: f64, end: f64, value: f64) -> f64 {
    let span = end - start;
    if span == 0.0 || !span.is_finite() {
        0.5
    } else {
        (value - start) / span
    }
}

fn log_ticks(start: f64, end: f64, count: usize) -> Vec<f64> {
    if start <= 0.0 || end <= 0.0 || count == 0 {
        return Vec::new();
    }
    let (min, max) = (start.min(end), start.max(end));
    let min_exp = min.log10();
    let max_exp = max.log10();

    if max_exp - min_exp < count as f64 {
        let mut ticks = Vec::new();
        let first = min_exp.floor() as i32;
        let last = max_exp.ceil() as i32;
        'decades: for exponent in first..=last {
            for multiplier in 1..10 {
                let tick = if exponent < 0 {
                    f64::from(multiplier) / 10_f64.powi(-exponent)
                } else {
                    f64::from(multiplier) * 10_f64.powi(exponent)
                };
                if tick < min {
                    continue;
                }
                if tick > max {
                    break 'decades;
                }
                ticks.push(tick);
            }
        }
        if ticks.len() * 2 < count {
            ticks = linear_ticks(min, max, count);
        }
        ticks
    } else {
        let exponent_count = ((max_exp - min_exp) as usize).min(count);
        linear_ticks(min_exp, max_exp, exponent_count)
            .into_iter()
            .map(|exponent| 10_f64.powf(exponent))
            .collect()
    }
}

fn approx_integer(value: f64) -> bool {
    (value - value.round()).abs() <= 1e-9
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_scale_is_inverted_and_niced() {
        let scale = ValueScale::from_extent(Some((0.0, 147.0)), ScaleYType::Linear, 128.0)
            .expect("scale");
        assert_eq!(scale.domain(), (0.0, 160.0));
        assert_eq!(scale.value_to_pixel(0.0), 128.0);
        assert_eq!(scale.value_to_pixel(160.0), 0.0);
        assert_eq!(scale.pixel_to_value(64.0), 80.0);
    }

    #[test]
    fn log_scale_remaps_zero_floor_and_clamps() {
        let scale = ValueScale::from_extent(Some((0.0, 850.0)), ScaleYType::Logarithmic, 128.0)
            .expect("scale");
        assert_eq!(scale.domain(), (1.0, 1000.0));
        assert_eq!(scale.value_to_pixel(0.5), scale.value_to_pixel(1.0));
        assert_eq!(scale.value_to_pixel(0.0), 128.0);
        assert!((scale.value_to_pixel(1000.0)).abs() < 1e-9);
    }

    #[test]
    fn empty_group_uses_fallback_domain() {
        let linear = ValueScale::from_extent(None, ScaleYType::Linear, 100.0).expect("scale");
        assert_eq!(linear.domain(), (0.0, 1.0));
        let log = ValueScale::from_extent(None, ScaleYType::Logarithmic, 100.0).expect("scale");
        assert_eq!(log.domain(), (1.0, 10.0));
    }

    #[test]
    fn log_ticks_round_only_at_decades() {
        let scale = ValueScale::from_extent(Some((1.0, 100.0)), ScaleYType::Logarithmic, 100.0)
            .expect("scale");
        let ticks = scale.ticks(5);
        assert_eq!(ticks.first().copied(), Some(1.0));
        assert_eq!(ticks.last().copied(), Some(100.0));
        assert_eq!(ticks.len(), 19);
        let round: Vec<f64> = ticks
            .into_iter()
            .filter(|tick| scale.is_round_tick(*tick))
            .collect();
        assert_eq!(round, vec![1.0, 10.0, 100.0]);
    }

    #[test]
    fn invalid_height_is_rejected() {
        let err = ValueScale::from_extent(Some((0.0, 1.0)), ScaleYType::Linear, 0.0)
            .expect_err("zero height");
        assert!(matches!(err, ChartError::InvalidData(_)));
    }
}
