use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Layout and animation settings for an outcome chart.
///
/// Serializable so embedding pages can ship chart setup as JSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutcomeChartConfig {
    /// Height of one series band.
    #[serde(default = "default_series_height_px")]
    pub series_height_px: f64,
    #[serde(default = "default_intervention_track_height_px")]
    pub intervention_track_height_px: f64,
    #[serde(default = "default_y_tick_count")]
    pub y_tick_count: usize,
    #[serde(default = "default_transition_duration_ms")]
    pub transition_duration_ms: u64,
}

impl Default for OutcomeChartConfig {
    fn default() -> Self {
        Self {
            series_height_px: default_series_height_px(),
            intervention_track_height_px: default_intervention_track_height_px(),
            y_tick_count: default_y_tick_count(),
            transition_duration_ms: default_transition_duration_ms(),
        }
    }
}

impl OutcomeChartConfig {
    #[must_use]
    pub fn with_series_height_px(mut self, height: f64) -> Self {
        self.series_height_px = height;
        self
    }

    #[must_use]
    pub fn with_intervention_track_height_px(mut self, height: f64) -> Self {
        self.intervention_track_height_px = height;
        self
    }

    #[must_use]
    pub fn with_y_tick_count(mut self, count: usize) -> Self {
        self.y_tick_count = count;
        self
    }

    /// Sets the duration of the visible-window animation. Zero disables it.
    #[must_use]
    pub fn with_transition_duration_ms(mut self, duration_ms: u64) -> Self {
        self.transition_duration_ms = duration_ms;
        self
    }

    #[must_use]
    pub fn transition_duration(self) -> Duration {
        Duration::from_millis(self.transition_duration_ms)
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.series_height_px.is_finite() || self.series_height_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "series height must be finite and > 0".to_owned(),
            ));
        }
        if !self.intervention_track_height_px.is_finite() || self.intervention_track_height_px <= 0.0
        {
            return Err(ChartError::InvalidData(
                "intervention track height must be finite and > 0".to_owned(),
            ));
        }
        if self.y_tick_count == 0 {
            return Err(ChartError::InvalidData(
                "y tick count must be > 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(self) -> ChartResult<String> {
        Ok(serde_json::to_string_pretty(&self)?)
    }

    /// Deserializes and validates config from JSON.
    pub fn from_json(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }
}

fn default_series_height_px() -> f64 {
    128.0
}

fn default_intervention_track_height_px() -> f64 {
    25.0
}

fn default_y_tick_count() -> usize {
    5
}

fn default_transition_duration_ms() -> u64 {
    750
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config = OutcomeChartConfig::from_json(r#"{"series_height_px": 96}"#).expect("config");
        assert_eq!(config.series_height_px, 96.0);
        assert_eq!(config.intervention_track_height_px, 25.0);
        assert_eq!(config.y_tick_count, 5);
        assert_eq!(config.transition_duration(), Duration::from_millis(750));
    }

    #[test]
    fn invalid_json_and_sizes_are_rejected() {
        let err = OutcomeChartConfig::from_json("{").expect_err("bad json");
        assert!(matches!(err, ChartError::Config(_)));

        let err = OutcomeChartConfig::from_json(r#"{"series_height_px": 0}"#)
            .expect_err("zero height");
        assert!(matches!(err, ChartError::InvalidData(_)));
    }

    #[test]
    fn json_round_trip_keeps_values() {
        let config = OutcomeChartConfig::default().with_y_tick_count(7);
        let json = config.to_json_pretty().expect("json");
        assert_eq!(OutcomeChartConfig::from_json(&json).expect("config"), config);
    }
}
