//! outcome-chart: data preparation, scales and interaction state for
//! epidemiological outcome charts.
//!
//! The crate turns a simulation result (plus optional observed case data)
//! into stacked chart series, derives intervention timelines, builds the
//! shared time scale and per-group value scales, and resolves pointer and
//! control events into the hover/pin/zoom state a renderer needs.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod model;
pub mod series;
pub mod telemetry;

pub use api::{ChartFrame, OutcomeChart, OutcomeChartConfig};
pub use error::{ChartError, ChartResult};
