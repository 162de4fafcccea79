//! `tracing` output of the outcome chart.
//!
//! Events the crate emits, by level:
//!
//! - `warn`: value scales falling back to a default domain (empty group,
//!   log extent below 1).
//! - `debug`: series preparation and intervention derivation summaries,
//!   missing hospital capacity, pin and time-domain width changes, visible
//!   window retargets.
//! - `trace`: per-frame time scale and transition retarget details.
//!
//! Dashboards that already own a subscriber only need a filter directive for
//! the `outcome_chart` target. Everyone else can call `init_default_tracing`.

/// Directive used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "outcome_chart=info";

/// Installs a compact subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_FILTER`]. Event targets are kept so the emitting module
/// (`outcome_chart::core::value_scale`, ...) is visible.
///
/// Returns `false` without the `telemetry` feature or when a global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_targets_this_crate() {
        assert!(DEFAULT_FILTER.starts_with(env!("CARGO_CRATE_NAME")));
    }

    #[cfg(not(feature = "telemetry"))]
    #[test]
    fn tracing_is_not_installed_without_feature() {
        assert!(!init_default_tracing());
    }

    #[cfg(feature = "telemetry")]
    #[test]
    fn second_install_reports_existing_subscriber() {
        let _ = init_default_tracing();
        assert!(!init_default_tracing());
    }
}
