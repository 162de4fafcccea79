//! Declarative line configuration and its materialization into chart data.

pub mod accessor;
pub mod config;
pub mod extent;
pub mod prepare;

pub use accessor::{Accessor, CaseDataAccessor, KeyedSeries, MetricsAccessor, SeriesFn};
pub use config::{
    ActualAccessors, ChartColor, ChartConfiguration, ChartSeriesConfig, ProjectedAccessors,
    default_outcome_configuration,
};
pub use extent::{group_extent, group_extents};
pub use prepare::{
    ActualData, PreparedSeries, ProjectedData, SeriesSource, ValueView, clamp_sample, datumize,
    prepare_series,
};
