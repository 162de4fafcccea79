//! Inputs consumed by the chart: simulation results, real-world case data,
//! hospital capacity, and the intervention tracks derived from them.

pub mod case_data;
pub mod hospital;
pub mod intervention;
pub mod simulation;

pub use case_data::{CaseData, CaseDataKey};
pub use hospital::{BedCapacity, HospitalData, bed_capacity_for};
pub use intervention::{Intervention, InterventionRange, derive_interventions};
pub use simulation::{
    Aggregate, Intensity, InterventionPeriod, MetricKey, ModelInput, ModelOutput,
    ModelParameters, SeverityMetrics, StrategyKey, TimeAxis,
};
