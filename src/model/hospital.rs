use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::ModelInput;

/// Per-state hospital statistics (`data/hospitals/us.json` rows).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HospitalData {
    pub abbr: String,
    pub population: f64,
    pub licensed_beds: f64,
    pub total_beds: f64,
    pub icu_beds: f64,
    /// Fraction of beds already occupied, `0.0..=1.0`.
    pub utilization: f64,
    pub pct_icu: f64,
}

/// Beds left over for outbreak patients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BedCapacity {
    pub normal_beds: f64,
    pub icu_beds: f64,
}

impl BedCapacity {
    #[must_use]
    pub fn from_hospital_data(hospital: &HospitalData) -> Self {
        let free = 1.0 - hospital.utilization;
        Self {
            normal_beds: ((hospital.total_beds - hospital.icu_beds) * free).floor(),
            icu_beds: (hospital.icu_beds * free).floor(),
        }
    }
}

/// Capacity for a US state run, looked up by the subregion's trailing state
/// abbreviation (`US-NY` -> `NY`).
#[must_use]
pub fn bed_capacity_for(input: &ModelInput, hospitals: &[HospitalData]) -> Option<BedCapacity> {
    if input.region != "US" {
        return None;
    }
    let subregion = input.subregion.as_deref()?;
    let abbr_start = subregion.char_indices().rev().nth(1).map(|(index, _)| index)?;
    let abbr = &subregion[abbr_start..];
    let Some(hospital) = hospitals.iter().find(|hospital| hospital.abbr == abbr) else {
        debug!(abbr, "no hospital capacity for state");
        return None;
    };
    Some(BedCapacity::from_hospital_data(hospital))
}
