use std::collections::BTreeSet;

use crate::models::Doctor;

/// Unique specialty names across `doctors`, ascending.
pub fn extract_specialties(doctors: &[Doctor]) -> Vec<String> {
    doctors
        .iter()
        .flat_map(Doctor::speciality_names)
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
