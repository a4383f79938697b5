use tracing::debug;

use crate::models::{Doctor, FilterCriteria, SortKey};
use crate::services::normalize::{experience_years, fee_amount};

/// Narrows and orders `doctors` according to `criteria`.
///
/// Filters run first (name, then mode, then specialty); the sort is always
/// last and stable, so ties and an unset sort keep input order.
pub fn apply<'a>(doctors: &'a [Doctor], criteria: &FilterCriteria) -> Vec<&'a Doctor> {
    let needle = criteria.search.to_lowercase();

    let mut matched: Vec<&Doctor> = doctors
        .iter()
        .filter(|doctor| matches_name(doctor, &needle))
        .filter(|doctor| criteria.mode.map_or(true, |mode| doctor.supports(mode)))
        .filter(|doctor| matches_specialties(doctor, criteria))
        .collect();

    match criteria.sort {
        Some(SortKey::Fees) => matched.sort_by_key(|doctor| fee_amount(&doctor.fees)),
        Some(SortKey::Experience) => {
            matched.sort_by(|a, b| experience_years(&b.experience).cmp(&experience_years(&a.experience)))
        }
        None => {}
    }

    debug!("Filtered {} doctors down to {}", doctors.len(), matched.len());
    matched
}

fn matches_name(doctor: &Doctor, needle: &str) -> bool {
    needle.is_empty() || doctor.name.to_lowercase().contains(needle)
}

fn matches_specialties(doctor: &Doctor, criteria: &FilterCriteria) -> bool {
    criteria.specialties.is_empty()
        || doctor
            .speciality_names()
            .any(|name| criteria.specialties.contains(name))
}
