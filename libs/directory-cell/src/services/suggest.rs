use crate::models::Doctor;

pub const DEFAULT_SUGGESTION_LIMIT: usize = 3;

/// Autocomplete matches for a partial name, in source order, capped at
/// `limit`. A blank query yields nothing so the suggestion list stays hidden.
pub fn suggest<'a>(doctors: &'a [Doctor], query: &str, limit: usize) -> Vec<&'a Doctor> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    doctors
        .iter()
        .filter(|doctor| doctor.name.to_lowercase().contains(&needle))
        .take(limit)
        .collect()
}
