//! Mapping between [`FilterCriteria`] and the page's query string.
//!
//! Both directions live here so the parameter names and value spellings
//! cannot drift apart. Parameters at their default value are omitted when
//! writing; an absent parameter means "no constraint" when reading.

use tracing::debug;
use url::form_urlencoded;

use crate::models::{ConsultMode, FilterCriteria, SortKey};

pub const SEARCH_PARAM: &str = "q";
pub const MODE_PARAM: &str = "mode";
pub const SPECIALTIES_PARAM: &str = "specialties";
pub const SORT_PARAM: &str = "sort";

const SPECIALTY_SEPARATOR: &str = ",";

/// Reads criteria from a query string (with or without the leading `?`).
///
/// Specialties not present in `known_specialties` are dropped, as are
/// unrecognised mode and sort values. When a parameter repeats, the first
/// occurrence wins.
pub fn criteria_from_query(query: &str, known_specialties: &[String]) -> FilterCriteria {
    let mut criteria = FilterCriteria::default();
    let (mut seen_search, mut seen_mode, mut seen_specialties, mut seen_sort) = (false, false, false, false);

    for (key, value) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
        match &*key {
            SEARCH_PARAM if !seen_search => {
                seen_search = true;
                criteria.search = value.into_owned();
            }
            MODE_PARAM if !seen_mode => {
                seen_mode = true;
                criteria.mode = ConsultMode::from_query_value(&value);
            }
            SPECIALTIES_PARAM if !seen_specialties => {
                seen_specialties = true;
                for name in value.split(SPECIALTY_SEPARATOR).filter(|name| !name.is_empty()) {
                    if known_specialties.iter().any(|known| known == name) {
                        criteria.specialties.insert(name.to_string());
                    } else {
                        debug!("Dropping unknown specialty '{}' from query", name);
                    }
                }
            }
            SORT_PARAM if !seen_sort => {
                seen_sort = true;
                criteria.sort = SortKey::from_query_value(&value);
            }
            _ => {}
        }
    }

    criteria
}

/// Writes criteria as a canonical query string without the leading `?`.
/// Identity criteria produce an empty string.
pub fn criteria_to_query(criteria: &FilterCriteria) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());

    if !criteria.search.is_empty() {
        serializer.append_pair(SEARCH_PARAM, &criteria.search);
    }
    if let Some(mode) = criteria.mode {
        serializer.append_pair(MODE_PARAM, mode.query_value());
    }
    if !criteria.specialties.is_empty() {
        let joined = criteria
            .specialties
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(SPECIALTY_SEPARATOR);
        serializer.append_pair(SPECIALTIES_PARAM, &joined);
    }
    if let Some(sort) = criteria.sort {
        serializer.append_pair(SORT_PARAM, sort.query_value());
    }

    serializer.finish()
}
