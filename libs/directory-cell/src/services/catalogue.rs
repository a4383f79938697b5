use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::{
    Catalogue, CriteriaEvent, DirectoryError, Doctor, FilterCriteria, LoadState, LoadStatus,
};
use crate::services::{filter, query, specialty, suggest};

/// Identifies one load attempt. Only the most recently issued ticket may
/// complete a load.
pub type LoadTicket = Uuid;

/// The page's view of the doctor list: load status plus every read the
/// filter controls perform against it. All reads are no-ops until a load
/// has succeeded.
#[derive(Debug)]
pub struct DirectoryCatalogue {
    state: LoadState,
    pending: Option<LoadTicket>,
}

impl Default for DirectoryCatalogue {
    fn default() -> Self {
        Self {
            state: LoadState::Loading,
            pending: None,
        }
    }
}

impl DirectoryCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn status(&self) -> LoadStatus {
        self.state.status()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Starts a new load attempt, superseding any attempt still in flight.
    pub fn begin_load(&mut self) -> LoadTicket {
        let ticket = Uuid::new_v4();
        if let Some(previous) = self.pending.replace(ticket) {
            debug!("Load {} superseded by {}", previous, ticket);
        }
        self.state = LoadState::Loading;
        ticket
    }

    /// Applies the outcome of a load attempt. Returns `false` and leaves the
    /// state untouched when `ticket` is not the latest one issued.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Doctor>, DirectoryError>,
    ) -> bool {
        if self.pending != Some(ticket) {
            warn!("Ignoring stale load completion {}", ticket);
            return false;
        }
        self.pending = None;

        self.state = match result {
            Ok(doctors) => {
                let specialties = specialty::extract_specialties(&doctors);
                info!(
                    "Loaded {} doctors across {} specialties",
                    doctors.len(),
                    specialties.len()
                );
                LoadState::Loaded(Catalogue {
                    doctors,
                    specialties,
                    loaded_at: Utc::now(),
                })
            }
            Err(e) => {
                warn!("Doctor load failed: {}", e);
                LoadState::Failed {
                    reason: e.to_string(),
                    failed_at: Utc::now(),
                }
            }
        };
        true
    }

    pub fn doctors(&self) -> &[Doctor] {
        self.state.catalogue().map(|c| c.doctors.as_slice()).unwrap_or(&[])
    }

    pub fn specialties(&self) -> &[String] {
        self.state.catalogue().map(|c| c.specialties.as_slice()).unwrap_or(&[])
    }

    /// Criteria encoded in `raw_query`, or `None` while there is no data to
    /// validate specialties against.
    pub fn criteria_from_query(&self, raw_query: &str) -> Option<FilterCriteria> {
        self.state
            .catalogue()
            .map(|c| query::criteria_from_query(raw_query, &c.specialties))
    }

    pub fn search(&self, criteria: &FilterCriteria) -> Vec<&Doctor> {
        filter::apply(self.doctors(), criteria)
    }

    pub fn suggest(&self, partial: &str, limit: usize) -> Vec<&Doctor> {
        suggest::suggest(self.doctors(), partial, limit)
    }

    /// Applies a user interaction to `criteria`. Checking a specialty that the
    /// loaded list does not contain is rejected; before data arrives every
    /// event is a no-op.
    pub fn apply_event(
        &self,
        criteria: &FilterCriteria,
        event: CriteriaEvent,
    ) -> Result<FilterCriteria, DirectoryError> {
        let Some(catalogue) = self.state.catalogue() else {
            debug!("Ignoring criteria event while doctors are not loaded");
            return Ok(criteria.clone());
        };

        if let CriteriaEvent::ToggleSpecialty { name, checked: true } = &event {
            if !catalogue.specialties.contains(name) {
                return Err(DirectoryError::UnknownSpecialty(name.clone()));
            }
        }

        Ok(criteria.apply_event(event))
    }
}
