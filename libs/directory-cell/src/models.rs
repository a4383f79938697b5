use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Speciality {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub locality: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub address_line1: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Clinic {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
}

/// A doctor record as published by the upstream feed.
///
/// Decoding is lenient: optional fields may be absent, text fields accept
/// numbers and fall back to `""`, mode flags that are not booleans read as
/// `false`, and a `specialities` value that is missing or not an array
/// decodes to an empty list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default)]
    pub name_initials: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub doctor_introduction: Option<String>,
    #[serde(default, deserialize_with = "lenient_specialities")]
    pub specialities: Vec<Speciality>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub fees: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub experience: String,
    #[serde(default)]
    pub languages: Option<Vec<String>>,
    #[serde(default)]
    pub clinic: Option<Clinic>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub video_consult: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub in_clinic: bool,
}

impl Doctor {
    pub fn speciality_names(&self) -> impl Iterator<Item = &str> {
        self.specialities.iter().map(|spec| spec.name.as_str())
    }

    pub fn supports(&self, mode: ConsultMode) -> bool {
        match mode {
            ConsultMode::VideoConsult => self.video_consult,
            ConsultMode::InClinic => self.in_clinic,
        }
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => text,
        Some(Value::Number(number)) => number.to_string(),
        _ => String::new(),
    })
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(matches!(Option::<Value>::deserialize(deserializer)?, Some(Value::Bool(true))))
}

fn lenient_specialities<'de, D>(deserializer: D) -> Result<Vec<Speciality>, D::Error>
where
    D: Deserializer<'de>,
{
    let specialities = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.get("name").and_then(Value::as_str))
            .map(|name| Speciality { name: name.to_string() })
            .collect(),
        _ => Vec::new(),
    };
    Ok(specialities)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsultMode {
    #[serde(rename = "Video Consult")]
    VideoConsult,
    #[serde(rename = "In Clinic")]
    InClinic,
}

impl ConsultMode {
    pub fn label(&self) -> &'static str {
        match self {
            ConsultMode::VideoConsult => "Video Consult",
            ConsultMode::InClinic => "In Clinic",
        }
    }

    /// Discriminator used in the `mode` query parameter.
    pub fn query_value(&self) -> &'static str {
        match self {
            ConsultMode::VideoConsult => "video",
            ConsultMode::InClinic => "clinic",
        }
    }

    pub fn from_query_value(value: &str) -> Option<Self> {
        match value {
            "video" => Some(ConsultMode::VideoConsult),
            "clinic" => Some(ConsultMode::InClinic),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Ascending by fee amount.
    Fees,
    /// Descending by years of experience.
    Experience,
}

impl SortKey {
    pub fn query_value(&self) -> &'static str {
        match self {
            SortKey::Fees => "fees",
            SortKey::Experience => "experience",
        }
    }

    pub fn from_query_value(value: &str) -> Option<Self> {
        match value {
            "fees" => Some(SortKey::Fees),
            "experience" => Some(SortKey::Experience),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub search: String,
    pub mode: Option<ConsultMode>,
    pub specialties: BTreeSet<String>,
    pub sort: Option<SortKey>,
}

impl FilterCriteria {
    pub fn is_identity(&self) -> bool {
        self.search.is_empty() && self.mode.is_none() && self.specialties.is_empty() && self.sort.is_none()
    }

    /// Produces the criteria that result from a single user interaction.
    pub fn apply_event(&self, event: CriteriaEvent) -> FilterCriteria {
        let mut next = self.clone();
        match event {
            CriteriaEvent::SetSearch { text } => next.search = text,
            CriteriaEvent::SelectSuggestion { name } => next.search = name,
            CriteriaEvent::SetMode { mode } => next.mode = mode,
            CriteriaEvent::ToggleSpecialty { name, checked } => {
                if checked {
                    next.specialties.insert(name);
                } else {
                    next.specialties.remove(&name);
                }
            }
            CriteriaEvent::SetSort { sort } => next.sort = sort,
            // Search text survives a filter reset.
            CriteriaEvent::ClearFilters => {
                next.mode = None;
                next.specialties.clear();
                next.sort = None;
            }
        }
        next
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CriteriaEvent {
    SetSearch { text: String },
    SelectSuggestion { name: String },
    SetMode { mode: Option<ConsultMode> },
    ToggleSpecialty { name: String, checked: bool },
    SetSort { sort: Option<SortKey> },
    ClearFilters,
}

/// Loaded doctor list together with its derived specialty universe.
#[derive(Debug, Clone)]
pub struct Catalogue {
    pub doctors: Vec<Doctor>,
    pub specialties: Vec<String>,
    pub loaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub enum LoadState {
    Loading,
    Loaded(Catalogue),
    Failed { reason: String, failed_at: DateTime<Utc> },
}

impl LoadState {
    pub fn status(&self) -> LoadStatus {
        match self {
            LoadState::Loading => LoadStatus::Loading,
            LoadState::Loaded(_) => LoadStatus::Loaded,
            LoadState::Failed { .. } => LoadStatus::Failed,
        }
    }

    pub fn catalogue(&self) -> Option<&Catalogue> {
        match self {
            LoadState::Loaded(catalogue) => Some(catalogue),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    Loading,
    Loaded,
    Failed,
}

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Doctor feed request failed: {0}")]
    Transport(String),

    #[error("Doctor feed returned status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("Doctor feed payload is malformed: {0}")]
    MalformedPayload(String),

    #[error("Unknown specialty: {0}")]
    UnknownSpecialty(String),
}

impl From<reqwest::Error> for DirectoryError {
    fn from(err: reqwest::Error) -> Self {
        DirectoryError::Transport(err.to_string())
    }
}
