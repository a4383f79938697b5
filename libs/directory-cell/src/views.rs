//! View models for the directory page.
//!
//! Each interactive element carries a `test_id`; these identifiers are relied
//! on by UI automation and must keep their shape.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::models::{ConsultMode, Doctor, FilterCriteria, SortKey};

pub mod test_ids {
    pub const SEARCH_INPUT: &str = "autocomplete-input";
    pub const SUGGESTION_ITEM: &str = "suggestion-item";
    pub const DOCTOR_CARD: &str = "doctor-card";
    pub const DOCTOR_NAME: &str = "doctor-name";
    pub const DOCTOR_SPECIALTY: &str = "doctor-specialty";
    pub const DOCTOR_EXPERIENCE: &str = "doctor-experience";
    pub const DOCTOR_FEE: &str = "doctor-fee";
    pub const SORT_HEADER: &str = "filter-header-sort";
    pub const MODE_HEADER: &str = "filter-header-moc";
    pub const SPECIALTY_HEADER: &str = "filter-header-speciality";
    pub const SORT_FEES: &str = "sort-fees";
    pub const SORT_EXPERIENCE: &str = "sort-experience";
    pub const FILTER_VIDEO_CONSULT: &str = "filter-video-consult";
    pub const FILTER_IN_CLINIC: &str = "filter-in-clinic";
    pub const SPECIALTY_PREFIX: &str = "filter-specialty-";
}

pub const SPECIALTY_FALLBACK: &str = "Specialty not specified";

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// `/` becomes `-`, then every whitespace run becomes a single `-`.
pub fn specialty_test_id(specialty: &str) -> String {
    let slashless = specialty.replace('/', "-");
    format!(
        "{}{}",
        test_ids::SPECIALTY_PREFIX,
        WHITESPACE_RUN.replace_all(&slashless, "-")
    )
}

/// Only absolute http(s) URLs may reach an image loader.
pub fn is_absolute_photo_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PhotoView {
    Image { src: String, alt: String },
    Placeholder,
}

#[derive(Debug, Clone, Serialize)]
pub struct LabelledText {
    pub test_id: &'static str,
    pub text: String,
}

impl LabelledText {
    fn new(test_id: &'static str, text: impl Into<String>) -> Self {
        Self { test_id, text: text.into() }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DoctorCardView {
    pub test_id: &'static str,
    pub id: String,
    pub photo: PhotoView,
    pub name: LabelledText,
    pub specialty: LabelledText,
    pub experience: LabelledText,
    pub fee: LabelledText,
    pub clinic: Option<String>,
    pub languages: Vec<String>,
    pub consultation_modes: Vec<&'static str>,
    pub introduction: Option<String>,
}

impl DoctorCardView {
    pub fn from_doctor(doctor: &Doctor) -> Self {
        let specialty = if doctor.specialities.is_empty() {
            SPECIALTY_FALLBACK.to_string()
        } else {
            doctor.speciality_names().collect::<Vec<_>>().join(", ")
        };

        let photo = match doctor.photo.as_deref() {
            Some(url) if is_absolute_photo_url(url) => PhotoView::Image {
                src: url.to_string(),
                alt: doctor.name.clone(),
            },
            _ => PhotoView::Placeholder,
        };

        let consultation_modes = [ConsultMode::VideoConsult, ConsultMode::InClinic]
            .into_iter()
            .filter(|mode| doctor.supports(*mode))
            .map(|mode| mode.label())
            .collect();

        Self {
            test_id: test_ids::DOCTOR_CARD,
            id: doctor.id.clone(),
            photo,
            name: LabelledText::new(test_ids::DOCTOR_NAME, doctor.name.clone()),
            specialty: LabelledText::new(test_ids::DOCTOR_SPECIALTY, specialty),
            experience: LabelledText::new(test_ids::DOCTOR_EXPERIENCE, doctor.experience.clone()),
            fee: LabelledText::new(test_ids::DOCTOR_FEE, doctor.fees.clone()),
            clinic: clinic_label(doctor),
            languages: doctor.languages.clone().unwrap_or_default(),
            consultation_modes,
            introduction: doctor.doctor_introduction.clone(),
        }
    }
}

/// `"<clinic>, <locality>, <city>"`, skipping whatever is missing.
fn clinic_label(doctor: &Doctor) -> Option<String> {
    let clinic = doctor.clinic.as_ref()?;
    let address = clinic.address.as_ref();

    let parts: Vec<&str> = [
        clinic.name.as_deref(),
        address.and_then(|a| a.locality.as_deref()),
        address.and_then(|a| a.city.as_deref()),
    ]
    .into_iter()
    .flatten()
    .map(str::trim)
    .filter(|part| !part.is_empty())
    .collect();

    (!parts.is_empty()).then(|| parts.join(", "))
}

#[derive(Debug, Clone, Serialize)]
pub struct SuggestionView {
    pub test_id: &'static str,
    pub id: String,
    pub name: String,
}

impl SuggestionView {
    pub fn from_doctor(doctor: &Doctor) -> Self {
        Self {
            test_id: test_ids::SUGGESTION_ITEM,
            id: doctor.id.clone(),
            name: doctor.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OptionView {
    pub test_id: Option<String>,
    pub label: String,
    pub value: Option<String>,
    pub checked: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterSectionView {
    pub header_test_id: &'static str,
    pub title: &'static str,
    pub options: Vec<OptionView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterPanelView {
    pub search_input_test_id: &'static str,
    pub search: String,
    pub sort: FilterSectionView,
    pub mode: FilterSectionView,
    pub specialties: FilterSectionView,
}

impl FilterPanelView {
    pub fn build(specialties: &[String], criteria: &FilterCriteria) -> Self {
        let sort_option = |key: SortKey, test_id: &str, label: &str| OptionView {
            test_id: Some(test_id.to_string()),
            label: label.to_string(),
            value: Some(key.query_value().to_string()),
            checked: criteria.sort == Some(key),
        };

        let mode_option = |mode: ConsultMode, test_id: &str, label: &str| OptionView {
            test_id: Some(test_id.to_string()),
            label: label.to_string(),
            value: Some(mode.query_value().to_string()),
            checked: criteria.mode == Some(mode),
        };

        Self {
            search_input_test_id: test_ids::SEARCH_INPUT,
            search: criteria.search.clone(),
            sort: FilterSectionView {
                header_test_id: test_ids::SORT_HEADER,
                title: "Sort by",
                options: vec![
                    sort_option(SortKey::Fees, test_ids::SORT_FEES, "Price: Low-High"),
                    sort_option(
                        SortKey::Experience,
                        test_ids::SORT_EXPERIENCE,
                        "Experience: Most Experience first",
                    ),
                ],
            },
            mode: FilterSectionView {
                header_test_id: test_ids::MODE_HEADER,
                title: "Mode of consultation",
                options: vec![
                    mode_option(ConsultMode::VideoConsult, test_ids::FILTER_VIDEO_CONSULT, "Video Consultation"),
                    mode_option(ConsultMode::InClinic, test_ids::FILTER_IN_CLINIC, "In-clinic Consultation"),
                    OptionView {
                        test_id: None,
                        label: "All".to_string(),
                        value: None,
                        checked: criteria.mode.is_none(),
                    },
                ],
            },
            specialties: FilterSectionView {
                header_test_id: test_ids::SPECIALTY_HEADER,
                title: "Specialities",
                options: specialties
                    .iter()
                    .map(|name| OptionView {
                        test_id: Some(specialty_test_id(name)),
                        label: name.clone(),
                        value: Some(name.clone()),
                        checked: criteria.specialties.contains(name),
                    })
                    .collect(),
            },
        }
    }
}
