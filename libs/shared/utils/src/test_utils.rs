use std::sync::Arc;

use serde_json::{json, Value};

use shared_config::AppConfig;

pub struct TestConfig {
    pub doctors_api_url: String,
    pub doctors_api_timeout_secs: u64,
    pub suggestion_limit: usize,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            doctors_api_url: "http://localhost:54321/doctors.json".to_string(),
            doctors_api_timeout_secs: 2,
            suggestion_limit: 3,
        }
    }
}

impl TestConfig {
    /// Points the doctor feed at `base_url` + `/doctors.json`, e.g. a wiremock server.
    pub fn with_feed(base_url: &str) -> Self {
        Self {
            doctors_api_url: format!("{}/doctors.json", base_url),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            doctors_api_url: self.doctors_api_url.clone(),
            doctors_api_timeout_secs: self.doctors_api_timeout_secs,
            suggestion_limit: self.suggestion_limit,
            ..AppConfig::default()
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

/// Builder for doctor records shaped like the upstream feed.
pub struct DoctorFixture {
    id: String,
    name: String,
    fees: String,
    experience: String,
    specialities: Vec<String>,
    video_consult: bool,
    in_clinic: bool,
    photo: Option<String>,
}

impl DoctorFixture {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            fees: "₹ 500".to_string(),
            experience: "10 Years of experience".to_string(),
            specialities: Vec::new(),
            video_consult: true,
            in_clinic: true,
            photo: None,
        }
    }

    pub fn fees(mut self, fees: &str) -> Self {
        self.fees = fees.to_string();
        self
    }

    pub fn experience(mut self, experience: &str) -> Self {
        self.experience = experience.to_string();
        self
    }

    pub fn speciality(mut self, name: &str) -> Self {
        self.specialities.push(name.to_string());
        self
    }

    pub fn modes(mut self, video_consult: bool, in_clinic: bool) -> Self {
        self.video_consult = video_consult;
        self.in_clinic = in_clinic;
        self
    }

    pub fn photo(mut self, url: &str) -> Self {
        self.photo = Some(url.to_string());
        self
    }

    pub fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "name_initials": self.name.split_whitespace().filter_map(|w| w.chars().next()).collect::<String>(),
            "photo": self.photo,
            "doctor_introduction": format!("{} is a practising physician.", self.name),
            "specialities": self.specialities.iter().map(|name| json!({"name": name})).collect::<Vec<_>>(),
            "fees": self.fees,
            "experience": self.experience,
            "languages": ["English", "Hindi"],
            "clinic": {
                "name": "Apollo Clinic",
                "address": {
                    "locality": "Koramangala",
                    "city": "Bangalore",
                    "address_line1": "80 Feet Road",
                    "location": "12.9352,77.6245",
                    "logo_url": "https://cdn.example.com/logo.png"
                }
            },
            "video_consult": self.video_consult,
            "in_clinic": self.in_clinic,
        })
    }
}

/// The two-doctor scenario: Dr. A (video, Dermatologist, ₹ 500, 10 years)
/// and Dr. B (in clinic, Dentist, ₹ 300, 5 years).
pub fn scenario_doctors() -> Value {
    json!([
        DoctorFixture::new("a", "Dr. A")
            .fees("₹ 500")
            .experience("10 Years of experience")
            .modes(true, false)
            .speciality("Dermatologist")
            .to_json(),
        DoctorFixture::new("b", "Dr. B")
            .fees("₹ 300")
            .experience("5 Years of experience")
            .modes(false, true)
            .speciality("Dentist")
            .to_json(),
    ])
}
