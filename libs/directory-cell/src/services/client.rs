use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client};
use serde_json::Value;
use tracing::{debug, error, warn};

use shared_config::AppConfig;

use crate::models::{DirectoryError, Doctor};

/// Anything that can produce the doctor list in one attempt.
#[async_trait]
pub trait DoctorSource: Send + Sync {
    async fn fetch_doctors(&self) -> Result<Vec<Doctor>, DirectoryError>;
}

/// Reads the doctor list from the public JSON feed.
pub struct DoctorFeedClient {
    client: Client,
    feed_url: String,
}

impl DoctorFeedClient {
    pub fn new(config: &AppConfig) -> Self {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build HTTP client with timeout, using defaults: {}", e);
                Client::new()
            });

        Self {
            client,
            feed_url: config.doctors_api_url.clone(),
        }
    }

    pub fn feed_url(&self) -> &str {
        &self.feed_url
    }
}

#[async_trait]
impl DoctorSource for DoctorFeedClient {
    async fn fetch_doctors(&self) -> Result<Vec<Doctor>, DirectoryError> {
        debug!("Fetching doctors from {}", self.feed_url);

        let response = self
            .client
            .get(&self.feed_url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Doctor feed error ({}): {}", status, body);
            return Err(DirectoryError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let payload = response
            .json::<Value>()
            .await
            .map_err(|e| DirectoryError::MalformedPayload(e.to_string()))?;

        parse_doctors(payload)
    }
}

/// Shape guard over the raw feed payload. The payload must be an array;
/// elements that do not decode as a doctor are skipped.
pub fn parse_doctors(payload: Value) -> Result<Vec<Doctor>, DirectoryError> {
    let Value::Array(items) = payload else {
        return Err(DirectoryError::MalformedPayload(
            "expected a JSON array of doctors".to_string(),
        ));
    };

    let total = items.len();
    let doctors: Vec<Doctor> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<Doctor>(item) {
            Ok(doctor) => Some(doctor),
            Err(e) => {
                warn!("Skipping malformed doctor record at index {}: {}", index, e);
                None
            }
        })
        .collect();

    debug!("Decoded {} of {} doctor records", doctors.len(), total);
    Ok(doctors)
}

/// Single-attempt load that never fails: errors are logged and collapse to
/// an empty list. Use [`DoctorSource::fetch_doctors`] directly to tell an
/// empty feed apart from a failed one.
pub async fn load_doctors(source: &dyn DoctorSource) -> Vec<Doctor> {
    match source.fetch_doctors().await {
        Ok(doctors) => doctors,
        Err(e) => {
            error!("Error fetching doctors: {}", e);
            Vec::new()
        }
    }
}
