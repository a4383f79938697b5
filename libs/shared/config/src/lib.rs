use std::env;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_DOCTORS_API_URL: &str =
    "https://srijandubey.github.io/campus-api-mock/SRM-C1-25.json";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub doctors_api_url: String,
    pub doctors_api_timeout_secs: u64,
    pub suggestion_limit: usize,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            doctors_api_url: DEFAULT_DOCTORS_API_URL.to_string(),
            doctors_api_timeout_secs: 10,
            suggestion_limit: 3,
            port: 3000,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let config = Self {
            doctors_api_url: env::var("DOCTORS_API_URL")
                .unwrap_or_else(|_| {
                    warn!("DOCTORS_API_URL not set, using default feed");
                    defaults.doctors_api_url.clone()
                }),
            doctors_api_timeout_secs: parse_var("DOCTORS_API_TIMEOUT_SECS", defaults.doctors_api_timeout_secs),
            suggestion_limit: parse_var("SUGGESTION_LIMIT", defaults.suggestion_limit),
            port: parse_var("PORT", defaults.port),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - doctor feed URL is empty");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.doctors_api_url.trim().is_empty()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.doctors_api_timeout_secs)
    }
}

fn parse_var<T>(name: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display + Copy,
{
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has invalid value '{}', using default {}", name, raw, default);
            default
        }),
        Err(_) => {
            warn!("{} not set, using default {}", name, default);
            default
        }
    }
}
