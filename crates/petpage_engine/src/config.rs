use std::env;

use thiserror::Error;

/// Built-in production API base; `PETFINDER_API_URL` overrides it.
pub const PETFINDER_API_URL: &str = "https://api.petfinder.com/v2";

/// Service credentials for the identity endpoint, plus the organization the
/// listings are scoped to.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub organization_id: String,
}

/// Full run configuration, read once at startup and passed by reference
/// into each component.
#[derive(Debug, Clone)]
pub struct Config {
    pub storage_bucket: String,
    pub credentials: Credentials,
    pub default_image_url: String,
    /// Adoption form URL up to and including its query parameter.
    pub adoption_form_url: String,
    pub recipient_email: String,
    pub sender_email: String,
    pub api_base: String,
    pub storage_endpoint: String,
    pub email_endpoint: String,
    pub email_api_token: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
}

impl Config {
    /// Read the configuration from the environment. Every variable is
    /// required except `PETFINDER_API_URL`, which falls back to the
    /// production API base.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            storage_bucket: required("BUCKET")?,
            credentials: Credentials {
                client_id: required("CLIENT")?,
                client_secret: required("SECRET")?,
                organization_id: required("ORG")?,
            },
            default_image_url: required("IMG")?,
            adoption_form_url: required("FORM")?,
            recipient_email: required("RECIPIENT_EMAIL")?,
            sender_email: required("SENDER_EMAIL")?,
            api_base: env::var("PETFINDER_API_URL")
                .unwrap_or_else(|_| PETFINDER_API_URL.to_string()),
            storage_endpoint: required("STORAGE_ENDPOINT")?,
            email_endpoint: required("EMAIL_ENDPOINT")?,
            email_api_token: required("EMAIL_API_TOKEN")?,
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::Missing(name))
}
