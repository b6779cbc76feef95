use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::config::Credentials;

/// Short-lived bearer token, good for one listings fetch. The secret is
/// only ever read when building the authorization header.
#[derive(Clone, Debug)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("identity endpoint returned status {0}")]
    Status(u16),
    #[error("identity request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Exchanges service credentials for a bearer token.
#[async_trait]
pub trait TokenAcquirer: Send + Sync {
    async fn acquire(&self, credentials: &Credentials) -> Result<AccessToken, AuthError>;
}

/// Client-credentials grant against the Petfinder identity endpoint.
pub struct PetfinderTokenAcquirer {
    client: reqwest::Client,
    api_base: String,
}

impl PetfinderTokenAcquirer {
    pub fn new(client: reqwest::Client, api_base: impl Into<String>) -> Self {
        Self {
            client,
            api_base: api_base.into(),
        }
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[async_trait]
impl TokenAcquirer for PetfinderTokenAcquirer {
    async fn acquire(&self, credentials: &Credentials) -> Result<AccessToken, AuthError> {
        let url = format!("{}/oauth2/token", self.api_base.trim_end_matches('/'));
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
        ];

        let response = self.client.post(&url).form(&params).send().await?;
        let status = response.status();
        if !status.is_success() {
            // Fail fast; no retry within a run.
            return Err(AuthError::Status(status.as_u16()));
        }

        let token: TokenResponse = response.json().await?;
        Ok(AccessToken::new(token.access_token))
    }
}
