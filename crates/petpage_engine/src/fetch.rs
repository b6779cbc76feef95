use async_trait::async_trait;
use thiserror::Error;

use crate::auth::AccessToken;

#[derive(Debug, Error)]
pub enum FetchError {
    /// Non-success status from the listings endpoint. The raw response body
    /// is retained for the failure email.
    #[error("listings endpoint returned status {status}")]
    Status { status: u16, body: String },
    #[error("listings request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Retrieves the raw listings body for one organization.
#[async_trait]
pub trait ListingFetcher: Send + Sync {
    async fn fetch(
        &self,
        organization_id: &str,
        token: &AccessToken,
    ) -> Result<String, FetchError>;
}

/// Bearer-authorized single-page read of the animals endpoint. If the
/// upstream paginates, only the first page is observed.
pub struct ReqwestListingFetcher {
    client: reqwest::Client,
    api_base: String,
}

impl ReqwestListingFetcher {
    pub fn new(client: reqwest::Client, api_base: impl Into<String>) -> Self {
        Self {
            client,
            api_base: api_base.into(),
        }
    }
}

#[async_trait]
impl ListingFetcher for ReqwestListingFetcher {
    async fn fetch(
        &self,
        organization_id: &str,
        token: &AccessToken,
    ) -> Result<String, FetchError> {
        let url = format!(
            "{}/animals?organization={}",
            self.api_base.trim_end_matches('/'),
            organization_id
        );

        let response = self
            .client
            .get(&url)
            .bearer_auth(token.secret())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}
