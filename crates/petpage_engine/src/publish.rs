use async_trait::async_trait;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use thiserror::Error;

/// Fixed object key the page is served from; overwritten on every run.
pub const OBJECT_KEY: &str = "animals.html";

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("object store returned status {0}")]
    Status(u16),
    #[error("object store request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Uploads the rendered page to durable public storage.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, page: &str) -> Result<(), PublishError>;
}

/// Full-object replace at `{endpoint}/{bucket}/animals.html`. The inline
/// disposition makes browsers render the page instead of downloading it.
pub struct ObjectStorePublisher {
    client: reqwest::Client,
    endpoint: String,
    bucket: String,
}

impl ObjectStorePublisher {
    pub fn new(
        client: reqwest::Client,
        endpoint: impl Into<String>,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            bucket: bucket.into(),
        }
    }

    fn object_url(&self) -> String {
        format!(
            "{}/{}/{}",
            self.endpoint.trim_end_matches('/'),
            self.bucket,
            OBJECT_KEY
        )
    }
}

#[async_trait]
impl Publisher for ObjectStorePublisher {
    async fn publish(&self, page: &str) -> Result<(), PublishError> {
        let response = self
            .client
            .put(self.object_url())
            .header(CONTENT_TYPE, "text/html")
            .header(CONTENT_DISPOSITION, "inline")
            .body(page.to_owned().into_bytes())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PublishError::Status(status.as_u16()));
        }
        Ok(())
    }
}
