use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use petpage_core::NotificationMessage;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("email endpoint returned status {0}")]
    Status(u16),
    #[error("email request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Sends one plain-text operator email.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &NotificationMessage) -> Result<(), NotifyError>;
}

/// Transactional email client: one POST per message, fixed sender and
/// single recipient, sender doubles as reply-to. No attachments, no HTML
/// body.
pub struct EmailClient {
    client: reqwest::Client,
    endpoint: String,
    server_token: String,
    sender: String,
    recipient: String,
}

impl EmailClient {
    pub fn new(
        client: reqwest::Client,
        endpoint: impl Into<String>,
        server_token: impl Into<String>,
        sender: impl Into<String>,
        recipient: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            server_token: server_token.into(),
            sender: sender.into(),
            recipient: recipient.into(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    reply_to: &'a str,
    subject: &'a str,
    text_body: &'a str,
}

#[async_trait]
impl Notifier for EmailClient {
    async fn notify(&self, message: &NotificationMessage) -> Result<(), NotifyError> {
        let url = format!("{}/email", self.endpoint.trim_end_matches('/'));
        let body = SendEmailRequest {
            from: &self.sender,
            to: &self.recipient,
            reply_to: &self.sender,
            subject: &message.subject,
            text_body: &message.body,
        };

        let response = self
            .client
            .post(&url)
            .header("X-Server-Token", &self.server_token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Status(status.as_u16()));
        }
        Ok(())
    }
}
