/// A single operator notification, consumed exactly once by the notifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    pub subject: String,
    pub body: String,
}

/// Message for a failed token exchange. The identity endpoint returns no
/// diagnostic body worth relaying, so only the status goes out.
pub fn auth_failure_notice(status: u16) -> NotificationMessage {
    let error_message = format!("Failed to obtain access token. Status code: {status}");
    NotificationMessage {
        subject: format!("Listing pipeline failed | status: {status}"),
        body: format!("Error: {error_message}"),
    }
}

/// Message for a failed listings fetch, carrying the raw response body
/// verbatim for diagnosis.
pub fn fetch_failure_notice(status: u16, response_body: &str) -> NotificationMessage {
    let error_message =
        format!("Failed to retrieve data from the animals endpoint. Status code: {status}");
    NotificationMessage {
        subject: format!("Listing pipeline failed | status: {status}"),
        body: format!("Error: {error_message}\n\nResponse Body: {response_body}"),
    }
}
