use chrono::{DateTime, Local};
use log::{error, info};
use thiserror::Error;

use petpage_core::{
    auth_failure_notice, extract, fetch_failure_notice, render, ExtractError, RenderOptions,
    RunReport, RunStage,
};

use crate::auth::{AuthError, TokenAcquirer};
use crate::config::Config;
use crate::fetch::{FetchError, ListingFetcher};
use crate::notify::{Notifier, NotifyError};
use crate::publish::{PublishError, Publisher, OBJECT_KEY};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),
    #[error("listing fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("listing extraction failed: {0}")]
    Extract(#[from] ExtractError),
    #[error("publish failed: {0}")]
    Publish(#[from] PublishError),
    #[error("failure notification could not be sent: {0}")]
    Notify(#[from] NotifyError),
}

/// Drive one full run: authenticate, fetch, extract, render, publish.
///
/// An auth or fetch rejection carrying an upstream status code sends exactly
/// one operator email before the error propagates. Every other failure
/// propagates without notification and is left to the invoking environment.
/// A completed run sends nothing and returns its report.
pub async fn run(
    config: &Config,
    run_time: DateTime<Local>,
    tokens: &dyn TokenAcquirer,
    listings: &dyn ListingFetcher,
    publisher: &dyn Publisher,
    notifier: &dyn Notifier,
) -> Result<RunReport, PipelineError> {
    info!("stage: {}", RunStage::Authenticating);
    let token = match tokens.acquire(&config.credentials).await {
        Ok(token) => token,
        Err(err) => {
            if let AuthError::Status(status) = err {
                error!("token exchange rejected with status {status}");
                notifier.notify(&auth_failure_notice(status)).await?;
            }
            return Err(err.into());
        }
    };

    info!("stage: {}", RunStage::Fetching);
    let raw = match listings
        .fetch(&config.credentials.organization_id, &token)
        .await
    {
        Ok(raw) => raw,
        Err(err) => {
            if let FetchError::Status { status, body } = &err {
                error!("listings fetch rejected with status {status}");
                notifier.notify(&fetch_failure_notice(*status, body)).await?;
            }
            return Err(err.into());
        }
    };

    info!("stage: {}", RunStage::Extracting);
    let records = extract(&raw)?;

    info!("stage: {}", RunStage::Rendering);
    let options = RenderOptions {
        adoption_form_url: config.adoption_form_url.clone(),
        default_image_url: config.default_image_url.clone(),
    };
    let page = render(&records, run_time, &options);

    info!("stage: {}", RunStage::Publishing);
    publisher.publish(&page).await?;

    info!("run complete: {} animals", records.len());
    Ok(RunReport {
        animal_count: records.len(),
        object_key: OBJECT_KEY.to_string(),
    })
}
