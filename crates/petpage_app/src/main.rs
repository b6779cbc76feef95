//! Headless entry point: one pipeline run per invocation, exit code for the
//! scheduler. No CLI surface.

use chrono::Local;
use log::{error, info};
use pipeline_logging::LogDestination;

use petpage_engine::{
    run, Config, EmailClient, ObjectStorePublisher, PetfinderTokenAcquirer, ReqwestListingFetcher,
};

fn main() {
    pipeline_logging::initialize(LogDestination::Terminal);

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("configuration error: {err}");
            std::process::exit(2);
        }
    };

    let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
    let report = runtime.block_on(async {
        let http = reqwest::Client::new();
        let tokens = PetfinderTokenAcquirer::new(http.clone(), config.api_base.clone());
        let listings = ReqwestListingFetcher::new(http.clone(), config.api_base.clone());
        let publisher = ObjectStorePublisher::new(
            http.clone(),
            config.storage_endpoint.clone(),
            config.storage_bucket.clone(),
        );
        let notifier = EmailClient::new(
            http,
            config.email_endpoint.clone(),
            config.email_api_token.clone(),
            config.sender_email.clone(),
            config.recipient_email.clone(),
        );

        run(
            &config,
            Local::now(),
            &tokens,
            &listings,
            &publisher,
            &notifier,
        )
        .await
    });

    match report {
        Ok(report) => {
            info!(
                "published {} with {} animals",
                report.object_key, report.animal_count
            );
        }
        Err(err) => {
            error!("run failed: {err}");
            std::process::exit(1);
        }
    }
}
