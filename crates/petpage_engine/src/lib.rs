//! Petpage engine: remote contracts and the pipeline driver.
mod auth;
mod config;
mod fetch;
mod notify;
mod pipeline;
mod publish;

pub use auth::{AccessToken, AuthError, PetfinderTokenAcquirer, TokenAcquirer};
pub use config::{Config, ConfigError, Credentials, PETFINDER_API_URL};
pub use fetch::{FetchError, ListingFetcher, ReqwestListingFetcher};
pub use notify::{EmailClient, Notifier, NotifyError};
pub use pipeline::{run, PipelineError};
pub use publish::{ObjectStorePublisher, Publisher, PublishError, OBJECT_KEY};
