//! Petpage core: pure listing extraction, page rendering and run reporting.
mod listing;
mod notice;
mod render;
mod run;

pub use listing::{
    extract, AnimalRecord, CroppedPhoto, ExtractError, ListedAnimal, ListingsPayload,
    PHOTO_UNAVAILABLE,
};
pub use notice::{auth_failure_notice, fetch_failure_notice, NotificationMessage};
pub use render::{adoption_link, render, RenderOptions};
pub use run::{RunReport, RunStage};
