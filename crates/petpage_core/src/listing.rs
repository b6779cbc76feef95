use serde::Deserialize;
use thiserror::Error;

/// Sentinel photo value for animals the API lists without a cropped photo.
pub const PHOTO_UNAVAILABLE: &str = "Photo not available";

/// Listings response body, as returned by the animals endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingsPayload {
    pub animals: Vec<ListedAnimal>,
}

/// One animal as the API lists it. Only the fields the page needs are
/// modelled; the photo is optional at both nesting levels.
#[derive(Debug, Clone, Deserialize)]
pub struct ListedAnimal {
    pub name: String,
    #[serde(default)]
    pub primary_photo_cropped: Option<CroppedPhoto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CroppedPhoto {
    #[serde(default)]
    pub small: Option<String>,
}

/// Display model for one animal block on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimalRecord {
    pub name: String,
    pub photo_url: String,
}

#[derive(Debug, Error)]
#[error("malformed listings payload: {0}")]
pub struct ExtractError(#[from] serde_json::Error);

/// Normalize the raw listings body into display records.
///
/// Order-preserving, no deduplication, no filtering. A record without a
/// "small" cropped photo gets [`PHOTO_UNAVAILABLE`] as its photo value; a
/// record without a name makes the whole payload malformed.
pub fn extract(raw: &str) -> Result<Vec<AnimalRecord>, ExtractError> {
    let payload: ListingsPayload = serde_json::from_str(raw)?;
    let records = payload
        .animals
        .into_iter()
        .map(|animal| AnimalRecord {
            photo_url: animal
                .primary_photo_cropped
                .and_then(|photo| photo.small)
                .unwrap_or_else(|| PHOTO_UNAVAILABLE.to_string()),
            name: animal.name,
        })
        .collect();
    Ok(records)
}
