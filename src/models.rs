//! Gallery Models
//!
//! Wire types of the collection API and the cached artwork item.

use serde::Deserialize;

/// Text shown for missing metadata
pub const UNAVAILABLE: &str = "Unavailable";

/// Listing/search response body
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ListingResponse {
    pub data: Vec<ArtworkRecord>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Pagination block returned next to `data`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub total_pages: Option<u32>,
}

/// One artwork as returned by the API (only the requested fields)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ArtworkRecord {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist_display: Option<String>,
    #[serde(default)]
    pub date_display: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
    #[serde(default)]
    pub image_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Thumbnail {
    #[serde(default)]
    pub alt_text: Option<String>,
}

/// Cached artwork item
///
/// Immutable once built, except `image` which is filled the first time the
/// image is fetched successfully.
#[derive(Debug, Clone, PartialEq)]
pub struct Artwork {
    pub id: u64,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub date: Option<String>,
    pub alt_text: String,
    pub image_id: Option<String>,
    /// Object URL of the fetched image
    pub image: Option<String>,
}

impl Artwork {
    pub fn title_text(&self) -> &str {
        display_or_unavailable(&self.title)
    }

    pub fn artist_text(&self) -> &str {
        display_or_unavailable(&self.artist)
    }

    pub fn date_text(&self) -> &str {
        display_or_unavailable(&self.date)
    }
}

impl From<ArtworkRecord> for Artwork {
    fn from(record: ArtworkRecord) -> Self {
        let alt_text = record
            .thumbnail
            .and_then(|t| t.alt_text)
            .or_else(|| record.title.clone())
            .unwrap_or_default();
        Self {
            id: record.id,
            title: record.title,
            artist: record.artist_display,
            date: record.date_display,
            alt_text,
            image_id: record.image_id.filter(|id| !id.is_empty()),
            image: None,
        }
    }
}

fn display_or_unavailable(value: &Option<String>) -> &str {
    match value.as_deref() {
        Some(text) if !text.trim().is_empty() => text,
        _ => UNAVAILABLE,
    }
}
