//! Collection API
//!
//! Browser `fetch` wrappers for the listing/search endpoints and the IIIF
//! image endpoint.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, Response, Url};

use crate::config::GalleryConfig;
use crate::error::FetchError;
use crate::models::ListingResponse;
use crate::page_state::ListingRequest;

/// Fields requested for every artwork
pub const FIELDS: &[&str] = &["id", "title", "artist_display", "date_display", "thumbnail", "image_id"];

// ========================
// URL Construction
// ========================

pub fn listing_url(config: &GalleryConfig, request: &ListingRequest) -> String {
    let fields = FIELDS.join(",");
    if request.search.is_empty() {
        format!(
            "{}?page={}&limit={}&fields={}",
            config.api_base, request.page, request.limit, fields
        )
    } else {
        format!(
            "{}/search?q={}&page={}&limit={}&fields={}",
            config.api_base,
            utf8_percent_encode(&request.search, NON_ALPHANUMERIC),
            request.page,
            request.limit,
            fields
        )
    }
}

pub fn image_url(config: &GalleryConfig, image_id: &str) -> String {
    format!(
        "{}/{}/full/{},/0/default.jpg",
        config.image_base, image_id, config.image_width
    )
}

pub fn parse_listing(body: &str) -> Result<ListingResponse, FetchError> {
    Ok(serde_json::from_str(body)?)
}

// ========================
// Requests
// ========================

async fn get(url: &str) -> Result<Response, FetchError> {
    let window = web_sys::window().ok_or(FetchError::NoWindow)?;
    let value = JsFuture::from(window.fetch_with_str(url)).await?;
    let response: Response = value.dyn_into()?;
    if !response.ok() {
        return Err(FetchError::Status(response.status()));
    }
    Ok(response)
}

/// Fetch one listing page
pub async fn fetch_listing(url: &str) -> Result<ListingResponse, FetchError> {
    let response = get(url).await?;
    let body = JsFuture::from(response.text()?).await?;
    let body = body
        .as_string()
        .ok_or_else(|| FetchError::Network("response body is not text".to_string()))?;
    parse_listing(&body)
}

/// Fetch an image and return an object URL for it.
///
/// The URL stays valid until passed to `revoke_image`.
pub async fn fetch_image(config: &GalleryConfig, image_id: &str) -> Result<String, FetchError> {
    let response = get(&image_url(config, image_id)).await?;
    let blob: Blob = JsFuture::from(response.blob()?).await?.dyn_into()?;
    Ok(Url::create_object_url_with_blob(&blob)?)
}

pub fn revoke_image(url: &str) {
    if let Err(err) = Url::revoke_object_url(url) {
        log::debug!("failed to revoke {}: {:?}", url, err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(page: u32, search: &str) -> ListingRequest {
        ListingRequest { page, limit: 6, search: search.to_string() }
    }

    #[test]
    fn test_listing_url() {
        let url = listing_url(&GalleryConfig::default(), &request(3, ""));
        assert_eq!(
            url,
            "https://api.artic.edu/api/v1/artworks?page=3&limit=6&fields=id,title,artist_display,date_display,thumbnail,image_id"
        );
    }

    #[test]
    fn test_search_url_is_encoded() {
        let url = listing_url(&GalleryConfig::default(), &request(1, "van gogh & co"));
        assert_eq!(
            url,
            "https://api.artic.edu/api/v1/artworks/search?q=van%20gogh%20%26%20co&page=1&limit=6&fields=id,title,artist_display,date_display,thumbnail,image_id"
        );
    }

    #[test]
    fn test_image_url() {
        let url = image_url(&GalleryConfig::default(), "abc-123");
        assert_eq!(url, "https://www.artic.edu/iiif/2/abc-123/full/843,/0/default.jpg");
    }

    #[test]
    fn test_parse_listing_errors() {
        assert!(matches!(parse_listing("not json"), Err(FetchError::Decode(_))));
        let listing = parse_listing(r#"{"data": []}"#).unwrap();
        assert!(listing.data.is_empty());
        assert!(listing.pagination.is_none());
    }
}
