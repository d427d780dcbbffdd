//! Gallery Configuration
//!
//! Endpoints and paging defaults, optionally overridden from the page's
//! query string (`?page_size=12&q=monet&log=debug`).

use log::LevelFilter;
use percent_encoding::percent_decode_str;

/// Largest `limit` the collection API accepts
pub const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct GalleryConfig {
    /// Base of the listing/search endpoints
    pub api_base: String,
    /// Base of the IIIF image endpoint
    pub image_base: String,
    /// Items per page, constant for the session
    pub page_size: usize,
    /// Requested image width in pixels
    pub image_width: u32,
    /// Search issued on startup instead of the plain listing
    pub initial_search: Option<String>,
    pub log_level: LevelFilter,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.artic.edu/api/v1/artworks".to_string(),
            image_base: "https://www.artic.edu/iiif/2".to_string(),
            page_size: 6,
            image_width: 843,
            initial_search: None,
            log_level: LevelFilter::Info,
        }
    }
}

impl GalleryConfig {
    /// Build from a query string, with or without the leading `?`.
    /// Unknown keys and unparsable values are ignored.
    pub fn from_query(query: &str) -> Self {
        let mut config = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = decode_component(value);
            match key {
                "page_size" => {
                    if let Ok(size) = value.trim().parse::<usize>() {
                        config.page_size = size.clamp(1, MAX_PAGE_SIZE);
                    }
                }
                "q" => {
                    let text = value.trim();
                    config.initial_search = (!text.is_empty()).then(|| text.to_string());
                }
                "log" => {
                    if let Some(level) = console_logger::parse_level(&value) {
                        config.log_level = level;
                    }
                }
                _ => {}
            }
        }
        config
    }

    /// Read the current page's query string; defaults if unavailable.
    pub fn from_location() -> Self {
        let query = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        Self::from_query(&query)
    }
}

fn decode_component(value: &str) -> String {
    let value = value.replace('+', " ");
    percent_decode_str(&value).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GalleryConfig::from_query("");
        assert_eq!(config, GalleryConfig::default());
        assert_eq!(config.page_size, 6);
    }

    #[test]
    fn test_overrides() {
        let config = GalleryConfig::from_query("?page_size=12&q=water+lilies&log=debug");
        assert_eq!(config.page_size, 12);
        assert_eq!(config.initial_search.as_deref(), Some("water lilies"));
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_page_size_is_clamped() {
        assert_eq!(GalleryConfig::from_query("page_size=0").page_size, 1);
        assert_eq!(GalleryConfig::from_query("page_size=500").page_size, MAX_PAGE_SIZE);
        assert_eq!(GalleryConfig::from_query("page_size=abc").page_size, 6);
    }

    #[test]
    fn test_percent_decoding_and_blank_search() {
        let config = GalleryConfig::from_query("q=Caf%C3%A9%20Terrace");
        assert_eq!(config.initial_search.as_deref(), Some("Café Terrace"));
        assert!(GalleryConfig::from_query("q=%20%20").initial_search.is_none());
        assert!(GalleryConfig::from_query("q").initial_search.is_none());
    }
}
