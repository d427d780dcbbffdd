//! Gallery Context
//!
//! Shared state provided via Leptos Context API, plus the user actions that
//! mutate it and start fetches.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::config::GalleryConfig;
use crate::error::FetchError;
use crate::page_state::{FetchOutcome, PageAction, PageState};

/// App-wide state provided via context
#[derive(Clone, Copy)]
pub struct GalleryContext {
    /// Read-only for the session
    pub config: StoredValue<GalleryConfig>,
    pub state: RwSignal<PageState>,
}

impl GalleryContext {
    pub fn new(config: GalleryConfig) -> Self {
        let state = RwSignal::new(PageState::new(config.page_size));
        Self {
            config: StoredValue::new(config),
            state,
        }
    }

    /// Fetch the current page unless a fetch is already in flight
    pub fn fetch_current_page(&self) {
        let ctx = *self;
        let Some(ticket) = self.state.try_update(|s| s.begin_fetch()).flatten() else {
            log::debug!("fetch skipped, request already in flight");
            return;
        };
        let request = self.state.with_untracked(|s| s.listing_request());
        let url = self.config.with_value(|config| api::listing_url(config, &request));
        log::info!("fetching page {} (search: {:?})", request.page, request.search);

        spawn_local(async move {
            match api::fetch_listing(&url).await {
                Ok(listing) => {
                    let outcome = ctx.state.try_update(|s| s.finish_fetch(ticket, listing));
                    match outcome {
                        Some(FetchOutcome::Applied { added }) => {
                            log::debug!("page {} returned {} artworks", request.page, added);
                        }
                        Some(FetchOutcome::Stale) => {
                            log::debug!("discarding response for superseded search");
                            ctx.fetch_current_page();
                        }
                        None => {}
                    }
                }
                Err(err) => {
                    log::error!("failed to fetch page {}: {}", request.page, err);
                    match ctx.state.try_update(|s| s.abort_fetch(ticket)) {
                        Some(FetchOutcome::Stale) => ctx.fetch_current_page(),
                        Some(FetchOutcome::Applied { .. }) => alert(&err),
                        None => {}
                    }
                }
            }
        });
    }

    pub fn next(&self) {
        match self.state.try_update(|s| s.next_page()).flatten() {
            Some(PageAction::Fetch) => self.fetch_current_page(),
            Some(PageAction::Render) => {
                log::debug!("page {} served from cache", self.state.with_untracked(|s| s.current_page()));
            }
            None => {}
        }
    }

    /// Request the current page again after a failed load
    pub fn retry(&self) {
        if self.state.with_untracked(|s| s.can_retry()) {
            self.fetch_current_page();
        }
    }

    pub fn previous(&self) {
        self.state.update(|s| {
            s.previous_page();
        });
    }

    /// Start a new search; the previous results are dropped
    pub fn search(&self, text: &str) {
        let dropped = self.state.try_update(|s| s.search(text)).unwrap_or_default();
        for url in dropped.iter().filter_map(|a| a.image.as_deref()) {
            api::revoke_image(url);
        }
        self.fetch_current_page();
    }
}

/// Blocking alert for listing failures
fn alert(err: &FetchError) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(&err.to_string());
    }
}

pub fn use_gallery() -> GalleryContext {
    expect_context::<GalleryContext>()
}
