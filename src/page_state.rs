//! Page State
//!
//! Pagination, search and caching rules for the gallery. Kept free of any
//! browser types so the rules can be tested natively; the components only
//! read from it and the context drives the fetches it asks for.
//!
//! Page `n` always shows the cached items `[(n - 1) * page_size, n * page_size)`.
//! Pages are fetched in order and appended, so the cache stays aligned with
//! the API's own paging as long as the page size never changes.

use crate::models::{Artwork, ListingResponse};

/// What a navigation step needs from the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    /// The cache already covers the page
    Render,
    /// The page must be fetched
    Fetch,
}

/// Handed out by `begin_fetch`, returned to `finish_fetch`/`abort_fetch`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

/// Result of applying a fetched page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Items were appended (possibly none)
    Applied { added: usize },
    /// A search happened while the request was in flight; refetch
    Stale,
}

/// Parameters of the listing request for the current page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRequest {
    pub page: u32,
    pub limit: usize,
    /// Empty means the plain listing endpoint
    pub search: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageState {
    current_page: u32,
    page_size: usize,
    search_text: String,
    is_fetching: bool,
    artworks: Vec<Artwork>,
    /// Last fetch returned a short page
    exhausted: bool,
    total_pages: Option<u32>,
    generation: u64,
}

impl PageState {
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
            search_text: String::new(),
            is_fetching: false,
            artworks: Vec::new(),
            exhausted: false,
            total_pages: None,
            generation: 0,
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn is_fetching(&self) -> bool {
        self.is_fetching
    }

    pub fn artworks(&self) -> &[Artwork] {
        &self.artworks
    }

    /// Cached image of the item at `index`, if it is still `id`
    pub fn image_of(&self, index: usize, id: u64) -> Option<String> {
        self.artworks
            .get(index)
            .filter(|a| a.id == id)
            .and_then(|a| a.image.clone())
    }

    pub fn total_pages(&self) -> Option<u32> {
        self.total_pages
    }

    /// Index of the first item of the current page
    pub fn offset(&self) -> usize {
        (self.current_page as usize - 1) * self.page_size
    }

    /// Cached items of the current page (short or empty past the end)
    pub fn visible(&self) -> &[Artwork] {
        let start = self.offset().min(self.artworks.len());
        let end = (start + self.page_size).min(self.artworks.len());
        &self.artworks[start..end]
    }

    /// Page is fully cached, or is the cached short page at the end
    fn covers(&self, page: u32) -> bool {
        let len = self.artworks.len();
        let end = page as usize * self.page_size;
        len >= end || (self.exhausted && len > end - self.page_size)
    }

    /// Current page is at or past the end of what the API has
    fn at_last_page(&self) -> bool {
        if let Some(total) = self.total_pages {
            if self.current_page >= total {
                return true;
            }
        }
        self.exhausted && !self.covers(self.current_page + 1)
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Next only moves on from a page that is actually cached; otherwise
    /// the cache would no longer line up with the API's pages.
    pub fn has_next(&self) -> bool {
        self.covers(self.current_page) && !self.at_last_page()
    }

    /// The current page failed to load and can be requested again
    pub fn can_retry(&self) -> bool {
        !self.is_fetching && !self.exhausted && !self.covers(self.current_page)
    }

    pub fn listing_request(&self) -> ListingRequest {
        ListingRequest {
            page: self.current_page,
            limit: self.page_size,
            search: self.search_text.clone(),
        }
    }

    /// Start a listing fetch; `None` if one is already in flight.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        if self.is_fetching {
            return None;
        }
        self.is_fetching = true;
        Some(FetchTicket { generation: self.generation })
    }

    pub fn finish_fetch(&mut self, ticket: FetchTicket, listing: ListingResponse) -> FetchOutcome {
        self.is_fetching = false;
        if ticket.generation != self.generation {
            return FetchOutcome::Stale;
        }

        let added = listing.data.len();
        self.artworks.extend(listing.data.into_iter().map(Artwork::from));
        self.exhausted = added < self.page_size;
        if let Some(total) = listing.pagination.and_then(|p| p.total_pages) {
            self.total_pages = Some(total);
        }
        FetchOutcome::Applied { added }
    }

    /// A fetch failed. Falls back to the last fully cached page when the
    /// failed page was reached by navigating forward. Returns `Stale` if a
    /// search superseded the request.
    pub fn abort_fetch(&mut self, ticket: FetchTicket) -> FetchOutcome {
        self.is_fetching = false;
        if ticket.generation != self.generation {
            return FetchOutcome::Stale;
        }
        while self.current_page > 1 && !self.covers(self.current_page) {
            self.current_page -= 1;
        }
        FetchOutcome::Applied { added: 0 }
    }

    /// Move forward one page. `None` if the move is not allowed right now.
    pub fn next_page(&mut self) -> Option<PageAction> {
        if self.is_fetching || !self.has_next() {
            return None;
        }
        self.current_page += 1;
        if self.covers(self.current_page) {
            Some(PageAction::Render)
        } else {
            Some(PageAction::Fetch)
        }
    }

    /// Move back one page. Earlier pages are always cached.
    pub fn previous_page(&mut self) -> bool {
        if self.is_fetching || !self.has_previous() {
            return false;
        }
        self.current_page -= 1;
        true
    }

    /// Reset to page 1 of a new search, returning the dropped items.
    pub fn search(&mut self, text: &str) -> Vec<Artwork> {
        self.current_page = 1;
        self.search_text = text.trim().to_string();
        self.exhausted = false;
        self.total_pages = None;
        self.generation += 1;
        std::mem::take(&mut self.artworks)
    }

    /// Store the object URL of the item at `index` in the cache.
    /// Returns false if the item is gone (dropped by a search) or already
    /// has an image; the caller owns `url` in that case.
    pub fn set_image(&mut self, index: usize, id: u64, url: String) -> bool {
        match self.artworks.get_mut(index) {
            Some(artwork) if artwork.id == id && artwork.image.is_none() => {
                artwork.image = Some(url);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArtworkRecord, Pagination};

    fn record(id: u64) -> ArtworkRecord {
        ArtworkRecord {
            id,
            title: Some(format!("Artwork {}", id)),
            artist_display: None,
            date_display: None,
            thumbnail: None,
            image_id: Some(format!("img-{}", id)),
        }
    }

    fn listing(ids: std::ops::Range<u64>) -> ListingResponse {
        ListingResponse {
            data: ids.map(record).collect(),
            pagination: None,
        }
    }

    /// Fetch the current page, serving ids sequentially like the API would
    fn fetch_page(state: &mut PageState, count: usize) -> FetchOutcome {
        let ticket = state.begin_fetch().unwrap();
        let start = state.artworks().len() as u64;
        state.finish_fetch(ticket, listing(start..start + count as u64))
    }

    fn visible_ids(state: &PageState) -> Vec<u64> {
        state.visible().iter().map(|a| a.id).collect()
    }

    #[test]
    fn test_initial_state() {
        let state = PageState::new(6);
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.offset(), 0);
        assert!(state.visible().is_empty());
        assert!(!state.has_previous());
        assert_eq!(
            state.listing_request(),
            ListingRequest { page: 1, limit: 6, search: String::new() }
        );
    }

    #[test]
    fn test_visible_slice_matches_page_range() {
        let mut state = PageState::new(3);
        fetch_page(&mut state, 3);
        for _ in 0..3 {
            assert_eq!(state.next_page(), Some(PageAction::Fetch));
            fetch_page(&mut state, 3);
        }
        assert_eq!(state.artworks().len(), 12);

        for page in (1..=4).rev() {
            assert_eq!(state.current_page(), page);
            let start = (page as u64 - 1) * 3;
            assert_eq!(visible_ids(&state), (start..start + 3).collect::<Vec<_>>());
            state.previous_page();
        }
    }

    #[test]
    fn test_navigation_within_cache_never_fetches() {
        let mut state = PageState::new(2);
        fetch_page(&mut state, 2);
        assert_eq!(state.next_page(), Some(PageAction::Fetch));
        fetch_page(&mut state, 2);
        assert_eq!(state.next_page(), Some(PageAction::Fetch));
        fetch_page(&mut state, 2);

        for _ in 0..5 {
            assert!(state.previous_page());
            assert!(state.previous_page());
            assert_eq!(state.next_page(), Some(PageAction::Render));
            assert_eq!(state.next_page(), Some(PageAction::Render));
        }
        assert_eq!(state.current_page(), 3);
        assert_eq!(state.artworks().len(), 6);
    }

    #[test]
    fn test_previous_refused_on_first_page() {
        let mut state = PageState::new(6);
        fetch_page(&mut state, 6);
        assert!(!state.previous_page());
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn test_in_flight_guard() {
        let mut state = PageState::new(6);
        let ticket = state.begin_fetch().unwrap();
        assert!(state.is_fetching());
        assert!(state.begin_fetch().is_none());
        assert_eq!(state.next_page(), None);
        assert!(!state.previous_page());

        state.finish_fetch(ticket, listing(0..6));
        assert!(!state.is_fetching());
        assert!(state.begin_fetch().is_some());
    }

    #[test]
    fn test_search_resets_page_and_cache() {
        let mut state = PageState::new(2);
        fetch_page(&mut state, 2);
        state.next_page();
        fetch_page(&mut state, 2);
        assert_eq!(state.current_page(), 2);

        let dropped = state.search("  monet ");
        assert_eq!(dropped.len(), 4);
        assert_eq!(state.current_page(), 1);
        assert!(state.artworks().is_empty());
        assert_eq!(state.search_text(), "monet");
        assert_eq!(state.listing_request().search, "monet");
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut state = PageState::new(2);
        let old = state.begin_fetch().unwrap();
        state.search("cats");

        assert_eq!(state.finish_fetch(old, listing(0..2)), FetchOutcome::Stale);
        assert!(state.artworks().is_empty());
        assert!(!state.is_fetching());

        assert_eq!(fetch_page(&mut state, 2), FetchOutcome::Applied { added: 2 });
        assert_eq!(state.artworks().len(), 2);
    }

    #[test]
    fn test_short_page_ends_pagination() {
        let mut state = PageState::new(4);
        fetch_page(&mut state, 4);
        assert!(state.has_next());
        state.next_page();
        fetch_page(&mut state, 1);

        assert_eq!(visible_ids(&state), vec![4]);
        assert!(!state.has_next());
        assert_eq!(state.next_page(), None);

        // Earlier pages can still move forward to the short one
        assert!(state.previous_page());
        assert!(state.has_next());
        assert_eq!(state.next_page(), Some(PageAction::Render));
        assert_eq!(state.artworks().len(), 5);
    }

    #[test]
    fn test_empty_page_shows_nothing() {
        let mut state = PageState::new(3);
        fetch_page(&mut state, 3);
        state.next_page();
        assert_eq!(fetch_page(&mut state, 0), FetchOutcome::Applied { added: 0 });
        assert!(state.visible().is_empty());
        assert!(!state.has_next());
        assert!(state.has_previous());
    }

    #[test]
    fn test_total_pages_limits_next() {
        let mut state = PageState::new(2);
        let ticket = state.begin_fetch().unwrap();
        let mut page = listing(0..2);
        page.pagination = Some(Pagination { total_pages: Some(2) });
        state.finish_fetch(ticket, page);

        assert!(state.has_next());
        state.next_page();
        fetch_page(&mut state, 2);
        assert!(!state.has_next());
        assert_eq!(state.next_page(), None);
    }

    #[test]
    fn test_abort_rolls_back_to_cached_page() {
        let mut state = PageState::new(3);
        fetch_page(&mut state, 3);
        assert_eq!(state.next_page(), Some(PageAction::Fetch));
        let ticket = state.begin_fetch().unwrap();
        assert_eq!(state.abort_fetch(ticket), FetchOutcome::Applied { added: 0 });

        assert!(!state.is_fetching());
        assert_eq!(state.current_page(), 1);
        assert_eq!(visible_ids(&state), vec![0, 1, 2]);
    }

    #[test]
    fn test_abort_on_first_page_stays() {
        let mut state = PageState::new(3);
        let ticket = state.begin_fetch().unwrap();
        state.abort_fetch(ticket);
        assert_eq!(state.current_page(), 1);
        assert!(state.begin_fetch().is_some());
    }

    #[test]
    fn test_next_refused_after_failed_first_page() {
        let mut state = PageState::new(3);
        let ticket = state.begin_fetch().unwrap();
        state.abort_fetch(ticket);

        assert!(!state.has_next());
        assert_eq!(state.next_page(), None);
        assert!(state.can_retry());
        assert_eq!(state.listing_request().page, 1);

        // Retrying page 1 keeps the cache aligned with the API's pages
        fetch_page(&mut state, 3);
        assert!(!state.can_retry());
        assert_eq!(visible_ids(&state), vec![0, 1, 2]);
        assert_eq!(state.next_page(), Some(PageAction::Fetch));
        assert_eq!(state.listing_request().page, 2);
    }

    #[test]
    fn test_empty_last_page_is_not_retried() {
        let mut state = PageState::new(3);
        fetch_page(&mut state, 3);
        state.next_page();
        fetch_page(&mut state, 0);
        assert!(!state.can_retry());
    }

    #[test]
    fn test_abort_after_search_is_stale() {
        let mut state = PageState::new(3);
        let ticket = state.begin_fetch().unwrap();
        state.search("dogs");
        assert_eq!(state.abort_fetch(ticket), FetchOutcome::Stale);
        assert!(!state.is_fetching());
    }

    #[test]
    fn test_set_image() {
        let mut state = PageState::new(2);
        fetch_page(&mut state, 2);
        assert!(state.set_image(1, 1, "blob:one".to_string()));
        assert_eq!(state.artworks()[1].image.as_deref(), Some("blob:one"));
        assert!(!state.set_image(1, 1, "blob:again".to_string()));
        assert_eq!(state.artworks()[1].image.as_deref(), Some("blob:one"));

        // Index reused by a different search
        state.search("x");
        fetch_page(&mut state, 2);
        assert!(!state.set_image(1, 99, "blob:old".to_string()));
        assert!(state.artworks()[1].image.is_none());
    }
}
