//! Gallery App
//!
//! Root component: provides the gallery context and starts the first fetch.

use leptos::prelude::*;

use crate::components::{ArtworkList, Loader, Pager, SearchBar};
use crate::config::GalleryConfig;
use crate::context::GalleryContext;

#[component]
pub fn App(config: GalleryConfig) -> impl IntoView {
    let initial_search = config.initial_search.clone();
    let ctx = GalleryContext::new(config);
    provide_context(ctx);

    // First page: a plain listing, or the search given in the URL
    match initial_search {
        Some(text) => ctx.search(&text),
        None => ctx.fetch_current_page(),
    }

    view! {
        <main class="gallery">
            <header class="gallery__header">
                <h1>"Art Institute of Chicago"</h1>
                <SearchBar />
            </header>
            <Loader />
            <ArtworkList />
            <Pager />
        </main>
    }
}
