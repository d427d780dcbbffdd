//! Search Bar Component
//!
//! Search input and button. Submitting the form (button or Enter) starts a
//! new search from page 1; an empty query returns to the plain listing.

use leptos::prelude::*;

use crate::context::use_gallery;

#[component]
pub fn SearchBar() -> impl IntoView {
    let ctx = use_gallery();
    let initial = ctx.state.with_untracked(|s| s.search_text().to_string());
    let (query, set_query) = signal(initial);
    let fetching = Memo::new(move |_| ctx.state.with(|s| s.is_fetching()));

    let on_search = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        ctx.search(&query.get_untracked());
    };

    view! {
        <form class="search-bar" on:submit=on_search>
            <input
                id="searchInput"
                type="search"
                placeholder="Search artworks..."
                prop:value=move || query.get()
                on:input=move |ev| set_query.set(event_target_value(&ev))
            />
            <button id="searchBtn" type="submit" disabled=move || fetching.get()>
                "Search"
            </button>
        </form>
    }
}
