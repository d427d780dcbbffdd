//! Artwork List Component
//!
//! Renders the current page's slice of the cache. Cleared while a listing
//! fetch is in flight.

use leptos::prelude::*;

use crate::components::ArtworkCard;
use crate::context::use_gallery;
use crate::models::Artwork;

#[component]
pub fn ArtworkList() -> impl IntoView {
    let ctx = use_gallery();
    let state = ctx.state;

    let fetching = Memo::new(move |_| state.with(|s| s.is_fetching()));
    let empty = Memo::new(move |_| state.with(|s| s.visible().is_empty()));

    // (cache index, artwork) pairs of the current page
    let page_items = move || -> Vec<(usize, Artwork)> {
        state.with(|s| {
            let offset = s.offset();
            s.visible()
                .iter()
                .cloned()
                .enumerate()
                .map(|(i, artwork)| (offset + i, artwork))
                .collect()
        })
    };

    view! {
        <div id="artworkList" class="artwork-list">
            <Show when=move || !fetching.get()>
                <Show
                    when=move || !empty.get()
                    fallback=|| view! { <p class="artwork-list__empty">"No available artwork"</p> }
                >
                    <For
                        each=page_items
                        key=|(index, artwork)| (*index, artwork.id)
                        children=move |(index, artwork)| view! { <ArtworkCard index=index artwork=artwork /> }
                    />
                </Show>
            </Show>
        </div>
    }
}
