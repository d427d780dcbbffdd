//! Pager Component
//!
//! Previous/next buttons, the page indicator, and a retry button when the
//! current page failed to load.

use leptos::prelude::*;

use crate::context::use_gallery;

#[component]
pub fn Pager() -> impl IntoView {
    let ctx = use_gallery();
    let state = ctx.state;

    let previous_disabled = move || state.with(|s| s.is_fetching() || !s.has_previous());
    let next_disabled = move || state.with(|s| s.is_fetching() || !s.has_next());
    let can_retry = move || state.with(|s| s.can_retry());
    let indicator = move || {
        state.with(|s| match s.total_pages() {
            Some(total) => format!("Page {} of {}", s.current_page(), total),
            None => format!("Page {}", s.current_page()),
        })
    };

    view! {
        <nav class="pager">
            <button
                id="previousBtn"
                class="pager__button"
                disabled=previous_disabled
                on:click=move |_| ctx.previous()
            >
                "Previous"
            </button>
            <span class="pager__indicator">{indicator}</span>
            <Show when=can_retry>
                <button
                    id="retryBtn"
                    class="pager__button"
                    on:click=move |_| ctx.retry()
                >
                    "Retry"
                </button>
            </Show>
            <button
                id="nextBtn"
                class="pager__button"
                disabled=next_disabled
                on:click=move |_| ctx.next()
            >
                "Next"
            </button>
        </nav>
    }
}
