//! Loader Component

use leptos::prelude::*;

use crate::context::use_gallery;

/// Spinner shown while a listing fetch is in flight
#[component]
pub fn Loader() -> impl IntoView {
    let ctx = use_gallery();
    let fetching = Memo::new(move |_| ctx.state.with(|s| s.is_fetching()));

    view! {
        <div id="loader" class="loader" class:hidden=move || !fetching.get()>
            <span class="loader__spinner"></span>
        </div>
    }
}
