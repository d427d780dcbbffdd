//! Artwork Card Component
//!
//! One artwork: image on top, title/artist/date below. The image is fetched
//! the first time the card is shown and cached in the page state, so paging
//! back to it later does not hit the network again. Any failure renders a
//! text placeholder instead of a broken image.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::context::use_gallery;
use crate::error::FetchError;
use crate::models::Artwork;

#[derive(Debug, Clone, PartialEq)]
enum ImageView {
    Loading,
    Ready(String),
    Unavailable,
}

/// View before any fetch: cached image, pending fetch, or nothing to fetch
fn initial_view(image: Option<&str>, image_id: Option<&str>) -> ImageView {
    match (image, image_id) {
        (Some(url), _) => ImageView::Ready(url.to_string()),
        (None, Some(_)) => ImageView::Loading,
        (None, None) => ImageView::Unavailable,
    }
}

/// View once the image fetch settled. `stored` tells whether the cache took
/// the fetched URL; if not, `cached` is whatever the cache holds for the item.
fn fetched_view(fetched: Result<String, FetchError>, stored: bool, cached: Option<String>) -> ImageView {
    match fetched {
        Ok(url) if stored => ImageView::Ready(url),
        Ok(_) => cached.map(ImageView::Ready).unwrap_or(ImageView::Unavailable),
        Err(_) => ImageView::Unavailable,
    }
}

#[component]
pub fn ArtworkCard(
    /// Position of the artwork in the cache
    index: usize,
    artwork: Artwork,
) -> impl IntoView {
    let ctx = use_gallery();

    let initial = initial_view(artwork.image.as_deref(), artwork.image_id.as_deref());
    let (image, set_image) = signal(initial.clone());

    if initial == ImageView::Loading {
        if let Some(image_id) = artwork.image_id.clone() {
            let id = artwork.id;
            spawn_local(async move {
                let config = ctx.config.get_value();
                let fetched = api::fetch_image(&config, &image_id).await;

                let stored = match &fetched {
                    Ok(url) => ctx
                        .state
                        .try_update(|s| s.set_image(index, id, url.clone()))
                        .unwrap_or(false),
                    Err(err) => {
                        log::warn!("image {} for artwork {} unavailable: {}", image_id, id, err);
                        false
                    }
                };
                let cached = match &fetched {
                    Ok(url) if !stored => {
                        // Another card got there first, or a search dropped the item
                        api::revoke_image(url);
                        ctx.state.try_with_untracked(|s| s.image_of(index, id)).flatten()
                    }
                    _ => None,
                };

                // The card may have been unmounted meanwhile
                let _ = set_image.try_set(fetched_view(fetched, stored, cached));
            });
        }
    }

    let alt = artwork.alt_text.clone();
    let title = artwork.title_text().to_string();
    let artist = artwork.artist_text().to_string();
    let date = artwork.date_text().to_string();

    view! {
        <div class="artwork-container">
            <div class="artwork-container__image-container">
                {move || match image.get() {
                    ImageView::Loading => view! {
                        <span class="artwork-container__image-loading"></span>
                    }.into_any(),
                    ImageView::Ready(src) => view! {
                        <img
                            class="artwork-container__image-container__image"
                            src=src
                            alt=alt.clone()
                            on:error=move |_| set_image.set(ImageView::Unavailable)
                        />
                    }.into_any(),
                    ImageView::Unavailable => view! {
                        <p class="artwork-container__image-unavailable">"Image unavailable"</p>
                    }.into_any(),
                }}
            </div>
            <div class="artwork-container__details">
                <p class="artwork-container__title">{title}</p>
                <p class="artwork-container__artist">{artist}</p>
                <p class="artwork-container__date">{date}</p>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_view() {
        assert_eq!(initial_view(Some("blob:a"), Some("img")), ImageView::Ready("blob:a".to_string()));
        assert_eq!(initial_view(None, Some("img")), ImageView::Loading);
        assert_eq!(initial_view(None, None), ImageView::Unavailable);
    }

    #[test]
    fn test_failed_fetch_shows_placeholder() {
        let view = fetched_view(Err(FetchError::Status(404)), false, None);
        assert_eq!(view, ImageView::Unavailable);

        let view = fetched_view(Err(FetchError::Network("offline".to_string())), false, Some("blob:old".to_string()));
        assert_eq!(view, ImageView::Unavailable);
    }

    #[test]
    fn test_fetched_view_uses_stored_url() {
        let view = fetched_view(Ok("blob:new".to_string()), true, None);
        assert_eq!(view, ImageView::Ready("blob:new".to_string()));
    }

    #[test]
    fn test_fetched_view_falls_back_to_cache() {
        let view = fetched_view(Ok("blob:new".to_string()), false, Some("blob:first".to_string()));
        assert_eq!(view, ImageView::Ready("blob:first".to_string()));

        // Item dropped by a search: never point at the revoked URL
        let view = fetched_view(Ok("blob:new".to_string()), false, None);
        assert_eq!(view, ImageView::Unavailable);
    }
}
