//! UI Components
//!
//! Leptos components of the gallery page.

mod search_bar;
mod loader;
mod artwork_list;
mod artwork_card;
mod pager;

pub use search_bar::SearchBar;
pub use loader::Loader;
pub use artwork_list::ArtworkList;
pub use artwork_card::ArtworkCard;
pub use pager::Pager;
