#![allow(warnings)]
//! Artwork Gallery Entry Point

mod models;
mod config;
mod error;
mod api;
mod page_state;
mod context;
mod components;
mod app;

use app::App;
use config::GalleryConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let config = GalleryConfig::from_location();
    if let Err(err) = console_logger::init(config.log_level, env!("CARGO_CRATE_NAME")) {
        web_sys::console::warn_1(&format!("logger already installed: {}", err).into());
    }
    log::info!("starting gallery, {} artworks per page", config.page_size);

    mount_to_body(move || view! { <App config=config.clone() /> });
}
