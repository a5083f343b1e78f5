//! DexDeck browser front end: swap, send and limit orders against an
//! injected EIP-1193 wallet.

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

mod app;
mod components;
mod config;
mod error;
mod pages;
mod services;
mod state;
mod utils;

use app::App;
use utils::constants::LOADING_ELEMENT_ID;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    let config_result = config::init_config();
    wasm_logger::init(wasm_logger::Config::new(config::app_config().log_level));
    if let Err(e) = config_result {
        log::warn!("Invalid build configuration, falling back to defaults: {}", e);
    }

    log::info!("Starting DexDeck");

    hide_loading_screen();

    leptos::mount::mount_to_body(|| view! { <App/> });
}

fn hide_loading_screen() {
    if let Some(loading) = gloo_utils::document().get_element_by_id(LOADING_ELEMENT_ID) {
        let _ = loading.class_list().add_1("hidden");
    }
}
