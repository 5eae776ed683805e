pub mod api;
pub mod app;
pub mod client;
pub mod components;
pub mod config;
pub mod controller;
pub mod db;
pub mod envelope;
pub mod error;
pub mod forms;
pub mod models;
pub mod routes;
pub mod session;
pub mod utils;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    utils::panic_hook::init();
    leptos::mount_to_body(App);
}
