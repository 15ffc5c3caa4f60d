pub mod app;
pub mod domain;
pub mod layout;
pub mod routes;
pub mod shared;
pub mod system;

use wasm_bindgen::prelude::wasm_bindgen;

use shared::config::AppConfig;

#[wasm_bindgen(start)]
pub fn start() {
    _ = console_log::init_with_level(AppConfig::from_env().log_level);
    console_error_panic_hook::set_once();

    leptos::mount::mount_to_body(app::App);
}
