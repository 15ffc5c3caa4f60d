//! Thin wrapper over `window.localStorage`.
//!
//! Every helper is a silent no-op when storage is unavailable
//! (private mode, no window).

use web_sys::window;

fn local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

pub fn get_item(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok()?
}

pub fn set_item(key: &str, value: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(key, value);
    }
}

pub fn remove_item(key: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(key);
    }
}

pub fn get_flag(key: &str) -> Option<bool> {
    get_item(key).map(|v| v == "true")
}

pub fn set_flag(key: &str, value: bool) {
    set_item(key, if value { "true" } else { "false" });
}
