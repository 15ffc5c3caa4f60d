use crate::shared::storage;

const ACCESS_TOKEN_KEY: &str = "monarca_token";

/// Save the bearer token handed out by `/login`
pub fn save_access_token(token: &str) {
    storage::set_item(ACCESS_TOKEN_KEY, token);
}

/// Bearer token attached to every API call, if one was issued
pub fn get_access_token() -> Option<String> {
    storage::get_item(ACCESS_TOKEN_KEY).filter(|t| !t.is_empty())
}

pub fn clear_tokens() {
    storage::remove_item(ACCESS_TOKEN_KEY);
}
