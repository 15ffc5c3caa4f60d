//! Build-time configuration for the client.
//!
//! Values are read with `option_env!` when the WASM bundle is compiled:
//!
//! ```text
//! MONARCA_API_URL=https://api.monarca.example  trunk build --release
//! MONARCA_LOG_LEVEL=info
//! ```
//!
//! Without `MONARCA_API_URL` the API is expected on port 3000 of the host
//! that served the page.

use log::Level;

const API_URL: Option<&str> = option_env!("MONARCA_API_URL");
const LOG_LEVEL: Option<&str> = option_env!("MONARCA_LOG_LEVEL");

const DEFAULT_API_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL without trailing slash, e.g. `http://localhost:3000`
    pub api_base: String,
    pub log_level: Level,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            api_base: API_URL
                .map(normalize_base_url)
                .filter(|url| !url.is_empty())
                .unwrap_or_else(api_base_from_location),
            log_level: parse_log_level(LOG_LEVEL),
        }
    }
}

pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

pub fn parse_log_level(value: Option<&str>) -> Level {
    match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        Some("error") => Level::Error,
        Some("warn") | Some("warning") => Level::Warn,
        Some("info") => Level::Info,
        Some("trace") => Level::Trace,
        _ => Level::Debug,
    }
}

/// `{protocol}//{hostname}:3000` of the current page, empty outside a browser
fn api_base_from_location() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, DEFAULT_API_PORT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url("https://api.example.com/"), "https://api.example.com");
        assert_eq!(normalize_base_url(" http://localhost:3000// "), "http://localhost:3000");
    }

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level(Some("INFO")), Level::Info);
        assert_eq!(parse_log_level(Some("warning")), Level::Warn);
        assert_eq!(parse_log_level(Some("nonsense")), Level::Debug);
        assert_eq!(parse_log_level(None), Level::Debug);
    }
}
