use std::cell::RefCell;

use log::Level;
use web_sys::window;

/// Browser-side settings, overridable through `tutordesk_*` localStorage keys.
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Backend API host (e.g., "localhost" or "api.example.com")
    pub api_host: String,
    pub api_port: u16,
    /// API path prefix
    pub api_path: String,
    pub api_use_https: bool,
    pub log_level: Level,
    pub debug_mode: bool,
    /// Toast notification duration in milliseconds
    pub toast_duration_ms: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_host: "localhost".to_string(),
            api_port: 3000,
            api_path: "/api".to_string(),
            api_use_https: false,
            log_level: Level::Info,
            debug_mode: false,
            toast_duration_ms: 5000,
        }
    }
}

fn parse_level(raw: &str) -> Option<Level> {
    match raw.to_lowercase().as_str() {
        "error" => Some(Level::Error),
        "warn" => Some(Level::Warn),
        "info" => Some(Level::Info),
        "debug" => Some(Level::Debug),
        "trace" => Some(Level::Trace),
        _ => None,
    }
}

impl AppSettings {
    /// Create settings from the window location and localStorage
    pub fn from_environment() -> Self {
        let mut settings = Self::default();

        let Some(window) = window() else {
            return settings;
        };

        if let Ok(hostname) = window.location().hostname() {
            settings.debug_mode = hostname == "localhost" || hostname == "127.0.0.1";
            if settings.debug_mode {
                settings.log_level = Level::Debug;
            }
        }

        if let Ok(Some(storage)) = window.local_storage() {
            let read = |key: &str| storage.get_item(key).ok().flatten();

            if let Some(api_host) = read("tutordesk_api_host") {
                settings.api_host = api_host;
            }
            if let Some(port) = read("tutordesk_api_port").and_then(|p| p.parse().ok()) {
                settings.api_port = port;
            }
            if let Some(api_path) = read("tutordesk_api_path") {
                settings.api_path = api_path;
            }
            if let Some(use_https) = read("tutordesk_api_use_https") {
                settings.api_use_https = use_https.eq_ignore_ascii_case("true");
            }
            if let Some(level) = read("tutordesk_log_level").as_deref().and_then(parse_level) {
                settings.log_level = level;
            }
            if let Some(ms) = read("tutordesk_toast_duration_ms").and_then(|v| v.parse().ok()) {
                settings.toast_duration_ms = ms;
            }
        }

        settings
    }

    /// Get the base API URL (protocol + host + port + prefix)
    pub fn api_base_url(&self) -> String {
        let protocol = if self.api_use_https { "https" } else { "http" };
        format!("{}://{}:{}{}", protocol, self.api_host, self.api_port, self.api_path)
    }
}

thread_local! {
    static SETTINGS: RefCell<AppSettings> = RefCell::new(AppSettings::default());
}

/// Get a copy of the current settings
pub fn get_settings() -> AppSettings {
    SETTINGS.with(|s| s.borrow().clone())
}

/// Initialize settings (call this at app startup)
pub fn init_settings() {
    SETTINGS.with(|s| {
        *s.borrow_mut() = AppSettings::from_environment();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_base_url() {
        let mut settings = AppSettings::default();
        assert_eq!(settings.api_base_url(), "http://localhost:3000/api");

        settings.api_use_https = true;
        settings.api_host = "tutor.example.com".to_string();
        settings.api_port = 443;
        assert_eq!(settings.api_base_url(), "https://tutor.example.com:443/api");
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), Some(Level::Debug));
        assert_eq!(parse_level("loud"), None);
    }
}
