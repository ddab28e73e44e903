use super::api_utils::api_base;
use web_sys::window;

/// Time a toast stays on screen
pub const DEFAULT_TOAST_TTL_MS: u32 = 5000;

/// localStorage key that overrides the API base (e.g. when the page is served by a dev server)
const API_BASE_STORAGE_KEY: &str = "irlog.api_base";

/// Client-side configuration, provided to the app through context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base: String,
    pub toast_ttl_ms: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            toast_ttl_ms: DEFAULT_TOAST_TTL_MS,
        }
    }
}

impl ClientConfig {
    /// Resolve configuration from the browser environment
    ///
    /// Search order for the API base:
    /// 1. `localStorage["irlog.api_base"]`
    /// 2. The page origin
    pub fn load() -> Self {
        let config = Self::resolve(stored_api_base(), api_base());
        log::info!("API base: '{}'", config.api_base);
        config
    }

    fn resolve(stored: Option<String>, origin: String) -> Self {
        let api_base = stored
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(origin);
        Self {
            api_base,
            ..Self::default()
        }
    }
}

fn stored_api_base() -> Option<String> {
    window()?
        .local_storage()
        .ok()??
        .get_item(API_BASE_STORAGE_KEY)
        .ok()?
}
