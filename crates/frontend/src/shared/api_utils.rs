//! API utilities for frontend-backend communication
//!
//! The irlog server serves the page and `/api` from the same origin, so the
//! default API base is simply the page origin.

/// Get the base URL for API requests
///
/// # Returns
/// - Page origin like "http://localhost:3355"
/// - Empty string if window is not available (relative URLs are used then)
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let host = location.host().unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}", protocol, host)
}

/// Join an API base and a path (which should start with "/api/")
///
/// # Example
/// ```rust
/// use irlog_frontend::shared::api_utils::join_url;
/// assert_eq!(join_url("http://h:3355/", "/api/logs"), "http://h:3355/api/logs");
/// ```
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}
