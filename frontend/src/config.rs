//! Frontend build and session settings.

use std::time::Duration;

use drag_admin_shared::{config::DEFAULT_TIMEOUT, ClientConfig};

// API base URL - 编译时从环境变量读取，默认本地开发地址
pub const API_BASE: &str = match option_env!("DRAG_ADMIN_API_BASE") {
    Some(url) => url,
    None => drag_admin_shared::config::DEFAULT_API_BASE,
};

/// `localStorage` key the login flow writes the bearer token to.
pub const TOKEN_STORAGE_KEY: &str = "token";

pub const REQUEST_TIMEOUT: Duration = DEFAULT_TIMEOUT;

/// Bearer token of the signed-in staff member, if any.
pub fn auth_token() -> Option<String> {
    web_sys::window()?
        .local_storage()
        .ok()
        .flatten()?
        .get_item(TOKEN_STORAGE_KEY)
        .ok()
        .flatten()
}

/// Connection settings for the current page load.
pub fn client_config() -> ClientConfig {
    ClientConfig::new(API_BASE)
        .with_token(auth_token())
        .with_timeout(REQUEST_TIMEOUT)
}
