//! Central configuration for the resqlink_axum crate

use std::sync::LazyLock;

/// Where anonymous visitors of protected pages are sent
/// Default: "/"
pub static RESQLINK_REDIRECT_ANON: LazyLock<String> = LazyLock::new(|| {
    std::env::var("RESQLINK_REDIRECT_ANON").unwrap_or_else(|_| "/".to_string())
});
