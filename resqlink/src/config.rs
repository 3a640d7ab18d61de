//! Central configuration for the resqlink crate

use std::sync::LazyLock;
use std::time::Duration;

/// Endpoint value shipped in `.env.example`; still in effect means "no backend".
pub const PLACEHOLDER_SUPABASE_URL: &str = "https://your-project.supabase.co";

/// Access key value shipped in `.env.example`.
pub const PLACEHOLDER_SUPABASE_ANON_KEY: &str = "your-anon-key";

/// Identity backend endpoint
/// Default: the public placeholder, which selects the mock backend
pub(crate) static SUPABASE_URL: LazyLock<String> = LazyLock::new(|| {
    std::env::var("SUPABASE_URL").unwrap_or_else(|_| PLACEHOLDER_SUPABASE_URL.to_string())
});

/// Identity backend access key
pub(crate) static SUPABASE_ANON_KEY: LazyLock<String> = LazyLock::new(|| {
    std::env::var("SUPABASE_ANON_KEY")
        .unwrap_or_else(|_| PLACEHOLDER_SUPABASE_ANON_KEY.to_string())
});

/// Minimum time the startup check stays visible as "initializing"
/// Default: 2500 ms
pub static STARTUP_MIN_DURATION: LazyLock<Duration> = LazyLock::new(|| {
    Duration::from_millis(
        std::env::var("STARTUP_MIN_DURATION_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(2500),
    )
});

/// Simulated round trip of the mock backend
/// Default: 1000 ms
pub static MOCK_AUTH_LATENCY: LazyLock<Duration> = LazyLock::new(|| {
    Duration::from_millis(
        std::env::var("MOCK_AUTH_LATENCY_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(1000),
    )
});

/// Request timeout for the real backend
/// Default: 30 seconds
pub(crate) static AUTH_HTTP_TIMEOUT: LazyLock<Duration> = LazyLock::new(|| {
    Duration::from_secs(
        std::env::var("AUTH_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30),
    )
});

/// Whether the real backend is in use, resolved once for the whole process.
static IS_REAL_BACKEND_CONFIGURED: LazyLock<bool> =
    LazyLock::new(|| ProviderConfig::from_env().is_real_backend());

/// Endpoint and key of the identity backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub url: String,
    pub anon_key: String,
}

impl ProviderConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(SUPABASE_URL.as_str(), SUPABASE_ANON_KEY.as_str())
    }

    /// Both values must be replaced for the real backend to be selected.
    /// A half-configured backend cannot authenticate anyone.
    pub fn is_real_backend(&self) -> bool {
        self.url != PLACEHOLDER_SUPABASE_URL && self.anon_key != PLACEHOLDER_SUPABASE_ANON_KEY
    }
}

/// Capability check consulted by the session store and the auth flow.
///
/// Evaluated on first use and fixed afterwards, so every component in the
/// process agrees on which backend is active.
pub fn is_real_backend_configured() -> bool {
    *IS_REAL_BACKEND_CONFIGURED
}
