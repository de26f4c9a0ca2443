use std::time::Duration;

/// Default settings for remote page retrieval.
#[derive(Debug, Clone, Copy)]
pub struct FetchDefaults {
    pub timeout_secs: u64,
    pub user_agent: &'static str,
}

/// Shared defaults so CLI and tests can stay in sync.
pub const FETCH_DEFAULTS: FetchDefaults = FetchDefaults {
    timeout_secs: 60,
    user_agent: concat!("variant-audit/", env!("CARGO_PKG_VERSION")),
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Applied to every request; a request that exceeds it fails that page only.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self { default_fetch_config() }
}

/// Convenience helper to build a [`FetchConfig`] from the shared defaults.
pub fn default_fetch_config() -> FetchConfig {
    FetchConfig {
        timeout: Duration::from_secs(FETCH_DEFAULTS.timeout_secs),
        user_agent: FETCH_DEFAULTS.user_agent.to_string(),
    }
}
