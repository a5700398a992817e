/// Which store credential the run ended up with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKind {
    /// Privileged key that bypasses row-level access rules.
    ServiceRole,
    /// Low-privilege client key, only used behind `--allow-publishable`.
    Publishable,
}

impl std::fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialKind::ServiceRole => write!(f, "service-role"),
            CredentialKind::Publishable => write!(f, "publishable"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub store_url: String,
    pub store_key: String,
    pub credential: CredentialKind,
    pub log_level: String,
    pub store_request_timeout_secs: u64,
    pub store_user_agent: String,
    pub store_max_retries: u32,
    pub store_retry_backoff_base_ms: u64,
}

impl AppConfig {
    /// Returns `true` when the run is using the low-privilege fallback key.
    #[must_use]
    pub fn is_publishable(&self) -> bool {
        self.credential == CredentialKind::Publishable
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("store_url", &self.store_url)
            .field("store_key", &"[redacted]")
            .field("credential", &self.credential)
            .field("log_level", &self.log_level)
            .field(
                "store_request_timeout_secs",
                &self.store_request_timeout_secs,
            )
            .field("store_user_agent", &self.store_user_agent)
            .field("store_max_retries", &self.store_max_retries)
            .field(
                "store_retry_backoff_base_ms",
                &self.store_retry_backoff_base_ms,
            )
            .finish()
    }
}
