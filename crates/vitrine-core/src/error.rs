use thiserror::Error;

/// Errors raised while resolving the run configuration or the environment.
///
/// Every variant is fatal: the import binary reports it and exits before any
/// file parsing or network work begins.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("tenant_id is required")]
    MissingTenant,

    #[error("invalid tenant_id \"{0}\": expected a UUID")]
    InvalidTenant(String),

    #[error("CSV file not found at: {}", .0.display())]
    FileNotFound(std::path::PathBuf),

    #[error(
        "SUPABASE_URL and SUPABASE_SERVICE_ROLE_KEY are required; use --allow-publishable only for testing"
    )]
    MissingCredentials,

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
