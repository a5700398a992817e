use crate::app_config::{AppConfig, CredentialKind};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
/// `allow_publishable` enables the low-privilege fallback credential pair when
/// the service-role key is absent.
///
/// # Errors
///
/// Returns `ConfigError` if no usable credential pair exists or a tuning value
/// is invalid.
pub fn load_app_config(allow_publishable: bool) -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env(allow_publishable)
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files. Use it in tests
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if no usable credential pair exists or a tuning value
/// is invalid.
pub fn load_app_config_from_env(allow_publishable: bool) -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key), allow_publishable)
}

/// Build application configuration using the provided env-var lookup function.
///
/// Empty values are treated the same as unset ones. The primary URL wins over
/// the fallback URL even when the fallback key is in use.
fn build_app_config<F>(lookup: F, allow_publishable: bool) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let non_empty = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        non_empty(var).unwrap_or_else(|| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let mut store_url = non_empty("SUPABASE_URL");
    let mut store_key = non_empty("SUPABASE_SERVICE_ROLE_KEY");
    let mut credential = CredentialKind::ServiceRole;

    if store_key.is_none() && allow_publishable {
        store_url = store_url.or_else(|| non_empty("VITE_SUPABASE_URL"));
        store_key = non_empty("VITE_SUPABASE_PUBLISHABLE_DEFAULT_KEY");
        credential = CredentialKind::Publishable;
    }

    let (Some(store_url), Some(store_key)) = (store_url, store_key) else {
        return Err(ConfigError::MissingCredentials);
    };

    let log_level = or_default("VITRINE_LOG_LEVEL", "info");
    let store_request_timeout_secs = parse_u64("VITRINE_STORE_REQUEST_TIMEOUT_SECS", "30")?;
    let store_user_agent = or_default("VITRINE_STORE_USER_AGENT", "vitrine/0.1 (catalog-import)");
    let store_max_retries = parse_u32("VITRINE_STORE_MAX_RETRIES", "2")?;
    let store_retry_backoff_base_ms = parse_u64("VITRINE_STORE_RETRY_BACKOFF_BASE_MS", "500")?;

    Ok(AppConfig {
        store_url,
        store_key,
        credential,
        log_level,
        store_request_timeout_secs,
        store_user_agent,
        store_max_retries,
        store_retry_backoff_base_ms,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
