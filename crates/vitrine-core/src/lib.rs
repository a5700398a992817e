pub mod app_config;
pub mod config;
pub mod error;
pub mod products;
pub mod run_config;

pub use app_config::{AppConfig, CredentialKind};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use products::{ProductUpsert, FALLBACK_BRAND, GENERATED_CODE_PREFIX};
pub use run_config::{
    is_valid_uuid, resolve_run_config, RunArgs, RunConfig, TenantId, DEFAULT_FILE,
};
