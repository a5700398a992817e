//! Resolution of the import invocation into an immutable [`RunConfig`].
//!
//! The command line accepts `--tenant`/`--file` flags, but some launchers strip
//! flag syntax and forward only the values. [`resolve_run_config`] therefore
//! also recognizes bare positional values: a UUID-shaped value is the tenant,
//! and a path-shaped value is the source file.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::ConfigError;

/// Source file used when neither a flag nor a positional names one.
pub const DEFAULT_FILE: &str = "data/RelatoriodeProdutosSimplificado_22012026.csv";

static UUID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[1-5][0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$")
        .expect("valid uuid regex")
});

/// Returns `true` if `value` is a canonical UUID string with version 1–5 and
/// an RFC 4122 variant nibble.
#[must_use]
pub fn is_valid_uuid(value: &str) -> bool {
    UUID_RE.is_match(value)
}

/// Tenant identifier, kept exactly as the operator typed it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TenantId(String);

impl TenantId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TenantId {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::MissingTenant);
        }
        if !is_valid_uuid(trimmed) {
            return Err(ConfigError::InvalidTenant(trimmed.to_owned()));
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl std::fmt::Display for TenantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw invocation values as collected from the command line.
#[derive(Debug, Clone, Default)]
pub struct RunArgs {
    pub tenant: Option<String>,
    pub file: Option<PathBuf>,
    pub positionals: Vec<String>,
    pub allow_publishable: bool,
    pub dry_run: bool,
}

/// Resolved, validated parameters for one import run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Absolute path to the source table.
    pub file_path: PathBuf,
    pub tenant_id: TenantId,
    pub allow_fallback_credential: bool,
    pub dry_run: bool,
}

/// Resolves raw command-line values into a [`RunConfig`].
///
/// # Errors
///
/// - [`ConfigError::MissingTenant`] if no tenant was supplied by flag or positional.
/// - [`ConfigError::InvalidTenant`] if the supplied tenant is not a UUID.
/// - [`ConfigError::FileNotFound`] if the resolved file does not exist.
pub fn resolve_run_config(args: RunArgs) -> Result<RunConfig, ConfigError> {
    let tenant = args
        .tenant
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .or_else(|| {
            args.positionals
                .iter()
                .map(|p| p.trim())
                .find(|p| is_valid_uuid(p))
                .map(str::to_owned)
        })
        .ok_or(ConfigError::MissingTenant)?;
    let tenant_id: TenantId = tenant.parse()?;

    let file = args
        .file
        .filter(|f| !f.as_os_str().is_empty())
        .or_else(|| positional_file(&args.positionals).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE));

    let file_path = absolutize(&file);
    if !file_path.exists() {
        return Err(ConfigError::FileNotFound(file_path));
    }

    Ok(RunConfig {
        file_path,
        tenant_id,
        allow_fallback_credential: args.allow_publishable,
        dry_run: args.dry_run,
    })
}

/// Picks the first positional that looks like a CSV path, falling back to any
/// value containing a path separator or a dot. UUID-shaped values are never
/// treated as files.
fn positional_file(positionals: &[String]) -> Option<&str> {
    let candidates = || {
        positionals
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty() && !is_valid_uuid(p))
    };

    candidates()
        .find(|p| p.to_lowercase().ends_with(".csv"))
        .or_else(|| candidates().find(|p| p.contains('/') || p.contains('\\') || p.contains('.')))
}

fn absolutize(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
#[path = "run_config_test.rs"]
mod tests;
