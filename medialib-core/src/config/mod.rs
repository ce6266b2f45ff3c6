//! Runtime configuration: TOML file, `.env`, then process environment.

mod loader;
mod sources;
mod validation;

use std::path::PathBuf;

pub use loader::{ConfigLoad, ConfigLoadError, ConfigLoader};
pub use sources::{EnvConfig, FileConfig, FileDatabaseConfig, FilePaginationConfig};
pub use validation::{ConfigGuardRailError, ConfigWarning, ConfigWarnings, apply_guard_rails};

use crate::pagination::PageLimits;

/// Placeholder token key used when none is configured. Accepted only in
/// development mode.
pub const DEFAULT_TOKEN_KEY: &str = "medialib-development-pagination-key-change-me";

#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub pagination: PaginationConfig,
    pub dev_mode: bool,
    pub metadata: ConfigMetadata,
}

#[derive(Debug, Clone, Default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
}

#[derive(Clone)]
pub struct PaginationConfig {
    /// Secret the token encryption key is derived from.
    pub token_key: String,
    pub limits: PageLimits,
}

impl PaginationConfig {
    pub fn is_default_token_key(&self) -> bool {
        self.token_key == DEFAULT_TOKEN_KEY
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            limits: PageLimits::default(),
        }
    }
}

impl std::fmt::Debug for PaginationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginationConfig")
            .field("token_key", &"<redacted>")
            .field("limits", &self.limits)
            .finish()
    }
}

/// Where the effective configuration came from.
#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}
