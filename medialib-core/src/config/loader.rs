use once_cell::sync::Lazy;
use std::{fs, path::PathBuf};
use thiserror::Error;
use tracing::debug;

use super::{
    Config, ConfigMetadata, DEFAULT_TOKEN_KEY, DatabaseConfig, PaginationConfig,
    sources::{EnvConfig, FileConfig},
    validation::{self, ConfigGuardRailError, ConfigWarnings},
};
use crate::pagination::PageLimits;

static DEFAULT_CONFIG_LOCATIONS: Lazy<Vec<PathBuf>> = Lazy::new(|| {
    vec![
        PathBuf::from("medialib.toml"),
        PathBuf::from("config/medialib.toml"),
    ]
});

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| true).or_else(|err| match err {
                dotenvy::Error::Io(_) => Ok(false),
                _ => Err(err),
            })?,
            None => dotenvy::dotenv().map(|_| true).or_else(|err| match err {
                dotenvy::Error::Io(_) => Ok(false),
                _ => Err(err),
            })?,
        };

        self.load_with_env(EnvConfig::gather(), env_file_loaded)
    }

    /// Compose configuration from an already gathered environment.
    pub fn load_with_env(
        &self,
        env: EnvConfig,
        env_file_loaded: bool,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let (file_config, config_path) = self.load_file_config(&env)?;
        let (config, warnings) =
            self.compose_config(file_config, env, config_path, env_file_loaded)?;
        Ok(ConfigLoad { config, warnings })
    }

    fn load_file_config(
        &self,
        env: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let (path, explicit) = match (&self.options.config_path, &env.config_path) {
            (Some(path), _) | (None, Some(path)) => (path.clone(), true),
            (None, None) => match DEFAULT_CONFIG_LOCATIONS
                .iter()
                .find(|candidate| candidate.exists())
            {
                Some(path) => (path.clone(), false),
                None => return Ok((None, None)),
            },
        };

        if !path.exists() {
            if explicit {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            return Ok((None, None));
        }

        let contents = fs::read_to_string(&path).map_err(|source| ConfigLoadError::Io {
            path: path.clone(),
            source,
        })?;
        let file_config: FileConfig =
            toml::from_str(&contents).map_err(|source| ConfigLoadError::Parse {
                path: path.clone(),
                source,
            })?;

        debug!(path = %path.display(), "loaded configuration file");
        Ok((Some(file_config), Some(path)))
    }

    fn compose_config(
        &self,
        file_config: Option<FileConfig>,
        env: EnvConfig,
        config_path: Option<PathBuf>,
        env_file_loaded: bool,
    ) -> Result<(Config, ConfigWarnings), ConfigLoadError> {
        let mut warnings = ConfigWarnings::default();

        if config_path.is_none() {
            warnings.push_with_hint(
                "No medialib.toml detected; falling back to environment variables",
                "Create medialib.toml or set MEDIALIB_CONFIG_PATH",
            );
        }

        let FileConfig {
            database: file_database,
            pagination: file_pagination,
            dev_mode: file_dev_mode,
        } = file_config.unwrap_or_default();

        let database = DatabaseConfig {
            url: env
                .database_url
                .filter(|value| !value.trim().is_empty())
                .or(file_database.url.filter(|value| !value.trim().is_empty())),
        };

        let defaults = PageLimits::default();
        let pagination = PaginationConfig {
            token_key: env
                .token_key
                .or(file_pagination.token_key)
                .unwrap_or_else(|| DEFAULT_TOKEN_KEY.to_string()),
            limits: PageLimits {
                default_limit: env
                    .default_limit
                    .or(file_pagination.default_limit)
                    .unwrap_or(defaults.default_limit),
                max_limit: env
                    .max_limit
                    .or(file_pagination.max_limit)
                    .unwrap_or(defaults.max_limit),
            },
        };

        let config = Config {
            database,
            pagination,
            dev_mode: env.dev_mode.or(file_dev_mode).unwrap_or(false),
            metadata: ConfigMetadata {
                config_path,
                env_file_loaded,
            },
        };

        let guard_warnings = validation::apply_guard_rails(&config)?;
        warnings.extend(guard_warnings);

        Ok((config, warnings))
    }
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration file missing: {path}")]
    MissingConfig { path: PathBuf },
    #[error("failed to read configuration {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error(transparent)]
    GuardRail(#[from] ConfigGuardRailError),
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SECRET: &str = "file-secret-long-enough-for-token-keys-123";

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn file_values_are_used_when_env_is_silent() {
        let file = write_config(&format!(
            r#"
            [database]
            url = "postgres://db/medialib"

            [pagination]
            token_key = "{SECRET}"
            default_limit = 20
            max_limit = 80
            "#
        ));
        let load = ConfigLoader::new()
            .with_config_path(file.path())
            .load_with_env(EnvConfig::default(), false)
            .unwrap();

        assert_eq!(load.config.database.url.as_deref(), Some("postgres://db/medialib"));
        assert_eq!(load.config.pagination.token_key, SECRET);
        assert_eq!(
            load.config.pagination.limits,
            PageLimits {
                default_limit: 20,
                max_limit: 80
            }
        );
        assert_eq!(load.config.metadata.config_path.as_deref(), Some(file.path()));
        assert!(load.warnings.is_empty());
    }

    #[test]
    fn environment_overrides_file() {
        let file = write_config(&format!(
            "[pagination]\ntoken_key = \"{SECRET}\"\ndefault_limit = 20\n"
        ));
        let env = EnvConfig {
            database_url: Some("postgres://env/medialib".into()),
            default_limit: Some(5),
            ..Default::default()
        };
        let load = ConfigLoader::new()
            .with_config_path(file.path())
            .load_with_env(env, false)
            .unwrap();

        assert_eq!(load.config.database.url.as_deref(), Some("postgres://env/medialib"));
        assert_eq!(load.config.pagination.limits.default_limit, 5);
        assert_eq!(load.config.pagination.limits.max_limit, 200);
    }

    #[test]
    fn env_config_path_is_honoured() {
        let file = write_config(&format!("[pagination]\ntoken_key = \"{SECRET}\"\n"));
        let env = EnvConfig {
            config_path: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let load = ConfigLoader::new().load_with_env(env, false).unwrap();
        assert_eq!(load.config.pagination.token_key, SECRET);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        let err = ConfigLoader::new()
            .with_config_path(&missing)
            .load_with_env(EnvConfig::default(), false)
            .unwrap_err();
        assert!(matches!(err, ConfigLoadError::MissingConfig { path } if path == missing));
    }

    #[test]
    fn malformed_file_reports_parse_error() {
        let file = write_config("[pagination\n");
        let err = ConfigLoader::new()
            .with_config_path(file.path())
            .load_with_env(EnvConfig::default(), false)
            .unwrap_err();
        assert!(matches!(err, ConfigLoadError::Parse { .. }));
    }

    #[test]
    fn placeholder_key_requires_dev_mode() {
        let file = write_config("[database]\nurl = \"postgres://db/medialib\"\n");
        let err = ConfigLoader::new()
            .with_config_path(file.path())
            .load_with_env(EnvConfig::default(), false)
            .unwrap_err();
        assert!(matches!(err, ConfigLoadError::GuardRail(_)));

        let env = EnvConfig {
            dev_mode: Some(true),
            ..Default::default()
        };
        let load = ConfigLoader::new()
            .with_config_path(file.path())
            .load_with_env(env, false)
            .unwrap();
        assert!(load.config.pagination.is_default_token_key());
        assert_eq!(load.warnings.items.len(), 1);
    }
}
