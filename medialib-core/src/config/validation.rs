use thiserror::Error;

use super::Config;
use crate::pagination::cipher::MIN_SECRET_LEN;

#[derive(Debug, Error)]
pub enum ConfigGuardRailError {
    #[error("pagination secret {field} {reason}")]
    WeakSecret { field: &'static str, reason: String },
    #[error("invalid page limits: {reason}")]
    InvalidLimits { reason: String },
}

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push_with_hint<S: Into<String>, H: Into<String>>(&mut self, message: S, hint: H) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }
}

pub fn apply_guard_rails(config: &Config) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();
    let pagination = &config.pagination;

    if pagination.is_default_token_key() {
        if !config.dev_mode {
            return Err(ConfigGuardRailError::WeakSecret {
                field: "PAGINATION_TOKEN_KEY",
                reason: "uses the default placeholder value".into(),
            });
        }
        warnings.push_with_hint(
            "PAGINATION_TOKEN_KEY not set; using the development placeholder key",
            "Set PAGINATION_TOKEN_KEY to a random secret before exposing listings",
        );
    } else if pagination.token_key.len() < MIN_SECRET_LEN {
        return Err(ConfigGuardRailError::WeakSecret {
            field: "PAGINATION_TOKEN_KEY",
            reason: format!("must be at least {MIN_SECRET_LEN} bytes"),
        });
    }

    let limits = pagination.limits;
    if limits.max_limit == 0 {
        return Err(ConfigGuardRailError::InvalidLimits {
            reason: "PAGINATION_MAX_LIMIT must be positive".into(),
        });
    }
    if limits.default_limit == 0 || limits.default_limit > limits.max_limit {
        return Err(ConfigGuardRailError::InvalidLimits {
            reason: format!(
                "PAGINATION_DEFAULT_LIMIT {} must be within 1..={}",
                limits.default_limit, limits.max_limit
            ),
        });
    }

    if config.database.url.is_none() {
        warnings.push_with_hint(
            "DATABASE_URL not configured; only in-memory listings are available",
            "Set DATABASE_URL or database.url in medialib.toml",
        );
    }

    Ok(warnings)
}
