use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("denormalize config parse failed: {0}")]
    Parse(#[from] toml::de::Error),
}

///
/// DenormalizeConfig
///
/// Engine switches. Loaded from TOML (usually a `[denorm]` table handed over
/// by the host application) or built in code.
///
/// check_arguments   → raise `MissingArgument` for absent selectors; defaults
///                     to on in debug builds and off in release builds
/// cache_by_default  → whether `CacheMode::Fresh` starts with caching enabled
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DenormalizeConfig {
    pub check_arguments: bool,
    pub cache_by_default: bool,
}

impl DenormalizeConfig {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            check_arguments: cfg!(debug_assertions),
            cache_by_default: true,
        }
    }

    #[must_use]
    pub const fn with_check_arguments(mut self, check_arguments: bool) -> Self {
        self.check_arguments = check_arguments;
        self
    }

    #[must_use]
    pub const fn with_cache_by_default(mut self, cache_by_default: bool) -> Self {
        self.cache_by_default = cache_by_default;
        self
    }

    /// Parse a config from TOML text; absent keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}

impl Default for DenormalizeConfig {
    fn default() -> Self {
        Self::new()
    }
}
