//! Dashboard configuration.
//!
//! Values come from defaults, an optional TOML file, and `TRENDSENSE_*`
//! environment overrides, applied in that order.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

pub const ENV_DEFAULT_RANGE_DAYS: &str = "TRENDSENSE_DEFAULT_RANGE_DAYS";
pub const ENV_TOP_N: &str = "TRENDSENSE_TOP_N";
pub const ENV_RECENT_LIMIT: &str = "TRENDSENSE_RECENT_LIMIT";
pub const ENV_KEYWORDS: &str = "TRENDSENSE_KEYWORDS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Lookback applied when a query names neither date bound.
    pub default_range_days: u32,
    pub quick_ranges: Vec<u32>,
    /// Length of the top and bottom keyword rankings.
    pub top_n: usize,
    /// Rows shown in the recent articles table.
    pub recent_limit: usize,
    pub keywords: Vec<String>,
    pub sources: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_range_days: 30,
            quick_ranges: vec![7, 30, 90],
            top_n: 3,
            recent_limit: 10,
            keywords: ["Next.js", "TypeScript", "AI", "React", "Python"]
                .iter()
                .map(|k| k.to_string())
                .collect(),
            sources: vec!["reddit".to_string(), "news".to_string()],
        }
    }
}

impl DashboardConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        debug!("Loaded dashboard configuration from {}", path.display());
        Self::from_toml_str(&contents)
    }

    /// Applies `TRENDSENSE_*` variables from the process environment.
    pub fn apply_env_overrides(self) -> Result<Self, ConfigError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Applies overrides from `lookup`, which maps a variable name to its value.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_DEFAULT_RANGE_DAYS) {
            self.default_range_days = parse_number(ENV_DEFAULT_RANGE_DAYS, &value)?;
        }
        if let Some(value) = lookup(ENV_TOP_N) {
            self.top_n = parse_number(ENV_TOP_N, &value)?;
        }
        if let Some(value) = lookup(ENV_RECENT_LIMIT) {
            self.recent_limit = parse_number(ENV_RECENT_LIMIT, &value)?;
        }
        if let Some(value) = lookup(ENV_KEYWORDS) {
            self.keywords = value
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string)
                .collect();
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_range_days == 0 {
            return Err(ConfigError::ValidationFailed {
                reason: "default_range_days must be at least 1".to_string(),
            });
        }
        if self.quick_ranges.is_empty() {
            return Err(ConfigError::ValidationFailed {
                reason: "quick_ranges must not be empty".to_string(),
            });
        }
        if self.recent_limit == 0 {
            return Err(ConfigError::ValidationFailed {
                reason: "recent_limit must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(field: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
        })
}
