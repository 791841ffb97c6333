use crate::listing::{FilterCriteria, SortKey};
use anyhow::{anyhow, Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/properties";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// List data is considered fresh for five minutes
pub const DEFAULT_STALE_SECS: u64 = 5 * 60;

/// Where and how to reach the property service
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub stale_after: Duration,
    pub sort: SortKey,
    pub filters: FilterCriteria,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            stale_after: Duration::from_secs(DEFAULT_STALE_SECS),
            sort: SortKey::default(),
            filters: FilterCriteria::default(),
        }
    }
}

impl AppConfig {
    /// Load from the process environment, reading `.env` first if present
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key: &str| env::var(key).ok())
    }

    /// Build from any key lookup; unset and blank keys take their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let api = ApiConfig {
            base_url: get("PROPERTY_API_URL").unwrap_or(defaults.api.base_url),
            timeout: parsed(&get, "PROPERTY_API_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.api.timeout),
        };

        let stale_after = parsed(&get, "PROPERTY_CACHE_STALE_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.stale_after);

        let sort = match get("PROPERTY_SORT") {
            Some(token) => token
                .trim()
                .parse::<SortKey>()
                .map_err(|e| anyhow!(e))
                .context("Invalid PROPERTY_SORT")?,
            None => defaults.sort,
        };

        let filters = FilterCriteria {
            min_rent: parsed(&get, "PROPERTY_MIN_RENT")?,
            max_rent: parsed(&get, "PROPERTY_MAX_RENT")?,
            min_size: parsed(&get, "PROPERTY_MIN_SIZE")?,
            max_size: parsed(&get, "PROPERTY_MAX_SIZE")?,
        };
        filters
            .validate()
            .map_err(|errors| anyhow!("Invalid filter bounds: {errors}"))?;

        Ok(Self {
            api,
            stale_after,
            sort,
            filters,
        })
    }
}

fn parsed<T>(get: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    get(key)
        .map(|raw| raw.trim().parse::<T>())
        .transpose()
        .with_context(|| format!("Invalid value for {key}"))
}
