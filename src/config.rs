use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::{
    CALENDAR_BASE_URL, CALENDAR_TIMEZONE, COOP_LOCATION, DEFAULT_SHIFT_MINUTES,
    DEFAULT_USER_AGENT, PORTAL_BASE_URL,
};
use crate::error::{Result, ShiftError};

pub const CONFIG_PATH_ENV: &str = "SHIFT_CALENDAR_CONFIG";
pub const COOKIE_ENV: &str = "SHIFT_CALENDAR_COOKIE";
const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub portal: PortalConfig,
    pub calendar: CalendarConfig,
    pub claim: ClaimConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    pub base_url: String,
    pub user_agent: String,
    /// Session cookie sent with every portal request
    pub cookie: Option<String>,
    /// Upper bound on detail pages fetched at once; unset means no bound
    pub max_concurrent_fetches: Option<usize>,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: PORTAL_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            cookie: None,
            max_concurrent_fetches: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub base_url: String,
    pub timezone: String,
    pub location: String,
    pub duration_minutes: i64,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            base_url: CALENDAR_BASE_URL.to_string(),
            timezone: CALENDAR_TIMEZONE.to_string(),
            location: COOP_LOCATION.to_string(),
            duration_minutes: DEFAULT_SHIFT_MINUTES,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClaimConfig {
    /// Only link a detail page when it says the member is scheduled
    pub require_scheduled: bool,
}

impl Default for ClaimConfig {
    fn default() -> Self {
        Self {
            require_scheduled: true,
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, `$SHIFT_CALENDAR_CONFIG`
    /// and then `./config.toml` are tried; if neither exists the defaults
    /// are used. `$SHIFT_CALENDAR_COOKIE` overrides the portal cookie.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => Some(path.to_path_buf()),
            None => std::env::var(CONFIG_PATH_ENV)
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    let default = PathBuf::from(DEFAULT_CONFIG_PATH);
                    default.exists().then_some(default)
                }),
        };

        let mut config = match path {
            Some(path) => {
                let content = fs::read_to_string(&path).map_err(|e| {
                    ShiftError::Config(format!(
                        "Failed to read config file '{}': {}",
                        path.display(),
                        e
                    ))
                })?;
                debug!(path = %path.display(), "Loaded config file");
                Self::from_toml_str(&content)?
            }
            None => Self::default(),
        };

        if let Ok(cookie) = std::env::var(COOKIE_ENV) {
            if !cookie.trim().is_empty() {
                config.portal.cookie = Some(cookie);
            }
        }
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.calendar.duration_minutes <= 0 {
            return Err(ShiftError::Config(format!(
                "calendar.duration_minutes must be positive, got {}",
                self.calendar.duration_minutes
            )));
        }
        if self.portal.max_concurrent_fetches == Some(0) {
            return Err(ShiftError::Config(
                "portal.max_concurrent_fetches must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
