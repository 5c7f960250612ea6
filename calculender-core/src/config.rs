//! User configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{CalculenderError, CalculenderResult};
use crate::form::{DEFAULT_HEBREW_MONTH, EventForm};
use crate::hebrew_month::HebrewMonth;
use crate::location::DEFAULT_LOCATION;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

pub const SERVER_URL_ENV: &str = "CALCULENDER_SERVER_URL";
pub const SUBSCRIPTION_ORIGIN_ENV: &str = "CALCULENDER_SUBSCRIPTION_ORIGIN";

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_location() -> String {
    DEFAULT_LOCATION.to_string()
}

fn default_hebrew_month() -> HebrewMonth {
    DEFAULT_HEBREW_MONTH
}

fn default_true() -> bool {
    true
}

/// Configuration at ~/.config/calculender/config.toml
///
/// Every key is optional. Environment variables override the server URL
/// and the subscription origin.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Where `api/generate-ics` lives.
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Origin for subscription links, when it differs from `server_url`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_origin: Option<String>,

    #[serde(default = "default_location")]
    pub default_location: String,

    #[serde(default = "default_hebrew_month")]
    pub default_hebrew_month: HebrewMonth,

    #[serde(default = "default_true")]
    pub create_sunset_event: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<PathBuf>,

    /// e.g. "30s"; unset waits indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_url: default_server_url(),
            subscription_origin: None,
            default_location: default_location(),
            default_hebrew_month: default_hebrew_month(),
            create_sunset_event: true,
            download_dir: None,
            request_timeout: None,
        }
    }
}

impl Config {
    pub fn config_path() -> CalculenderResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalculenderError::Config("Could not determine config directory".into()))?
            .join("calculender");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the user's config file (if any) and apply environment overrides.
    pub fn load() -> CalculenderResult<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load from `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> CalculenderResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            CalculenderError::Config(format!("Invalid config file {}: {e}", path.display()))
        })
    }

    /// Apply overrides looked up by environment variable name.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(SERVER_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.server_url = url;
        }
        if let Some(origin) = lookup(SUBSCRIPTION_ORIGIN_ENV).filter(|v| !v.trim().is_empty()) {
            self.subscription_origin = Some(origin);
        }
    }

    pub fn server_url(&self) -> CalculenderResult<Url> {
        parse_url("server_url", &self.server_url)
    }

    /// Origin for subscription links; defaults to the server URL, since the
    /// feed is served by the same host.
    pub fn subscription_origin(&self) -> CalculenderResult<Url> {
        match &self.subscription_origin {
            Some(origin) => parse_url("subscription_origin", origin),
            None => self.server_url(),
        }
    }

    pub fn request_timeout(&self) -> CalculenderResult<Option<Duration>> {
        self.request_timeout
            .as_deref()
            .map(|raw| {
                humantime::parse_duration(raw).map_err(|e| {
                    CalculenderError::Config(format!("Invalid request_timeout '{raw}': {e}"))
                })
            })
            .transpose()
    }

    /// Configured directory (with `~` expanded), else the platform
    /// download directory, else the current directory.
    pub fn download_dir(&self) -> PathBuf {
        match &self.download_dir {
            Some(dir) => PathBuf::from(shellexpand::tilde(&dir.to_string_lossy()).into_owned()),
            None => dirs::download_dir().unwrap_or_else(|| PathBuf::from(".")),
        }
    }

    /// An empty form prefilled with the configured defaults.
    pub fn new_form(&self) -> EventForm {
        EventForm {
            hebrew_month: self.default_hebrew_month,
            location: self.default_location.clone(),
            create_sunset_event: self.create_sunset_event,
            ..EventForm::default()
        }
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalculenderResult<()> {
        let contents = format!(
            "\
# calculender configuration

# Calendar server (generates files and serves subscription feeds):
# server_url = \"{DEFAULT_SERVER_URL}\"

# Origin used in subscription links, if different from server_url:
# subscription_origin = \"https://calculender.example\"

# Preselected location for sunset times:
# default_location = \"{DEFAULT_LOCATION}\"

# Preselected Hebrew month (1 = Nisan ... 7 = Tishrei ... 13 = Adar / Adar II):
# default_hebrew_month = {}

# Add a 15-minute entry at sunset:
# create_sunset_event = true

# Where downloaded .ics files are saved:
# download_dir = \"~/Downloads\"

# Give up on the server after this long:
# request_timeout = \"30s\"
",
            DEFAULT_HEBREW_MONTH.code()
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalculenderError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CalculenderError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

fn parse_url(key: &str, raw: &str) -> CalculenderResult<Url> {
    Url::parse(raw.trim())
        .map_err(|e| CalculenderError::Config(format!("Invalid {key} '{raw}': {e}")))
}
