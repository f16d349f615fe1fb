//! Client configuration at ~/.config/salon/config.toml

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono_tz::Tz;
use config::{Config, File, FileFormat};
use serde::Deserialize;

use crate::error::{BookingError, BookingResult};
use crate::model::Resource;
use crate::roster::default_roster;

pub static DEFAULT_BASE_URL: &str = "https://liveapi04.cliento.com/api/vip";
static DEFAULT_TIMEZONE: &str = "Europe/Stockholm";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct SalonConfig {
    /// Booking API root, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// IANA zone the salon's calendar days are counted in
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Per-request timeout. Requests wait indefinitely when unset.
    pub request_timeout_secs: Option<u64>,

    /// Opening hours text for Monday through Sunday
    pub opening_hours: Option<Vec<String>>,

    /// Replaces the built-in roster when present
    pub resources: Option<Vec<Resource>>,
}

impl Default for SalonConfig {
    fn default() -> Self {
        SalonConfig {
            base_url: default_base_url(),
            timezone: default_timezone(),
            request_timeout_secs: None,
            opening_hours: None,
            resources: None,
        }
    }
}

impl SalonConfig {
    pub fn config_path() -> BookingResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| BookingError::Config("Could not determine config directory".into()))?
            .join("salon");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from `path`, or from the default location (creating a commented
    /// template there on first use).
    pub fn load(path: Option<&Path>) -> BookingResult<Self> {
        let config_path = match path {
            Some(p) => PathBuf::from(shellexpand::tilde(&p.to_string_lossy()).into_owned()),
            None => {
                let p = Self::config_path()?;
                if !p.exists() {
                    Self::create_default_config(&p)?;
                }
                p
            }
        };

        tracing::debug!(path = %config_path.display(), "loading config");

        let config: SalonConfig = Config::builder()
            .add_source(
                File::from(config_path)
                    .format(FileFormat::Toml)
                    .required(path.is_some()),
            )
            .build()
            .map_err(|e| BookingError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| BookingError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> BookingResult<()> {
        url::Url::parse(&self.base_url)
            .map_err(|e| BookingError::Config(format!("Invalid base_url '{}': {e}", self.base_url)))?;

        self.tz()?;

        if let Some(hours) = &self.opening_hours {
            if hours.len() != 7 {
                return Err(BookingError::Config(format!(
                    "opening_hours needs 7 entries (Monday to Sunday), got {}",
                    hours.len()
                )));
            }
        }

        Ok(())
    }

    /// Replace the API root, checking it the same way a file value is checked.
    pub fn with_base_url(mut self, base_url: String) -> BookingResult<Self> {
        self.base_url = base_url;
        self.validate()?;
        Ok(self)
    }

    pub fn tz(&self) -> BookingResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| BookingError::Config(format!("Unknown timezone '{}'", self.timezone)))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn roster(&self) -> Vec<Resource> {
        self.resources.clone().unwrap_or_else(default_roster)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> BookingResult<()> {
        let contents = format!(
            "\
# salon configuration

# Booking API root:
# base_url = \"{}\"

# Time zone used to place slots on calendar days:
# timezone = \"{}\"

# Give up on a request after this many seconds:
# request_timeout_secs = 10

# Opening hours, Monday to Sunday:
# opening_hours = [\"10-18\", \"10-18\", \"10-18\", \"10-19\", \"10-18\", \"10-15\", \"Stängt\"]

# Replace the built-in staff list:
# [[resources]]
# name = \"Sofia\"
# lastname = \"Seppälä\"
# image = \"sofia\"
# key = \"QN225Q\"
",
            DEFAULT_BASE_URL, DEFAULT_TIMEZONE
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                BookingError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| BookingError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
