pub mod browse;
pub mod hours;
pub mod resources;
pub mod schedule;
pub mod services;

use std::path::Path;

use anyhow::{Context, Result};
use chrono_tz::Tz;
use salon_core::Resource;
use salon_core::config::SalonConfig;
use salon_core::remote::BookingApi;

/// Everything a command needs, resolved once from config and flags.
pub struct Salon {
    pub config: SalonConfig,
    pub tz: Tz,
    pub roster: Vec<Resource>,
    pub api: BookingApi,
}

impl Salon {
    pub fn load(config_path: Option<&Path>, base_url: Option<String>) -> Result<Self> {
        let mut config = SalonConfig::load(config_path).context("Failed to load configuration")?;
        if let Some(url) = base_url {
            config = config
                .with_base_url(url)
                .context("Invalid --base-url")?;
        }

        let tz = config.tz()?;
        let api = BookingApi::from_config(&config)?;
        let roster = config.roster();
        tracing::debug!(base_url = %config.base_url, timezone = %tz, resources = roster.len(), "configuration loaded");

        if roster.is_empty() {
            anyhow::bail!("No resources configured. Remove the empty `resources` list from the config file.");
        }

        Ok(Salon {
            config,
            tz,
            roster,
            api,
        })
    }
}
