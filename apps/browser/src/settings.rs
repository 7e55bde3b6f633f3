use std::{collections::HashMap, path::Path, time::Duration};

use anyhow::{bail, Context};
use catalog_core::CoordinatorConfig;
use chrono::Datelike;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

const DEFAULT_CONFIG_NAME: &str = "browser";
const ENV_PREFIX: &str = "APP";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub catalog_url: String,
    pub first_year: i32,
    pub request_timeout_secs: u64,
    /// Result pages fetched in one-shot mode.
    pub page_limit: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog_url: "http://127.0.0.1:8000/api".into(),
            first_year: 1900,
            request_timeout_secs: 10,
            page_limit: 1,
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn coordinator_config(&self) -> CoordinatorConfig {
        CoordinatorConfig {
            first_year: self.first_year,
            ..CoordinatorConfig::default()
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.catalog_url.trim().is_empty() {
            bail!("catalog_url must not be empty");
        }
        if self.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be positive");
        }
        if self.page_limit == 0 {
            bail!("page_limit must be at least 1");
        }
        let this_year = chrono::Local::now().year();
        if self.first_year > this_year {
            bail!(
                "first_year {} is after the current year {this_year}",
                self.first_year
            );
        }
        Ok(())
    }
}

/// Defaults, then `browser.toml` (or `path`), then `APP__*` environment variables.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    load_settings_from(path, None)
}

pub(crate) fn load_settings_from(
    path: Option<&Path>,
    env: Option<HashMap<String, String>>,
) -> anyhow::Result<Settings> {
    let defaults = Settings::default();
    let file = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
    };
    let settings = Config::builder()
        .set_default("catalog_url", defaults.catalog_url)?
        .set_default("first_year", i64::from(defaults.first_year))?
        .set_default("request_timeout_secs", defaults.request_timeout_secs as i64)?
        .set_default("page_limit", i64::from(defaults.page_limit))?
        .add_source(file)
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .source(env),
        )
        .build()
        .context("failed to read browser settings")?
        .try_deserialize::<Settings>()
        .context("invalid browser settings")?;
    Ok(settings)
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
