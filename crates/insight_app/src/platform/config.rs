//! Startup configuration: an optional RON file plus environment overrides.

use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context};
use insight_engine::{ApiBase, ClientSettings, EstimatorSettings};
use insight_logging::parse_level_filter;
use log::LevelFilter;
use serde::Deserialize;

use super::logging::LogDestination;

pub const API_BASE_ENV: &str = "RESUME_INSIGHT_API_BASE";
pub const CONFIG_PATH_ENV: &str = "RESUME_INSIGHT_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "./resume_insight.ron";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Empty means "not set in the file".
    pub api_base: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub progress_interval_ms: u64,
    pub progress_max_step: f64,
    pub progress_clear_delay_ms: u64,
    pub log_destination: LogDestination,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            connect_timeout_secs: 10,
            request_timeout_secs: 60,
            progress_interval_ms: 200,
            progress_max_step: 5.0,
            progress_clear_delay_ms: 300,
            log_destination: LogDestination::File,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    pub fn estimator_settings(&self) -> EstimatorSettings {
        EstimatorSettings {
            interval: Duration::from_millis(self.progress_interval_ms),
            max_step: self.progress_max_step,
            clear_delay: Duration::from_millis(self.progress_clear_delay_ms),
        }
    }

    /// `None` when `log_level` is not a known level name.
    pub fn parsed_log_level(&self) -> Option<LevelFilter> {
        parse_level_filter(&self.log_level)
    }

    pub fn log_level_filter(&self) -> LevelFilter {
        self.parsed_log_level().unwrap_or(LevelFilter::Info)
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub settings: AppConfig,
    pub api_base: ApiBase,
}

/// Loads `.env`, then the config file, then applies environment overrides.
pub fn load() -> anyhow::Result<ResolvedConfig> {
    // A missing .env is the normal case.
    let _ = dotenvy::dotenv();

    let path = env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let env_base = env::var(API_BASE_ENV).ok();
    resolve(&path, env_base.as_deref())
}

pub(crate) fn resolve(path: &Path, env_base: Option<&str>) -> anyhow::Result<ResolvedConfig> {
    let settings = read_config_file(path)?;

    let raw_base = env_base
        .filter(|value| !value.trim().is_empty())
        .or_else(|| Some(settings.api_base.as_str()).filter(|value| !value.trim().is_empty()))
        .ok_or_else(|| {
            anyhow!(
                "no API base URL configured: set {} or `api_base` in {}",
                API_BASE_ENV,
                path.display()
            )
        })?;
    let api_base =
        ApiBase::parse(raw_base).with_context(|| format!("invalid API base URL {raw_base:?}"))?;

    Ok(ResolvedConfig { settings, api_base })
}

fn read_config_file(path: &Path) -> anyhow::Result<AppConfig> {
    match fs::read_to_string(path) {
        Ok(text) => ron::from_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display())),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(err) => {
            Err(err).with_context(|| format!("failed to read config file {}", path.display()))
        }
    }
}
