mod schema;

pub use schema::Config;

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable overriding the backend base URL, read at runtime and
/// at build time
pub const API_BASE_URL_ENV: &str = "TRENDING_API_BASE_URL";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

/// Get the config directory path (~/.config/js-trends/)
pub fn get_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("js-trends")
}

/// Get the default config file path (~/.config/js-trends/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Load configuration from a YAML file.
///
/// With no explicit `path`, a missing default file yields the defaults. An
/// explicit path that does not exist is an error.
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = path.unwrap_or_else(get_config_path);

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    parse_config(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))
}

fn parse_config(content: &str) -> Result<Config> {
    if content.trim().is_empty() {
        return Ok(Config::default());
    }
    let config: Config = serde_saphyr::from_str(content)?;
    if config.request_timeout_secs == Some(0) {
        anyhow::bail!("request_timeout_secs must be greater than 0");
    }
    Ok(config)
}

/// Resolve the backend base URL.
///
/// Precedence: command line, runtime environment, config file, build-time
/// environment, built-in default.
pub fn resolve_api_base_url(cli: Option<&str>, config: &Config) -> String {
    let runtime_env = std::env::var(API_BASE_URL_ENV).ok();
    pick_api_base_url(cli, runtime_env.as_deref(), config, option_env!("TRENDING_API_BASE_URL"))
}

fn pick_api_base_url(
    cli: Option<&str>,
    runtime_env: Option<&str>,
    config: &Config,
    build_env: Option<&str>,
) -> String {
    [cli, runtime_env, config.api_base_url.as_deref(), build_env]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|url| !url.is_empty())
        .unwrap_or(DEFAULT_API_BASE_URL)
        .to_string()
}

impl Config {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
