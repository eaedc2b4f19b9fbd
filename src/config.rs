use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::info;
use validator::Validate;

const DEFAULT_ENV: &str = "development";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const CONFIG_DIR: &str = "config";

/// Crate configuration: where the ERP backend lives and how to talk to it.
///
/// Loaded from `config/default.toml`, an environment-specific overlay, and
/// `LEDGER_`-prefixed environment variables, in that order of precedence.
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct LedgerConfig {
    /// Base URL of the ERP REST backend, e.g. `https://erp.example.com`.
    #[validate(url)]
    pub api_base_url: String,

    /// Per-request timeout for backend calls.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Application environment name (development, staging, production).
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Logging level filter handed to the tracing subscriber.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_environment() -> String {
    DEFAULT_ENV.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl LedgerConfig {
    /// Programmatic constructor, used by tests and embedding applications.
    pub fn new(api_base_url: impl Into<String>, environment: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            environment: environment.into(),
            log_level: default_log_level(),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Initializes tracing using the provided log level as the default filter.
/// `RUST_LOG` overrides it when set. Safe to call more than once; later calls
/// are no-ops.
pub fn init_tracing(level: &str, json: bool) {
    use tracing_subscriber::fmt;

    let default_directive = format!("textile_ledger={}", level);
    let filter_directive = env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default_directive);

    if json {
        let _ = fmt().with_env_filter(filter_directive).json().try_init();
    } else {
        let _ = fmt().with_env_filter(filter_directive).try_init();
    }
}

#[derive(Debug, Error)]
pub enum LedgerConfigError {
    #[error("configuration load error: {0}")]
    Load(#[from] ConfigError),
    #[error("configuration validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Load configuration for the environment selected by `RUN_ENV` (falling
/// back to `LEDGER_ENV`, then to development).
pub fn load_config() -> Result<LedgerConfig, LedgerConfigError> {
    let run_env = env::var("RUN_ENV")
        .or_else(|_| env::var("LEDGER_ENV"))
        .unwrap_or_else(|_| DEFAULT_ENV.to_string());
    info!("Loading configuration for environment: {}", run_env);
    load_config_from(Path::new(CONFIG_DIR), &run_env)
}

/// Load from an explicit config directory: `default` first, then the
/// environment-specific overlay, then `LEDGER_`-prefixed variables. Missing
/// files are fine; built-in defaults cover every key.
pub fn load_config_from(config_dir: &Path, run_env: &str) -> Result<LedgerConfig, LedgerConfigError> {
    if !config_dir.exists() {
        info!(
            "Config directory '{}' not found; relying on built-in defaults and environment variables",
            config_dir.display()
        );
    }

    let settings = Config::builder()
        .set_default("api_base_url", "http://localhost:8000")?
        .set_default("request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS as i64)?
        .set_default("environment", run_env)?
        .set_default("log_level", DEFAULT_LOG_LEVEL)?
        .add_source(File::with_name(&config_dir.join("default").to_string_lossy()).required(false))
        .add_source(File::with_name(&config_dir.join(run_env).to_string_lossy()).required(false))
        .add_source(Environment::with_prefix("LEDGER").separator("__"))
        .build()?;

    let config: LedgerConfig = settings.try_deserialize()?;
    config.validate()?;
    Ok(config)
}
