//! Configuration loading and typed config structures for the Algoviz server.
//!
//! The configuration lives in `algoviz-config.yaml` at the project root. Every
//! field has a default, so a missing file or an empty document yields a
//! working development setup. A handful of environment variables override
//! the file after it is loaded; see [`AppConfig::apply_env_overrides`].

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value parsed but cannot be used.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// What was wrong.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level server configuration.
///
/// Mirrors the structure of `algoviz-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Listener and CORS settings.
    #[serde(default)]
    pub server: ServerSection,

    /// Input and execution limits.
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Benchmark runner settings.
    #[serde(default)]
    pub benchmark: BenchmarkConfig,

    /// Session retention.
    #[serde(default)]
    pub sessions: SessionConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Override values from the process environment.
    ///
    /// - `PORT`, `HOST`, `ENVIRONMENT` override `server`
    /// - `MAX_EXECUTION_TIME` (seconds) and `MAX_DATA_SIZE` override `limits`
    /// - `BENCHMARK_TIMEOUT` (seconds) and `MAX_CONCURRENT_TESTS` override
    ///   `benchmark`
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Override values using `lookup` as the environment. Numeric values
    /// that do not parse are ignored with a warning.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(environment) = lookup("ENVIRONMENT") {
            self.server.environment = environment;
        }
        override_number(&lookup, "PORT", &mut self.server.port);
        override_number(
            &lookup,
            "MAX_EXECUTION_TIME",
            &mut self.limits.max_execution_time_secs,
        );
        override_number(&lookup, "MAX_DATA_SIZE", &mut self.limits.max_data_size);
        override_number(&lookup, "BENCHMARK_TIMEOUT", &mut self.benchmark.timeout_secs);
        override_number(
            &lookup,
            "MAX_CONCURRENT_TESTS",
            &mut self.benchmark.max_concurrent_tests,
        );
    }

    /// Rejects values the server cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            (self.limits.max_execution_time_secs == 0, "limits.max_execution_time_secs must be positive"),
            (self.limits.max_data_size == 0, "limits.max_data_size must be positive"),
            (self.benchmark.timeout_secs == 0, "benchmark.timeout_secs must be positive"),
            (self.benchmark.max_concurrent_tests == 0, "benchmark.max_concurrent_tests must be positive"),
            (self.benchmark.default_test_count == 0, "benchmark.default_test_count must be positive"),
            (self.sessions.sweep_interval_secs == 0, "sessions.sweep_interval_secs must be positive"),
        ];
        match checks.iter().find(|(failed, _)| *failed) {
            Some((_, reason)) => Err(ConfigError::Invalid {
                reason: (*reason).to_owned(),
            }),
            None => Ok(()),
        }
    }
}

fn override_number<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    target: &mut T,
) {
    let Some(raw) = lookup(key) else {
        return;
    };
    match raw.trim().parse() {
        Ok(value) => *target = value,
        Err(_) => tracing::warn!(key, value = %raw, "ignoring unparseable environment override"),
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSection {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Deployment name (development, production).
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Origins allowed by CORS. Empty allows any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: default_environment(),
            allowed_origins: Vec::new(),
        }
    }
}

/// Input and execution limits for visualization requests.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LimitsConfig {
    /// Wall-clock budget for one algorithm run, in seconds.
    #[serde(default = "default_max_execution_time_secs")]
    pub max_execution_time_secs: u64,

    /// Largest sequence or generated dataset accepted.
    #[serde(default = "default_max_data_size")]
    pub max_data_size: usize,

    /// Steps kept per session. Later steps are counted but dropped.
    #[serde(default = "default_max_recorded_steps")]
    pub max_recorded_steps: usize,
}

impl LimitsConfig {
    /// Execution budget as a [`Duration`].
    pub const fn max_execution_time(&self) -> Duration {
        Duration::from_secs(self.max_execution_time_secs)
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_execution_time_secs: default_max_execution_time_secs(),
            max_data_size: default_max_data_size(),
            max_recorded_steps: default_max_recorded_steps(),
        }
    }
}

/// Benchmark runner settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BenchmarkConfig {
    /// Budget for one whole benchmark test, in seconds.
    #[serde(default = "default_benchmark_timeout_secs")]
    pub timeout_secs: u64,

    /// Runs executing at the same time across all tests.
    #[serde(default = "default_max_concurrent_tests")]
    pub max_concurrent_tests: usize,

    /// Repetitions per algorithm and size when a request omits it.
    #[serde(default = "default_test_count")]
    pub default_test_count: u32,
}

impl BenchmarkConfig {
    /// Per-test budget as a [`Duration`].
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_benchmark_timeout_secs(),
            max_concurrent_tests: default_max_concurrent_tests(),
            default_test_count: default_test_count(),
        }
    }
}

/// Session retention.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionConfig {
    /// Age after which a session is removed.
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: u64,

    /// Seconds between expiry sweeps.
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

impl SessionConfig {
    /// Session lifetime as a [`Duration`].
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_hours.saturating_mul(3600))
    }

    /// Sweep period as a [`Duration`].
    pub const fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_hours: default_ttl_hours(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    8080
}

fn default_environment() -> String {
    "development".to_owned()
}

const fn default_max_execution_time_secs() -> u64 {
    30
}

const fn default_max_data_size() -> usize {
    10_000
}

const fn default_max_recorded_steps() -> usize {
    50_000
}

const fn default_benchmark_timeout_secs() -> u64 {
    60
}

const fn default_max_concurrent_tests() -> usize {
    5
}

const fn default_test_count() -> u32 {
    3
}

const fn default_ttl_hours() -> u64 {
    24
}

const fn default_sweep_interval_secs() -> u64 {
    600
}

fn default_log_level() -> String {
    "info".to_owned()
}
