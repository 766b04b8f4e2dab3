//! Configuration loading from TOML files.
//!
//! Config is loaded in this order of precedence (highest wins):
//! 1. TOML file specified via the --config CLI flag
//! 2. ./comp.toml in the current directory
//! 3. Built-in defaults

use crate::error::ConfigError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_FILE: &str = "comp.toml";
const DEFAULT_COMPOSE_FILE: &str = "docker-compose.yml";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 6000;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_DATABASE_SERVICE: &str = "mysqld";
const DEFAULT_MIGRATE_COMMAND: &str = "initialize";
const DEFAULT_SHELL_COMMAND: &str = "bash";

/// Top-level runtime configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub compose: ComposeConfig,
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub services: ServicesConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Host port configured for an app, if the app is known.
    pub fn port_for(&self, app: &str) -> Option<u16> {
        self.app.ports.get(app).copied()
    }

    /// Known app names, sorted.
    pub fn known_apps(&self) -> Vec<&str> {
        self.app.ports.keys().map(String::as_str).collect()
    }
}

/// Compose invocation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ComposeConfig {
    /// Compose files passed as `-f` flags, in order.
    #[serde(default = "default_compose_files")]
    pub files: Vec<String>,
    /// Directory docker-compose runs from.
    #[serde(default = "default_project_dir")]
    pub project_dir: PathBuf,
    /// Exported as COMPOSE_HTTP_TIMEOUT for every invocation.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            files: default_compose_files(),
            project_dir: default_project_dir(),
            http_timeout_secs: default_http_timeout(),
        }
    }
}

/// Application stack settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_host")]
    pub host: String,
    /// Host ports keyed by app name.
    #[serde(default = "default_ports")]
    pub ports: BTreeMap<String, u16>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            ports: default_ports(),
        }
    }
}

/// Service names and one-off commands used by workflows.
#[derive(Debug, Clone, Deserialize)]
pub struct ServicesConfig {
    /// Service hosting the database, used by `migrate`.
    #[serde(default = "default_database_service")]
    pub database: String,
    /// One-off command run inside the database service by `migrate`.
    #[serde(default = "default_migrate_command")]
    pub migrate_command: String,
    /// Command `shell` execs inside the chosen service.
    #[serde(default = "default_shell_command")]
    pub shell_command: String,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            database: default_database_service(),
            migrate_command: default_migrate_command(),
            shell_command: default_shell_command(),
        }
    }
}

/// Terminal display settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
        }
    }
}

fn default_compose_files() -> Vec<String> {
    vec![DEFAULT_COMPOSE_FILE.to_string()]
}

fn default_project_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_http_timeout() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECS
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_ports() -> BTreeMap<String, u16> {
    BTreeMap::from([("api".to_string(), 8000), ("admin".to_string(), 3000)])
}

fn default_database_service() -> String {
    DEFAULT_DATABASE_SERVICE.to_string()
}

fn default_migrate_command() -> String {
    DEFAULT_MIGRATE_COMMAND.to_string()
}

fn default_shell_command() -> String {
    DEFAULT_SHELL_COMMAND.to_string()
}

fn default_color() -> bool {
    true
}

/// Load configuration, preferring an explicit --config path, then
/// ./comp.toml, then built-in defaults.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    if let Some(path) = path {
        return parse_file(Path::new(path));
    }
    let local = Path::new(DEFAULT_CONFIG_FILE);
    if local.exists() {
        return parse_file(local);
    }
    Ok(Config::default())
}

fn parse_file(path: &Path) -> Result<Config, ConfigError> {
    let raw = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&raw)?;
    if config.compose.files.is_empty() {
        return Err(ConfigError::Invalid(
            "compose.files must not be empty".into(),
        ));
    }
    Ok(config)
}
