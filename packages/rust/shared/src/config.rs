//! Application configuration for statedocs.
//!
//! User config lives at `~/.statedocs/statedocs.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, StateDocsError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "statedocs.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".statedocs";

// ---------------------------------------------------------------------------
// Config structs (matching statedocs.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Directory crawl settings.
    #[serde(default)]
    pub crawl: CrawlSection,

    /// Output locations.
    #[serde(default)]
    pub output: OutputConfig,

    /// Tabular input files.
    #[serde(default)]
    pub input: InputConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Author identity cross-referenced from every rendered document.
    #[serde(default = "default_author")]
    pub author: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            author: default_author(),
        }
    }
}

fn default_author() -> String {
    "hayward-kory".into()
}

/// `[crawl]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlSection {
    /// Origin that listing hrefs are resolved against.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the directory listing page (also the sub-path detail links live under).
    #[serde(default = "default_directory_path")]
    pub directory_path: String,

    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Pause after every entity, in milliseconds.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CrawlSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            directory_path: default_directory_path(),
            user_agent: default_user_agent(),
            delay_ms: default_delay_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "https://www.ed.gov".into()
}
fn default_directory_path() -> String {
    "/contact-us/state-contacts".into()
}
fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/124.0.0.0 Safari/537.36"
        .into()
}
fn default_delay_ms() -> u64 {
    1000
}
fn default_timeout_secs() -> u64 {
    30
}

/// `[output]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_states_dir")]
    pub states_dir: String,

    #[serde(default = "default_boards_dir")]
    pub boards_dir: String,

    #[serde(default = "default_departments_dir")]
    pub departments_dir: String,

    /// Consolidated CSV written after a crawl.
    #[serde(default = "default_departments_export")]
    pub departments_export: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            states_dir: default_states_dir(),
            boards_dir: default_boards_dir(),
            departments_dir: default_departments_dir(),
            departments_export: default_departments_export(),
        }
    }
}

fn default_states_dir() -> String {
    "states".into()
}
fn default_boards_dir() -> String {
    "state-boards-of-education".into()
}
fn default_departments_dir() -> String {
    "state-departments-of-education".into()
}
fn default_departments_export() -> String {
    "state_departments_final.csv".into()
}

/// `[input]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_states_csv")]
    pub states_csv: String,

    #[serde(default = "default_boards_csv")]
    pub boards_csv: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            states_csv: default_states_csv(),
            boards_csv: default_boards_csv(),
        }
    }
}

fn default_states_csv() -> String {
    "state-boards-of-education.csv".into()
}
fn default_boards_csv() -> String {
    "state-boards-of-education-init.csv".into()
}

// ---------------------------------------------------------------------------
// Crawl config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime crawl configuration, validated from the `[crawl]` section.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Origin used to resolve listing hrefs.
    pub base_url: Url,
    /// Listing page path, e.g. `/contact-us/state-contacts`.
    pub directory_path: String,
    pub user_agent: String,
    /// Politeness delay applied after every entity.
    pub delay: Duration,
    pub timeout: Duration,
}

impl CrawlConfig {
    /// Full URL of the listing page.
    pub fn directory_url(&self) -> Result<Url> {
        self.base_url.join(&self.directory_path).map_err(|e| {
            StateDocsError::config(format!(
                "invalid directory path '{}': {e}",
                self.directory_path
            ))
        })
    }
}

impl TryFrom<&CrawlSection> for CrawlConfig {
    type Error = StateDocsError;

    fn try_from(section: &CrawlSection) -> Result<Self> {
        let base_url = Url::parse(&section.base_url).map_err(|e| {
            StateDocsError::config(format!("invalid base_url '{}': {e}", section.base_url))
        })?;

        if !section.directory_path.starts_with('/') {
            return Err(StateDocsError::config(format!(
                "directory_path must start with '/': {}",
                section.directory_path
            )));
        }

        Ok(Self {
            base_url,
            directory_path: section.directory_path.trim_end_matches('/').to_string(),
            user_agent: section.user_agent.clone(),
            delay: Duration::from_millis(section.delay_ms),
            timeout: Duration::from_secs(section.timeout_secs),
        })
    }
}

impl TryFrom<&AppConfig> for CrawlConfig {
    type Error = StateDocsError;

    fn try_from(config: &AppConfig) -> Result<Self> {
        Self::try_from(&config.crawl)
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.statedocs/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| StateDocsError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.statedocs/statedocs.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| StateDocsError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| StateDocsError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let path = config_file_path()?;
    init_config_at(&path)?;
    Ok(path)
}

/// Write a default config file at `path`, creating parent directories.
pub fn init_config_at(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| StateDocsError::io(dir, e))?;
    }

    let content = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| StateDocsError::config(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| StateDocsError::io(path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("departments_dir"));
        assert!(toml_str.contains("hayward-kory"));
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[crawl]
delay_ms = 0

[output]
departments_dir = "/tmp/departments"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.crawl.delay_ms, 0);
        assert_eq!(config.crawl.base_url, "https://www.ed.gov");
        assert_eq!(config.output.departments_dir, "/tmp/departments");
        assert_eq!(config.output.boards_dir, "state-boards-of-education");
        assert_eq!(config.input.boards_csv, "state-boards-of-education-init.csv");
    }

    #[test]
    fn crawl_config_from_app_config() {
        let crawl = CrawlConfig::try_from(&AppConfig::default()).expect("valid defaults");
        assert_eq!(crawl.delay, Duration::from_secs(1));
        assert_eq!(crawl.timeout, Duration::from_secs(30));
        assert_eq!(
            crawl.directory_url().unwrap().as_str(),
            "https://www.ed.gov/contact-us/state-contacts"
        );
    }

    #[test]
    fn crawl_config_rejects_bad_base_url() {
        let section = CrawlSection {
            base_url: "not a url".into(),
            ..CrawlSection::default()
        };
        let err = CrawlConfig::try_from(&section).unwrap_err();
        assert!(err.to_string().contains("invalid base_url"));
    }

    #[test]
    fn crawl_config_strips_trailing_slash() {
        let section = CrawlSection {
            directory_path: "/contact-us/state-contacts/".into(),
            ..CrawlSection::default()
        };
        let crawl = CrawlConfig::try_from(&section).unwrap();
        assert_eq!(crawl.directory_path, "/contact-us/state-contacts");
    }

    #[test]
    fn init_then_load_roundtrip() {
        let dir = std::env::temp_dir().join(format!("statedocs-config-{}", std::process::id()));
        let path = dir.join("statedocs.toml");
        init_config_at(&path).expect("init");
        let loaded = load_config_from(&path).expect("load");
        assert_eq!(loaded.defaults.author, "hayward-kory");
        assert_eq!(loaded.crawl.delay_ms, 1000);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
