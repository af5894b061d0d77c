//! Application configuration for refbuilder.
//!
//! User config lives at `~/.refbuilder/refbuilder.toml`.
//! CLI arguments override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{RefBuilderError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "refbuilder.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".refbuilder";

/// Trailing index section pointing at the hardware abstraction layer docs.
pub const DEFAULT_TRAILER: &str = "# Hardware Abstraction Layer

Mono builds on the mbed hardware abstraction layer. Low-level peripheral \
classes such as `DigitalOut`, `InterruptIn` and `Ticker` are documented in the \
[mbed API reference](https://developer.mbed.org/handbook/Homepage).
";

// ---------------------------------------------------------------------------
// Config structs (matching refbuilder.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Input and destination defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Breathe directive parameters.
    #[serde(default)]
    pub directive: DirectiveConfig,

    /// Index page layout.
    #[serde(default)]
    pub index: IndexConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// API list read when no input path is given.
    #[serde(default = "default_input")]
    pub input: String,

    /// Directory written when no destination is given.
    #[serde(default = "default_destination")]
    pub destination: String,

    /// Create the destination directory instead of failing when it is missing.
    #[serde(default)]
    pub create_destination: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            destination: default_destination(),
            create_destination: false,
        }
    }
}

fn default_input() -> String {
    "api_classes.txt".into()
}
fn default_destination() -> String {
    "reference".into()
}

/// `[directive]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectiveConfig {
    /// Breathe project name.
    #[serde(default = "default_project")]
    pub project: String,

    /// Doxygen XML directory, relative to the documentation root.
    #[serde(default = "default_xml_path")]
    pub path: String,

    /// Emit `:members:`.
    #[serde(default = "default_true")]
    pub members: bool,

    /// Emit `:protected-members:`.
    #[serde(default = "default_true")]
    pub protected_members: bool,
}

impl Default for DirectiveConfig {
    fn default() -> Self {
        Self {
            project: default_project(),
            path: default_xml_path(),
            members: true,
            protected_members: true,
        }
    }
}

fn default_project() -> String {
    "monoapi".into()
}
fn default_xml_path() -> String {
    "xml".into()
}
fn default_true() -> bool {
    true
}

/// `[index]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Level-1 heading of the index page.
    #[serde(default = "default_title")]
    pub title: String,

    /// File name of the index page inside the destination.
    #[serde(default = "default_index_file")]
    pub file_name: String,

    /// Free-form markdown appended after the bullet list. Empty disables it.
    #[serde(
        default = "default_trailer",
        skip_serializing_if = "Option::is_none"
    )]
    pub trailer: Option<String>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            file_name: default_index_file(),
            trailer: default_trailer(),
        }
    }
}

fn default_title() -> String {
    "API Reference".into()
}
fn default_index_file() -> String {
    "reference.md".into()
}
fn default_trailer() -> Option<String> {
    Some(DEFAULT_TRAILER.into())
}

impl IndexConfig {
    /// The trailer to render, treating an empty string as absent.
    pub fn trailer(&self) -> Option<&str> {
        self.trailer.as_deref().filter(|t| !t.trim().is_empty())
    }
}

// ---------------------------------------------------------------------------
// Build config (runtime, merged from config + CLI arguments)
// ---------------------------------------------------------------------------

/// Runtime build configuration, merged from config file + CLI arguments.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Path of the API list.
    pub input: PathBuf,
    /// Directory receiving the generated pages and index.
    pub destination: PathBuf,
    /// Create `destination` when missing.
    pub create_destination: bool,
    /// Directive parameters.
    pub directive: DirectiveConfig,
    /// Index layout.
    pub index: IndexConfig,
}

impl From<&AppConfig> for BuildConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            input: PathBuf::from(&config.defaults.input),
            destination: PathBuf::from(&config.defaults.destination),
            create_destination: config.defaults.create_destination,
            directive: config.directive.clone(),
            index: config.index.clone(),
        }
    }
}

impl BuildConfig {
    /// Apply optional CLI overrides for the input and destination paths.
    pub fn with_paths(mut self, input: Option<PathBuf>, destination: Option<PathBuf>) -> Self {
        if let Some(input) = input {
            self.input = input;
        }
        if let Some(destination) = destination {
            self.destination = destination;
        }
        self
    }

    /// Full path of the index page.
    pub fn index_path(&self) -> PathBuf {
        self.destination.join(&self.index.file_name)
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.refbuilder/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| RefBuilderError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.refbuilder/refbuilder.toml`).
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
    let content = std::fs::read_to_string(path).map_err(|e| RefBuilderError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        RefBuilderError::config(format!("failed to parse {}: {e}", path.display()))
    })?;
    validate_config(&config)?;
    Ok(config)
}

/// Write a default config file to `path`, creating parent directories.
pub fn init_config_at(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| RefBuilderError::io(dir, e))?;
    }

    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| RefBuilderError::config(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| RefBuilderError::io(path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(())
}

/// Reject values that would produce unusable output.
pub fn validate_config(config: &AppConfig) -> Result<()> {
    if config.directive.project.trim().is_empty() {
        return Err(RefBuilderError::config("directive.project must not be empty"));
    }
    let index_file = &config.index.file_name;
    if index_file.trim().is_empty() || index_file.contains(['/', '\\']) {
        return Err(RefBuilderError::config(format!(
            "index.file_name must be a plain file name, got '{index_file}'"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("api_classes.txt"));
        assert!(toml_str.contains("monoapi"));
        assert!(toml_str.contains("Hardware Abstraction Layer"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.defaults.destination, "reference");
        assert_eq!(parsed.directive, DirectiveConfig::default());
        assert_eq!(parsed.index, IndexConfig::default());
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let toml_str = r#"
[directive]
project = "otherapi"
protected_members = false

[index]
trailer = ""
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.directive.project, "otherapi");
        assert_eq!(config.directive.path, "xml");
        assert!(config.directive.members);
        assert!(!config.directive.protected_members);
        assert_eq!(config.index.title, "API Reference");
        assert!(config.index.trailer().is_none());
        assert_eq!(config.defaults.input, "api_classes.txt");
    }

    #[test]
    fn build_config_overrides_paths() {
        let app = AppConfig::default();
        let build = BuildConfig::from(&app);
        assert_eq!(build.input, PathBuf::from("api_classes.txt"));
        assert_eq!(build.index_path(), PathBuf::from("reference/reference.md"));

        let build = build.with_paths(Some("list.txt".into()), None);
        assert_eq!(build.input, PathBuf::from("list.txt"));
        assert_eq!(build.destination, PathBuf::from("reference"));
    }

    #[test]
    fn rejects_index_file_with_separator() {
        let mut config = AppConfig::default();
        config.index.file_name = "nested/reference.md".into();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("plain file name"));
    }

    #[test]
    fn init_then_load_from_path() {
        let dir = std::env::temp_dir().join(format!("rb-config-test-{}", uuid::Uuid::now_v7()));
        let path = dir.join("refbuilder.toml");

        init_config_at(&path).unwrap();
        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.index.file_name, "reference.md");
        assert_eq!(loaded.index.trailer(), Some(DEFAULT_TRAILER));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let path = std::env::temp_dir().join(format!("rb-missing-{}.toml", uuid::Uuid::now_v7()));
        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, RefBuilderError::Io { .. }));
    }
}
