//! Simple CLI configuration loader for bx
//!
//! Implements single-source priority loading with flag overrides:
//! 1. --config file/dir (highest priority)
//! 2. Current working directory: ./bx.json or ./.bx/config.json
//! 3. Git repository root: <repo_root>/.bx/config.json
//! 4. XDG config: $XDG_CONFIG_HOME/bx/config.json or ~/.config/bx/config.json
//! 5. Built-in defaults (no files)

use crate::interactive::pages::default_routes;
use anyhow::{anyhow, Context, Result};
use bx_core::history::DEFAULT_MAX_ENTRIES;
use bx_core::{ConfigError, Location, RouteEntry};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default application title shown in the layout header
pub const DEFAULT_TITLE: &str = "bx";

/// Raw configuration file format (every field optional)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawConfig {
    /// Title shown in the layout header
    pub title: Option<String>,
    /// Location the history starts at
    pub initial_location: Option<String>,
    /// Maximum number of history entries
    pub max_history: Option<usize>,
    /// Route table override, in evaluation order
    pub routes: Option<Vec<RouteEntry>>,
}

/// Fully resolved application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub title: String,
    pub initial_location: Location,
    pub max_history: usize,
    pub routes: Vec<RouteEntry>,
    /// File the configuration came from, if any
    pub source: Option<PathBuf>,
}

/// CLI configuration loader
pub struct CliConfigLoader {
    /// Override config file/directory path
    config_override: Option<PathBuf>,
    /// Flag overrides
    title_override: Option<String>,
    initial_location_override: Option<String>,
}

impl CliConfigLoader {
    /// Create a new loader
    pub fn new() -> Self {
        Self {
            config_override: None,
            title_override: None,
            initial_location_override: None,
        }
    }

    /// Set config file/directory override; `~` is expanded
    pub fn with_config_override(mut self, path: PathBuf) -> Self {
        let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
        self.config_override = Some(PathBuf::from(expanded));
        self
    }

    /// Set title override
    pub fn with_title_override(mut self, title: String) -> Self {
        self.title_override = Some(title);
        self
    }

    /// Set initial location override
    pub fn with_initial_location_override(mut self, location: String) -> Self {
        self.initial_location_override = Some(location);
        self
    }

    /// Load and resolve configuration
    pub async fn load(&self) -> Result<AppConfig> {
        let cwd = std::env::current_dir()?;
        self.load_from(&cwd).await
    }

    /// Load and resolve configuration, searching from `start_dir`
    pub async fn load_from(&self, start_dir: &Path) -> Result<AppConfig> {
        // Step 1: Find and load base configuration
        let (mut config, source) = if let Some(override_path) = &self.config_override {
            let (config, path) = self.load_from_path(override_path).await.with_context(|| {
                format!(
                    "Failed to load config from override path: {}",
                    override_path.display()
                )
            })?;
            (config, Some(path))
        } else {
            match self.search_and_load(start_dir).await? {
                Some((config, path)) => (config, Some(path)),
                None => (RawConfig::default(), None),
            }
        };

        if let Some(path) = &source {
            debug!("Loaded configuration from {}", path.display());
        } else {
            debug!("No configuration file found, using defaults");
        }

        // Step 2: Apply flag overrides
        if let Some(title) = &self.title_override {
            config.title = Some(title.clone());
        }
        if let Some(location) = &self.initial_location_override {
            config.initial_location = Some(location.clone());
        }

        // Step 3: Resolve to final config
        resolve_config(config, source)
    }

    /// Search for config in priority order
    async fn search_and_load(&self, start_dir: &Path) -> Result<Option<(RawConfig, PathBuf)>> {
        let mut candidates = vec![
            start_dir.join("bx.json"),
            start_dir.join(".bx").join("config.json"),
        ];
        if let Some(git_root) = find_git_root(start_dir) {
            candidates.push(git_root.join(".bx").join("config.json"));
        }
        if let Some(config_dir) = xdg_config_dir() {
            candidates.push(config_dir.join("bx").join("config.json"));
        }

        for candidate in candidates {
            if candidate.is_file() {
                let config = load_file(&candidate).await?;
                return Ok(Some((config, candidate)));
            }
        }
        Ok(None)
    }

    /// Load configuration from a specific path (file or directory)
    async fn load_from_path(&self, path: &Path) -> Result<(RawConfig, PathBuf)> {
        if path.is_file() {
            Ok((load_file(path).await?, path.to_path_buf()))
        } else if path.is_dir() {
            // Try config.json in the directory
            let config_file = path.join("config.json");
            if config_file.exists() {
                Ok((load_file(&config_file).await?, config_file))
            } else {
                Err(anyhow!(
                    "No config.json found in directory: {}",
                    path.display()
                ))
            }
        } else {
            Err(anyhow!("Config path does not exist: {}", path.display()))
        }
    }
}

impl Default for CliConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Load a single config file
async fn load_file(path: &Path) -> Result<RawConfig> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Find git repository root
fn find_git_root(start_dir: &Path) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

/// Get XDG config directory
fn xdg_config_dir() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
}

/// Fill defaults and validate
fn resolve_config(config: RawConfig, source: Option<PathBuf>) -> Result<AppConfig> {
    let title = config.title.unwrap_or_else(|| DEFAULT_TITLE.to_string());
    if title.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "title".to_string(),
            value: title,
        }
        .into());
    }

    let max_history = config.max_history.unwrap_or(DEFAULT_MAX_ENTRIES);
    if max_history == 0 {
        return Err(ConfigError::InvalidValue {
            field: "max_history".to_string(),
            value: max_history.to_string(),
        }
        .into());
    }

    let initial_location = config
        .initial_location
        .map(|l| Location::parse(&l))
        .unwrap_or_default();

    Ok(AppConfig {
        title,
        initial_location,
        max_history,
        routes: config.routes.unwrap_or_else(default_routes),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &Path, relative: &str, content: &str) -> PathBuf {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn test_defaults_without_files() {
        let temp_dir = TempDir::new().unwrap();
        let config = resolve_config(RawConfig::default(), None).unwrap();
        assert_eq!(config.title, DEFAULT_TITLE);
        assert_eq!(config.initial_location, Location::root());
        assert_eq!(config.max_history, DEFAULT_MAX_ENTRIES);
        assert_eq!(config.routes, default_routes());

        let loader = CliConfigLoader::new();
        let found = loader.search_and_load(temp_dir.path()).await.unwrap();
        // Only a user-level config could be found here
        if let Some((_, path)) = found {
            assert!(!path.starts_with(temp_dir.path()));
        }
    }

    #[tokio::test]
    async fn test_loads_cwd_file_first() {
        let temp_dir = TempDir::new().unwrap();
        write_config(temp_dir.path(), "bx.json", r#"{"title": "From root file"}"#);
        write_config(temp_dir.path(), ".bx/config.json", r#"{"title": "From dir"}"#);

        let config = CliConfigLoader::new()
            .load_from(temp_dir.path())
            .await
            .unwrap();
        assert_eq!(config.title, "From root file");
        assert_eq!(config.source, Some(temp_dir.path().join("bx.json")));
    }

    #[tokio::test]
    async fn test_git_root_config() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join(".git")).unwrap();
        write_config(
            temp_dir.path(),
            ".bx/config.json",
            r#"{"initial_location": "/about"}"#,
        );
        let nested = temp_dir.path().join("src").join("deep");
        fs::create_dir_all(&nested).unwrap();

        let config = CliConfigLoader::new().load_from(&nested).await.unwrap();
        assert_eq!(config.initial_location.pathname, "/about");
    }

    #[tokio::test]
    async fn test_override_directory_and_flags() {
        let temp_dir = TempDir::new().unwrap();
        write_config(
            temp_dir.path(),
            "config.json",
            r#"{
                "title": "Configured",
                "max_history": 5,
                "routes": [{"path": "/", "page": "home", "exact": true}]
            }"#,
        );

        let config = CliConfigLoader::new()
            .with_config_override(temp_dir.path().to_path_buf())
            .with_title_override("Flagged".to_string())
            .with_initial_location_override("/users/2?tab=x".to_string())
            .load_from(Path::new("/"))
            .await
            .unwrap();

        assert_eq!(config.title, "Flagged");
        assert_eq!(config.max_history, 5);
        assert_eq!(config.routes.len(), 1);
        assert!(config.routes[0].exact);
        assert_eq!(config.initial_location.pathname, "/users/2");
        assert_eq!(config.initial_location.search, "?tab=x");
    }

    #[tokio::test]
    async fn test_missing_override_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = CliConfigLoader::new()
            .with_config_override(temp_dir.path().join("nope.json"))
            .load_from(temp_dir.path())
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_invalid_values_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(temp_dir.path(), "bx.json", r#"{"max_history": 0}"#);
        let err = CliConfigLoader::new()
            .with_config_override(path)
            .load_from(temp_dir.path())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("max_history"));

        let path = write_config(temp_dir.path(), "broken.json", "{ not json");
        let err = CliConfigLoader::new()
            .with_config_override(path)
            .load_from(temp_dir.path())
            .await
            .unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config file"));
    }
}
