// Configuration loading and parsing (config/scout.toml).

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// scout.toml structs
// ---------------------------------------------------------------------------

/// Name of the config file inside `config/` and `defaults/`.
pub const CONFIG_FILE: &str = "scout.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    pub filters: FilterConfig,
    pub export: ExportConfig,
    #[serde(default)]
    pub ui: UiConfig,
    /// Extra or overriding team catalog entries: team name → logo path.
    #[serde(default)]
    pub teams: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Dataset locations, tried in order. Relative paths resolve against the
    /// working directory.
    pub candidates: Vec<String>,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FilterConfig {
    pub default_min_minutes: u32,
    pub minutes_step: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    pub dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    pub team_grid_columns: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            team_grid_columns: 6,
        }
    }
}

fn default_delimiter() -> String {
    ",".to_string()
}

impl Config {
    /// Delimiter byte. Validation guarantees a single ASCII character.
    pub fn delimiter(&self) -> u8 {
        self.data.delimiter.as_bytes().first().copied().unwrap_or(b',')
    }

    /// Candidate dataset paths: configured entries resolved against
    /// `base_dir`, then `df.csv` in the platform data directory.
    pub fn dataset_candidates(&self, base_dir: &Path) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self
            .data
            .candidates
            .iter()
            .map(|c| {
                let p = PathBuf::from(c);
                if p.is_absolute() {
                    p
                } else {
                    base_dir.join(p)
                }
            })
            .collect();
        if let Some(dirs) = directories::ProjectDirs::from("es", "ffcv", "ffcv-scout") {
            paths.push(dirs.data_dir().join("df.csv"));
        }
        paths
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/scout.toml` relative to `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy defaults.
/// Prefer `load_config()` which handles default initialization automatically.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    validate(&config)?;

    Ok(config)
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied. Existing files are left alone.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    let mut copied = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };

        let target = config_dir.join(file_name);
        if target.exists() {
            continue;
        }
        std::fs::copy(&path, &target).map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to copy {} to {}: {e}", path.display(), target.display()),
        })?;
        copied.push(target);
    }

    Ok(copied)
}

/// Convenience wrapper: loads config relative to the current working directory.
/// Ensures default config files are copied before loading.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.data.candidates.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data.candidates".into(),
            message: "must list at least one dataset path".into(),
        });
    }

    let delim = &config.data.delimiter;
    if delim.len() != 1 || !delim.is_ascii() {
        return Err(ConfigError::ValidationError {
            field: "data.delimiter".into(),
            message: format!("must be a single ASCII character, got {delim:?}"),
        });
    }

    if config.filters.minutes_step == 0 {
        return Err(ConfigError::ValidationError {
            field: "filters.minutes_step".into(),
            message: "must be > 0".into(),
        });
    }

    if config.ui.team_grid_columns == 0 {
        return Err(ConfigError::ValidationError {
            field: "ui.team_grid_columns".into(),
            message: "must be > 0".into(),
        });
    }

    if config.export.dir.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "export.dir".into(),
            message: "must not be empty".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
