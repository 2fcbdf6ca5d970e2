use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::ImportError;
use crate::merger::MergePolicy;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Environment variable toggling subject correction (`true`/`false`/`1`/`0`).
pub const ENV_FIX_SUBJECTS: &str = "SUBJECT_FIX_ENABLED";
/// Environment variable overriding the subject similarity threshold.
pub const ENV_THRESHOLD: &str = "SUBJECT_SEUIL";
/// Environment variable overriding the output batch size.
pub const ENV_BATCH_SIZE: &str = "BATCH_SIZE";

/// Top-level importer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub import: ImportConfig,
    pub output: OutputConfig,
}

/// Settings consumed by the pipeline itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImportConfig {
    pub fix_subjects: bool,
    pub subject_similarity_threshold: f64,
    #[serde(default)]
    pub merge_policy: MergePolicy,
}

/// Settings for handing results to the persistence side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub batch_size: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        AppConfig::default().import
    }
}

impl AppConfig {
    /// Load config: the user file at `path` (or the platform config file if
    /// it exists), falling back to built-in defaults, then environment
    /// overrides.
    ///
    /// The result is not validated: command line flags still go on top, so
    /// callers validate the final value.
    pub fn load(path: Option<&Path>) -> Result<Self, ImportError> {
        Self::load_with_env(path, |key| std::env::var(key).ok())
    }

    /// [`AppConfig::load`] with environment variables read through `lookup`.
    pub fn load_with_env<F>(path: Option<&Path>, lookup: F) -> Result<Self, ImportError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let user_path = Self::config_path();
                if user_path.exists() {
                    Self::from_file(&user_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env(lookup)?;
        Ok(config)
    }

    /// Parse a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, ImportError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ImportError::Config(format!("{}: {e}", path.display())))?;
        toml::from_str(&content).map_err(|e| ImportError::Config(e.to_string()))
    }

    /// Apply environment overrides read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ImportError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_FIX_SUBJECTS) {
            self.import.fix_subjects = parse_flag(&value).ok_or_else(|| {
                ImportError::Config(format!(
                    "{ENV_FIX_SUBJECTS}: expected a boolean, got {value:?}"
                ))
            })?;
        }
        if let Some(value) = lookup(ENV_THRESHOLD) {
            self.import.subject_similarity_threshold = value.trim().parse().map_err(|_| {
                ImportError::Config(format!("{ENV_THRESHOLD}: expected a number, got {value:?}"))
            })?;
        }
        if let Some(value) = lookup(ENV_BATCH_SIZE) {
            self.output.batch_size = value.trim().parse().map_err(|_| {
                ImportError::Config(format!("{ENV_BATCH_SIZE}: expected an integer, got {value:?}"))
            })?;
        }
        Ok(())
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> Result<(), ImportError> {
        self.import.validate()?;
        if self.output.batch_size == 0 {
            return Err(ImportError::Config("batch_size must be greater than 0".into()));
        }
        Ok(())
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "miskatonic")
    }
}

impl ImportConfig {
    pub fn validate(&self) -> Result<(), ImportError> {
        let t = self.subject_similarity_threshold;
        if !(0.0..=1.0).contains(&t) {
            return Err(ImportError::Config(format!(
                "subject_similarity_threshold must be within [0, 1], got {t}"
            )));
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
