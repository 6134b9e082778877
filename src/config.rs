//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/checktree/checktree.toml`
//! 3. Local config: a file passed by the caller
//! 4. Environment variables: `CHECKTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::{SelectionFields, Value};
use crate::errors::{CheckTreeError, CheckTreeResult};

/// Raw selection config for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSelectionFields {
    pub checked: Option<String>,
    pub indeterminate: Option<String>,
    pub key: Option<String>,
    pub root_parent: Option<Value>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub selection: RawSelectionFields,
}

/// Unified configuration for checktree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Settings {
    /// Field names and root sentinel used by selection propagation
    pub selection: SelectionFields,
}

/// Get the XDG config directory for checktree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "checktree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("checktree.toml"))
}

/// Expand `~`, `$VAR` and `${VAR}` in a path, leaving it untouched on failure.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

fn config_err(e: impl std::fmt::Display) -> CheckTreeError {
    CheckTreeError::Config {
        message: e.to_string(),
    }
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> CheckTreeResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| CheckTreeError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| CheckTreeError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl SelectionFields {
    /// Overlay wins where it specifies a value, otherwise keep self.
    pub fn merge(&self, overlay: &RawSelectionFields) -> Self {
        Self {
            checked: overlay
                .checked
                .clone()
                .unwrap_or_else(|| self.checked.clone()),
            indeterminate: overlay
                .indeterminate
                .clone()
                .unwrap_or_else(|| self.indeterminate.clone()),
            key: overlay.key.clone().unwrap_or_else(|| self.key.clone()),
            root_parent: overlay
                .root_parent
                .clone()
                .unwrap_or_else(|| self.root_parent.clone()),
        }
    }
}

impl Settings {
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            selection: self.selection.merge(&overlay.selection),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local` - Optional config file layered over the global one
    pub fn load(local: Option<&Path>) -> CheckTreeResult<Self> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(local) = local {
            current = current.merge_with(&Self::load_file(local)?);
        }

        Self::apply_env_overrides(current)
    }

    /// Load a single config file; a missing file is an error here.
    #[instrument(level = "debug")]
    pub fn load_file(path: &Path) -> CheckTreeResult<RawSettings> {
        let path = expand_path(path);
        if !path.exists() {
            return Err(CheckTreeError::Config {
                message: format!("config file not found: {}", path.display()),
            });
        }
        load_raw_settings(&path)
    }

    /// Apply `CHECKTREE_SELECTION__*` environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> CheckTreeResult<Self> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("CHECKTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("selection.checked") {
            settings.selection.checked = val;
        }
        if let Ok(val) = config.get_string("selection.indeterminate") {
            settings.selection.indeterminate = val;
        }
        if let Ok(val) = config.get_string("selection.key") {
            settings.selection.key = val;
        }
        if let Ok(val) = config.get_string("selection.root_parent") {
            settings.selection.root_parent = Value::parse_scalar(&val);
        }
        debug!("settings: {:?}", settings);

        Ok(settings)
    }
}
