//! Settings persistence - load and save settings to disk.
//!
//! Settings are stored in the platform-specific configuration folder:
//! - macOS: ~/Library/Application Support/dev.metadata-schema-duplicator.msd/
//! - Windows: %APPDATA%/metadata-schema-duplicator/msd/config/
//! - Linux: ~/.config/msd/

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use msd_core::ApplySettings;
use msd_remote::RemoteSettings;

const APP_QUALIFIER: &str = "dev";
const APP_ORG: &str = "metadata-schema-duplicator";
const APP_NAME: &str = "msd";
const CONFIG_FILENAME: &str = "settings.toml";

/// Everything the CLI remembers between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Destination used by `copy` when `--to` is omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_destination: Option<String>,
    pub remote: RemoteSettings,
    pub apply: ApplySettings,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not determine the settings path")]
    NoPath,
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Get the path to the settings file.
///
/// Returns `None` if the platform-specific directory cannot be determined.
pub fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Resolve the settings file, preferring an explicit override.
pub fn resolve_path(override_path: Option<&Path>) -> Option<PathBuf> {
    override_path.map(Path::to_path_buf).or_else(settings_path)
}

/// Load settings from `path`.
///
/// Returns default settings if the file is missing or cannot be parsed.
pub fn load_from(path: &Path) -> Settings {
    match fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                tracing::info!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                tracing::warn!("Failed to parse settings file: {}, using defaults", e);
                Settings::default()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!("No settings file found at {:?}, using defaults", path);
            Settings::default()
        }
        Err(e) => {
            tracing::warn!("Failed to read settings file: {}, using defaults", e);
            Settings::default()
        }
    }
}

/// Load settings from the override path or the platform location.
pub fn load_settings(override_path: Option<&Path>) -> Settings {
    let Some(path) = resolve_path(override_path) else {
        tracing::warn!("Could not determine settings path, using defaults");
        return Settings::default();
    };
    load_from(&path)
}

/// Save settings to `path`, creating the parent directory if needed.
pub fn save_to(settings: &Settings, path: &Path) -> Result<(), SettingsError> {
    let io_error = |source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    let content = toml::to_string_pretty(settings)?;
    fs::write(path, content).map_err(io_error)?;
    tracing::info!("Saved settings to {:?}", path);
    Ok(())
}

/// Save settings to the override path or the platform location.
///
/// Returns the path written.
pub fn save_settings(
    settings: &Settings,
    override_path: Option<&Path>,
) -> Result<PathBuf, SettingsError> {
    let path = resolve_path(override_path).ok_or(SettingsError::NoPath)?;
    save_to(settings, &path)?;
    Ok(path)
}
