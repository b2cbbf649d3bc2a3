#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub(crate) const SETTINGS_FILE_NAME: &str = "settings.yaml";

/// User preferences persisted next to the database.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub(crate) default_target_language: Option<String>,
    pub(crate) developer_mode: bool,
}

#[derive(Debug)]
pub(crate) enum SettingsError {
    Io(std::io::Error),
    Yaml(serde_yaml::Error),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io: {err}"),
            Self::Yaml(err) => write!(f, "yaml: {err}"),
        }
    }
}

impl std::error::Error for SettingsError {}

impl From<std::io::Error> for SettingsError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_yaml::Error> for SettingsError {
    fn from(value: serde_yaml::Error) -> Self {
        Self::Yaml(value)
    }
}

pub(crate) fn settings_path(storage_dir: &Path) -> PathBuf {
    storage_dir.join(SETTINGS_FILE_NAME)
}

/// Reads the settings file; a missing file yields defaults.
pub(crate) fn load_settings(storage_dir: &Path) -> Result<Settings, SettingsError> {
    let path = settings_path(storage_dir);
    let text = match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Settings::default()),
        Err(err) => return Err(err.into()),
    };
    if text.trim().is_empty() {
        return Ok(Settings::default());
    }
    Ok(serde_yaml::from_str(&text)?)
}

pub(crate) fn save_settings(storage_dir: &Path, settings: &Settings) -> Result<(), SettingsError> {
    std::fs::create_dir_all(storage_dir)?;
    let path = settings_path(storage_dir);
    let tmp = path.with_extension("yaml.tmp");
    let text = serde_yaml::to_string(settings)?;
    std::fs::write(&tmp, text)?;
    std::fs::rename(tmp, path)?;
    Ok(())
}
