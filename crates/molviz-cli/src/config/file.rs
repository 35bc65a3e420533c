use super::defaults::DefaultsConfig;
use crate::error::{CliError, Result};
use directories::ProjectDirs;
use molviz::core::models::color::Rgb;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileCameraConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fov_degrees: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_distance: Option<f64>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileBondConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgb>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub double_offset: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triple_offset: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub near_parallel_threshold: Option<f64>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileAtomConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_color: Option<Rgb>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_radius: Option<f64>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileLookupConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pubchem_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translate_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translate: Option<bool>,
}

/// The TOML configuration file. Every key is optional.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera: Option<FileCameraConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bonds: Option<FileBondConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atoms: Option<FileAtomConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lookup: Option<FileLookupConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::file_parsing(path, e))
    }

    /// A file with every key set to its built-in default.
    pub fn template() -> Self {
        let defaults = DefaultsConfig::default();
        let geometry = defaults.geometry;
        Self {
            camera: Some(FileCameraConfig {
                fov_degrees: Some(geometry.camera.fov_degrees),
                margin: Some(geometry.camera.margin),
                min_distance: Some(geometry.camera.min_distance),
            }),
            bonds: Some(FileBondConfig {
                color: Some(geometry.bonds.color),
                single_radius: Some(geometry.bonds.single_radius),
                multi_radius: Some(geometry.bonds.multi_radius),
                double_offset: Some(geometry.bonds.double_offset),
                triple_offset: Some(geometry.bonds.triple_offset),
                near_parallel_threshold: Some(geometry.bonds.near_parallel_threshold),
            }),
            atoms: Some(FileAtomConfig {
                fallback_color: Some(geometry.atoms.fallback_color),
                fallback_radius: Some(geometry.atoms.fallback_radius),
            }),
            lookup: Some(FileLookupConfig {
                pubchem_url: Some(defaults.pubchem_url),
                translate_url: Some(defaults.translate_url),
                timeout_secs: Some(defaults.timeout_secs),
                translate: Some(defaults.translate),
            }),
        }
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize configuration: {}", e)))
    }
}

/// Per-user configuration file location, e.g. `~/.config/molviz/config.toml` on Linux.
pub fn default_config_path() -> Result<PathBuf> {
    ProjectDirs::from("org", "molviz", "molviz")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
        .ok_or_else(|| {
            CliError::Config("Could not determine a home directory for the config file".into())
        })
}
