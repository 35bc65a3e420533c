use super::defaults::DefaultsConfig;
use super::file::{FileConfig, default_config_path};
use super::models::{AppConfig, LookupSettings};
use crate::cli::{GeometryArgs, LookupArgs};
use crate::error::{CliError, Result};
use crate::utils::parser;
use molviz::core::models::color::Rgb;
use molviz::engine::config::GeometryConfigBuilder;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

/// Everything a command contributes to its configuration.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigSources<'a> {
    /// Explicit `--config` path. Without one the per-user file is read if present.
    pub config_path: Option<&'a Path>,
    pub set_values: &'a [String],
    pub geometry: Option<&'a GeometryArgs>,
    pub lookup: Option<&'a LookupArgs>,
}

/// Merges built-in defaults < config file < CLI flags < `--set` values.
pub fn build_config(sources: &ConfigSources) -> Result<AppConfig> {
    let file_config = load_file_config(sources.config_path)?;
    let file_config = apply_cli_flags(file_config, sources.geometry, sources.lookup)?;
    let file_config = apply_set_values(file_config, sources.set_values)?;
    resolve(file_config)
}

fn load_file_config(explicit: Option<&Path>) -> Result<FileConfig> {
    if let Some(path) = explicit {
        return FileConfig::from_file(path);
    }
    match default_config_path() {
        Ok(path) if path.is_file() => FileConfig::from_file(&path),
        Ok(path) => {
            debug!("No configuration file at {:?}; using defaults.", path);
            Ok(FileConfig::default())
        }
        Err(e) => {
            debug!("Skipping per-user configuration: {}", e);
            Ok(FileConfig::default())
        }
    }
}

fn apply_cli_flags(
    mut config: FileConfig,
    geometry: Option<&GeometryArgs>,
    lookup: Option<&LookupArgs>,
) -> Result<FileConfig> {
    if let Some(args) = geometry {
        if let Some(fov) = args.fov {
            config.camera.get_or_insert_with(Default::default).fov_degrees = Some(fov);
        }
        if let Some(margin) = args.margin {
            config.camera.get_or_insert_with(Default::default).margin = Some(margin);
        }
        if let Some(color) = &args.bond_color {
            config.bonds.get_or_insert_with(Default::default).color =
                Some(parse_value("--bond-color", color)?);
        }
    }
    if let Some(args) = lookup {
        let section = config.lookup.get_or_insert_with(Default::default);
        if args.no_translate {
            section.translate = Some(false);
        }
        if let Some(url) = &args.pubchem_url {
            section.pubchem_url = Some(url.clone());
        }
        if let Some(timeout) = args.timeout {
            section.timeout_secs = Some(timeout);
        }
    }
    Ok(config)
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid value for {}: {}", key, value)))
}

pub fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let set = parser::parse_set_value(kv_pair).map_err(|e| CliError::Config(e.to_string()))?;
        let key = set.path();
        let value = set.value;

        match (set.section, set.key) {
            ("camera", field) => {
                let camera = config.camera.get_or_insert_with(Default::default);
                let slot = match field {
                    "fov-degrees" => &mut camera.fov_degrees,
                    "margin" => &mut camera.margin,
                    "min-distance" => &mut camera.min_distance,
                    _ => return Err(unsupported(&key)),
                };
                *slot = Some(parse_value(&key, value)?);
            }
            ("bonds", "color") => {
                config.bonds.get_or_insert_with(Default::default).color =
                    Some(parse_value::<Rgb>(&key, value)?);
            }
            ("bonds", field) => {
                let bonds = config.bonds.get_or_insert_with(Default::default);
                let slot = match field {
                    "single-radius" => &mut bonds.single_radius,
                    "multi-radius" => &mut bonds.multi_radius,
                    "double-offset" => &mut bonds.double_offset,
                    "triple-offset" => &mut bonds.triple_offset,
                    "near-parallel-threshold" => &mut bonds.near_parallel_threshold,
                    _ => return Err(unsupported(&key)),
                };
                *slot = Some(parse_value(&key, value)?);
            }
            ("atoms", "fallback-color") => {
                config.atoms.get_or_insert_with(Default::default).fallback_color =
                    Some(parse_value::<Rgb>(&key, value)?);
            }
            ("atoms", "fallback-radius") => {
                config.atoms.get_or_insert_with(Default::default).fallback_radius =
                    Some(parse_value(&key, value)?);
            }
            ("lookup", field) => {
                let lookup = config.lookup.get_or_insert_with(Default::default);
                match field {
                    "pubchem-url" => lookup.pubchem_url = Some(value.to_string()),
                    "translate-url" => lookup.translate_url = Some(value.to_string()),
                    "timeout-secs" => lookup.timeout_secs = Some(parse_value(&key, value)?),
                    "translate" => lookup.translate = Some(parse_value(&key, value)?),
                    _ => return Err(unsupported(&key)),
                }
            }
            _ => return Err(unsupported(&key)),
        }
    }
    Ok(config)
}

fn unsupported(key: &str) -> CliError {
    CliError::Config(format!(
        "Unsupported configuration key for --set: '{}'",
        key
    ))
}

fn resolve(file_config: FileConfig) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();
    let geometry_defaults = &defaults.geometry;

    let camera = file_config.camera.unwrap_or_default();
    let bonds = file_config.bonds.unwrap_or_default();
    let atoms = file_config.atoms.unwrap_or_default();
    let lookup = file_config.lookup.unwrap_or_default();

    let geometry = GeometryConfigBuilder::new()
        .fov_degrees(camera.fov_degrees.unwrap_or(geometry_defaults.camera.fov_degrees))
        .margin(camera.margin.unwrap_or(geometry_defaults.camera.margin))
        .min_distance(camera.min_distance.unwrap_or(geometry_defaults.camera.min_distance))
        .bond_color(bonds.color.unwrap_or(geometry_defaults.bonds.color))
        .single_radius(bonds.single_radius.unwrap_or(geometry_defaults.bonds.single_radius))
        .multi_radius(bonds.multi_radius.unwrap_or(geometry_defaults.bonds.multi_radius))
        .double_offset(bonds.double_offset.unwrap_or(geometry_defaults.bonds.double_offset))
        .triple_offset(bonds.triple_offset.unwrap_or(geometry_defaults.bonds.triple_offset))
        .near_parallel_threshold(
            bonds
                .near_parallel_threshold
                .unwrap_or(geometry_defaults.bonds.near_parallel_threshold),
        )
        .fallback_color(atoms.fallback_color.unwrap_or(geometry_defaults.atoms.fallback_color))
        .fallback_radius(
            atoms
                .fallback_radius
                .unwrap_or(geometry_defaults.atoms.fallback_radius),
        )
        .build()?;

    let timeout_secs = lookup.timeout_secs.unwrap_or(defaults.timeout_secs);
    if timeout_secs == 0 {
        return Err(CliError::Config(
            "lookup.timeout-secs must be at least 1".to_string(),
        ));
    }
    let pubchem_url = checked_url("lookup.pubchem-url", lookup.pubchem_url, defaults.pubchem_url)?;
    let translate_url = checked_url(
        "lookup.translate-url",
        lookup.translate_url,
        defaults.translate_url,
    )?;

    Ok(AppConfig {
        geometry,
        lookup: LookupSettings {
            pubchem_url,
            translate_url,
            timeout: Duration::from_secs(timeout_secs),
            translate: lookup.translate.unwrap_or(defaults.translate),
        },
    })
}

fn checked_url(key: &str, value: Option<String>, default: String) -> Result<String> {
    let url = value.unwrap_or(default);
    reqwest::Url::parse(&url)
        .map_err(|e| CliError::Config(format!("Invalid URL for {}: '{}' ({})", key, url, e)))?;
    Ok(url.trim_end_matches('/').to_string())
}
