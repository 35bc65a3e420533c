use super::GlobalOptions;
use crate::cli::{ConfigArgs, ConfigCommands};
use crate::config::file::{FileConfig, default_config_path};
use crate::error::{CliError, Result};
use std::path::{Path, PathBuf};
use tracing::info;

pub fn run(args: ConfigArgs, global: &GlobalOptions) -> Result<()> {
    let path = target_path(global)?;
    match args.command {
        ConfigCommands::Path => {
            println!("{}", path.display());
            if !path.exists() {
                println!("(not created yet; run `molviz config init`)");
            }
        }
        ConfigCommands::Init { force } => {
            write_template(&path, force)?;
            println!("✓ Configuration written to: {}", path.display());
        }
    }
    Ok(())
}

fn target_path(global: &GlobalOptions) -> Result<PathBuf> {
    match &global.config {
        Some(path) => Ok(path.clone()),
        None => default_config_path(),
    }
}

fn write_template(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(CliError::Argument(format!(
            "'{}' already exists. Use --force to overwrite it.",
            path.display()
        )));
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, FileConfig::template().to_toml()?)?;
    info!("Wrote default configuration to {:?}", path);
    Ok(())
}
