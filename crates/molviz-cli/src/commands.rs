pub mod config;
pub mod render;
pub mod show;
pub mod suggest;

use crate::cli::{GeometryArgs, LookupArgs, OutputArgs};
use crate::config::builder::ConfigSources;
use crate::error::{CliError, Result};
use crate::export;
use crate::utils::progress::CliProgressHandler;
use molviz::core::io::debug_json::DebugJsonFile;
use molviz::core::io::sdf::{ParseReport, SdfFile};
use molviz::core::io::traits::StructureFile;
use molviz::engine::scene::Scene;
use molviz::engine::viewer::{LiveMolecule, Viewer};
use std::path::PathBuf;
use tracing::{info, warn};

/// Flags shared by every subcommand.
#[derive(Debug, Default, Clone)]
pub struct GlobalOptions {
    pub config: Option<PathBuf>,
    pub set_values: Vec<String>,
    pub quiet: bool,
}

impl GlobalOptions {
    pub fn sources<'a>(
        &'a self,
        geometry: Option<&'a GeometryArgs>,
        lookup: Option<&'a LookupArgs>,
    ) -> ConfigSources<'a> {
        ConfigSources {
            config_path: self.config.as_deref(),
            set_values: &self.set_values,
            geometry,
            lookup,
        }
    }

    pub fn progress_handler(&self) -> CliProgressHandler {
        if self.quiet {
            CliProgressHandler::hidden()
        } else {
            CliProgressHandler::new()
        }
    }
}

fn print_summary(live: &LiveMolecule) {
    let model = &live.model;
    let geometry = &live.geometry;
    println!("Formula:   {}", model.formula());
    if let Some(cid) = model.identifier() {
        println!("CID:       {}", cid);
    }
    println!(
        "Structure: {} atoms, {} bonds",
        model.atoms().len(),
        model.bonds().len()
    );
    println!(
        "Scene:     {} spheres, {} cylinders",
        geometry.spheres.len(),
        geometry.cylinders.len()
    );
    println!("Camera:    distance {:.2}", geometry.camera_distance);
}

fn print_report(report: &ParseReport) {
    if report.is_clean() {
        return;
    }
    warn!(?report, "Structure had unreadable rows.");
    println!(
        "Warning: skipped {} of {} atom rows and {} of {} bond rows; dropped {} bonds.",
        report.skipped_atom_rows,
        report.declared_atoms,
        report.skipped_bond_rows,
        report.declared_bonds,
        report.dropped_bonds
    );
}

fn write_outputs(viewer: &Viewer<Scene>, output: &OutputArgs) -> Result<()> {
    let Some(live) = viewer.live() else {
        return Ok(());
    };
    if let Some(path) = &output.export {
        export::write_scene(viewer, path)?;
        println!("✓ Scene written to: {}", path.display());
    }
    if let Some(path) = &output.save_sdf {
        SdfFile::default()
            .write_to_path(&live.model, path)
            .map_err(|e| CliError::file_parsing(path, e))?;
        info!("Structure written to {:?}", path);
        println!("✓ SDF written to: {}", path.display());
    }
    if let Some(path) = &output.save_json {
        DebugJsonFile
            .write_to_path(&live.model, path)
            .map_err(|e| CliError::file_parsing(path, e))?;
        info!("Debug JSON written to {:?}", path);
        println!("✓ Debug JSON written to: {}", path.display());
    }
    Ok(())
}
