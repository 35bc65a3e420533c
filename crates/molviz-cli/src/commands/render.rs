use super::{GlobalOptions, print_report, print_summary, write_outputs};
use crate::cli::{InputFormat, RenderArgs};
use crate::config::builder::build_config;
use crate::error::{CliError, Result};
use molviz::engine::scene::Scene;
use molviz::engine::viewer::Viewer;
use molviz::workflows::visualize::{show_structure_text, submit_debug_json};
use std::path::Path;
use tracing::info;

/// Concrete format for `--format auto`: debug JSON for `.json` files, SDF otherwise.
pub fn resolve_format(format: InputFormat, path: &Path) -> InputFormat {
    match format {
        InputFormat::Auto => {
            let is_json = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
            if is_json {
                InputFormat::Json
            } else {
                InputFormat::Sdf
            }
        }
        explicit => explicit,
    }
}

pub fn run(args: RenderArgs, global: &GlobalOptions) -> Result<()> {
    let config = build_config(&global.sources(Some(&args.geometry), None))?;
    let format = resolve_format(args.format, &args.input);

    info!("Loading input structure from {:?} as {:?}", &args.input, format);
    let text = std::fs::read_to_string(&args.input)?;
    let mut viewer = Viewer::new(Scene::new(), config.geometry);

    match format {
        InputFormat::Json => {
            if args.formula.is_some() || args.cid.is_some() {
                return Err(CliError::Argument(
                    "--formula and --cid apply to SDF input only".to_string(),
                ));
            }
            submit_debug_json(&mut viewer, &text)
                .map_err(|e| CliError::file_parsing(&args.input, e))?;
        }
        InputFormat::Sdf | InputFormat::Auto => {
            let formula = args.formula.as_deref().unwrap_or("");
            let (_, report) = show_structure_text(&mut viewer, &text, formula, args.cid)
                .map_err(|e| CliError::file_parsing(&args.input, e))?;
            print_report(&report);
        }
    }

    if let Some(live) = viewer.live() {
        print_summary(live);
    }
    write_outputs(&viewer, &args.output)
}
