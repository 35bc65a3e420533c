use super::{GlobalOptions, print_report, print_summary, write_outputs};
use crate::cli::ShowArgs;
use crate::config::builder::build_config;
use crate::error::{CliError, Result};
use crate::services::{self, pubchem::PubChemClient, translate::GoogleTranslator};
use crate::utils::parser;
use molviz::engine::error::VisualizeError;
use molviz::engine::progress::ProgressReporter;
use molviz::engine::scene::Scene;
use molviz::engine::viewer::Viewer;
use molviz::workflows::lookup::{english_name_for, is_hebrew};
use molviz::workflows::visualize::show_compound;
use tracing::info;

/// Name to send when the translation service is switched off: Hebrew names
/// from the suggestion list map to English, anything else passes through.
fn offline_name(name: &str) -> String {
    if is_hebrew(name) {
        if let Some(english) = english_name_for(name) {
            return english.to_string();
        }
    }
    name.to_string()
}

pub async fn run(args: ShowArgs, global: &GlobalOptions) -> Result<()> {
    let config = build_config(&global.sources(Some(&args.geometry), Some(&args.lookup)))?;
    let mut name = parser::join_name(&args.name);
    if name.is_empty() {
        return Err(CliError::Visualize(VisualizeError::EmptyQuery));
    }

    let client = services::http_client(config.lookup.timeout)?;
    let directory = PubChemClient::new(client.clone(), &config.lookup.pubchem_url)
        .map_err(|e| CliError::Config(e.to_string()))?;
    let translator = if config.lookup.translate {
        Some(
            GoogleTranslator::new(client, &config.lookup.translate_url)
                .map_err(|e| CliError::Config(e.to_string()))?,
        )
    } else {
        name = offline_name(&name);
        None
    };

    let progress_handler = global.progress_handler();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let mut viewer = Viewer::new(Scene::new(), config.geometry);

    println!("Searching for '{}'...", name);
    info!("Invoking the lookup workflow...");
    let result = show_compound(&mut viewer, &name, &directory, translator.as_ref(), &reporter).await;
    progress_handler.clear();
    let outcome = result?;

    if outcome.search_name != name {
        println!("Translated to '{}'.", outcome.search_name);
    }
    print_report(&outcome.report);
    if let Some(live) = viewer.live() {
        print_summary(live);
    }
    write_outputs(&viewer, &args.output)
}
