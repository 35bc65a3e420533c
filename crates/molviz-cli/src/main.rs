mod cli;
mod commands;
mod config;
mod error;
mod export;
mod logging;
mod services;
mod utils;

use crate::cli::{Cli, Commands};
use crate::commands::GlobalOptions;
use crate::error::{CliError, Result};
use clap::Parser;
use tracing::{debug, error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run_app().await {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default().into_hooks();
    eyre_hook.install().map_err(|e| CliError::Other(e.into()))?;
    std::panic::set_hook(Box::new(move |pi| {
        error!("{}", panic_hook.panic_report(pi));
    }));

    info!("🚀 molviz CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let global = GlobalOptions {
        config: cli.config,
        set_values: cli.set_values,
        quiet: cli.quiet,
    };

    let command_result = match cli.command {
        Commands::Show(args) => {
            info!("Dispatching to 'show' command.");
            commands::show::run(args, &global).await
        }
        Commands::Render(args) => {
            info!("Dispatching to 'render' command.");
            commands::render::run(args, &global)
        }
        Commands::Suggest => commands::suggest::run(),
        Commands::Config(args) => commands::config::run(args, &global),
    };

    match &command_result {
        Ok(_) => info!("✅ Command completed successfully."),
        Err(e) => error!("❌ Command failed: {}", e),
    }

    command_result
}
