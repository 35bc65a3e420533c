use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "molviz CLI - look up molecules by name, parse structure files and build 3D ball-and-stick scenes.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output and progress spinners
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Configuration file in TOML format.
    /// Defaults to the per-user file shown by `molviz config path`, if it exists.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file and flags.
    /// Can be used multiple times. Example: -S bonds.single-radius=0.08
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", global = true)]
    pub set_values: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Look up a molecule by name (English or Hebrew) and build its 3D scene.
    Show(ShowArgs),
    /// Build the 3D scene for a local SDF/MOL or debug JSON file.
    Render(RenderArgs),
    /// List the suggested molecules.
    Suggest,
    /// Inspect or create the configuration file.
    Config(ConfigArgs),
}

/// Arguments for the `show` subcommand.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Molecule name, e.g. `caffeine` or `carbon dioxide`.
    #[arg(required = true, num_args(1..), value_name = "NAME")]
    pub name: Vec<String>,

    #[command(flatten)]
    pub lookup: LookupArgs,

    #[command(flatten)]
    pub geometry: GeometryArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for the `render` subcommand.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Path to the input structure file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Input format. `auto` picks debug JSON for `.json` files and SDF otherwise.
    #[arg(short, long, value_enum, default_value_t = InputFormat::Auto)]
    pub format: InputFormat,

    /// Formula to display for SDF input. Derived from the atoms when omitted.
    #[arg(long, value_name = "FORMULA")]
    pub formula: Option<String>,

    /// Compound identifier to attach to SDF input.
    #[arg(long, value_name = "CID")]
    pub cid: Option<u64>,

    #[command(flatten)]
    pub geometry: GeometryArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    Auto,
    Sdf,
    Json,
}

/// Overrides for `[camera]` and `[bonds]` settings.
#[derive(Args, Debug, Default, Clone)]
pub struct GeometryArgs {
    /// Override the camera field of view in degrees.
    #[arg(long, value_name = "DEGREES")]
    pub fov: Option<f64>,

    /// Override the camera margin factor applied to the molecule extent.
    #[arg(long, value_name = "FLOAT")]
    pub margin: Option<f64>,

    /// Override the bond cylinder color, e.g. '#666666'.
    #[arg(long, value_name = "#RRGGBB")]
    pub bond_color: Option<String>,
}

/// Overrides for `[lookup]` settings.
#[derive(Args, Debug, Default, Clone)]
pub struct LookupArgs {
    /// Never call the translation service; Hebrew names use the suggestion list only.
    #[arg(long)]
    pub no_translate: bool,

    /// Override the PubChem REST base URL.
    #[arg(long, value_name = "URL")]
    pub pubchem_url: Option<String>,

    /// Override the request timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

/// Where to write the results.
#[derive(Args, Debug, Default, Clone)]
pub struct OutputArgs {
    /// Write the built scene (spheres, cylinders, camera) as JSON.
    #[arg(short, long, value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// Write the structure as an SDF V2000 file.
    #[arg(long, value_name = "PATH")]
    pub save_sdf: Option<PathBuf>,

    /// Write the structure in the debug JSON format.
    #[arg(long, value_name = "PATH")]
    pub save_json: Option<PathBuf>,
}

/// Arguments for the `config` subcommand.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the absolute path of the default configuration file.
    Path,
    /// Write a configuration file filled with the default values.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}
