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
    version,
    about = "mdplot - A command-line tool for turning GROMACS analysis output (XVG time series, XPM matrices) into publication figures.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a figure described by a TOML configuration file.
    Render(RenderArgs),
    /// Parse a single analysis file and print a summary of its contents.
    Inspect(InspectArgs),
}

/// Arguments for the `render` subcommand.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Path to the figure configuration file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    /// Override the output path stem from the config file.
    /// One file per format is written by appending the format extension.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Override the output formats (comma separated, e.g. 'png,svg').
    #[arg(short, long, value_name = "FMT[,FMT]", value_delimiter = ',')]
    pub format: Vec<String>,

    /// Override the thermal energy kT used for free-energy landscapes,
    /// in kJ/mol.
    #[arg(long, value_name = "FLOAT")]
    pub kt: Option<f64>,

    /// Path to a theme file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub theme: Option<PathBuf>,

    /// Hide the per-panel legends, overriding the config file.
    #[arg(long)]
    pub no_legend: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S columns=3
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to the analysis file to inspect.
    #[arg(required = true, value_name = "PATH")]
    pub file: PathBuf,

    /// File format; inferred from the extension when omitted.
    #[arg(short, long, value_enum, value_name = "FORMAT")]
    pub format: Option<InspectFormat>,

    /// Number of leading numeric columns to read from XVG files.
    #[arg(long, value_name = "INT", default_value_t = 2)]
    pub columns: usize,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum InspectFormat {
    Xvg,
    Xpm,
}
