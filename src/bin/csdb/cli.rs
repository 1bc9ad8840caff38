use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "csdb",
    about = "ChemSep database conversion to JSON",
    version,
    author,
    before_help = crate::display::banner_for_help(),
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run every stage: components, name index, interactions
    #[command(visible_alias = "r")]
    Run(PipelineArgs),

    /// Parse the component database (.pct) into component records
    #[command(visible_alias = "c")]
    Components(PipelineArgs),

    /// Build the name index from previously written component records
    #[command(visible_alias = "n")]
    Names(PipelineArgs),

    /// Parse interaction parameters (.ipd) against the written name index
    #[command(visible_alias = "i")]
    Interactions(PipelineArgs),

    /// Print the interaction record of a compound pair
    #[command(visible_alias = "l")]
    Lookup(LookupArgs),
}

impl Command {
    pub fn quiet(&self) -> bool {
        match self {
            Command::Run(args)
            | Command::Components(args)
            | Command::Names(args)
            | Command::Interactions(args) => args.quiet,
            Command::Lookup(args) => args.quiet,
        }
    }
}

#[derive(Args)]
pub struct PipelineArgs {
    #[command(flatten)]
    pub paths: PathOptions,

    /// Fail the run if any component block is malformed
    #[arg(long)]
    pub strict: bool,

    /// Suppress progress output (for scripting)
    #[arg(short, long)]
    pub quiet: bool,
}

/// File locations, each overriding the configuration file.
#[derive(Args)]
#[command(next_help_heading = "File Locations")]
pub struct PathOptions {
    /// Pipeline configuration (TOML)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Component database [default: chemsepdb.pct]
    #[arg(long, value_name = "PCT")]
    pub components: Option<PathBuf>,

    /// Interaction parameter file [default: pr.ipd]
    #[arg(long, value_name = "IPD")]
    pub interactions: Option<PathBuf>,

    /// Directory receiving the three JSON outputs
    #[arg(short = 'o', long = "out-dir", value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct LookupArgs {
    /// First compound, by CASN or name
    #[arg(value_name = "ID1")]
    pub id_1: String,

    /// Second compound, by CASN or name
    #[arg(value_name = "ID2")]
    pub id_2: String,

    /// Interaction records written by the interactions stage
    #[arg(long, value_name = "FILE", default_value = "pripdb.json")]
    pub db: PathBuf,

    /// Print the record as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Suppress progress output (for scripting)
    #[arg(short, long)]
    pub quiet: bool,
}

pub fn parse() -> Cli {
    Cli::parse()
}
