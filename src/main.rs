use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use timecode_tools::OutputFormat;
use timecode_tools::commands;
use timecode_tools::config;

#[derive(Parser)]
#[command(name = "tcode")]
#[command(about = "Launch-time averaging and paint drying timers")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Average the launch time of day over a CSV export
    Average {
        #[arg(default_value = "Space_Corrected.csv", help = "Launch records CSV")]
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Track paint drying batches (interactive without a subcommand)
    Dry(DryArgs),
    /// Inspect configuration
    Config(ConfigArgs),
}

#[derive(Args)]
struct DryArgs {
    #[command(subcommand)]
    action: Option<DryAction>,
}

#[derive(Subcommand)]
enum DryAction {
    /// Start drying a new batch
    Add {
        #[arg(help = "Batch name")]
        name: String,
        #[arg(help = "Radius of each object in cm")]
        radius: f64,
    },
    /// Show batches still being tracked
    List {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Args)]
struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Subcommand)]
enum ConfigAction {
    List,
    Get { key: String },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = config::load_or_default()?;

    match &cli.command {
        Commands::Average { file, format } => {
            commands::average::average(&config, file, *format)?;
        }
        Commands::Dry(args) => match &args.action {
            None => commands::dry::interactive(&config)?,
            Some(DryAction::Add { name, radius }) => commands::dry::add(&config, name, *radius)?,
            Some(DryAction::List { format }) => commands::dry::list(&config, *format)?,
        },
        Commands::Config(args) => match &args.action {
            ConfigAction::List => commands::config::list(&config)?,
            ConfigAction::Get { key } => commands::config::get(key, &config)?,
        },
    }

    Ok(())
}
