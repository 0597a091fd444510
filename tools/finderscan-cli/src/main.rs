//! finderscan CLI: replay and inspect recorded detection streams.
//!
//! Usage:
//!   finderscan check               Show platform and filter selection
//!   finderscan evaluate <PATH>     Replay detections through the filter
//!   finderscan validate <PATH>     Check a detection stream for bad geometry

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "finderscan",
    about = "Finder-region filtering for optical code detections",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to $XDG_CONFIG_HOME/finderscan/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show host platform, configured override and the selected filter
    Check {
        /// Platform to select for (ios|android)
        #[arg(long)]
        platform: Option<String>,
    },

    /// Replay a JSONL detection stream through the geometry filter
    Evaluate {
        /// Path to the JSONL detection stream
        path: PathBuf,

        /// Finder rectangle as x,y,width,height (logical units)
        #[arg(long, value_parser = commands::parse_finder)]
        finder: Option<[f64; 4]>,

        /// Platform to select for (ios|android)
        #[arg(long)]
        platform: Option<String>,

        /// Physical-to-logical pixel ratio
        #[arg(long)]
        pixel_ratio: Option<f64>,

        /// Treat the hosting view as not focused
        #[arg(long)]
        unfocused: bool,

        /// Treat a code as already read
        #[arg(long)]
        already_read: bool,

        /// Stop accepting after the first read, as a single-read screen would
        #[arg(long)]
        once: bool,
    },

    /// Parse a JSONL detection stream and report its geometry
    Validate {
        /// Path to the JSONL detection stream
        path: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => finderscan_common::config::AppConfig::load_from(path),
        None => finderscan_common::config::AppConfig::load(),
    };

    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    finderscan_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Check { platform } => commands::check::run(&config, platform),
        Commands::Evaluate {
            path,
            finder,
            platform,
            pixel_ratio,
            unfocused,
            already_read,
            once,
        } => commands::evaluate::run(
            &config,
            commands::evaluate::EvaluateArgs {
                path,
                finder,
                platform,
                pixel_ratio,
                unfocused,
                already_read,
                once,
            },
        ),
        Commands::Validate { path } => commands::validate::run(path),
    }
}
