//! CLI frontend for the Rollwerk dice engine.

mod commands;
mod diagnostics;

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(
    name = "rw",
    about = "Rollwerk — roll, check, and describe dice notation",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log engine activity to stderr (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll one or more dice expressions and print the total
    Roll {
        /// Dice notation (e.g. 4d6H, 2d20C{<3}+5) or a number of sides.
        /// Put `--` before notation that starts with a minus sign.
        #[arg(required = true)]
        notation: Vec<String>,

        /// Seed the random number generator for a reproducible roll
        #[arg(short, long)]
        seed: Option<u64>,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate notation and describe what it rolls
    Check {
        /// Dice notation to validate
        notation: String,

        /// Print the validation result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Roll 1d20 on a JSON roll table
    Table {
        /// Path to the roll table file
        file: PathBuf,

        /// Seed the random number generator for a reproducible roll
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "rw_dice=debug,warn",
        _ => "rw_dice=trace,warn",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Roll {
            notation,
            seed,
            json,
        } => commands::roll::run(&notation, seed, json),
        Commands::Check { notation, json } => commands::check::run(&notation, json),
        Commands::Table { file, seed } => commands::table::run(&file, seed),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
