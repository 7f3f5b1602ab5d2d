//! Command line front end for trip route recovery.

mod commands;
mod config;
mod error;

use std::{path::PathBuf, process::ExitCode, str::FromStr};

use clap::{Parser, Subcommand};
use route_recovery_core::prediction::PredictionMethod;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Recover the routes of recorded trips on a road network
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// TOML file with search and selection parameters
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Worker threads, defaults to one per core
    #[arg(short = 'j', long, global = true)]
    threads: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Predict candidate paths for every trip
    Predict {
        /// Edge table (u,v,length,travel_time,highway[,way_id])
        #[arg(short, long)]
        graph: PathBuf,
        /// Trip table
        #[arg(short, long)]
        trips: PathBuf,
        /// shortest, fastest, penalty, batch, rc or via
        #[arg(
            short,
            long,
            value_parser = PredictionMethod::from_str,
            default_value = "penalty"
        )]
        method: PredictionMethod,
        /// Path records output
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Reduce predicted paths to one node and edge set per trip
    Select {
        #[arg(short, long)]
        graph: PathBuf,
        /// Path records written by `predict`
        #[arg(short, long)]
        paths: PathBuf,
        #[arg(
            long,
            default_value = "all",
            value_parser = ["all", "minp", "skyline", "lopt", "diversity"]
        )]
        policy: String,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Write the road-class profile of every predicted path
    Profile {
        #[arg(short, long)]
        graph: PathBuf,
        #[arg(short, long)]
        paths: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Print the effective configuration
    Config,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match commands::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
