use std::{fs::File, path::Path};

use rayon::prelude::*;
use route_recovery_core::{
    CandidatePath, Error, RecoveryConfig, RoadGraph, TripId,
    loading::{
        PathRecord, SelectionRecord, candidates_by_trip, highway_records, load_graph, load_trips,
        path_records, read_records, selection_record, write_records_to_path,
    },
    prediction::{PredictionMethod, predict},
    selection::SelectionStrategy,
};
use tracing::info;

use crate::{
    Cli, Command,
    config::{load_config, render_config},
    error::CliError,
};

pub fn run(cli: &Cli) -> Result<(), CliError> {
    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
    }
    let config = load_config(cli.config.as_deref())?;

    match &cli.command {
        Command::Predict {
            graph,
            trips,
            method,
            output,
        } => run_predict(graph, trips, *method, output, &config),
        Command::Select {
            graph,
            paths,
            policy,
            output,
        } => run_select(graph, paths, policy, output, &config),
        Command::Profile {
            graph,
            paths,
            output,
        } => run_profile(graph, paths, output),
        Command::Config => {
            print!("{}", render_config(&config)?);
            Ok(())
        }
    }
}

fn run_predict(
    graph: &Path,
    trips: &Path,
    method: PredictionMethod,
    output: &Path,
    config: &RecoveryConfig,
) -> Result<(), CliError> {
    let graph = load_graph(graph)?;
    let trips = load_trips(trips)?;

    let results = predict(&graph, &trips, method, config)?;
    let records = path_records(&graph, &results);
    write_records_to_path(output, &records)?;
    info!(
        trips = results.len(),
        paths = records.len(),
        "Wrote {method} paths to {}",
        output.display()
    );
    Ok(())
}

fn run_select(
    graph: &Path,
    paths: &Path,
    policy: &str,
    output: &Path,
    config: &RecoveryConfig,
) -> Result<(), CliError> {
    let strategy =
        SelectionStrategy::from_name(policy, &config.local_optimality, &config.diversity)?;
    let graph = load_graph(graph)?;
    let candidates = read_candidates(&graph, paths)?;

    let records: Vec<SelectionRecord> = candidates
        .par_iter()
        .map(|(trip_id, paths)| {
            let selection = strategy.select(&graph, paths);
            selection_record(&graph, *trip_id, &selection)
        })
        .collect();
    let replaced = records.iter().filter(|record| record.replaced).count();

    write_records_to_path(output, &records)?;
    info!(
        trips = records.len(),
        replaced,
        "Wrote {strategy} selections to {}",
        output.display()
    );
    Ok(())
}

fn run_profile(graph: &Path, paths: &Path, output: &Path) -> Result<(), CliError> {
    let graph = load_graph(graph)?;
    let candidates = read_candidates(&graph, paths)?;

    let records = highway_records(&graph, &candidates);
    write_records_to_path(output, &records)?;
    info!(
        paths = records.len(),
        "Wrote highway profiles to {}",
        output.display()
    );
    Ok(())
}

fn read_candidates(
    graph: &RoadGraph,
    paths: &Path,
) -> Result<Vec<(TripId, Vec<CandidatePath>)>, CliError> {
    info!("Reading path records from {}", paths.display());
    let file = File::open(paths).map_err(Error::from)?;
    let records: Vec<PathRecord> = read_records(file)?;
    Ok(candidates_by_trip(graph, &records))
}
