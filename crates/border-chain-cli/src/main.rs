//! Command-line inspection tool for border-chain catalogs.
//!
//! Loads a region catalog from a JSON file, builds the adjacency graph, and
//! answers questions about it: overall statistics, a region's neighbors,
//! shortest paths (optionally restricted to a set of allowed regions), and
//! challenge selection. This is the library's non-interactive consumer; the
//! game itself lives elsewhere.

mod settings;

use border_chain_lib::{
    AdjacencyGraph, GameError, RegionCatalog, RegionEntry, RegionId, pick_challenge, shortest_path,
};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use settings::{Command, Settings};
use std::collections::HashSet;
use std::path::Path;
use std::process::ExitCode;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("catalog parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown or ambiguous region: {0}")]
    UnknownRegion(String),

    #[error(transparent)]
    Game(#[from] GameError),
}

fn main() -> ExitCode {
    init_tracing();

    let settings = Settings::parse();
    match run(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

fn run(settings: &Settings) -> Result<(), CliError> {
    let catalog = load_catalog(&settings.catalog)?;
    let graph = AdjacencyGraph::build_parallel(&catalog);

    match &settings.command {
        Command::Info => info(&catalog, &graph),
        Command::Neighbors { region } => neighbors(&catalog, &graph, region),
        Command::Path { from, to, via } => path(&catalog, &graph, from, to, via),
        Command::Challenge { seed } => challenge(&catalog, &graph, *seed),
    }
}

fn load_catalog(path: &Path) -> Result<RegionCatalog, CliError> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    let entries: Vec<RegionEntry> = serde_json::from_reader(reader)?;
    tracing::debug!("loaded {} regions from {}", entries.len(), path.display());
    Ok(RegionCatalog::from_entries(entries))
}

/// Resolve a user-supplied region name or fail with the input echoed back.
fn resolve(catalog: &RegionCatalog, input: &str) -> Result<RegionId, CliError> {
    catalog
        .resolve(input.trim())
        .ok_or_else(|| CliError::UnknownRegion(input.to_string()))
}

fn display_name(catalog: &RegionCatalog, id: RegionId) -> String {
    catalog
        .get(id)
        .map_or_else(|| format!("#{id}"), |region| region.display_name())
}

fn format_path(catalog: &RegionCatalog, path: &[RegionId]) -> String {
    path.iter()
        .map(|&id| display_name(catalog, id))
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn info(catalog: &RegionCatalog, graph: &AdjacencyGraph) -> Result<(), CliError> {
    println!("regions: {}", catalog.len());
    println!("borders: {}", graph.edge_count());

    let isolated: Vec<&str> = catalog
        .iter()
        .filter(|region| graph.neighbors(region.id()).is_empty())
        .map(|region| region.name())
        .collect();
    println!("isolated: {}", isolated.len());
    for name in isolated {
        println!("  {name}");
    }
    Ok(())
}

fn neighbors(
    catalog: &RegionCatalog,
    graph: &AdjacencyGraph,
    region: &str,
) -> Result<(), CliError> {
    let id = resolve(catalog, region)?;
    println!("{}", display_name(catalog, id));
    for &neighbor in graph.neighbors(id) {
        println!("  {}", display_name(catalog, neighbor));
    }
    Ok(())
}

fn path(
    catalog: &RegionCatalog,
    graph: &AdjacencyGraph,
    from: &str,
    to: &str,
    via: &[String],
) -> Result<(), CliError> {
    let source = resolve(catalog, from)?;
    let dest = resolve(catalog, to)?;

    let allowed = if via.is_empty() {
        None
    } else {
        let mut ids: HashSet<RegionId> = HashSet::from([source, dest]);
        for name in via {
            ids.insert(resolve(catalog, name)?);
        }
        Some(ids)
    };

    let route = shortest_path(graph, source, dest, allowed.as_ref());
    if route.is_empty() {
        println!("no path");
    } else {
        println!("{}", format_path(catalog, &route));
        println!("steps: {}", route.len().saturating_sub(2));
    }
    Ok(())
}

fn challenge(
    catalog: &RegionCatalog,
    graph: &AdjacencyGraph,
    seed: Option<u64>,
) -> Result<(), CliError> {
    let picked = match seed {
        Some(seed) => pick_challenge(graph, &mut StdRng::seed_from_u64(seed))?,
        None => pick_challenge(graph, &mut rand::thread_rng())?,
    };

    println!("start:  {}", display_name(catalog, picked.start));
    println!("target: {}", display_name(catalog, picked.end));

    let optimal = shortest_path(graph, picked.start, picked.end, None);
    println!("optimal steps: {}", optimal.len().saturating_sub(2));
    Ok(())
}
