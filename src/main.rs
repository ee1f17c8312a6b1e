//! `storageproof` CLI: plot, load, look up, and verify proof-of-storage
//! plot files, and verify standalone solution artifacts.
//!
//! Command-line parsing, path globbing, and JSON transport are external-
//! collaborator concerns around the core library (`storageproof`); this
//! binary is glue over that core, not part of the normative protocol.

use std::io::Read as _;
use std::path::PathBuf;
use std::time::Instant;

use clap::{ArgAction, Parser, Subcommand};
use rand::RngCore;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use storageproof::{config, plotter, solution::Solution, store, verifier};

#[derive(Parser, Debug)]
#[command(author, version, about = "Proof-of-storage plotting and lookup engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase output verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a new plot file of `k * 1000` keypairs.
    Plot {
        /// K value: number of keys to generate, in thousands.
        k: u32,
        /// Destination directory for the new plot file.
        dest_dir: PathBuf,
    },
    /// Load plot files from a comma-delimited list of paths and report their size.
    Load {
        /// Comma-delimited list of files and/or directories.
        paths: String,
    },
    /// Look up a hash in the plot files, or run a demonstration suite if none is given.
    Lookup {
        /// Comma-delimited list of files and/or directories.
        paths: String,
        /// Hex-encoded 32-byte challenge. If omitted, runs a positive /
        /// near-miss / complete-miss demonstration.
        hash: Option<String>,
    },
    /// Verify a plot file's integrity end-to-end.
    VerifyPlot {
        /// Path to the plot file.
        file_path: PathBuf,
    },
    /// Verify a standalone solution JSON object (pass `-` to read from stdin).
    VerifySolution {
        /// Solution JSON, or `-` to read it from stdin.
        json: String,
    },
    /// Benchmark the lookup function with random challenges.
    BenchmarkLookup {
        /// Comma-delimited list of files and/or directories.
        paths: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Plot { k, dest_dir } => run_plot(k, &dest_dir, cli.verbose > 0),
        Command::Load { paths } => run_load(&paths, cli.verbose > 0),
        Command::Lookup { paths, hash } => run_lookup(&paths, hash.as_deref()),
        Command::VerifyPlot { file_path } => run_verify_plot(&file_path, cli.verbose > 0),
        Command::VerifySolution { json } => run_verify_solution(&json),
        Command::BenchmarkLookup { paths } => run_benchmark_lookup(&paths),
    };

    if let Err(err) = result {
        error!("{err}");
        std::process::exit(1);
    }
}

fn split_paths(paths: &str) -> Vec<String> {
    paths.split(',').map(|s| s.to_string()).collect()
}

fn run_plot(k: u32, dest_dir: &std::path::Path, verbose: bool) -> storageproof::Result<()> {
    let path = plotter::plot(dest_dir, k, verbose)?;
    info!(path = %path.display(), "plot file generated successfully");
    Ok(())
}

fn run_load(paths: &str, verbose: bool) -> storageproof::Result<()> {
    let paths = split_paths(paths);
    let collection = store::load_plots(&paths, verbose)?;

    info!(num_plots = collection.plots.len(), "loaded plot files");
    info!(total_keys = collection.total_keys(), "total solutions available");
    Ok(())
}

fn run_lookup(paths: &str, hash: Option<&str>) -> storageproof::Result<()> {
    let paths = split_paths(paths);
    let collection = store::load_plots(&paths, true)?;

    if collection.plots.is_empty() {
        info!("no plot files found");
        return Ok(());
    }

    if let Some(hash) = hash {
        let bytes = hex::decode(hash)
            .map_err(|e| storageproof::StorageProofError::BadInput(format!("invalid hash: {e}")))?;
        let challenge: [u8; 32] = bytes.try_into().map_err(|_| {
            storageproof::StorageProofError::BadInput("challenge must be 32 bytes".to_string())
        })?;

        let result = collection.look_up(&challenge)?;
        print_lookup_result(&challenge, &result);
        return Ok(());
    }

    info!("running demonstration suite");

    // Positive case: look up a hash known to be in the collection.
    let known_hash = collection
        .plots
        .values()
        .next()
        .and_then(|info| info.entries.first())
        .map(|entry| entry.hash)
        .expect("collection is non-empty");

    info!("--- positive case ---");
    print_lookup_result(&known_hash, &collection.look_up(&known_hash)?);

    // Near-miss case: flip a single bit.
    let mut near_miss = known_hash;
    near_miss[0] ^= 0x01;
    info!("--- near-miss case ---");
    print_lookup_result(&near_miss, &collection.look_up(&near_miss)?);

    // Complete-miss case: a fresh random challenge.
    let mut random_hash = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut random_hash);
    info!("--- complete-miss case ---");
    print_lookup_result(&random_hash, &collection.look_up(&random_hash)?);

    Ok(())
}

fn print_lookup_result(challenge: &[u8; 32], result: &store::LookupResult) {
    info!(challenge = %hex::encode(challenge), "looking up");
    match result.hash {
        Some(hash) => info!(best_match = %hex::encode(hash), distance = result.distance, "found"),
        None => info!("no match: collection is empty"),
    }
}

fn run_verify_plot(file_path: &std::path::Path, verbose: bool) -> storageproof::Result<()> {
    verifier::verify_plot(file_path, verbose)?;
    info!("verification successful");
    Ok(())
}

fn run_verify_solution(json: &str) -> storageproof::Result<()> {
    let body = if json == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(storageproof::StorageProofError::Io)?;
        buf
    } else {
        json.to_string()
    };

    let solution: Solution = serde_json::from_str(&body)
        .map_err(|e| storageproof::StorageProofError::Malformed(format!("invalid solution json: {e}")))?;

    let valid = solution.verify()?;
    info!(valid, "solution verification complete");
    if !valid {
        std::process::exit(1);
    }
    Ok(())
}

fn run_benchmark_lookup(paths: &str) -> storageproof::Result<()> {
    let paths = split_paths(paths);
    let collection = store::load_plots(&paths, false)?;

    if collection.plots.is_empty() {
        info!("no plot files found");
        return Ok(());
    }

    info!("benchmarking lookup function");

    let mut rng = rand::thread_rng();
    let mut challenges = Vec::with_capacity(config::BENCHMARK_LOOKUP_COUNT);
    for _ in 0..config::BENCHMARK_LOOKUP_COUNT {
        let mut hash = [0u8; 32];
        rng.fill_bytes(&mut hash);
        challenges.push(hash);
    }

    let start = Instant::now();
    for challenge in &challenges {
        if let Err(err) = collection.look_up(challenge) {
            error!("error looking up hash: {err}");
        }
    }
    let total = start.elapsed();
    let avg = total / config::BENCHMARK_LOOKUP_COUNT as u32;

    info!(total_lookups = config::BENCHMARK_LOOKUP_COUNT, ?total, ?avg, "benchmark results");
    Ok(())
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "info,storageproof=info",
        1 => "debug,storageproof=debug",
        _ => "storageproof=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    use tracing_tree::HierarchicalLayer;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            HierarchicalLayer::new(2)
                .with_targets(false)
                .with_bracketed_fields(true),
        )
        .init();
}
