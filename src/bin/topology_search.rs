use biodivine_topology_search::enumeration::EnumerationConfig;
use biodivine_topology_search::error::SearchError;
use biodivine_topology_search::io::{write_groups, write_networks_file};
use biodivine_topology_search::isomorphism::{
    DedupConfig, LabelMatching, deduplicate, group_by_dynamics,
};
use biodivine_topology_search::model::{Gate, Interaction, compress_state};
use biodivine_topology_search::progress::LogProgress;
use biodivine_topology_search::search::{SearchConfig, TargetFilter, search_networks};
use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "topology_search")]
#[command(about = "Find Boolean network topologies whose attractors contain target states")]
struct Args {
    /// Number of network nodes
    #[arg(value_name = "NODES")]
    nodes: usize,

    /// Number of network edges
    #[arg(value_name = "EDGES")]
    edges: usize,

    /// Target state, e.g. `--target=101` (can be repeated; no target accepts every network)
    #[arg(long = "target", value_name = "STATE", require_equals = true)]
    targets: Vec<String>,

    /// Require all targets to be present (otherwise any target suffices)
    #[arg(long)]
    strict: bool,

    /// Do not test steady states against the targets
    #[arg(long)]
    ignore_steady_states: bool,

    /// Do not test limit cycles against the targets
    #[arg(long)]
    ignore_limit_cycles: bool,

    /// Allowed edge interactions (comma separated: positive, negative)
    #[arg(long, default_value = "positive", value_delimiter = ',', require_equals = true)]
    interactions: Vec<Interaction>,

    /// Allowed gates of multi-input nodes (comma separated: or, and)
    #[arg(long, default_value = "or", value_delimiter = ',', require_equals = true)]
    gates: Vec<Gate>,

    /// Also enumerate topologies that leave some node disconnected
    #[arg(long)]
    allow_disconnected: bool,

    /// Output file (derived from the search parameters by default)
    #[arg(long, value_name = "FILE", require_equals = true)]
    output: Option<PathBuf>,

    /// Remove networks that are isomorphic to an earlier result
    #[arg(long)]
    deduplicate: bool,

    /// Initial chunk size of the parallel deduplication
    #[arg(long, default_value_t = 1000, require_equals = true)]
    chunk_size: usize,

    /// Chunk size multiplier applied after each deduplication round
    #[arg(long, default_value_t = 2, require_equals = true)]
    growth_factor: usize,

    /// Number of deduplication workers (all available cores by default)
    #[arg(long, require_equals = true)]
    workers: Option<usize>,

    /// Group the results by isomorphism of their state-transition graphs
    #[arg(long)]
    group_dynamics: bool,

    /// Logging verbosity (use -v for info, or -v=LEVEL for a specific level)
    #[arg(long, short = 'v', value_name = "LEVEL", num_args = 0..=1, default_missing_value = "info", require_equals = true)]
    verbose: Option<Option<LogLevel>>,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
}

impl From<LogLevel> for LevelFilter {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
        }
    }
}

fn main() {
    let args = Args::parse();

    let log_level = match args.verbose {
        None => LevelFilter::Off,
        Some(None) => LevelFilter::Info,
        Some(Some(ref level)) => level.clone().into(),
    };
    Builder::from_default_env().filter_level(log_level).init();

    if let Err(e) = run(&args) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

/// Default output name, e.g. `topologies_3n_4e_TFT.jsonl` for the target `101`.
fn default_output(args: &Args) -> PathBuf {
    let mut name = format!("topologies_{}n_{}e", args.nodes, args.edges);
    for target in &args.targets {
        name.push('_');
        name.push_str(&compress_state(target.trim()));
    }
    name.push_str(".jsonl");
    PathBuf::from(name)
}

fn with_suffix(path: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|it| it.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{stem}_{suffix}.{extension}"))
}

fn run(args: &Args) -> Result<(), SearchError> {
    let enumeration = EnumerationConfig::new(args.nodes, args.edges)
        .with_interactions(&args.interactions)
        .with_gates(&args.gates)
        .only_connected(!args.allow_disconnected);
    let mut config = SearchConfig::new(enumeration).with_progress(Arc::new(LogProgress::default()));
    if !args.targets.is_empty() {
        let filter = TargetFilter::parse(args.nodes, &args.targets)?
            .strict(args.strict)
            .ignore_steady_states(args.ignore_steady_states)
            .ignore_limit_cycles(args.ignore_limit_cycles);
        config = config.with_filter(filter);
    }

    let mut networks = Vec::new();
    for network in search_networks(&config)? {
        networks.push(network?);
    }
    let output = args.output.clone().unwrap_or_else(|| default_output(args));
    write_networks_file(&output, &networks)?;
    println!("Found {} networks, saved to {}.", networks.len(), output.display());

    if args.deduplicate {
        let mut dedup = DedupConfig::new()
            .with_chunk_size(args.chunk_size)
            .with_growth_factor(args.growth_factor)
            .with_equivalence(Arc::new(LabelMatching::attributes()))
            .with_progress(Arc::new(LogProgress::default()));
        if let Some(workers) = args.workers {
            dedup = dedup.with_workers(workers);
        }
        networks = deduplicate(&dedup, networks)?;
        let unique = with_suffix(&output, "unique", "jsonl");
        write_networks_file(&unique, &networks)?;
        println!(
            "Found {} non-isomorphic networks, saved to {}.",
            networks.len(),
            unique.display()
        );
    }

    if args.group_dynamics {
        let groups = group_by_dynamics(networks)?;
        let grouped = with_suffix(&output, "dynamics", "txt");
        write_groups(BufWriter::new(File::create(&grouped)?), &groups)?;
        println!(
            "Found {} dynamics classes, saved to {}.",
            groups.len(),
            grouped.display()
        );
    }

    Ok(())
}
