use biodivine_topology_search::error::SearchError;
use biodivine_topology_search::io::{read_networks_file, write_groups, write_networks_file};
use biodivine_topology_search::isomorphism::{
    DedupConfig, LabelMatching, deduplicate, group_by_dynamics,
};
use biodivine_topology_search::progress::LogProgress;
use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "deduplicate_networks")]
#[command(about = "Remove isomorphic duplicates from a JSON-lines list of networks")]
struct Args {
    /// Path to a JSON-lines network file
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Output file (`<FILE>_unique.jsonl` by default)
    #[arg(long, value_name = "FILE", require_equals = true)]
    output: Option<PathBuf>,

    /// Initial chunk size of the parallel deduplication
    #[arg(long, default_value_t = 1000, require_equals = true)]
    chunk_size: usize,

    /// Chunk size multiplier applied after each round
    #[arg(long, default_value_t = 2, require_equals = true)]
    growth_factor: usize,

    /// Number of workers (all available cores by default)
    #[arg(long, require_equals = true)]
    workers: Option<usize>,

    /// Consider networks that differ only in gates as duplicates
    #[arg(long)]
    ignore_gates: bool,

    /// Consider networks that differ only in edge signs as duplicates
    #[arg(long)]
    ignore_interactions: bool,

    /// Also write the groups of networks with isomorphic state-transition graphs
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

fn run(args: &Args) -> Result<(), SearchError> {
    let networks = read_networks_file(&args.file)?;
    println!("Loaded {} networks from {}.", networks.len(), args.file.display());

    let equivalence = LabelMatching {
        match_gates: !args.ignore_gates,
        match_interactions: !args.ignore_interactions,
    };
    let mut config = DedupConfig::new()
        .with_chunk_size(args.chunk_size)
        .with_growth_factor(args.growth_factor)
        .with_equivalence(Arc::new(equivalence))
        .with_progress(Arc::new(LogProgress::default()));
    if let Some(workers) = args.workers {
        config = config.with_workers(workers);
    }

    let unique = deduplicate(&config, networks)?;
    let stem = args
        .file
        .file_stem()
        .map(|it| it.to_string_lossy().into_owned())
        .unwrap_or_default();
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.file.with_file_name(format!("{stem}_unique.jsonl")));
    write_networks_file(&output, &unique)?;
    println!(
        "Found {} non-isomorphic networks, saved to {}.",
        unique.len(),
        output.display()
    );

    if args.group_dynamics {
        let groups = group_by_dynamics(unique)?;
        let grouped = args.file.with_file_name(format!("{stem}_dynamics.txt"));
        write_groups(BufWriter::new(File::create(&grouped)?), &groups)?;
        println!(
            "Found {} dynamics classes, saved to {}.",
            groups.len(),
            grouped.display()
        );
    }

    Ok(())
}
