use crate::error::{ConfigurationError, SearchError};
use crate::io::{read_networks_file, write_networks_file};
use crate::isomorphism::{Equivalence, LabelMatching, RepresentativeSet};
use crate::model::Network;
use crate::progress::{SharedProgress, no_progress};
use cancel_this::is_cancelled;
use log::{debug, error, info};
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::channel;
use tempfile::Builder;

/// Parameters of the chunked parallel [`deduplicate`].
#[derive(Clone)]
pub struct DedupConfig {
    /// Number of networks reduced by one worker in the first round.
    pub chunk_size: usize,
    /// Chunk size multiplier applied after each round.
    pub growth_factor: usize,
    /// Size of the worker pool.
    pub workers: usize,
    pub equivalence: Arc<dyn Equivalence>,
    /// Parent of the temporary round directory (system default when `None`).
    pub temp_root: Option<PathBuf>,
    pub progress: SharedProgress,
}

impl DedupConfig {
    pub fn new() -> DedupConfig {
        let workers = std::thread::available_parallelism()
            .map(|it| it.get())
            .unwrap_or(1);
        DedupConfig {
            chunk_size: 1000,
            growth_factor: 2,
            workers,
            equivalence: Arc::new(LabelMatching::attributes()),
            temp_root: None,
            progress: no_progress(),
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> DedupConfig {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_growth_factor(mut self, growth_factor: usize) -> DedupConfig {
        self.growth_factor = growth_factor;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> DedupConfig {
        self.workers = workers;
        self
    }

    pub fn with_equivalence(mut self, equivalence: Arc<dyn Equivalence>) -> DedupConfig {
        self.equivalence = equivalence;
        self
    }

    pub fn with_temp_root(mut self, temp_root: PathBuf) -> DedupConfig {
        self.temp_root = Some(temp_root);
        self
    }

    pub fn with_progress(mut self, progress: SharedProgress) -> DedupConfig {
        self.progress = progress;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let parameters = [
            ("chunk_size", self.chunk_size),
            ("growth_factor", self.growth_factor),
            ("workers", self.workers),
        ];
        for (parameter, value) in parameters {
            if value == 0 {
                return Err(ConfigurationError::NotPositive { parameter, value });
            }
        }
        Ok(())
    }
}

impl Default for DedupConfig {
    fn default() -> Self {
        DedupConfig::new()
    }
}

/// Message sent by a worker once its chunk is reduced (or failed).
#[derive(Debug)]
pub(crate) struct ChunkOutcome {
    pub chunk: usize,
    pub result: Result<PathBuf, String>,
}

/// Tallies the outcomes of one round and detects lost chunk results.
pub(crate) struct RoundCollector {
    round: usize,
    dispatched: usize,
    failed: usize,
    files: Vec<(usize, PathBuf)>,
    progress: SharedProgress,
}

impl RoundCollector {
    pub fn new(round: usize, progress: SharedProgress) -> RoundCollector {
        RoundCollector {
            round,
            dispatched: 0,
            failed: 0,
            files: Vec::new(),
            progress,
        }
    }

    pub fn dispatch(&mut self) {
        self.dispatched += 1;
    }

    pub fn accept(&mut self, outcome: ChunkOutcome) {
        match outcome.result {
            Ok(path) => {
                debug!("[round:{}] Chunk {} reduced.", self.round, outcome.chunk);
                self.files.push((outcome.chunk, path));
            }
            Err(message) => {
                error!(
                    "[round:{}] Chunk {} failed: {message}",
                    self.round, outcome.chunk
                );
                self.failed += 1;
            }
        }
        self.progress
            .chunk_completed(self.round, self.files.len() + self.failed, self.dispatched);
    }

    /// Chunk result files ordered by chunk index, or an error if any result is missing.
    pub fn finish(mut self) -> Result<Vec<PathBuf>, SearchError> {
        if self.files.len() != self.dispatched {
            return Err(SearchError::PartialResult {
                round: self.round,
                expected: self.dispatched,
                collected: self.files.len(),
            });
        }
        self.files.sort();
        Ok(self.files.into_iter().map(|(_, path)| path).collect())
    }
}

/// Deduplicate networks by isomorphism using a pool of parallel workers.
///
/// Every round splits its input into chunks, reduces each chunk independently on the worker
/// pool and concatenates the per-chunk representatives into the input of the next round.
/// Chunk results are exchanged through files in a temporary directory, which is removed
/// once all workers have finished, on success as well as on failure.
///
/// A round that fits into a single chunk is the last one. Otherwise the chunk size grows by
/// `growth_factor`, and if a round removed nothing, the next round uses a single chunk
/// spanning its whole input. A chunk whose result is lost (e.g. a panicking worker) turns
/// into [`SearchError::PartialResult`].
pub fn deduplicate(config: &DedupConfig, networks: Vec<Network>) -> Result<Vec<Network>, SearchError> {
    config.validate()?;
    if networks.is_empty() {
        return Ok(networks);
    }

    let mut builder = Builder::new();
    builder.prefix("topology-dedup-");
    let directory = match &config.temp_root {
        Some(root) => builder.tempdir_in(root)?,
        None => builder.tempdir()?,
    };
    let pool = ThreadPoolBuilder::new()
        .num_threads(config.workers)
        .thread_name(|index| format!("dedup-worker-{index}"))
        .build()?;

    let result = reduce_rounds(config, &pool, directory.path(), networks);
    // Every round waits for all of its workers, so nothing writes into the directory now.
    let closed = directory.close();
    let result = result?;
    closed?;
    Ok(result)
}

fn reduce_rounds(
    config: &DedupConfig,
    pool: &ThreadPool,
    directory: &Path,
    mut networks: Vec<Network>,
) -> Result<Vec<Network>, SearchError> {
    let mut chunk_size = config.chunk_size;
    let mut round = 0;
    loop {
        is_cancelled!()?;
        round += 1;
        let input = networks.len();
        let chunks = split_chunks(networks, chunk_size);
        let last = chunks.len() <= 1;
        info!(
            "[round:{round}] Reducing {input} networks in {} chunk(s) of size {chunk_size}.",
            chunks.len()
        );

        networks = run_round(config, pool, directory, round, chunks)?;
        info!("[round:{round}] Reduced {input} networks to {}.", networks.len());

        if last {
            return Ok(networks);
        }
        if networks.len() == input {
            chunk_size = input.max(1);
        } else {
            chunk_size = chunk_size.saturating_mul(config.growth_factor);
        }
    }
}

fn run_round(
    config: &DedupConfig,
    pool: &ThreadPool,
    directory: &Path,
    round: usize,
    chunks: Vec<Vec<Network>>,
) -> Result<Vec<Network>, SearchError> {
    let (sender, receiver) = channel::<ChunkOutcome>();
    let mut collector = RoundCollector::new(round, config.progress.clone());
    let max_in_flight = config.workers.saturating_mul(2);
    let mut in_flight = 0usize;

    for (index, chunk) in chunks.into_iter().enumerate() {
        // Each dispatched job sends exactly one outcome, so this cannot block forever.
        while in_flight >= max_in_flight {
            let Ok(outcome) = receiver.recv() else {
                break;
            };
            collector.accept(outcome);
            in_flight -= 1;
        }

        let sender = sender.clone();
        let equivalence = config.equivalence.clone();
        let path = directory.join(format!("round-{round}-chunk-{index}.jsonl"));
        collector.dispatch();
        in_flight += 1;
        pool.spawn(move || {
            let result = catch_unwind(AssertUnwindSafe(|| reduce_chunk(chunk, equivalence, &path)))
                .unwrap_or_else(|panic| Err(panic_message(panic)));
            // The supervisor only goes away after receiving from every sender.
            let _ = sender.send(ChunkOutcome {
                chunk: index,
                result,
            });
        });
    }

    // Drain: the iterator ends once every worker has dropped its sender.
    drop(sender);
    for outcome in receiver {
        collector.accept(outcome);
    }

    let mut result = Vec::new();
    for path in collector.finish()? {
        result.extend(read_networks_file(&path)?);
        std::fs::remove_file(&path)?;
    }
    Ok(result)
}

fn reduce_chunk(
    chunk: Vec<Network>,
    equivalence: Arc<dyn Equivalence>,
    path: &Path,
) -> Result<PathBuf, String> {
    let mut representatives = RepresentativeSet::new(equivalence);
    for network in chunk {
        representatives.insert(network);
    }
    write_networks_file(path, representatives.networks()).map_err(|e| e.to_string())?;
    Ok(path.to_path_buf())
}

fn split_chunks(networks: Vec<Network>, chunk_size: usize) -> Vec<Vec<Network>> {
    let mut chunks = Vec::new();
    let mut networks = networks.into_iter();
    loop {
        let chunk: Vec<Network> = networks.by_ref().take(chunk_size).collect();
        if chunk.is_empty() {
            return chunks;
        }
        chunks.push(chunk);
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "worker panicked".to_string()
    }
}
