use cancel_this::Cancelled;
use std::path::PathBuf;
use thiserror::Error;

/// Invalid search parameters. These are always reported before a stage starts
/// consuming candidates, never in the middle of an enumeration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Invalid node count {0}: at least one node is required")]
    NoNodes(usize),
    #[error("Invalid node count {count}: at most {max} nodes are supported")]
    TooManyNodes { count: usize, max: usize },
    #[error("Empty `{0}` alphabet: at least one value is required")]
    EmptyAlphabet(&'static str),
    #[error("Duplicate value `{value}` in the `{alphabet}` alphabet")]
    DuplicateInAlphabet {
        alphabet: &'static str,
        value: String,
    },
    #[error("Unknown interaction code `{0}` (expected 1/positive or 0/negative)")]
    UnknownInteraction(String),
    #[error("Unknown gate code `{0}` (expected 1/or or 0/and)")]
    UnknownGate(String),
    #[error("Invalid target `{target}`: expected exactly {expected} characters")]
    TargetLength { target: String, expected: usize },
    #[error("Invalid target `{0}`: every character must be either `0` or `1`")]
    TargetAlphabet(String),
    #[error("Empty target set: at least one target state is required")]
    NoTargets,
    #[error("Invalid `{parameter}` value {value}: must be positive")]
    NotPositive {
        parameter: &'static str,
        value: usize,
    },
}

/// A network that does not satisfy the structural rules required by the simulator.
///
/// Networks built by the enumeration pipeline never violate these rules. A violation
/// means an upstream assignment bug or a corrupted persisted record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("Node {node} has {inputs} inputs but no gate")]
    MissingGate { node: usize, inputs: usize },
    #[error("Node {node} has {inputs} input(s) and must not carry a gate")]
    UnexpectedGate { node: usize, inputs: usize },
    #[error("Conflicting gates assigned to node {0}")]
    ConflictingGates(usize),
    #[error("Edge {from} -> {to} references a node outside of 0..{node_count}")]
    NodeOutOfRange {
        from: usize,
        to: usize,
        node_count: usize,
    },
    #[error("Duplicate edge {from} -> {to}")]
    DuplicateEdge { from: usize, to: usize },
    #[error("Invalid node count {count}: expected 1..={max}")]
    NodeCount { count: usize, max: usize },
}

/// Top-level error type of the search and deduplication pipeline.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("Invariant violation: {0}")]
    Invariant(#[from] InvariantViolation),
    #[error("Round {round} collected {collected} chunk results, but {expected} chunks were dispatched")]
    PartialResult {
        round: usize,
        expected: usize,
        collected: usize,
    },
    #[error("Malformed network record at {path:?}:{line}: {message}")]
    Record {
        path: Option<PathBuf>,
        line: usize,
        message: String,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Cannot start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("Computation cancelled: {0}")]
    Cancelled(Cancelled),
}

impl From<Cancelled> for SearchError {
    fn from(value: Cancelled) -> Self {
        SearchError::Cancelled(value)
    }
}
