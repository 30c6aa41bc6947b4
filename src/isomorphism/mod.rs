//! Deduplication of networks up to isomorphism.
//!
//! Two networks are duplicates if some relabelling of nodes maps one onto the other while
//! preserving edges, and (depending on the chosen [`Equivalence`]) node gates and edge
//! interactions. [`RepresentativeSet`] performs a single-pass reduction, [`deduplicate`]
//! runs the same reduction in rounds over chunks on a worker pool, which is what large
//! search results need.
//!
//! Finally, [`group_by_dynamics`] groups networks with isomorphic state-transition graphs.

mod chunked;
mod dynamics_groups;
mod labels;
mod network_graph;
mod representatives;

#[cfg(test)]
mod tests;

pub use chunked::{DedupConfig, deduplicate};
pub use dynamics_groups::group_by_dynamics;
pub use labels::{EdgeLabel, Equivalence, LabelMatching, NodeLabel};
pub use network_graph::NetworkGraph;
pub use representatives::{RepresentativeSet, reduce_representatives};
