//! Lazy enumeration of candidate networks.
//!
//! The enumeration is a pipeline of three layers:
//!
//! - [`TopologyEnumerator`] produces every set of `edge_count` distinct directed node pairs
//!   (self-loops included), optionally restricted to connected topologies.
//! - [`InteractionAssignments`] expands a topology with every combination of edge signs.
//! - [`GateAssignments`] expands a signed topology with every combination of gates for
//!   nodes with more than one input.
//!
//! [`NetworkCandidates`] chains all three layers into a single cancellable generator.
//!
//! ```no_run
//! use biodivine_topology_search::enumeration::{EnumerationConfig, enumerate_networks};
//! use biodivine_topology_search::model::{Gate, Interaction};
//!
//! let config = EnumerationConfig::new(3, 4)
//!     .with_interactions(&Interaction::ALL)
//!     .with_gates(&Gate::ALL)
//!     .only_connected(true);
//! for network in enumerate_networks(&config).unwrap() {
//!     println!("{}", network.unwrap());
//! }
//! ```

mod assignments;
mod candidates;
mod enumeration_config;
mod topologies;


use crate::error::ConfigurationError;
use crate::model::{Network, Topology};
pub use assignments::{GateAssignments, InteractionAssignments};
pub use candidates::{CandidateState, CandidateStep};
use computation_process::{Generator, Stateful};
pub use enumeration_config::EnumerationConfig;
pub use topologies::{TopologyState, TopologyStep};

/// Enumerate raw (unsigned) topologies.
pub type TopologyEnumerator = Generator<EnumerationConfig, TopologyState, Topology, TopologyStep>;

/// Enumerate fully specified candidate networks.
pub type NetworkCandidates = Generator<EnumerationConfig, CandidateState, Network, CandidateStep>;

/// Validate the configuration and create a [`TopologyEnumerator`].
pub fn enumerate_topologies(
    config: &EnumerationConfig,
) -> Result<TopologyEnumerator, ConfigurationError> {
    config.validate()?;
    Ok(TopologyEnumerator::configure(config.clone(), config))
}

/// Validate the configuration and create a [`NetworkCandidates`] generator.
pub fn enumerate_networks(
    config: &EnumerationConfig,
) -> Result<NetworkCandidates, ConfigurationError> {
    config.validate()?;
    Ok(NetworkCandidates::configure(config.clone(), config))
}
