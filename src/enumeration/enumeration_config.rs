use crate::error::ConfigurationError;
use crate::model::{Gate, Interaction, MAX_NODES, validate_alphabet};

/// A configuration object for the enumeration of candidate networks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumerationConfig {
    /// Number of network nodes. Every node index `0..node_count` is a valid edge endpoint.
    pub node_count: usize,
    /// Exact number of distinct directed edges (self-loops included) of every candidate.
    pub edge_count: usize,
    /// Only report topologies whose undirected projection touches all nodes and is
    /// connected (default: `false`).
    pub only_connected: bool,
    /// The signs that can be assigned to each edge (default: only [`Interaction::Positive`]).
    pub interactions: Vec<Interaction>,
    /// The gates that can be assigned to each node with several inputs
    /// (default: only [`Gate::Or`]).
    pub gates: Vec<Gate>,
}

impl EnumerationConfig {
    /// Create a new [`EnumerationConfig`] with positive interactions, `OR` gates, and
    /// no connectivity requirement.
    pub fn new(node_count: usize, edge_count: usize) -> EnumerationConfig {
        EnumerationConfig {
            node_count,
            edge_count,
            only_connected: false,
            interactions: vec![Interaction::Positive],
            gates: vec![Gate::Or],
        }
    }

    pub fn with_interactions(mut self, interactions: &[Interaction]) -> EnumerationConfig {
        self.interactions = interactions.to_vec();
        self
    }

    pub fn with_gates(mut self, gates: &[Gate]) -> EnumerationConfig {
        self.gates = gates.to_vec();
        self
    }

    pub fn only_connected(mut self, only_connected: bool) -> EnumerationConfig {
        self.only_connected = only_connected;
        self
    }

    /// Number of distinct ordered node pairs (including self-loops) an edge can be drawn from.
    pub fn pair_count(&self) -> usize {
        self.node_count * self.node_count
    }

    /// Check the configuration before any enumeration starts.
    ///
    /// An edge count exceeding [`EnumerationConfig::pair_count`] is not an error, the
    /// enumeration is simply empty.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.node_count == 0 {
            return Err(ConfigurationError::NoNodes(self.node_count));
        }
        if self.node_count > MAX_NODES {
            return Err(ConfigurationError::TooManyNodes {
                count: self.node_count,
                max: MAX_NODES,
            });
        }
        validate_alphabet("interactions", &self.interactions)?;
        validate_alphabet("gates", &self.gates)?;
        Ok(())
    }
}
