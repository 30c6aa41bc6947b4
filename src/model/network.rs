use crate::error::InvariantViolation;
use crate::model::{Gate, Interaction, MAX_NODES, SignedTopology};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// One incoming edge of a node: the regulating node and the sign of the regulation.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Regulator {
    pub source: usize,
    pub interaction: Interaction,
}

/// The inputs of a single network node.
///
/// A node with two or more regulators always has exactly one gate; a node with zero or one
/// regulator never has a gate.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct NodeInputs {
    gate: Option<Gate>,
    regulators: Vec<Regulator>,
}

/// A flat view of one network edge, including the gate of its destination (if any).
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Edge {
    pub source: usize,
    pub destination: usize,
    pub interaction: Interaction,
    pub gate: Option<Gate>,
}

/// A fully specified Boolean network: for every node, its regulators (with signs) and,
/// for nodes with several regulators, the gate used to combine them.
///
/// Nodes without regulators keep their value during simulation. The structural rules
/// described in [`NodeInputs`] are checked whenever a network is built from outside data
/// (see [`Network::try_from_edges`]).
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(into = "NetworkRecord", try_from = "NetworkRecord")]
pub struct Network {
    inputs: Vec<NodeInputs>,
}

/// Persisted form of a [`Network`]: `{"nodes": N, "edges": [[source, destination, interaction, gate], ...]}`.
#[derive(Serialize, Deserialize)]
struct NetworkRecord {
    nodes: usize,
    edges: Vec<EdgeRecord>,
}

#[derive(Serialize, Deserialize)]
struct EdgeRecord(usize, usize, Interaction, Option<Gate>);

impl NodeInputs {
    pub fn gate(&self) -> Option<Gate> {
        self.gate
    }

    pub fn regulators(&self) -> &[Regulator] {
        &self.regulators
    }

    pub fn in_degree(&self) -> usize {
        self.regulators.len()
    }

    fn check(&self, node: usize) -> Result<(), InvariantViolation> {
        let inputs = self.in_degree();
        match (inputs > 1, self.gate) {
            (true, None) => Err(InvariantViolation::MissingGate { node, inputs }),
            (false, Some(_)) => Err(InvariantViolation::UnexpectedGate { node, inputs }),
            _ => Ok(()),
        }
    }
}

impl Network {
    /// Build a network from a signed topology and one gate per multi-input node.
    ///
    /// The `gates` are assigned to the nodes with in-degree greater than one in
    /// increasing node order.
    pub(crate) fn from_signed(topology: &SignedTopology, gates: &[Gate]) -> Network {
        let mut inputs = vec![NodeInputs::default(); topology.node_count()];
        for &(source, destination, interaction) in topology.edges() {
            inputs[destination].regulators.push(Regulator {
                source,
                interaction,
            });
        }
        let mut gates = gates.iter();
        for node in inputs.iter_mut() {
            if node.in_degree() > 1 {
                node.gate = gates.next().copied();
            }
        }
        debug_assert!(gates.next().is_none());
        let network = Network { inputs };
        debug_assert!(network.check().is_ok());
        network
    }

    /// Build a network from a list of edges, validating all structural invariants.
    pub fn try_from_edges(node_count: usize, edges: &[Edge]) -> Result<Network, InvariantViolation> {
        if node_count == 0 || node_count > MAX_NODES {
            return Err(InvariantViolation::NodeCount {
                count: node_count,
                max: MAX_NODES,
            });
        }
        let mut inputs = vec![NodeInputs::default(); node_count];
        for edge in edges {
            if edge.source >= node_count || edge.destination >= node_count {
                return Err(InvariantViolation::NodeOutOfRange {
                    from: edge.source,
                    to: edge.destination,
                    node_count,
                });
            }
            let node = &mut inputs[edge.destination];
            if node.regulators.iter().any(|r| r.source == edge.source) {
                return Err(InvariantViolation::DuplicateEdge {
                    from: edge.source,
                    to: edge.destination,
                });
            }
            match (node.gate, edge.gate) {
                (Some(a), Some(b)) if a != b => {
                    return Err(InvariantViolation::ConflictingGates(edge.destination));
                }
                (None, Some(_)) if !node.regulators.is_empty() => {
                    return Err(InvariantViolation::ConflictingGates(edge.destination));
                }
                (Some(_), None) => {
                    return Err(InvariantViolation::ConflictingGates(edge.destination));
                }
                _ => {}
            }
            node.gate = edge.gate;
            node.regulators.push(Regulator {
                source: edge.source,
                interaction: edge.interaction,
            });
        }
        let network = Network { inputs };
        network.check()?;
        Ok(network)
    }

    /// Check that every node satisfies the gate assignment rules.
    pub fn check(&self) -> Result<(), InvariantViolation> {
        for (node, inputs) in self.inputs.iter().enumerate() {
            inputs.check(node)?;
        }
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.inputs.len()
    }

    pub fn edge_count(&self) -> usize {
        self.inputs.iter().map(|it| it.in_degree()).sum()
    }

    pub fn inputs(&self, node: usize) -> &NodeInputs {
        &self.inputs[node]
    }

    pub fn nodes(&self) -> impl Iterator<Item = (usize, &NodeInputs)> {
        self.inputs.iter().enumerate()
    }

    /// All edges, grouped by destination (in increasing order).
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.nodes().flat_map(|(destination, inputs)| {
            inputs.regulators.iter().map(move |r| Edge {
                source: r.source,
                destination,
                interaction: r.interaction,
                gate: inputs.gate,
            })
        })
    }

    /// The `(source, destination, interaction)` list consumed by graph renderers.
    pub fn edge_list(&self) -> Vec<(usize, usize, Interaction)> {
        self.edges()
            .map(|e| (e.source, e.destination, e.interaction))
            .collect()
    }
}

impl Display for Network {
    /// Sorted textual notation, e.g. `0 -> 1, 1 -| 2*`: `->` is activation, `-|` inhibition
    /// and `*` marks a destination using the `AND` gate.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut links: Vec<String> = self
            .edges()
            .map(|e| {
                let marker = if e.gate == Some(Gate::And) { "*" } else { "" };
                format!(
                    "{} {} {}{}",
                    e.source,
                    e.interaction.arrow(),
                    e.destination,
                    marker
                )
            })
            .collect();
        links.sort();
        write!(f, "{}", links.join(", "))
    }
}

impl From<Network> for NetworkRecord {
    fn from(value: Network) -> Self {
        NetworkRecord {
            nodes: value.node_count(),
            edges: value
                .edges()
                .map(|e| EdgeRecord(e.source, e.destination, e.interaction, e.gate))
                .collect(),
        }
    }
}

impl TryFrom<NetworkRecord> for Network {
    type Error = InvariantViolation;

    fn try_from(value: NetworkRecord) -> Result<Self, Self::Error> {
        let edges: Vec<Edge> = value
            .edges
            .into_iter()
            .map(|EdgeRecord(source, destination, interaction, gate)| Edge {
                source,
                destination,
                interaction,
                gate,
            })
            .collect();
        Network::try_from_edges(value.nodes, &edges)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::InvariantViolation;
    use crate::model::{Edge, Gate, Interaction, Network, Topology};

    fn edge(s: usize, d: usize, i: Interaction, g: Option<Gate>) -> Edge {
        Edge {
            source: s,
            destination: d,
            interaction: i,
            gate: g,
        }
    }

    #[test]
    fn gates_are_assigned_to_multi_input_nodes_in_order() {
        let signed = Topology::new(3, vec![(0, 1), (2, 1), (0, 2), (1, 2), (1, 0)])
            .sign(&[Interaction::Positive; 5]);
        let network = Network::from_signed(&signed, &[Gate::And, Gate::Or]);
        assert_eq!(network.inputs(0).gate(), None);
        assert_eq!(network.inputs(1).gate(), Some(Gate::And));
        assert_eq!(network.inputs(2).gate(), Some(Gate::Or));
        assert_eq!(network.edge_count(), 5);
    }

    #[test]
    fn missing_gate_is_rejected() {
        let edges = [
            edge(0, 1, Interaction::Positive, None),
            edge(1, 1, Interaction::Negative, None),
        ];
        assert_eq!(
            Network::try_from_edges(2, &edges),
            Err(InvariantViolation::MissingGate { node: 1, inputs: 2 })
        );
    }

    #[test]
    fn gate_on_single_input_is_rejected() {
        let edges = [edge(0, 1, Interaction::Positive, Some(Gate::Or))];
        assert_eq!(
            Network::try_from_edges(2, &edges),
            Err(InvariantViolation::UnexpectedGate { node: 1, inputs: 1 })
        );
    }

    #[test]
    fn malformed_edges_are_rejected() {
        let out_of_range = [edge(0, 2, Interaction::Positive, None)];
        assert!(matches!(
            Network::try_from_edges(2, &out_of_range),
            Err(InvariantViolation::NodeOutOfRange { .. })
        ));
        let duplicate = [
            edge(0, 1, Interaction::Positive, Some(Gate::Or)),
            edge(0, 1, Interaction::Negative, Some(Gate::Or)),
        ];
        assert!(matches!(
            Network::try_from_edges(2, &duplicate),
            Err(InvariantViolation::DuplicateEdge { from: 0, to: 1 })
        ));
        let gate_after_ungated_edge = [
            edge(0, 1, Interaction::Positive, None),
            edge(1, 1, Interaction::Positive, Some(Gate::Or)),
        ];
        assert_eq!(
            Network::try_from_edges(2, &gate_after_ungated_edge),
            Err(InvariantViolation::ConflictingGates(1))
        );
        let conflicting = [
            edge(0, 1, Interaction::Positive, Some(Gate::Or)),
            edge(1, 1, Interaction::Positive, Some(Gate::And)),
        ];
        assert_eq!(
            Network::try_from_edges(2, &conflicting),
            Err(InvariantViolation::ConflictingGates(1))
        );
    }

    #[test]
    fn textual_notation() {
        let edges = [
            edge(0, 1, Interaction::Positive, None),
            edge(0, 2, Interaction::Negative, Some(Gate::And)),
            edge(1, 2, Interaction::Positive, Some(Gate::And)),
        ];
        let network = Network::try_from_edges(3, &edges).unwrap();
        assert_eq!(network.to_string(), "0 -> 1, 0 -| 2*, 1 -> 2*");
    }

    #[test]
    fn json_record_format() {
        let edges = [
            edge(0, 1, Interaction::Positive, Some(Gate::Or)),
            edge(1, 1, Interaction::Negative, Some(Gate::Or)),
        ];
        let network = Network::try_from_edges(2, &edges).unwrap();
        let json = serde_json::to_string(&network).unwrap();
        assert_eq!(json, r#"{"nodes":2,"edges":[[0,1,1,1],[1,1,0,1]]}"#);
        let parsed: Network = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, network);
    }

    #[test]
    fn invalid_json_record_is_rejected() {
        let json = r#"{"nodes":2,"edges":[[0,1,1,null],[1,1,0,null]]}"#;
        assert!(serde_json::from_str::<Network>(json).is_err());
        let json = r#"{"nodes":2,"edges":[[0,1,5,null]]}"#;
        assert!(serde_json::from_str::<Network>(json).is_err());
    }
}
