use crate::isomorphism::{EdgeLabel, Equivalence, NodeLabel};
use crate::model::Network;
use petgraph::algo::is_isomorphic_matching;
use petgraph::graph::{DiGraph, NodeIndex};

/// Attribute-labelled directed graph of a [`Network`], used for isomorphism testing.
///
/// Every node of the network is a graph node, including nodes without any edges.
/// Alongside the graph, we keep a label-independent invariant (the sorted list of
/// `(in-degree, out-degree, self-loop)` triples) which quickly rules out most
/// non-isomorphic pairs before the full matching runs.
#[derive(Clone, Debug)]
pub struct NetworkGraph {
    graph: DiGraph<NodeLabel, EdgeLabel>,
    signature: Vec<(usize, usize, bool)>,
}

impl NetworkGraph {
    pub fn new(network: &Network) -> NetworkGraph {
        let mut graph = DiGraph::with_capacity(network.node_count(), network.edge_count());
        let nodes: Vec<NodeIndex> = network
            .nodes()
            .map(|(_, inputs)| graph.add_node(NodeLabel::from(inputs)))
            .collect();

        let mut signature = vec![(0usize, 0usize, false); network.node_count()];
        for edge in network.edges() {
            graph.add_edge(
                nodes[edge.source],
                nodes[edge.destination],
                EdgeLabel::from(edge.interaction),
            );
            signature[edge.source].1 += 1;
            signature[edge.destination].0 += 1;
            if edge.source == edge.destination {
                signature[edge.source].2 = true;
            }
        }
        signature.sort();

        NetworkGraph { graph, signature }
    }

    pub fn graph(&self) -> &DiGraph<NodeLabel, EdgeLabel> {
        &self.graph
    }

    /// The label-independent degree invariant of this graph.
    pub fn signature(&self) -> &[(usize, usize, bool)] {
        &self.signature
    }

    /// True if the two graphs are isomorphic under the given `equivalence`.
    pub fn is_equivalent(&self, other: &NetworkGraph, equivalence: &dyn Equivalence) -> bool {
        if self.signature != other.signature
            || self.graph.edge_count() != other.graph.edge_count()
        {
            return false;
        }
        is_isomorphic_matching(
            &self.graph,
            &other.graph,
            |a, b| equivalence.nodes_match(a, b),
            |a, b| equivalence.edges_match(a, b),
        )
    }
}
