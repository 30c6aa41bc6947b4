use crate::model::{Edge, Gate, Interaction, Network, State};
use std::collections::BTreeSet;

pub use crate::model::Interaction::{Negative as NEG, Positive as POS};

/// Initialize env_logger for tests. Safe to call multiple times.
pub fn init_logger() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Trace)
        .is_test(true)
        .try_init();
}

/// Build a network from `(source, destination, interaction)` triples. Every node with
/// several inputs gets the gate from `gates` (looked up by node index), defaulting to `OR`.
///
/// # Example
///
/// `mk_network(2, &[(0, 1, POS), (1, 1, NEG)], &[(1, Gate::And)])` is the network
/// `0 -> 1, 1 -| 1*`.
pub fn mk_network(
    node_count: usize,
    edges: &[(usize, usize, Interaction)],
    gates: &[(usize, Gate)],
) -> Network {
    let in_degree = |node: usize| edges.iter().filter(|e| e.1 == node).count();
    let edges: Vec<Edge> = edges
        .iter()
        .map(|&(source, destination, interaction)| {
            let gate = if in_degree(destination) > 1 {
                let gate = gates
                    .iter()
                    .find(|(node, _)| *node == destination)
                    .map(|(_, gate)| *gate);
                Some(gate.unwrap_or(Gate::Or))
            } else {
                None
            };
            Edge {
                source,
                destination,
                interaction,
                gate,
            }
        })
        .collect();
    Network::try_from_edges(node_count, &edges).expect("Invalid test network")
}

/// Parse a list of state labels.
pub fn mk_states(node_count: usize, labels: &[&str]) -> BTreeSet<State> {
    labels
        .iter()
        .map(|it| State::parse(node_count, it).expect("Invalid test state"))
        .collect()
}

/// Binomial coefficient `C(n, k)`.
pub fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
}

/// Relabel the nodes of a network using the given permutation (`new = permutation[old]`).
pub fn permute(network: &Network, permutation: &[usize]) -> Network {
    assert_eq!(permutation.len(), network.node_count());
    let edges: Vec<Edge> = network
        .edges()
        .map(|e| Edge {
            source: permutation[e.source],
            destination: permutation[e.destination],
            ..e
        })
        .collect();
    Network::try_from_edges(network.node_count(), &edges).expect("Invalid permutation")
}

/// Random networks with `1..=max_nodes` nodes, random edges, signs, and gates.
pub fn arb_network(max_nodes: usize) -> impl proptest::strategy::Strategy<Value = Network> {
    use proptest::prelude::*;

    (1..=max_nodes)
        .prop_flat_map(|n| {
            (
                Just(n),
                proptest::collection::vec((any::<bool>(), any::<bool>()), n * n),
                proptest::collection::vec(any::<bool>(), n),
            )
        })
        .prop_map(|(n, pairs, gates)| {
            let edges: Vec<(usize, usize, Interaction)> = pairs
                .iter()
                .enumerate()
                .filter(|(_, (present, _))| *present)
                .map(|(k, (_, positive))| {
                    let sign = if *positive { POS } else { NEG };
                    (k / n, k % n, sign)
                })
                .collect();
            let gates: Vec<(usize, Gate)> = gates
                .iter()
                .enumerate()
                .map(|(node, and)| (node, if *and { Gate::And } else { Gate::Or }))
                .collect();
            mk_network(n, &edges, &gates)
        })
}
