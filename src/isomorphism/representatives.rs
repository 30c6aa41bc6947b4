use crate::isomorphism::{Equivalence, NetworkGraph};
use crate::model::Network;
use cancel_this::{Cancellable, is_cancelled};
use std::collections::HashMap;
use std::sync::Arc;

/// A growing list of pairwise non-isomorphic networks.
///
/// Each inserted network is compared against the representatives with the same degree
/// signature. If none of them is equivalent, the network becomes a new representative.
/// Otherwise it is counted as a duplicate of the first equivalent representative.
pub struct RepresentativeSet {
    equivalence: Arc<dyn Equivalence>,
    representatives: Vec<(Network, NetworkGraph, usize)>,
    buckets: HashMap<Vec<(usize, usize, bool)>, Vec<usize>>,
}

impl RepresentativeSet {
    pub fn new(equivalence: Arc<dyn Equivalence>) -> RepresentativeSet {
        RepresentativeSet {
            equivalence,
            representatives: Vec::new(),
            buckets: HashMap::new(),
        }
    }

    /// Insert a network, returning `true` if it became a new representative.
    pub fn insert(&mut self, network: Network) -> bool {
        let graph = NetworkGraph::new(&network);
        let bucket = self
            .buckets
            .entry(graph.signature().to_vec())
            .or_default();
        for &index in bucket.iter() {
            let (_, existing, count) = &mut self.representatives[index];
            if existing.is_equivalent(&graph, self.equivalence.as_ref()) {
                *count += 1;
                return false;
            }
        }
        bucket.push(self.representatives.len());
        self.representatives.push((network, graph, 1));
        true
    }

    pub fn len(&self) -> usize {
        self.representatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.representatives.is_empty()
    }

    /// Representatives in insertion order.
    pub fn networks(&self) -> impl Iterator<Item = &Network> {
        self.representatives.iter().map(|(network, _, _)| network)
    }

    /// Each representative with the number of inserted networks it stands for.
    pub fn multiplicities(&self) -> impl Iterator<Item = (&Network, usize)> {
        self.representatives
            .iter()
            .map(|(network, _, count)| (network, *count))
    }

    pub fn into_networks(self) -> Vec<Network> {
        self.representatives
            .into_iter()
            .map(|(network, _, _)| network)
            .collect()
    }
}

/// Single-pass deduplication: keep the first network of every equivalence class.
pub fn reduce_representatives<I>(
    networks: I,
    equivalence: Arc<dyn Equivalence>,
) -> Cancellable<Vec<Network>>
where
    I: IntoIterator<Item = Network>,
{
    let mut set = RepresentativeSet::new(equivalence);
    for network in networks {
        is_cancelled!()?;
        set.insert(network);
    }
    Ok(set.into_networks())
}
