use crate::dynamics::{StateSpace, classify_attractors};
use crate::error::SearchError;
use crate::model::Network;
use cancel_this::is_cancelled;
use log::{debug, info};
use petgraph::algo::is_isomorphic;
use petgraph::graph::DiGraph;
use rayon::prelude::*;
use std::collections::HashMap;

/// Cheap invariants of a state-transition graph: node count, sorted in-degrees, and the
/// sorted sizes of all attractors.
type DynamicsKey = (usize, Vec<usize>, Vec<usize>);

fn transition_graph(space: &StateSpace) -> (DynamicsKey, DiGraph<(), ()>) {
    let mut graph = DiGraph::with_capacity(space.len(), space.len());
    let nodes: Vec<_> = (0..space.len()).map(|_| graph.add_node(())).collect();
    let mut in_degrees = vec![0usize; space.len()];
    for (state, next) in space.transitions() {
        graph.add_edge(nodes[state.index()], nodes[next.index()], ());
        in_degrees[next.index()] += 1;
    }
    in_degrees.sort();

    let attractors = classify_attractors(space);
    let mut sizes: Vec<usize> = attractors.limit_cycles().iter().map(|c| c.len()).collect();
    sizes.extend(std::iter::repeat(1).take(attractors.steady_states().len()));
    sizes.sort();

    ((space.node_count(), in_degrees, sizes), graph)
}

/// Split one bucket of equal keys into isomorphism classes of network indices.
fn split_bucket(bucket: Vec<(usize, DiGraph<(), ()>)>) -> Vec<Vec<usize>> {
    let mut classes: Vec<(DiGraph<(), ()>, Vec<usize>)> = Vec::new();
    for (index, graph) in bucket {
        match classes.iter_mut().find(|(it, _)| is_isomorphic(it, &graph)) {
            Some((_, members)) => members.push(index),
            None => classes.push((graph, vec![index])),
        }
    }
    classes.into_iter().map(|(_, members)| members).collect()
}

/// Partition networks into classes with isomorphic (unlabelled) state-transition graphs.
///
/// Unlike structural deduplication, every network is kept: each class lists all its members
/// in input order, and classes are ordered by their first member.
///
/// State spaces are simulated in parallel on the global rayon pool. Networks are then
/// bucketed by cheap invariants and every bucket is split into classes independently,
/// also in parallel, since networks with different invariants are never isomorphic.
pub fn group_by_dynamics(networks: Vec<Network>) -> Result<Vec<Vec<Network>>, SearchError> {
    is_cancelled!()?;
    let total = networks.len();
    let graphs = networks
        .par_iter()
        .map(|network| StateSpace::build(network).map(|space| transition_graph(&space)))
        .collect::<Result<Vec<_>, _>>()?;
    is_cancelled!()?;

    let mut buckets: HashMap<DynamicsKey, Vec<(usize, DiGraph<(), ()>)>> = HashMap::new();
    for (index, (key, graph)) in graphs.into_iter().enumerate() {
        buckets.entry(key).or_default().push((index, graph));
    }
    debug!("Split {total} networks into {} dynamics buckets.", buckets.len());

    let mut classes: Vec<Vec<usize>> = buckets
        .into_par_iter()
        .flat_map_iter(|(_, bucket)| split_bucket(bucket))
        .collect();
    classes.sort_by_key(|members| members[0]);
    info!("Grouped {total} networks into {} dynamics classes.", classes.len());

    let mut networks: Vec<Option<Network>> = networks.into_iter().map(Some).collect();
    Ok(classes
        .into_iter()
        .map(|members| {
            members
                .into_iter()
                .filter_map(|index| networks[index].take())
                .collect()
        })
        .collect())
}
