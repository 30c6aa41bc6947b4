//! Tests for isomorphism testing, single-pass and chunked deduplication.


use crate::enumeration::{EnumerationConfig, enumerate_networks};
use crate::error::{ConfigurationError, SearchError};
use crate::isomorphism::chunked::{ChunkOutcome, RoundCollector};
use crate::isomorphism::{
    DedupConfig, EdgeLabel, Equivalence, LabelMatching, NetworkGraph, NodeLabel,
    RepresentativeSet, deduplicate, group_by_dynamics, reduce_representatives,
};
use crate::model::{Gate, Interaction, Network};
use crate::progress::{ProgressReporter, no_progress};
use crate::test_utils::{NEG, POS, arb_network, init_logger, mk_network, permute};
use proptest::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

fn attributes() -> Arc<dyn Equivalence> {
    Arc::new(LabelMatching::attributes())
}

fn all_candidates(node_count: usize, edge_count: usize) -> Vec<Network> {
    let config = EnumerationConfig::new(node_count, edge_count)
        .with_interactions(&Interaction::ALL)
        .with_gates(&Gate::ALL);
    enumerate_networks(&config)
        .unwrap()
        .map(|it| it.unwrap())
        .collect()
}

fn is_empty_dir(path: &Path) -> bool {
    std::fs::read_dir(path).unwrap().next().is_none()
}

#[test]
fn relabelled_networks_collapse() {
    init_logger();
    let network = mk_network(
        3,
        &[(0, 1, POS), (1, 2, NEG), (2, 2, POS), (0, 2, POS)],
        &[(2, Gate::And)],
    );
    let relabelled = permute(&network, &[2, 0, 1]);
    assert_ne!(network, relabelled);

    let mut set = RepresentativeSet::new(attributes());
    assert!(set.insert(network.clone()));
    assert!(!set.insert(relabelled));
    assert_eq!(set.len(), 1);
    let multiplicities: Vec<(&Network, usize)> = set.multiplicities().collect();
    assert_eq!(multiplicities, vec![(&network, 2)]);
}

#[test]
fn labels_are_compared_according_to_equivalence() {
    let activation = mk_network(2, &[(0, 1, POS)], &[]);
    let inhibition = mk_network(2, &[(0, 1, NEG)], &[]);
    let and = mk_network(2, &[(0, 1, POS), (1, 1, POS)], &[(1, Gate::And)]);
    let or = mk_network(2, &[(0, 1, POS), (1, 1, POS)], &[(1, Gate::Or)]);

    let graph = |n: &Network| NetworkGraph::new(n);
    let full = LabelMatching::attributes();
    let structure = LabelMatching::structure();
    let signs_only = LabelMatching {
        match_gates: false,
        match_interactions: true,
    };

    assert!(!graph(&activation).is_equivalent(&graph(&inhibition), &full));
    assert!(graph(&activation).is_equivalent(&graph(&inhibition), &structure));
    assert!(!graph(&and).is_equivalent(&graph(&or), &full));
    assert!(graph(&and).is_equivalent(&graph(&or), &signs_only));
    assert!(!graph(&activation).is_equivalent(&graph(&and), &structure));
}

#[test]
fn isolated_nodes_are_part_of_the_graph() {
    let small = mk_network(2, &[(0, 1, POS)], &[]);
    let large = mk_network(3, &[(0, 1, POS)], &[]);
    assert_eq!(NetworkGraph::new(&large).graph().node_count(), 3);
    assert!(!NetworkGraph::new(&small).is_equivalent(&NetworkGraph::new(&large), &LabelMatching::structure()));
}

#[test]
fn label_conversions() {
    let network = mk_network(2, &[(0, 1, NEG), (1, 1, POS)], &[(1, Gate::And)]);
    assert_eq!(NodeLabel::from(network.inputs(0)), NodeLabel::Ungated);
    assert_eq!(NodeLabel::from(network.inputs(1)), NodeLabel::Gated(Gate::And));
    assert_eq!(EdgeLabel::from(NEG), EdgeLabel(Interaction::Negative));
}

#[test]
fn single_edge_candidates_reduce_to_four_classes() {
    // Self-loops on either node are isomorphic, and so are both cross edges.
    let candidates = all_candidates(2, 1);
    assert_eq!(candidates.len(), 8);
    let representatives = reduce_representatives(candidates, attributes()).unwrap();
    assert_eq!(representatives.len(), 4);
}

/// Records every `(round, completed, dispatched)` notification.
#[derive(Default)]
struct ChunkLog(Mutex<Vec<(usize, usize, usize)>>);

impl ProgressReporter for ChunkLog {
    fn chunk_completed(&self, round: usize, completed: usize, dispatched: usize) {
        self.0.lock().unwrap().push((round, completed, dispatched));
    }
}

#[test]
fn chunked_reduction_matches_single_pass() {
    init_logger();
    let candidates = all_candidates(2, 2);
    let expected = reduce_representatives(candidates.clone(), attributes())
        .unwrap()
        .len();

    let temp_root = tempfile::tempdir().unwrap();
    let chunk_log = Arc::new(ChunkLog::default());
    let config = DedupConfig::new()
        .with_chunk_size(3)
        .with_workers(2)
        .with_temp_root(temp_root.path().to_path_buf())
        .with_progress(chunk_log.clone());
    let reduced = deduplicate(&config, candidates).unwrap();
    assert_eq!(reduced.len(), expected);
    // Representatives are pairwise distinct.
    assert_eq!(reduce_representatives(reduced, attributes()).unwrap().len(), expected);
    assert!(is_empty_dir(temp_root.path()));

    // Every collected chunk is reported once, and each round ends fully collected.
    let calls = chunk_log.0.lock().unwrap().clone();
    let mut rounds: BTreeMap<usize, Vec<(usize, usize)>> = BTreeMap::new();
    for (round, completed, dispatched) in calls {
        rounds.entry(round).or_default().push((completed, dispatched));
    }
    // 32 candidates in chunks of 3.
    assert_eq!(rounds[&1].len(), 11);
    for (round, calls) in &rounds {
        let completed: Vec<usize> = calls.iter().map(|it| it.0).collect();
        let expected: Vec<usize> = (1..=calls.len()).collect();
        assert_eq!(completed, expected, "Round {round}");
        assert_eq!(calls.last().unwrap(), &(calls.len(), calls.len()), "Round {round}");
    }
}

#[test]
fn chunked_reduction_merges_duplicates_across_chunks() {
    init_logger();
    // With a growth factor of one, only the forced single-chunk round can merge the
    // duplicates that always end up in different chunks.
    let network = mk_network(2, &[(0, 1, POS)], &[]);
    let networks = vec![network.clone(), permute(&network, &[1, 0]), network.clone()];
    let config = DedupConfig::new()
        .with_chunk_size(1)
        .with_growth_factor(1)
        .with_workers(3);
    let reduced = deduplicate(&config, networks).unwrap();
    assert_eq!(reduced.len(), 1);
}

#[test]
fn empty_input_and_invalid_config() {
    assert!(deduplicate(&DedupConfig::new(), Vec::new()).unwrap().is_empty());
    let config = DedupConfig::new().with_chunk_size(0);
    assert!(matches!(
        deduplicate(&config, Vec::new()),
        Err(SearchError::Configuration(ConfigurationError::NotPositive {
            parameter: "chunk_size",
            value: 0
        }))
    ));
    let config = DedupConfig::new().with_workers(0);
    assert!(config.validate().is_err());
}

#[test]
fn missing_chunk_results_are_detected() {
    let mut collector = RoundCollector::new(3, no_progress());
    for _ in 0..3 {
        collector.dispatch();
    }
    collector.accept(ChunkOutcome {
        chunk: 1,
        result: Ok(PathBuf::from("b")),
    });
    collector.accept(ChunkOutcome {
        chunk: 0,
        result: Ok(PathBuf::from("a")),
    });
    let SearchError::PartialResult {
        round,
        expected,
        collected,
    } = collector.finish().unwrap_err()
    else {
        panic!("Expected a partial result.");
    };
    assert_eq!((round, expected, collected), (3, 3, 2));

    let mut collector = RoundCollector::new(1, no_progress());
    collector.dispatch();
    collector.dispatch();
    collector.accept(ChunkOutcome {
        chunk: 1,
        result: Ok(PathBuf::from("b")),
    });
    collector.accept(ChunkOutcome {
        chunk: 0,
        result: Ok(PathBuf::from("a")),
    });
    assert_eq!(
        collector.finish().unwrap(),
        vec![PathBuf::from("a"), PathBuf::from("b")]
    );
}

struct PanickingEquivalence;

impl Equivalence for PanickingEquivalence {
    fn nodes_match(&self, _left: &NodeLabel, _right: &NodeLabel) -> bool {
        panic!("broken equivalence");
    }

    fn edges_match(&self, _left: &EdgeLabel, _right: &EdgeLabel) -> bool {
        panic!("broken equivalence");
    }
}

#[test]
fn crashed_worker_yields_partial_result_and_cleans_up() {
    init_logger();
    let network = mk_network(2, &[(0, 1, POS)], &[]);
    let temp_root = tempfile::tempdir().unwrap();
    let config = DedupConfig::new()
        .with_chunk_size(2)
        .with_workers(2)
        .with_equivalence(Arc::new(PanickingEquivalence))
        .with_temp_root(temp_root.path().to_path_buf());
    let result = deduplicate(&config, vec![network; 4]);
    assert!(matches!(
        result,
        Err(SearchError::PartialResult {
            round: 1,
            expected: 2,
            collected: 0
        })
    ));
    assert!(is_empty_dir(temp_root.path()));
}

#[test]
fn dynamics_groups_keep_all_members() {
    init_logger();
    let forward = mk_network(2, &[(0, 1, POS)], &[]);
    // Two steady states, each with a single predecessor.
    let inhibition = mk_network(2, &[(0, 1, NEG)], &[]);
    let backward = mk_network(2, &[(1, 0, POS)], &[]);
    // Two 2-cycles.
    let oscillator = mk_network(2, &[(0, 0, NEG)], &[]);
    let groups = group_by_dynamics(vec![
        forward.clone(),
        oscillator.clone(),
        inhibition.clone(),
        backward.clone(),
    ])
    .unwrap();
    assert_eq!(
        groups,
        vec![vec![forward, inhibition, backward], vec![oscillator]]
    );

    let identity = mk_network(1, &[(0, 0, POS)], &[]);
    let negation = mk_network(1, &[(0, 0, NEG)], &[]);
    assert_eq!(group_by_dynamics(vec![identity, negation]).unwrap().len(), 2);
}

#[test]
fn dynamics_groups_are_invariant_under_relabelling() {
    init_logger();
    let networks = all_candidates(2, 2);
    let swapped: Vec<Network> = networks.iter().map(|n| permute(n, &[1, 0])).collect();
    let mut all = networks.clone();
    all.extend(swapped.iter().cloned());

    let groups = group_by_dynamics(all.clone()).unwrap();
    let members: usize = groups.iter().map(|it| it.len()).sum();
    assert_eq!(members, all.len());
    // Classes are ordered by their first member in the input.
    let first: Vec<usize> = groups
        .iter()
        .map(|group| all.iter().position(|it| *it == group[0]).unwrap())
        .collect();
    assert!(first.windows(2).all(|w| w[0] < w[1]));
    // A network and its relabelled copy always share a class.
    for (network, copy) in networks.iter().zip(&swapped) {
        let class = groups.iter().find(|g| g.contains(network)).unwrap();
        assert!(class.contains(copy), "{network} vs. {copy}");
    }
}

fn arb_shuffled() -> impl Strategy<Value = (Vec<Network>, Vec<Network>)> {
    proptest::collection::vec(arb_network(3), 0..12)
        .prop_flat_map(|networks| (Just(networks.clone()), Just(networks).prop_shuffle()))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn reduction_is_order_invariant((networks, shuffled) in arb_shuffled()) {
        let a = reduce_representatives(networks, attributes()).unwrap();
        let b = reduce_representatives(shuffled, attributes()).unwrap();
        prop_assert_eq!(a.len(), b.len());
    }

    #[test]
    fn relabelled_copies_are_duplicates(networks in proptest::collection::vec(arb_network(3), 1..8)) {
        let expected = reduce_representatives(networks.clone(), attributes()).unwrap().len();
        let reversed: Vec<Network> = networks
            .iter()
            .map(|n| {
                let permutation: Vec<usize> = (0..n.node_count()).rev().collect();
                permute(n, &permutation)
            })
            .collect();
        let mut all = networks;
        all.extend(reversed);
        prop_assert_eq!(reduce_representatives(all, attributes()).unwrap().len(), expected);
    }

    #[test]
    fn chunked_is_order_invariant((networks, shuffled) in arb_shuffled()) {
        let config = DedupConfig::new().with_chunk_size(2).with_workers(2);
        let a = deduplicate(&config, networks).unwrap();
        let b = deduplicate(&config, shuffled).unwrap();
        prop_assert_eq!(a.len(), b.len());
    }
}
