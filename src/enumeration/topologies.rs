use crate::enumeration::EnumerationConfig;
use crate::model::Topology;
use cancel_this::is_cancelled;
use computation_process::Incomplete::Suspended;
use computation_process::{Completable, GeneratorStep};
use log::{debug, trace};

/// Internal state of the topology enumeration.
///
/// The state is the next combination of pair indices (strictly increasing), where pair `k`
/// stands for the edge `(k / node_count, k % node_count)`.
pub struct TopologyState {
    next: Option<Vec<usize>>,
    generated: usize,
}

/// Step implementation of the topology enumeration.
pub struct TopologyStep;

impl From<&EnumerationConfig> for TopologyState {
    fn from(value: &EnumerationConfig) -> Self {
        let next = if value.edge_count <= value.pair_count() {
            Some((0..value.edge_count).collect())
        } else {
            debug!(
                "No topologies: {} edges do not fit into {} node pairs.",
                value.edge_count,
                value.pair_count()
            );
            None
        };
        TopologyState { next, generated: 0 }
    }
}

impl GeneratorStep<EnumerationConfig, TopologyState, Topology> for TopologyStep {
    fn step(context: &EnumerationConfig, state: &mut TopologyState) -> Completable<Option<Topology>> {
        is_cancelled!()?;

        let Some(combination) = state.next.take() else {
            return Ok(None);
        };

        state.next = next_combination(&combination, context.pair_count());
        state.generated += 1;

        let n = context.node_count;
        let topology = Topology::new(n, combination.iter().map(|k| (k / n, k % n)).collect());

        if context.only_connected && !topology.is_connected() {
            trace!(
                "[topology:{}] Skipping disconnected {:?}.",
                state.generated,
                topology.pairs()
            );
            return Err(Suspended);
        }

        Ok(Some(topology))
    }
}

/// The lexicographic successor of a `k`-combination of `0..n`, or `None` if `current`
/// is the last one.
fn next_combination(current: &[usize], n: usize) -> Option<Vec<usize>> {
    let k = current.len();
    let mut next = current.to_vec();
    let mut i = k;
    while i > 0 {
        i -= 1;
        if next[i] < n - k + i {
            next[i] += 1;
            for j in (i + 1)..k {
                next[j] = next[j - 1] + 1;
            }
            return Some(next);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::next_combination;

    #[test]
    fn combinations_are_lexicographic() {
        let mut all = vec![vec![0, 1]];
        while let Some(next) = next_combination(all.last().unwrap(), 4) {
            all.push(next);
        }
        assert_eq!(
            all,
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3],
            ]
        );
    }

    #[test]
    fn empty_combination_has_no_successor() {
        assert_eq!(next_combination(&[], 4), None);
    }
}
