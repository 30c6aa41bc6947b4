use crate::dynamics::StateSpace;
use crate::model::State;
use log::trace;
use std::collections::BTreeSet;

/// The attracting components of a [`StateSpace`], split into steady states (singleton
/// components) and limit cycles (components with two or more states).
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Attractors {
    steady_states: BTreeSet<State>,
    limit_cycles: Vec<Vec<State>>,
}

impl Attractors {
    /// Create attractors from already classified components.
    ///
    /// Cycles are normalized the same way as in [`classify_attractors`].
    pub fn new(steady_states: BTreeSet<State>, limit_cycles: Vec<Vec<State>>) -> Attractors {
        let mut limit_cycles: Vec<Vec<State>> = limit_cycles
            .into_iter()
            .filter(|it| !it.is_empty())
            .map(|mut cycle| {
                let start = (0..cycle.len()).min_by_key(|i| cycle[*i]).unwrap_or(0);
                cycle.rotate_left(start);
                cycle
            })
            .collect();
        limit_cycles.sort();
        Attractors {
            steady_states,
            limit_cycles,
        }
    }

    pub fn steady_states(&self) -> &BTreeSet<State> {
        &self.steady_states
    }

    /// Each cycle is listed in the order of its transitions, starting with its smallest
    /// state. Cycles are sorted by their first state.
    pub fn limit_cycles(&self) -> &[Vec<State>] {
        &self.limit_cycles
    }

    /// All states that belong to some limit cycle.
    pub fn cycle_states(&self) -> BTreeSet<State> {
        self.limit_cycles.iter().flatten().copied().collect()
    }

    /// Total number of attracting components.
    pub fn len(&self) -> usize {
        self.steady_states.len() + self.limit_cycles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Compute the attracting components of a state space.
///
/// The transition graph of a synchronous network is a function, so every trajectory ends in
/// exactly one cycle and the attracting components are exactly these cycles. We pick an
/// unexplored pivot state, follow its trajectory until it hits an explored state, and if the
/// hit belongs to the current trajectory, the states from the hit onward form a new attractor.
/// Every state is visited at most once.
pub fn classify_attractors(space: &StateSpace) -> Attractors {
    // 0 = unexplored, otherwise `pivot + 1` of the trajectory that explored the state.
    let mut explored_by = vec![0usize; space.len()];
    let mut result = Attractors::default();

    for pivot in 0..space.len() {
        if explored_by[pivot] != 0 {
            continue;
        }

        let walk = pivot + 1;
        let mut current = pivot;
        while explored_by[current] == 0 {
            explored_by[current] = walk;
            current = space.successor_index(current);
        }

        if explored_by[current] != walk {
            // Trajectory joined the basin of a known attractor.
            continue;
        }

        let mut cycle = vec![current];
        let mut next = space.successor_index(current);
        while next != current {
            cycle.push(next);
            next = space.successor_index(next);
        }

        let n = space.node_count();
        if cycle.len() == 1 {
            let state = State::new(current as u32, n);
            trace!("Found steady state {state}.");
            result.steady_states.insert(state);
        } else {
            let start = (0..cycle.len()).min_by_key(|i| cycle[*i]).unwrap_or(0);
            cycle.rotate_left(start);
            let cycle: Vec<State> = cycle.into_iter().map(|it| State::new(it as u32, n)).collect();
            trace!("Found limit cycle of {} states.", cycle.len());
            result.limit_cycles.push(cycle);
        }
    }

    result.limit_cycles.sort();
    result
}
