use crate::error::InvariantViolation;
use crate::model::{Network, State};
use std::collections::BTreeMap;

/// The synchronous state transition function of a [`Network`].
///
/// Maps each of the `2^N` states to its unique successor. Built once per network and
/// immutable afterward.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct StateSpace {
    node_count: usize,
    successors: Vec<u32>,
}

/// Compute the synchronous successor of `state` in `network`.
///
/// A node without inputs keeps its value. Otherwise, each input value is transformed by its
/// interaction and the results are combined using the node's gate. A node with a single
/// input has no gate and simply takes the transformed value.
///
/// A multi-input node without a gate is reported as an [`InvariantViolation`]; it is never
/// silently treated as an `OR` node.
pub fn next_state(network: &Network, state: State) -> Result<State, InvariantViolation> {
    debug_assert_eq!(network.node_count(), state.node_count());
    let mut bits = 0u32;
    for (node, inputs) in network.nodes() {
        let values = inputs
            .regulators()
            .iter()
            .map(|r| r.interaction.apply(state.get(r.source)));
        let value = match (inputs.regulators(), inputs.gate()) {
            ([], _) => state.get(node),
            ([single], _) => single.interaction.apply(state.get(single.source)),
            (_, Some(gate)) => gate.evaluate(values),
            (many, None) => {
                return Err(InvariantViolation::MissingGate {
                    node,
                    inputs: many.len(),
                });
            }
        };
        bits = (bits << 1) | u32::from(value);
    }
    Ok(State::new(bits, network.node_count()))
}

impl StateSpace {
    /// Simulate one synchronous step from every state of the network.
    pub fn build(network: &Network) -> Result<StateSpace, InvariantViolation> {
        let successors = State::all(network.node_count())
            .map(|state| next_state(network, state).map(|it| it.bits()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(StateSpace {
            node_count: network.node_count(),
            successors,
        })
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of states (always `2^node_count`).
    pub fn len(&self) -> usize {
        self.successors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.successors.is_empty()
    }

    pub fn successor(&self, state: State) -> State {
        State::new(self.successors[state.index()], self.node_count)
    }

    /// All `(state, successor)` pairs, e.g. for rendering the state transition graph.
    pub fn transitions(&self) -> impl Iterator<Item = (State, State)> + '_ {
        State::all(self.node_count).map(|state| (state, self.successor(state)))
    }

    /// The transition function as a map between state labels.
    pub fn to_labels(&self) -> BTreeMap<String, String> {
        self.transitions()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect()
    }

    pub(crate) fn successor_index(&self, index: usize) -> usize {
        self.successors[index] as usize
    }
}
