use crate::error::ConfigurationError;
use std::fmt::{Display, Formatter};

/// The largest supported number of network nodes. A state of such a network still fits into
/// a `u32` and a full state space is a few megabytes.
pub const MAX_NODES: usize = 20;

/// A Boolean state of a network with `node_count` nodes.
///
/// The state is stored as a binary number where the most significant bit is the value of
/// node `0`. This is also the order of characters in the textual form (`"100"` means node `0`
/// is active and nodes `1` and `2` are inactive), so states of the same width are ordered
/// the same way as their string labels.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct State {
    node_count: u8,
    bits: u32,
}

impl State {
    /// Create a state from its binary encoding.
    ///
    /// # Panics
    ///
    /// The `node_count` must be in `1..=MAX_NODES` and `bits` must fit into `node_count` bits.
    pub fn new(bits: u32, node_count: usize) -> State {
        assert!(
            node_count > 0 && node_count <= MAX_NODES,
            "Invalid node count {node_count}"
        );
        assert!(
            bits < (1u32 << node_count),
            "State {bits} out of range for {node_count} nodes"
        );
        State {
            node_count: node_count as u8,
            bits,
        }
    }

    /// Build a state from per-node values (in node index order).
    pub fn from_values(values: &[bool]) -> State {
        let bits = values
            .iter()
            .fold(0u32, |acc, value| (acc << 1) | u32::from(*value));
        State::new(bits, values.len())
    }

    /// Parse a state label consisting of exactly `node_count` characters `0`/`1`.
    pub fn parse(node_count: usize, label: &str) -> Result<State, ConfigurationError> {
        let label = label.trim();
        if label.chars().count() != node_count {
            return Err(ConfigurationError::TargetLength {
                target: label.to_string(),
                expected: node_count,
            });
        }
        if node_count == 0 {
            return Err(ConfigurationError::NoNodes(node_count));
        }
        if node_count > MAX_NODES {
            return Err(ConfigurationError::TooManyNodes {
                count: node_count,
                max: MAX_NODES,
            });
        }
        let mut bits = 0u32;
        for c in label.chars() {
            let bit = match c {
                '0' => 0,
                '1' => 1,
                _ => return Err(ConfigurationError::TargetAlphabet(label.to_string())),
            };
            bits = (bits << 1) | bit;
        }
        Ok(State::new(bits, node_count))
    }

    /// Iterate over all `2^node_count` states.
    pub fn all(node_count: usize) -> impl Iterator<Item = State> {
        assert!(node_count > 0 && node_count <= MAX_NODES);
        (0..(1u32 << node_count)).map(move |bits| State::new(bits, node_count))
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// The position of this state in the full state space (same as [`State::bits`]).
    pub fn index(&self) -> usize {
        self.bits as usize
    }

    pub fn node_count(&self) -> usize {
        usize::from(self.node_count)
    }

    /// Value of the given node in this state.
    pub fn get(&self, node: usize) -> bool {
        debug_assert!(node < self.node_count());
        let shift = self.node_count() - 1 - node;
        (self.bits >> shift) & 1 == 1
    }

    pub fn values(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.node_count()).map(|node| self.get(node))
    }
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for value in self.values() {
            write!(f, "{}", if value { '1' } else { '0' })?;
        }
        Ok(())
    }
}

/// Run-length label of a state, using `T`/`F` for active/inactive nodes.
///
/// For example, `"11111"` becomes `"5T"` and `"10100"` becomes `"TFT2F"`. Such labels are
/// short enough to be used in output file names.
pub fn compress_state(label: &str) -> String {
    let mut runs: Vec<(char, usize)> = Vec::new();
    for c in label.trim().chars() {
        match runs.last_mut() {
            Some((last, count)) if *last == c => *count += 1,
            _ => runs.push((c, 1)),
        }
    }

    let mut result = String::new();
    for (c, count) in runs {
        let letter = if c == '1' { 'T' } else { 'F' };
        if count > 1 {
            result.push_str(&count.to_string());
        }
        result.push(letter);
    }
    result
}
