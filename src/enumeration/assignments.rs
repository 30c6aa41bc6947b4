use crate::model::{Gate, Interaction, Network, SignedTopology, Topology};

/// Iterates over every assignment of interactions to the edges of a [`Topology`].
///
/// Each edge independently takes one value from the alphabet, so there are
/// `alphabet.len() ^ edge_count` signed topologies. The last edge changes fastest.
pub struct InteractionAssignments {
    topology: Topology,
    alphabet: Vec<Interaction>,
    digits: Option<Vec<usize>>,
}

/// Iterates over every assignment of gates to the nodes of a [`SignedTopology`] that have
/// more than one input.
///
/// Nodes with zero or one input have no gate, so a topology without multi-input nodes
/// yields exactly one network.
pub struct GateAssignments {
    topology: SignedTopology,
    alphabet: Vec<Gate>,
    digits: Option<Vec<usize>>,
}

impl InteractionAssignments {
    pub fn new(topology: Topology, alphabet: &[Interaction]) -> InteractionAssignments {
        let digits = (!alphabet.is_empty()).then(|| vec![0; topology.edge_count()]);
        InteractionAssignments {
            topology,
            alphabet: alphabet.to_vec(),
            digits,
        }
    }
}

impl GateAssignments {
    pub fn new(topology: SignedTopology, alphabet: &[Gate]) -> GateAssignments {
        let multi_input = topology.in_degrees().iter().filter(|d| **d > 1).count();
        let digits = (multi_input == 0 || !alphabet.is_empty()).then(|| vec![0; multi_input]);
        GateAssignments {
            topology,
            alphabet: alphabet.to_vec(),
            digits,
        }
    }
}

impl Iterator for InteractionAssignments {
    type Item = SignedTopology;

    fn next(&mut self) -> Option<Self::Item> {
        let digits = self.digits.as_mut()?;
        let signs: Vec<Interaction> = digits.iter().map(|d| self.alphabet[*d]).collect();
        if !increment(digits, self.alphabet.len()) {
            self.digits = None;
        }
        Some(self.topology.sign(&signs))
    }
}

impl Iterator for GateAssignments {
    type Item = Network;

    fn next(&mut self) -> Option<Self::Item> {
        let digits = self.digits.as_mut()?;
        let gates: Vec<Gate> = digits.iter().map(|d| self.alphabet[*d]).collect();
        if !increment(digits, self.alphabet.len()) {
            self.digits = None;
        }
        Some(Network::from_signed(&self.topology, &gates))
    }
}

/// Advance a mixed-radix counter (last digit fastest). Returns `false` on overflow,
/// i.e. when `digits` was the last value.
fn increment(digits: &mut [usize], base: usize) -> bool {
    for digit in digits.iter_mut().rev() {
        *digit += 1;
        if *digit < base {
            return true;
        }
        *digit = 0;
    }
    false
}
