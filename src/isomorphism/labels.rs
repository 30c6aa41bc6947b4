use crate::model::{Gate, Interaction, NodeInputs};

/// Node attribute of a network graph: the gate of the node, if it has one.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum NodeLabel {
    /// A node with at most one regulator.
    Ungated,
    Gated(Gate),
}

/// Edge attribute of a network graph: the sign of the regulation.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct EdgeLabel(pub Interaction);

impl From<&NodeInputs> for NodeLabel {
    fn from(value: &NodeInputs) -> Self {
        match value.gate() {
            Some(gate) => NodeLabel::Gated(gate),
            None => NodeLabel::Ungated,
        }
    }
}

impl From<Interaction> for EdgeLabel {
    fn from(value: Interaction) -> Self {
        EdgeLabel(value)
    }
}

/// Decides which node and edge attributes must agree for two networks to be considered
/// the same. The graph structure itself must always match.
pub trait Equivalence: Send + Sync {
    fn nodes_match(&self, left: &NodeLabel, right: &NodeLabel) -> bool;
    fn edges_match(&self, left: &EdgeLabel, right: &EdgeLabel) -> bool;
}

/// An [`Equivalence`] that compares labels exactly, or ignores them entirely.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct LabelMatching {
    pub match_gates: bool,
    pub match_interactions: bool,
}

impl LabelMatching {
    /// Gates and interactions must match.
    pub fn attributes() -> LabelMatching {
        LabelMatching {
            match_gates: true,
            match_interactions: true,
        }
    }

    /// Only the unlabelled graph structure must match.
    pub fn structure() -> LabelMatching {
        LabelMatching {
            match_gates: false,
            match_interactions: false,
        }
    }
}

impl Default for LabelMatching {
    fn default() -> Self {
        LabelMatching::attributes()
    }
}

impl Equivalence for LabelMatching {
    fn nodes_match(&self, left: &NodeLabel, right: &NodeLabel) -> bool {
        !self.match_gates || left == right
    }

    fn edges_match(&self, left: &EdgeLabel, right: &EdgeLabel) -> bool {
        !self.match_interactions || left == right
    }
}
