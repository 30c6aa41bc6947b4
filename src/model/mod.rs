//! Data model of candidate regulatory networks.
//!
//! - [`Interaction`] and [`Gate`] are the closed alphabets of edge signs and node gates,
//!   together with their Boolean semantics.
//! - [`Topology`] and [`SignedTopology`] are the partially specified intermediate values
//!   of the enumeration pipeline.
//! - [`Network`] is a fully specified network (topology, signs, and gates).
//! - [`State`] is one Boolean state of a network.

mod gate_logic;
mod network;
mod state;
mod topology;

pub use gate_logic::{Gate, Interaction, validate_alphabet};
pub use network::{Edge, Network, NodeInputs, Regulator};
pub use state::{MAX_NODES, State, compress_state};
pub use topology::{SignedTopology, Topology};
