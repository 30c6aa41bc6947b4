//! Explicit synchronous dynamics of small Boolean networks.
//!
//! [`StateSpace::build`] simulates one synchronous step from every state of a network and
//! [`classify_attractors`] extracts the attracting components of the resulting transition
//! function. Since networks are small (at most [`crate::model::MAX_NODES`] nodes), the whole
//! state space is kept in memory as a successor table.

mod attractors;
mod state_space;


pub use attractors::{Attractors, classify_attractors};
pub use state_space::{StateSpace, next_state};
