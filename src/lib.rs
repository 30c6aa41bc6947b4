//! Search for small Boolean regulatory networks whose synchronous dynamics settle in
//! prescribed target states.
//!
//! The pipeline consists of:
//!
//! - [`enumeration`]: lazy generation of candidate networks (topologies, edge signs, gates);
//! - [`dynamics`]: explicit synchronous state spaces and their attractors;
//! - [`search`]: filtering of candidates against target states;
//! - [`isomorphism`]: deduplication of the results up to node relabelling;
//! - [`io`]: JSON-lines persistence of network lists.

#[cfg(test)]
mod test_utils;

pub mod dynamics;
pub mod enumeration;
pub mod error;
pub mod io;
pub mod isomorphism;
pub mod model;
pub mod progress;
pub mod search;
