use crate::dynamics::{StateSpace, classify_attractors};
use crate::enumeration::NetworkCandidates;
use crate::model::Network;
use crate::search::SearchConfig;
use computation_process::Incomplete::Suspended;
use computation_process::{Completable, GeneratorStep, Stateful};
use log::{debug, info, trace};

/// Internal state of a [`crate::search::NetworkSearch`].
pub struct SearchState {
    candidates: NetworkCandidates,
    scanned: usize,
    accepted: usize,
}

/// Step implementation of a [`crate::search::NetworkSearch`]: one step examines one candidate.
pub struct SearchStep;

impl From<&SearchConfig> for SearchState {
    fn from(value: &SearchConfig) -> Self {
        SearchState {
            candidates: NetworkCandidates::configure(value.enumeration.clone(), &value.enumeration),
            scanned: 0,
            accepted: 0,
        }
    }
}

impl GeneratorStep<SearchConfig, SearchState, Network> for SearchStep {
    fn step(context: &SearchConfig, state: &mut SearchState) -> Completable<Option<Network>> {
        let network = match state.candidates.next() {
            None => {
                info!(
                    "Search finished: accepted {} out of {} candidates.",
                    state.accepted, state.scanned
                );
                return Ok(None);
            }
            Some(Err(cancelled)) => return Err(cancelled.into()),
            Some(Ok(network)) => network,
        };

        state.scanned += 1;
        context.progress.candidates_scanned(state.scanned);

        let Some(filter) = context.filter.as_ref() else {
            state.accepted += 1;
            return Ok(Some(network));
        };

        // Enumerated candidates are valid by construction.
        let space = StateSpace::build(&network)
            .expect("Correctness violation: Enumerated network cannot be simulated");
        let attractors = classify_attractors(&space);
        if filter.accepts(&attractors) {
            state.accepted += 1;
            debug!(
                "Accepted candidate #{} with {} attractor(s): {network}",
                state.scanned,
                attractors.len()
            );
            Ok(Some(network))
        } else {
            trace!("Rejected candidate #{}: {network}", state.scanned);
            Err(Suspended)
        }
    }
}
