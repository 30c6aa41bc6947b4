use crate::enumeration::{
    EnumerationConfig, GateAssignments, InteractionAssignments, TopologyEnumerator,
};
use crate::model::Network;
use computation_process::Incomplete::Suspended;
use computation_process::{Completable, GeneratorStep, Stateful};
use log::trace;

/// Internal state of the candidate network enumeration.
///
/// The three enumeration layers (topologies, signs, gates) are advanced lazily, so at any
/// point only a single topology and a single signed topology are materialized.
pub struct CandidateState {
    topologies: TopologyEnumerator,
    signings: Option<InteractionAssignments>,
    gatings: Option<GateAssignments>,
}

/// Step implementation of the candidate network enumeration.
pub struct CandidateStep;

impl From<&EnumerationConfig> for CandidateState {
    fn from(value: &EnumerationConfig) -> Self {
        CandidateState {
            topologies: TopologyEnumerator::configure(value.clone(), value),
            signings: None,
            gatings: None,
        }
    }
}

impl GeneratorStep<EnumerationConfig, CandidateState, Network> for CandidateStep {
    fn step(context: &EnumerationConfig, state: &mut CandidateState) -> Completable<Option<Network>> {
        if let Some(gatings) = state.gatings.as_mut() {
            if let Some(network) = gatings.next() {
                return Ok(Some(network));
            }
            state.gatings = None;
        }

        if let Some(signings) = state.signings.as_mut() {
            if let Some(signed) = signings.next() {
                state.gatings = Some(GateAssignments::new(signed, &context.gates));
                return Err(Suspended);
            }
            state.signings = None;
        }

        match state.topologies.next() {
            None => Ok(None),
            Some(Err(cancelled)) => Err(cancelled.into()),
            Some(Ok(topology)) => {
                trace!("Expanding topology {:?}.", topology.pairs());
                state.signings = Some(InteractionAssignments::new(
                    topology,
                    &context.interactions,
                ));
                Err(Suspended)
            }
        }
    }
}
