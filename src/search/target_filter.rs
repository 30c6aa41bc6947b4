use crate::dynamics::Attractors;
use crate::error::ConfigurationError;
use crate::model::State;
use std::collections::BTreeSet;

/// Decides whether the attractors of a network match a set of target states.
///
/// With `strict`, *all* targets must be present, otherwise *any* target suffices. Steady
/// states are tested first; if they do not satisfy the predicate, the states of limit cycles
/// are tested. The two collections are tested separately, so a strict filter accepts a network
/// only if all targets are steady states, or all targets lie on limit cycles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetFilter {
    node_count: usize,
    targets: BTreeSet<State>,
    /// Require all targets instead of any target (default: `true`).
    pub strict: bool,
    /// Do not test steady states (default: `false`).
    pub ignore_steady_states: bool,
    /// Do not test limit cycles (default: `false`).
    pub ignore_limit_cycles: bool,
}

impl TargetFilter {
    /// Parse target labels for a network with `node_count` nodes.
    ///
    /// Every label must have exactly `node_count` characters, each either `0` or `1`,
    /// and at least one label is required.
    pub fn parse<S: AsRef<str>>(
        node_count: usize,
        targets: &[S],
    ) -> Result<TargetFilter, ConfigurationError> {
        let targets = targets
            .iter()
            .map(|it| State::parse(node_count, it.as_ref()))
            .collect::<Result<BTreeSet<_>, _>>()?;
        TargetFilter::new(node_count, targets)
    }

    pub fn new(
        node_count: usize,
        targets: BTreeSet<State>,
    ) -> Result<TargetFilter, ConfigurationError> {
        if targets.is_empty() {
            return Err(ConfigurationError::NoTargets);
        }
        if let Some(wrong) = targets.iter().find(|it| it.node_count() != node_count) {
            return Err(ConfigurationError::TargetLength {
                target: wrong.to_string(),
                expected: node_count,
            });
        }
        Ok(TargetFilter {
            node_count,
            targets,
            strict: true,
            ignore_steady_states: false,
            ignore_limit_cycles: false,
        })
    }

    pub fn strict(mut self, strict: bool) -> TargetFilter {
        self.strict = strict;
        self
    }

    pub fn ignore_steady_states(mut self, ignore: bool) -> TargetFilter {
        self.ignore_steady_states = ignore;
        self
    }

    pub fn ignore_limit_cycles(mut self, ignore: bool) -> TargetFilter {
        self.ignore_limit_cycles = ignore;
        self
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn targets(&self) -> &BTreeSet<State> {
        &self.targets
    }

    fn matches(&self, found: &BTreeSet<State>) -> bool {
        if self.strict {
            self.targets.iter().all(|it| found.contains(it))
        } else {
            self.targets.iter().any(|it| found.contains(it))
        }
    }

    /// True if the given attractors satisfy this filter.
    pub fn accepts(&self, attractors: &Attractors) -> bool {
        if !self.ignore_steady_states && self.matches(attractors.steady_states()) {
            return true;
        }
        !self.ignore_limit_cycles && self.matches(&attractors.cycle_states())
    }
}
