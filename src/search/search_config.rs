use crate::enumeration::EnumerationConfig;
use crate::error::ConfigurationError;
use crate::progress::{SharedProgress, no_progress};
use crate::search::TargetFilter;

/// Parameters of a [`crate::search::NetworkSearch`].
///
/// Without a `filter`, every enumerated candidate is accepted and no simulation happens.
#[derive(Clone)]
pub struct SearchConfig {
    pub enumeration: EnumerationConfig,
    pub filter: Option<TargetFilter>,
    pub progress: SharedProgress,
}

impl SearchConfig {
    pub fn new(enumeration: EnumerationConfig) -> SearchConfig {
        SearchConfig {
            enumeration,
            filter: None,
            progress: no_progress(),
        }
    }

    pub fn with_filter(mut self, filter: TargetFilter) -> SearchConfig {
        self.filter = Some(filter);
        self
    }

    pub fn with_progress(mut self, progress: SharedProgress) -> SearchConfig {
        self.progress = progress;
        self
    }

    /// Check the enumeration parameters, and that the targets fit the network size.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.enumeration.validate()?;
        if let Some(filter) = &self.filter {
            if filter.node_count() != self.enumeration.node_count {
                let target = filter
                    .targets()
                    .first()
                    .map(|it| it.to_string())
                    .unwrap_or_default();
                return Err(ConfigurationError::TargetLength {
                    target,
                    expected: self.enumeration.node_count,
                });
            }
        }
        Ok(())
    }
}

impl From<EnumerationConfig> for SearchConfig {
    fn from(value: EnumerationConfig) -> Self {
        SearchConfig::new(value)
    }
}
