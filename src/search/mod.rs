//! Search for networks whose attractors contain a set of target states.
//!
//! [`NetworkSearch`] consumes the candidates of [`crate::enumeration::NetworkCandidates`],
//! simulates each of them and yields those accepted by the configured [`TargetFilter`].

mod network_search;
mod search_config;
mod target_filter;


use crate::error::{ConfigurationError, SearchError};
use crate::model::Network;
use computation_process::{Generator, Stateful};
pub use network_search::{SearchState, SearchStep};
pub use search_config::SearchConfig;
pub use target_filter::TargetFilter;

/// Lazily yield candidate networks accepted by a [`TargetFilter`].
pub type NetworkSearch = Generator<SearchConfig, SearchState, Network, SearchStep>;

/// Validate the configuration and create a [`NetworkSearch`].
pub fn search_networks(config: &SearchConfig) -> Result<NetworkSearch, ConfigurationError> {
    config.validate()?;
    Ok(NetworkSearch::configure(config.clone(), config))
}

/// Run the whole search and collect all accepted networks.
pub fn find_networks(config: &SearchConfig) -> Result<Vec<Network>, SearchError> {
    let mut result = Vec::new();
    for network in search_networks(config)? {
        result.push(network?);
    }
    Ok(result)
}
