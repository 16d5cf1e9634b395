//! Connected network session
//!
//! Holds the endpoints chosen for one network so callers pass an explicit
//! context around instead of reaching for process-wide client globals.

use crate::config::NetworkConfig;
use crate::error::Result;
use crate::optimizer::EndpointSelector;

/// Endpoints selected for one network
#[derive(Debug, Clone)]
pub struct Session {
    network: NetworkConfig,
    node_url: String,
    indexer_url: Option<String>,
}

impl Session {
    /// Race the network's candidates and build a session from the winners.
    ///
    /// Indexer selection is skipped when the network lists no indexers
    /// (e.g. a bare localnet).
    pub async fn connect(network: NetworkConfig, selector: &EndpointSelector) -> Result<Self> {
        let node_url = selector
            .select_best_node(&network.node_urls, &network.chain_id)
            .await?;

        let indexer_url = if network.has_indexers() {
            Some(selector.select_best_indexer(&network.indexer_urls).await?)
        } else {
            None
        };

        tracing::info!(
            "connected to {}: node {} indexer {}",
            network.name,
            node_url,
            indexer_url.as_deref().unwrap_or("(none)")
        );

        Ok(Self {
            network,
            node_url,
            indexer_url,
        })
    }

    /// Chain id of the connected network
    pub fn chain_id(&self) -> &str {
        &self.network.chain_id
    }

    /// Network name
    pub fn network_name(&self) -> &str {
        &self.network.name
    }

    /// Selected validator node endpoint
    pub fn node_url(&self) -> &str {
        &self.node_url
    }

    /// Selected indexer endpoint, if the network has one
    pub fn indexer_url(&self) -> Option<&str> {
        self.indexer_url.as_deref()
    }
}
