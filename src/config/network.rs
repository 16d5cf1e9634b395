//! Network configuration
//!
//! A network names the chain identity a genuine validator node must report,
//! plus the candidate node and indexer endpoints to race.

use serde::{Deserialize, Serialize};

/// Configuration for a single named network
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Network name (e.g. "mainnet")
    pub name: String,
    /// Chain id a genuine node must report (e.g. "dydx-mainnet-1")
    pub chain_id: String,
    /// Candidate validator node RPC endpoints
    #[serde(default)]
    pub node_urls: Vec<String>,
    /// Candidate indexer REST endpoints
    #[serde(default)]
    pub indexer_urls: Vec<String>,
}

impl NetworkConfig {
    /// Create a new network config with no endpoints
    pub fn new(name: impl Into<String>, chain_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            chain_id: chain_id.into(),
            node_urls: Vec::new(),
            indexer_urls: Vec::new(),
        }
    }

    /// Builder-style setter adding a node endpoint
    pub fn with_node(mut self, url: impl Into<String>) -> Self {
        self.node_urls.push(url.into());
        self
    }

    /// Builder-style setter adding an indexer endpoint
    pub fn with_indexer(mut self, url: impl Into<String>) -> Self {
        self.indexer_urls.push(url.into());
        self
    }

    /// Check whether this network has any indexer endpoints configured
    pub fn has_indexers(&self) -> bool {
        !self.indexer_urls.is_empty()
    }
}
