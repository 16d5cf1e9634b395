//! Built-in networks with public endpoints
//!
//! Candidate lists are intentionally ordered: earlier entries win latency
//! ties, so the historically most reliable endpoints come first.

use crate::config::NetworkConfig;

/// Built-in networks
pub fn default_networks() -> Vec<NetworkConfig> {
    vec![mainnet(), testnet()]
}

/// Look up a built-in network by name
pub fn find_network(name: &str) -> Option<NetworkConfig> {
    default_networks().into_iter().find(|n| n.name == name)
}

/// dYdX mainnet (chain id dydx-mainnet-1)
fn mainnet() -> NetworkConfig {
    NetworkConfig::new("mainnet", "dydx-mainnet-1")
        .with_node("https://dydx-rpc.polkachu.com")
        .with_node("https://dydx-rpc.lavenderfive.com")
        .with_node("https://dydx-rpc.publicnode.com")
        .with_node("https://rpc-dydx.ecostake.com")
        .with_indexer("https://indexer.dydx.trade")
}

/// dYdX public testnet (chain id dydx-testnet-4)
fn testnet() -> NetworkConfig {
    NetworkConfig::new("testnet", "dydx-testnet-4")
        .with_node("https://dydx-testnet-rpc.polkachu.com")
        .with_node("https://test-dydx-rpc.kingnodes.com")
        .with_indexer("https://indexer.v4testnet.dydx.trade")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_networks_have_nodes() {
        for network in default_networks() {
            assert!(!network.node_urls.is_empty(), "{} has no nodes", network.name);
            assert!(!network.chain_id.is_empty());
        }
    }

    #[test]
    fn test_find_network() {
        let mainnet = find_network("mainnet").unwrap();
        assert_eq!(mainnet.chain_id, "dydx-mainnet-1");
        assert!(mainnet.has_indexers());

        assert!(find_network("devnet-99").is_none());
    }
}
