//! Validator node status probe
//!
//! Issues the Tendermint `/status` RPC against one candidate node, measures
//! wall-clock latency and extracts the chain id the node reports. The client
//! is owned by this probe alone and dropped when it returns.

use crate::error::ProbeError;
use serde_json::Value;
use std::time::{Duration, Instant};

/// Outcome of probing one validator node
#[derive(Debug, Clone)]
pub struct NodeStatus {
    /// Chain id the node reported (`node_info.network`)
    pub chain_id: String,
    /// Round-trip time from request start to parsed response
    pub latency: Duration,
}

/// Probe a validator node's status endpoint
pub async fn probe_node(url: &str, timeout: Duration) -> Result<NodeStatus, ProbeError> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ProbeError::ClientInit(e.to_string()))?;

    let status_url = format!("{}/status", url.trim_end_matches('/'));

    let start = Instant::now();
    let response = client.get(&status_url).send().await?.error_for_status()?;
    let json: Value = response.json().await?;
    let latency = start.elapsed();

    let chain_id = parse_network_id(&json)
        .ok_or_else(|| ProbeError::InvalidResponse("missing node_info.network".to_string()))?;

    tracing::trace!("{} reported chain id {} in {:?}", url, chain_id, latency);

    Ok(NodeStatus { chain_id, latency })
}

/// Extract the reported chain id from a `/status` response.
///
/// Tendermint wraps JSON-RPC results in `{"result": ...}`; some gateways
/// return the result object bare.
fn parse_network_id(json: &Value) -> Option<String> {
    let result = json.get("result").unwrap_or(json);
    result
        .get("node_info")?
        .get("network")?
        .as_str()
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_wrapped_status() {
        let status = json!({
            "jsonrpc": "2.0",
            "id": -1,
            "result": {
                "node_info": {
                    "network": "dydx-mainnet-1",
                    "moniker": "node-1"
                },
                "sync_info": { "latest_block_height": "31337" }
            }
        });

        assert_eq!(
            parse_network_id(&status).as_deref(),
            Some("dydx-mainnet-1")
        );
    }

    #[test]
    fn test_parse_bare_status() {
        let status = json!({
            "node_info": { "network": "dydx-testnet-4" }
        });

        assert_eq!(parse_network_id(&status).as_deref(), Some("dydx-testnet-4"));
    }

    #[test]
    fn test_parse_missing_network() {
        let status = json!({ "result": { "sync_info": {} } });
        assert!(parse_network_id(&status).is_none());

        assert!(parse_network_id(&json!("not an object")).is_none());
    }
}
