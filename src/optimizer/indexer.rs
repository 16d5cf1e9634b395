//! Indexer health probe
//!
//! A lightweight reachability check against the indexer's height endpoint.
//! There is no identity to verify; any 2xx response marks the candidate
//! reachable.

use crate::error::ProbeError;
use std::time::{Duration, Instant};

/// Indexer health endpoint, relative to the indexer base URL
const HEALTH_PATH: &str = "/v4/height";

/// Probe an indexer's health endpoint, returning the round-trip latency
pub async fn probe_indexer(url: &str, timeout: Duration) -> Result<Duration, ProbeError> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ProbeError::ClientInit(e.to_string()))?;

    let health_url = format!("{}{}", url.trim_end_matches('/'), HEALTH_PATH);

    let start = Instant::now();
    let response = client.get(&health_url).send().await?;
    response.error_for_status()?;
    let latency = start.elapsed();

    tracing::trace!("{} responded in {:?}", url, latency);

    Ok(latency)
}
