//! Endpoint selection by concurrent probe race
//!
//! Races one probe per candidate URL, waits for every probe to settle, then
//! picks the fastest candidate that passed validation. Waiting for all probes
//! (rather than returning on first success) is required for correctness: a
//! candidate's validity is only known once its full response arrives, and a
//! faster valid node may still be in flight when the first response lands.

use crate::config::SelectorConfig;
use crate::error::{ProbeError, SelectError};
use crate::optimizer::{probe_indexer, probe_node};
use futures::future::join_all;
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;

/// Selects the best-performing valid endpoint from a candidate list.
///
/// Stateless: each selection call builds and discards its own probe clients,
/// so concurrent selections share nothing.
#[derive(Debug, Clone, Default)]
pub struct EndpointSelector {
    config: SelectorConfig,
}

impl EndpointSelector {
    /// Create a selector with the given settings
    pub fn new(config: SelectorConfig) -> Self {
        Self { config }
    }

    /// Create a selector with an explicit per-probe timeout
    pub fn with_timeout(probe_timeout: Duration) -> Self {
        Self::new(SelectorConfig::with_timeout(probe_timeout))
    }

    /// Per-probe timeout currently in effect
    pub fn probe_timeout(&self) -> Duration {
        self.config.probe_timeout()
    }

    /// Select the fastest validator node that reports `expected_chain_id`.
    ///
    /// Every candidate is probed concurrently; candidates that error, time
    /// out, or report a different chain id are discarded regardless of their
    /// latency. Ties on latency resolve to the earlier candidate in input
    /// order.
    pub async fn select_best_node(
        &self,
        urls: &[String],
        expected_chain_id: &str,
    ) -> Result<String, SelectError> {
        if expected_chain_id.trim().is_empty() {
            return Err(SelectError::EmptyChainId);
        }
        validate_candidates(urls)?;

        let probe_timeout = self.config.probe_timeout();
        let expected = expected_chain_id.to_string();

        race_candidates(urls, probe_timeout, |url| {
            let expected = expected.clone();
            async move {
                let status = probe_node(&url, probe_timeout).await?;
                if status.chain_id != expected {
                    return Err(ProbeError::ChainIdMismatch {
                        expected,
                        reported: status.chain_id,
                    });
                }
                Ok(status.latency)
            }
        })
        .await
    }

    /// Select the fastest reachable indexer.
    ///
    /// Identical race semantics to [`select_best_node`](Self::select_best_node);
    /// validity is solely "responded without transport or protocol error".
    pub async fn select_best_indexer(&self, urls: &[String]) -> Result<String, SelectError> {
        validate_candidates(urls)?;

        let probe_timeout = self.config.probe_timeout();

        race_candidates(urls, probe_timeout, |url| async move {
            probe_indexer(&url, probe_timeout).await
        })
        .await
    }
}

/// Reject empty or syntactically invalid candidate lists before any I/O
fn validate_candidates(urls: &[String]) -> Result<(), SelectError> {
    if urls.is_empty() {
        return Err(SelectError::NoCandidates);
    }

    for url in urls {
        let parsed =
            reqwest::Url::parse(url).map_err(|_| SelectError::InvalidUrl(url.clone()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SelectError::InvalidUrl(url.clone()));
        }
    }

    Ok(())
}

/// Launch one probe per candidate, wait for all to settle, pick the fastest
/// valid one.
///
/// The probe returns the measured latency on success; any error marks that
/// candidate invalid without affecting the others. Each probe future is
/// bounded by `probe_timeout` so a hung candidate cannot stall the race.
async fn race_candidates<P, Fut>(
    urls: &[String],
    probe_timeout: Duration,
    probe: P,
) -> Result<String, SelectError>
where
    P: Fn(String) -> Fut,
    Fut: Future<Output = Result<Duration, ProbeError>>,
{
    if urls.is_empty() {
        return Err(SelectError::NoCandidates);
    }

    let probes = urls.iter().map(|url| {
        let fut = probe(url.clone());
        async move {
            match timeout(probe_timeout, fut).await {
                Ok(outcome) => outcome,
                Err(_) => Err(ProbeError::Timeout(probe_timeout.as_millis() as u64)),
            }
        }
    });

    let results = join_all(probes).await;

    // Strictly-less comparison keeps the earlier candidate on equal latency
    let mut best: Option<(usize, Duration)> = None;
    for (idx, result) in results.iter().enumerate() {
        match result {
            Ok(latency) => {
                tracing::debug!("{} responded in {:?}", urls[idx], latency);
                if best.map_or(true, |(_, fastest)| *latency < fastest) {
                    best = Some((idx, *latency));
                }
            }
            Err(e) => {
                tracing::debug!("{} ruled out: {}", urls[idx], e);
            }
        }
    }

    match best {
        Some((idx, latency)) => {
            tracing::info!("selected {} ({:?})", urls[idx], latency);
            Ok(urls[idx].clone())
        }
        None => Err(SelectError::NoValidEndpoint { tried: urls.len() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn urls(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    const TIMEOUT: Duration = Duration::from_millis(100);

    #[tokio::test]
    async fn test_fastest_valid_wins() {
        let candidates = urls(&["a", "b", "c"]);

        let winner = race_candidates(&candidates, TIMEOUT, |url| async move {
            match url.as_str() {
                "a" => Ok(Duration::from_millis(120)),
                "b" => Ok(Duration::from_millis(40)),
                _ => Ok(Duration::from_millis(80)),
            }
        })
        .await
        .unwrap();

        assert_eq!(winner, "b");
    }

    #[tokio::test]
    async fn test_one_probe_per_candidate() {
        let candidates = urls(&["a", "b", "c", "d"]);
        let probes = AtomicUsize::new(0);

        let winner = race_candidates(&candidates, TIMEOUT, |url| {
            probes.fetch_add(1, Ordering::SeqCst);
            async move {
                match url.as_str() {
                    "c" => Ok(Duration::from_millis(10)),
                    _ => Err(ProbeError::InvalidResponse("boom".to_string())),
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(winner, "c");
        assert_eq!(probes.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_mismatched_identity_never_wins() {
        // The fastest candidate reports the wrong chain id; the slow but
        // valid one must win.
        let candidates = urls(&["fast-wrong-chain", "slow-right-chain"]);

        let winner = race_candidates(&candidates, TIMEOUT, |url| async move {
            if url == "fast-wrong-chain" {
                Err(ProbeError::ChainIdMismatch {
                    expected: "chain-7".to_string(),
                    reported: "chain-9".to_string(),
                })
            } else {
                Ok(Duration::from_millis(120))
            }
        })
        .await
        .unwrap();

        assert_eq!(winner, "slow-right-chain");
    }

    #[tokio::test]
    async fn test_equal_latency_takes_input_order() {
        let candidates = urls(&["x", "y"]);

        let winner = race_candidates(&candidates, TIMEOUT, |_| async {
            Ok(Duration::from_millis(50))
        })
        .await
        .unwrap();

        assert_eq!(winner, "x");
    }

    #[tokio::test]
    async fn test_all_failed() {
        let candidates = urls(&["r", "s", "t"]);
        let result = race_candidates(&candidates, TIMEOUT, |_| async {
            Err::<Duration, _>(ProbeError::InvalidResponse("down".to_string()))
        })
        .await;

        match result {
            Err(SelectError::NoValidEndpoint { tried }) => assert_eq!(tried, 3),
            other => panic!("expected NoValidEndpoint, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_candidates() {
        let probes = AtomicUsize::new(0);
        let result = race_candidates(&[], TIMEOUT, |_: String| {
            probes.fetch_add(1, Ordering::SeqCst);
            async { Ok(Duration::from_millis(1)) }
        })
        .await;

        assert!(matches!(result, Err(SelectError::NoCandidates)));
        assert_eq!(probes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hung_probe_is_bounded_by_timeout() {
        let candidates = urls(&["hung", "healthy"]);

        let winner = race_candidates(&candidates, TIMEOUT, |url| async move {
            if url == "hung" {
                tokio::time::sleep(Duration::from_secs(3600)).await;
            } else {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
            Ok(Duration::from_millis(10))
        })
        .await
        .unwrap();

        assert_eq!(winner, "healthy");
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_hung_fails_at_timeout() {
        let start = tokio::time::Instant::now();
        let candidates = urls(&["p", "q"]);

        let result = race_candidates(&candidates, TIMEOUT, |_| async {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(Duration::from_millis(1))
        })
        .await;

        assert!(matches!(
            result,
            Err(SelectError::NoValidEndpoint { tried: 2 })
        ));
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_select_node_rejects_empty_inputs() {
        let selector = EndpointSelector::default();

        let result = selector.select_best_node(&[], "chain-7").await;
        assert!(matches!(result, Err(SelectError::NoCandidates)));

        let result = selector
            .select_best_node(&urls(&["https://rpc.example.com"]), "  ")
            .await;
        assert!(matches!(result, Err(SelectError::EmptyChainId)));

        let result = selector.select_best_indexer(&[]).await;
        assert!(matches!(result, Err(SelectError::NoCandidates)));
    }

    #[tokio::test]
    async fn test_select_node_rejects_malformed_url() {
        let selector = EndpointSelector::default();

        let candidates = urls(&["https://rpc.example.com", "not a url"]);
        let result = selector.select_best_node(&candidates, "chain-7").await;
        assert!(matches!(result, Err(SelectError::InvalidUrl(u)) if u == "not a url"));

        // Parseable but wrong scheme
        let candidates = urls(&["ftp://rpc.example.com"]);
        let result = selector.select_best_indexer(&candidates).await;
        assert!(matches!(result, Err(SelectError::InvalidUrl(_))));
    }
}
