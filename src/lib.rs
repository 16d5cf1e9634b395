//! net-optimizer - Validator and indexer endpoint optimizer
//!
//! A Rust library and CLI that races concurrent health probes against a set
//! of candidate RPC/REST endpoints, validates each against the expected chain
//! identity, and selects the fastest valid one.
//!
//! # Example
//!
//! ```rust,no_run
//! use net_optimizer::{find_network, EndpointSelector, Session};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let network = find_network("mainnet").expect("built-in network");
//!     let selector = EndpointSelector::default();
//!
//!     let session = Session::connect(network, &selector).await?;
//!
//!     println!("node: {}", session.node_url());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod optimizer;
pub mod session;

// Re-exports for convenience
pub use config::{ConfigFile, NetworkConfig, SelectorConfig};
pub use error::{ConfigError, Error, ProbeError, Result, SelectError};
pub use optimizer::{
    default_networks, find_network, probe_indexer, probe_node, EndpointSelector, NodeStatus,
};
pub use session::Session;
