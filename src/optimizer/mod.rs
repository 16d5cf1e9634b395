//! Endpoint probing and best-endpoint selection

mod defaults;
mod indexer;
mod node;
mod selector;

pub use defaults::{default_networks, find_network};
pub use indexer::probe_indexer;
pub use node::{probe_node, NodeStatus};
pub use selector::EndpointSelector;
