//! Configuration types and file handling

mod file;
mod network;

pub use file::{ConfigFile, SelectorConfig};
pub use network::NetworkConfig;
