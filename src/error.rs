//! Error types for net-optimizer

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// Endpoint selection errors
    #[error("Selection error: {0}")]
    Select(#[from] SelectError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Errors surfaced by the endpoint selector.
///
/// Individual probe failures never appear here; they are swallowed into
/// "invalid candidate" status and only the all-failed case propagates.
#[derive(Error, Debug)]
pub enum SelectError {
    #[error("no candidate endpoints provided")]
    NoCandidates,

    #[error("expected chain id must not be empty")]
    EmptyChainId,

    #[error("invalid endpoint url: {0}")]
    InvalidUrl(String),

    #[error("all {tried} candidate endpoints failed their probes")]
    NoValidEndpoint { tried: usize },
}

/// Per-candidate probe errors
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("probe timed out after {0}ms")]
    Timeout(u64),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid response from endpoint: {0}")]
    InvalidResponse(String),

    #[error("chain id mismatch: expected {expected}, node reported {reported}")]
    ChainIdMismatch { expected: String, reported: String },

    #[error("failed to build HTTP client: {0}")]
    ClientInit(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid config file: {0}")]
    InvalidFile(String),

    #[error("Unknown network: {0}")]
    UnknownNetwork(String),

    #[error("Config file parse error: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}
