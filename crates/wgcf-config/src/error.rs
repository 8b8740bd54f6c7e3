//! Error types for configuration generation.

use thiserror::Error;

/// Result type alias for configuration generation.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while turning an account record into a client config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No generator was selected.
    #[error("generator not specified")]
    NotSpecified,

    /// More than one generator was selected.
    #[error("multiple generators not supported")]
    MultipleSpecified,

    /// The peer lacks the host, address or port needed for the requested endpoint.
    #[error("cannot resolve {selector} endpoint: {reason}")]
    UnresolvableEndpoint {
        /// The endpoint form that was requested.
        selector: String,
        /// What was missing.
        reason: String,
    },

    /// The client identifier cannot be split into three reserved bytes.
    #[error("malformed reserved source: {0}")]
    MalformedReservedSource(String),

    /// The generated structure could not be encoded.
    #[error("serialization failed: {0}")]
    SerializationFailure(#[from] serde_json::Error),

    /// The account record misses data every generator depends on.
    #[error("incomplete account record: {0}")]
    IncompleteRecord(String),

    /// An endpoint type string outside of `domain`, `ip_v4` and `ip_v6`.
    #[error("unsupported endpoint type: {0}")]
    UnsupportedEndpointType(String),

    /// An `address:port` string without a port separator.
    #[error("invalid address {0}")]
    InvalidAddress(String),

    /// Invalid key encoding or length.
    #[error("invalid key: {0}")]
    InvalidKey(String),
}
