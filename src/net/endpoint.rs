//! Gateway endpoint parsing and normalization.
//!
//! Governance addresses arrive as free-form strings (`host:port` or a full
//! URL). Capability constructors validate them here, at startup, so that a
//! bad address fails composition instead of surfacing later inside a
//! runtime call.

use thiserror::Error;
use url::Url;

/// Error type for endpoint parsing.
#[derive(Debug, Error)]
pub enum EndpointError {
    /// The address string is empty or whitespace.
    #[error("endpoint address is empty")]
    Empty,

    /// The address does not parse as a URL.
    #[error("invalid endpoint address '{address}': {source}")]
    Invalid {
        address: String,
        #[source]
        source: url::ParseError,
    },

    /// The address parsed, but with a scheme no gateway client speaks.
    #[error("endpoint address '{address}' has unsupported scheme '{scheme}'")]
    UnsupportedScheme { address: String, scheme: String },

    /// The address parsed, but contains no host.
    #[error("endpoint address '{address}' is missing a host")]
    MissingHost { address: String },
}

/// Parse one gateway address into a normalized URL.
///
/// Bare `host:port` forms are prefixed with `http://`; explicit schemes
/// are kept but must be `http` or `https`.
pub fn parse_endpoint(address: &str) -> Result<Url, EndpointError> {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err(EndpointError::Empty);
    }

    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };

    let url = Url::parse(&candidate).map_err(|source| EndpointError::Invalid {
        address: address.to_string(),
        source,
    })?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(EndpointError::UnsupportedScheme {
                address: address.to_string(),
                scheme: scheme.to_string(),
            });
        }
    }

    if url.host_str().is_none() {
        return Err(EndpointError::MissingHost {
            address: address.to_string(),
        });
    }

    Ok(url)
}

/// Parse a list of gateway addresses, failing on the first bad one.
pub fn parse_endpoints(addresses: &[String]) -> Result<Vec<Url>, EndpointError> {
    addresses.iter().map(|a| parse_endpoint(a)).collect()
}
