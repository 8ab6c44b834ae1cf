//! Config-center gateway client.
//!
//! Same construction discipline as the registry client: addresses are
//! validated and normalized up front, nothing is dialed until the runtime
//! asks for a payload.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

use crate::net::endpoint::{parse_endpoints, EndpointError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors that can occur constructing or querying the config center.
#[derive(Debug, Error)]
pub enum DynConfigError {
    /// Constructed with an empty node list.
    #[error("no config center nodes configured")]
    NoNodes,

    /// A node address failed to parse.
    #[error(transparent)]
    Endpoint(#[from] EndpointError),

    /// The underlying HTTP client could not be built.
    #[error("failed to build config center http client: {0}")]
    Client(#[from] reqwest::Error),

    /// Every configured node refused or failed the call.
    #[error("all config center nodes failed")]
    AllNodesFailed,
}

/// Client for the config center's key-value HTTP gateway.
#[derive(Clone)]
pub struct DynConfigClient {
    /// Normalized node endpoints, tried in order.
    nodes: Vec<Url>,
    /// Shared HTTP client with request timeout applied.
    http: reqwest::Client,
}

impl DynConfigClient {
    /// Create a client bound to the given node addresses.
    ///
    /// Fails if the list is empty or any address does not parse; never
    /// dials.
    pub fn new(addresses: &[String]) -> Result<Self, DynConfigError> {
        if addresses.is_empty() {
            return Err(DynConfigError::NoNodes);
        }

        let nodes = parse_endpoints(addresses)?;
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self { nodes, http })
    }

    /// The normalized node endpoints this client will try, in order.
    pub fn nodes(&self) -> &[Url] {
        &self.nodes
    }

    /// Fetch the raw payload published under `config/{key}`.
    ///
    /// Returns `Ok(None)` when no payload has been published for the key.
    /// Nodes are walked in order; only when every node fails does the call
    /// error.
    pub async fn fetch(&self, key: &str) -> Result<Option<String>, DynConfigError> {
        for node in &self.nodes {
            let url = match kv_url(node, key) {
                Some(url) => url,
                None => continue,
            };

            match self.http.get(url).send().await {
                Ok(resp) if resp.status() == StatusCode::NOT_FOUND => return Ok(None),
                Ok(resp) if resp.status().is_success() => match resp.text().await {
                    Ok(body) => return Ok(Some(body)),
                    Err(e) => {
                        tracing::warn!(
                            node = %node,
                            error = %e,
                            "Config center response unreadable, trying next node"
                        );
                    }
                },
                Ok(resp) => {
                    tracing::warn!(
                        node = %node,
                        status = %resp.status(),
                        "Config center returned error status, trying next node"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        node = %node,
                        error = %e,
                        "Config center request failed, trying next node"
                    );
                }
            }
        }
        Err(DynConfigError::AllNodesFailed)
    }
}

/// Build the key-value resource URL on one node.
fn kv_url(node: &Url, key: &str) -> Option<Url> {
    let mut url = node.join(&format!("v1/kv/config/{key}")).ok()?;
    url.set_query(Some("raw=true"));
    Some(url)
}

impl std::fmt::Debug for DynConfigClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynConfigClient")
            .field("nodes", &self.nodes)
            .finish()
    }
}
