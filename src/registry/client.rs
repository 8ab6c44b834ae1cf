//! Registry gateway client.
//!
//! # Responsibilities
//! - Validate and normalize the configured registry endpoints
//! - Register and deregister service instances over the JSON gateway API
//! - Walk the endpoint list in order when a gateway is unreachable
//!
//! Construction performs no network traffic: an unreachable registry is a
//! runtime condition, a malformed address is a startup error.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;
use uuid::Uuid;

use crate::net::endpoint::{parse_endpoints, EndpointError};

/// Request timeout for gateway calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors that can occur constructing or talking to the registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Constructed with an empty endpoint list.
    #[error("no registry endpoints configured")]
    NoEndpoints,

    /// An endpoint address failed to parse.
    #[error(transparent)]
    Endpoint(#[from] EndpointError),

    /// The underlying HTTP client could not be built.
    #[error("failed to build registry http client: {0}")]
    Client(#[from] reqwest::Error),

    /// Every configured endpoint refused or failed the call.
    #[error("all registry endpoints failed")]
    AllEndpointsFailed,
}

/// One registered instance of a service, as the gateway stores it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceInstance {
    /// Unique instance id, generated at registration time.
    pub id: Uuid,
    /// Service name shared by all instances of the service.
    pub name: String,
    /// Version the instance reports.
    pub version: String,
    /// Address the instance serves traffic on.
    pub address: String,
}

impl ServiceInstance {
    /// Create an instance record with a fresh v4 id.
    pub fn new(name: &str, version: &str, address: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            version: version.to_string(),
            address: address.to_string(),
        }
    }
}

/// Client for the service registry's HTTP gateway.
#[derive(Clone)]
pub struct RegistryClient {
    /// Normalized gateway endpoints (primary + fallbacks).
    endpoints: Vec<Url>,
    /// Shared HTTP client with request timeout applied.
    http: reqwest::Client,
}

impl RegistryClient {
    /// Create a client bound to the given gateway addresses.
    ///
    /// Each address may be `host:port` or a full URL. Fails if the list is
    /// empty or any address does not parse; never dials.
    pub fn new(addresses: &[String]) -> Result<Self, RegistryError> {
        if addresses.is_empty() {
            return Err(RegistryError::NoEndpoints);
        }

        let endpoints = parse_endpoints(addresses)?;
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self { endpoints, http })
    }

    /// The normalized endpoints this client will try, in order.
    pub fn endpoints(&self) -> &[Url] {
        &self.endpoints
    }

    /// Register an instance with the first endpoint that accepts it.
    pub async fn register(&self, instance: &ServiceInstance) -> Result<(), RegistryError> {
        for endpoint in &self.endpoints {
            let url = match instance_url(endpoint, instance) {
                Some(url) => url,
                None => continue,
            };

            match self.http.put(url).json(instance).send().await {
                Ok(resp) if resp.status().is_success() => {
                    tracing::info!(
                        service = %instance.name,
                        instance_id = %instance.id,
                        endpoint = %endpoint,
                        "Service instance registered"
                    );
                    return Ok(());
                }
                Ok(resp) => {
                    tracing::warn!(
                        endpoint = %endpoint,
                        status = %resp.status(),
                        "Registry rejected registration, trying next endpoint"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        endpoint = %endpoint,
                        error = %e,
                        "Registry request failed, trying next endpoint"
                    );
                }
            }
        }
        Err(RegistryError::AllEndpointsFailed)
    }

    /// Remove an instance registration.
    pub async fn deregister(&self, instance: &ServiceInstance) -> Result<(), RegistryError> {
        for endpoint in &self.endpoints {
            let url = match instance_url(endpoint, instance) {
                Some(url) => url,
                None => continue,
            };

            match self.http.delete(url).send().await {
                Ok(resp) if resp.status().is_success() => {
                    tracing::info!(
                        service = %instance.name,
                        instance_id = %instance.id,
                        "Service instance deregistered"
                    );
                    return Ok(());
                }
                Ok(resp) => {
                    tracing::warn!(
                        endpoint = %endpoint,
                        status = %resp.status(),
                        "Registry rejected deregistration, trying next endpoint"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        endpoint = %endpoint,
                        error = %e,
                        "Registry request failed, trying next endpoint"
                    );
                }
            }
        }
        Err(RegistryError::AllEndpointsFailed)
    }
}

/// Build the gateway resource URL for one instance.
fn instance_url(endpoint: &Url, instance: &ServiceInstance) -> Option<Url> {
    endpoint
        .join(&format!(
            "v1/services/{}/instances/{}",
            instance.name, instance.id
        ))
        .ok()
}

impl std::fmt::Debug for RegistryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryClient")
            .field("endpoints", &self.endpoints)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructs_from_bare_host_port() {
        let client = RegistryClient::new(&["10.0.0.3:8500".to_string()]).unwrap();
        assert_eq!(client.endpoints().len(), 1);
        assert_eq!(client.endpoints()[0].as_str(), "http://10.0.0.3:8500/");
    }

    #[test]
    fn empty_endpoint_list_is_rejected() {
        assert!(matches!(
            RegistryClient::new(&[]),
            Err(RegistryError::NoEndpoints)
        ));
    }

    #[test]
    fn malformed_address_is_rejected() {
        let err = RegistryClient::new(&["not a valid endpoint".to_string()]).unwrap_err();
        assert!(matches!(err, RegistryError::Endpoint(_)));
        assert!(err.to_string().contains("not a valid endpoint"));
    }

    #[test]
    fn instances_get_distinct_ids() {
        let a = ServiceInstance::new("svc-a", "1.0.0", "10.1.0.5:8080");
        let b = ServiceInstance::new("svc-a", "1.0.0", "10.1.0.6:8080");
        assert_ne!(a.id, b.id);
        assert_eq!(a.name, b.name);
    }
}
