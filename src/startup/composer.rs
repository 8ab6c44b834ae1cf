//! Turns a loaded configuration document into initialization directives.
//!
//! Composition is all-or-nothing. The identity directive is always
//! emitted first; each governance integration is emitted only when its
//! address is configured, and a failure to construct any enabled
//! integration aborts the whole sequence.

use std::path::Path;

use thiserror::Error;

use crate::config::{self, BootstrapConfig, ConfigError};
use crate::dynconfig::{ConfigSubscription, DynConfigClient, DynConfigError};
use crate::observability::{ServerTracer, TracerError};
use crate::registry::{RegistryClient, RegistryError};

use super::directive::Directive;

/// Fixed URL path the fleet's metrics collectors scrape. Changing it
/// would orphan every deployed scrape config, so it is not settable
/// from the document.
pub const METRICS_EXPORT_PATH: &str = "/kitexserver";

/// A configured integration could not be constructed.
///
/// Each variant carries the address that was being wired up so the
/// operator can match the failure back to a document line.
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("service discovery at '{address}' could not be set up: {source}")]
    Registry {
        address: String,
        #[source]
        source: RegistryError,
    },

    #[error("config center at '{address}' could not be set up: {source}")]
    ConfigCenter {
        address: String,
        #[source]
        source: DynConfigError,
    },

    #[error("monitoring tracer at '{address}' could not be set up: {source}")]
    Tracer {
        address: String,
        #[source]
        source: TracerError,
    },
}

/// Anything that can stop startup: a bad document or a bad integration.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Compose(#[from] ComposeError),
}

/// Composes the directive sequence for a loaded document.
///
/// The result is ordered: identity, then registry, dynamic config and
/// tracer in document-declaration order, each present only when its
/// address is non-empty. Composition has no side effects, so calling it
/// twice with equal documents yields equivalent sequences.
pub fn compose(document: BootstrapConfig) -> Result<Vec<Directive>, ComposeError> {
    let mut directives = Vec::with_capacity(4);

    directives.push(Directive::Identity(document.identity.clone()));

    let discovery = &document.governance.discovery;
    if discovery.address.is_empty() {
        tracing::debug!("Service discovery not configured, skipping");
    } else {
        let client = RegistryClient::new(std::slice::from_ref(&discovery.address)).map_err(
            |source| ComposeError::Registry {
                address: discovery.address.clone(),
                source,
            },
        )?;
        tracing::info!(
            component = %discovery.component,
            address = %discovery.address,
            "Service discovery enabled"
        );
        directives.push(Directive::Registry(client));
    }

    let config_center = &document.governance.config_center;
    if config_center.address.is_empty() {
        tracing::debug!("Config center not configured, skipping");
    } else {
        let client = DynConfigClient::new(std::slice::from_ref(&config_center.address)).map_err(
            |source| ComposeError::ConfigCenter {
                address: config_center.address.clone(),
                source,
            },
        )?;
        tracing::info!(
            component = %config_center.component,
            address = %config_center.address,
            service = %document.identity.name,
            "Config center subscription enabled"
        );
        directives.push(Directive::DynamicConfig(ConfigSubscription::new(
            &document.identity.name,
            client,
        )));
    }

    let monitoring = &document.observability.monitoring;
    if monitoring.address.is_empty() {
        tracing::debug!("Monitoring tracer not configured, skipping");
    } else {
        let tracer = ServerTracer::new(&monitoring.address, METRICS_EXPORT_PATH).map_err(
            |source| ComposeError::Tracer {
                address: monitoring.address.clone(),
                source,
            },
        )?;
        tracing::info!(
            component = %monitoring.component,
            address = %monitoring.address,
            path = METRICS_EXPORT_PATH,
            "Monitoring tracer enabled"
        );
        directives.push(Directive::Tracer(tracer));
    }

    Ok(directives)
}

/// Loads the document at `path` and composes its directives.
///
/// This is the whole startup pipeline in one call, intended for server
/// `main` functions that want to fail before binding anything.
pub fn init(path: impl AsRef<Path>) -> Result<Vec<Directive>, BootstrapError> {
    let document = config::load(path)?;
    Ok(compose(document)?)
}
