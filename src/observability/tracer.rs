//! Metrics exporter (the monitoring directive payload).
//!
//! # Responsibilities
//! - Validate the configured exporter listen address at composition time
//! - Serve the Prometheus registry at the fleet's fixed export path once
//!   the server runtime applies the directive
//!
//! Construction is local-only: no socket is opened and no global recorder
//! is installed, so composing a tracer directive twice stays side-effect
//! free. Everything observable happens in [`ServerTracer::serve`].

use std::net::SocketAddr;

use axum::routing::get;
use axum::Router;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use thiserror::Error;
use tokio::sync::broadcast;

/// Errors constructing or running the exporter.
#[derive(Debug, Error)]
pub enum TracerError {
    /// The configured address does not parse as `ip:port`.
    #[error("invalid monitoring address '{address}': {source}")]
    InvalidAddress {
        address: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// The Prometheus recorder could not be built.
    #[error("failed to build metrics recorder: {0}")]
    Recorder(#[from] BuildError),

    /// The exporter could not bind its listen address.
    #[error("failed to bind metrics listener on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// The exporter's HTTP server failed while running.
    #[error("metrics server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Server-side tracer: a Prometheus exporter bound to a listen address
/// and an export path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerTracer {
    listen: SocketAddr,
    export_path: String,
}

impl ServerTracer {
    /// Create a tracer from the configured address and export path.
    ///
    /// The path is normalized to start with `/` (axum routes are
    /// absolute).
    pub fn new(address: &str, export_path: &str) -> Result<Self, TracerError> {
        let listen = address
            .parse()
            .map_err(|source| TracerError::InvalidAddress {
                address: address.to_string(),
                source,
            })?;

        let export_path = if export_path.starts_with('/') {
            export_path.to_string()
        } else {
            format!("/{export_path}")
        };

        Ok(Self {
            listen,
            export_path,
        })
    }

    /// The address the exporter will listen on.
    pub fn listen_addr(&self) -> SocketAddr {
        self.listen
    }

    /// The URL path the registry is rendered at.
    pub fn export_path(&self) -> &str {
        &self.export_path
    }

    /// Run the exporter until the shutdown signal fires.
    ///
    /// Installs the recorder globally; if another recorder is already
    /// installed this downgrades to a warning and the exporter serves a
    /// detached registry.
    pub async fn serve(self, mut shutdown: broadcast::Receiver<()>) -> Result<(), TracerError> {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        if let Err(e) = metrics::set_global_recorder(recorder) {
            tracing::warn!(
                error = %e,
                "Global metrics recorder already installed; exporter serves a detached registry"
            );
        }

        let render = handle.clone();
        let app = Router::new().route(
            &self.export_path,
            get(move || {
                let render = render.clone();
                async move { render.render() }
            }),
        );

        let listener = tokio::net::TcpListener::bind(self.listen)
            .await
            .map_err(|source| TracerError::Bind {
                addr: self.listen,
                source,
            })?;

        tracing::info!(
            address = %self.listen,
            path = %self.export_path,
            "Metrics exporter listening"
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await
            .map_err(TracerError::Serve)?;

        tracing::info!(address = %self.listen, "Metrics exporter stopped");
        Ok(())
    }
}
