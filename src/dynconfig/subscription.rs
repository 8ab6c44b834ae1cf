//! Dynamic-config subscription.
//!
//! The subscription directive pairs the service name (the subscription
//! key) with a constructed [`DynConfigClient`]. The server runtime applies
//! it by calling [`ConfigSubscription::watch`], which polls the config
//! center and publishes parsed changes until shutdown.

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwapOption;
use serde_json::Value;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use crate::dynconfig::client::DynConfigClient;

/// One observed change of the service's dynamic configuration.
#[derive(Debug, Clone)]
pub struct ConfigUpdate {
    /// Payload exactly as the config center returned it.
    pub raw: String,
    /// The payload parsed as JSON.
    pub value: Value,
}

/// A pending subscription, keyed by the service name.
pub struct ConfigSubscription {
    service: String,
    client: DynConfigClient,
}

impl ConfigSubscription {
    /// Pair the subscription key with a constructed client.
    pub fn new(service: &str, client: DynConfigClient) -> Self {
        Self {
            service: service.to_string(),
            client,
        }
    }

    /// The subscription key (the service name from the identity section).
    pub fn service(&self) -> &str {
        &self.service
    }

    /// The client this subscription will poll.
    pub fn client(&self) -> &DynConfigClient {
        &self.client
    }

    /// Start polling the config center for changes.
    ///
    /// Unchanged payloads are skipped. A changed payload that fails to
    /// parse as JSON is logged and dropped, keeping the current value.
    /// The loop stops when the shutdown signal fires.
    pub fn watch(
        self,
        poll_interval: Duration,
        mut shutdown: broadcast::Receiver<()>,
    ) -> (ConfigWatch, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let current: Arc<ArcSwapOption<Value>> = Arc::new(ArcSwapOption::empty());
        let published = current.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(poll_interval);
            let mut last_raw: Option<String> = None;

            tracing::info!(service = %self.service, "Dynamic config subscription started");

            loop {
                tokio::select! {
                    _ = shutdown.recv() => {
                        tracing::info!(service = %self.service, "Dynamic config subscription stopped");
                        break;
                    }
                    _ = ticker.tick() => {
                        match self.client.fetch(&self.service).await {
                            Ok(Some(raw)) => {
                                if last_raw.as_deref() == Some(raw.as_str()) {
                                    continue;
                                }
                                match serde_json::from_str::<Value>(&raw) {
                                    Ok(value) => {
                                        tracing::info!(
                                            service = %self.service,
                                            "Dynamic config change detected"
                                        );
                                        published.store(Some(Arc::new(value.clone())));
                                        last_raw = Some(raw.clone());
                                        if tx.send(ConfigUpdate { raw, value }).is_err() {
                                            // Receiver dropped; nobody is listening anymore.
                                            break;
                                        }
                                    }
                                    Err(e) => {
                                        tracing::error!(
                                            service = %self.service,
                                            error = %e,
                                            "Failed to parse dynamic config payload. Keeping current value."
                                        );
                                    }
                                }
                            }
                            // Nothing published under the key yet.
                            Ok(None) => {}
                            Err(e) => {
                                tracing::warn!(
                                    service = %self.service,
                                    error = %e,
                                    "Config center poll failed"
                                );
                            }
                        }
                    }
                }
            }
        });

        (ConfigWatch { updates: rx, current }, handle)
    }
}

/// Runtime-facing handle to a running subscription.
pub struct ConfigWatch {
    updates: mpsc::UnboundedReceiver<ConfigUpdate>,
    current: Arc<ArcSwapOption<Value>>,
}

impl ConfigWatch {
    /// Wait for the next configuration change.
    ///
    /// Returns `None` once the watch task has stopped.
    pub async fn changed(&mut self) -> Option<ConfigUpdate> {
        self.updates.recv().await
    }

    /// Lock-free snapshot of the most recently published value.
    pub fn current(&self) -> Option<Arc<Value>> {
        self.current.load_full()
    }
}

impl std::fmt::Debug for ConfigSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigSubscription")
            .field("service", &self.service)
            .field("client", &self.client)
            .finish()
    }
}
