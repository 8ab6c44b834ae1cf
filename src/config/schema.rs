//! Configuration document schema.
//!
//! This module defines the complete shape of the bootstrap document.
//! All types derive Serde traits for deserialization from the TOML file,
//! and every level carries `#[serde(default)]` so that absent sections
//! deserialize to empty strings. An empty address is the signal the
//! composer reads as "integration not configured", so defaults must
//! never invent one.

use serde::{Deserialize, Serialize};

/// Root of the bootstrap document.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Who this service is (name, version).
    pub identity: ServiceIdentity,

    /// Governance integrations (registry, config center).
    pub governance: GovernanceConfig,

    /// Observability settings (logging, monitoring).
    pub observability: ObservabilityConfig,
}

/// Service identity; populates the mandatory identity directive.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServiceIdentity {
    /// Service name, also the dynamic-config subscription key.
    pub name: String,

    /// Declared version. Informational only.
    pub version: String,
}

/// Governance section: service registry and config center endpoints.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GovernanceConfig {
    /// Service registry endpoint.
    pub discovery: DiscoveryConfig,

    /// Dynamic configuration source endpoint.
    pub config_center: ConfigCenterConfig,
}

/// Registry registration endpoint. A non-empty address activates discovery.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Registry implementation name (e.g. "consul"). Informational.
    pub component: String,

    /// Gateway address, `host:port` or a full URL. Empty means disabled.
    pub address: String,
}

/// Config-center endpoint. A non-empty address activates the subscription.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ConfigCenterConfig {
    /// Config-center implementation name. Informational.
    pub component: String,

    /// Gateway address, `host:port` or a full URL. Empty means disabled.
    pub address: String,
}

/// Observability section: logging passthrough plus the monitoring endpoint.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Logging settings, consumed by the host's logging subsystem.
    pub logging: LoggingConfig,

    /// Metrics/tracing exposition endpoint.
    pub monitoring: MonitoringConfig,
}

/// Logging settings. Carried through to the host; never used to build
/// directives.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log file path. Empty means console only.
    pub path: String,

    /// Log level directive (trace, debug, info, warn, error).
    pub level: String,
}

/// Monitoring endpoint. A non-empty address activates the tracer.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct MonitoringConfig {
    /// Collector flavor (e.g. "prometheus"). Informational.
    pub component: String,

    /// Listen address for the metrics exporter. Empty means disabled.
    pub address: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_empty() {
        let config = BootstrapConfig::default();
        assert!(config.identity.name.is_empty());
        assert!(config.identity.version.is_empty());
        assert!(config.governance.discovery.address.is_empty());
        assert!(config.governance.config_center.address.is_empty());
        assert!(config.observability.monitoring.address.is_empty());
        assert!(config.observability.logging.path.is_empty());
    }

    #[test]
    fn minimal_document_parses_with_empty_optionals() {
        let config: BootstrapConfig = toml::from_str(
            r#"
            [identity]
            name = "svc-a"
            "#,
        )
        .unwrap();

        assert_eq!(config.identity.name, "svc-a");
        assert!(config.identity.version.is_empty());
        assert!(config.governance.discovery.address.is_empty());
        assert!(config.governance.config_center.address.is_empty());
        assert!(config.observability.monitoring.address.is_empty());
    }

    #[test]
    fn full_document_parses_every_field() {
        let config: BootstrapConfig = toml::from_str(
            r#"
            [identity]
            name = "svc-a"
            version = "1.4.0"

            [governance.discovery]
            component = "consul"
            address = "10.0.0.3:8500"

            [governance.config_center]
            component = "consul"
            address = "10.0.0.4:8500"

            [observability.logging]
            path = "logs/svc-a.log"
            level = "debug"

            [observability.monitoring]
            component = "prometheus"
            address = "0.0.0.0:9090"
            "#,
        )
        .unwrap();

        assert_eq!(config.identity.version, "1.4.0");
        assert_eq!(config.governance.discovery.component, "consul");
        assert_eq!(config.governance.discovery.address, "10.0.0.3:8500");
        assert_eq!(config.governance.config_center.address, "10.0.0.4:8500");
        assert_eq!(config.observability.logging.level, "debug");
        assert_eq!(config.observability.monitoring.address, "0.0.0.0:9090");
    }

    #[test]
    fn blank_address_stays_blank() {
        // An explicitly blank address must read exactly like an absent one.
        let config: BootstrapConfig = toml::from_str(
            r#"
            [identity]
            name = "svc-a"

            [governance.discovery]
            component = "consul"
            address = ""
            "#,
        )
        .unwrap();

        assert!(config.governance.discovery.address.is_empty());
    }
}
