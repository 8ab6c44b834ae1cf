//! Configuration document subsystem.
//!
//! # Data Flow
//! ```text
//! bootstrap file (TOML)
//!     → loader.rs (read & deserialize)
//!     → BootstrapConfig (immutable once loaded)
//!     → consumed by value by the directive composer
//! ```
//!
//! # Design Decisions
//! - Loaded exactly once per process; no caching, no file watching
//! - Absent sections default to empty strings, never to live endpoints
//! - No validation beyond the parser: a blank address means "disabled",
//!   and only non-blank addresses can fail (at capability construction)

pub mod loader;
pub mod schema;

pub use loader::{load, ConfigError};
pub use schema::{
    BootstrapConfig, ConfigCenterConfig, DiscoveryConfig, GovernanceConfig, LoggingConfig,
    MonitoringConfig, ObservabilityConfig, ServiceIdentity,
};
