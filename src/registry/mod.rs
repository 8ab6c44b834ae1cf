//! Service registry integration.
//!
//! The registry directive wraps a [`RegistryClient`]; the server runtime
//! applies it by registering its instance once listeners are bound, and
//! deregistering on shutdown.

pub mod client;

pub use client::{RegistryClient, RegistryError, ServiceInstance};
