//! Dynamic configuration (config center) integration.
//!
//! # Data Flow
//! ```text
//! config center gateway
//!     → client.rs (fetch payload under config/{service})
//!     → subscription.rs (poll loop, change detection, JSON parse)
//!     → ConfigUpdate over an unbounded channel
//!     → ArcSwap snapshot readable by any subsystem
//! ```
//!
//! # Design Decisions
//! - Poll-based: the gateway exposes plain GETs, not change streams
//! - A malformed payload never replaces the current value
//! - The subscription key is the service name, fixed at composition time

pub mod client;
pub mod subscription;

pub use client::{DynConfigClient, DynConfigError};
pub use subscription::{ConfigSubscription, ConfigUpdate, ConfigWatch};
