//! Configuration-driven service bootstrap library

pub mod config;
pub mod dynconfig;
pub mod net;
pub mod observability;
pub mod registry;
pub mod startup;

pub use config::schema::BootstrapConfig;
pub use startup::{compose, init, Directive};
