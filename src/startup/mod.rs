//! Startup composition subsystem.
//!
//! The composer reads a loaded configuration document and produces the
//! ordered directive sequence a server runtime applies before serving:
//!
//! ```text
//! Document ──> compose() ──> [Identity, Registry?, DynamicConfig?, Tracer?]
//! ```
//!
//! `init` bundles loading and composition for binaries that want the
//! whole pipeline in one call.

pub mod composer;
pub mod directive;

pub use composer::{compose, init, BootstrapError, ComposeError, METRICS_EXPORT_PATH};
pub use directive::{Directive, DirectiveKind};
