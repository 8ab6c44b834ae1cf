//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! [observability.logging]  → logging.rs (subscriber: console + optional file)
//! [observability.monitoring] → tracer.rs (Prometheus exporter directive)
//! ```
//!
//! # Design Decisions
//! - Logging settings are passthrough data: the composer never reads them,
//!   the host binary feeds them to `logging::init`
//! - The tracer is only constructed when a monitoring address is present;
//!   its exporter starts when the runtime applies the directive, not here

pub mod logging;
pub mod tracer;

pub use logging::LoggingError;
pub use tracer::{ServerTracer, TracerError};
