//! Startup preflight for service configuration documents.
//!
//! Loads a document, initializes logging from it, composes the startup
//! directive sequence and reports what a server runtime would apply:
//!
//! ```text
//!     conf/service.toml
//!            │
//!            ▼
//!     config::load ──▶ logging::init ──▶ startup::compose
//!                                              │
//!                                              ▼
//!                        [identity, registry?, dynamic-config?, tracer?]
//! ```
//!
//! Exits non-zero when the document cannot be loaded or any configured
//! integration cannot be constructed, so deploy pipelines can gate on
//! it the way they gate on `nginx -t`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use service_bootstrap::config;
use service_bootstrap::observability::logging;
use service_bootstrap::startup;

#[derive(Parser)]
#[command(name = "service-bootstrap")]
#[command(about = "Validate a configuration document and report its startup directives", long_about = None)]
struct Cli {
    /// Path to the configuration document
    #[arg(
        short,
        long,
        env = "SERVICE_BOOTSTRAP_CONFIG",
        default_value = "conf/service.toml"
    )]
    config: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load before logging init: the document carries the log settings.
    // Failures here go to stderr since no subscriber exists yet.
    let document = match config::load(&cli.config) {
        Ok(document) => document,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    // The guard must outlive composition so the file appender flushes.
    let _log_guard = match logging::init(&document.observability.logging) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("error: failed to initialize logging: {err}");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        path = %cli.config.display(),
        service = %document.identity.name,
        "Configuration document loaded"
    );

    let directives = match startup::compose(document) {
        Ok(directives) => directives,
        Err(err) => {
            tracing::error!(error = %err, "Startup composition failed");
            return ExitCode::FAILURE;
        }
    };

    for directive in &directives {
        tracing::info!(directive = %directive.kind(), "Directive composed");
    }
    tracing::info!(count = directives.len(), "Startup preflight passed");

    ExitCode::SUCCESS
}
