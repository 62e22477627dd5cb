//! Tracing integration for structured logging
//!
//! Wires the `tracing` crate into `TermGrid`: the engine and adapter
//! emit structured events for splits, closes, focus moves, and drag
//! gestures, and this module installs the subscriber that renders them.

use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Global flag indicating whether tracing has been initialized
static TRACING_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Errors that can occur during tracing initialization
#[derive(Debug, Error)]
pub enum TracingError {
    /// Failed to initialize tracing subscriber
    #[error("Failed to initialize tracing: {0}")]
    InitializationFailed(String),

    /// Tracing already initialized
    #[error("Tracing has already been initialized")]
    AlreadyInitialized,
}

/// Initializes the tracing subscriber with the default filter.
///
/// Events go to stderr. The filter honors `RUST_LOG` when set and
/// defaults to `termgrid=info` otherwise. This function should be
/// called once at application startup.
///
/// # Errors
///
/// Returns an error if tracing has already been initialized or the
/// subscriber fails to install.
pub fn init_tracing() -> Result<(), TracingError> {
    init_tracing_with_filter("termgrid=info")
}

/// Initializes the tracing subscriber with an explicit filter
/// directive, e.g. `"termgrid=debug"`.
///
/// # Errors
///
/// Returns an error if the filter is invalid, tracing has already been
/// initialized, or the subscriber fails to install.
pub fn init_tracing_with_filter(directives: &str) -> Result<(), TracingError> {
    if TRACING_INITIALIZED.swap(true, Ordering::SeqCst) {
        return Err(TracingError::AlreadyInitialized);
    }

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(directives));
    let filter = filter.map_err(|e| TracingError::InitializationFailed(e.to_string()))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(|e| TracingError::InitializationFailed(e.to_string()))?;

    Ok(())
}

/// Checks if tracing has been initialized
#[must_use]
pub fn is_tracing_initialized() -> bool {
    TRACING_INITIALIZED.load(Ordering::SeqCst)
}
