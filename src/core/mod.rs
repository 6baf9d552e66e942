//! The core module of the adapter.
//!
//! This module contains the pieces every other module builds on:
//! - Constants fixing the engine configuration and the process contract
//! - The engine configuration and model resolution
//! - Error handling
//! - Tracing setup for the opt-in diagnostic channel

pub mod config;
pub mod constants;
pub mod errors;

pub use config::{EngineConfig, RecognitionLanguage, resolve_model_dir};
pub use constants::*;
pub use errors::AdapterError;

/// Initializes the tracing subscriber for diagnostics.
///
/// Output goes to standard error because standard output carries the envelope.
/// Nothing is emitted unless `RUST_LOG` enables it, which keeps the engine
/// silent by default.
pub fn init_tracing() {
    use tracing_subscriber::filter::LevelFilter;
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::OFF.into())
        .from_env_lossy();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
