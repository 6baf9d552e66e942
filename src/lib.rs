//! # OCR Adapter
//!
//! A command-line adapter that runs OCR over one image and prints the result as
//! a single line of JSON, for consumption by a calling application.
//!
//! Recognition is done by the `oar-ocr` pipeline with a fixed configuration:
//! Japanese recognition with text angle classification. This crate only owns
//! the process boundary: argument validation, error normalization and the
//! output envelope.
//!
//! ## Modules
//!
//! * [`core`] - Constants, fixed engine configuration, errors, tracing setup
//! * [`engine`] - The [`engine::OcrEngine`] seam, line records and the `oar-ocr` engine
//! * [`envelope`] - The JSON envelope, written by the adapter and read by callers
//! * [`adapter`] - Argument parsing and the top-level error boundary
//!
//! ## Example
//!
//! ```rust,no_run
//! use ocr_adapter::prelude::*;
//!
//! let invocation = Invocation::from_args(["ocr-adapter", "photo.png"])
//!     .unwrap_or_else(|_| Invocation::new(None));
//! let config = EngineConfig::japanese(resolve_model_dir());
//! let outcome = run(&invocation, || OarOcrEngine::new(&config));
//! println!("{}", outcome.envelope.to_line().unwrap());
//! ```
//!
//! ## Output
//!
//! ```text
//! {"text":"こんにちは\n世界","error":null}
//! {"text":"","error":"No image path provided"}
//! ```

pub mod adapter;
pub mod core;
pub mod engine;
pub mod envelope;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::adapter::{Invocation, Outcome, extract_text, run};
    pub use crate::core::{AdapterError, EngineConfig, init_tracing, resolve_model_dir};
    pub use crate::engine::{LineRecord, OarOcrEngine, OcrEngine, Recognition};
    pub use crate::envelope::Envelope;
}
