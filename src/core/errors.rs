//! Error types for the adapter.
//!
//! Every failure the adapter can observe is an [`AdapterError`]. The top level
//! converts it into the `error` field of the output envelope through
//! [`AdapterError::message`], so each variant has to render a readable message.

use std::error::Error as StdError;
use std::path::PathBuf;
use thiserror::Error;

use super::constants::NO_IMAGE_PATH_MESSAGE;

/// Enum representing the failures of a single adapter invocation.
#[derive(Error, Debug)]
pub enum AdapterError {
    /// The invocation did not carry an image path.
    #[error("{}", NO_IMAGE_PATH_MESSAGE)]
    MissingImagePath,

    /// The argument vector could not be parsed at all.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// A model file required by the fixed engine configuration is missing.
    #[error("model file not found: {}", path.display())]
    ModelNotFound {
        /// The path that was expected to exist.
        path: PathBuf,
    },

    /// Angle classification was requested from an engine built without it.
    #[error("text angle classification requested but the engine was built without it")]
    ClassifierUnavailable,

    /// Any fault raised by the OCR engine, during construction or prediction.
    #[error(transparent)]
    Engine(#[from] oar_ocr::core::OCRError),

    /// The engine panicked during construction or prediction.
    #[error("engine panicked: {0}")]
    EnginePanic(String),

    /// An envelope produced by the adapter reported an error.
    #[error("{0}")]
    Reported(String),
}

impl AdapterError {
    /// Returns the display text of this error followed by its source chain.
    ///
    /// The engine wraps most faults, e.g. `image load` over an I/O error, so
    /// the display text alone would hide the cause.
    pub fn message(&self) -> String {
        let mut message = self.to_string();
        let mut source = self.source();
        while let Some(cause) = source {
            let cause_text = cause.to_string();
            if !message.ends_with(&cause_text) {
                message.push_str(": ");
                message.push_str(&cause_text);
            }
            source = cause.source();
        }
        message
    }
}
