//! The JSON envelope printed on standard output.
//!
//! One envelope is printed per invocation, on a single line:
//!
//! ```text
//! {"text":"こんにちは\n世界","error":null}
//! {"text":"","error":"No image path provided"}
//! ```
//!
//! Consumers parse by key. The same type is used on the reading side through
//! [`Envelope::from_line`] and [`Envelope::into_text`].

use serde::{Deserialize, Serialize};

use crate::core::AdapterError;

/// Result of one adapter invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Newline-joined recognized text, empty when nothing was found or on error.
    #[serde(default)]
    pub text: String,
    /// `None` on success, the failure message otherwise.
    pub error: Option<String>,
}

impl Envelope {
    /// Envelope for a successful invocation.
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            error: None,
        }
    }

    /// Envelope for a failed invocation. The text is always empty.
    pub fn failure(error: &AdapterError) -> Self {
        Self {
            text: String::new(),
            error: Some(error.message()),
        }
    }

    /// Whether this envelope reports success.
    ///
    /// An empty error string counts as success, as it did for the service
    /// that first consumed this output.
    pub fn is_success(&self) -> bool {
        self.error.as_deref().is_none_or(str::is_empty)
    }

    /// Serializes the envelope as one line of JSON, without a trailing newline.
    pub fn to_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parses one line of adapter output.
    ///
    /// Accepts the error-only shape `{"error": "..."}` that older producers
    /// emitted when the image path was missing.
    pub fn from_line(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line.trim())
    }

    /// Returns the recognized text, or the reported error.
    pub fn into_text(self) -> Result<String, AdapterError> {
        match self.error {
            Some(error) if !error.is_empty() => Err(AdapterError::Reported(error)),
            _ => Ok(self.text),
        }
    }
}
