//! The OCR engine seam.
//!
//! The adapter talks to the engine through [`OcrEngine`] and reads its output as
//! [`LineRecord`]s. Each record exposes its recognized text through an `Option`
//! so a region the engine could not read is skipped instead of faulting.

mod oar;

pub use oar::OarOcrEngine;

use std::path::Path;
use std::sync::Arc;

use crate::core::AdapterError;

/// Text recognized inside one detected region.
#[derive(Debug, Clone, PartialEq)]
pub struct Recognition {
    /// The recognized string.
    pub text: Arc<str>,
    /// Confidence reported by the recognizer, when it reported one.
    pub confidence: Option<f32>,
}

/// One detected text region as returned by the engine.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineRecord {
    /// Polygon of the region as `(x, y)` points in image coordinates.
    pub region: Vec<(f32, f32)>,
    /// The recognition result. `None` marks a malformed record.
    pub recognition: Option<Recognition>,
}

impl LineRecord {
    /// Creates a record with a recognized text.
    pub fn recognized(
        region: Vec<(f32, f32)>,
        text: impl Into<Arc<str>>,
        confidence: Option<f32>,
    ) -> Self {
        Self {
            region,
            recognition: Some(Recognition {
                text: text.into(),
                confidence,
            }),
        }
    }

    /// Creates a record for a region that produced no text.
    pub fn unrecognized(region: Vec<(f32, f32)>) -> Self {
        Self {
            region,
            recognition: None,
        }
    }

    /// Returns the recognized text if the record is well-formed.
    pub fn text(&self) -> Option<&str> {
        self.recognition.as_ref().map(|r| r.text.as_ref())
    }
}

/// An OCR engine able to detect and recognize text in one image.
pub trait OcrEngine {
    /// Runs detection and recognition on the image at `image_path`.
    ///
    /// `classify` requests text angle classification of each detected line.
    /// Returns `None` or an empty vector when no text was found. Records come
    /// back in detection order.
    fn ocr(
        &self,
        image_path: &Path,
        classify: bool,
    ) -> Result<Option<Vec<LineRecord>>, AdapterError>;
}
