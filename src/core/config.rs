//! Fixed engine configuration.
//!
//! The adapter exposes no flags, environment variables or configuration files.
//! [`EngineConfig::japanese`] is the single configuration the binary builds, and
//! [`EngineConfig::validate`] checks that its model files exist before the engine
//! is constructed.

use std::path::{Path, PathBuf};

use super::constants::{
    DEFAULT_MODEL_DIR, TEXT_DETECTION_MODEL, TEXT_LINE_ORIENTATION_MODEL,
    USE_ANGLE_CLASSIFICATION,
};
use super::errors::AdapterError;

/// A recognition language and the model files that implement it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecognitionLanguage {
    /// PaddleOCR language code.
    pub code: &'static str,
    /// File name of the recognition model.
    pub recognition_model: &'static str,
    /// File name of the character dictionary matching the recognition model.
    pub character_dict: &'static str,
}

impl RecognitionLanguage {
    /// Japanese recognition, PaddleOCR language code `japan`.
    pub const JAPANESE: Self = Self {
        code: "japan",
        recognition_model: "japan_pp-ocrv3_mobile_rec.onnx",
        character_dict: "japan_dict.txt",
    };
}

/// Configuration the OCR engine is constructed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Language the recognition model reads.
    pub language: RecognitionLanguage,
    /// Path to the text detection model.
    pub text_detection_model: PathBuf,
    /// Path to the text recognition model.
    pub text_recognition_model: PathBuf,
    /// Path to the character dictionary.
    pub character_dict: PathBuf,
    /// Path to the text line orientation model, present when angle
    /// classification is enabled.
    pub text_line_orientation_model: Option<PathBuf>,
}

impl EngineConfig {
    /// Japanese recognition with angle classification, models under `model_dir`.
    pub fn japanese(model_dir: impl AsRef<Path>) -> Self {
        Self::for_language(RecognitionLanguage::JAPANESE, model_dir.as_ref())
    }

    fn for_language(language: RecognitionLanguage, model_dir: &Path) -> Self {
        let text_line_orientation_model =
            USE_ANGLE_CLASSIFICATION.then(|| model_dir.join(TEXT_LINE_ORIENTATION_MODEL));
        Self {
            language,
            text_detection_model: model_dir.join(TEXT_DETECTION_MODEL),
            text_recognition_model: model_dir.join(language.recognition_model),
            character_dict: model_dir.join(language.character_dict),
            text_line_orientation_model,
        }
    }

    /// Whether the engine runs text angle classification.
    pub fn use_angle_classification(&self) -> bool {
        self.text_line_orientation_model.is_some()
    }

    /// Checks that every file the engine needs is present.
    pub fn validate(&self) -> Result<(), AdapterError> {
        let required = [
            Some(&self.text_detection_model),
            Some(&self.text_recognition_model),
            Some(&self.character_dict),
            self.text_line_orientation_model.as_ref(),
        ];
        for path in required.into_iter().flatten() {
            if !path.is_file() {
                return Err(AdapterError::ModelNotFound { path: path.clone() });
            }
        }
        Ok(())
    }
}

/// Picks the model directory.
///
/// Prefers `models` next to the running executable so the adapter can be called
/// from any working directory, and falls back to `./models`.
pub fn resolve_model_dir() -> PathBuf {
    let beside_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_MODEL_DIR)));
    match beside_exe {
        Some(dir) if dir.is_dir() => dir,
        _ => PathBuf::from(DEFAULT_MODEL_DIR),
    }
}
