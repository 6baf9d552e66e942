//! Constants used throughout the adapter.
//!
//! The engine configuration is fixed at build time so every invocation of the
//! adapter recognizes text the same way regardless of who calls it.

/// Message reported when the invocation carries no image path.
pub const NO_IMAGE_PATH_MESSAGE: &str = "No image path provided";

/// Name of the directory holding the ONNX models and the character dictionary.
///
/// Resolved next to the executable first, then relative to the working directory.
pub const DEFAULT_MODEL_DIR: &str = "models";

/// Text detection model shared by every recognition language.
pub const TEXT_DETECTION_MODEL: &str = "pp-ocrv5_mobile_det.onnx";

/// Text line orientation model used for angle classification.
pub const TEXT_LINE_ORIENTATION_MODEL: &str = "pp-lcnet_x0_25_textline_ori.onnx";

/// Whether text angle classification runs on every detected line.
pub const USE_ANGLE_CLASSIFICATION: bool = true;

/// Exit code for a successful invocation, with or without recognized text.
pub const EXIT_SUCCESS: u8 = 0;

/// Exit code for every failure: missing argument or any engine fault.
pub const EXIT_FAILURE: u8 = 1;

/// Separator placed between recognized text lines.
pub const LINE_SEPARATOR: &str = "\n";
