//! [`OcrEngine`] backed by the `oar-ocr` pipeline.

use std::path::Path;

use oar_ocr::oarocr::{OAROCR, OAROCRBuilder, TextRegion};
use oar_ocr::utils::load_image;
use tracing::debug;

use super::{LineRecord, OcrEngine};
use crate::core::{AdapterError, EngineConfig};

/// OCR engine running text detection, optional text line orientation
/// classification and text recognition through ONNX Runtime.
#[derive(Debug)]
pub struct OarOcrEngine {
    ocr: OAROCR,
    classifies: bool,
}

impl OarOcrEngine {
    /// Validates `config` and builds the pipeline it describes.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::ModelNotFound`] when a model file is missing and
    /// [`AdapterError::Engine`] when the pipeline fails to build.
    pub fn new(config: &EngineConfig) -> Result<Self, AdapterError> {
        config.validate()?;

        debug!(
            language = config.language.code,
            detection = %config.text_detection_model.display(),
            recognition = %config.text_recognition_model.display(),
            "building OCR pipeline"
        );

        let mut builder = OAROCRBuilder::new(
            &config.text_detection_model,
            &config.text_recognition_model,
            &config.character_dict,
        );
        if let Some(model) = &config.text_line_orientation_model {
            builder = builder.with_text_line_orientation_classification(model);
        }

        Ok(Self {
            ocr: builder.build()?,
            classifies: config.use_angle_classification(),
        })
    }
}

impl OcrEngine for OarOcrEngine {
    fn ocr(
        &self,
        image_path: &Path,
        classify: bool,
    ) -> Result<Option<Vec<LineRecord>>, AdapterError> {
        check_classifier(classify, self.classifies)?;

        let image = load_image(image_path)?;
        let results = self.ocr.predict(vec![image])?;

        Ok(results
            .into_iter()
            .next()
            .map(|result| {
                result
                    .text_regions
                    .into_iter()
                    .map(record_from_region)
                    .collect()
            }))
    }
}

/// Rejects a classification request the engine was not built for.
fn check_classifier(requested: bool, available: bool) -> Result<(), AdapterError> {
    if requested && !available {
        return Err(AdapterError::ClassifierUnavailable);
    }
    Ok(())
}

/// Maps an engine region to a line record; a region without text is malformed.
fn record_from_region(region: TextRegion) -> LineRecord {
    let points = region
        .bounding_box
        .points
        .iter()
        .map(|p| (p.x, p.y))
        .collect();
    match region.text {
        Some(text) => LineRecord::recognized(points, text, region.confidence),
        None => LineRecord::unrecognized(points),
    }
}
