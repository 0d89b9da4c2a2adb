//! Disease detector: preprocessing + classifier + knowledge base

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Result};
use image::DynamicImage;

use super::{load_image, preprocess_image, DiseaseKnowledgeBase, DiseasePrediction};
use crate::model::{argmax, Classifier, ModelError};

/// Loaded once at startup; read-only afterwards
pub struct DiseaseDetector {
    classifier: Arc<dyn Classifier>,
    knowledge: DiseaseKnowledgeBase,
    width: u32,
    height: u32,
}

impl DiseaseDetector {
    /// Wire a classifier with NHWC input `[1, height, width, 3]` to a knowledge base
    pub fn new(classifier: Arc<dyn Classifier>, knowledge: DiseaseKnowledgeBase) -> Result<Self> {
        let (height, width) = match classifier.input_shape() {
            &[1, h, w, 3] => (h, w),
            other => bail!("disease classifier input must be [1, H, W, 3], got {:?}", other),
        };

        Ok(Self {
            classifier,
            knowledge,
            width: u32::try_from(width)?,
            height: u32::try_from(height)?,
        })
    }

    pub fn knowledge(&self) -> &DiseaseKnowledgeBase {
        &self.knowledge
    }

    /// Class index -> label, reason and cure
    pub fn lookup(&self, class_index: usize) -> DiseasePrediction {
        self.knowledge.lookup(class_index)
    }

    /// Classify a decoded image
    pub fn diagnose_image(&self, img: &DynamicImage) -> Result<DiseasePrediction> {
        let input = preprocess_image(img, self.width, self.height);
        let scores = self.classifier.predict(&input)?;
        let class_index = argmax(&scores).ok_or(ModelError::EmptyScores)?;

        let prediction = self.lookup(class_index);
        tracing::info!("Disease prediction: {} (class {})", prediction.label, class_index);
        Ok(prediction)
    }

    /// Decode and classify an image file
    pub fn diagnose_path(&self, path: &Path) -> Result<DiseasePrediction> {
        let img = load_image(path)?;
        self.diagnose_image(&img)
    }
}
