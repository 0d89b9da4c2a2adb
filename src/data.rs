//! Artifact Loading
//!
//! Loads the pretrained models, fitted encoders and disease knowledge base
//! once at startup. Everything returned here is read-only afterwards.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::ArtifactPaths;
use crate::disease::{DiseaseDetector, DiseaseKnowledgeBase, IMAGE_SIZE};
use crate::model::{FeatureEncoder, LabelDecoder, OnnxClassifier};
use crate::rotation::CropRotationRecommender;

/// Knowledge base from the configured file, or the embedded default
pub fn load_knowledge_base(paths: &ArtifactPaths) -> Result<DiseaseKnowledgeBase> {
    let kb = match &paths.disease_kb {
        Some(path) => DiseaseKnowledgeBase::load(path)?,
        None => DiseaseKnowledgeBase::embedded()?,
    };
    tracing::info!("  Disease classes: {}", kb.labels().len());
    Ok(kb)
}

/// Disease classifier (NHWC 224x224 RGB) + knowledge base
pub fn load_disease_detector(paths: &ArtifactPaths, knowledge: DiseaseKnowledgeBase) -> Result<DiseaseDetector> {
    let side = IMAGE_SIZE as usize;
    let classifier = OnnxClassifier::load(&paths.disease_model, &[1, side, side, 3])
        .context("Failed to load disease classifier")?;
    DiseaseDetector::new(Arc::new(classifier), knowledge)
}

/// Feature encoder + rotation classifier + label decoder
pub fn load_rotation_recommender(paths: &ArtifactPaths) -> Result<CropRotationRecommender> {
    let encoder = FeatureEncoder::load(&paths.feature_encoder)?;
    let labels = LabelDecoder::load(&paths.label_encoder)?;
    tracing::info!("  Encoded features: {}", encoder.width());
    tracing::info!("  Rotation labels: {}", labels.len());

    let classifier = OnnxClassifier::load(&paths.rotation_model, &[1, encoder.width()])
        .context("Failed to load rotation classifier")?;
    CropRotationRecommender::new(encoder, Arc::new(classifier), labels)
}
