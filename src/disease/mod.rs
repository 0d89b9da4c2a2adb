//! Crop disease diagnosis
//!
//! Image -> preprocessing -> disease classifier -> knowledge base lookup.

pub mod detector;
pub mod knowledge;
pub mod preprocess;

pub use detector::DiseaseDetector;
pub use knowledge::{DiseaseKnowledgeBase, UNKNOWN_CLASS};
pub use preprocess::{load_image, preprocess_image, IMAGE_SIZE};

use serde::{Deserialize, Serialize};

/// Diagnosis for one image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiseasePrediction {
    pub label: String,
    pub reason: String,
    pub cure: String,
}
