//! Agri Oracle
//!
//! Crop disease diagnosis and crop rotation recommendation on top of
//! pretrained, opaque models.
//!
//! - `utils/`: input canonicalization and upload filename handling
//! - `model/`: classifier trait, ONNX backend, fitted encoders
//! - `explanation/`: rule-based rotation reasoning
//! - `rotation/`: rotation recommendation pipeline
//! - `disease/`: image preprocessing, disease detector, knowledge base
//! - `data`, `config`: startup artifact loading and environment settings
//! - `api_server`: Axum HTTP API (feature `api`)

pub mod utils;
pub mod model;
pub mod explanation;
pub mod rotation;
pub mod disease;
pub mod config;
pub mod data;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use utils::canonicalize;
pub use model::{Classifier, FeatureEncoder, LabelDecoder, ModelError, OnnxClassifier};
pub use explanation::{compose_reasoning, ReasoningComposer, ReasoningStyle};
pub use rotation::{CategoricalTriple, CropRotationRecommender, Recommendation, RotationRequest};
pub use disease::{DiseaseDetector, DiseaseKnowledgeBase, DiseasePrediction};
pub use config::{ArtifactPaths, ServerConfig};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
