//! Crop rotation recommendation
//!
//! Pipeline: raw request -> canonical [`CategoricalTriple`] -> feature encoder
//! -> rotation classifier -> label decoder -> reasoning composer.

pub mod recommender;
pub mod vocabulary;

pub use recommender::{CropRotationRecommender, Recommendation};

use serde::{Deserialize, Serialize};

use crate::utils::canonicalize;

/// Canonical (previous_crop, soil_type, season) input to the rotation model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoricalTriple {
    pub previous_crop: String,
    pub soil_type: String,
    pub season: String,
}

impl CategoricalTriple {
    /// Build from values that are already canonical
    pub fn new(previous_crop: &str, soil_type: &str, season: &str) -> Self {
        Self {
            previous_crop: previous_crop.to_string(),
            soil_type: soil_type.to_string(),
            season: season.to_string(),
        }
    }

    /// Canonicalize raw user input
    pub fn from_raw(previous_crop: &str, soil_type: &str, season: &str) -> Self {
        Self {
            previous_crop: canonicalize(previous_crop),
            soil_type: canonicalize(soil_type),
            season: canonicalize(season),
        }
    }
}

/// Rotation request body; absent or null fields count as empty strings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RotationRequest {
    pub previous_crop: Option<String>,
    pub soil_type: Option<String>,
    pub season: Option<String>,
}

impl RotationRequest {
    pub fn to_triple(&self) -> CategoricalTriple {
        CategoricalTriple::from_raw(
            self.previous_crop.as_deref().unwrap_or(""),
            self.soil_type.as_deref().unwrap_or(""),
            self.season.as_deref().unwrap_or(""),
        )
    }
}
