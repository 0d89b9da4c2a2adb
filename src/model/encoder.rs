//! Categorical feature encoder
//!
//! One-hot encodes the canonical (previous_crop, soil_type, season) triple in
//! the column order it was fitted with. The fitted categories come from a
//! JSON artifact:
//!
//! ```json
//! {
//!   "columns": ["previous_crop", "soil_type", "season"],
//!   "categories": [["Corn", "Rice", "Wheat"], ["Clay", "Loam", "Sandy"], ["Kharif", "Rabi"]]
//! }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use super::ModelError;
use crate::rotation::CategoricalTriple;

/// Fitted one-hot encoder
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureEncoder {
    columns: Vec<String>,
    categories: Vec<Vec<String>>,
}

impl FeatureEncoder {
    /// Build an encoder from already-fitted columns and categories
    pub fn new(columns: Vec<String>, categories: Vec<Vec<String>>) -> Result<Self> {
        let encoder = Self { columns, categories };
        encoder.validate()?;
        Ok(encoder)
    }

    /// Load a fitted encoder from its JSON artifact
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read feature encoder: {:?}", path))?;
        Self::from_json(&contents)
            .with_context(|| format!("Invalid feature encoder: {:?}", path))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let encoder: FeatureEncoder = serde_json::from_str(json)?;
        encoder.validate()?;
        Ok(encoder)
    }

    fn validate(&self) -> Result<()> {
        if self.columns.len() != self.categories.len() {
            bail!(
                "{} columns but {} category lists",
                self.columns.len(),
                self.categories.len()
            );
        }
        if let Some(idx) = self.categories.iter().position(|c| c.is_empty()) {
            bail!("column '{}' has no categories", self.columns[idx]);
        }
        Ok(())
    }

    /// Column names in fitted order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Fitted categories for each column
    pub fn categories(&self) -> &[Vec<String>] {
        &self.categories
    }

    /// Length of the encoded feature vector
    pub fn width(&self) -> usize {
        self.categories.iter().map(Vec::len).sum()
    }

    /// Encode one row of raw values, one value per fitted column
    ///
    /// Category matching is exact; callers canonicalize first.
    pub fn transform(&self, values: &[&str]) -> Result<Vec<f32>, ModelError> {
        if values.len() != self.columns.len() {
            return Err(ModelError::InputShape {
                expected: self.columns.len(),
                actual: values.len(),
            });
        }

        let mut features = vec![0.0f32; self.width()];
        let mut offset = 0;
        for ((column, categories), value) in
            self.columns.iter().zip(&self.categories).zip(values)
        {
            let position = categories
                .iter()
                .position(|c| c == value)
                .ok_or_else(|| ModelError::UnknownCategory {
                    column: column.clone(),
                    value: value.to_string(),
                })?;
            features[offset + position] = 1.0;
            offset += categories.len();
        }

        Ok(features)
    }

    /// Encode a canonical triple in (previous_crop, soil_type, season) order
    pub fn transform_triple(&self, triple: &CategoricalTriple) -> Result<Vec<f32>, ModelError> {
        self.transform(&[
            triple.previous_crop.as_str(),
            triple.soil_type.as_str(),
            triple.season.as_str(),
        ])
    }
}
