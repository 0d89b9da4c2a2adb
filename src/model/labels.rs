//! Inverse label encoding for the rotation classifier
//!
//! Maps a class-score vector back to the crop label it was trained on. The
//! vocabulary comes from a JSON artifact: `{"classes": ["Barley", "Corn", ...]}`.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use super::{argmax, ModelError};

/// Fitted label vocabulary, in class-index order
#[derive(Debug, Clone, Deserialize)]
pub struct LabelDecoder {
    classes: Vec<String>,
}

impl LabelDecoder {
    pub fn new(classes: Vec<String>) -> Result<Self> {
        if classes.is_empty() {
            bail!("label vocabulary is empty");
        }
        Ok(Self { classes })
    }

    /// Load the label vocabulary from its JSON artifact
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read label encoder: {:?}", path))?;
        Self::from_json(&contents)
            .with_context(|| format!("Invalid label encoder: {:?}", path))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let decoder: LabelDecoder = serde_json::from_str(json)?;
        Self::new(decoder.classes)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Label for the highest-scoring class
    ///
    /// The score vector must have exactly one entry per class.
    pub fn inverse_transform(&self, scores: &[f32]) -> Result<&str, ModelError> {
        if scores.len() != self.classes.len() {
            return Err(ModelError::ScoreWidth {
                expected: self.classes.len(),
                actual: scores.len(),
            });
        }
        let idx = argmax(scores).ok_or(ModelError::EmptyScores)?;
        Ok(&self.classes[idx])
    }
}
