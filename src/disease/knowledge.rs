//! Disease knowledge base
//!
//! Ordered class labels plus label -> cause and label -> treatment texts.
//! Loaded once at startup from JSON (embedded default or a file on disk) and
//! never mutated afterwards.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use rustc_hash::FxHashMap;
use serde::Deserialize;

use super::DiseasePrediction;

/// Label reported when the predicted index is outside the vocabulary
pub const UNKNOWN_CLASS: &str = "Unknown Class";
pub const REASON_NOT_AVAILABLE: &str = "Reason not available.";
pub const CURE_NOT_AVAILABLE: &str = "Cure not available.";

/// Short texts served by the HTTP API
const EMBEDDED_CONCISE: &str = include_str!("../../data/disease_knowledge.json");
/// Bullet-list treatments printed by the batch CLI
const EMBEDDED_DETAILED: &str = include_str!("../../data/disease_knowledge_detailed.json");

fn default_reason() -> String {
    REASON_NOT_AVAILABLE.to_string()
}

fn default_cure() -> String {
    CURE_NOT_AVAILABLE.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiseaseKnowledgeBase {
    /// Class labels in model output order
    labels: Vec<String>,
    reasons: FxHashMap<String, String>,
    cures: FxHashMap<String, String>,
    #[serde(default = "default_reason")]
    default_reason: String,
    #[serde(default = "default_cure")]
    default_cure: String,
}

impl DiseaseKnowledgeBase {
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_CONCISE).context("Invalid embedded disease knowledge base")
    }

    pub fn embedded_detailed() -> Result<Self> {
        Self::from_json(EMBEDDED_DETAILED).context("Invalid embedded detailed knowledge base")
    }

    /// Load a knowledge base from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read disease knowledge base: {:?}", path))?;
        Self::from_json(&contents)
            .with_context(|| format!("Invalid disease knowledge base: {:?}", path))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let kb: DiseaseKnowledgeBase = serde_json::from_str(json)?;
        if kb.labels.is_empty() {
            bail!("knowledge base has no class labels");
        }
        for label in kb.missing_entries() {
            tracing::warn!("No reason/cure entry for class '{}'", label);
        }
        Ok(kb)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn reason(&self, label: &str) -> &str {
        self.reasons.get(label).map(String::as_str).unwrap_or(self.default_reason.as_str())
    }

    pub fn cure(&self, label: &str) -> &str {
        self.cures.get(label).map(String::as_str).unwrap_or(self.default_cure.as_str())
    }

    /// Labels lacking a reason or a cure entry
    pub fn missing_entries(&self) -> Vec<&str> {
        self.labels
            .iter()
            .filter(|l| !self.reasons.contains_key(*l) || !self.cures.contains_key(*l))
            .map(String::as_str)
            .collect()
    }

    /// Map a predicted class index to label, reason and cure
    pub fn lookup(&self, class_index: usize) -> DiseasePrediction {
        match self.labels.get(class_index) {
            Some(label) => DiseasePrediction {
                label: label.clone(),
                reason: self.reason(label).to_string(),
                cure: self.cure(label).to_string(),
            },
            None => DiseasePrediction {
                label: UNKNOWN_CLASS.to_string(),
                reason: self.default_reason.clone(),
                cure: self.default_cure.clone(),
            },
        }
    }
}
