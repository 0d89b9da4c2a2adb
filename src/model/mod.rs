//! Opaque model boundary
//!
//! Every pretrained artifact (rotation classifier, disease classifier) is used
//! through the narrow [`Classifier`] trait: a fixed-shape `f32` input goes in,
//! a vector of class scores comes out. The fitted encoders around the
//! rotation classifier live here too:
//! - `encoder`: categorical triple -> one-hot feature vector
//! - `labels`: class scores -> label (inverse label encoding)
//! - `onnx`: tract-backed [`Classifier`] for ONNX graphs

pub mod encoder;
pub mod labels;
pub mod onnx;

pub use encoder::FeatureEncoder;
pub use labels::LabelDecoder;
pub use onnx::OnnxClassifier;

use thiserror::Error;

/// Errors raised at the model boundary
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown category '{value}' for column '{column}'")]
    UnknownCategory { column: String, value: String },

    #[error("expected {expected} input values, got {actual}")]
    InputShape { expected: usize, actual: usize },

    #[error("classifier returned {actual} scores, label vocabulary has {expected}")]
    ScoreWidth { expected: usize, actual: usize },

    #[error("classifier returned no scores")]
    EmptyScores,

    #[error("inference failed: {0}")]
    Inference(String),
}

/// Fixed-shape numeric classifier
///
/// Implementations are loaded once and shared read-only across requests.
pub trait Classifier: Send + Sync {
    /// Input shape including the batch dimension, e.g. `[1, 224, 224, 3]`
    fn input_shape(&self) -> &[usize];

    /// Run one forward pass and return the flattened class scores
    fn predict(&self, input: &[f32]) -> Result<Vec<f32>, ModelError>;

    /// Number of `f32` values `predict` expects
    fn input_len(&self) -> usize {
        self.input_shape().iter().product()
    }
}

/// Index of the highest score; the first maximum wins on ties
///
/// NaN scores never win. Returns None for an empty or all-NaN slice.
pub fn argmax(scores: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (idx, &score) in scores.iter().enumerate() {
        if score.is_nan() {
            continue;
        }
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((idx, score)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// Check an input buffer against a classifier's declared shape
pub(crate) fn check_input_len(expected: usize, input: &[f32]) -> Result<(), ModelError> {
    if input.len() != expected {
        return Err(ModelError::InputShape {
            expected,
            actual: input.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argmax_picks_highest() {
        assert_eq!(argmax(&[0.1, 0.7, 0.2]), Some(1));
        assert_eq!(argmax(&[-3.0, -1.0, -2.0]), Some(1));
    }

    #[test]
    fn test_argmax_first_maximum_wins() {
        assert_eq!(argmax(&[0.4, 0.4, 0.2]), Some(0));
        assert_eq!(argmax(&[0.1, 0.5, 0.5]), Some(1));
    }

    #[test]
    fn test_argmax_ignores_nan() {
        assert_eq!(argmax(&[f32::NAN, 0.2, 0.1]), Some(1));
        assert_eq!(argmax(&[f32::NAN, f32::NAN]), None);
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn test_check_input_len() {
        assert!(check_input_len(3, &[0.0, 1.0, 0.0]).is_ok());
        let err = check_input_len(3, &[0.0]).unwrap_err();
        assert!(err.to_string().contains("expected 3 input values, got 1"));
    }
}
