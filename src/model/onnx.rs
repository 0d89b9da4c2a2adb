//! ONNX-backed classifier (tract, pure Rust)

use std::path::Path;

use anyhow::{Context, Result};
use tract_onnx::prelude::*;

use super::{check_input_len, Classifier, ModelError};

type Plan = SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>;

/// Optimized, runnable ONNX graph with a fixed input shape
pub struct OnnxClassifier {
    plan: Plan,
    input_shape: Vec<usize>,
}

impl OnnxClassifier {
    /// Load and optimize an ONNX graph for a fixed input shape
    pub fn load(path: &Path, input_shape: &[usize]) -> Result<Self> {
        let shape: TVec<usize> = input_shape.iter().copied().collect();

        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .with_context(|| format!("Failed to read ONNX model: {:?}", path))?
            .with_input_fact(0, InferenceFact::dt_shape(f32::datum_type(), shape))?
            .into_optimized()
            .with_context(|| format!("Failed to optimize ONNX model: {:?}", path))?
            .into_runnable()?;

        tracing::info!("Loaded ONNX model {:?} (input {:?})", path, input_shape);

        Ok(Self {
            plan,
            input_shape: input_shape.to_vec(),
        })
    }
}

impl Classifier for OnnxClassifier {
    fn input_shape(&self) -> &[usize] {
        &self.input_shape
    }

    fn predict(&self, input: &[f32]) -> Result<Vec<f32>, ModelError> {
        check_input_len(self.input_len(), input)?;

        let tensor = Tensor::from_shape(&self.input_shape, input)
            .map_err(|e| ModelError::Inference(e.to_string()))?;
        let outputs = self
            .plan
            .run(tvec!(tensor.into()))
            .map_err(|e| ModelError::Inference(e.to_string()))?;

        let scores = outputs
            .first()
            .ok_or(ModelError::EmptyScores)?
            .to_array_view::<f32>()
            .map_err(|e| ModelError::Inference(e.to_string()))?;

        Ok(scores.iter().copied().collect())
    }
}
