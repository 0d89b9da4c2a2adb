//! Rotation recommender: encoder + classifier + label decoder + composer

use std::sync::Arc;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use super::vocabulary::{self, PREVIOUS_CROPS, SEASONS, SOIL_TYPES};
use super::{CategoricalTriple, RotationRequest};
use crate::explanation::{ReasoningComposer, ReasoningStyle};
use crate::model::{Classifier, FeatureEncoder, LabelDecoder};

/// Predicted next crop with its justification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub recommended_crop: String,
    pub reasoning: String,
}

/// Loaded once at startup; read-only afterwards
pub struct CropRotationRecommender {
    encoder: FeatureEncoder,
    classifier: Arc<dyn Classifier>,
    labels: LabelDecoder,
    composer: ReasoningComposer,
}

impl CropRotationRecommender {
    /// Wire the fitted artifacts together
    ///
    /// Fails if the classifier input does not match the encoder width.
    pub fn new(
        encoder: FeatureEncoder,
        classifier: Arc<dyn Classifier>,
        labels: LabelDecoder,
    ) -> Result<Self> {
        if classifier.input_len() != encoder.width() {
            bail!(
                "rotation classifier expects {} features, encoder produces {}",
                classifier.input_len(),
                encoder.width()
            );
        }

        Ok(Self {
            encoder,
            classifier,
            labels,
            composer: ReasoningComposer::default(),
        })
    }

    /// Switch the reasoning wording (concise for the API, detailed for the CLI)
    pub fn with_style(mut self, style: ReasoningStyle) -> Self {
        self.composer = ReasoningComposer::new(style);
        self
    }

    pub fn labels(&self) -> &LabelDecoder {
        &self.labels
    }

    /// Predict the next crop for a canonical triple and explain it
    pub fn recommend(&self, triple: &CategoricalTriple) -> Result<Recommendation> {
        warn_unrecognized(triple);

        let features = self.encoder.transform_triple(triple)?;
        let scores = self.classifier.predict(&features)?;
        let predicted_crop = self.labels.inverse_transform(&scores)?.to_string();

        let reasoning = self.composer.compose(triple, &predicted_crop);

        tracing::info!(
            "Rotation {}/{}/{} -> {}",
            triple.previous_crop,
            triple.soil_type,
            triple.season,
            predicted_crop
        );

        Ok(Recommendation {
            recommended_crop: predicted_crop,
            reasoning,
        })
    }

    /// Canonicalize a raw request, then recommend
    pub fn recommend_request(&self, request: &RotationRequest) -> Result<Recommendation> {
        self.recommend(&request.to_triple())
    }
}

fn warn_unrecognized(triple: &CategoricalTriple) {
    let fields = [
        ("previous_crop", triple.previous_crop.as_str(), PREVIOUS_CROPS),
        ("soil_type", triple.soil_type.as_str(), SOIL_TYPES),
        ("season", triple.season.as_str(), SEASONS),
    ];
    for (name, value, known) in fields {
        if !vocabulary::is_known(known, value) {
            tracing::warn!("Unrecognized {} '{}' forwarded to encoder", name, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Always scores one fixed class highest
    struct FixedClassifier {
        shape: Vec<usize>,
        winner: usize,
        classes: usize,
        calls: AtomicUsize,
    }

    impl FixedClassifier {
        fn new(width: usize, classes: usize, winner: usize) -> Self {
            Self {
                shape: vec![1, width],
                winner,
                classes,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl Classifier for FixedClassifier {
        fn input_shape(&self) -> &[usize] {
            &self.shape
        }

        fn predict(&self, input: &[f32]) -> Result<Vec<f32>, ModelError> {
            crate::model::check_input_len(self.input_len(), input)?;
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut scores = vec![0.0; self.classes];
            scores[self.winner] = 1.0;
            Ok(scores)
        }
    }

    fn encoder() -> FeatureEncoder {
        FeatureEncoder::new(
            vec!["previous_crop".into(), "soil_type".into(), "season".into()],
            vec![
                vec!["Peas".into(), "Rice".into(), "Tomato".into()],
                vec!["Clay".into(), "Loam".into(), "Sandy".into()],
                vec!["Kharif".into(), "Rabi".into()],
            ],
        )
        .unwrap()
    }

    fn labels() -> LabelDecoder {
        LabelDecoder::new(vec!["Barley".into(), "Corn".into(), "Wheat".into()]).unwrap()
    }

    #[test]
    fn test_recommend_peas_to_corn() {
        let classifier = Arc::new(FixedClassifier::new(8, 3, 1));
        let recommender = CropRotationRecommender::new(encoder(), classifier.clone(), labels()).unwrap();

        let rec = recommender
            .recommend(&CategoricalTriple::from_raw("peas", "sandy", "KHARIF"))
            .unwrap();

        assert_eq!(rec.recommended_crop, "Corn");
        assert!(rec.reasoning.contains("fixed nitrogen"));
        assert!(rec.reasoning.contains("drought-tolerant"));
        assert!(rec.reasoning.contains("monsoon"));
        assert!(rec.reasoning.ends_with("This rotation disrupts pests and diseases. "));
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unknown_category_surfaces_error() {
        let classifier = Arc::new(FixedClassifier::new(8, 3, 0));
        let recommender = CropRotationRecommender::new(encoder(), classifier.clone(), labels()).unwrap();

        let request = RotationRequest {
            previous_crop: Some("Rice".into()),
            ..Default::default()
        };
        let err = recommender.recommend_request(&request).unwrap_err();

        assert!(err.to_string().contains("unknown category"));
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_detailed_style() {
        let classifier = Arc::new(FixedClassifier::new(8, 3, 2));
        let recommender = CropRotationRecommender::new(encoder(), classifier, labels())
            .unwrap()
            .with_style(ReasoningStyle::Detailed);

        let rec = recommender
            .recommend(&CategoricalTriple::new("Rice", "Clay", "Rabi"))
            .unwrap();

        assert_eq!(rec.recommended_crop, "Wheat");
        assert!(rec.reasoning.contains("chosen for its ability to grow"));
        assert!(rec.reasoning.contains("reducing the risk of infestations"));
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let classifier = Arc::new(FixedClassifier::new(5, 3, 0));
        assert!(CropRotationRecommender::new(encoder(), classifier, labels()).is_err());
    }
}
