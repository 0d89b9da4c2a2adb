use crate::explanation::types::{Phrasebook, ReasoningFragment, ReasoningStyle};
use crate::explanation::{check_nitrogen_balance, check_pest_cycle, check_season, check_soil_type};
use crate::rotation::CategoricalTriple;

/// Composes the natural-language justification for a predicted rotation
///
/// Pure: the same triple and predicted crop always produce the same text.
#[derive(Debug, Clone, Copy)]
pub struct ReasoningComposer {
    phrases: &'static Phrasebook,
}

impl Default for ReasoningComposer {
    fn default() -> Self {
        Self::new(ReasoningStyle::Concise)
    }
}

impl ReasoningComposer {
    pub fn new(style: ReasoningStyle) -> Self {
        Self {
            phrases: style.phrasebook(),
        }
    }

    pub fn phrasebook(&self) -> &'static Phrasebook {
        self.phrases
    }

    /// Run the four rule blocks in fixed order: nutrient, soil, season, pest cycle
    pub fn fragments(&self, triple: &CategoricalTriple, predicted_crop: &str) -> Vec<ReasoningFragment> {
        [
            check_nitrogen_balance(&triple.previous_crop, self.phrases),
            check_soil_type(&triple.soil_type, self.phrases),
            check_season(&triple.season, self.phrases),
            check_pest_cycle(&triple.previous_crop, predicted_crop, self.phrases),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Concatenated fragments, or the fallback sentence when none applied
    pub fn compose(&self, triple: &CategoricalTriple, predicted_crop: &str) -> String {
        let fragments = self.fragments(triple, predicted_crop);
        if fragments.is_empty() {
            return self.phrases.fallback.to_string();
        }
        fragments.iter().map(|f| f.text).collect()
    }
}

/// Compose reasoning with the concise (API) wording
pub fn compose_reasoning(triple: &CategoricalTriple, predicted_crop: &str) -> String {
    ReasoningComposer::default().compose(triple, predicted_crop)
}
