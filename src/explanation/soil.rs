use crate::explanation::types::{Phrasebook, ReasoningFragment, RuleCategory};

/// Check soil texture suitability
///
/// Exact match on Clay, Sandy or Loam; anything else contributes nothing.
pub fn check_soil_type(soil_type: &str, phrases: &Phrasebook) -> Option<ReasoningFragment> {
    let text = match soil_type {
        "Clay" => phrases.clay_soil,
        "Sandy" => phrases.sandy_soil,
        "Loam" => phrases.loam_soil,
        _ => return None,
    };
    Some(ReasoningFragment::new(RuleCategory::Soil, text))
}
