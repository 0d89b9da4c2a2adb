use crate::explanation::types::{Phrasebook, ReasoningFragment, RuleCategory};

/// Heavy feeders that leave the soil short of nitrogen
pub const NITROGEN_DEPLETING_CROPS: &[&str] = &["Wheat", "Corn", "Rice", "Maize", "Sugarcane"];

/// Legumes that leave fixed nitrogen behind
pub const NITROGEN_FIXING_CROPS: &[&str] = &["Peas", "Lentils", "Soybean", "Groundnut"];

/// Check nitrogen balance left by the previous crop
///
/// Depletion is checked first; the two lists are disjoint so at most one
/// fragment is returned.
pub fn check_nitrogen_balance(previous_crop: &str, phrases: &Phrasebook) -> Option<ReasoningFragment> {
    if NITROGEN_DEPLETING_CROPS.contains(&previous_crop) {
        Some(ReasoningFragment::new(RuleCategory::Nutrient, phrases.nitrogen_depleted))
    } else if NITROGEN_FIXING_CROPS.contains(&previous_crop) {
        Some(ReasoningFragment::new(RuleCategory::Nutrient, phrases.nitrogen_fixed))
    } else {
        None
    }
}
