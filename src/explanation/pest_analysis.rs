use crate::explanation::types::{Phrasebook, ReasoningFragment, RuleCategory};

/// (previous crop, next crop) rotations known to break pest and disease cycles
///
/// Some next crops (Lentils, Mustard, Oats) are outside the input vocabulary;
/// they are valid model outputs and the list is kept as is.
pub const PEST_BREAKING_ROTATIONS: &[(&str, &str)] = &[
    ("Rice", "Wheat"),
    ("Wheat", "Lentils"),
    ("Peas", "Corn"),
    ("Soybean", "Barley"),
    ("Maize", "Mustard"),
    ("Sugarcane", "Oats"),
];

/// Check whether the rotation interrupts a pest/disease cycle
///
/// Order matters: (Wheat, Rice) is not the same rotation as (Rice, Wheat).
pub fn check_pest_cycle(
    previous_crop: &str,
    predicted_crop: &str,
    phrases: &Phrasebook,
) -> Option<ReasoningFragment> {
    PEST_BREAKING_ROTATIONS
        .iter()
        .any(|&(prev, next)| prev == previous_crop && next == predicted_crop)
        .then(|| ReasoningFragment::new(RuleCategory::PestCycle, phrases.pest_cycle))
}
