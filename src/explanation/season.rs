use crate::explanation::types::{Phrasebook, ReasoningFragment, RuleCategory};

/// Check season suitability (Kharif = monsoon, Rabi = cool dry season)
pub fn check_season(season: &str, phrases: &Phrasebook) -> Option<ReasoningFragment> {
    let text = match season {
        "Kharif" => phrases.kharif_season,
        "Rabi" => phrases.rabi_season,
        _ => return None,
    };
    Some(ReasoningFragment::new(RuleCategory::Season, text))
}
