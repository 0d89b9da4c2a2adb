use serde::{Deserialize, Serialize};

/// Rule block a reasoning fragment came from, in composition order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    Nutrient,
    Soil,
    Season,
    PestCycle,
}

/// One sentence appended by a rule block (text carries its trailing space)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReasoningFragment {
    pub category: RuleCategory,
    pub text: &'static str,
}

impl ReasoningFragment {
    pub fn new(category: RuleCategory, text: &'static str) -> Self {
        Self { category, text }
    }
}

/// Wording for every fragment the composer can emit
///
/// Rule conditions never depend on the phrasebook; only the sentences do.
#[derive(Debug)]
pub struct Phrasebook {
    pub nitrogen_depleted: &'static str,
    pub nitrogen_fixed: &'static str,
    pub clay_soil: &'static str,
    pub sandy_soil: &'static str,
    pub loam_soil: &'static str,
    pub kharif_season: &'static str,
    pub rabi_season: &'static str,
    pub pest_cycle: &'static str,
    pub fallback: &'static str,
}

/// Short wording returned by the HTTP API
pub static CONCISE_PHRASES: Phrasebook = Phrasebook {
    nitrogen_depleted: "The previous crop depleted nitrogen, so the suggested crop helps restore soil fertility. ",
    nitrogen_fixed: "The previous crop fixed nitrogen, enriching the soil. ",
    clay_soil: "Clay soil retains moisture well, suitable for this crop. ",
    sandy_soil: "Sandy soil drains fast; suggested crop is drought-tolerant. ",
    loam_soil: "Loam soil supports a wide variety of crops. ",
    kharif_season: "This crop thrives in monsoon (Kharif) conditions. ",
    rabi_season: "This crop is suitable for cool, dry (Rabi) season. ",
    pest_cycle: "This rotation disrupts pests and diseases. ",
    fallback: "This crop maintains soil health and supports sustainable yield.",
};

/// Longer wording printed by the interactive CLI
pub static DETAILED_PHRASES: Phrasebook = Phrasebook {
    nitrogen_depleted: "The previous crop depleted nitrogen, so the suggested crop helps restore soil fertility. ",
    nitrogen_fixed: "Since the previous crop fixed nitrogen, the suggested crop can utilize the enriched soil. ",
    clay_soil: "Clay soil retains moisture well, so the suggested crop is chosen for its ability to grow in such conditions. ",
    sandy_soil: "Sandy soil drains quickly, so the suggested crop is drought-resistant and suited for dry conditions. ",
    loam_soil: "Loam soil is balanced, making it suitable for a variety of crops, and the suggested crop makes the best use of this soil type. ",
    kharif_season: "The suggested crop thrives in the monsoon season, benefiting from ample water availability. ",
    rabi_season: "The suggested crop is ideal for cooler temperatures and lower water availability. ",
    pest_cycle: "This rotation disrupts the cycle of pests and diseases, reducing the risk of infestations. ",
    fallback: "The suggested crop helps maintain soil health by improving organic matter content and reducing soil fatigue. \
It also supports better water and nutrient retention, ensuring sustainable productivity for the next season.",
};

/// Which phrasebook a composer uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasoningStyle {
    #[default]
    Concise,
    Detailed,
}

impl ReasoningStyle {
    pub fn phrasebook(self) -> &'static Phrasebook {
        match self {
            ReasoningStyle::Concise => &CONCISE_PHRASES,
            ReasoningStyle::Detailed => &DETAILED_PHRASES,
        }
    }
}
