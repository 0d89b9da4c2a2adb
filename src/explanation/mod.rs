//! Rotation reasoning
//!
//! Four independent rule blocks (nutrient balance, soil texture, season, pest
//! cycle) each contribute at most one fragment; the generator concatenates
//! them in that fixed order or falls back to a single default sentence.

pub mod types;
pub mod nitrogen;
pub mod soil;
pub mod season;
pub mod pest_analysis;
pub mod generator;

pub use types::{
    Phrasebook, ReasoningFragment, ReasoningStyle, RuleCategory, CONCISE_PHRASES,
    DETAILED_PHRASES,
};

pub use nitrogen::check_nitrogen_balance;
pub use soil::check_soil_type;
pub use season::check_season;
pub use pest_analysis::check_pest_cycle;

pub use generator::{compose_reasoning, ReasoningComposer};
