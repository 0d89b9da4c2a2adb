//! Interactive Crop Rotation Recommendation
//!
//! Prompts for the last crop, soil type and season, then prints the
//! recommended next crop with detailed reasoning.
//!
//! Run with: cargo run --bin recommend_crop
//! Artifacts are located via MODEL_DIR / ROTATION_MODEL / FEATURE_ENCODER / LABEL_ENCODER.

use std::io::{self, BufRead, Write};

use agri_oracle::data::load_rotation_recommender;
use agri_oracle::rotation::vocabulary::{choices, PREVIOUS_CROPS, SEASONS, SOIL_TYPES};
use agri_oracle::utils::init_tracing;
use agri_oracle::{ArtifactPaths, CategoricalTriple, ReasoningStyle};
use anyhow::Result;

/// Print a prompt and read one line; EOF reads as empty
fn prompt(input: &mut impl BufRead, message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line)
}

fn main() -> Result<()> {
    init_tracing("agri_oracle=warn");

    let paths = ArtifactPaths::from_env();
    let recommender = load_rotation_recommender(&paths)?.with_style(ReasoningStyle::Detailed);

    let stdin = io::stdin();
    let mut input = stdin.lock();

    let previous_crop = prompt(
        &mut input,
        &format!("Enter your last crop ({}): ", choices(PREVIOUS_CROPS)),
    )?;
    let soil_type = prompt(
        &mut input,
        &format!("Enter your soil type ({}): ", choices(SOIL_TYPES)),
    )?;
    let season = prompt(
        &mut input,
        &format!("Enter the season ({}): ", choices(SEASONS)),
    )?;

    let triple = CategoricalTriple::from_raw(&previous_crop, &soil_type, &season);
    let recommendation = recommender.recommend(&triple)?;

    println!();
    println!("AI Recommended Next Crop: {}", recommendation.recommended_crop);
    println!("Reason: {}", recommendation.reasoning);

    Ok(())
}
