//! Batch Disease Detection
//!
//! Classifies every .png/.jpg/.jpeg image in a folder and prints the
//! prediction, its cause and the detailed treatment plan.
//!
//! Run with: cargo run --bin detect_diseases -- <image-folder>
//! Uses the detailed knowledge base unless DISEASE_KB points elsewhere.

use std::fs;
use std::path::{Path, PathBuf};

use agri_oracle::data::load_disease_detector;
use agri_oracle::utils::{allowed_file, init_tracing};
use agri_oracle::{ArtifactPaths, DiseaseKnowledgeBase};
use anyhow::{Context, Result};
use rayon::prelude::*;

fn is_image(path: &Path) -> bool {
    path.is_file()
        && path
            .file_name()
            .and_then(|n| n.to_str())
            .map_or(false, allowed_file)
}

fn main() -> Result<()> {
    init_tracing("agri_oracle=warn");

    let folder = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("Usage: detect_diseases <image-folder>")?;

    let paths = ArtifactPaths::from_env();
    let knowledge = match &paths.disease_kb {
        Some(path) => DiseaseKnowledgeBase::load(path)?,
        None => DiseaseKnowledgeBase::embedded_detailed()?,
    };
    let detector = load_disease_detector(&paths, knowledge)?;

    let mut images: Vec<PathBuf> = fs::read_dir(&folder)
        .with_context(|| format!("Failed to read folder: {:?}", folder))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| is_image(p))
        .collect();
    images.sort();

    tracing::info!("Classifying {} images in {:?}", images.len(), folder);

    // Inference in parallel, reporting in sorted order
    let results: Vec<_> = images
        .par_iter()
        .map(|path| (path, detector.diagnose_path(path)))
        .collect();

    let mut failures = 0;
    for (path, result) in results {
        let filename = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        println!();
        println!("Processing {}", filename);

        match result {
            Ok(prediction) => {
                println!("Prediction: {}", prediction.label);
                println!("Reason: {}", prediction.reason);
                println!("Cure / Treatment:\n{}", prediction.cure);
            }
            Err(e) => {
                failures += 1;
                println!("Skipped: {:#}", e);
            }
        }
        println!("{}", "-".repeat(80));
    }

    if failures > 0 {
        tracing::warn!("{} of {} images could not be classified", failures, images.len());
    }

    Ok(())
}
