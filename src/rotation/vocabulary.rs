//! Input vocabulary the rotation model was trained on
//!
//! Values outside these lists are still forwarded to the encoder, which
//! decides whether it can encode them.

pub const PREVIOUS_CROPS: &[&str] = &[
    "Rice", "Wheat", "Potato", "Tomato", "Corn", "Barley", "Peas", "Soybean",
    "Sugarcane", "Cotton", "Groundnut", "Millet", "Maize",
];

pub const SOIL_TYPES: &[&str] = &["Clay", "Loam", "Sandy"];

pub const SEASONS: &[&str] = &["Kharif", "Rabi"];

/// Case-insensitive vocabulary membership
pub fn is_known(vocabulary: &[&str], value: &str) -> bool {
    vocabulary.iter().any(|v| v.eq_ignore_ascii_case(value))
}

/// Prompt hint listing a vocabulary, e.g. `"Clay/Loam/Sandy"`
pub fn choices(vocabulary: &[&str]) -> String {
    vocabulary.join("/")
}
