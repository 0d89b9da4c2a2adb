//! Image preprocessing for the disease classifier
//!
//! Decode -> RGB8 -> exact resize (bicubic) -> scale to [0, 1] -> NHWC.

use std::path::Path;

use anyhow::{Context, Result};
use image::{imageops::FilterType, DynamicImage};

/// Side length the disease classifier was trained on
pub const IMAGE_SIZE: u32 = 224;

/// Decode an image file (png/jpeg)
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).with_context(|| format!("Failed to open image: {:?}", path))
}

/// Flatten an image into a `[1, height, width, 3]` tensor buffer
///
/// Alpha is dropped; each channel is divided by 255.
pub fn preprocess_image(img: &DynamicImage, width: u32, height: u32) -> Vec<f32> {
    let rgb = img
        .resize_exact(width, height, FilterType::CatmullRom)
        .to_rgb8();

    let mut tensor = Vec::with_capacity((width * height * 3) as usize);
    for pixel in rgb.pixels() {
        tensor.extend(pixel.0.iter().map(|&c| c as f32 / 255.0));
    }
    tensor
}
