//! Utility modules shared by the recommendation and disease pipelines
//!
//! - Normalization: canonical form for categorical inputs
//! - Uploads: filename validation and unique storage names
//! - Logging: tracing subscriber setup for the binaries

pub mod logging;
pub mod normalization;
pub mod uploads;

// Re-export commonly used functions
pub use logging::init_tracing;
pub use normalization::canonicalize;
pub use uploads::{allowed_file, file_extension, unique_upload_name, ALLOWED_EXTENSIONS};
