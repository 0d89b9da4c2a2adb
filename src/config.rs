//! Environment-driven configuration
//!
//! Every setting has a default so the server starts with no environment at
//! all when the artifacts sit in `./models`.

use std::path::PathBuf;

/// Upload size cap for the disease endpoint (16 MB)
pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Filesystem locations of the pretrained artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub disease_model: PathBuf,
    pub rotation_model: PathBuf,
    pub feature_encoder: PathBuf,
    pub label_encoder: PathBuf,
    /// None -> embedded knowledge base
    pub disease_kb: Option<PathBuf>,
}

impl ArtifactPaths {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve paths through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let model_dir = PathBuf::from(lookup("MODEL_DIR").unwrap_or_else(|| "models".to_string()));
        let path_or = |key: &str, file: &str| {
            lookup(key)
                .map(PathBuf::from)
                .unwrap_or_else(|| model_dir.join(file))
        };

        Self {
            disease_model: path_or("DISEASE_MODEL", "disease_classifier.onnx"),
            rotation_model: path_or("ROTATION_MODEL", "crop_rotation.onnx"),
            feature_encoder: path_or("FEATURE_ENCODER", "feature_encoder.json"),
            label_encoder: path_or("LABEL_ENCODER", "label_encoder.json"),
            disease_kb: lookup("DISEASE_KB").map(PathBuf::from),
        }
    }
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub artifacts: ArtifactPaths,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(5000);

        let upload_dir = lookup("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("static/uploads"));

        Self {
            port,
            upload_dir,
            max_upload_bytes: MAX_UPLOAD_BYTES,
            artifacts: ArtifactPaths::from_lookup(lookup),
        }
    }

    pub fn log(&self) {
        tracing::info!("Configuration:");
        tracing::info!("  PORT: {}", self.port);
        tracing::info!("  UPLOAD_DIR: {:?}", self.upload_dir);
        tracing::info!("  DISEASE_MODEL: {:?}", self.artifacts.disease_model);
        tracing::info!("  ROTATION_MODEL: {:?}", self.artifacts.rotation_model);
        tracing::info!("  FEATURE_ENCODER: {:?}", self.artifacts.feature_encoder);
        tracing::info!("  LABEL_ENCODER: {:?}", self.artifacts.label_encoder);
        match &self.artifacts.disease_kb {
            Some(path) => tracing::info!("  DISEASE_KB: {:?}", path),
            None => tracing::info!("  DISEASE_KB: (embedded)"),
        }
    }
}
