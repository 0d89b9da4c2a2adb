// Axum API Server Module
//
// Purpose: HTTP surface for disease diagnosis (image upload) and crop rotation
// recommendation. Models are loaded once into AppState and shared read-only.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{
        multipart::{Multipart, MultipartError, MultipartRejection},
        rejection::JsonRejection,
        DefaultBodyLimit, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::data::{load_disease_detector, load_knowledge_base, load_rotation_recommender};
use crate::disease::DiseaseDetector;
use crate::rotation::{CropRotationRecommender, Recommendation, RotationRequest};
use crate::utils::{allowed_file, unique_upload_name};

/// URL prefix uploaded images are served under
pub const UPLOADS_URL_PREFIX: &str = "/static/uploads";

const INVALID_FILE_TYPE: &str = "Invalid file type. Only images are allowed.";
const NO_FILE_SELECTED: &str = "No file selected";

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<CropRotationRecommender>,
    pub detector: Arc<DiseaseDetector>,
    pub upload_dir: Arc<PathBuf>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(
        recommender: CropRotationRecommender,
        detector: DiseaseDetector,
        upload_dir: PathBuf,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            recommender: Arc::new(recommender),
            detector: Arc::new(detector),
            upload_dir: Arc::new(upload_dir),
            max_upload_bytes,
        }
    }

    /// Create the upload directory and load every artifact named in `config`
    pub fn load(config: &ServerConfig) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&config.upload_dir)?;

        tracing::info!("Loading disease knowledge base...");
        let knowledge = load_knowledge_base(&config.artifacts)?;

        tracing::info!("Loading disease classifier...");
        let detector = load_disease_detector(&config.artifacts, knowledge)?;

        tracing::info!("Loading crop rotation model and encoders...");
        let recommender = load_rotation_recommender(&config.artifacts)?;

        Ok(Self::new(
            recommender,
            detector,
            config.upload_dir.clone(),
            config.max_upload_bytes,
        ))
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    let uploads = ServeDir::new(state.upload_dir.as_path());

    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/predict_disease", post(predict_disease))
        .route("/recommend_crop", post(recommend_crop))
        // Stored uploads, referenced by image_url in disease responses
        .nest_service(UPLOADS_URL_PREFIX, uploads)
        // Middleware (applied in reverse order)
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn index() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "API is running"
    }))
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Uploaded file part: client filename + raw bytes
struct Upload {
    filename: String,
    bytes: Vec<u8>,
}

/// Read the `file` part; parts without a filename are not files
///
/// The filename is validated before the body is buffered, so rejected
/// uploads are never read in full.
async fn read_upload(multipart: &mut Multipart) -> Result<Upload, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };

        if filename.is_empty() {
            return Err(AppError::BadRequest(NO_FILE_SELECTED.to_string()));
        }
        if !allowed_file(&filename) {
            tracing::warn!("Rejected upload '{}'", filename);
            return Err(AppError::BadRequest(INVALID_FILE_TYPE.to_string()));
        }

        let bytes = field.bytes().await?.to_vec();
        return Ok(Upload { filename, bytes });
    }

    Err(AppError::BadRequest(INVALID_FILE_TYPE.to_string()))
}

/// POST /predict_disease (multipart field `file`)
async fn predict_disease(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut multipart = multipart.map_err(|rejection| {
        tracing::warn!("Disease request without multipart body: {}", rejection);
        AppError::BadRequest(INVALID_FILE_TYPE.to_string())
    })?;
    let upload = read_upload(&mut multipart).await?;

    // A saved file stays on disk even if classification fails below
    let unique_name = unique_upload_name(&upload.filename);
    let save_path = state.upload_dir.join(&unique_name);
    tokio::fs::write(&save_path, &upload.bytes)
        .await
        .map_err(|e| AppError::internal(anyhow::Error::from(e).context(format!("Failed to save upload {:?}", save_path))))?;

    tracing::info!("Saved upload '{}' as {}", upload.filename, unique_name);

    // CPU-bound work: run in blocking thread pool
    let detector = state.detector.clone();
    let prediction = tokio::task::spawn_blocking(move || detector.diagnose_path(&save_path))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?
        .map_err(AppError::internal)?;

    Ok(Json(serde_json::json!({
        "prediction": prediction.label,
        "reason": prediction.reason,
        "cure": prediction.cure,
        "image_url": format!("{}/{}", UPLOADS_URL_PREFIX, unique_name),
    })))
}

/// POST /recommend_crop (JSON body; absent fields count as empty strings)
async fn recommend_crop(
    State(state): State<AppState>,
    payload: Result<Json<RotationRequest>, JsonRejection>,
) -> Result<Json<Recommendation>, AppError> {
    let Json(request) = payload?;

    // CPU-bound work: run in blocking thread pool
    let recommender = state.recommender.clone();
    let recommendation = tokio::task::spawn_blocking(move || recommender.recommend_request(&request))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?
        .map_err(AppError::internal)?;

    Ok(Json(recommendation))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    /// Extractor failures keep the status axum assigned (413, 415, 422, ...)
    Rejected(StatusCode, String),
    Internal(String),
}

impl AppError {
    /// Internal failure carrying the full error chain as its message
    fn internal(err: anyhow::Error) -> Self {
        tracing::error!("Error: {:#}", err);
        AppError::Internal(format!("{:#}", err))
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::Rejected(err.status(), err.body_text())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Rejected(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Rejected(status, msg) => (status, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
