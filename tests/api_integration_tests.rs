// API Integration Tests
//
// Purpose: Drive every endpoint through the router with stub classifiers
// Run with: cargo test --test api_integration_tests

#[cfg(feature = "api")]
mod api_tests {
    use std::io::Cursor;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use agri_oracle::model::ModelError;
    use agri_oracle::{
        create_router, AppState, Classifier, CropRotationRecommender, DiseaseDetector,
        DiseaseKnowledgeBase, FeatureEncoder, LabelDecoder,
    };
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
    use serde_json::Value;
    use tower::ServiceExt; // for oneshot

    const BOUNDARY: &str = "agri-oracle-test-boundary";

    /// Scores one fixed class highest and counts invocations
    struct StubClassifier {
        shape: Vec<usize>,
        classes: usize,
        winner: usize,
        calls: Arc<AtomicUsize>,
    }

    impl Classifier for StubClassifier {
        fn input_shape(&self) -> &[usize] {
            &self.shape
        }

        fn predict(&self, input: &[f32]) -> Result<Vec<f32>, ModelError> {
            if input.len() != self.input_len() {
                return Err(ModelError::InputShape {
                    expected: self.input_len(),
                    actual: input.len(),
                });
            }
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut scores = vec![0.0; self.classes];
            scores[self.winner] = 1.0;
            Ok(scores)
        }
    }

    struct TestApp {
        app: axum::Router,
        disease_calls: Arc<AtomicUsize>,
        rotation_calls: Arc<AtomicUsize>,
        _upload_dir: tempfile::TempDir,
        upload_path: std::path::PathBuf,
    }

    // Helper: app state with stub models; disease stub predicts "Wheat Black Rust",
    // rotation stub predicts "Corn"
    fn create_test_app(max_upload_bytes: usize) -> TestApp {
        let encoder = FeatureEncoder::from_json(
            r#"{
                "columns": ["previous_crop", "soil_type", "season"],
                "categories": [
                    ["Corn", "Peas", "Rice", "Tomato", "Wheat"],
                    ["Clay", "Loam", "Sandy"],
                    ["Kharif", "Rabi"]
                ]
            }"#,
        )
        .unwrap();
        let labels = LabelDecoder::from_json(r#"{"classes": ["Barley", "Corn", "Wheat"]}"#).unwrap();

        let rotation_calls = Arc::new(AtomicUsize::new(0));
        let rotation = StubClassifier {
            shape: vec![1, encoder.width()],
            classes: 3,
            winner: 1,
            calls: rotation_calls.clone(),
        };
        let recommender = CropRotationRecommender::new(encoder, Arc::new(rotation), labels).unwrap();

        let disease_calls = Arc::new(AtomicUsize::new(0));
        let disease = StubClassifier {
            shape: vec![1, 224, 224, 3],
            classes: 17,
            winner: 12,
            calls: disease_calls.clone(),
        };
        let detector =
            DiseaseDetector::new(Arc::new(disease), DiseaseKnowledgeBase::embedded().unwrap()).unwrap();

        let upload_dir = tempfile::tempdir().unwrap();
        let upload_path = upload_dir.path().to_path_buf();
        let state = AppState::new(recommender, detector, upload_path.clone(), max_upload_bytes);

        TestApp {
            app: create_router(state),
            disease_calls,
            rotation_calls,
            _upload_dir: upload_dir,
            upload_path,
        }
    }

    // Helper: Parse JSON response
    async fn json_response(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        serde_json::from_slice(&body).expect("Failed to parse JSON")
    }

    fn png_bytes() -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(32, 32, Rgb([90, 140, 60])));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png).unwrap();
        buf
    }

    fn multipart_request(field: &str, filename: Option<&str>, bytes: &[u8]) -> Request<Body> {
        let disposition = match filename {
            Some(name) => format!("form-data; name=\"{}\"; filename=\"{}\"", field, name),
            None => format!("form-data; name=\"{}\"", field),
        };

        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: {}\r\nContent-Type: application/octet-stream\r\n\r\n",
                BOUNDARY, disposition
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

        Request::builder()
            .method("POST")
            .uri("/predict_disease")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn json_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/recommend_crop")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn stored_files(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    // =========================================================================
    // Section 1: Index + Health
    // =========================================================================

    #[tokio::test]
    async fn test_index() {
        let test = create_test_app(16 * 1024 * 1024);

        let response = test
            .app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_response(response).await;
        assert_eq!(body["message"], "API is running");
    }

    #[tokio::test]
    async fn test_health_check() {
        let test = create_test_app(16 * 1024 * 1024);

        let response = test
            .app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_response(response).await;
        assert_eq!(body["status"], "healthy");
        assert!(body["timestamp"].is_string());
    }

    // =========================================================================
    // Section 2: Crop Rotation
    // =========================================================================

    #[tokio::test]
    async fn test_recommend_crop() {
        let test = create_test_app(16 * 1024 * 1024);

        let response = test
            .app
            .oneshot(json_request(
                r#"{"previous_crop": " peas", "soil_type": "SANDY", "season": "kharif"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_response(response).await;
        assert_eq!(body["recommended_crop"], "Corn");
        assert_eq!(
            body["reasoning"],
            "The previous crop fixed nitrogen, enriching the soil. \
             Sandy soil drains fast; suggested crop is drought-tolerant. \
             This crop thrives in monsoon (Kharif) conditions. \
             This rotation disrupts pests and diseases. "
        );
        assert_eq!(test.rotation_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_recommend_crop_skips_unmatched_rules() {
        let test = create_test_app(16 * 1024 * 1024);

        // Tomato is in neither nitrogen list and (Tomato, Corn) breaks no pest cycle
        let response = test
            .app
            .oneshot(json_request(
                r#"{"previous_crop": "tomato", "soil_type": "loam", "season": "rabi"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_response(response).await;
        assert_eq!(
            body["reasoning"],
            "Loam soil supports a wide variety of crops. This crop is suitable for cool, dry (Rabi) season. "
        );
    }

    #[tokio::test]
    async fn test_recommend_crop_missing_fields_is_server_error() {
        let test = create_test_app(16 * 1024 * 1024);

        let response = test
            .app
            .oneshot(json_request(r#"{"previous_crop": "Wheat"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_response(response).await;
        let error = body["error"].as_str().unwrap();
        assert!(error.contains("unknown category"), "got: {}", error);
        assert_eq!(test.rotation_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_recommend_crop_malformed_json() {
        let test = create_test_app(16 * 1024 * 1024);

        let response = test
            .app
            .oneshot(json_request("{not json"))
            .await
            .unwrap();

        assert!(response.status().is_client_error());
        let body = json_response(response).await;
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_recommend_crop_wrong_types_are_client_errors() {
        for body in ["null", r#"{"previous_crop": 5, "soil_type": "Loam", "season": "Rabi"}"#] {
            let test = create_test_app(16 * 1024 * 1024);

            let response = test.app.oneshot(json_request(body)).await.unwrap();

            assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "body: {}", body);
            let json = json_response(response).await;
            assert!(json["error"].as_str().unwrap().contains("invalid type"));
            assert_eq!(test.rotation_calls.load(Ordering::SeqCst), 0);
        }
    }

    // =========================================================================
    // Section 3: Disease Detection
    // =========================================================================

    #[tokio::test]
    async fn test_predict_disease() {
        let test = create_test_app(16 * 1024 * 1024);

        let response = test
            .app
            .clone()
            .oneshot(multipart_request("file", Some("leaf.PNG"), &png_bytes()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_response(response).await;
        assert_eq!(body["prediction"], "Wheat Black Rust");
        assert!(body["reason"].as_str().unwrap().contains("Puccinia graminis"));
        assert!(body["cure"].as_str().unwrap().contains("fungicides"));
        assert_eq!(test.disease_calls.load(Ordering::SeqCst), 1);

        let image_url = body["image_url"].as_str().unwrap();
        assert!(image_url.starts_with("/static/uploads/"));
        assert!(image_url.ends_with(".PNG"));

        // Stored upload is served back at image_url
        let stored = test.upload_path.join(image_url.trim_start_matches("/static/uploads/"));
        assert!(stored.exists());

        let response = test
            .app
            .oneshot(Request::builder().uri(image_url).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_disallowed_extension_never_reaches_model() {
        let test = create_test_app(16 * 1024 * 1024);

        let response = test
            .app
            .oneshot(multipart_request("file", Some("malware.exe"), b"MZ\x90\x00"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_response(response).await;
        assert_eq!(body["error"], "Invalid file type. Only images are allowed.");
        assert_eq!(test.disease_calls.load(Ordering::SeqCst), 0);
        assert_eq!(stored_files(&test.upload_path), 0);
    }

    #[tokio::test]
    async fn test_missing_file_field() {
        let test = create_test_app(16 * 1024 * 1024);

        let response = test
            .app
            .oneshot(multipart_request("photo", Some("leaf.png"), &png_bytes()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(test.disease_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_field_without_filename() {
        let test = create_test_app(16 * 1024 * 1024);

        let response = test
            .app
            .oneshot(multipart_request("file", None, b"just text"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(test.disease_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_filename() {
        let test = create_test_app(16 * 1024 * 1024);

        let response = test
            .app
            .oneshot(multipart_request("file", Some(""), b""))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(test.disease_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_non_multipart_body() {
        let test = create_test_app(16 * 1024 * 1024);

        let response = test
            .app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/predict_disease")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_response(response).await;
        assert_eq!(body["error"], "Invalid file type. Only images are allowed.");
    }

    #[tokio::test]
    async fn test_undecodable_image_is_server_error_and_upload_kept() {
        let test = create_test_app(16 * 1024 * 1024);

        let response = test
            .app
            .oneshot(multipart_request("file", Some("leaf.jpg"), b"definitely not a jpeg"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_response(response).await;
        assert!(body["error"].as_str().unwrap().contains("Failed to open image"));
        assert_eq!(test.disease_calls.load(Ordering::SeqCst), 0);
        // No rollback of the saved upload
        assert_eq!(stored_files(&test.upload_path), 1);
    }

    #[tokio::test]
    async fn test_upload_over_limit() {
        let test = create_test_app(1024);

        let response = test
            .app
            .oneshot(multipart_request("file", Some("leaf.png"), &vec![0u8; 4096]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(test.disease_calls.load(Ordering::SeqCst), 0);
    }
}
