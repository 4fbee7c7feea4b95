use crate::core::error::ChefError;
use crate::providers::{GenerativeProvider, MediaResponse, Modality};
use crate::services::schema::Schema;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

mod client;
mod types;

pub use client::GeminiClient;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.0-flash-preview-image-generation";

#[derive(Clone)]
pub struct GeminiProvider {
    client: GeminiClient,
}

impl GeminiProvider {
    pub fn new(
        api_key: String,
        model: String,
        image_model: String,
        timeout: Option<Duration>,
    ) -> Result<Self, ChefError> {
        Self::with_endpoint(
            DEFAULT_BASE_URL.to_string(),
            api_key,
            model,
            image_model,
            timeout,
        )
    }

    pub fn with_endpoint(
        endpoint: String,
        api_key: String,
        model: String,
        image_model: String,
        timeout: Option<Duration>,
    ) -> Result<Self, ChefError> {
        if api_key.trim().is_empty() {
            return Err(ChefError::Config(
                "Gemini API key is missing; set GEMINI_API_KEY or providers.gemini.api_key"
                    .to_string(),
            ));
        }
        Ok(Self {
            client: GeminiClient::new(endpoint, api_key, model, image_model, timeout)?,
        })
    }
}

#[async_trait]
impl GenerativeProvider for GeminiProvider {
    async fn structured_generate(&self, prompt: &str, schema: &Schema) -> Result<Value, ChefError> {
        self.client.generate_structured(prompt, schema).await
    }

    async fn multimodal_generate(
        &self,
        prompt: &str,
        modalities: &[Modality],
    ) -> Result<MediaResponse, ChefError> {
        self.client.generate_media(prompt, modalities).await
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.client.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{Path, Query, State};
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Canned `generateContent` endpoint that records which model and key were called.
    #[derive(Clone)]
    struct StubGemini {
        status: StatusCode,
        body: Value,
        calls: Arc<Mutex<Vec<(String, Option<String>)>>>,
    }

    impl StubGemini {
        fn calls(&self) -> Vec<(String, Option<String>)> {
            self.calls.lock().unwrap().clone()
        }
    }

    async fn generate_content(
        State(stub): State<StubGemini>,
        Path(call): Path<String>,
        Query(params): Query<HashMap<String, String>>,
        Json(_payload): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        stub.calls
            .lock()
            .unwrap()
            .push((call, params.get("key").cloned()));
        (stub.status, Json(stub.body.clone()))
    }

    async fn serve_stub(status: StatusCode, body: Value) -> (GeminiProvider, StubGemini) {
        let stub = StubGemini {
            status,
            body,
            calls: Arc::new(Mutex::new(Vec::new())),
        };
        let app = Router::new()
            .route("/v1beta/models/:call", post(generate_content))
            .with_state(stub.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        let provider = GeminiProvider::with_endpoint(
            format!("http://{}", address),
            "test-key".to_string(),
            DEFAULT_MODEL.to_string(),
            DEFAULT_IMAGE_MODEL.to_string(),
            Some(Duration::from_secs(5)),
        )
        .unwrap();
        (provider, stub)
    }

    fn candidate(parts: Value) -> Value {
        json!({"candidates": [{"content": {"role": "model", "parts": parts}, "finishReason": "STOP"}]})
    }

    #[tokio::test]
    async fn structured_call_parses_fenced_json_from_text_model() {
        let (provider, stub) = serve_stub(
            StatusCode::OK,
            candidate(json!([{
                "text": "```json\n{\"recipeName\": \"Leek Soup\", \"ingredients\": [\"leek\"], \"steps\": [\"Simmer.\"]}\n```"
            }])),
        )
        .await;

        let schema = crate::services::recipe::recipe_schema();
        let value = provider.structured_generate("leeks", &schema).await.unwrap();

        assert_eq!(value["recipeName"], "Leek Soup");
        assert_eq!(
            stub.calls(),
            vec![(
                format!("{}:generateContent", DEFAULT_MODEL),
                Some("test-key".to_string())
            )]
        );
    }

    #[tokio::test]
    async fn error_status_maps_to_api_error_with_google_message() {
        let (provider, _) = serve_stub(
            StatusCode::BAD_REQUEST,
            json!({"error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}}),
        )
        .await;

        let err = provider
            .multimodal_generate("Generate an image of soup.", &[Modality::Text, Modality::Image])
            .await
            .unwrap_err();

        assert!(
            matches!(err, ChefError::Api(ref msg) if msg.contains("400") && msg.contains("API key not valid")),
            "unexpected error: {:?}",
            err
        );
    }

    #[tokio::test]
    async fn media_call_returns_inline_image_and_text_from_image_model() {
        let (provider, stub) = serve_stub(
            StatusCode::OK,
            candidate(json!([
                {"text": "Here is your soup."},
                {"inlineData": {"mimeType": "image/png", "data": "iVBORw=="}}
            ])),
        )
        .await;

        let response = provider
            .multimodal_generate("Generate an image of soup.", &[Modality::Text, Modality::Image])
            .await
            .unwrap();

        assert_eq!(response.media_ref.as_deref(), Some("data:image/png;base64,iVBORw=="));
        assert_eq!(response.text.as_deref(), Some("Here is your soup."));
        assert_eq!(stub.calls()[0].0, format!("{}:generateContent", DEFAULT_IMAGE_MODEL));
    }

    #[tokio::test]
    async fn text_only_media_response_has_no_media_ref() {
        let (provider, _) = serve_stub(
            StatusCode::OK,
            candidate(json!([{"text": "I can't draw that."}])),
        )
        .await;

        let response = provider
            .multimodal_generate("Generate an image of soup.", &[Modality::Text, Modality::Image])
            .await
            .unwrap();

        assert_eq!(response.media_ref, None);
        assert_eq!(response.text.as_deref(), Some("I can't draw that."));
    }

    #[test]
    fn rejects_blank_api_key() {
        let result = GeminiProvider::new(
            "  ".to_string(),
            DEFAULT_MODEL.to_string(),
            DEFAULT_IMAGE_MODEL.to_string(),
            None,
        );
        assert!(matches!(result, Err(ChefError::Config(_))));
    }

    #[test]
    fn reports_text_model_name() {
        let provider = GeminiProvider::new(
            "test-key".to_string(),
            "gemini-2.5-flash".to_string(),
            DEFAULT_IMAGE_MODEL.to_string(),
            None,
        )
        .unwrap();
        assert_eq!(provider.provider_name(), "gemini");
        assert_eq!(provider.model_name(), "gemini-2.5-flash");
    }
}
