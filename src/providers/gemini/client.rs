use crate::core::error::ChefError;
use crate::providers::base_client::HttpClient;
use crate::providers::gemini::types::*;
use crate::providers::{MediaResponse, Modality, extract_json};
use crate::services::schema::Schema;
use serde_json::Value;
use std::time::Duration;

#[derive(Clone)]
pub struct GeminiClient {
    pub model: String,
    pub image_model: String,
    client: HttpClient,
}

impl GeminiClient {
    pub fn new(
        base_url: String,
        api_key: String,
        model: String,
        image_model: String,
        timeout: Option<Duration>,
    ) -> Result<Self, ChefError> {
        let mut client = HttpClient::new(base_url, timeout)?;

        // Add API key to query params
        client.add_query_param("key", api_key);

        Ok(Self {
            client,
            model,
            image_model,
        })
    }

    pub async fn generate_structured(&self, prompt: &str, schema: &Schema) -> Result<Value, ChefError> {
        let payload = build_structured_payload(prompt, schema);
        let parsed = self.generate_content(&self.model, &payload).await?;

        let text = parsed.text().ok_or_else(|| {
            ChefError::Api(format!(
                "No text in Gemini response: {}",
                parsed.empty_reason()
            ))
        })?;

        serde_json::from_str(extract_json(&text)).map_err(|e| {
            ChefError::Serialization(format!("Gemini returned invalid JSON: {}", e))
        })
    }

    pub async fn generate_media(
        &self,
        prompt: &str,
        modalities: &[Modality],
    ) -> Result<MediaResponse, ChefError> {
        let payload = build_media_payload(prompt, modalities);
        let parsed = self.generate_content(&self.image_model, &payload).await?;

        let media_ref = parsed.first_media_ref();
        if media_ref.is_none() {
            tracing::debug!(reason = %parsed.empty_reason(), "Gemini returned no media");
        }

        Ok(MediaResponse {
            text: parsed.text(),
            media_ref,
        })
    }

    async fn generate_content(
        &self,
        model: &str,
        payload: &GeminiRequest,
    ) -> Result<GeminiResponse, ChefError> {
        tracing::debug!(model = model, "Calling Gemini generateContent");

        let response = self
            .client
            .post(&format!("v1beta/models/{}:generateContent", model), payload)
            .await?;

        let response_body: String = response.text().await?;
        serde_json::from_str(&response_body).map_err(|e| {
            ChefError::Serialization(format!("Failed to parse Gemini response: {}", e))
        })
    }
}

fn user_content(prompt: &str) -> Vec<GeminiContent> {
    vec![GeminiContent {
        role: Some("user".to_string()),
        parts: vec![GeminiPart::text(prompt)],
    }]
}

pub(crate) fn build_structured_payload(prompt: &str, schema: &Schema) -> GeminiRequest {
    GeminiRequest {
        contents: user_content(prompt),
        generation_config: Some(GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(schema.to_gemini_schema()),
            response_modalities: None,
        }),
    }
}

pub(crate) fn build_media_payload(prompt: &str, modalities: &[Modality]) -> GeminiRequest {
    GeminiRequest {
        contents: user_content(prompt),
        generation_config: Some(GenerationConfig {
            response_mime_type: None,
            response_schema: None,
            response_modalities: Some(
                modalities.iter().map(|m| m.as_str().to_string()).collect(),
            ),
        }),
    }
}
