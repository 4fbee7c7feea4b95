use crate::core::error::ChefError;
use crate::providers::{GenerativeProvider, Modality};
use crate::services::types::ImageResult;
use std::sync::Arc;

/// The image backend only answers when text is requested alongside the image.
const IMAGE_MODALITIES: [Modality; 2] = [Modality::Text, Modality::Image];

pub fn image_prompt(description: &str) -> String {
    format!("Generate an image of the following recipe: {}.", description)
}

/// Turns a short description (usually a recipe name) into an image reference.
#[derive(Clone)]
pub struct ImageGenerationService {
    provider: Arc<dyn GenerativeProvider>,
}

impl ImageGenerationService {
    pub fn new(provider: Arc<dyn GenerativeProvider>) -> Self {
        Self { provider }
    }

    /// One attempt, no retry. A response without media is a hard failure here;
    /// callers that can live without an image decide how to degrade.
    pub async fn generate_image(&self, description: &str) -> Result<ImageResult, ChefError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(ChefError::Validation(
                "Please describe the image to generate.".to_string(),
            ));
        }

        tracing::debug!(
            provider = self.provider.provider_name(),
            description = description,
            "Generating image"
        );

        let response = self
            .provider
            .multimodal_generate(&image_prompt(description), &IMAGE_MODALITIES)
            .await
            .map_err(|e| ChefError::ImageGeneration(e.to_string()))?;

        match response.media_ref {
            Some(image_ref) if !image_ref.trim().is_empty() => Ok(ImageResult { image_ref }),
            _ => Err(ChefError::ImageGeneration(no_media_message(
                response.text.as_deref(),
            ))),
        }
    }
}

/// The model usually explains a refusal in its text part; keep that for the logs.
fn no_media_message(model_text: Option<&str>) -> String {
    match model_text.map(str::trim).filter(|t| !t.is_empty()) {
        Some(text) => format!("response contained no media (model said: {})", text),
        None => "response contained no media".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::fake::{FAKE_IMAGE_REF, FakeProvider};

    fn service(provider: FakeProvider) -> (ImageGenerationService, Arc<FakeProvider>) {
        let provider = Arc::new(provider);
        (ImageGenerationService::new(provider.clone()), provider)
    }

    #[tokio::test]
    async fn empty_description_is_rejected_without_calling_backend() {
        let (service, provider) = service(FakeProvider::new());
        for description in ["", "   \t"] {
            let err = service.generate_image(description).await.unwrap_err();
            assert!(matches!(err, ChefError::Validation(_)));
        }
        assert_eq!(provider.total_calls(), 0);
    }

    #[tokio::test]
    async fn returns_first_media_reference() {
        let (service, provider) = service(FakeProvider::new());
        let result = service.generate_image("Margherita Pizza").await.unwrap();
        assert_eq!(result.image_ref, FAKE_IMAGE_REF);
        assert_eq!(provider.media_calls(), 1);
    }

    #[tokio::test]
    async fn missing_media_is_an_image_generation_failure() {
        let (service, _) = service(FakeProvider::new().without_media());
        let err = service.generate_image("Margherita Pizza").await.unwrap_err();
        assert!(
            matches!(err, ChefError::ImageGeneration(ref msg) if msg.contains("I could not draw that."))
        );
    }

    #[tokio::test]
    async fn blank_media_reference_counts_as_missing() {
        let (service, _) = service(FakeProvider::new().with_media("  "));
        let err = service.generate_image("Margherita Pizza").await.unwrap_err();
        assert!(matches!(err, ChefError::ImageGeneration(_)));
    }

    #[tokio::test]
    async fn backend_errors_become_image_generation_failures() {
        let (service, provider) = service(FakeProvider::new().failing_media());
        let err = service.generate_image("Margherita Pizza").await.unwrap_err();
        assert!(matches!(err, ChefError::ImageGeneration(_)));
        assert_eq!(provider.media_calls(), 1);
    }

    #[test]
    fn no_media_message_skips_blank_model_text() {
        assert_eq!(no_media_message(None), "response contained no media");
        assert_eq!(no_media_message(Some("  ")), "response contained no media");
    }

    #[test]
    fn prompt_embeds_description() {
        assert_eq!(
            image_prompt("Lemon Tart"),
            "Generate an image of the following recipe: Lemon Tart."
        );
    }
}
