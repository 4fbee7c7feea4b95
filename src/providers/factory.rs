use crate::config::{Provider, ProviderConfig};
use crate::core::error::ChefError;
use crate::providers::{
    GenerativeProvider,
    fake::FakeProvider,
    gemini::{self, GeminiProvider},
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

type ProviderCreator = Box<
    dyn Fn(&ProviderConfig, Duration) -> Result<Arc<dyn GenerativeProvider>, ChefError>
        + Send
        + Sync,
>;

pub struct ProviderFactory {
    creators: HashMap<Provider, ProviderCreator>,
}

impl Default for ProviderFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderFactory {
    pub fn new() -> Self {
        let mut creators = HashMap::new();

        creators.insert(
            Provider::Gemini,
            Box::new(
                |config: &ProviderConfig,
                 timeout: Duration|
                 -> Result<Arc<dyn GenerativeProvider>, ChefError> {
                let api_key = config.api_key.clone().ok_or_else(|| {
                    ChefError::Config(
                        "Gemini API key is missing; set GEMINI_API_KEY or providers.gemini.api_key"
                            .to_string(),
                    )
                })?;
                let model = config
                    .model
                    .clone()
                    .unwrap_or_else(|| gemini::DEFAULT_MODEL.to_string());
                let image_model = config
                    .image_model
                    .clone()
                    .unwrap_or_else(|| gemini::DEFAULT_IMAGE_MODEL.to_string());
                let provider = match &config.base_url {
                    Some(base_url) => GeminiProvider::with_endpoint(
                        base_url.clone(),
                        api_key,
                        model,
                        image_model,
                        Some(timeout),
                    )?,
                    None => GeminiProvider::new(api_key, model, image_model, Some(timeout))?,
                };
                Ok(Arc::new(provider) as Arc<dyn GenerativeProvider>)
            }) as ProviderCreator,
        );

        creators.insert(
            Provider::Fake,
            Box::new(
                |_config: &ProviderConfig,
                 _timeout: Duration|
                 -> Result<Arc<dyn GenerativeProvider>, ChefError> {
                Ok(Arc::new(FakeProvider::pantry()) as Arc<dyn GenerativeProvider>)
            }) as ProviderCreator,
        );

        Self { creators }
    }

    pub fn create(
        &self,
        provider: &Provider,
        config: &ProviderConfig,
        timeout: Duration,
    ) -> Result<Arc<dyn GenerativeProvider>, ChefError> {
        self.creators
            .get(provider)
            .ok_or_else(|| ChefError::Config(format!("Provider not found: {:?}", provider)))
            .and_then(|creator| creator(config, timeout))
    }
}
