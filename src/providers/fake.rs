//! Fake generative provider for tests and offline demos.
//!
//! Structured responses are matched by checking whether the prompt contains a
//! registered substring, so tests run without network access or API costs.

use crate::core::error::ChefError;
use crate::providers::{GenerativeProvider, MediaResponse, Modality, extract_json};
use crate::services::schema::Schema;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::atomic::{AtomicUsize, Ordering};

/// 1x1 PNG, used as the fake provider's generated image.
pub const FAKE_IMAGE_REF: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

#[derive(Debug, Clone)]
enum MediaBehavior {
    Returns(String),
    NoMedia,
    Fails,
}

#[derive(Debug)]
pub struct FakeProvider {
    /// prompt substring -> raw model output
    responses: Vec<(String, String)>,
    default_response: Option<String>,
    /// Build a recipe from the prompt's `Ingredients:` line when nothing matches
    derive_from_prompt: bool,
    fail_structured: bool,
    media: MediaBehavior,
    structured_calls: AtomicUsize,
    media_calls: AtomicUsize,
}

impl Default for FakeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeProvider {
    /// No registered responses; every structured call fails until one is added.
    pub fn new() -> Self {
        Self {
            responses: Vec::new(),
            default_response: None,
            derive_from_prompt: false,
            fail_structured: false,
            media: MediaBehavior::Returns(FAKE_IMAGE_REF.to_string()),
            structured_calls: AtomicUsize::new(0),
            media_calls: AtomicUsize::new(0),
        }
    }

    /// Offline demo provider: echoes the requested ingredients back as a recipe.
    pub fn pantry() -> Self {
        Self {
            derive_from_prompt: true,
            ..Self::new()
        }
    }

    pub fn with_response(prompt_contains: &str, response: &str) -> Self {
        Self::new().add_response(prompt_contains, response)
    }

    pub fn add_response(mut self, prompt_contains: &str, response: &str) -> Self {
        self.responses
            .push((prompt_contains.to_lowercase(), response.to_string()));
        self
    }

    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }

    pub fn with_media(mut self, media_ref: &str) -> Self {
        self.media = MediaBehavior::Returns(media_ref.to_string());
        self
    }

    /// Image calls succeed but carry no media reference.
    pub fn without_media(mut self) -> Self {
        self.media = MediaBehavior::NoMedia;
        self
    }

    pub fn failing_media(mut self) -> Self {
        self.media = MediaBehavior::Fails;
        self
    }

    pub fn failing_structured(mut self) -> Self {
        self.fail_structured = true;
        self
    }

    pub fn structured_calls(&self) -> usize {
        self.structured_calls.load(Ordering::SeqCst)
    }

    pub fn media_calls(&self) -> usize {
        self.media_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.structured_calls() + self.media_calls()
    }

    fn lookup(&self, prompt: &str) -> Option<String> {
        let prompt_lower = prompt.to_lowercase();
        self.responses
            .iter()
            .find(|(pattern, _)| prompt_lower.contains(pattern))
            .map(|(_, response)| response.clone())
            .or_else(|| self.default_response.clone())
            .or_else(|| {
                self.derive_from_prompt
                    .then(|| derived_recipe(prompt).to_string())
            })
    }
}

fn derived_recipe(prompt: &str) -> Value {
    let items: Vec<String> = prompt
        .lines()
        .rev()
        .find_map(|line| line.trim().strip_prefix("Ingredients:"))
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    let name = match items.first() {
        Some(first) => format!("{} Skillet", capitalize(first)),
        None => "Pantry Skillet".to_string(),
    };
    let mut ingredients = items.clone();
    ingredients.extend(["salt".to_string(), "black pepper".to_string()]);

    json!({
        "recipeName": name,
        "ingredients": ingredients,
        "steps": [
            "Prepare and chop all ingredients.",
            format!("Cook {} in a hot skillet until done.", items.join(", ")),
            "Season with salt and pepper, then serve."
        ]
    })
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[async_trait]
impl GenerativeProvider for FakeProvider {
    async fn structured_generate(&self, prompt: &str, _schema: &Schema) -> Result<Value, ChefError> {
        self.structured_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_structured {
            return Err(ChefError::Network("Fake provider unavailable".to_string()));
        }

        let raw = self.lookup(prompt).ok_or_else(|| {
            ChefError::Api(format!(
                "No fake response for prompt: {}",
                &prompt.chars().take(50).collect::<String>()
            ))
        })?;

        Ok(serde_json::from_str(extract_json(&raw))?)
    }

    async fn multimodal_generate(
        &self,
        _prompt: &str,
        modalities: &[Modality],
    ) -> Result<MediaResponse, ChefError> {
        self.media_calls.fetch_add(1, Ordering::SeqCst);

        match &self.media {
            MediaBehavior::Fails => Err(ChefError::Api("Fake image backend failed".to_string())),
            MediaBehavior::NoMedia => Ok(MediaResponse {
                text: Some("I could not draw that.".to_string()),
                media_ref: None,
            }),
            MediaBehavior::Returns(media_ref) => Ok(MediaResponse {
                text: modalities
                    .contains(&Modality::Text)
                    .then(|| "Here is your image.".to_string()),
                media_ref: modalities
                    .contains(&Modality::Image)
                    .then(|| media_ref.clone()),
            }),
        }
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}
