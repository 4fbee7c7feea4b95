use crate::core::error::ChefError;
use crate::services::schema::Schema;
use async_trait::async_trait;
use serde_json::Value;

pub mod base_client;
pub mod factory;
pub mod fake;
pub mod gemini;

/// Output kinds a multimodal call may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modality {
    Text,
    Image,
}

impl Modality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Modality::Text => "TEXT",
            Modality::Image => "IMAGE",
        }
    }
}

/// Result of a multimodal call: optional accompanying text and the first media
/// reference (a URL or a `data:` URI) if the model produced one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaResponse {
    pub text: Option<String>,
    pub media_ref: Option<String>,
}

#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    /// Ask for JSON output shaped like `schema`. The returned value is not yet
    /// validated; callers check it against the same schema.
    async fn structured_generate(&self, prompt: &str, schema: &Schema) -> Result<Value, ChefError>;

    async fn multimodal_generate(
        &self,
        prompt: &str,
        modalities: &[Modality],
    ) -> Result<MediaResponse, ChefError>;

    fn provider_name(&self) -> &'static str;

    fn model_name(&self) -> &str;
}

/// Extract the JSON document from model output, unwrapping a markdown code block if present
pub fn extract_json(content: &str) -> &str {
    let content = content.trim();

    if content.is_empty() {
        return content;
    }

    if let Some(start_idx) = content.find("```") {
        let after_start = &content[start_idx + 3..];
        let code_block = match after_start.find("```") {
            Some(end_idx) => &after_start[..end_idx],
            None => after_start,
        };

        // Remove language specifier if present
        let code_block = match code_block.find('\n') {
            Some(first_newline) if !code_block[..first_newline].trim_start().starts_with(['{', '[']) => {
                &code_block[first_newline + 1..]
            }
            _ => code_block,
        };
        return code_block.trim();
    }

    // Fallback: outermost object
    match (content.find('{'), content.rfind('}')) {
        (Some(start), Some(end)) if start < end => &content[start..=end],
        _ => content,
    }
}
