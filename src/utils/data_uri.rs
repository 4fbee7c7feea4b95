use crate::core::error::ChefError;
use base64::Engine;

/// A decoded `data:<mime>;base64,<payload>` reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl DataUri {
    pub fn is_data_uri(reference: &str) -> bool {
        reference.trim_start().starts_with("data:")
    }

    pub fn parse(reference: &str) -> Result<Self, ChefError> {
        let rest = reference
            .trim()
            .strip_prefix("data:")
            .ok_or_else(|| ChefError::Serialization("Not a data URI".to_string()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| ChefError::Serialization("Data URI has no payload".to_string()))?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or_else(|| ChefError::Serialization("Only base64 data URIs are supported".to_string()))?;

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|e| ChefError::Serialization(format!("Invalid base64 in data URI: {}", e)))?;

        Ok(Self {
            mime_type: if mime_type.is_empty() {
                "application/octet-stream".to_string()
            } else {
                mime_type.to_string()
            },
            bytes,
        })
    }

    pub fn extension(&self) -> &'static str {
        extension_for(&self.mime_type)
    }
}

pub fn extension_for(mime_type: &str) -> &'static str {
    match mime_type {
        "image/png" => "png",
        "image/jpeg" | "image/jpg" => "jpg",
        "image/webp" => "webp",
        "image/gif" => "gif",
        _ => "bin",
    }
}
