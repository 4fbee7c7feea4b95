use crate::core::error::ChefError;
use reqwest::{Client, Response};
use serde::Serialize;
use std::time::Duration;

/// Thin JSON-over-HTTP client shared by providers. The underlying
/// `reqwest::Client` is built once and reused across calls.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    endpoint: String,
    query_params: Vec<(String, String)>,
}

impl HttpClient {
    pub fn new(endpoint: String, timeout: Option<Duration>) -> Result<Self, ChefError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ChefError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            query_params: Vec::new(),
        })
    }

    pub fn add_query_param(&mut self, key: &str, value: String) {
        self.query_params.push((key.to_string(), value));
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint, path.trim_start_matches('/'))
    }

    /// POST `payload` as JSON. Non-2xx responses are turned into `ChefError::Api`
    /// carrying the status and the provider's error message.
    pub async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &T,
    ) -> Result<Response, ChefError> {
        let response = self
            .client
            .post(self.url(path))
            .query(&self.query_params)
            .json(payload)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChefError::Api(format!(
                "{} returned {}: {}",
                path,
                status,
                error_message(&body)
            )));
        }
        Ok(response)
    }
}

/// Pull `error.message` out of a Google-style error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}
