//! Gemini vision provider.
//!
//! Client for the `generateContent` endpoint of the Google Generative
//! Language API. Images travel as inline base64 parts; the reply is
//! constrained to JSON via `responseMimeType` and `responseSchema`, and the
//! model's extended reasoning budget is disabled for speed.

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::Client;
use serde_json::json;
use tracing::debug;

use vatlens_core::{VisionModel, VisionRequest, VisionResponse};

/// Default model identifier, a fast multimodal variant.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Google Gemini vision provider.
pub struct GeminiModel {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiModel {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Model identifier requests are sent to.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl VisionModel for GeminiModel {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, request: &VisionRequest) -> Result<VisionResponse> {
        let mut parts: Vec<serde_json::Value> = request
            .images
            .iter()
            .map(|image| {
                json!({
                    "inlineData": {
                        "mimeType": image.mime_type,
                        "data": STANDARD.encode(&image.data),
                    }
                })
            })
            .collect();
        // The user prompt trails the images, matching the part order the
        // extraction task was tuned with.
        parts.push(json!({ "text": request.user_prompt }));

        let body = json!({
            "contents": [{ "role": "user", "parts": parts }],
            "systemInstruction": { "parts": [{ "text": request.system_instruction }] },
            "generationConfig": {
                "temperature": request.temperature,
                "responseMimeType": "application/json",
                "responseSchema": request.response_schema,
                "thinkingConfig": { "thinkingBudget": 0 },
            },
        });

        debug!(model = %self.model, images = request.images.len(), "Sending request to Gemini");

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .context("Gemini HTTP request failed")?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!("Gemini returned {}: {}", status, error_body);
        }

        let reply: serde_json::Value = response
            .json()
            .await
            .context("Failed to parse Gemini response body")?;

        let text = reply["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .unwrap_or("")
            .to_string();

        Ok(VisionResponse {
            text,
            provider: "gemini".to_string(),
            model: self.model.clone(),
        })
    }
}
