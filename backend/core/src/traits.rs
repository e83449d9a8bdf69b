use anyhow::Result;
use async_trait::async_trait;

/// One binary image part of a vision request.
#[derive(Debug, Clone)]
pub struct ImagePart {
    /// MIME type of the payload (e.g., "image/jpeg").
    pub mime_type: String,
    /// Raw image bytes.
    pub data: Vec<u8>,
}

/// Request to a multimodal vision provider.
#[derive(Debug, Clone)]
pub struct VisionRequest {
    /// Images sent alongside the prompt, in order.
    pub images: Vec<ImagePart>,
    /// System instruction describing the task and output contract.
    pub system_instruction: String,
    /// Trailing user text appended after the images.
    pub user_prompt: String,
    /// Sampling temperature; kept low for near-deterministic output.
    pub temperature: f32,
    /// JSON schema the provider is asked to constrain its output to.
    pub response_schema: serde_json::Value,
}

/// Raw response from a vision provider.
#[derive(Debug, Clone)]
pub struct VisionResponse {
    /// Free-form response text, expected to contain JSON.
    pub text: String,
    /// Provider name the response came from.
    pub provider: String,
    /// Model identifier that produced the response.
    pub model: String,
}

/// Trait for multimodal vision providers used by the invoice extractor.
///
/// The extractor owns prompt construction, JSON repair, and validation;
/// implementations of this trait only move the request over the wire. A
/// deterministic test double implements the same trait so the pipeline can
/// be exercised without the network.
#[async_trait]
pub trait VisionModel: Send + Sync {
    /// Provider name (e.g., "gemini").
    fn name(&self) -> &str;

    /// Send a generation request and return the raw response text.
    async fn generate(&self, request: &VisionRequest) -> Result<VisionResponse>;
}
