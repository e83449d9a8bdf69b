//! The invoice extractor: decode, delegate, repair, validate.
//!
//! Holds an immutable handle to a vision provider and no other state; one
//! call in, one structured invoice (or one opaque failure) out. There is no
//! retry loop: a single failed call is a single failure.

use std::sync::Arc;

use base64::{Engine, engine::general_purpose::STANDARD};
use tracing::{debug, error, info, warn};

use vatlens_core::{ExtractionError, ImagePart, InvoiceEnvelope, VisionModel, VisionRequest};

use crate::{prompt, repair, validate};

/// Sampling temperature for extraction calls; low for near-deterministic
/// output.
const EXTRACTION_TEMPERATURE: f32 = 0.2;

/// Turns base64-encoded invoice images into a structured invoice via one
/// external vision model call.
pub struct InvoiceExtractor {
    model: Arc<dyn VisionModel>,
}

impl InvoiceExtractor {
    pub fn new(model: Arc<dyn VisionModel>) -> Self {
        Self { model }
    }

    /// Extract a structured invoice from base64-encoded JPEG payloads.
    ///
    /// Every failure mode (payload decode, provider call, unparseable or
    /// schema-violating reply) collapses to [`ExtractionError`]; the detail
    /// goes to the logs only.
    pub async fn extract(&self, b64_images: &[String]) -> Result<InvoiceEnvelope, ExtractionError> {
        info!(images = b64_images.len(), "Starting invoice extraction");

        let mut images = Vec::with_capacity(b64_images.len());
        for (index, payload) in b64_images.iter().enumerate() {
            match STANDARD.decode(payload.trim()) {
                Ok(bytes) => images.push(ImagePart {
                    mime_type: "image/jpeg".to_string(),
                    data: bytes,
                }),
                Err(e) => {
                    warn!(image = index, error = %e, "Failed to decode base64 image payload");
                    return Err(ExtractionError);
                }
            }
        }

        let request = VisionRequest {
            images,
            system_instruction: prompt::system_instruction(),
            user_prompt: String::new(),
            temperature: EXTRACTION_TEMPERATURE,
            response_schema: prompt::response_schema(),
        };

        info!(provider = self.model.name(), "Sending extraction request to vision model");
        let response = match self.model.generate(&request).await {
            Ok(response) => response,
            Err(e) => {
                error!(provider = self.model.name(), error = %e, "Vision model call failed");
                return Err(ExtractionError);
            }
        };
        debug!(
            model = %response.model,
            preview = %response.text.chars().take(300).collect::<String>(),
            "Received model response"
        );

        let Some(value) = repair::repair_json(&response.text) else {
            warn!("No valid JSON could be parsed from the model response");
            return Err(ExtractionError);
        };

        let invoice = match validate::validate_invoice(&value) {
            Ok(invoice) => invoice,
            Err(e) => {
                warn!(error = %e, "Model response failed schema validation");
                return Err(ExtractionError);
            }
        };

        info!(products = invoice.products.len(), "Invoice extraction completed");
        Ok(InvoiceEnvelope { data: invoice })
    }
}
