//! Invoice extraction endpoint (`POST /api/multiple-invoice`).
//!
//! Accepts one base64 or data-URI encoded image, runs the extraction
//! pipeline, and maps every failure to a uniform HTTP 500 with a fixed
//! detail string. Internal error detail never reaches the caller.

use std::panic::AssertUnwindSafe;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures::FutureExt;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, warn};

use vatlens_core::InvoiceEnvelope;

use crate::server::GatewayState;

/// Request body: one base64 or data-URI encoded invoice image.
#[derive(Debug, Deserialize)]
pub struct ImageRequest {
    pub image: String,
}

/// Uniform HTTP 500 failure with a fixed, non-specific detail string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    /// The extraction pipeline reported a failure.
    Processing,
    /// Anything else went wrong while handling the request.
    Internal,
}

impl ApiError {
    fn detail(&self) -> &'static str {
        match self {
            ApiError::Processing => "Invoice processing failed",
            ApiError::Internal => "Internal server error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": self.detail() })),
        )
            .into_response()
    }
}

/// Keep only the payload after the last comma, stripping any
/// `data:...;base64,` prefix.
fn strip_data_uri(image: &str) -> &str {
    image.rsplit(',').next().unwrap_or(image)
}

/// Handler for `POST /api/multiple-invoice`.
pub async fn process_invoice(
    State(state): State<GatewayState>,
    Json(request): Json<ImageRequest>,
) -> Result<Json<InvoiceEnvelope>, ApiError> {
    // The UI uploads exactly one image; the extractor contract stays a list.
    let images = [strip_data_uri(&request.image).to_string()];

    let extraction = state.extractor.extract(&images);
    match AssertUnwindSafe(extraction).catch_unwind().await {
        Ok(Ok(envelope)) => Ok(Json(envelope)),
        Ok(Err(e)) => {
            warn!(error = %e, "Invoice processing failed");
            Err(ApiError::Processing)
        }
        Err(_) => {
            error!("An error occurred during processing invoices in endpoint");
            Err(ApiError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::to_bytes;
    use base64::{Engine, engine::general_purpose::STANDARD};

    use vatlens_core::{VisionModel, VisionRequest, VisionResponse};
    use vatlens_extraction::InvoiceExtractor;

    /// Deterministic stand-in for the external vision service.
    struct StubModel {
        reply: String,
    }

    #[async_trait::async_trait]
    impl VisionModel for StubModel {
        fn name(&self) -> &str {
            "stub"
        }

        async fn generate(&self, _request: &VisionRequest) -> anyhow::Result<VisionResponse> {
            Ok(VisionResponse {
                text: self.reply.clone(),
                provider: "stub".to_string(),
                model: "stub-1".to_string(),
            })
        }
    }

    const REPLY: &str = concat!(
        r#"{"data":{"date":"01-01-2024","products":[{"Item_ID":"AB-1234","#,
        r#""Item_Description":"Front brake pad set","Unit_Price":120.0,"#,
        r#""Quantity":2,"Tax":36.0,"Total_Amount":276.0}]}}"#
    );

    fn state_replying(reply: &str) -> GatewayState {
        let model = Arc::new(StubModel {
            reply: reply.to_string(),
        });
        GatewayState {
            extractor: Arc::new(InvoiceExtractor::new(model)),
        }
    }

    fn valid_payload() -> String {
        STANDARD.encode(b"not a real jpeg, but valid base64")
    }

    async fn call(state: GatewayState, image: String) -> Response {
        process_invoice(State(state), Json(ImageRequest { image }))
            .await
            .into_response()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn strip_data_uri_takes_substring_after_last_comma() {
        assert_eq!(strip_data_uri("AAAA"), "AAAA");
        assert_eq!(strip_data_uri("data:image/jpeg;base64,AAAA"), "AAAA");
        assert_eq!(strip_data_uri("data:one,two,AAAA"), "AAAA");
    }

    #[tokio::test]
    async fn returns_invoice_for_valid_base64() {
        let response = call(state_replying(REPLY), valid_payload()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["data"]["date"], "01-01-2024");
        assert_eq!(body["data"]["products"][0]["Item_ID"], "AB-1234");
        assert_eq!(body["data"]["products"][0]["Quantity"], 2);
    }

    #[tokio::test]
    async fn accepts_data_uri_payload() {
        let image = format!("data:image/jpeg;base64,{}", valid_payload());
        let response = call(state_replying(REPLY), image).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn invalid_base64_maps_to_processing_failed() {
        let response = call(state_replying(REPLY), "!!not base64!!".to_string()).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["detail"], "Invoice processing failed");
    }

    #[tokio::test]
    async fn garbage_model_reply_maps_to_processing_failed() {
        let response = call(state_replying("no json here"), valid_payload()).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["detail"], "Invoice processing failed");
    }

    #[tokio::test]
    async fn empty_model_reply_maps_to_processing_failed() {
        let response = call(state_replying(""), valid_payload()).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn identical_requests_yield_identical_responses() {
        let first = body_json(call(state_replying(REPLY), valid_payload()).await).await;
        let second = body_json(call(state_replying(REPLY), valid_payload()).await).await;
        assert_eq!(first, second);
    }
}
