//! VatLens HTTP gateway.
//!
//! A thin synchronous request/response wrapper around the extraction
//! pipeline: one POST endpoint, a health route, and the embedded
//! single-page upload UI.

pub mod invoice_api;
pub mod server;
pub mod upload_ui;

pub use server::{GatewayState, build_router, start_server};
