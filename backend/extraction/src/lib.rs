//! Invoice extraction pipeline.
//!
//! Turns base64-encoded invoice images into a structured [`vatlens_core::Invoice`]
//! by delegating visual understanding to an external vision model, then
//! repairing and validating the model's JSON reply locally.

pub mod extractor;
pub mod gemini;
pub mod prompt;
pub mod repair;
pub mod validate;

pub use extractor::InvoiceExtractor;
pub use gemini::GeminiModel;
