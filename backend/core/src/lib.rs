//! Core types shared across the VatLens runtime.
//!
//! Holds the invoice data model, the extraction error, and the trait
//! boundary between the extraction pipeline and the external vision
//! provider.

pub mod error;
pub mod invoice;
pub mod traits;

pub use error::ExtractionError;
pub use invoice::{Invoice, InvoiceEnvelope, Product};
pub use traits::{ImagePart, VisionModel, VisionRequest, VisionResponse};
