use thiserror::Error;

/// Opaque failure returned by the invoice extraction pipeline.
///
/// Decode failures, provider call failures, and unparseable responses all
/// collapse into this single variant at the adapter boundary. The
/// distinction between them lives in server-side logs only; callers see one
/// generic failure and map it to a generic HTTP 500.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invoice extraction failed")]
pub struct ExtractionError;
