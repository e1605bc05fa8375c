//! Error types for invoice document generation.

use thiserror::Error;

/// Errors surfaced by the generation pipeline. A failure aborts the whole
/// generation; no partial document is ever returned.
#[derive(Debug, Error)]
pub enum InvoiceError {
    /// A required font/glyph resource is absent. Fatal: the grand-total
    /// cell cannot render without the rupee glyph.
    #[error("missing resource: {0}")]
    MissingResource(String),

    /// A monetary field is malformed or the grand-total invariant is
    /// violated beyond rounding tolerance.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl InvoiceError {
    pub fn missing_resource(message: impl Into<String>) -> Self {
        InvoiceError::MissingResource(message.into())
    }

    pub fn invalid_amount(message: impl Into<String>) -> Self {
        InvoiceError::InvalidAmount(message.into())
    }
}
