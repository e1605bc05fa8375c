//! # invoice-forge – GST tax-invoice → PDF composition engine
//!
//! This crate turns a validated invoice record (header + ordered line
//! items) into a finished, multi-page tax-invoice PDF. The pipeline stages
//! are:
//!
//! 1. **Validate** – monetary invariants on the header ([`invoice`])
//! 2. **Aggregate** – HSN-wise CGST/SGST or IGST breakdown ([`tax`])
//! 3. **Paginate** – fixed-capacity item chunks per page ([`pagination`])
//! 4. **Compose** – repeating page frame + item and tax-summary tables
//!    ([`frame`], [`table`], [`words`])
//! 5. **Render** – emit PDF bytes via printpdf ([`render`])
//!
//! The composed document is a fixed template: every block position is
//! deterministic for a given input. Persistence, authentication, and HTTP
//! delivery are external collaborators – the crate consumes an
//! already-validated record and returns bytes.

pub mod error;
pub mod fonts;
pub mod frame;
pub mod invoice;
pub mod layout;
pub mod pagination;
pub mod pipeline;
pub mod render;
pub mod samples;
pub mod table;
pub mod tax;
pub mod words;

// Re-exports for convenience
pub use error::InvoiceError;
pub use fonts::FontStore;
pub use invoice::{InvoiceHeader, InvoiceLineItem, TransactionKind};
pub use pipeline::{compute_invoice_layout, generate_invoice_document, invoice_pdf_filename};
