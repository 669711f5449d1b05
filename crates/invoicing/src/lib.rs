//! Invoicing domain module.
//!
//! This crate contains the invoice entity model and its validation rules,
//! implemented purely as deterministic domain logic (no IO, no storage).

pub mod draft;
pub mod invoice;
pub mod seed;
pub mod summary;
pub mod validation;

pub use draft::{InvoiceDraft, ItemDraft, SundryDraft, default_invoice};
pub use invoice::{BillSundry, Invoice, InvoiceItem};
pub use seed::seed_invoices;
pub use summary::InvoiceSummary;
pub use validation::{validate, validate_draft, validate_now};
