//! Invoice storage abstractions.

pub mod invoice_store;

pub use invoice_store::{InMemoryInvoiceStore, InvoiceStore};
