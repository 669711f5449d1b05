//! Infrastructure layer: the process-lifetime invoice store.

pub mod store;

mod integration_tests;

pub use store::{InMemoryInvoiceStore, InvoiceStore};
