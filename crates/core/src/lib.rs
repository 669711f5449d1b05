//! `invoicely-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no storage, no rendering).

pub mod clock;
pub mod entity;
pub mod error;
pub mod field_errors;
pub mod id;

pub use clock::{Clock, FixedClock, SystemClock};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use field_errors::FieldErrors;
pub use id::{InvoiceId, ItemId, SundryId};
