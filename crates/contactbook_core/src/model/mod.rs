//! Contact domain model.
//!
//! # Responsibility
//! - Define validated field value types and the record/address book shapes.
//! - Keep every invariant enforceable without storage or UI context.
//!
//! # Invariants
//! - Model types never log or print.
//! - All entities are plain data and round-trip through serde.

pub mod address_book;
pub mod fields;
pub mod record;
