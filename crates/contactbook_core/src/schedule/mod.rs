//! Birthday scheduling.
//!
//! # Responsibility
//! - Compute the next observed birthday for a reference date.
//! - Select contacts whose observed birthday falls within the upcoming week.
//!
//! # Invariants
//! - The reference date is always caller-supplied; nothing reads the clock.
//! - Date shifts use calendar-safe arithmetic.

pub mod upcoming;
