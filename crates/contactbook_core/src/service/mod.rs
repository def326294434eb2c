//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate address book mutations and snapshot persistence.
//! - Keep CLI layers decoupled from storage details.

pub mod contact_service;
