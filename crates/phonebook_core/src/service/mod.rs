//! Phonebook use-case services.
//!
//! # Responsibility
//! - Own in-memory phonebook state and keep it in sync with storage.
//! - Collect form input and hand validated drafts to the store.
//! - Build display-ready projections for UI shells.
//!
//! # Invariants
//! - Services never bypass `KeyValueStore` for persistence.
//! - Service layer remains storage-agnostic.

pub mod contact_form;
pub mod contact_store;
pub mod view;
