//! Domain model for the phonebook.
//!
//! # Responsibility
//! - Define the canonical contact record shared by store, storage and views.
//! - Keep identity (`ContactId`) separate from the editable draft shape.
//!
//! # Invariants
//! - Every persisted contact is identified by a stable, non-empty `ContactId`.
//! - Deletion is a hard remove by id; ids are never reused.

pub mod contact;
