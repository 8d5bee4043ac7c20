//! Contact domain model.
//!
//! # Responsibility
//! - Define the persisted contact record and the draft handed over by forms.
//! - Provide the exact-match identity check used for duplicate detection.
//!
//! # Invariants
//! - `id` is assigned once at creation and never mutated.
//! - `name` and `number` are non-blank for every stored contact.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Opaque, stable identifier of one contact.
///
/// Serialized as a bare string to keep the persisted shape `{id,name,number}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(String);

impl ContactId {
    /// Wraps a raw id string.
    ///
    /// # Errors
    /// - Returns `ContactValidationError::EmptyId` for blank input.
    pub fn new(raw: impl Into<String>) -> Result<Self, ContactValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(ContactValidationError::EmptyId);
        }
        Ok(Self(raw))
    }

    /// Wraps an id produced by an in-crate generator, which never yields
    /// blank values.
    pub(crate) fn from_generated(raw: String) -> Self {
        debug_assert!(!raw.trim().is_empty());
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ContactId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validation errors for contact records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactValidationError {
    EmptyId,
    EmptyName,
    EmptyNumber,
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "contact id cannot be empty"),
            Self::EmptyName => write!(f, "contact name cannot be empty"),
            Self::EmptyNumber => write!(f, "contact number cannot be empty"),
        }
    }
}

impl Error for ContactValidationError {}

/// Candidate contact collected by a form before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactDraft {
    pub name: String,
    pub number: String,
}

impl ContactDraft {
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            number: number.into(),
        }
    }

    /// Attaches an id and turns the draft into a contact.
    pub fn into_contact(self, id: ContactId) -> Contact {
        Contact {
            id,
            name: self.name,
            number: self.number,
        }
    }
}

/// Persisted phonebook entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub number: String,
}

impl Contact {
    /// Validates record-level invariants.
    ///
    /// Used on the storage read path; character patterns are enforced by the
    /// form at input time, not here.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        if self.id.as_str().trim().is_empty() {
            return Err(ContactValidationError::EmptyId);
        }
        if self.name.trim().is_empty() {
            return Err(ContactValidationError::EmptyName);
        }
        if self.number.trim().is_empty() {
            return Err(ContactValidationError::EmptyNumber);
        }
        Ok(())
    }

    /// Returns whether this contact has exactly the draft's name and number.
    ///
    /// Case-sensitive on both fields.
    pub fn matches_draft(&self, draft: &ContactDraft) -> bool {
        self.name == draft.name && self.number == draft.number
    }

    /// Returns whether `name` or `number` contains the already-lowercased
    /// needle.
    pub fn matches_filter(&self, normalized_needle: &str) -> bool {
        self.name.to_lowercase().contains(normalized_needle)
            || self.number.to_lowercase().contains(normalized_needle)
    }
}
