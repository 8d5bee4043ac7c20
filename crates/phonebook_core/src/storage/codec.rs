//! JSON encoding of the persisted contact sequence.
//!
//! # Invariants
//! - The persisted shape is a JSON array of `{id,name,number}` objects in
//!   newest-first order.
//! - Decoding rejects sequences that break record invariants or repeat ids.

use crate::model::contact::{Contact, ContactId, ContactValidationError};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum CodecError {
    Json(serde_json::Error),
    /// Stored value is valid JSON `null`.
    Null,
    InvalidContact {
        index: usize,
        source: ContactValidationError,
    },
    DuplicateId(ContactId),
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid contacts json: {err}"),
            Self::Null => write!(f, "stored contacts value is null"),
            Self::InvalidContact { index, source } => {
                write!(f, "invalid stored contact at index {index}: {source}")
            }
            Self::DuplicateId(id) => write!(f, "duplicate stored contact id `{id}`"),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::InvalidContact { source, .. } => Some(source),
            Self::Null | Self::DuplicateId(_) => None,
        }
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Serializes the full contact sequence.
pub fn encode_contacts(contacts: &[Contact]) -> Result<String, CodecError> {
    Ok(serde_json::to_string(contacts)?)
}

/// Parses a previously encoded contact sequence.
pub fn decode_contacts(raw: &str) -> Result<Vec<Contact>, CodecError> {
    let contacts: Option<Vec<Contact>> = serde_json::from_str(raw)?;
    let contacts = contacts.ok_or(CodecError::Null)?;
    check_sequence(&contacts)?;
    Ok(contacts)
}

fn check_sequence(contacts: &[Contact]) -> Result<(), CodecError> {
    let mut seen = HashSet::with_capacity(contacts.len());
    for (index, contact) in contacts.iter().enumerate() {
        contact
            .validate()
            .map_err(|source| CodecError::InvalidContact { index, source })?;
        if !seen.insert(&contact.id) {
            return Err(CodecError::DuplicateId(contact.id.clone()));
        }
    }
    Ok(())
}
