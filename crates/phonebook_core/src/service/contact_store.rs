//! Contact store: state owner for the phonebook.
//!
//! # Responsibility
//! - Load the contact sequence once at construction.
//! - Apply add/delete/filter operations and derive the visible list.
//! - Persist the full sequence after every change to it.
//!
//! # Invariants
//! - Contacts are ordered newest-first.
//! - No two contacts share both `name` and `number` (exact match).
//! - The filter is session-only and never persisted.
//! - Each sequence-changing mutation issues exactly one storage write.
//! - Generated ids never collide with ids already in the sequence.

use crate::id::IdGenerator;
use crate::model::contact::{Contact, ContactDraft, ContactId};
use crate::storage::{decode_contacts, encode_contacts, KeyValueStore};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key used when callers do not configure one.
pub const DEFAULT_STORAGE_KEY: &str = "contacts";

pub type StoreResult<T> = Result<T, StoreError>;

/// User-visible store failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A contact with the same name and number already exists.
    DuplicateContact { name: String, number: String },
    /// The id generator kept returning ids already in use.
    IdUnavailable { attempts: usize },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateContact { name, .. } => write!(f, "{name} is already in contacts."),
            Self::IdUnavailable { attempts } => {
                write!(f, "no unused contact id after {attempts} attempts")
            }
        }
    }
}

impl Error for StoreError {}

/// Snapshot of phonebook state handed back to callers after mutations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhonebookState {
    contacts: Vec<Contact>,
    filter: String,
}

impl PhonebookState {
    pub fn new(contacts: Vec<Contact>) -> Self {
        Self {
            contacts,
            filter: String::new(),
        }
    }

    /// All contacts, newest first.
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Contacts whose name or number contains the filter, ignoring case.
    ///
    /// An empty filter yields the full sequence.
    pub fn visible(&self) -> Vec<&Contact> {
        if self.filter.is_empty() {
            return self.contacts.iter().collect();
        }

        let needle = self.filter.to_lowercase();
        self.contacts
            .iter()
            .filter(|contact| contact.matches_filter(&needle))
            .collect()
    }

    pub fn find_duplicate(&self, draft: &ContactDraft) -> Option<&Contact> {
        self.contacts
            .iter()
            .find(|contact| contact.matches_draft(draft))
    }
}

/// Reads the persisted contact sequence, treating any failure as empty.
///
/// Absent keys, storage errors and malformed values all yield an empty list;
/// failures are logged, never surfaced.
pub fn load_contacts<S: KeyValueStore + ?Sized>(storage: &S, key: &str) -> Vec<Contact> {
    let raw = match storage.load(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            info!("event=contacts_load module=store status=ok source=empty count=0");
            return Vec::new();
        }
        Err(err) => {
            warn!(
                "event=contacts_load module=store status=error error_code=storage_read_failed error={}",
                err
            );
            return Vec::new();
        }
    };

    match decode_contacts(&raw) {
        Ok(contacts) => {
            info!(
                "event=contacts_load module=store status=ok source=storage count={}",
                contacts.len()
            );
            contacts
        }
        Err(err) => {
            warn!(
                "event=contacts_load module=store status=error error_code=invalid_persisted_data error={}",
                err
            );
            Vec::new()
        }
    }
}

/// Phonebook state owner with an injected storage and id source.
pub struct ContactStore<S: KeyValueStore, G: IdGenerator> {
    storage: S,
    ids: G,
    key: String,
    state: PhonebookState,
}

impl<S: KeyValueStore, G: IdGenerator> ContactStore<S, G> {
    /// Creates a store under the default `contacts` key.
    pub fn open(storage: S, ids: G) -> Self {
        Self::open_with_key(storage, ids, DEFAULT_STORAGE_KEY)
    }

    /// Creates a store and loads its initial contacts from `key`.
    pub fn open_with_key(storage: S, ids: G, key: impl Into<String>) -> Self {
        let key = key.into();
        let contacts = load_contacts(&storage, &key);
        Self {
            storage,
            ids,
            key,
            state: PhonebookState::new(contacts),
        }
    }

    /// Adds a contact at the front of the sequence.
    ///
    /// # Errors
    /// - `StoreError::DuplicateContact` when name and number both match an
    ///   existing contact.
    /// - `StoreError::IdUnavailable` when the generator yields only ids in use.
    ///
    /// State and storage are left untouched on error.
    pub fn add(&mut self, draft: ContactDraft) -> StoreResult<Contact> {
        if self.state.find_duplicate(&draft).is_some() {
            info!(
                "event=contact_add module=store status=rejected reason=duplicate count={}",
                self.state.contacts.len()
            );
            return Err(StoreError::DuplicateContact {
                name: draft.name,
                number: draft.number,
            });
        }

        let contact = draft.into_contact(self.fresh_id()?);
        self.state.contacts.insert(0, contact.clone());
        info!(
            "event=contact_add module=store status=ok count={}",
            self.state.contacts.len()
        );
        self.persist();
        Ok(contact)
    }

    /// Removes the contact with `id`; absent ids are a no-op.
    pub fn delete(&mut self, id: &ContactId) -> Option<Contact> {
        let position = self
            .state
            .contacts
            .iter()
            .position(|contact| &contact.id == id);

        let Some(position) = position else {
            debug!("event=contact_delete module=store status=noop");
            return None;
        };

        let removed = self.state.contacts.remove(position);
        info!(
            "event=contact_delete module=store status=ok count={}",
            self.state.contacts.len()
        );
        self.persist();
        Some(removed)
    }

    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.state.filter = text.into();
    }

    pub fn visible(&self) -> Vec<&Contact> {
        self.state.visible()
    }

    pub fn state(&self) -> &PhonebookState {
        &self.state
    }

    pub fn contacts(&self) -> &[Contact] {
        self.state.contacts()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// Draws ids until one is unused, giving up after `len + 1` attempts.
    fn fresh_id(&mut self) -> StoreResult<ContactId> {
        let attempts = self.state.contacts.len() + 1;
        for _ in 0..attempts {
            let id = self.ids.next_id();
            if !self.state.contacts.iter().any(|contact| contact.id == id) {
                return Ok(id);
            }
            warn!("event=contact_add module=store status=retry reason=id_in_use");
        }

        error!(
            "event=contact_add module=store status=error error_code=id_unavailable attempts={}",
            attempts
        );
        Err(StoreError::IdUnavailable { attempts })
    }

    fn persist(&mut self) {
        let encoded = match encode_contacts(&self.state.contacts) {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!(
                    "event=contacts_save module=store status=error error_code=encode_failed error={}",
                    err
                );
                return;
            }
        };

        match self.storage.save(&self.key, &encoded) {
            Ok(()) => debug!(
                "event=contacts_save module=store status=ok count={} bytes={}",
                self.state.contacts.len(),
                encoded.len()
            ),
            // Write failures leave the in-memory state authoritative.
            Err(err) => error!(
                "event=contacts_save module=store status=error error_code=storage_write_failed error={}",
                err
            ),
        }
    }
}
