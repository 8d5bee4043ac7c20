//! Core domain logic for the phonebook.
//! This crate is the single source of truth for contact invariants.

pub mod config;
pub mod db;
pub mod id;
pub mod logging;
pub mod model;
pub mod service;
pub mod storage;

pub use config::PhonebookConfig;
pub use id::{IdGenerator, RandomIdGenerator, SequentialIdGenerator};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::contact::{Contact, ContactDraft, ContactId, ContactValidationError};
pub use service::contact_form::{ContactField, ContactForm, FormError};
pub use service::contact_store::{
    load_contacts, ContactStore, PhonebookState, StoreError, StoreResult, DEFAULT_STORAGE_KEY,
};
pub use service::view::{ContactListView, EMPTY_LIST_MESSAGE};
pub use storage::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StorageError, StorageResult,
};

/// Store wired to the on-disk key-value table and random ids.
pub type SqliteContactStore = ContactStore<SqliteKeyValueStore, RandomIdGenerator>;

/// Opens the SQLite-backed store described by `config`.
pub fn open_contact_store(config: &PhonebookConfig) -> StorageResult<SqliteContactStore> {
    let storage = SqliteKeyValueStore::open(&config.db_path)?;
    Ok(ContactStore::open_with_key(
        storage,
        RandomIdGenerator,
        config.storage_key.as_str(),
    ))
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
