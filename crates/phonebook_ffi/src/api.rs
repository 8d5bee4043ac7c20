//! FFI use-case API for UI-shell calls.
//!
//! # Responsibility
//! - Expose the phonebook form, list and filter as sync calls for the shell.
//! - Keep one session (store + form) per process, loaded on first use.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every list-affecting call returns the new list view to re-render.

use log::warn;
use phonebook_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, open_contact_store,
    Contact, ContactField, ContactForm, ContactId, ContactListView, FormError, PhonebookConfig,
    SqliteContactStore, StoreError,
};
use std::sync::Mutex;

static SESSION: Mutex<Option<Session>> = Mutex::new(None);

struct Session {
    store: SqliteContactStore,
    form: ContactForm,
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Static description of one form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFieldSpec {
    /// Field id accepted by [`form_update_field`] (`name|number`).
    pub field: String,
    pub label: String,
    pub placeholder: String,
    /// Shown when the shell blocks an invalid value.
    pub hint: String,
}

/// Contact row for list rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactItem {
    pub id: String,
    pub name: String,
    pub number: String,
}

/// List envelope returned after every list-affecting call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactListResponse {
    pub title: String,
    pub section_title: String,
    pub filter: String,
    /// Visible contacts, newest first.
    pub items: Vec<ContactItem>,
    /// Fallback text when `items` is empty.
    pub empty_message: Option<String>,
    /// Contact count before filtering.
    pub total: u32,
    /// Empty on success; diagnostics otherwise.
    pub message: String,
}

impl ContactListResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            title: String::new(),
            section_title: String::new(),
            filter: String::new(),
            items: Vec::new(),
            empty_message: None,
            total: 0,
            message: message.into(),
        }
    }
}

impl From<ContactListView> for ContactListResponse {
    fn from(view: ContactListView) -> Self {
        Self {
            title: view.title.to_string(),
            section_title: view.section_title.to_string(),
            filter: view.filter,
            items: view.items.into_iter().map(to_contact_item).collect(),
            empty_message: view.empty_message.map(str::to_string),
            total: u32::try_from(view.total).unwrap_or(u32::MAX),
            message: String::new(),
        }
    }
}

/// Action envelope for add/delete flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactActionResponse {
    /// Whether the action was applied.
    pub ok: bool,
    /// Created or deleted contact id.
    pub contact_id: Option<String>,
    /// Set when the shell should show the blocking duplicate notice.
    pub duplicate: bool,
    /// Human-readable message for notices and diagnostics.
    pub message: String,
}

impl ContactActionResponse {
    fn success(message: impl Into<String>, contact_id: Option<String>) -> Self {
        Self {
            ok: true,
            contact_id,
            duplicate: false,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            contact_id: None,
            duplicate: false,
            message: message.into(),
        }
    }

    fn from_submit(result: Result<Contact, FormError>) -> Self {
        match result {
            Ok(contact) => Self::success("Contact added.", Some(contact.id.to_string())),
            Err(FormError::Store(err @ StoreError::DuplicateContact { .. })) => Self {
                duplicate: true,
                ..Self::failure(err.to_string())
            },
            Err(err) => Self::failure(err.to_string()),
        }
    }
}

/// Returns label/placeholder/hint metadata for both form inputs.
#[flutter_rust_bridge::frb(sync)]
pub fn form_fields() -> Vec<FormFieldSpec> {
    [ContactField::Name, ContactField::Number]
        .into_iter()
        .map(|field| FormFieldSpec {
            field: field.as_str().to_string(),
            label: field.label().to_string(),
            placeholder: field.placeholder().to_string(),
            hint: field.hint().to_string(),
        })
        .collect()
}

/// Sets one transient form field.
///
/// # FFI contract
/// - `field` is `name` or `number`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn form_update_field(field: String, value: String) -> String {
    let field = match field.parse::<ContactField>() {
        Ok(field) => field,
        Err(err) => return err.to_string(),
    };
    match with_session(|session| session.form.update_field(field, value)) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Submits the session form into the contact store.
///
/// # FFI contract
/// - Invalid fields block the submission and keep the form intact.
/// - Accepted and duplicate submissions both clear the form.
#[flutter_rust_bridge::frb(sync)]
pub fn form_submit() -> ContactActionResponse {
    match with_session(|session| session.form.submit(&mut session.store)) {
        Ok(result) => ContactActionResponse::from_submit(result),
        Err(err) => ContactActionResponse::failure(format!("form_submit failed: {err}")),
    }
}

/// Adds a contact in one call, with the same checks as the form.
#[flutter_rust_bridge::frb(sync)]
pub fn contact_add(name: String, number: String) -> ContactActionResponse {
    let mut form = ContactForm::new();
    form.update_field(ContactField::Name, name);
    form.update_field(ContactField::Number, number);
    match with_session(|session| form.submit(&mut session.store)) {
        Ok(result) => ContactActionResponse::from_submit(result),
        Err(err) => ContactActionResponse::failure(format!("contact_add failed: {err}")),
    }
}

/// Deletes a contact by id; unknown ids succeed without changes.
#[flutter_rust_bridge::frb(sync)]
pub fn contact_delete(id: String) -> ContactActionResponse {
    let Ok(contact_id) = ContactId::new(id) else {
        return ContactActionResponse::success("No contact to delete.", None);
    };
    match with_session(|session| session.store.delete(&contact_id)) {
        Ok(Some(removed)) => {
            ContactActionResponse::success("Contact deleted.", Some(removed.id.to_string()))
        }
        Ok(None) => ContactActionResponse::success("No contact to delete.", None),
        Err(err) => ContactActionResponse::failure(format!("contact_delete failed: {err}")),
    }
}

/// Replaces the list filter and returns the re-filtered view.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_set_filter(filter: String) -> ContactListResponse {
    match with_session(|session| {
        session.store.set_filter(filter);
        ContactListView::build(&session.store)
    }) {
        Ok(view) => view.into(),
        Err(err) => ContactListResponse::failure(format!("contacts_set_filter failed: {err}")),
    }
}

/// Returns the current list view.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_view() -> ContactListResponse {
    match with_session(|session| ContactListView::build(&session.store)) {
        Ok(view) => view.into(),
        Err(err) => ContactListResponse::failure(format!("contacts_view failed: {err}")),
    }
}

fn with_session<T>(f: impl FnOnce(&mut Session) -> T) -> Result<T, String> {
    let mut guard = SESSION.lock().unwrap_or_else(|poisoned| {
        warn!("event=session_lock module=ffi status=recovered reason=poisoned");
        poisoned.into_inner()
    });

    if guard.is_none() {
        let config = PhonebookConfig::from_env();
        let store = open_contact_store(&config)
            .map_err(|err| format!("phonebook store open failed: {err}"))?;
        *guard = Some(Session {
            store,
            form: ContactForm::new(),
        });
    }

    match guard.as_mut() {
        Some(session) => Ok(f(session)),
        None => Err("phonebook session unavailable".to_string()),
    }
}

fn to_contact_item(contact: Contact) -> ContactItem {
    ContactItem {
        id: contact.id.to_string(),
        name: contact.name,
        number: contact.number,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        contact_add, contact_delete, contacts_set_filter, contacts_view, core_version,
        form_fields, form_submit, form_update_field, init_logging,
    };
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn contacts_view_carries_headings() {
        let view = contacts_view();
        assert!(view.message.is_empty(), "{}", view.message);
        assert_eq!(view.title, "Phonebook");
        assert_eq!(view.section_title, "Contacts");
    }

    #[test]
    fn form_fields_describe_name_then_number() {
        let fields = form_fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].field, "name");
        assert_eq!(fields[1].placeholder, "742-98-74");
    }

    #[test]
    fn form_update_field_rejects_unknown_field() {
        let error = form_update_field("email".to_string(), "x".to_string());
        assert!(error.contains("email"));
    }

    #[test]
    fn contact_add_then_duplicate_then_delete() {
        let name = unique_name("Homer");
        let added = contact_add(name.clone(), "742-98-74".to_string());
        assert!(added.ok, "{}", added.message);
        let id = added.contact_id.clone().expect("add should return contact_id");

        let duplicate = contact_add(name.clone(), "742-98-74".to_string());
        assert!(!duplicate.ok);
        assert!(duplicate.duplicate);
        assert_eq!(duplicate.message, format!("{name} is already in contacts."));

        let filtered = contacts_set_filter(name.to_lowercase());
        assert!(filtered.message.is_empty(), "{}", filtered.message);
        assert_eq!(filtered.items.len(), 1);
        assert_eq!(filtered.items[0].id, id);

        let deleted = contact_delete(id.clone());
        assert!(deleted.ok);
        assert_eq!(deleted.contact_id.as_deref(), Some(id.as_str()));

        let view = contacts_set_filter(name.to_lowercase());
        assert!(view.items.is_empty());
        assert_eq!(
            view.empty_message.as_deref(),
            Some("You don't have contacts yet...")
        );

        let again = contact_delete(id);
        assert!(again.ok);
        assert!(again.contact_id.is_none());
    }

    #[test]
    fn contact_add_blocks_invalid_number() {
        let response = contact_add(unique_name("Bart"), "call me maybe".to_string());
        assert!(!response.ok);
        assert!(!response.duplicate);
        assert!(response.message.contains("Phone number"));
    }

    #[test]
    fn form_submit_adds_from_session_fields() {
        let name = unique_name("Lisa");
        assert!(form_update_field("name".to_string(), name.clone()).is_empty());
        assert!(form_update_field("number".to_string(), "555-12-34".to_string()).is_empty());

        let response = form_submit();
        assert!(response.ok, "{}", response.message);

        let filtered = contacts_set_filter(name);
        assert_eq!(filtered.items.len(), 1);
        contact_delete(filtered.items[0].id.clone());
    }

    // Names only accept letters, so the timestamp is spelled with a-j.
    fn unique_name(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        let suffix = nanos
            .to_string()
            .chars()
            .filter_map(|digit| digit.to_digit(10))
            .map(|digit| char::from(b'a' + digit as u8))
            .collect::<String>();
        format!("{prefix} {suffix}")
    }
}
