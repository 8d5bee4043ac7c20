//! Contact input form.
//!
//! # Responsibility
//! - Hold the two transient input fields (name, number).
//! - Enforce input patterns before anything reaches the store.
//! - Hand the draft to an injected `ContactStore` and reset afterwards.
//!
//! # Invariants
//! - A submission blocked by a pattern leaves fields and store untouched.
//! - A submission that reaches the store always clears both fields, even
//!   when the store rejects it as a duplicate.

use crate::id::IdGenerator;
use crate::model::contact::{Contact, ContactDraft};
use crate::service::contact_store::{ContactStore, StoreError};
use crate::storage::KeyValueStore;
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

static NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Zа-яА-Я]+(([' -][a-zA-Zа-яА-Я ])?[a-zA-Zа-яА-Я]*)*$")
        .expect("valid name regex")
});
static NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:\+?[0-9]{1,4}?[-.\s]?\(?[0-9]{1,3}?\)?[-.\s]?[0-9]{1,4}[-.\s]?[0-9]{1,4}[-.\s]?[0-9]{1,9})$",
    )
    .expect("valid number regex")
});

/// One of the two form inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Name,
    Number,
}

impl ContactField {
    /// Stable field id, also accepted by `FromStr`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Number => "number",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Number => "Number",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Name => "Homer Simpson",
            Self::Number => "742-98-74",
        }
    }

    /// User-facing description of the accepted input shape.
    pub fn hint(self) -> &'static str {
        match self {
            Self::Name => {
                "Name may contain only letters, apostrophe, dash and spaces. For example Adrian, Jacob Mercer, Charles de Batz de Castelmore d'Artagnan"
            }
            Self::Number => {
                "Phone number must be digits and can contain spaces, dashes, parentheses and can start with +"
            }
        }
    }

    /// Whether `value` is non-empty and matches this field's pattern.
    pub fn accepts(self, value: &str) -> bool {
        match self {
            Self::Name => NAME_RE.is_match(value),
            Self::Number => NUMBER_RE.is_match(value),
        }
    }
}

impl FromStr for ContactField {
    type Err = FormError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "name" => Ok(Self::Name),
            "number" => Ok(Self::Number),
            other => Err(FormError::UnknownField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    UnknownField(String),
    /// Field is empty or breaks its pattern; submission was blocked.
    InvalidField(ContactField),
    Store(StoreError),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownField(name) => write!(f, "unknown form field `{name}`"),
            Self::InvalidField(field) => write!(f, "{}", field.hint()),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for FormError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for FormError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Transient name/number inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    name: String,
    number: String,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_field(&mut self, field: ContactField, value: impl Into<String>) {
        match field {
            ContactField::Name => self.name = value.into(),
            ContactField::Number => self.number = value.into(),
        }
    }

    pub fn field(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Number => &self.number,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.number.is_empty()
    }

    /// Checks both fields and returns the draft they describe.
    pub fn validate(&self) -> Result<ContactDraft, FormError> {
        for field in [ContactField::Name, ContactField::Number] {
            if !field.accepts(self.field(field)) {
                return Err(FormError::InvalidField(field));
            }
        }
        Ok(ContactDraft::new(self.name.clone(), self.number.clone()))
    }

    /// Submits the current fields to `store`.
    ///
    /// # Errors
    /// - `InvalidField` when a field is blocked; nothing is cleared.
    /// - `Store` when the store rejects the draft; fields are cleared anyway.
    pub fn submit<S: KeyValueStore, G: IdGenerator>(
        &mut self,
        store: &mut ContactStore<S, G>,
    ) -> Result<Contact, FormError> {
        let draft = self.validate().map_err(|err| {
            if let FormError::InvalidField(field) = &err {
                info!(
                    "event=form_submit module=form status=blocked field={}",
                    field.as_str()
                );
            }
            err
        })?;

        let result = store.add(draft);
        self.reset();
        Ok(result?)
    }

    pub fn reset(&mut self) {
        self.name.clear();
        self.number.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{ContactField, ContactForm, FormError};
    use crate::id::SequentialIdGenerator;
    use crate::service::contact_store::ContactStore;
    use crate::storage::MemoryKeyValueStore;

    #[test]
    fn name_pattern_accepts_letters_apostrophe_dash_space() {
        for name in [
            "Adrian",
            "Jacob Mercer",
            "Charles de Batz de Castelmore d'Artagnan",
            "Mary-Jane",
            "Анна Каренина",
        ] {
            assert!(ContactField::Name.accepts(name), "{name} should be accepted");
        }
        for name in ["", " Homer", "Homer1", "R2-D2", "Homer!"] {
            assert!(!ContactField::Name.accepts(name), "{name} should be rejected");
        }
    }

    #[test]
    fn number_pattern_accepts_common_shapes() {
        for number in ["742-98-74", "+1 (555) 123-4567", "12345", "459.12.56"] {
            assert!(
                ContactField::Number.accepts(number),
                "{number} should be accepted"
            );
        }
        for number in ["", "abc", "12", "555-CALL", "++12345"] {
            assert!(
                !ContactField::Number.accepts(number),
                "{number} should be rejected"
            );
        }
    }

    #[test]
    fn field_parses_from_input_name() {
        assert_eq!("name".parse::<ContactField>().unwrap(), ContactField::Name);
        assert_eq!(
            " number ".parse::<ContactField>().unwrap(),
            ContactField::Number
        );
        assert!(matches!(
            "email".parse::<ContactField>(),
            Err(FormError::UnknownField(_))
        ));
    }

    #[test]
    fn blocked_submit_keeps_fields_and_store() {
        let mut store = ContactStore::open(MemoryKeyValueStore::new(), SequentialIdGenerator::default());
        let mut form = ContactForm::new();
        form.update_field(ContactField::Name, "Homer");
        form.update_field(ContactField::Number, "call me");

        let err = form.submit(&mut store).unwrap_err();
        assert_eq!(err, FormError::InvalidField(ContactField::Number));
        assert_eq!(form.field(ContactField::Name), "Homer");
        assert!(store.contacts().is_empty());
        assert_eq!(store.storage().writes(), 0);
    }

    #[test]
    fn submit_clears_fields_after_success_and_duplicate() {
        let mut store = ContactStore::open(MemoryKeyValueStore::new(), SequentialIdGenerator::default());
        let mut form = ContactForm::new();

        for _ in 0..2 {
            form.update_field(ContactField::Name, "Homer Simpson");
            form.update_field(ContactField::Number, "742-98-74");
            let _ = form.submit(&mut store);
            assert!(form.is_empty());
        }

        assert_eq!(store.contacts().len(), 1);
    }

    #[test]
    fn duplicate_submit_surfaces_store_notice() {
        let mut store = ContactStore::open(MemoryKeyValueStore::new(), SequentialIdGenerator::default());
        let mut form = ContactForm::new();
        form.update_field(ContactField::Name, "Marge");
        form.update_field(ContactField::Number, "555-12-12");
        form.submit(&mut store).unwrap();

        form.update_field(ContactField::Name, "Marge");
        form.update_field(ContactField::Number, "555-12-12");
        let err = form.submit(&mut store).unwrap_err();
        assert_eq!(err.to_string(), "Marge is already in contacts.");
    }
}
