//! Display-ready projection of the phonebook.
//!
//! # Responsibility
//! - Turn store state into the list a UI shell renders.
//! - Carry the fixed headings and the empty-list fallback message.

use crate::id::IdGenerator;
use crate::model::contact::Contact;
use crate::service::contact_store::ContactStore;
use crate::storage::KeyValueStore;

pub const PHONEBOOK_TITLE: &str = "Phonebook";
pub const CONTACTS_SECTION_TITLE: &str = "Contacts";
pub const EMPTY_LIST_MESSAGE: &str = "You don't have contacts yet...";

/// Rendered list state for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactListView {
    pub title: &'static str,
    pub section_title: &'static str,
    pub filter: String,
    /// Visible contacts, newest first.
    pub items: Vec<Contact>,
    /// Set only when `items` is empty.
    pub empty_message: Option<&'static str>,
    /// Count before filtering.
    pub total: usize,
}

impl ContactListView {
    pub fn build<S: KeyValueStore, G: IdGenerator>(store: &ContactStore<S, G>) -> Self {
        let items = store.visible().into_iter().cloned().collect::<Vec<_>>();
        let empty_message = items.is_empty().then_some(EMPTY_LIST_MESSAGE);
        Self {
            title: PHONEBOOK_TITLE,
            section_title: CONTACTS_SECTION_TITLE,
            filter: store.state().filter().to_string(),
            items,
            empty_message,
            total: store.contacts().len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ContactListView, EMPTY_LIST_MESSAGE};
    use crate::id::SequentialIdGenerator;
    use crate::model::contact::ContactDraft;
    use crate::service::contact_store::ContactStore;
    use crate::storage::MemoryKeyValueStore;

    #[test]
    fn empty_message_appears_only_without_visible_items() {
        let mut store = ContactStore::open(MemoryKeyValueStore::new(), SequentialIdGenerator::default());
        assert_eq!(
            ContactListView::build(&store).empty_message,
            Some(EMPTY_LIST_MESSAGE)
        );

        store.add(ContactDraft::new("Lisa", "12345")).unwrap();
        let view = ContactListView::build(&store);
        assert_eq!(view.empty_message, None);
        assert_eq!(view.items.len(), 1);

        store.set_filter("xyz");
        let filtered = ContactListView::build(&store);
        assert_eq!(filtered.empty_message, Some(EMPTY_LIST_MESSAGE));
        assert_eq!(filtered.total, 1);
        assert_eq!(filtered.filter, "xyz");
    }
}
