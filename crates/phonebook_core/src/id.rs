//! Contact id generation.
//!
//! # Responsibility
//! - Provide the injectable id capability used by `ContactStore::add`.
//!
//! # Invariants
//! - Generated ids are non-empty.
//! - A single generator never yields the same id twice.

use crate::model::contact::ContactId;
use uuid::Uuid;

/// Source of fresh contact ids.
pub trait IdGenerator {
    fn next_id(&mut self) -> ContactId;
}

/// Random UUIDv4 ids in 32-char lowercase hex form.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next_id(&mut self) -> ContactId {
        ContactId::from_generated(Uuid::new_v4().simple().to_string())
    }
}

/// Deterministic `<prefix>-<n>` ids, starting at 1.
#[derive(Debug, Clone)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: u64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            prefix: if prefix.trim().is_empty() {
                "contact".to_string()
            } else {
                prefix
            },
            next: 1,
        }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new("contact")
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> ContactId {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        ContactId::from_generated(id)
    }
}

#[cfg(test)]
mod tests {
    use super::{IdGenerator, RandomIdGenerator, SequentialIdGenerator};
    use uuid::Uuid;
    use std::collections::HashSet;

    #[test]
    fn random_ids_are_distinct_v4_uuids() {
        let mut ids = RandomIdGenerator;
        let generated = (0..512)
            .map(|_| ids.next_id().as_str().to_string())
            .collect::<HashSet<_>>();
        assert_eq!(generated.len(), 512);

        for id in &generated {
            assert_eq!(id.len(), 32);
            let parsed = Uuid::parse_str(id).expect("generated id should parse as uuid");
            assert_eq!(parsed.get_version_num(), 4);
        }
    }

    #[test]
    fn sequential_ids_count_up_from_one() {
        let mut ids = SequentialIdGenerator::new("c");
        assert_eq!(ids.next_id().as_str(), "c-1");
        assert_eq!(ids.next_id().as_str(), "c-2");
    }

    #[test]
    fn sequential_blank_prefix_falls_back() {
        let mut ids = SequentialIdGenerator::new(" ");
        assert_eq!(ids.next_id().as_str(), "contact-1");
    }
}
