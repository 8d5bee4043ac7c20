//! UI-shell bridge for the phonebook core.

pub mod api;
