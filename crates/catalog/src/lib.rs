//! Catalog crate holding the tutorial's canned commands.
//!
//! The catalog document is embedded at compile time and parsed once at
//! startup. It is read-only afterwards; categories are metadata only and their
//! command lists are derived by filtering on the category identifier.

pub mod lint;
pub mod models;
pub mod search;

pub use clitutor_types::{Category, Command, Difficulty};
pub use lint::{CatalogLint, DanglingReference, ShadowedEntry};
pub use models::{Catalog, CatalogError, RelatedCommand};
pub use search::SearchHit;

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    /// The embedded document loads, every kept identifier is unique, and
    /// every command belongs to a known category.
    #[test]
    fn embedded_catalog_is_consistent() {
        let catalog = Catalog::from_embedded().expect("load embedded catalog");
        assert!(!catalog.commands().is_empty(), "catalog commands should not be empty");

        let mut seen = HashSet::new();
        for command in catalog.commands() {
            assert!(seen.insert(command.id.as_str()), "duplicate id kept: {}", command.id);
        }

        let lint = catalog.lint();
        assert!(lint.orphaned.is_empty(), "orphaned commands: {:?}", lint.orphaned);
        assert_eq!(catalog.total_command_count(), catalog.commands().len());
    }
}
