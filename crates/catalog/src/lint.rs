//! Consistency report for a loaded catalog.

use std::fmt;

use crate::Catalog;

/// A descriptor set aside because its identifier was already taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadowedEntry {
    pub id: String,
    pub name: String,
    pub category: String,
}

/// A related-command reference that matches no identifier or name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    pub command_id: String,
    pub reference: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogLint {
    pub shadowed: Vec<ShadowedEntry>,
    /// Commands whose category identifier matches no category.
    pub orphaned: Vec<String>,
    pub dangling: Vec<DanglingReference>,
}

impl CatalogLint {
    /// True when the catalog would load without dropping or hiding anything.
    /// Dangling related references are soft and do not count.
    pub fn is_clean(&self) -> bool {
        self.shadowed.is_empty() && self.orphaned.is_empty()
    }
}

impl Catalog {
    pub fn lint(&self) -> CatalogLint {
        let shadowed = self
            .shadowed()
            .iter()
            .map(|command| ShadowedEntry {
                id: command.id.clone(),
                name: command.name.clone(),
                category: command.category.clone(),
            })
            .collect();

        let orphaned = self
            .commands()
            .iter()
            .filter(|command| self.category(&command.category).is_none())
            .map(|command| command.id.clone())
            .collect();

        let dangling = self
            .commands()
            .iter()
            .flat_map(|command| {
                self.related(command)
                    .into_iter()
                    .filter(|related| related.command.is_none())
                    .map(|related| DanglingReference {
                        command_id: command.id.clone(),
                        reference: related.reference.to_string(),
                    })
            })
            .collect();

        CatalogLint {
            shadowed,
            orphaned,
            dangling,
        }
    }
}

impl fmt::Display for CatalogLint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Shadowed duplicate identifiers: {}", self.shadowed.len())?;
        for entry in &self.shadowed {
            writeln!(f, "  {} ({}) in '{}'", entry.id, entry.name, entry.category)?;
        }
        writeln!(f, "Commands without a category: {}", self.orphaned.len())?;
        for id in &self.orphaned {
            writeln!(f, "  {id}")?;
        }
        writeln!(f, "Unresolved related references: {}", self.dangling.len())?;
        for dangling in &self.dangling {
            writeln!(f, "  {} -> {}", dangling.command_id, dangling.reference)?;
        }
        Ok(())
    }
}
