use clitutor_types::{Category, Command};
use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Catalog document bundled with the binary.
const EMBEDDED_CATALOG: &str = include_str!("../data/commands.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog document is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// On-disk shape of a catalog document.
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    categories: Vec<Category>,
    commands: Vec<Command>,
}

/// A related-command reference paired with its descriptor when it resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelatedCommand<'a> {
    pub reference: &'a str,
    pub command: Option<&'a Command>,
}

/// Read-only table of tutorial commands grouped into categories.
///
/// Identifiers are unique inside a loaded catalog: when the source document
/// repeats an identifier, the first descriptor keeps its slot and later ones
/// are set aside in [`Catalog::shadowed`].
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    categories: Vec<Category>,
    commands: Vec<Command>,
    by_id: IndexMap<String, usize>,
    shadowed: Vec<Command>,
}

impl Catalog {
    /// Loads the catalog compiled into the binary.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use clitutor_catalog::Catalog;
    ///
    /// let catalog = Catalog::from_embedded().expect("embedded catalog parses");
    /// assert!(catalog.find("claude-help").is_some());
    /// ```
    pub fn from_embedded() -> Result<Self, CatalogError> {
        Self::from_json_str(EMBEDDED_CATALOG)
    }

    /// Parses a catalog document (`{"categories": [...], "commands": [...]}`).
    pub fn from_json_str(document: &str) -> Result<Self, CatalogError> {
        let CatalogDocument { categories, commands } = serde_json::from_str(document)?;
        Ok(Self::from_parts(categories, commands))
    }

    /// Builds a catalog from already parsed parts, applying first-wins
    /// de-duplication of identifiers.
    pub fn from_parts(categories: Vec<Category>, commands: Vec<Command>) -> Self {
        let mut catalog = Catalog {
            categories,
            ..Default::default()
        };
        for command in commands {
            if let Some(&kept) = catalog.by_id.get(&command.id) {
                warn!(
                    id = %command.id,
                    kept_category = %catalog.commands[kept].category,
                    shadowed_category = %command.category,
                    "Duplicate command identifier in catalog; keeping the first definition"
                );
                catalog.shadowed.push(command);
                continue;
            }
            catalog.by_id.insert(command.id.clone(), catalog.commands.len());
            catalog.commands.push(command);
        }
        debug!(
            commands = catalog.commands.len(),
            categories = catalog.categories.len(),
            shadowed = catalog.shadowed.len(),
            "catalog loaded"
        );
        catalog
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// All unique commands in catalog order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Descriptors dropped because an earlier entry used the same identifier.
    pub fn shadowed(&self) -> &[Command] {
        &self.shadowed
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    /// Looks up a command by identifier.
    pub fn find(&self, id: &str) -> Option<&Command> {
        self.by_id.get(id).map(|&index| &self.commands[index])
    }

    /// Resolves a reference that may be an identifier or a display name.
    pub fn resolve(&self, reference: &str) -> Option<&Command> {
        let reference = reference.trim();
        self.find(reference)
            .or_else(|| self.commands.iter().find(|command| command.name == reference))
    }

    /// Commands of a category, derived by filtering on the category identifier.
    pub fn commands_in<'a>(&'a self, category_id: &'a str) -> impl Iterator<Item = &'a Command> + 'a {
        self.commands.iter().filter(move |command| command.category == category_id)
    }

    /// Sum of the command counts of every category.
    pub fn total_command_count(&self) -> usize {
        self.categories
            .iter()
            .map(|category| self.commands_in(&category.id).count())
            .sum()
    }

    /// Related references of `command`, each resolved when possible.
    pub fn related<'a>(&'a self, command: &'a Command) -> Vec<RelatedCommand<'a>> {
        command
            .related_commands
            .iter()
            .map(|reference| RelatedCommand {
                reference: reference.as_str(),
                command: self.resolve(reference),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clitutor_types::Difficulty;

    fn command(id: &str, name: &str, category: &str) -> Command {
        Command {
            id: id.into(),
            name: name.into(),
            description: format!("{name} description"),
            syntax: name.into(),
            example: name.into(),
            output: format!("{name} output"),
            category: category.into(),
            difficulty: Difficulty::Beginner,
            best_practices: vec![],
            common_mistakes: vec![],
            related_commands: vec![],
        }
    }

    fn category(id: &str) -> Category {
        Category {
            id: id.into(),
            name: id.to_uppercase(),
            description: String::new(),
            icon: "*".into(),
        }
    }

    #[test]
    fn duplicate_ids_keep_first_definition() {
        let first = command("dup", "first", "basic");
        let second = command("dup", "second", "basic");
        let catalog = Catalog::from_parts(
            vec![category("basic")],
            vec![first.clone(), command("other", "other", "basic"), second.clone()],
        );

        assert_eq!(catalog.commands().len(), 2);
        assert_eq!(catalog.find("dup"), Some(&first));
        assert_eq!(catalog.shadowed(), &[second]);
        assert_eq!(catalog.total_command_count(), 2);
    }

    #[test]
    fn categories_are_filtered_views() {
        let catalog = Catalog::from_parts(
            vec![category("basic"), category("flags")],
            vec![
                command("a", "a", "basic"),
                command("b", "b", "flags"),
                command("c", "c", "basic"),
                command("orphan", "orphan", "missing"),
            ],
        );

        let basic: Vec<_> = catalog.commands_in("basic").map(|c| c.id.as_str()).collect();
        assert_eq!(basic, vec!["a", "c"]);
        // commands outside every category do not count toward the total
        assert_eq!(catalog.total_command_count(), 3);
    }

    #[test]
    fn related_references_resolve_by_id_or_name() {
        let mut help = command("claude-help", "claude --help", "basic");
        help.related_commands = vec!["claude --version".into(), "claude-help".into(), "claude config".into()];
        let version = command("claude-version", "claude --version", "basic");
        let catalog = Catalog::from_parts(vec![category("basic")], vec![help.clone(), version.clone()]);

        let related = catalog.related(&help);
        assert_eq!(related.len(), 3);
        assert_eq!(related[0].command, Some(&version));
        assert_eq!(related[1].command.map(|c| c.id.as_str()), Some("claude-help"));
        assert_eq!(related[2].command, None);
        assert_eq!(related[2].reference, "claude config");
    }

    #[test]
    fn malformed_document_is_an_error() {
        let error = Catalog::from_json_str("{\"categories\": []}").unwrap_err();
        assert!(matches!(error, CatalogError::Parse(_)));
    }
}
