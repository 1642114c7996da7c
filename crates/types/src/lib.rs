//! Shared type definitions for the tutorial catalog and progress store.
//!
//! Everything here is plain data: command descriptors as they are authored in
//! the catalog, difficulty levels, and category metadata.

use std::{error::Error, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// How demanding a command is for a learner.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Human readable label used by list and detail views.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            _ => Err(ParseDifficultyError),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseDifficultyError;

impl fmt::Display for ParseDifficultyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid difficulty; expected 'beginner', 'intermediate' or 'advanced'")
    }
}

impl Error for ParseDifficultyError {}

/// A canned command as authored in the catalog.
///
/// Descriptors are immutable once loaded. History entries keep a full copy so
/// they stay meaningful even if the catalog changes between sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Identifier used for completion tracking (e.g., "claude-help")
    pub id: String,
    /// Display name (e.g., "claude --help")
    pub name: String,
    /// What the command does
    pub description: String,
    /// Syntax template with placeholders
    pub syntax: String,
    /// Example invocation echoed into the terminal on selection
    pub example: String,
    /// Canned output replayed when the command is run
    pub output: String,
    /// Identifier of the owning category
    pub category: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub best_practices: Vec<String>,
    #[serde(default)]
    pub common_mistakes: Vec<String>,
    /// Soft references to other commands, by identifier or display name.
    /// Nothing guarantees these resolve.
    #[serde(default)]
    pub related_commands: Vec<String>,
}

/// Category metadata. The commands of a category are never stored here; they
/// are derived by filtering the catalog on `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Glyph shown next to the category name
    pub icon: String,
}
