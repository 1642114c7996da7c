//! Progress state value and its transitions.
//!
//! `ProgressState` is a plain value: every operation is a method that moves it
//! to the next state. Locking, persistence and the simulated execution live in
//! [`crate::ProgressStore`], which wraps one of these.

use std::collections::{HashSet, VecDeque};

use chrono::{DateTime, Utc};
use clitutor_types::Command;
use clitutor_util::PROMPT_PREFIX;
use serde::{Deserialize, Serialize};

use crate::persistence::PersistedProgress;

/// Maximum number of history entries retained, newest first.
pub const HISTORY_LIMIT: usize = 50;

pub const WELCOME_BANNER: [&str; 3] = [
    "Welcome to Claude Code Tutorial! 🚀",
    "Select a command from the sidebar to get started.",
    "",
];

pub const CLEARED_BANNER: [&str; 3] = ["Terminal cleared.", "Welcome to Claude Code Tutorial! 🚀", ""];

pub const RESET_BANNER: [&str; 4] = [
    "Progress reset.",
    "Welcome to Claude Code Tutorial! 🚀",
    "Select a command from the sidebar to get started.",
    "",
];

/// Prefix of the transcript line written when an execution fails.
pub const ERROR_PREFIX: &str = "Error: ";

/// One completed execution.
///
/// `id` is `<command id>-<unix millis>`; two runs of the same command inside
/// the same millisecond share an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    /// Full copy of the command as it was when it ran
    pub command: Command,
    pub timestamp: DateTime<Utc>,
    pub output: String,
}

impl HistoryEntry {
    pub fn new(command: Command, output: String, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: format!("{}-{}", command.id, timestamp.timestamp_millis()),
            command,
            timestamp,
            output,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressState {
    selected_command: Option<Command>,
    selected_category: Option<String>,
    is_executing: bool,
    show_documentation: bool,
    execution_history: VecDeque<HistoryEntry>,
    completed_commands: HashSet<String>,
    terminal_output: Vec<String>,
    current_input: String,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self {
            selected_command: None,
            selected_category: None,
            is_executing: false,
            show_documentation: true,
            execution_history: VecDeque::new(),
            completed_commands: HashSet::new(),
            terminal_output: banner(&WELCOME_BANNER),
            current_input: String::new(),
        }
    }
}

impl ProgressState {
    /// Rebuild a state from its persisted subset. Everything that is not
    /// persisted starts from its initial value.
    pub fn rehydrate(persisted: PersistedProgress) -> Self {
        let mut execution_history: VecDeque<HistoryEntry> = persisted.execution_history.into();
        execution_history.truncate(HISTORY_LIMIT);
        Self {
            selected_category: persisted.selected_category,
            show_documentation: persisted.show_documentation,
            execution_history,
            completed_commands: persisted.completed_commands.into_iter().collect(),
            ..Self::default()
        }
    }

    /// The subset of the state that survives a restart.
    pub fn persisted(&self) -> PersistedProgress {
        let mut completed_commands: Vec<String> = self.completed_commands.iter().cloned().collect();
        completed_commands.sort();
        PersistedProgress {
            execution_history: self.execution_history.iter().cloned().collect(),
            completed_commands,
            selected_category: self.selected_category.clone(),
            show_documentation: self.show_documentation,
        }
    }

    pub fn selected_command(&self) -> Option<&Command> {
        self.selected_command.as_ref()
    }

    pub fn selected_category(&self) -> Option<&str> {
        self.selected_category.as_deref()
    }

    pub fn is_executing(&self) -> bool {
        self.is_executing
    }

    pub fn show_documentation(&self) -> bool {
        self.show_documentation
    }

    /// History entries, newest first.
    pub fn execution_history(&self) -> &VecDeque<HistoryEntry> {
        &self.execution_history
    }

    pub fn completed_commands(&self) -> &HashSet<String> {
        &self.completed_commands
    }

    pub fn terminal_output(&self) -> &[String] {
        &self.terminal_output
    }

    pub fn current_input(&self) -> &str {
        &self.current_input
    }

    /// Replace the selection. Selecting a command echoes its example as a
    /// prompt line every time, including re-selection of the same command.
    pub fn set_selected_command(&mut self, command: Option<Command>) {
        if let Some(command) = command.as_ref() {
            self.add_terminal_output(format!("{PROMPT_PREFIX}{}", command.example));
        }
        self.selected_command = command;
    }

    /// Replace the open category. Collapsing is the caller's job: pass `None`
    /// when the open category is chosen again.
    pub fn set_selected_category(&mut self, category_id: Option<String>) {
        self.selected_category = category_id;
    }

    pub fn toggle_documentation(&mut self) {
        self.show_documentation = !self.show_documentation;
    }

    pub fn clear_terminal(&mut self) {
        self.terminal_output = banner(&CLEARED_BANNER);
    }

    pub fn add_terminal_output(&mut self, line: impl Into<String>) {
        self.terminal_output.push(line.into());
    }

    pub fn set_current_input(&mut self, input: impl Into<String>) {
        self.current_input = input.into();
    }

    /// Record a history entry stamped now.
    pub fn add_to_history(&mut self, command: Command, output: String) {
        self.add_to_history_at(command, output, Utc::now());
    }

    /// Record a history entry, evicting the oldest entries past [`HISTORY_LIMIT`].
    pub fn add_to_history_at(&mut self, command: Command, output: String, timestamp: DateTime<Utc>) {
        self.execution_history
            .push_front(HistoryEntry::new(command, output, timestamp));
        self.execution_history.truncate(HISTORY_LIMIT);
    }

    /// Returns `true` when the identifier was not already completed.
    pub fn mark_command_completed(&mut self, command_id: impl Into<String>) -> bool {
        self.completed_commands.insert(command_id.into())
    }

    /// Clear history and completion. Selection and the documentation toggle
    /// are left alone.
    pub fn reset_progress(&mut self) {
        self.execution_history.clear();
        self.completed_commands.clear();
        self.terminal_output = banner(&RESET_BANNER);
    }

    /// Check-and-set the in-flight flag. Returns `false` when an execution is
    /// already running.
    pub(crate) fn begin_execution(&mut self) -> bool {
        if self.is_executing {
            return false;
        }
        self.is_executing = true;
        true
    }

    pub(crate) fn finish_execution(&mut self) {
        self.is_executing = false;
    }

    /// Apply a successful run: output, separator, history, completion.
    pub(crate) fn record_success(&mut self, command: &Command, output: String, timestamp: DateTime<Utc>) {
        self.add_terminal_output(output.clone());
        self.add_terminal_output("");
        self.add_to_history_at(command.clone(), output, timestamp);
        self.mark_command_completed(command.id.clone());
    }

    pub(crate) fn record_failure(&mut self, message: &str) {
        self.add_terminal_output(format!("{ERROR_PREFIX}{message}"));
        self.add_terminal_output("");
    }
}

fn banner(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| line.to_string()).collect()
}
