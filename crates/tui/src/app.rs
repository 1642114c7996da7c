//! Application state and logic for the tutorial TUI.
//!
//! `App` owns the view-only state (sidebar cursor, transcript scroll, status
//! line, throbber) and a [`SharedCtx`] with the catalog, the progress store
//! and the theme. Everything the tutorial remembers lives in the store; the
//! TUI only reads snapshots of it and calls its operations.

use std::sync::Arc;

use clitutor_catalog::Catalog;
use clitutor_store::{ExecutionOutcome, ProgressStore};
use clitutor_types::Command;
use tracing::debug;

use crate::ui::components::sidebar::{SidebarRow, SidebarState};
use crate::ui::components::terminal::TranscriptState;
use crate::ui::theme::Theme;

/// Throbber frames shown while a command runs.
pub const THROBBER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Cross-cutting shared context owned by the App.
pub struct SharedCtx {
    pub catalog: Arc<Catalog>,
    pub store: Arc<ProgressStore>,
    pub theme: Box<dyn Theme>,
}

impl std::fmt::Debug for SharedCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedCtx").field("theme", &self.theme.name()).finish_non_exhaustive()
    }
}

/// Messages that update the application state.
#[derive(Debug, Clone)]
pub enum Msg {
    Tick,
    Resize(u16, u16),
    ExecutionFinished(ExecutionOutcome),
    /// The spawned execution task died before reporting
    ExecutionTaskFailed(String),
    ClipboardWritten,
    ClipboardFailed(String),
}

/// Side effects requested by components, carried out by `cmd`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    RunCommand(Box<Command>),
    CopyToClipboard(String),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// One-line feedback shown in the hint bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    fn new(kind: StatusKind, text: impl Into<String>) -> Self {
        Self { kind, text: text.into() }
    }
}

#[derive(Debug)]
pub struct App {
    pub ctx: SharedCtx,
    pub sidebar: SidebarState,
    pub transcript: TranscriptState,
    pub status: Option<StatusMessage>,
    /// An execution task has been spawned and not yet reported back
    pub executing: bool,
    pub throbber_idx: usize,
}

impl App {
    pub fn new(catalog: Arc<Catalog>, store: Arc<ProgressStore>, theme: Box<dyn Theme>) -> Self {
        let open_category = store.read(|state| state.selected_category().map(str::to_owned));
        let sidebar = SidebarState::new(&catalog, open_category.as_deref());
        Self {
            ctx: SharedCtx { catalog, store, theme },
            sidebar,
            transcript: TranscriptState::default(),
            status: None,
            executing: false,
            throbber_idx: 0,
        }
    }

    pub fn update(&mut self, msg: &Msg) -> Vec<Effect> {
        match msg {
            Msg::Tick => {
                if self.executing {
                    self.throbber_idx = (self.throbber_idx + 1) % THROBBER_FRAMES.len();
                }
            }
            Msg::Resize(_, _) => {}
            Msg::ExecutionFinished(outcome) => {
                self.finish_execution();
                self.status = match outcome {
                    ExecutionOutcome::Completed { command_id } => {
                        Some(StatusMessage::new(StatusKind::Success, format!("✓ {command_id} completed")))
                    }
                    ExecutionOutcome::Failed { message, .. } => Some(StatusMessage::new(StatusKind::Error, message.clone())),
                    ExecutionOutcome::Rejected => {
                        Some(StatusMessage::new(StatusKind::Info, "Another command is still running"))
                    }
                };
            }
            Msg::ExecutionTaskFailed(error) => {
                self.finish_execution();
                self.status = Some(StatusMessage::new(StatusKind::Error, format!("Execution task failed: {error}")));
            }
            Msg::ClipboardWritten => {
                self.status = Some(StatusMessage::new(StatusKind::Success, "Copied example to clipboard"));
            }
            Msg::ClipboardFailed(error) => {
                self.status = Some(StatusMessage::new(StatusKind::Error, format!("Clipboard error: {error}")));
            }
        }
        Vec::new()
    }

    /// Current throbber glyph.
    pub fn throbber(&self) -> &'static str {
        THROBBER_FRAMES[self.throbber_idx % THROBBER_FRAMES.len()]
    }

    pub fn open_category(&self) -> Option<String> {
        self.ctx.store.read(|state| state.selected_category().map(str::to_owned))
    }

    pub fn selected_command(&self) -> Option<Command> {
        self.ctx.store.read(|state| state.selected_command().cloned())
    }

    pub fn sync_sidebar(&mut self) {
        let open_category = self.open_category();
        self.sidebar.sync(&self.ctx.catalog, open_category.as_deref());
    }

    /// Enter on the sidebar: open/close a category or select a command.
    pub fn activate_sidebar_row(&mut self) {
        let Some(row) = self.sidebar.selected_row().cloned() else {
            return;
        };
        match row {
            SidebarRow::Category(category_id) => {
                let next = if self.open_category().as_deref() == Some(category_id.as_str()) {
                    None
                } else {
                    Some(category_id)
                };
                self.ctx.store.set_selected_category(next);
                self.sync_sidebar();
            }
            SidebarRow::Command(command_id) => {
                if let Some(command) = self.ctx.catalog.find(&command_id) {
                    self.ctx.store.set_selected_command(Some(command.clone()));
                    self.transcript.follow();
                }
            }
        }
    }

    /// Request a run of the selected command. Ignored while one is in flight
    /// or when nothing is selected.
    pub fn run_selected(&mut self) -> Option<Effect> {
        if self.executing || self.ctx.store.is_executing() {
            debug!("run requested while executing; ignoring");
            return None;
        }
        let command = self.selected_command()?;
        self.executing = true;
        self.throbber_idx = 0;
        self.transcript.follow();
        self.status = Some(StatusMessage::new(StatusKind::Info, format!("Running {}", command.name)));
        Some(Effect::RunCommand(Box::new(command)))
    }

    pub fn copy_selected_example(&mut self) -> Option<Effect> {
        match self.selected_command() {
            Some(command) => Some(Effect::CopyToClipboard(command.example)),
            None => {
                self.status = Some(StatusMessage::new(StatusKind::Info, "Select a command first"));
                None
            }
        }
    }

    pub fn clear_terminal(&mut self) {
        self.ctx.store.clear_terminal();
        self.transcript.follow();
    }

    pub fn toggle_documentation(&mut self) {
        self.ctx.store.toggle_documentation();
    }

    pub fn reset_progress(&mut self) {
        self.ctx.store.reset_progress();
        self.transcript.follow();
        self.status = Some(StatusMessage::new(StatusKind::Info, "Progress reset"));
    }

    fn finish_execution(&mut self) {
        self.executing = false;
        self.throbber_idx = 0;
        self.transcript.follow();
    }
}
