//! # Command Execution Layer
//!
//! Translates application [`Effect`]s into imperative commands and runs them.
//! This is the boundary where view state meets side effects:
//! - writing to the system clipboard
//! - driving a command execution through the progress store
//!
//! Clipboard writes finish immediately. Executions are spawned on the Tokio
//! runtime and reported back as [`Msg::ExecutionFinished`] when they join.

use std::sync::Arc;

use clitutor_types::Command;
use tokio::task::{JoinHandle, spawn};
use tracing::{debug, warn};

use crate::app::{App, Effect, Msg};

/// Side-effectful commands executed outside of pure state updates.
#[derive(Debug)]
pub enum Cmd {
    /// Write text into the system clipboard.
    ClipboardSet(String),
    /// Run a command through the store's execution strategy.
    Execute(Box<Command>),
}

/// Results of one batch: messages available now and executions still running.
#[derive(Default)]
pub struct CommandBatch {
    pub immediate: Vec<Msg>,
    pub pending: Vec<JoinHandle<Msg>>,
}

/// Convert effects into commands. `Effect::Quit` is handled by the runtime
/// and never reaches this layer.
pub fn from_effects(effects: Vec<Effect>) -> Vec<Cmd> {
    effects
        .into_iter()
        .filter_map(|effect| match effect {
            Effect::RunCommand(command) => Some(Cmd::Execute(command)),
            Effect::CopyToClipboard(text) => Some(Cmd::ClipboardSet(text)),
            Effect::Quit => None,
        })
        .collect()
}

/// Execute commands, collecting immediate messages and spawned executions.
pub fn run_cmds(app: &App, commands: Vec<Cmd>) -> CommandBatch {
    let mut batch = CommandBatch::default();
    for command in commands {
        match command {
            Cmd::ClipboardSet(text) => batch.immediate.push(execute_clipboard_set(text)),
            Cmd::Execute(command) => {
                let store = Arc::clone(&app.ctx.store);
                debug!(command = %command.id, "spawning execution");
                batch
                    .pending
                    .push(spawn(async move { Msg::ExecutionFinished(store.execute_command(&command).await) }));
            }
        }
    }
    batch
}

pub fn run_from_effects(app: &App, effects: Vec<Effect>) -> CommandBatch {
    run_cmds(app, from_effects(effects))
}

fn execute_clipboard_set(text: String) -> Msg {
    match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text)) {
        Ok(()) => Msg::ClipboardWritten,
        Err(error) => {
            warn!(error = %error, "clipboard write failed");
            Msg::ClipboardFailed(error.to_string())
        }
    }
}
