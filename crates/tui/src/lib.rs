//! # Clitutor TUI Library
//!
//! Interactive terminal front end for the command tutorial, built on Ratatui.
//!
//! ## Key Features
//!
//! - Catalog browser with per-category and overall progress
//! - Simulated terminal with styled transcript and a running indicator
//! - Documentation panel for the selected command
//! - Keyboard-only navigation
//!
//! ## Architecture
//!
//! Every panel is a component that handles the keys routed to it and renders
//! itself. Components mutate the shared progress store directly for quick
//! operations and return `Effect`s for anything asynchronous (executions,
//! clipboard), which the runtime carries out.

mod app;
mod cmd;
mod ui;

use std::sync::Arc;

use anyhow::Result;
use clitutor_catalog::Catalog;
use clitutor_store::ProgressStore;

pub use ui::theme::THEME_NAMES;

/// Runs the TUI until the user quits.
///
/// `theme` names a palette (see [`THEME_NAMES`]); unknown names fall back to
/// the default with a warning.
///
/// # Errors
///
/// Terminal setup or drawing failures (raw mode, alternate screen, I/O).
pub async fn run(catalog: Arc<Catalog>, store: Arc<ProgressStore>, theme: Option<&str>) -> Result<()> {
    let app = app::App::new(catalog, store, ui::theme::load(theme));
    ui::runtime::run_app(app).await
}
