//! Runtime: unified event loop and input routing for the TUI.
//!
//! Responsibilities
//! - Own the terminal lifecycle (enter/leave alternate screen, raw mode).
//! - Drive a single event loop that handles input, ticks and executions.
//! - Route keys to the main view and carry out the returned `Effect`s.
//!
//! Event Loop Strategy
//! - A blocking input task polls `crossterm` and forwards events over a
//!   channel; it exits once the receiver is gone.
//! - Smart ticking: fast interval (100 ms) only while a command runs, so the
//!   throbber spins; long interval (5 s) when idle.
//! - Spawned executions are collected in a `FuturesUnordered` and reported
//!   back as messages when they join.
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures_util::{StreamExt, stream::FuturesUnordered};
use ratatui::{Terminal, prelude::*};
use tokio::{
    signal,
    sync::mpsc,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use crate::app::{App, Effect, Msg};
use crate::cmd;
use crate::ui::components::Component;
use crate::ui::main_view::MainView;

/// Upper bound on waiting for in-flight executions when quitting.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Spawn a blocking input task that polls terminal input and forwards
/// `crossterm` events over a Tokio channel.
///
/// `poll()` and `read()` stay on the same thread. The short poll timeout lets
/// the task notice a closed channel and exit.
fn spawn_input_task() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(500);
    tokio::task::spawn_blocking(move || {
        let poll_interval = Duration::from_millis(16);
        while !sender.is_closed() {
            match event::poll(poll_interval) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(error) => {
                    warn!("Failed to poll terminal events: {}", error);
                    break;
                }
            }
            match event::read() {
                Ok(event) => {
                    if sender.blocking_send(event).is_err() {
                        break;
                    }
                }
                Err(error) => {
                    warn!("Failed to read event: {}", error);
                    break;
                }
            }
        }
    });
    receiver
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn render(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, app: &mut App, main_view: &mut MainView) -> Result<()> {
    terminal.draw(|frame| main_view.render(frame, frame.area(), app))?;
    Ok(())
}

/// Route one input event. Key releases and repeats are ignored so each
/// press acts once on every platform.
fn handle_input_event(app: &mut App, main_view: &mut MainView, input_event: Event) -> Vec<Effect> {
    match input_event {
        Event::Key(key_event) if key_event.kind == KeyEventKind::Press => main_view.handle_key_events(app, key_event),
        Event::Resize(width, height) => main_view.handle_message(app, Msg::Resize(width, height)),
        _ => Vec::new(),
    }
}

/// Entry point for the TUI runtime: sets up the terminal, runs the event
/// loop, and restores the terminal on every exit path of the loop.
pub async fn run_app(mut app: App) -> Result<()> {
    let mut input_receiver = spawn_input_task();
    let mut main_view = MainView::new();
    let mut terminal = setup_terminal()?;
    info!("tui started");

    let result = event_loop(&mut terminal, &mut app, &mut main_view, &mut input_receiver).await;

    cleanup_terminal(&mut terminal)?;
    info!("tui stopped");
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    main_view: &mut MainView,
    input_receiver: &mut mpsc::Receiver<Event>,
) -> Result<()> {
    let mut pending_execs: FuturesUnordered<JoinHandle<Msg>> = FuturesUnordered::new();

    // Ticking strategy: fast while executing, very slow when idle.
    let fast_interval = Duration::from_millis(100);
    let idle_interval = Duration::from_millis(5000);
    let mut current_interval = idle_interval;
    let mut ticker = time::interval(current_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // Effects produced while handling messages queue up for the next turn.
    let mut effects: Vec<Effect> = Vec::new();

    render(terminal, app, main_view)?;

    loop {
        let needs_animation = app.executing || !pending_execs.is_empty();
        let target_interval = if needs_animation { fast_interval } else { idle_interval };
        if target_interval != current_interval {
            current_interval = target_interval;
            ticker = time::interval(current_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        }

        let mut needs_render = false;
        tokio::select! {
            maybe_event = input_receiver.recv() => {
                let Some(event) = maybe_event else {
                    debug!("input channel closed");
                    break;
                };
                if let Event::Key(key_event) = event
                    && key_event.code == KeyCode::Char('c')
                    && key_event.modifiers.contains(KeyModifiers::CONTROL)
                {
                    break;
                }
                effects.extend(handle_input_event(app, main_view, event));
                needs_render = true;
            }

            _ = ticker.tick() => {
                effects.extend(main_view.handle_message(app, Msg::Tick));
                needs_render = needs_animation;
            }

            Some(joined) = pending_execs.next(), if !pending_execs.is_empty() => {
                let msg = joined.unwrap_or_else(|error| Msg::ExecutionTaskFailed(error.to_string()));
                effects.extend(main_view.handle_message(app, msg));
                needs_render = true;
            }

            _ = signal::ctrl_c() => { break; }
        }

        if effects.iter().any(|effect| matches!(effect, Effect::Quit)) {
            break;
        }
        if !effects.is_empty() {
            let effects_to_process = std::mem::take(&mut effects);
            process_effects(app, main_view, effects_to_process, &mut pending_execs, &mut effects);
            needs_render = true;
        }

        if needs_render {
            render(terminal, app, main_view)?;
        }
    }

    drain_pending_execs(app, &mut pending_execs, SHUTDOWN_GRACE).await;
    Ok(())
}

/// Let executions still in flight finish so their results are recorded.
/// Gives up after `grace`; anything still running then is dropped.
async fn drain_pending_execs(app: &mut App, pending_execs: &mut FuturesUnordered<JoinHandle<Msg>>, grace: Duration) {
    if pending_execs.is_empty() {
        return;
    }
    info!(pending = pending_execs.len(), "waiting for running commands before exit");
    let drain = async {
        while let Some(joined) = pending_execs.next().await {
            let msg = joined.unwrap_or_else(|error| Msg::ExecutionTaskFailed(error.to_string()));
            app.update(&msg);
        }
    };
    if time::timeout(grace, drain).await.is_err() {
        warn!("running commands did not finish in time; exiting anyway");
    }
}

fn process_effects(
    app: &mut App,
    main_view: &mut MainView,
    effects: Vec<Effect>,
    pending_execs: &mut FuturesUnordered<JoinHandle<Msg>>,
    effects_out: &mut Vec<Effect>,
) {
    let command_batch = cmd::run_from_effects(app, effects);
    pending_execs.extend(command_batch.pending);

    for msg in command_batch.immediate {
        effects_out.extend(main_view.handle_message(app, msg));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use clitutor_catalog::Catalog;
    use clitutor_store::{ProgressStore, SimulatedExecution};

    use super::*;
    use crate::app::tests::test_app;
    use crate::ui::theme;

    #[tokio::test]
    async fn quitting_waits_for_a_running_command() {
        let catalog = Arc::new(Catalog::from_embedded().unwrap());
        let store = Arc::new(ProgressStore::ephemeral(Arc::new(SimulatedExecution::new(Duration::from_millis(50)))));
        let mut app = App::new(catalog, Arc::clone(&store), theme::load(None));
        let help = app.ctx.catalog.find("claude-help").cloned().unwrap();
        app.ctx.store.set_selected_command(Some(help));
        let effect = app.run_selected().unwrap();

        let mut pending_execs = FuturesUnordered::new();
        pending_execs.extend(cmd::run_from_effects(&app, vec![effect]).pending);
        drain_pending_execs(&mut app, &mut pending_execs, Duration::from_secs(5)).await;

        assert!(pending_execs.is_empty());
        assert!(!app.executing);
        assert!(store.read(|state| state.completed_commands().contains("claude-help")));
    }

    #[tokio::test]
    async fn draining_nothing_returns_at_once() {
        let mut app = test_app();
        let mut pending_execs = FuturesUnordered::new();
        drain_pending_execs(&mut app, &mut pending_execs, Duration::ZERO).await;
        assert!(!app.executing);
    }
}
