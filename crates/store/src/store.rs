//! The progress store handle.
//!
//! A `ProgressStore` is constructed once by the binary and shared as
//! `Arc<ProgressStore>` with every surface that needs it. It owns the
//! [`ProgressState`] behind a mutex, writes the persisted subset after each
//! mutation that touches it, and drives executions through the configured
//! [`ExecutionStrategy`].
//!
//! The mutex is never held across an await. While an execution is suspended
//! other operations proceed normally; `is_executing` is an advisory flag that
//! only gates a second execution.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use clitutor_types::Command;
use tracing::{debug, info, warn};

use crate::execution::{ExecutionStrategy, SimulatedExecution};
use crate::persistence::{InMemoryPersistence, PersistenceError, ProgressPersistence};
use crate::state::ProgressState;

/// What happened to an `execute_command` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// Another execution was in flight; nothing changed.
    Rejected,
    Completed { command_id: String },
    /// The strategy failed; the message was written to the transcript.
    Failed { command_id: String, message: String },
}

pub struct ProgressStore {
    state: Mutex<ProgressState>,
    persistence: Box<dyn ProgressPersistence>,
    strategy: Arc<dyn ExecutionStrategy>,
}

impl std::fmt::Debug for ProgressStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressStore").field("state", &*self.lock()).finish_non_exhaustive()
    }
}

impl ProgressStore {
    /// Open a store, rehydrating from `persistence`.
    ///
    /// A backend with nothing stored yields the initial state.
    pub fn open(
        persistence: Box<dyn ProgressPersistence>,
        strategy: Arc<dyn ExecutionStrategy>,
    ) -> Result<Self, PersistenceError> {
        let state = match persistence.load()? {
            Some(persisted) => {
                debug!(
                    completed = persisted.completed_commands.len(),
                    history = persisted.execution_history.len(),
                    "rehydrating progress"
                );
                ProgressState::rehydrate(persisted)
            }
            None => ProgressState::default(),
        };
        Ok(Self {
            state: Mutex::new(state),
            persistence,
            strategy,
        })
    }

    /// A store that persists nothing outside the process.
    pub fn ephemeral(strategy: Arc<dyn ExecutionStrategy>) -> Self {
        Self {
            state: Mutex::new(ProgressState::default()),
            persistence: Box::new(InMemoryPersistence::new()),
            strategy,
        }
    }

    /// Ephemeral store with instant simulated execution.
    pub fn instant() -> Self {
        Self::ephemeral(Arc::new(SimulatedExecution::instant()))
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> ProgressState {
        self.lock().clone()
    }

    /// Borrow the current state for the duration of `f`.
    pub fn read<R>(&self, f: impl FnOnce(&ProgressState) -> R) -> R {
        f(&*self.lock())
    }

    pub fn is_executing(&self) -> bool {
        self.read(ProgressState::is_executing)
    }

    pub fn set_selected_command(&self, command: Option<Command>) {
        self.update(false, |state| state.set_selected_command(command));
    }

    pub fn set_selected_category(&self, category_id: Option<String>) {
        self.update(true, |state| state.set_selected_category(category_id));
    }

    pub fn toggle_documentation(&self) {
        self.update(true, ProgressState::toggle_documentation);
    }

    pub fn clear_terminal(&self) {
        self.update(false, ProgressState::clear_terminal);
    }

    pub fn add_terminal_output(&self, line: impl Into<String>) {
        let line = line.into();
        self.update(false, |state| state.add_terminal_output(line));
    }

    pub fn set_current_input(&self, input: impl Into<String>) {
        let input = input.into();
        self.update(false, |state| state.set_current_input(input));
    }

    pub fn add_to_history(&self, command: Command, output: String) {
        self.update(true, |state| state.add_to_history(command, output));
    }

    pub fn mark_command_completed(&self, command_id: impl Into<String>) {
        let command_id = command_id.into();
        self.update(true, |state| {
            state.mark_command_completed(command_id);
        });
    }

    pub fn reset_progress(&self) {
        info!("resetting tutorial progress");
        self.update(true, ProgressState::reset_progress);
    }

    /// Run `command` through the execution strategy.
    ///
    /// Returns [`ExecutionOutcome::Rejected`] without touching anything when
    /// an execution is already in flight. Otherwise the in-flight flag is set
    /// for the duration of the call and cleared on every exit path. Strategy
    /// failures are written to the transcript and reported in the outcome;
    /// this method never fails.
    pub async fn execute_command(&self, command: &Command) -> ExecutionOutcome {
        let Some(_guard) = ExecutionGuard::acquire(self) else {
            debug!(command = %command.id, "execution already in flight; ignoring");
            return ExecutionOutcome::Rejected;
        };

        match self.strategy.execute(command).await {
            Ok(output) => {
                self.update(true, |state| state.record_success(command, output, Utc::now()));
                info!(command = %command.id, "command completed");
                ExecutionOutcome::Completed {
                    command_id: command.id.clone(),
                }
            }
            Err(error) => {
                let message = error.to_string();
                self.update(false, |state| state.record_failure(&message));
                warn!(command = %command.id, error = %message, "simulated execution failed");
                ExecutionOutcome::Failed {
                    command_id: command.id.clone(),
                    message,
                }
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, ProgressState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Apply `mutate` under the lock, then write the persisted subset when
    /// `persist` is set. Save failures are logged; memory stays authoritative.
    fn update<R>(&self, persist: bool, mutate: impl FnOnce(&mut ProgressState) -> R) -> R {
        let mut state = self.lock();
        let result = mutate(&mut *state);
        if persist && let Err(error) = self.persistence.save(&state.persisted()) {
            warn!(error = %error, "Failed to persist progress");
        }
        result
    }
}

/// Holds the in-flight flag; dropping it clears the flag, including while
/// unwinding out of a panicking strategy.
struct ExecutionGuard<'a> {
    store: &'a ProgressStore,
}

impl<'a> ExecutionGuard<'a> {
    fn acquire(store: &'a ProgressStore) -> Option<Self> {
        store.lock().begin_execution().then_some(Self { store })
    }
}

impl Drop for ExecutionGuard<'_> {
    fn drop(&mut self) {
        self.store.lock().finish_execution();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::ExecutionError;
    use crate::state::{HISTORY_LIMIT, WELCOME_BANNER};
    use async_trait::async_trait;
    use clitutor_types::Difficulty;
    use tokio::sync::Notify;

    fn command(id: &str) -> Command {
        Command {
            id: id.into(),
            name: format!("tool {id}"),
            description: String::new(),
            syntax: format!("tool {id}"),
            example: format!("tool {id}"),
            output: format!("{id} output"),
            category: "basic".into(),
            difficulty: Difficulty::Beginner,
            best_practices: vec![],
            common_mistakes: vec![],
            related_commands: vec![],
        }
    }

    struct FailingExecution;

    #[async_trait]
    impl ExecutionStrategy for FailingExecution {
        async fn execute(&self, _command: &Command) -> Result<String, ExecutionError> {
            Err(ExecutionError::Failed("simulated crash".into()))
        }
    }

    /// Blocks until released, so a test can observe the in-flight window.
    #[derive(Default)]
    struct GatedExecution {
        release: Notify,
    }

    #[async_trait]
    impl ExecutionStrategy for GatedExecution {
        async fn execute(&self, command: &Command) -> Result<String, ExecutionError> {
            self.release.notified().await;
            Ok(command.output.clone())
        }
    }

    struct PanickingExecution;

    #[async_trait]
    impl ExecutionStrategy for PanickingExecution {
        async fn execute(&self, _command: &Command) -> Result<String, ExecutionError> {
            panic!("strategy exploded");
        }
    }

    #[tokio::test]
    async fn successful_execution_updates_everything() {
        let store = ProgressStore::instant();
        let cmd = command("a");

        let outcome = store.execute_command(&cmd).await;

        assert_eq!(outcome, ExecutionOutcome::Completed { command_id: "a".into() });
        let state = store.snapshot();
        let tail = &state.terminal_output()[WELCOME_BANNER.len()..];
        assert_eq!(tail, ["a output", ""]);
        assert!(state.completed_commands().contains("a"));
        assert_eq!(state.execution_history().len(), 1);
        assert_eq!(state.execution_history()[0].command, cmd);
        assert_eq!(state.execution_history()[0].output, "a output");
        assert!(!state.is_executing());
    }

    #[tokio::test]
    async fn failing_strategy_reports_into_transcript() {
        let store = ProgressStore::ephemeral(Arc::new(FailingExecution));

        let outcome = store.execute_command(&command("a")).await;

        assert_eq!(
            outcome,
            ExecutionOutcome::Failed {
                command_id: "a".into(),
                message: "simulated crash".into()
            }
        );
        let state = store.snapshot();
        let tail = &state.terminal_output()[WELCOME_BANNER.len()..];
        assert_eq!(tail, ["Error: simulated crash", ""]);
        assert!(state.completed_commands().is_empty());
        assert!(state.execution_history().is_empty());
        assert!(!state.is_executing());

        // still usable afterwards
        store.mark_command_completed("a");
        assert!(store.snapshot().completed_commands().contains("a"));
    }

    #[tokio::test]
    async fn second_execution_while_in_flight_is_rejected() {
        let gate = Arc::new(GatedExecution::default());
        let store = Arc::new(ProgressStore::ephemeral(gate.clone()));

        let first = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.execute_command(&command("a")).await })
        };
        while !store.is_executing() {
            tokio::task::yield_now().await;
        }

        let before = store.snapshot();
        let second = store.execute_command(&command("b")).await;
        assert_eq!(second, ExecutionOutcome::Rejected);
        assert_eq!(store.snapshot(), before);

        gate.release.notify_one();
        let first = first.await.unwrap();
        assert_eq!(first, ExecutionOutcome::Completed { command_id: "a".into() });

        let state = store.snapshot();
        assert!(!state.is_executing());
        assert!(state.completed_commands().contains("a"));
        assert!(!state.completed_commands().contains("b"));
        assert_eq!(state.execution_history().len(), 1);
    }

    #[tokio::test]
    async fn other_operations_proceed_while_suspended() {
        let gate = Arc::new(GatedExecution::default());
        let store = Arc::new(ProgressStore::ephemeral(gate.clone()));

        let run = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.execute_command(&command("a")).await })
        };
        while !store.is_executing() {
            tokio::task::yield_now().await;
        }

        store.toggle_documentation();
        store.add_terminal_output("typed while waiting");
        assert!(store.is_executing());

        gate.release.notify_one();
        run.await.unwrap();
        let state = store.snapshot();
        assert!(!state.show_documentation());
        let tail = &state.terminal_output()[WELCOME_BANNER.len()..];
        assert_eq!(tail, ["typed while waiting", "a output", ""]);
    }

    #[tokio::test]
    async fn panicking_strategy_still_clears_flag() {
        let store = Arc::new(ProgressStore::ephemeral(Arc::new(PanickingExecution)));
        let handle = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.execute_command(&command("a")).await })
        };
        assert!(handle.await.is_err());
        assert!(!store.is_executing());
    }

    #[tokio::test]
    async fn history_cap_evicts_oldest_first() {
        let store = ProgressStore::instant();
        for index in 0..=HISTORY_LIMIT {
            store.execute_command(&command(&format!("c{index}"))).await;
        }
        let state = store.snapshot();
        assert_eq!(state.execution_history().len(), HISTORY_LIMIT);
        assert!(state.execution_history().iter().all(|entry| entry.command.id != "c0"));
        assert_eq!(state.execution_history()[0].command.id, format!("c{HISTORY_LIMIT}"));
        assert_eq!(state.completed_commands().len(), HISTORY_LIMIT + 1);
    }

    #[tokio::test]
    async fn persisted_fields_are_written_after_mutation() {
        let backend = Arc::new(InMemoryPersistence::new());
        let store = ProgressStore::open(Box::new(SharedBackend(backend.clone())), Arc::new(SimulatedExecution::instant())).unwrap();
        assert!(backend.document().is_none());

        store.set_selected_command(Some(command("a")));
        assert!(backend.document().is_none(), "selection is not persisted");

        store.set_selected_category(Some("basic".into()));
        let saved = backend.load().unwrap().unwrap();
        assert_eq!(saved.selected_category.as_deref(), Some("basic"));

        store.execute_command(&command("a")).await;
        let saved = backend.load().unwrap().unwrap();
        assert_eq!(saved.completed_commands, vec!["a".to_string()]);
        assert_eq!(saved.execution_history.len(), 1);
    }

    /// Lets a test keep a handle on the backend the store owns.
    struct SharedBackend(Arc<InMemoryPersistence>);

    impl ProgressPersistence for SharedBackend {
        fn load(&self) -> Result<Option<crate::PersistedProgress>, PersistenceError> {
            self.0.load()
        }

        fn save(&self, progress: &crate::PersistedProgress) -> Result<(), PersistenceError> {
            self.0.save(progress)
        }
    }
}
