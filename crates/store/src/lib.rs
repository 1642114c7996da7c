//! Tutorial progress store.
//!
//! This crate holds the only mutable state of the tutorial: the current
//! selection, the terminal transcript, execution history and the set of
//! completed commands.
//!
//! - [`ProgressState`] is the plain state value and its transitions.
//! - [`ProgressStore`] is the shared handle: locking, persistence and
//!   simulated execution.
//! - [`persistence`] moves the durable subset to and from JSON.
//! - [`selectors`] derives progress figures from a state and the catalog.

pub mod execution;
pub mod persistence;
pub mod selectors;
pub mod state;
pub mod store;

pub use execution::{DEFAULT_SIMULATED_DELAY, ExecutionError, ExecutionStrategy, SimulatedExecution};
pub use persistence::{
    InMemoryPersistence, JsonFilePersistence, PersistedProgress, PersistenceError, ProgressPersistence, STORAGE_NAME,
    default_progress_path,
};
pub use state::{CLEARED_BANNER, ERROR_PREFIX, HISTORY_LIMIT, HistoryEntry, ProgressState, RESET_BANNER, WELCOME_BANNER};
pub use store::{ExecutionOutcome, ProgressStore};
