//! Persistence of the durable subset of the progress state.
//!
//! Only the execution history, the completed identifiers, the open category
//! and the documentation toggle are written. The completed identifiers are a
//! set in memory and an ordered list on the wire; the list is written sorted
//! so files diff cleanly, and its order carries no meaning when read back.
//!
//! The on-disk document wraps the payload in a small envelope:
//!
//! ```json
//! { "version": 0, "state": { "execution_history": [], "completed_commands": [], ... } }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clitutor_util::config_file_path;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::state::HistoryEntry;

/// Fixed storage name; the JSON file is `<STORAGE_NAME>.json`.
pub const STORAGE_NAME: &str = "claude-tutorial-storage";
/// Environment variable controlling the progress file location.
pub const PROGRESS_PATH_ENV: &str = "CLITUTOR_PROGRESS_PATH";
/// Version written into the envelope.
pub const STORAGE_VERSION: u32 = 0;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("progress I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("progress serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The persisted subset of [`crate::ProgressState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedProgress {
    pub execution_history: Vec<HistoryEntry>,
    pub completed_commands: Vec<String>,
    pub selected_category: Option<String>,
    pub show_documentation: bool,
}

impl Default for PersistedProgress {
    fn default() -> Self {
        Self {
            execution_history: Vec::new(),
            completed_commands: Vec::new(),
            selected_category: None,
            show_documentation: true,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StorageEnvelope {
    #[serde(default)]
    version: u32,
    state: PersistedProgress,
}

/// Encode the persisted subset as the JSON envelope.
pub fn encode(progress: &PersistedProgress) -> Result<String, PersistenceError> {
    let envelope = StorageEnvelope {
        version: STORAGE_VERSION,
        state: progress.clone(),
    };
    Ok(serde_json::to_string_pretty(&envelope)?)
}

/// Decode a JSON envelope written by [`encode`].
pub fn decode(content: &str) -> Result<PersistedProgress, PersistenceError> {
    let envelope: StorageEnvelope = serde_json::from_str(content)?;
    if envelope.version > STORAGE_VERSION {
        warn!(version = envelope.version, "Progress file was written by a newer version");
    }
    Ok(envelope.state)
}

/// Durable storage for the persisted subset.
pub trait ProgressPersistence: Send + Sync {
    /// Read the stored progress. `Ok(None)` means nothing was stored yet.
    fn load(&self) -> Result<Option<PersistedProgress>, PersistenceError>;

    /// Replace the stored progress.
    fn save(&self, progress: &PersistedProgress) -> Result<(), PersistenceError>;
}

/// JSON file backend.
#[derive(Debug)]
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    /// Use the provided path, or the default location when omitted.
    pub fn new<P: Into<Option<PathBuf>>>(path: P) -> Self {
        let path = path.into().unwrap_or_else(default_progress_path);
        Self { path }
    }

    pub fn with_defaults() -> Self {
        Self::new(None::<PathBuf>)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressPersistence for JsonFilePersistence {
    fn load(&self) -> Result<Option<PersistedProgress>, PersistenceError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => match decode(&content) {
                Ok(progress) => {
                    debug!(path = %self.path.display(), "progress loaded");
                    Ok(Some(progress))
                }
                Err(error) => {
                    warn!(
                        path = %self.path.display(),
                        error = %error,
                        "Failed to parse progress file; starting fresh"
                    );
                    Ok(None)
                }
            },
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(PersistenceError::Io(error)),
        }
    }

    fn save(&self, progress: &PersistedProgress) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, encode(progress)?)?;
        Ok(())
    }
}

/// In-memory backend. Keeps the encoded document so round trips exercise the
/// same serialization as the file backend.
#[derive(Debug, Default)]
pub struct InMemoryPersistence {
    document: Mutex<Option<String>>,
}

impl InMemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored document, if anything was saved.
    pub fn document(&self) -> Option<String> {
        self.document.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()
    }
}

impl ProgressPersistence for InMemoryPersistence {
    fn load(&self) -> Result<Option<PersistedProgress>, PersistenceError> {
        self.document().as_deref().map(decode).transpose()
    }

    fn save(&self, progress: &PersistedProgress) -> Result<(), PersistenceError> {
        let encoded = encode(progress)?;
        *self.document.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(encoded);
        Ok(())
    }
}

/// Default progress file location, honoring [`PROGRESS_PATH_ENV`].
pub fn default_progress_path() -> PathBuf {
    config_file_path(PROGRESS_PATH_ENV, &format!("{STORAGE_NAME}.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_is_initial_state() {
        let dir = tempdir().unwrap();
        let backend = JsonFilePersistence::new(Some(dir.path().join("absent.json")));
        assert!(backend.load().unwrap().is_none());
    }

    #[test]
    fn invalid_json_is_treated_as_initial_state() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("progress.json");
        fs::write(&path, "not json").unwrap();
        let backend = JsonFilePersistence::new(Some(path));
        assert!(backend.load().unwrap().is_none());
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("progress.json");
        let backend = JsonFilePersistence::new(Some(path.clone()));
        let progress = PersistedProgress {
            completed_commands: vec!["claude-help".into()],
            ..PersistedProgress::default()
        };
        backend.save(&progress).unwrap();
        assert!(path.exists());
        assert_eq!(backend.load().unwrap(), Some(progress));
    }

    #[test]
    fn envelope_shape_on_the_wire() {
        let progress = PersistedProgress {
            completed_commands: vec!["a".into(), "b".into()],
            selected_category: Some("basic".into()),
            show_documentation: false,
            ..PersistedProgress::default()
        };
        let value: serde_json::Value = serde_json::from_str(&encode(&progress).unwrap()).unwrap();
        assert_eq!(value["version"], 0);
        assert_eq!(value["state"]["completed_commands"], serde_json::json!(["a", "b"]));
        assert_eq!(value["state"]["selected_category"], "basic");
        assert_eq!(value["state"]["show_documentation"], false);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let progress = decode(r#"{"state": {"completed_commands": ["x"]}}"#).unwrap();
        assert_eq!(progress.completed_commands, vec!["x".to_string()]);
        assert!(progress.show_documentation);
        assert!(progress.execution_history.is_empty());
    }

    #[test]
    fn in_memory_backend_starts_empty() {
        let backend = InMemoryPersistence::new();
        assert!(backend.load().unwrap().is_none());
        backend.save(&PersistedProgress::default()).unwrap();
        assert_eq!(backend.load().unwrap(), Some(PersistedProgress::default()));
    }

    #[test]
    fn default_path_honors_env_override() {
        temp_env::with_var(PROGRESS_PATH_ENV, Some("/tmp/clitutor/progress.json"), || {
            assert_eq!(default_progress_path(), PathBuf::from("/tmp/clitutor/progress.json"));
        });
        temp_env::with_var_unset(PROGRESS_PATH_ENV, || {
            let path = default_progress_path();
            assert!(path.ends_with("clitutor/claude-tutorial-storage.json"));
        });
    }
}
