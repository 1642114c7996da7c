//! Small helpers shared by the catalog, store, TUI and CLI crates.

pub mod config;
pub mod line_kind;
pub mod path_processing;
pub mod text_processing;

pub use config::{ConfigError, TutorConfig};
pub use line_kind::{LineKind, PROMPT_PREFIX, classify_entry, classify_line};
pub use path_processing::{APP_DIR_NAME, config_file_path, expand_tilde};
pub use text_processing::truncate_with_ellipsis;
