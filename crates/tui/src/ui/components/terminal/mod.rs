pub mod state;
pub mod terminal_component;

pub use state::TranscriptState;
pub use terminal_component::TerminalComponent;
