//! UI components: sidebar, terminal, documentation.

pub mod component;
pub mod docs;
pub mod sidebar;
pub mod terminal;

pub use component::*;
pub use docs::DocsComponent;
pub use sidebar::SidebarComponent;
pub use terminal::TerminalComponent;
