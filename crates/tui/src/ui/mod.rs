//! UI rendering module for the TUI application: layout, components,
//! theming and the event loop.

pub mod components;
pub mod main_view;
pub mod runtime;
pub mod theme;
