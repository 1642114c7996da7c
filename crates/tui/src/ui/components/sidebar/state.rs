//! Sidebar rows and cursor.
//!
//! The sidebar is a flat list: every category is a row, and the commands of
//! the open category follow it. Only one category is open at a time.

use clitutor_catalog::Catalog;
use ratatui::widgets::ListState;

/// One visible sidebar row, identified by catalog id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarRow {
    Category(String),
    Command(String),
}

/// Flatten the catalog into rows, expanding `open_category` in place.
pub fn sidebar_rows(catalog: &Catalog, open_category: Option<&str>) -> Vec<SidebarRow> {
    let mut rows = Vec::with_capacity(catalog.categories().len());
    for category in catalog.categories() {
        rows.push(SidebarRow::Category(category.id.clone()));
        if open_category == Some(category.id.as_str()) {
            rows.extend(
                catalog
                    .commands_in(&category.id)
                    .map(|command| SidebarRow::Command(command.id.clone())),
            );
        }
    }
    rows
}

#[derive(Debug, Default)]
pub struct SidebarState {
    rows: Vec<SidebarRow>,
    pub list_state: ListState,
}

impl SidebarState {
    pub fn new(catalog: &Catalog, open_category: Option<&str>) -> Self {
        let mut state = Self::default();
        state.sync(catalog, open_category);
        state
    }

    /// Rebuild the rows. The cursor stays on the same row when it is still
    /// visible, otherwise it is clamped into range.
    pub fn sync(&mut self, catalog: &Catalog, open_category: Option<&str>) {
        let current = self.selected_row().cloned();
        let previous_index = self.cursor();
        self.rows = sidebar_rows(catalog, open_category);

        let index = current
            .and_then(|row| self.rows.iter().position(|candidate| *candidate == row))
            .unwrap_or_else(|| previous_index.min(self.rows.len().saturating_sub(1)));
        self.list_state.select((!self.rows.is_empty()).then_some(index));
    }

    pub fn rows(&self) -> &[SidebarRow] {
        &self.rows
    }

    pub fn cursor(&self) -> usize {
        self.list_state.selected().unwrap_or(0)
    }

    pub fn selected_row(&self) -> Option<&SidebarRow> {
        self.list_state.selected().and_then(|index| self.rows.get(index))
    }

    pub fn move_up(&mut self) {
        if !self.rows.is_empty() {
            self.list_state.select(Some(self.cursor().saturating_sub(1)));
        }
    }

    pub fn move_down(&mut self) {
        if !self.rows.is_empty() {
            let last = self.rows.len() - 1;
            self.list_state.select(Some((self.cursor() + 1).min(last)));
        }
    }

    pub fn move_to_start(&mut self) {
        if !self.rows.is_empty() {
            self.list_state.select(Some(0));
        }
    }

    pub fn move_to_end(&mut self) {
        if !self.rows.is_empty() {
            self.list_state.select(Some(self.rows.len() - 1));
        }
    }
}
