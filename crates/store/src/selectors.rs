//! Derived read-only views over a progress state and the catalog.
//!
//! Nothing here is stored; every value is recomputed from the completed set
//! and the catalog on demand.

use clitutor_catalog::Catalog;
use clitutor_types::Category;

use crate::state::ProgressState;

/// Completion summary for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryProgress<'a> {
    pub category: &'a Category,
    pub completed: usize,
    pub total: usize,
}

pub fn completed_count(state: &ProgressState) -> usize {
    state.completed_commands().len()
}

pub fn total_command_count(catalog: &Catalog) -> usize {
    catalog.total_command_count()
}

/// Completed identifiers over the catalog size, clamped to `0.0..=1.0`.
///
/// The numerator is the raw size of the completed set, so identifiers left
/// over from an older catalog still count; the clamp keeps the fraction sane.
pub fn progress_fraction(state: &ProgressState, catalog: &Catalog) -> f64 {
    let total = total_command_count(catalog);
    if total == 0 {
        return 0.0;
    }
    (completed_count(state) as f64 / total as f64).clamp(0.0, 1.0)
}

/// [`progress_fraction`] as a whole percentage.
pub fn progress_percent(state: &ProgressState, catalog: &Catalog) -> u16 {
    (progress_fraction(state, catalog) * 100.0).round() as u16
}

pub fn is_command_completed(state: &ProgressState, command_id: &str) -> bool {
    state.completed_commands().contains(command_id)
}

/// Number of the category's commands whose identifiers are completed.
pub fn category_completed_count(state: &ProgressState, catalog: &Catalog, category_id: &str) -> usize {
    catalog
        .commands_in(category_id)
        .filter(|command| is_command_completed(state, &command.id))
        .count()
}

/// Per-category summary in catalog order.
pub fn category_progress<'a>(state: &ProgressState, catalog: &'a Catalog) -> Vec<CategoryProgress<'a>> {
    catalog
        .categories()
        .iter()
        .map(|category| CategoryProgress {
            category,
            completed: category_completed_count(state, catalog, &category.id),
            total: catalog.commands_in(&category.id).count(),
        })
        .collect()
}
