//! Handlers for the non-interactive subcommands.
//!
//! Each handler writes human-readable text to the given writer so output can
//! be captured in tests.

use std::io::Write;

use anyhow::{Context, Result, bail};
use clitutor_catalog::Catalog;
use clitutor_store::{ExecutionOutcome, ProgressStore, selectors};
use clitutor_types::{Command, Difficulty};

fn lookup<'a>(catalog: &'a Catalog, reference: &str) -> Result<&'a Command> {
    if let Some(command) = catalog.resolve(reference) {
        return Ok(command);
    }
    let suggestions: Vec<&str> = catalog
        .search_with_limit(reference, 3)
        .into_iter()
        .map(|hit| hit.command.id.as_str())
        .collect();
    if suggestions.is_empty() {
        bail!("unknown command '{reference}'");
    }
    bail!("unknown command '{reference}' (did you mean: {})", suggestions.join(", "))
}

/// Categories with their commands, optionally narrowed to one category and
/// one difficulty. Category counters always cover the whole category.
pub fn list(
    out: &mut impl Write,
    catalog: &Catalog,
    store: &ProgressStore,
    category: Option<&str>,
    difficulty: Option<Difficulty>,
) -> Result<()> {
    if let Some(category_id) = category
        && catalog.category(category_id).is_none()
    {
        bail!("unknown category '{category_id}'");
    }

    let state = store.snapshot();
    for summary in selectors::category_progress(&state, catalog) {
        let category_ref = summary.category;
        if category.is_some_and(|wanted| wanted != category_ref.id) {
            continue;
        }
        writeln!(
            out,
            "{} {} [{}] {}/{}",
            category_ref.icon, category_ref.name, category_ref.id, summary.completed, summary.total
        )?;
        let commands = catalog
            .commands_in(&category_ref.id)
            .filter(|command| difficulty.is_none_or(|level| command.difficulty == level));
        for command in commands {
            let mark = if selectors::is_command_completed(&state, &command.id) { "✓" } else { " " };
            writeln!(
                out,
                "  [{mark}] {:<28} {:<36} {}",
                command.id, command.name, command.difficulty
            )?;
        }
    }
    Ok(())
}

pub fn show(out: &mut impl Write, catalog: &Catalog, reference: &str) -> Result<()> {
    let command = lookup(catalog, reference)?;
    let category = catalog
        .category(&command.category)
        .map(|category| category.name.as_str())
        .unwrap_or(command.category.as_str());

    writeln!(out, "{} ({})", command.name, command.id)?;
    writeln!(out, "Category:   {category}")?;
    writeln!(out, "Difficulty: {}", command.difficulty)?;
    writeln!(out)?;
    writeln!(out, "{}", command.description)?;
    writeln!(out)?;
    writeln!(out, "Syntax:  {}", command.syntax)?;
    writeln!(out, "Example: {}", command.example)?;
    if !command.output.is_empty() {
        writeln!(out, "\nExpected Output:")?;
        for line in command.output.split('\n') {
            writeln!(out, "  {line}")?;
        }
    }
    if !command.best_practices.is_empty() {
        writeln!(out, "\nBest practices:")?;
        for practice in &command.best_practices {
            writeln!(out, "  - {practice}")?;
        }
    }
    if !command.common_mistakes.is_empty() {
        writeln!(out, "\nCommon mistakes:")?;
        for mistake in &command.common_mistakes {
            writeln!(out, "  - {mistake}")?;
        }
    }
    let related = catalog.related(command);
    if !related.is_empty() {
        writeln!(out, "\nRelated:")?;
        for entry in related {
            match entry.command {
                Some(target) => writeln!(out, "  - {} ({})", target.name, target.id)?,
                None => writeln!(out, "  - {} (not in catalog)", entry.reference)?,
            }
        }
    }
    Ok(())
}

pub fn search(out: &mut impl Write, catalog: &Catalog, query: &str) -> Result<()> {
    let hits = catalog.search(query);
    if hits.is_empty() {
        writeln!(out, "No commands match '{query}'.")?;
        return Ok(());
    }
    for hit in hits {
        writeln!(out, "{:<28} {:<36} {}", hit.command.id, hit.command.name, hit.command.category)?;
    }
    Ok(())
}

/// Select `reference`, execute it, and print every transcript line added
/// along the way (prompt, output, separator).
pub async fn run(out: &mut impl Write, catalog: &Catalog, store: &ProgressStore, reference: &str) -> Result<()> {
    let command = lookup(catalog, reference)?.clone();
    let before = store.read(|state| state.terminal_output().len());

    store.set_selected_command(Some(command.clone()));
    let outcome = store.execute_command(&command).await;

    let new_lines = store.read(|state| state.terminal_output()[before..].to_vec());
    for line in new_lines {
        writeln!(out, "{line}")?;
    }

    match outcome {
        ExecutionOutcome::Completed { .. } => Ok(()),
        ExecutionOutcome::Failed { command_id, message } => bail!("{command_id} failed: {message}"),
        ExecutionOutcome::Rejected => bail!("another execution is already in flight"),
    }
}

pub fn progress(out: &mut impl Write, catalog: &Catalog, store: &ProgressStore) -> Result<()> {
    let state = store.snapshot();
    writeln!(
        out,
        "Completed {}/{} commands ({}%)",
        selectors::completed_count(&state),
        selectors::total_command_count(catalog),
        selectors::progress_percent(&state, catalog)
    )?;
    for summary in selectors::category_progress(&state, catalog) {
        writeln!(
            out,
            "  {} {:<24} {}/{}",
            summary.category.icon, summary.category.name, summary.completed, summary.total
        )?;
    }
    Ok(())
}

pub fn history(out: &mut impl Write, store: &ProgressStore, limit: usize) -> Result<()> {
    let state = store.snapshot();
    if state.execution_history().is_empty() {
        writeln!(out, "No commands executed yet.")?;
        return Ok(());
    }
    for entry in state.execution_history().iter().take(limit) {
        writeln!(
            out,
            "{}  {:<28} {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.command.id,
            entry.command.name
        )?;
    }
    Ok(())
}

pub fn reset(out: &mut impl Write, store: &ProgressStore) -> Result<()> {
    store.reset_progress();
    writeln!(out, "Progress reset.")?;
    Ok(())
}

pub fn lint(out: &mut impl Write, catalog: &Catalog, strict: bool) -> Result<()> {
    let report = catalog.lint();
    write!(out, "{report}")?;
    if strict && !report.is_clean() {
        return Err(anyhow::anyhow!("catalog is not clean")).context("lint --strict");
    }
    Ok(())
}
