mod cli;
mod commands;

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::ArgMatches;
use clitutor_catalog::Catalog;
use clitutor_store::persistence::PROGRESS_PATH_ENV;
use clitutor_store::{
    InMemoryPersistence, JsonFilePersistence, ProgressPersistence, ProgressStore, SimulatedExecution,
    default_progress_path,
};
use clitutor_types::Difficulty;
use clitutor_util::{TutorConfig, config_file_path, expand_tilde};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

const LOG_PATH_ENV: &str = "CLITUTOR_LOG_PATH";

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();
    let interactive = matches.subcommand_name().is_none();
    init_tracing(interactive);

    let config = TutorConfig::load();
    let catalog = Arc::new(Catalog::from_embedded().context("failed to load the embedded command catalog")?);
    let progress_path = resolve_progress_path(matches.get_one::<PathBuf>("progress-file"), &config);
    debug!(path = %progress_path.display(), "using progress file");

    let store = Arc::new(
        ProgressStore::open(
            persistence_for(progress_path),
            Arc::new(SimulatedExecution::new(config.execution_delay())),
        )
        .context("failed to load saved progress")?,
    );

    // No subcommands => TUI
    if interactive {
        return clitutor_tui::run(catalog, store, config.theme.as_deref()).await;
    }

    run_command(&catalog, &store, &matches).await
}

/// Logs go to stderr for subcommands and to a file while the TUI owns the
/// terminal.
fn init_tracing(interactive: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if interactive {
        let path = config_file_path(LOG_PATH_ENV, "tui.log");
        match open_log_file(&path) {
            Ok(file) => {
                let _ = tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .try_init();
            }
            // printed before the alternate screen is entered
            Err(error) => eprintln!("clitutor: logging disabled, cannot open {}: {error}", path.display()),
        }
        return;
    }

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// `--progress-file`, then the environment, then the config file, then the
/// default location.
fn resolve_progress_path(flag: Option<&PathBuf>, config: &TutorConfig) -> PathBuf {
    if let Some(path) = flag {
        return path.clone();
    }
    if let Ok(path) = std::env::var(PROGRESS_PATH_ENV)
        && !path.trim().is_empty()
    {
        return expand_tilde(&path);
    }
    config.progress_path().unwrap_or_else(default_progress_path)
}

/// File-backed persistence, or in-memory when the directory cannot be
/// created.
fn persistence_for(path: PathBuf) -> Box<dyn ProgressPersistence> {
    if let Some(parent) = path.parent()
        && let Err(error) = fs::create_dir_all(parent)
    {
        warn!(
            path = %path.display(),
            error = %error,
            "progress directory is not writable; progress will not be saved"
        );
        return Box::new(InMemoryPersistence::new());
    }
    Box::new(JsonFilePersistence::new(Some(path)))
}

async fn run_command(catalog: &Catalog, store: &ProgressStore, matches: &ArgMatches) -> Result<()> {
    let (name, sub) = matches.subcommand().context("expected a subcommand")?;
    let mut out = io::stdout().lock();

    match name {
        "list" => commands::list(
            &mut out,
            catalog,
            store,
            sub.get_one::<String>("category").map(String::as_str),
            sub.get_one::<Difficulty>("difficulty").copied(),
        ),
        "show" => commands::show(&mut out, catalog, required(sub, "command")?),
        "search" => {
            let query = sub
                .get_many::<String>("query")
                .map(|words| words.map(String::as_str).collect::<Vec<_>>().join(" "))
                .unwrap_or_default();
            commands::search(&mut out, catalog, &query)
        }
        "run" => commands::run(&mut out, catalog, store, required(sub, "command")?).await,
        "progress" => commands::progress(&mut out, catalog, store),
        "history" => {
            let limit = sub
                .get_one::<usize>("limit")
                .copied()
                .unwrap_or(cli::DEFAULT_HISTORY_LIMIT);
            commands::history(&mut out, store, limit)
        }
        "reset" => commands::reset(&mut out, store),
        "lint" => commands::lint(&mut out, catalog, sub.get_flag("strict")),
        other => {
            warn!(subcommand = other, "unhandled subcommand");
            anyhow::bail!("unknown subcommand '{other}'")
        }
    }
}

fn required<'a>(matches: &'a ArgMatches, id: &str) -> Result<&'a str> {
    matches
        .get_one::<String>(id)
        .map(String::as_str)
        .with_context(|| format!("missing <{id}>"))
}
