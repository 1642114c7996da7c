use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, value_parser};
use clitutor_types::Difficulty;

/// Default number of entries printed by `history`.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Build the `clitutor` command tree.
pub fn build_cli() -> Command {
    Command::new("clitutor")
        .about("Interactive tutorial for the Claude Code command line")
        .long_about(
            "Interactive tutorial for the Claude Code command line.\n\n\
             Run without a subcommand to open the terminal UI.",
        )
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("progress-file")
                .long("progress-file")
                .global(true)
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("Read and write progress at PATH instead of the default location"),
        )
        .subcommand(
            Command::new("list")
                .about("List categories and their commands")
                .arg(
                    Arg::new("category")
                        .long("category")
                        .short('c')
                        .value_name("ID")
                        .help("Only list the commands of this category"),
                )
                .arg(
                    Arg::new("difficulty")
                        .long("difficulty")
                        .short('d')
                        .value_name("LEVEL")
                        .value_parser(value_parser!(Difficulty))
                        .help("Only list commands of this difficulty (beginner, intermediate, advanced)"),
                ),
        )
        .subcommand(
            Command::new("show")
                .about("Show the documentation of a command")
                .arg(Arg::new("command").required(true).value_name("COMMAND").help("Command id or name")),
        )
        .subcommand(
            Command::new("search").about("Search the catalog").arg(
                Arg::new("query")
                    .required(true)
                    .num_args(1..)
                    .value_name("QUERY")
                    .help("Words that must all match"),
            ),
        )
        .subcommand(
            Command::new("run")
                .about("Select and run a command, printing the new transcript lines")
                .arg(Arg::new("command").required(true).value_name("COMMAND").help("Command id or name")),
        )
        .subcommand(Command::new("progress").about("Show overall and per-category progress"))
        .subcommand(
            Command::new("history").about("Show recent executions, newest first").arg(
                Arg::new("limit")
                    .long("limit")
                    .short('n')
                    .value_name("N")
                    .value_parser(value_parser!(usize))
                    .default_value("10")
                    .help("Maximum number of entries"),
            ),
        )
        .subcommand(Command::new("reset").about("Clear execution history and completed commands"))
        .subcommand(
            Command::new("lint").about("Check the embedded catalog for consistency").arg(
                Arg::new("strict")
                    .long("strict")
                    .action(ArgAction::SetTrue)
                    .help("Fail when identifiers are shadowed or commands lack a category"),
            ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_tree_is_valid() {
        build_cli().debug_assert();
    }

    #[test]
    fn no_subcommand_parses() {
        let matches = build_cli().try_get_matches_from(["clitutor"]).unwrap();
        assert!(matches.subcommand_name().is_none());
    }

    #[test]
    fn progress_file_is_global() {
        let matches = build_cli()
            .try_get_matches_from(["clitutor", "progress", "--progress-file", "/tmp/p.json"])
            .unwrap();
        assert_eq!(
            matches.get_one::<PathBuf>("progress-file"),
            Some(&PathBuf::from("/tmp/p.json"))
        );
    }

    #[test]
    fn history_limit_defaults() {
        let matches = build_cli().try_get_matches_from(["clitutor", "history"]).unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        assert_eq!(sub.get_one::<usize>("limit"), Some(&DEFAULT_HISTORY_LIMIT));
    }

    #[test]
    fn difficulty_filter_parses_levels() {
        let matches = build_cli()
            .try_get_matches_from(["clitutor", "list", "--difficulty", "Advanced"])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        assert_eq!(sub.get_one::<Difficulty>("difficulty"), Some(&Difficulty::Advanced));

        assert!(
            build_cli()
                .try_get_matches_from(["clitutor", "list", "-d", "expert"])
                .is_err()
        );
    }

    #[test]
    fn search_joins_multiple_words() {
        let matches = build_cli()
            .try_get_matches_from(["clitutor", "search", "output", "format"])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        let words: Vec<&String> = sub.get_many::<String>("query").unwrap().collect();
        assert_eq!(words, ["output", "format"]);
    }
}
