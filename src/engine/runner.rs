//! engine::runner
//!
//! Production engine over the clap command tree.
//!
//! # Design
//!
//! [`CliEngine`] parses each argument vector with the real CLI definition
//! and runs the matched handler with a fresh capture. Help and version
//! requests surface from clap as parse "errors"; they are mapped to a
//! zero exit with the rendered text on stdout, while genuine usage errors
//! keep clap's exit code with the rendered text on stderr. A handler
//! error becomes exit code 1 with the error chain appended to captured
//! stderr.
//!
//! The engine also reflects the clap graph into the declarative
//! [`CommandNode`] tree the shell catalogs.

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use super::{CommandNode, Engine, EngineError, Invocation, Streams};
use crate::cli::args::{Cli, Command};
use crate::cli::{commands, Context};

/// Binary name prepended to every argument vector before parsing.
const BIN_NAME: &str = "qd";

/// Engine backed by the application's own command-line interface.
#[derive(Debug, Clone, Copy, Default)]
pub struct CliEngine;

impl CliEngine {
    /// Create the engine. Stateless; every invocation parses fresh.
    pub fn new() -> Self {
        Self
    }
}

impl Engine for CliEngine {
    fn invoke(&self, argv: &[String]) -> Result<Invocation, EngineError> {
        if argv.is_empty() {
            return Err(EngineError::InvalidArgv(
                "empty argument vector".to_string(),
            ));
        }

        let mut full = Vec::with_capacity(argv.len() + 1);
        full.push(BIN_NAME.to_string());
        full.extend_from_slice(argv);

        let cli = match Cli::try_parse_from(full) {
            Ok(cli) => cli,
            Err(err) => {
                let rendered = err.render().to_string();
                return Ok(match err.kind() {
                    // Help and version parse as "errors" but carry their
                    // text in the rendered message and exit zero.
                    ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => Invocation {
                        exit_code: 0,
                        stdout: rendered,
                        stderr: String::new(),
                    },
                    _ => Invocation {
                        exit_code: err.exit_code(),
                        stdout: String::new(),
                        stderr: rendered,
                    },
                });
            }
        };

        if matches!(cli.command, Command::Interactive { .. }) {
            return Ok(Invocation {
                exit_code: 1,
                stdout: String::new(),
                stderr: "Cannot launch the interactive console from inside an interactive session\n"
                    .to_string(),
            });
        }

        let ctx = Context {
            debug: cli.debug,
            quiet: cli.quiet,
        };

        let mut streams = Streams::new();
        match commands::dispatch(cli.command, &ctx, &mut streams) {
            Ok(()) => Ok(Invocation {
                exit_code: 0,
                stdout: streams.out,
                stderr: streams.err,
            }),
            Err(err) => {
                // The error chain goes to captured stderr, the way the
                // one-shot entry point would print it.
                streams.errln(format!("error: {:#}", err));
                Ok(Invocation {
                    exit_code: 1,
                    stdout: streams.out,
                    stderr: streams.err,
                })
            }
        }
    }

    fn command_tree(&self) -> Vec<CommandNode> {
        Cli::command().get_subcommands().map(reflect).collect()
    }
}

/// Convert one clap command into a declarative tree node.
fn reflect(command: &clap::Command) -> CommandNode {
    CommandNode {
        name: command.get_name().to_string(),
        help: command.get_long_about().map(|about| about.to_string()),
        short_help: command.get_about().map(|about| about.to_string()),
        children: command.get_subcommands().map(reflect).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn argv(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    fn invoke(tokens: &[&str]) -> Invocation {
        CliEngine::new().invoke(&argv(tokens)).unwrap()
    }

    #[test]
    fn version_captures_stdout() {
        let result = invoke(&["version"]);

        assert_eq!(result.exit_code, 0);
        assert!(result.stdout.starts_with("OCX Reader CLI v"));
        assert!(result.stderr.is_empty());
    }

    #[test]
    fn unknown_command_is_a_usage_error() {
        let result = invoke(&["no-such-command"]);

        assert_eq!(result.exit_code, 2);
        assert!(result.stdout.is_empty());
        assert!(!result.stderr.is_empty());
    }

    #[test]
    fn help_flag_exits_zero_with_stdout() {
        let result = invoke(&["version", "--help"]);

        assert_eq!(result.exit_code, 0);
        assert!(result.stdout.contains("Usage"));
        assert!(result.stderr.is_empty());
    }

    #[test]
    fn bare_group_is_a_usage_error() {
        let result = invoke(&["serialize"]);

        assert_eq!(result.exit_code, 2);
        assert!(result.stderr.contains("Usage"));
    }

    #[test]
    fn interactive_is_refused() {
        let result = invoke(&["interactive"]);

        assert_eq!(result.exit_code, 1);
        assert!(result.stderr.contains("interactive session"));
    }

    #[test]
    fn empty_argv_is_rejected() {
        let err = CliEngine::new().invoke(&[]).unwrap_err();
        assert!(err.to_string().contains("empty argument vector"));
    }

    #[test]
    fn serialize_json_writes_the_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.json");

        let result = invoke(&[
            "serialize",
            "json",
            "--file-name",
            path.to_str().unwrap(),
        ]);

        assert_eq!(result.exit_code, 0);
        assert!(path.exists());
        assert!(result.stdout.contains("Serialized report to JSON file"));
    }

    #[test]
    fn handler_error_becomes_exit_one_on_stderr() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing-dir/out.json");

        let result = invoke(&[
            "serialize",
            "json",
            "--file-name",
            path.to_str().unwrap(),
        ]);

        assert_eq!(result.exit_code, 1);
        assert!(result.stderr.contains("error:"));
        assert!(result.stderr.contains("Failed to write"));
    }

    mod tree {
        use super::*;

        #[test]
        fn reflects_top_level_commands() {
            let tree = CliEngine::new().command_tree();
            let names: Vec<&str> = tree.iter().map(|node| node.name.as_str()).collect();

            for expected in ["interactive", "version", "list-commands", "completion", "serialize"] {
                assert!(names.contains(&expected), "missing {}", expected);
            }
            assert!(!names.contains(&"help"));
        }

        #[test]
        fn reflects_group_children() {
            let tree = CliEngine::new().command_tree();
            let serialize = tree
                .iter()
                .find(|node| node.name == "serialize")
                .expect("serialize group");

            let children: Vec<&str> = serialize
                .children
                .iter()
                .map(|node| node.name.as_str())
                .collect();
            assert_eq!(children, ["json", "csv"]);
        }

        #[test]
        fn reflects_help_strings() {
            let tree = CliEngine::new().command_tree();
            let version = tree
                .iter()
                .find(|node| node.name == "version")
                .expect("version command");

            assert_eq!(
                version.short_help.as_deref(),
                Some("Display the application version")
            );
            assert!(version.children.is_empty());
        }
    }
}
