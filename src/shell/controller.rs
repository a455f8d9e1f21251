//! shell::controller
//!
//! Resolves input lines against the catalog and drives dispatch.
//!
//! # State machine
//!
//! One line moves through Idle -> Resolving -> Dispatching -> Idle; the
//! built-in exit command leaves through Exiting instead, after which the
//! owner persists history and flushes configuration. The controller
//! accepts the next line only after the previous render completed, so at
//! most one dispatch is in flight.
//!
//! # Builtins
//!
//! `exit`/`quit`, `history`, and `help` are handled here and exist
//! nowhere in the catalog: they cannot be dispatched, listed as commands,
//! or fuzzily suggested.

use std::sync::Arc;

use crate::shell::catalog::{Catalog, CommandSpec};
use crate::shell::dispatch::{is_help_flag, DispatchBridge, DispatchResult};
use crate::shell::history::{HistoryStore, NavigationCursor};
use crate::ui::surface::OutputSurface;

/// First tokens that end the session, matched case-insensitively.
const EXIT_ALIASES: [&str; 2] = ["exit", "quit"];

/// Minimum similarity for a fuzzy suggestion.
const SUGGESTION_CUTOFF: f64 = 0.6;

/// Most suggestions shown for one miss.
const MAX_SUGGESTIONS: usize = 3;

/// What the owner should do after one handled line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// Keep reading input.
    Continue,
    /// The user asked to leave; persist state and terminate.
    Exit,
}

/// Ties catalog, history, dispatch, and the render surface together.
pub struct ShellController {
    catalog: Catalog,
    bridge: DispatchBridge,
    history: HistoryStore,
    cursor: NavigationCursor,
    surface: Arc<dyn OutputSurface>,
}

impl ShellController {
    /// Assemble a controller over an already-built catalog.
    pub fn new(
        catalog: Catalog,
        bridge: DispatchBridge,
        history: HistoryStore,
        surface: Arc<dyn OutputSurface>,
    ) -> Self {
        Self {
            catalog,
            bridge,
            history,
            cursor: NavigationCursor::new(),
            surface,
        }
    }

    /// Handle one submitted input line.
    ///
    /// Empty lines are ignored. Every other line is appended to history
    /// before anything else happens, so a failing dispatch can never lose
    /// it.
    pub async fn handle_line(&mut self, line: &str) -> LineOutcome {
        let line = line.trim();
        if line.is_empty() {
            return LineOutcome::Continue;
        }

        self.history.add(line);
        self.cursor.reset();

        let tokens: Vec<String> = line.split_whitespace().map(String::from).collect();
        let first = tokens[0].to_lowercase();

        if EXIT_ALIASES.contains(&first.as_str()) {
            self.surface.render("Exiting...");
            return LineOutcome::Exit;
        }

        if first == "history" {
            self.render_history();
            return LineOutcome::Continue;
        }

        if first == "help" {
            if tokens.len() > 1 {
                self.render_target_help(&tokens[1..]).await;
            } else {
                self.render_all_commands_help();
            }
            return LineOutcome::Continue;
        }

        let Some((path, extra)) = self.resolve(&tokens) else {
            self.render_unknown(&tokens[0]);
            return LineOutcome::Continue;
        };

        let help_requested = tokens.iter().any(|token| is_help_flag(token));
        let result = self.bridge.dispatch(&path, &extra).await;
        self.render_result(help_requested, &result);
        LineOutcome::Continue
    }

    /// Recall one step backward; returns the text to load into the input.
    ///
    /// `current` is the unsent input, captured as the draft when browsing
    /// begins.
    pub fn history_previous(&mut self, current: &str) -> Option<String> {
        self.cursor.previous(&self.history, current)
    }

    /// Recall one step forward; past the newest entry this hands the
    /// captured draft back and ends browsing.
    pub fn history_next(&mut self) -> Option<String> {
        self.cursor.next(&self.history)
    }

    /// Leave browsing without submitting, as a fresh edit does.
    pub fn history_reset(&mut self) {
        self.cursor.reset();
    }

    /// Persist history on the way out. Best-effort: a failed write is
    /// reported and the shutdown continues.
    pub fn shutdown(&mut self) {
        if let Err(err) = self.history.save() {
            self.surface.render(&format!("Error: {}", err));
        }
    }

    /// Read access to the session history.
    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Resolve leading tokens against the catalog.
    ///
    /// The two-token join is tried first whenever more than one token is
    /// present, so a group child shadows a same-named top-level command.
    /// That tie-break is policy; see the dedicated test before changing
    /// it.
    fn resolve(&self, tokens: &[String]) -> Option<(Vec<String>, Vec<String>)> {
        if tokens.len() > 1 {
            let joined = format!("{} {}", tokens[0], tokens[1]);
            if self.catalog.contains(&joined) {
                return Some((tokens[..2].to_vec(), tokens[2..].to_vec()));
            }
        }

        if self.catalog.contains(&tokens[0]) {
            return Some((tokens[..1].to_vec(), tokens[1..].to_vec()));
        }

        None
    }

    /// Render one dispatch outcome.
    fn render_result(&self, help_requested: bool, result: &DispatchResult) {
        if help_requested {
            if !result.help_text.is_empty() {
                self.surface.render(result.help_text.trim_end());
            } else if !result.stdout.is_empty() {
                self.surface.render(result.stdout.trim_end());
            }
            return;
        }

        if !result.stdout.is_empty() {
            self.surface.render(result.stdout.trim_end());
        } else if !result.stderr.is_empty() {
            self.surface
                .render(&format!("Error: {}", result.stderr.trim_end()));
        } else if result.exit_code != 0 && !result.help_text.is_empty() {
            self.surface.render(result.help_text.trim_end());
        }
    }

    /// Render the numbered history listing.
    fn render_history(&self) {
        self.surface.render("Command History:");
        if self.history.is_empty() {
            self.surface.render("  No history yet.");
            return;
        }
        for (index, entry) in self.history.entries().iter().enumerate() {
            self.surface.render(&format!("  {:>3}: {}", index + 1, entry));
        }
    }

    /// Render the top-level command listing.
    fn render_all_commands_help(&self) {
        self.surface.render("Available Commands:");
        for spec in self.catalog.top_level() {
            let suffix = if spec.is_group { " (group)" } else { "" };
            let line = if spec.description.is_empty() {
                format!("  {}{}", spec.key(), suffix)
            } else {
                format!("  {}{}: {}", spec.key(), suffix, spec.description)
            };
            self.surface.render(&line);
        }
        self.surface
            .render("Type 'help <command>' for detailed help on a specific command");
    }

    /// Render help for a named target: a group's children, a leaf's own
    /// help text, or an unknown-command notice.
    async fn render_target_help(&self, args: &[String]) {
        let target = args.join(" ");

        if args.len() == 1 {
            if let Some(spec) = self.catalog.get(&target) {
                if spec.is_group {
                    self.render_group_help(spec);
                } else {
                    self.dispatch_help(&args[..1]).await;
                }
                return;
            }
        } else if self.catalog.contains(&target) {
            self.dispatch_help(&args[..2]).await;
            return;
        }

        self.surface.render(&format!("Unknown command: {}", target));
    }

    /// Render a group's description and direct children.
    fn render_group_help(&self, spec: &CommandSpec) {
        let key = spec.key();
        self.surface.render(&format!("Command Group: {}", key));
        if !spec.description.is_empty() {
            self.surface
                .render(&format!("Description: {}", spec.description));
        }
        self.surface.render("Subcommands:");
        for child in self.catalog.children_of(&key) {
            let line = if child.description.is_empty() {
                format!("  {}", child.leaf_name())
            } else {
                format!("  {}: {}", child.leaf_name(), child.description)
            };
            self.surface.render(&line);
        }
        self.surface
            .render(&format!("Type 'help {} <subcommand>' for detailed help", key));
    }

    /// Dispatch a path with a help flag and render what comes back.
    async fn dispatch_help(&self, path: &[String]) {
        let help_flag = ["--help".to_string()];
        let result = self.bridge.dispatch(path, &help_flag).await;

        if !result.help_text.is_empty() {
            self.surface.render(result.help_text.trim_end());
        } else if !result.stdout.is_empty() {
            self.surface.render(result.stdout.trim_end());
        }
    }

    /// Render an unknown-command notice with fuzzy suggestions.
    fn render_unknown(&self, token: &str) {
        self.surface.render(&format!("Unknown command: {}", token));

        let matches = suggestions(token, self.catalog.keys());
        if !matches.is_empty() {
            self.surface
                .render(&format!("Did you mean: {}?", matches.join(", ")));
        }
    }
}

/// Closest catalog keys to `input`, best first.
fn suggestions<'a>(input: &str, keys: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut scored: Vec<(f64, &str)> = keys
        .filter_map(|key| {
            let score = similarity(input, key);
            (score >= SUGGESTION_CUTOFF).then_some((score, key))
        })
        .collect();

    scored.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.1.cmp(b.1))
    });

    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, key)| key.to_string())
        .collect()
}

/// Normalized similarity in `[0, 1]`; 1 is an exact match.
fn similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f64 / longest as f64
}

/// Edit distance with a rolling pair of rows.
fn levenshtein(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let width = b_chars.len();

    let mut prev_row: Vec<usize> = (0..=width).collect();
    let mut curr_row = vec![0usize; width + 1];

    for (i, a_ch) in a_chars.iter().enumerate() {
        curr_row[0] = i + 1;
        for (j, b_ch) in b_chars.iter().enumerate() {
            let cost = usize::from(a_ch != b_ch);
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[width]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{CommandNode, Invocation, MockEngine};
    use crate::ui::surface::MockSurface;

    /// Controller over a mock engine and a recording surface.
    struct Fixture {
        controller: ShellController,
        engine: MockEngine,
        surface: Arc<MockSurface>,
    }

    impl Fixture {
        fn new() -> Self {
            let engine = MockEngine::new();
            let tree = vec![
                CommandNode::leaf("version", Some("Display the application version")),
                CommandNode::leaf("list-commands", Some("List all available commands")),
                CommandNode::group(
                    "serialize",
                    Some("Serialisation of a report to disk"),
                    vec![
                        CommandNode::leaf("json", Some("Write the sample report as JSON")),
                        CommandNode::leaf("csv", Some("Write the sample report as CSV")),
                    ],
                ),
            ];
            let catalog = Catalog::build(&tree).catalog;

            let surface = Arc::new(MockSurface::new());
            let controller = ShellController::new(
                catalog,
                DispatchBridge::new(Arc::new(engine.clone())),
                HistoryStore::new("unused", 100),
                Arc::clone(&surface) as Arc<dyn OutputSurface>,
            );

            Self {
                controller,
                engine,
                surface,
            }
        }

        fn rendered(&self) -> Vec<String> {
            self.surface.rendered()
        }
    }

    mod resolution {
        use super::*;

        #[tokio::test]
        async fn known_command_renders_stdout_once() {
            let mut fx = Fixture::new();
            fx.engine.respond(&["version"], Invocation {
                exit_code: 0,
                stdout: "App v1.0.0\n".to_string(),
                stderr: String::new(),
            });

            let outcome = fx.controller.handle_line("version").await;

            assert_eq!(outcome, LineOutcome::Continue);
            assert_eq!(fx.rendered(), vec!["App v1.0.0"]);
        }

        #[tokio::test]
        async fn two_token_path_wins_over_group_alone() {
            let mut fx = Fixture::new();
            fx.engine.respond(
                &["serialize", "json", "--file-name", "out.json"],
                Invocation {
                    exit_code: 0,
                    stdout: "written\n".to_string(),
                    stderr: String::new(),
                },
            );

            fx.controller
                .handle_line("serialize json --file-name out.json")
                .await;

            // The bridge received the two-token path, not the bare group
            // with "json" as a positional argument.
            assert_eq!(
                fx.engine.invocations(),
                vec![vec!["serialize", "json", "--file-name", "out.json"]]
            );
            assert_eq!(fx.rendered(), vec!["written"]);
        }

        #[tokio::test]
        async fn stderr_renders_with_error_prefix() {
            let mut fx = Fixture::new();
            fx.engine.respond(&["version"], Invocation {
                exit_code: 1,
                stdout: String::new(),
                stderr: "backend offline\n".to_string(),
            });

            fx.controller.handle_line("version").await;

            assert_eq!(fx.rendered(), vec!["Error: backend offline"]);
        }

        #[tokio::test]
        async fn silent_failure_renders_recovered_help() {
            let mut fx = Fixture::new();
            fx.engine.respond(&["serialize"], Invocation {
                exit_code: 2,
                stdout: String::new(),
                stderr: String::new(),
            });
            fx.engine.respond(&["serialize", "--help"], Invocation {
                exit_code: 0,
                stdout: "Usage: serialize <COMMAND>\n".to_string(),
                stderr: String::new(),
            });

            fx.controller.handle_line("serialize").await;

            assert_eq!(fx.rendered(), vec!["Usage: serialize <COMMAND>"]);
        }

        #[tokio::test]
        async fn help_flag_renders_help_text() {
            let mut fx = Fixture::new();
            fx.engine.respond(&["version", "--help"], Invocation {
                exit_code: 0,
                stdout: "Usage: version\n".to_string(),
                stderr: String::new(),
            });

            fx.controller.handle_line("version --help").await;

            assert_eq!(fx.rendered(), vec!["Usage: version"]);
        }

        #[tokio::test]
        async fn unknown_command_suggests_close_matches() {
            let mut fx = Fixture::new();

            fx.controller.handle_line("versoin").await;

            let rendered = fx.rendered();
            assert_eq!(rendered[0], "Unknown command: versoin");
            assert!(rendered[1].starts_with("Did you mean:"));
            assert!(rendered[1].contains("version"));
        }

        #[tokio::test]
        async fn unknown_command_without_matches_has_no_suggestion_line() {
            let mut fx = Fixture::new();

            fx.controller.handle_line("xyzzy").await;

            assert_eq!(fx.rendered(), vec!["Unknown command: xyzzy"]);
        }

        #[tokio::test]
        async fn empty_line_is_ignored() {
            let mut fx = Fixture::new();

            let outcome = fx.controller.handle_line("   ").await;

            assert_eq!(outcome, LineOutcome::Continue);
            assert!(fx.rendered().is_empty());
            assert!(fx.controller.history().is_empty());
        }

        #[tokio::test]
        async fn lines_reach_history_even_on_resolution_miss() {
            let mut fx = Fixture::new();

            fx.controller.handle_line("no-such-thing").await;

            assert_eq!(fx.controller.history().entries(), ["no-such-thing"]);
        }
    }

    mod builtins {
        use super::*;

        #[tokio::test]
        async fn exit_aliases_end_the_session() {
            for alias in ["exit", "quit", "EXIT", "Quit"] {
                let mut fx = Fixture::new();
                let outcome = fx.controller.handle_line(alias).await;
                assert_eq!(outcome, LineOutcome::Exit, "alias {}", alias);
                assert_eq!(fx.rendered(), vec!["Exiting..."]);
            }
        }

        #[tokio::test]
        async fn history_builtin_lists_entries_one_based() {
            let mut fx = Fixture::new();
            fx.engine.respond(&["version"], Invocation::default());

            fx.controller.handle_line("version").await;
            fx.surface.clear();
            fx.controller.handle_line("history").await;

            let rendered = fx.rendered();
            assert_eq!(rendered[0], "Command History:");
            assert_eq!(rendered[1], "    1: version");
            // The history line itself was recorded before being handled.
            assert_eq!(rendered[2], "    2: history");
        }

        #[tokio::test]
        async fn history_builtin_on_empty_history() {
            let mut fx = Fixture::new();

            fx.controller.handle_line("history").await;

            // "history" itself is recorded first, so the listing shows it.
            assert_eq!(
                fx.rendered(),
                vec!["Command History:", "    1: history"]
            );
        }

        #[tokio::test]
        async fn builtins_never_dispatch() {
            let mut fx = Fixture::new();

            fx.controller.handle_line("history").await;
            fx.controller.handle_line("help").await;

            assert!(fx.engine.invocations().is_empty());
        }

        #[tokio::test]
        async fn builtins_are_not_suggested() {
            let mut fx = Fixture::new();

            fx.controller.handle_line("histroy").await;

            // "histroy" is close to the builtin's name, but builtins are
            // not catalog keys and must not appear as suggestions.
            assert_eq!(fx.rendered(), vec!["Unknown command: histroy"]);
        }
    }

    mod help {
        use super::*;

        #[tokio::test]
        async fn bare_help_lists_top_level_with_group_annotation() {
            let mut fx = Fixture::new();

            fx.controller.handle_line("help").await;

            let rendered = fx.rendered();
            assert_eq!(rendered[0], "Available Commands:");
            assert!(rendered
                .iter()
                .any(|l| l.contains("serialize (group): Serialisation of a report to disk")));
            assert!(rendered
                .iter()
                .any(|l| l.contains("version: Display the application version")));
            // Children are not top-level entries.
            assert!(!rendered.iter().any(|l| l.contains("serialize json")));
        }

        #[tokio::test]
        async fn help_on_group_lists_direct_children() {
            let mut fx = Fixture::new();

            fx.controller.handle_line("help serialize").await;

            let rendered = fx.rendered();
            assert_eq!(rendered[0], "Command Group: serialize");
            assert!(rendered.contains(&"Subcommands:".to_string()));
            assert!(rendered
                .iter()
                .any(|l| l.contains("json: Write the sample report as JSON")));
            assert!(rendered
                .iter()
                .any(|l| l.contains("csv: Write the sample report as CSV")));
            assert!(fx.engine.invocations().is_empty());
        }

        #[tokio::test]
        async fn help_on_leaf_dispatches_help_flag() {
            let mut fx = Fixture::new();
            fx.engine.respond(&["version", "--help"], Invocation {
                exit_code: 0,
                stdout: "Usage: version\n".to_string(),
                stderr: String::new(),
            });

            fx.controller.handle_line("help version").await;

            assert_eq!(fx.engine.invocations(), vec![vec!["version", "--help"]]);
            assert_eq!(fx.rendered(), vec!["Usage: version"]);
        }

        #[tokio::test]
        async fn help_on_group_child_dispatches_help_flag() {
            let mut fx = Fixture::new();
            fx.engine.respond(&["serialize", "json", "--help"], Invocation {
                exit_code: 0,
                stdout: "Usage: serialize json [OPTIONS]\n".to_string(),
                stderr: String::new(),
            });

            fx.controller.handle_line("help serialize json").await;

            assert_eq!(fx.rendered(), vec!["Usage: serialize json [OPTIONS]"]);
        }

        #[tokio::test]
        async fn help_on_unknown_path_is_a_notice_not_a_crash() {
            let mut fx = Fixture::new();

            fx.controller.handle_line("help no such thing").await;

            assert_eq!(fx.rendered(), vec!["Unknown command: no such thing"]);
        }
    }

    mod navigation {
        use super::*;

        #[tokio::test]
        async fn submitted_lines_are_recallable() {
            let mut fx = Fixture::new();
            fx.engine.respond(&["version"], Invocation::default());

            fx.controller.handle_line("version").await;

            assert_eq!(
                fx.controller.history_previous("draft").as_deref(),
                Some("version")
            );
            assert_eq!(fx.controller.history_next().as_deref(), Some("draft"));
        }

        #[tokio::test]
        async fn fresh_edit_resets_browsing() {
            let mut fx = Fixture::new();
            fx.engine.respond(&["version"], Invocation::default());

            fx.controller.handle_line("version").await;
            fx.controller.history_previous("typed-so-far");
            fx.controller.history_reset();

            assert_eq!(fx.controller.history_next(), None);
        }

        #[tokio::test]
        async fn submitting_resets_browsing() {
            let mut fx = Fixture::new();
            fx.engine.respond(&["version"], Invocation::default());

            fx.controller.handle_line("version").await;
            fx.controller.history_previous("half-typed");
            fx.controller.handle_line("version").await;

            // Browsing state was reset by the submit; next has nothing.
            assert_eq!(fx.controller.history_next(), None);
        }
    }

    mod matching {
        use super::*;

        #[test]
        fn levenshtein_basics() {
            assert_eq!(levenshtein("", ""), 0);
            assert_eq!(levenshtein("abc", "abc"), 0);
            assert_eq!(levenshtein("abc", "abd"), 1);
            assert_eq!(levenshtein("versoin", "version"), 2);
            assert_eq!(levenshtein("", "abc"), 3);
        }

        #[test]
        fn suggestions_are_capped_and_ordered() {
            let keys = ["vers", "verse", "versed", "version", "unrelated"];
            let result = suggestions("versi", keys.into_iter());

            assert!(result.len() <= MAX_SUGGESTIONS);
            assert!(result.contains(&"version".to_string()) || result.contains(&"verse".to_string()));
            assert!(!result.contains(&"unrelated".to_string()));
        }

        #[test]
        fn suggestions_below_cutoff_are_dropped() {
            let keys = ["serialize"];
            assert!(suggestions("zzz", keys.into_iter()).is_empty());
        }
    }
}
