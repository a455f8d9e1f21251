//! shell::catalog
//!
//! Flattens the engine's declarative command tree into an addressable
//! catalog.
//!
//! # Design
//!
//! The tree is recursive; the catalog is flat. Every top-level command
//! becomes one entry keyed by its name, every child of a group becomes one
//! entry keyed by `"group child"`, and nothing deeper is addressable. The
//! group/leaf distinction is decided once here, never re-derived at
//! dispatch time.
//!
//! Building is total: malformed entries are excluded and reported as
//! diagnostics rather than aborting startup. The launch command that
//! starts the interactive session is excluded by name, since it is
//! meaningless inside an already-running session.

use std::collections::BTreeMap;

use crate::engine::CommandNode;

/// Name of the command that launches the interactive session.
const LAUNCH_COMMAND: &str = "interactive";

/// One invokable (or group) entry in the catalog.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    /// Path tokens, one for a top-level command, two for a group child.
    pub path: Vec<String>,
    /// Human description; empty when the tree declares none.
    pub description: String,
    /// Whether this entry anchors children instead of a handler.
    pub is_group: bool,
    /// Key of the owning group, for group children.
    pub parent: Option<String>,
}

impl CommandSpec {
    /// Space-joined path, the catalog key.
    pub fn key(&self) -> String {
        self.path.join(" ")
    }

    /// Last path token; what a child is called inside its group.
    pub fn leaf_name(&self) -> &str {
        self.path.last().map(String::as_str).unwrap_or_default()
    }
}

/// Outcome of one catalog build: the catalog plus anything it skipped.
#[derive(Debug)]
pub struct CatalogBuildResult {
    /// The (possibly partial) catalog.
    pub catalog: Catalog,
    /// One message per excluded entry.
    pub diagnostics: Vec<String>,
}

/// Flat mapping from path key to command entry.
///
/// Built once at startup, read-only afterwards. Iteration order is
/// sorted by key, which gives help listings their ordering for free.
#[derive(Debug, Default)]
pub struct Catalog {
    specs: BTreeMap<String, CommandSpec>,
}

impl Catalog {
    /// Flatten a command tree into a catalog.
    ///
    /// Pure: no I/O, no side effects. Entries with blank names (and the
    /// children stranded under them), duplicate keys, and the launch
    /// command are excluded; each exclusion other than the launch command
    /// produces a diagnostic.
    pub fn build(tree: &[CommandNode]) -> CatalogBuildResult {
        let mut catalog = Catalog::default();
        let mut diagnostics = Vec::new();

        for node in tree {
            let name = node.name.trim();
            if name.is_empty() {
                diagnostics.push(format!(
                    "command tree entry with blank name skipped ({} children dropped)",
                    node.children.len()
                ));
                continue;
            }
            if name == LAUNCH_COMMAND {
                continue;
            }

            let is_group = !node.children.is_empty();
            catalog.insert(
                CommandSpec {
                    path: vec![name.to_string()],
                    description: describe(node),
                    is_group,
                    parent: None,
                },
                &mut diagnostics,
            );

            if !is_group {
                continue;
            }
            for child in &node.children {
                let child_name = child.name.trim();
                if child_name.is_empty() {
                    diagnostics.push(format!(
                        "child of '{}' with blank name skipped",
                        name
                    ));
                    continue;
                }
                catalog.insert(
                    CommandSpec {
                        path: vec![name.to_string(), child_name.to_string()],
                        description: describe(child),
                        is_group: false,
                        parent: Some(name.to_string()),
                    },
                    &mut diagnostics,
                );
            }
        }

        CatalogBuildResult {
            catalog,
            diagnostics,
        }
    }

    /// Insert a spec unless its key is already taken.
    fn insert(&mut self, spec: CommandSpec, diagnostics: &mut Vec<String>) {
        let key = spec.key();
        if self.specs.contains_key(&key) {
            diagnostics.push(format!("duplicate command path '{}' skipped", key));
            return;
        }
        self.specs.insert(key, spec);
    }

    /// Entry for a path key.
    pub fn get(&self, key: &str) -> Option<&CommandSpec> {
        self.specs.get(key)
    }

    /// Whether a path key resolves.
    pub fn contains(&self, key: &str) -> bool {
        self.specs.contains_key(key)
    }

    /// All path keys, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.specs.keys().map(String::as_str)
    }

    /// Top-level entries (no parent), sorted by key.
    pub fn top_level(&self) -> impl Iterator<Item = &CommandSpec> {
        self.specs.values().filter(|spec| spec.parent.is_none())
    }

    /// Direct children of a group key, sorted by key.
    pub fn children_of<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a CommandSpec> {
        self.specs
            .values()
            .filter(move |spec| spec.parent.as_deref() == Some(key))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

/// Description fallback: full help, then one-line help, then empty.
fn describe(node: &CommandNode) -> String {
    node.help
        .clone()
        .or_else(|| node.short_help.clone())
        .unwrap_or_default()
}
