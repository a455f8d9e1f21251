//! shell::history
//!
//! Bounded, persisted command history and the recall cursor.
//!
//! # Design
//!
//! History is an ordered list of previously submitted lines, newest last,
//! capped at a configured capacity. Loading is fail-soft: a missing or
//! unreadable file is an empty history, never an error the user sees.
//! Saving is a best-effort atomic full rewrite (temp file, then rename) so
//! two exit triggers racing each other cannot corrupt the file.
//!
//! Recall state lives in [`NavigationCursor`], outside the store itself:
//! browsing never mutates history, and an in-progress line of input is
//! captured before the first step backward so it can be restored.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Default history capacity when not configured.
pub const DEFAULT_MAX_HISTORY: usize = 100;

/// Errors from history persistence.
///
/// Only `save` surfaces errors; loading treats every failure as an empty
/// history.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("failed to write history file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Bounded, order-preserving list of submitted command lines.
#[derive(Debug)]
pub struct HistoryStore {
    /// File the history is persisted to.
    path: PathBuf,
    /// Capacity bound; oldest entries drop first.
    max_entries: usize,
    /// Entries, oldest first.
    entries: Vec<String>,
}

impl HistoryStore {
    /// Create an empty store that will persist to `path`.
    pub fn new(path: impl Into<PathBuf>, max_entries: usize) -> Self {
        Self {
            path: path.into(),
            max_entries,
            entries: Vec::new(),
        }
    }

    /// Load persisted history from `path`.
    ///
    /// Blank lines are stripped and only the newest `max_entries` lines are
    /// kept. A missing or unreadable file yields an empty history.
    pub fn load(path: impl Into<PathBuf>, max_entries: usize) -> Self {
        let mut store = Self::new(path, max_entries);

        if let Ok(contents) = fs::read_to_string(&store.path) {
            let lines: Vec<String> = contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect();
            let skip = lines.len().saturating_sub(max_entries);
            store.entries = lines[skip..].to_vec();
        }

        store
    }

    /// Append a line.
    ///
    /// Empty lines and lines equal to the current last entry are ignored.
    /// Exceeding the capacity drops the oldest entries.
    pub fn add(&mut self, line: &str) {
        if line.is_empty() || self.entries.last().map(String::as_str) == Some(line) {
            return;
        }

        self.entries.push(line.to_string());
        if self.entries.len() > self.max_entries {
            let excess = self.entries.len() - self.max_entries;
            self.entries.drain(..excess);
        }
    }

    /// Write the newest `max_entries` lines to disk, one per line.
    ///
    /// Creates missing parent directories and replaces the file atomically,
    /// so a save racing another save cannot leave a partial file behind.
    pub fn save(&self) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| HistoryError::WriteError {
                    path: self.path.clone(),
                    source: e,
                })?;
            }
        }

        let mut contents = String::new();
        let skip = self.entries.len().saturating_sub(self.max_entries);
        for line in &self.entries[skip..] {
            contents.push_str(line);
            contents.push('\n');
        }

        let temp_path = self.path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path).map_err(|e| HistoryError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        file.write_all(contents.as_bytes())
            .map_err(|e| HistoryError::WriteError {
                path: temp_path.clone(),
                source: e,
            })?;

        file.sync_all().map_err(|e| HistoryError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, &self.path).map_err(|e| HistoryError::WriteError {
            path: self.path.clone(),
            source: e,
        })?;

        Ok(())
    }

    /// Entry at `index`, oldest first.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Path the history persists to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Ephemeral recall state for one input surface.
///
/// `index` is `None` while not browsing. Stepping backward for the first
/// time captures the current unsent draft; stepping forward past the
/// newest entry hands the draft back and leaves browsing.
#[derive(Debug, Default)]
pub struct NavigationCursor {
    /// Position in the history while browsing.
    index: Option<usize>,
    /// Unsent input captured when browsing began.
    draft: String,
}

impl NavigationCursor {
    /// Cursor in the not-browsing state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Step backward through history.
    ///
    /// `current` is whatever the input surface holds right now; it becomes
    /// the draft when browsing begins. Returns the entry to load, or `None`
    /// when there is no history to browse. At the oldest entry the cursor
    /// stays put and returns that entry again.
    pub fn previous(&mut self, history: &HistoryStore, current: &str) -> Option<String> {
        if history.is_empty() {
            return None;
        }

        match self.index {
            None => {
                self.draft = current.to_string();
                self.index = Some(history.len() - 1);
            }
            Some(index) if index > 0 => {
                self.index = Some(index - 1);
            }
            Some(_) => {}
        }

        self.index
            .and_then(|index| history.get(index))
            .map(String::from)
    }

    /// Step forward through history.
    ///
    /// Returns the entry to load, the restored draft when moving past the
    /// newest entry (which also ends browsing), or `None` when not
    /// browsing at all.
    pub fn next(&mut self, history: &HistoryStore) -> Option<String> {
        let index = self.index?;

        if index + 1 < history.len() {
            self.index = Some(index + 1);
            history.get(index + 1).map(String::from)
        } else {
            self.index = None;
            Some(std::mem::take(&mut self.draft))
        }
    }

    /// Leave browsing and forget the captured draft.
    ///
    /// Called when a line is submitted or a fresh edit begins.
    pub fn reset(&mut self) {
        self.index = None;
        self.draft.clear();
    }

    /// Position in the history while browsing, `None` otherwise.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Whether the surface is currently showing a recalled entry.
    pub fn browsing(&self) -> bool {
        self.index.is_some()
    }
}
