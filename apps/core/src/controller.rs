use std::fmt::{Display, Formatter};

use crate::cursor::{MoveDirection, SelectionCursor};
use crate::logging;
use crate::model::{CatalogEntry, RankedResult};
use crate::ranker::{self, RankOptions};
use crate::weights::UsageWeights;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokeError {
    message: String,
}

impl InvokeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for InvokeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for InvokeError {}

/// The host-side collaborator that actually activates a committed entry.
pub trait Invoker {
    fn invoke(&mut self, path: &str) -> Result<(), InvokeError>;
}

/// Outcome of a commit. The invoke error, if any, has already been logged;
/// it is surfaced so the embedding UI can show it. The weight increment is
/// best-effort and is not rolled back on a failed invoke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub entry_path: String,
    pub invoke_error: Option<InvokeError>,
}

/// Orchestrates ranking and selection for one launcher session. Owns the
/// flattened catalog, the usage weights, the current result list, and the
/// cursor riding on it. All operations are synchronous; each query change
/// supersedes the previous result list wholesale.
pub struct LauncherController {
    catalog: Vec<CatalogEntry>,
    weights: UsageWeights,
    options: RankOptions,
    query: String,
    results: Vec<RankedResult>,
    cursor: SelectionCursor,
}

impl LauncherController {
    pub fn new(catalog: Vec<CatalogEntry>, weights: UsageWeights, options: RankOptions) -> Self {
        let mut controller = Self {
            catalog,
            weights,
            options,
            query: String::new(),
            results: Vec::new(),
            cursor: SelectionCursor::new(),
        };
        controller.rerank();
        controller
    }

    /// Replaces the live query, re-ranks, and resets the cursor to the top.
    pub fn set_query(&mut self, text: &str) -> &[RankedResult] {
        self.query = text.to_string();
        self.rerank();
        &self.results
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[RankedResult] {
        &self.results
    }

    pub fn move_cursor(&mut self, direction: MoveDirection) {
        self.cursor.apply(direction);
    }

    pub fn cursor_position(&self) -> Option<usize> {
        self.cursor.position()
    }

    /// The entry a commit would choose right now: the cursor's entry, or
    /// the top result when nothing is explicitly selected.
    pub fn selected_entry(&self) -> Option<&CatalogEntry> {
        if self.results.is_empty() {
            return None;
        }
        let index = self.cursor.position().unwrap_or(0);
        self.results.get(index).map(|result| &result.entry)
    }

    /// Commits the current selection: increments its usage weight, hands
    /// the entry path to the invoker, and re-arms the launcher (query and
    /// cursor cleared). With no results this is a no-op and the invoker is
    /// never called.
    pub fn commit(&mut self, invoker: &mut dyn Invoker) -> Option<Commit> {
        let entry_path = self.selected_entry()?.path().to_string();

        self.weights.increment(&entry_path);

        let invoke_error = match invoker.invoke(&entry_path) {
            Ok(()) => None,
            Err(error) => {
                logging::error(&format!("invoke failed for {entry_path}: {error}"));
                Some(error)
            }
        };

        self.rearm();
        Some(Commit {
            entry_path,
            invoke_error,
        })
    }

    /// Closes the session without committing; weights are untouched.
    pub fn cancel(&mut self) {
        self.rearm();
    }

    pub fn weights(&self) -> &UsageWeights {
        &self.weights
    }

    fn rearm(&mut self) {
        self.query.clear();
        self.rerank();
    }

    fn rerank(&mut self) {
        self.results = ranker::rank(&self.catalog, &self.query, &self.weights, &self.options);
        self.cursor.reset(self.results.len());
    }
}
