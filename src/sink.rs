//! # Style Sinks
//!
//! The document is an external collaborator: the engine never touches DOM
//! APIs directly, it talks to a [StyleSink]. A sink stores at most one
//! stylesheet per element id; `upsert` supersedes any stale node with the
//! same id, which is what keeps re-injection idempotent even across a
//! crashed prior session.
//!
//! [MemorySink] is the in-memory implementation used headless and in tests;
//! host embeddings provide a DOM-backed one.

use std::sync::{Arc, RwLock};

use indexmap::IndexMap;

use crate::error::{ThemeError, ThemeResult};

/// Destination for generated CSS, keyed by style-element id.
pub trait StyleSink: Send + Sync {
    /// Create or replace the stylesheet with the given element id.
    fn upsert(&mut self, id: &str, css: &str) -> ThemeResult<()>;

    /// Remove the stylesheet with the given element id, if present.
    fn remove(&mut self, id: &str) -> ThemeResult<()>;

    /// Whether a stylesheet with the given element id is present.
    fn contains(&self, id: &str) -> bool;

    /// Current content of the stylesheet with the given element id.
    fn content(&self, id: &str) -> Option<String>;

    /// Number of live stylesheets.
    fn len(&self) -> usize;

    /// Whether the sink holds no stylesheets.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Shared handle to the sink, cloned into every style generator.
pub type SharedSink = Arc<RwLock<dyn StyleSink>>;

/// Wrap a sink implementation into a [SharedSink].
pub fn shared(sink: impl StyleSink + 'static) -> SharedSink {
    Arc::new(RwLock::new(sink))
}

/// In-memory style sink. Insertion-ordered so diagnostics list nodes in
/// injection order.
#[derive(Debug, Default)]
pub struct MemorySink {
    nodes: IndexMap<String, String>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Element ids of all live stylesheets, in injection order.
    pub fn ids(&self) -> Vec<String> {
        self.nodes.keys().cloned().collect()
    }
}

impl StyleSink for MemorySink {
    fn upsert(&mut self, id: &str, css: &str) -> ThemeResult<()> {
        self.nodes.insert(id.to_string(), css.to_string());
        Ok(())
    }

    fn remove(&mut self, id: &str) -> ThemeResult<()> {
        self.nodes.shift_remove(id);
        Ok(())
    }

    fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    fn content(&self, id: &str) -> Option<String> {
        self.nodes.get(id).cloned()
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }
}

pub(crate) fn write_sink<'a>(
    sink: &'a SharedSink,
    concern: &str,
) -> ThemeResult<std::sync::RwLockWriteGuard<'a, dyn StyleSink + 'static>> {
    sink.write()
        .map_err(move |_| ThemeError::dom_operation(concern, "style sink lock poisoned"))
}
