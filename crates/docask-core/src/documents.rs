//! Document list store and deletion gate.
//!
//! The list has a single writer: it is replaced wholesale on every
//! successful fetch of `GET /documents` and is never patched in place, so
//! readers always see a consistent snapshot. Deletion is never optimistic;
//! a row disappears only after the server confirmed the delete and a fresh
//! list was fetched.

use shared_types::DocumentSummary;

/// Client-held snapshot of the backend's document set.
#[derive(Debug, Default)]
pub struct DocumentList {
    docs: Vec<DocumentSummary>,
}

impl DocumentList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole set with a freshly fetched one.
    pub fn replace(&mut self, docs: Vec<DocumentSummary>) {
        self.docs = docs;
    }

    pub fn docs(&self) -> &[DocumentSummary] {
        &self.docs
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.docs.iter().any(|d| d.id == id)
    }
}

/// A deletion the shell should issue against `DELETE /documents/{id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: String,
}

/// Deletion gate: a DELETE is planned only when the user confirmed the
/// blocking prompt. Declining issues nothing and leaves the list untouched.
pub fn plan_delete(id: &str, confirmed: bool) -> Option<PendingDelete> {
    if !confirmed {
        return None;
    }
    Some(PendingDelete { id: id.to_string() })
}
