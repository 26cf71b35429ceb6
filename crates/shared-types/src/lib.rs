//! Wire contract types shared between the docask web client and its backend.
//!
//! The backend exposes five calls (upload, search, suggestions, list
//! documents, delete document); every request and response shape crossing
//! that boundary lives here so the client crates agree on field names.

pub mod types;

pub use types::{
    DocumentStats, DocumentSummary, ErrorBody, SearchResponse, SuggestResponse, UploadResponse,
};
