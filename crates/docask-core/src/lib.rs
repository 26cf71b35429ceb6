//! Controller logic for the docask web client.
//!
//! Everything the client decides — when to issue a request, whether a
//! response is stale, how failures normalize, what a passage looks like
//! highlighted — lives here, with no browser or network dependency. The
//! wasm crate (`apps/docask-web/wasm`) is the IO shell that drives these
//! state machines against fetch, timers, and the DOM.

pub mod busy;
pub mod documents;
pub mod highlight;
pub mod outcome;
pub mod suggest;

pub use busy::BusyLatch;
pub use documents::{plan_delete, DocumentList, PendingDelete};
pub use highlight::{escape_html, highlight_passage};
pub use outcome::{parse_success, ApiFailure, ApiResult};
pub use suggest::{InputDirective, SuggestFeed, SuggestRequest, DEBOUNCE_MS, MIN_QUERY_LEN};
