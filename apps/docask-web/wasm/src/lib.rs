//! WASM controller for the docask document question-answering UI.
//!
//! This crate follows the pattern of keeping state management in Rust:
//! the [`QaApp`] session owns the document list, the busy latches, the
//! debounced suggestion feed, and the backend client. JavaScript only
//! forwards DOM events and passes the elements the controller renders into.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { QaApp } from './pkg/docask_wasm.js';
//!
//! await init();
//!
//! const app = new QaApp(
//!     '',                   // API base, empty for same-origin
//!     results, suggestions, documentList, fileLabel,
//!     uploadButton, searchButton, searchInput,
//! );
//! await app.start();
//!
//! uploadForm.addEventListener('submit', (e) => {
//!     e.preventDefault();
//!     app.upload(fileInput.files);
//! });
//! fileInput.addEventListener('change', () => app.filesSelected(fileInput.files));
//! searchForm.addEventListener('submit', (e) => {
//!     e.preventDefault();
//!     app.search();
//! });
//! searchInput.addEventListener('input', () => app.searchInputChanged());
//! ```

pub mod api;
pub mod app;
pub mod render;

use wasm_bindgen::prelude::*;

// Re-export main types for JavaScript
pub use app::QaApp;

/// Initialize the WASM module
/// Called automatically by wasm-bindgen
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Get the library version
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
