//! The page controller.
//!
//! Holds all client state in Rust and orchestrates the asynchronous flows:
//! upload, search, debounced suggestions, and document-list maintenance.
//! JavaScript only forwards DOM events; every element the controller
//! touches is injected at construction, nothing is looked up from ambient
//! globals.
//!
//! Each orchestrated flow follows the same shape: acquire the control's
//! busy latch, call the backend, render on Ok or alert on Fail, release
//! the latch on every exit path. Re-entrant triggers while a latch is held
//! are ignored, so a rapid double-submit never issues overlapping requests.

use std::cell::RefCell;
use std::rc::Rc;

use docask_core::{plan_delete, BusyLatch, DocumentList, InputDirective, SuggestFeed};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{console, FileList, HtmlButtonElement, HtmlElement, HtmlInputElement};

use crate::api::{self, ApiClient};
use crate::render;

/// DOM handles the controller renders into, injected at construction.
struct Elements {
    results: HtmlElement,
    suggestions: HtmlElement,
    document_list: HtmlElement,
    file_label: HtmlElement,
    upload_button: HtmlButtonElement,
    search_button: HtmlButtonElement,
    search_input: HtmlInputElement,
}

/// The single owned debounce timer. Rearming replaces the handle after
/// clearing the old timeout, so the previous callback can no longer fire.
struct DebounceTimer {
    handle: i32,
    _closure: Closure<dyn FnMut()>,
}

struct Inner {
    api: ApiClient,
    els: Elements,
    feed: RefCell<SuggestFeed>,
    upload_busy: RefCell<BusyLatch>,
    search_busy: RefCell<BusyLatch>,
    documents: RefCell<DocumentList>,
    timer: RefCell<Option<DebounceTimer>>,
    // Closures backing rendered suggestion items and document rows; each
    // render replaces the previous generation.
    suggestion_handlers: RefCell<Vec<Closure<dyn FnMut()>>>,
    row_handlers: RefCell<Vec<Closure<dyn FnMut()>>>,
}

/// The docask page controller.
#[wasm_bindgen]
pub struct QaApp {
    inner: Rc<Inner>,
}

#[wasm_bindgen]
impl QaApp {
    /// Build the controller over its DOM dependencies. `api_base` is the
    /// backend origin, empty for same-origin.
    #[wasm_bindgen(constructor)]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        api_base: &str,
        results: HtmlElement,
        suggestions: HtmlElement,
        document_list: HtmlElement,
        file_label: HtmlElement,
        upload_button: HtmlButtonElement,
        search_button: HtmlButtonElement,
        search_input: HtmlInputElement,
    ) -> QaApp {
        QaApp {
            inner: Rc::new(Inner {
                api: ApiClient::new(api_base),
                els: Elements {
                    results,
                    suggestions,
                    document_list,
                    file_label,
                    upload_button,
                    search_button,
                    search_input,
                },
                feed: RefCell::new(SuggestFeed::new()),
                upload_busy: RefCell::new(BusyLatch::new()),
                search_busy: RefCell::new(BusyLatch::new()),
                documents: RefCell::new(DocumentList::new()),
                timer: RefCell::new(None),
                suggestion_handlers: RefCell::new(Vec::new()),
                row_handlers: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Initial render: fetch and show the current document set.
    pub async fn start(&self) {
        console::log_1(&"docask controller ready".into());
        Inner::refresh_documents(Rc::clone(&self.inner)).await;
    }

    /// `change` handler for the file input: show the selected names.
    #[wasm_bindgen(js_name = filesSelected)]
    pub fn files_selected(&self, files: Option<FileList>) {
        let label = render::file_names_label(files.as_ref());
        self.inner.els.file_label.set_text_content(Some(&label));
    }

    /// Submit handler for the upload form.
    pub async fn upload(&self, files: Option<FileList>) {
        Inner::upload(Rc::clone(&self.inner), files).await;
    }

    /// Submit handler for the search form. Picking a suggestion lands here
    /// too, so there is exactly one search path.
    pub async fn search(&self) {
        Inner::search(Rc::clone(&self.inner)).await;
    }

    /// `input` handler for the search field: drives the debounced feed.
    #[wasm_bindgen(js_name = searchInputChanged)]
    pub fn search_input_changed(&self) {
        Inner::input_changed(&self.inner);
    }

    /// Re-fetch the document list and re-render it wholesale.
    #[wasm_bindgen(js_name = refreshDocuments)]
    pub async fn refresh_documents(&self) {
        Inner::refresh_documents(Rc::clone(&self.inner)).await;
    }
}

impl Inner {
    async fn upload(inner: Rc<Inner>, files: Option<FileList>) {
        let Some(files) = files.filter(|f| f.length() > 0) else {
            render::show_error("Please choose a file to upload.");
            return;
        };
        if !inner.upload_busy.borrow_mut().try_acquire() {
            return;
        }
        render::set_busy(&inner.els.upload_button, true);

        let result = match api::multipart_from(&files) {
            Ok(form) => inner.api.upload(&form).await,
            Err(err) => Err(err),
        };

        render::set_busy(&inner.els.upload_button, false);
        inner.upload_busy.borrow_mut().release();

        match result {
            Ok(response) => {
                inner
                    .els
                    .results
                    .set_inner_html(&render::upload_results_html(&response));
                Self::refresh_documents(Rc::clone(&inner)).await;
            }
            Err(err) => render::show_error(&err.message),
        }
    }

    async fn search(inner: Rc<Inner>) {
        let query = inner.els.search_input.value().trim().to_string();
        if query.is_empty() {
            render::show_error("Please enter a query.");
            return;
        }

        Self::cancel_timer(&inner);
        Self::clear_suggestions(&inner);

        if !inner.search_busy.borrow_mut().try_acquire() {
            return;
        }
        render::set_busy(&inner.els.search_button, true);

        let result = inner.api.search(&query).await;

        render::set_busy(&inner.els.search_button, false);
        inner.search_busy.borrow_mut().release();

        match result {
            Ok(response) => inner
                .els
                .results
                .set_inner_html(&render::search_results_html(&response, &query)),
            Err(err) => render::show_error(&err.message),
        }
    }

    fn input_changed(inner: &Rc<Inner>) {
        let value = inner.els.search_input.value();
        let directive = inner.feed.borrow_mut().on_input(&value);
        match directive {
            InputDirective::Clear => {
                Self::cancel_timer(inner);
                Self::clear_suggestions(inner);
            }
            InputDirective::Schedule { token, delay_ms } => {
                Self::arm_timer(inner, token, delay_ms);
            }
        }
    }

    fn arm_timer(inner: &Rc<Inner>, token: u64, delay_ms: u32) {
        Self::cancel_timer(inner);
        let Some(window) = web_sys::window() else {
            return;
        };

        let for_timer = Rc::clone(inner);
        let closure = Closure::wrap(Box::new(move || {
            Self::timer_elapsed(&for_timer, token);
        }) as Box<dyn FnMut()>);

        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            delay_ms as i32,
        ) {
            Ok(handle) => {
                *inner.timer.borrow_mut() = Some(DebounceTimer {
                    handle,
                    _closure: closure,
                });
            }
            Err(err) => console::error_1(&err),
        }
    }

    fn cancel_timer(inner: &Inner) {
        if let Some(timer) = inner.timer.borrow_mut().take() {
            if let Some(window) = web_sys::window() {
                window.clear_timeout_with_handle(timer.handle);
            }
        }
    }

    // Runs inside the timer's own closure, so the spent `DebounceTimer` is
    // left in place; the next arm or cancel disposes of it once it is no
    // longer executing.
    fn timer_elapsed(inner: &Rc<Inner>, token: u64) {
        let Some(request) = inner.feed.borrow_mut().timer_fired(token) else {
            return;
        };

        let for_fetch = Rc::clone(inner);
        spawn_local(async move {
            match for_fetch.api.suggestions(&request.query).await {
                Ok(items) => {
                    let fresh = for_fetch.feed.borrow().should_render(&request);
                    if fresh {
                        Self::render_suggestions(&for_fetch, &items);
                    }
                }
                // Autocomplete is non-critical; log, never interrupt typing.
                Err(err) => {
                    console::error_1(&format!("suggestions failed: {}", err.message).into())
                }
            }
        });
    }

    fn clear_suggestions(inner: &Inner) {
        render::clear(&inner.els.suggestions);
        inner.suggestion_handlers.borrow_mut().clear();
    }

    fn render_suggestions(inner: &Rc<Inner>, items: &[String]) {
        Self::clear_suggestions(inner);
        let Some(document) = inner.els.suggestions.owner_document() else {
            return;
        };

        let mut handlers = inner.suggestion_handlers.borrow_mut();
        for item in items {
            let Ok(entry) = document.create_element("div") else {
                continue;
            };
            entry.set_class_name("suggestion-item");
            entry.set_text_content(Some(item));

            let for_click = Rc::clone(inner);
            let picked = item.clone();
            let closure = Closure::wrap(Box::new(move || {
                Self::suggestion_picked(&for_click, &picked);
            }) as Box<dyn FnMut()>);
            if entry
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
                .is_ok()
            {
                handlers.push(closure);
            }

            let _ = inner.els.suggestions.append_child(&entry);
        }
    }

    /// A suggestion was clicked: adopt it as the query and submit through
    /// the regular search path. The panel clear happens inside `search`,
    /// after this handler has returned, so the executing closure is not
    /// dropped out from under itself.
    fn suggestion_picked(inner: &Rc<Inner>, value: &str) {
        inner.els.search_input.set_value(value);
        inner.feed.borrow_mut().sync(value);

        let for_search = Rc::clone(inner);
        spawn_local(async move {
            Self::search(for_search).await;
        });
    }

    async fn refresh_documents(inner: Rc<Inner>) {
        match inner.api.list_documents().await {
            Ok(docs) => {
                inner.documents.borrow_mut().replace(docs);
                Self::render_documents(&inner);
            }
            Err(err) => render::show_error(&err.message),
        }
    }

    fn render_documents(inner: &Rc<Inner>) {
        render::clear(&inner.els.document_list);
        inner.row_handlers.borrow_mut().clear();

        let Some(document) = inner.els.document_list.owner_document() else {
            return;
        };
        let documents = inner.documents.borrow();

        if documents.is_empty() {
            let Ok(empty) = document.create_element("p") else {
                return;
            };
            empty.set_class_name("empty-state");
            empty.set_text_content(Some("No documents uploaded yet."));
            let _ = inner.els.document_list.append_child(&empty);
            return;
        }

        let mut handlers = inner.row_handlers.borrow_mut();
        for doc in documents.docs() {
            let Ok(row) = document.create_element("div") else {
                continue;
            };
            row.set_class_name("document-row");

            let Ok(label) = document.create_element("span") else {
                continue;
            };
            label.set_text_content(Some(&render::document_row_label(doc)));
            let _ = row.append_child(&label);

            let Ok(button) = document.create_element("button") else {
                continue;
            };
            button.set_class_name("delete-button");
            button.set_text_content(Some("Delete"));

            let for_click = Rc::clone(inner);
            let id = doc.id.clone();
            let filename = doc.filename.clone();
            let closure = Closure::wrap(Box::new(move || {
                Self::delete_clicked(&for_click, &id, &filename);
            }) as Box<dyn FnMut()>);
            if button
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
                .is_ok()
            {
                handlers.push(closure);
            }

            let _ = row.append_child(&button);
            let _ = inner.els.document_list.append_child(&row);
        }
    }

    /// Delete is never optimistic: the row disappears only after the
    /// backend confirmed the delete and a fresh list was fetched.
    fn delete_clicked(inner: &Rc<Inner>, id: &str, filename: &str) {
        let confirmed = render::confirm(&format!("Delete {}?", filename));
        let Some(pending) = plan_delete(id, confirmed) else {
            return;
        };

        let for_delete = Rc::clone(inner);
        spawn_local(async move {
            match for_delete.api.delete_document(&pending.id).await {
                Ok(()) => Self::refresh_documents(Rc::clone(&for_delete)).await,
                Err(err) => render::show_error(&err.message),
            }
        });
    }
}
