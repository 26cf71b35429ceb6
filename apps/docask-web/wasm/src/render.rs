//! Markup builders and small DOM helpers.
//!
//! The HTML builders are plain string functions so the rendered markup is
//! testable off-browser; only the helpers at the bottom touch web-sys.

use docask_core::{escape_html, highlight_passage};
use shared_types::{DocumentSummary, SearchResponse, UploadResponse};
use web_sys::{FileList, HtmlButtonElement, HtmlElement};

const NO_FILE_CHOSEN: &str = "No file chosen";

/// Upload result panel: message plus one statistics block per document.
pub fn upload_results_html(response: &UploadResponse) -> String {
    let mut out = String::from("<h3>Upload Results</h3>");
    out.push_str(&format!("<p>{}</p>", escape_html(&response.message)));

    for doc in &response.documents {
        out.push_str("<div class=\"document-stats\">");
        out.push_str(&format!("<h4>{}</h4>", escape_html(&doc.filename)));
        out.push_str("<ul>");
        out.push_str(&format!("<li>Number of pages: {}</li>", doc.num_pages));
        out.push_str(&format!(
            "<li>Number of chunks: {}</li>",
            doc.stats.num_chunks
        ));
        out.push_str(&format!("<li>Total words: {}</li>", doc.stats.total_words));
        out.push_str(&format!(
            "<li>Total characters: {}</li>",
            doc.stats.total_characters
        ));
        out.push_str(&format!(
            "<li>Average chunk size: {} characters</li>",
            doc.stats.avg_chunk_size
        ));
        out.push_str("</ul></div>");
    }
    out
}

/// Search result panel: the answer followed by context passages in the
/// order received, each labeled with its 1-based position and highlighted.
///
/// The answer is an HTML fragment produced by the backend and is inserted
/// as markup; the passages are plain text and go through escaping.
pub fn search_results_html(response: &SearchResponse, query: &str) -> String {
    let mut out = String::from("<h3>Search Results</h3>");
    out.push_str(&format!("<div class=\"answer\">{}</div>", response.answer));
    out.push_str("<h4>Context:</h4>");

    for (index, passage) in response.context.iter().enumerate() {
        out.push_str("<div class=\"context-chunk\">");
        out.push_str(&format!("<h5>Context {}</h5>", index + 1));
        out.push_str(&format!("<pre>{}</pre>", highlight_passage(passage, query)));
        out.push_str("</div>");
    }
    out
}

/// One-line label for a document row.
pub fn document_row_label(doc: &DocumentSummary) -> String {
    format!(
        "{} ({} pages, {} chunks)",
        doc.filename, doc.num_pages, doc.stats.num_chunks
    )
}

/// Label for the file input, listing the selected names.
pub fn file_names_label(files: Option<&FileList>) -> String {
    let mut names = Vec::new();
    if let Some(files) = files {
        for index in 0..files.length() {
            if let Some(file) = files.get(index) {
                names.push(file.name());
            }
        }
    }
    if names.is_empty() {
        NO_FILE_CHOSEN.to_string()
    } else {
        names.join(", ")
    }
}

/// Toggle a control's busy state: disabled plus a `busy` class. Idempotent,
/// no other side effects.
pub fn set_busy(button: &HtmlButtonElement, busy: bool) {
    button.set_disabled(busy);
    let classes = button.class_list();
    let _ = if busy {
        classes.add_1("busy")
    } else {
        classes.remove_1("busy")
    };
}

/// Blocking error notification.
pub fn show_error(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

/// Blocking yes/no prompt; anything but an explicit yes counts as no.
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

pub fn clear(element: &HtmlElement) {
    element.set_inner_html("");
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_types::DocumentStats;

    fn sample_doc() -> DocumentSummary {
        DocumentSummary {
            id: "d1".to_string(),
            filename: "a.pdf".to_string(),
            num_pages: 3,
            stats: DocumentStats {
                num_chunks: 5,
                total_words: 120,
                total_characters: 800,
                avg_chunk_size: 160.0,
            },
        }
    }

    #[test]
    fn upload_panel_renders_all_five_statistics() {
        let response = UploadResponse {
            message: "ok".to_string(),
            documents: vec![sample_doc()],
        };

        let html = upload_results_html(&response);
        assert!(html.contains("<p>ok</p>"));
        assert!(html.contains("a.pdf"));
        assert!(html.contains("Number of pages: 3"));
        assert!(html.contains("Number of chunks: 5"));
        assert!(html.contains("Total words: 120"));
        assert!(html.contains("Total characters: 800"));
        assert!(html.contains("Average chunk size: 160 characters"));
    }

    #[test]
    fn upload_panel_renders_one_block_per_document() {
        let mut second = sample_doc();
        second.id = "d2".to_string();
        second.filename = "b.pdf".to_string();
        let response = UploadResponse {
            message: "2 files processed".to_string(),
            documents: vec![sample_doc(), second],
        };

        let html = upload_results_html(&response);
        assert_eq!(html.matches("document-stats").count(), 2);
        assert!(html.contains("b.pdf"));
    }

    #[test]
    fn upload_message_is_escaped() {
        let response = UploadResponse {
            message: "<script>alert(1)</script>".to_string(),
            documents: vec![],
        };
        let html = upload_results_html(&response);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn search_panel_labels_context_in_order() {
        let response = SearchResponse {
            answer: "<p>42</p>".to_string(),
            context: vec!["first passage".to_string(), "second passage".to_string()],
        };

        let html = search_results_html(&response, "passage");
        let first = html.find("Context 1").unwrap();
        let second = html.find("Context 2").unwrap();
        assert!(first < second);
        assert!(html.contains("<div class=\"answer\"><p>42</p></div>"));
    }

    #[test]
    fn search_panel_highlights_the_query_in_passages() {
        let response = SearchResponse {
            answer: String::new(),
            context: vec!["The cat sat".to_string()],
        };

        let html = search_results_html(&response, "CAT");
        assert!(html.contains("The <mark>cat</mark> sat"));
    }

    #[test]
    fn document_row_label_shows_name_and_counts() {
        assert_eq!(document_row_label(&sample_doc()), "a.pdf (3 pages, 5 chunks)");
    }
}
