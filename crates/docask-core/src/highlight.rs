//! Query highlighting for context passages.
//!
//! Passages are plain text from the backend and must be escaped before they
//! are inserted as markup. Matching runs over the raw text and escaping is
//! applied per segment, so entity boundaries never collide with match
//! boundaries (a query like "amp" must not match inside "&amp;").

use regex::RegexBuilder;

/// Escape text for insertion via `innerHTML`.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render one context passage as HTML, wrapping every occurrence of the
/// literal query in `<mark>`. Matching is case-insensitive; the query is
/// escaped so regex metacharacters in it match literally.
pub fn highlight_passage(passage: &str, query: &str) -> String {
    if query.is_empty() {
        return escape_html(passage);
    }

    let pattern = match RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => re,
        Err(_) => return escape_html(passage),
    };

    let mut out = String::with_capacity(passage.len() + 16);
    let mut last = 0;
    for m in pattern.find_iter(passage) {
        out.push_str(&escape_html(&passage[last..m.start()]));
        out.push_str("<mark>");
        out.push_str(&escape_html(m.as_str()));
        out.push_str("</mark>");
        last = m.end();
    }
    out.push_str(&escape_html(&passage[last..]));
    out
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: stripping the inserted <mark> tags yields exactly the
        /// escaped passage, so highlighting never loses or reorders text.
        #[test]
        fn unmarking_restores_the_escaped_passage(
            passage in "[ -~]{0,60}",
            query in "[a-zA-Z0-9]{1,6}",
        ) {
            let highlighted = highlight_passage(&passage, &query);
            let stripped = highlighted.replace("<mark>", "").replace("</mark>", "");
            prop_assert_eq!(stripped, escape_html(&passage));
        }

        /// Property: the number of <mark> spans equals the number of
        /// non-overlapping case-insensitive occurrences of the query.
        #[test]
        fn mark_count_matches_occurrences(
            passage in "[a-z ]{0,60}",
            query in "[a-z]{1,4}",
        ) {
            let highlighted = highlight_passage(&passage, &query);
            let marks = highlighted.matches("<mark>").count();

            let mut expected = 0;
            let lower = passage.to_lowercase();
            let needle = query.to_lowercase();
            let mut from = 0;
            while let Some(pos) = lower[from..].find(&needle) {
                expected += 1;
                from += pos + needle.len();
            }
            prop_assert_eq!(marks, expected);
        }
    }
}
