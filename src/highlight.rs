//! Search-term highlighting for rendered cells.

use regex::RegexBuilder;

/// Terms shorter than this (in characters) are never highlighted.
pub const MIN_HIGHLIGHT_LEN: usize = 2;

pub const MARK_OPEN: &str = "<mark>";
pub const MARK_CLOSE: &str = "</mark>";

/// Escape text for embedding in HTML.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn is_highlightable(text: &str, term: &str) -> bool {
    !text.is_empty() && term.chars().count() >= MIN_HIGHLIGHT_LEN
}

/// Like [`highlight`], but the result is always HTML: text that gets no markup is
/// still escaped.
pub fn highlight_html(text: &str, term: &str) -> String {
    if is_highlightable(text, term) {
        highlight(text, term)
    } else {
        escape_html(text)
    }
}

/// Wrap every case-insensitive occurrence of `term` in `<mark>` tags.
///
/// Returns `text` unchanged when either input is empty or the term is shorter than
/// [`MIN_HIGHLIGHT_LEN`]. Otherwise the whole output is HTML-escaped; matching runs on
/// the original text so a term can never land inside an entity.
pub fn highlight(text: &str, term: &str) -> String {
    if !is_highlightable(text, term) {
        return text.to_string();
    }

    let pattern = match RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => pattern,
        Err(e) => {
            tracing::debug!("Not highlighting {:?}: {}", term, e);
            return escape_html(text);
        }
    };

    let mut out = String::with_capacity(text.len() + MARK_OPEN.len() + MARK_CLOSE.len());
    let mut last = 0;
    for m in pattern.find_iter(text) {
        out.push_str(&escape_html(&text[last..m.start()]));
        out.push_str(MARK_OPEN);
        out.push_str(&escape_html(m.as_str()));
        out.push_str(MARK_CLOSE);
        last = m.end();
    }
    out.push_str(&escape_html(&text[last..]));
    out
}
