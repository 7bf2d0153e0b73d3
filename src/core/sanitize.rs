// src/core/sanitize.rs

/// Text content as the site renders it, minus surrounding whitespace.
pub fn clean_text<S: AsRef<str>>(s: S) -> String {
    s.as_ref().trim().to_string()
}

/// Remove every occurrence of `phrase`, then trim.
/// "Runs from 12 May 2024" → "12 May 2024"
pub fn strip_phrase(s: &str, phrase: &str) -> String {
    if phrase.is_empty() {
        return clean_text(s);
    }
    clean_text(s.replace(phrase, ""))
}

/// Collapse internal whitespace runs to one space (for log lines, not data).
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}
