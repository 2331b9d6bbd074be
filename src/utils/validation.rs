use std::collections::HashSet;

/// Trimmed, uppercased identifier used as the store key.
pub fn normalize_identifier(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Replaces `<` with the `\u003c` escape and nothing else.
/// Enough to stop a name from opening a tag inside the pages' script blocks;
/// it is not general HTML sanitisation.
pub fn escape_name(raw: &str) -> String {
    raw.replace('<', "\\u003c")
}

/// Escaping for text placed into HTML element bodies and attributes.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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

/// Parses the stored allow-list: identifiers separated by commas and/or whitespace.
pub fn parse_allow_list(raw: &str) -> HashSet<String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(normalize_identifier)
        .collect()
}
