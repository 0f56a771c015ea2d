//! Miscellaneous utilities.

/// Escapes a string for interpolation into HTML text or a double-quoted
/// attribute value.
///
/// Replaces the five characters that can change meaning in either context;
/// everything else passes through unchanged.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}
