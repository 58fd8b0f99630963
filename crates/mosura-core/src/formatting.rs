//! Formatting helpers for Telegram HTML output.

/// Escape HTML special characters for Telegram HTML parse mode.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Truncate on a char boundary, appending an ellipsis when cut.
pub fn truncate_text(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut out = s.chars().take(max_chars).collect::<String>();
    out.push('…');
    out
}

/// Clean an AniList description for display: `<br>` becomes a newline, other
/// markup tags are stripped, common entities are unescaped, and the result is
/// truncated to `max_chars`.
pub fn clean_description(raw: &str, max_chars: usize) -> String {
    let mut text = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(open) = rest.find('<') {
        text.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('>') {
            Some(close) => {
                let tag = after[..close].trim().to_ascii_lowercase();
                if tag == "br" || tag == "br/" || tag == "br /" {
                    text.push('\n');
                }
                rest = &after[close + 1..];
            }
            None => {
                // Unterminated tag; keep the raw remainder.
                text.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    text.push_str(rest);

    let text = text
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#039;", "'");

    truncate_text(text.trim(), max_chars)
}
