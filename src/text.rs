//! Display-width helpers so titles truncate by terminal columns, not bytes.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Single-column ellipsis appended to truncated labels.
pub const ELLIPSIS: char = '…';

#[must_use]
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Keep the longest prefix of `text` that fits in `max_width` columns.
#[must_use]
pub fn truncate_display(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > max_width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}

/// `count` spaces.
#[must_use]
pub fn spaces(count: usize) -> String {
    " ".repeat(count)
}

/// Last path component of a process name, accepting `/` and `\` separators.
#[must_use]
pub fn base_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches(['/', '\\']);
    trimmed.rsplit(['/', '\\']).next().unwrap_or(trimmed)
}
