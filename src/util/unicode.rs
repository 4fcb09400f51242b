use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width in terminal cells.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate a string to fit within `max_cells` terminal cells, appending `…` if truncated.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if max_cells == 0 {
        return String::new();
    }
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells <= 1 {
        return "\u{2026}".to_string();
    }
    let budget = max_cells - 1; // reserve 1 cell for '…'
    let mut width = 0;
    let mut result = String::new();
    for grapheme in s.graphemes(true) {
        let gw = display_width(grapheme);
        if width + gw > budget {
            break;
        }
        width += gw;
        result.push_str(grapheme);
    }
    result.push('\u{2026}');
    result
}

/// Center `s` in a field of `width` cells, padding with spaces on both sides.
pub fn center_to_width(s: &str, width: usize) -> String {
    let s = truncate_to_width(s, width);
    let sw = display_width(&s);
    let left = (width - sw) / 2;
    let right = width - sw - left;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(right))
}

/// Next grapheme boundary after `byte_offset`. Returns None if at end.
pub fn next_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    if byte_offset >= s.len() {
        return None;
    }
    if let Some((i, _)) = s[byte_offset..].grapheme_indices(true).nth(1) {
        return Some(byte_offset + i);
    }
    Some(s.len())
}

/// Previous grapheme boundary before `byte_offset`. Returns None if at start.
pub fn prev_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    if byte_offset == 0 {
        return None;
    }
    s[..byte_offset]
        .grapheme_indices(true)
        .last()
        .map(|(i, _)| i)
}

/// Convert byte offset to display column (terminal cells).
pub fn byte_offset_to_display_col(s: &str, byte_offset: usize) -> usize {
    let clamped = byte_offset.min(s.len());
    display_width(&s[..clamped])
}

/// One frame of a right-to-left scrolling strip `width` cells wide.
///
/// At `offset` 0 the text sits just past the right edge; it enters from the
/// right and leaves on the left, then the cycle repeats. Wide graphemes that
/// would be cut by an edge are replaced with spaces so the strip is always
/// exactly `width` cells.
pub fn marquee_frame(text: &str, width: usize, offset: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let text_width = display_width(text);
    let cycle = width + text_width;
    let start = width as i64 - (offset % cycle.max(1)) as i64;

    let mut out = String::new();
    let mut filled = 0usize;
    let mut col = start;
    for grapheme in text.graphemes(true) {
        let gw = display_width(grapheme) as i64;
        if col >= 0 && col + gw <= width as i64 {
            let pad = col as usize - filled;
            out.push_str(&" ".repeat(pad));
            out.push_str(grapheme);
            filled = (col + gw) as usize;
        }
        col += gw;
    }
    out.push_str(&" ".repeat(width - filled));
    out
}
