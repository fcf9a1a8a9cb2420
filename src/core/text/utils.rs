//! Utility helpers.

use unicode_segmentation::UnicodeSegmentation;

use super::width::{grapheme_width, visible_width};

pub fn grapheme_segments(text: &str) -> unicode_segmentation::Graphemes<'_> {
    UnicodeSegmentation::graphemes(text, true)
}

/// Terminal tab stop interval.
pub const TAB_STOP: usize = 8;

/// Replace each tab with spaces up to the next tab stop. `start_column` is
/// where `text` begins on the row.
pub fn expand_tabs(text: &str, start_column: usize) -> String {
    if !text.contains('\t') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len() + TAB_STOP);
    let mut column = start_column;
    for grapheme in grapheme_segments(text) {
        if grapheme == "\t" {
            let pad = TAB_STOP - column % TAB_STOP;
            out.extend(std::iter::repeat(' ').take(pad));
            column += pad;
        } else {
            out.push_str(grapheme);
            column += grapheme_width(grapheme);
        }
    }
    out
}

/// Cut `text` so it fits in `max_width` columns, appending `ellipsis` when something was dropped.
pub fn truncate_to_width(text: &str, max_width: usize, ellipsis: &str) -> String {
    if max_width == 0 {
        return String::new();
    }

    if visible_width(text) <= max_width {
        return text.to_string();
    }

    let ellipsis_width = visible_width(ellipsis);
    let target_width = max_width.saturating_sub(ellipsis_width);
    if target_width == 0 {
        return ellipsis.chars().take(max_width).collect();
    }

    let mut truncated = String::with_capacity(text.len().min(max_width * 4) + ellipsis.len());
    let mut current_width = 0;
    for grapheme in grapheme_segments(text) {
        let width = grapheme_width(grapheme);
        if current_width + width > target_width {
            break;
        }
        truncated.push_str(grapheme);
        current_width += width;
    }
    truncated.push_str(ellipsis);
    truncated
}
