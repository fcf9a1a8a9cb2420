//! Grapheme width and visible width helpers.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

pub fn grapheme_width(grapheme: &str) -> usize {
    if grapheme.is_empty() {
        return 0;
    }

    // Wide base character plus combining marks still occupies the base width.
    let mut chars = grapheme.chars();
    let Some(first) = chars.next() else {
        return 0;
    };
    let base = UnicodeWidthChar::width(first).unwrap_or(0);
    if base > 0 {
        return base;
    }
    chars
        .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(0))
        .max()
        .unwrap_or(0)
}

pub fn visible_width(input: &str) -> usize {
    input.graphemes(true).map(grapheme_width).sum()
}
