//! Width helpers for single-line bars.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

const ELLIPSIS: &str = "...";

/// Display width of `input`, skipping CSI escape sequences.
pub fn visible_width(input: &str) -> usize {
    let mut width = 0;
    let mut in_escape = false;
    let mut saw_bracket = false;
    for grapheme in input.graphemes(true) {
        if in_escape {
            if !saw_bracket {
                saw_bracket = grapheme == "[";
                in_escape = saw_bracket;
                continue;
            }
            if grapheme.chars().all(|ch| ('@'..='~').contains(&ch)) {
                in_escape = false;
            }
            continue;
        }
        if grapheme == "\x1b" {
            in_escape = true;
            saw_bracket = false;
            continue;
        }
        width += UnicodeWidthStr::width(grapheme);
    }
    width
}

/// Truncate plain text to `max_width` columns, appending an ellipsis when cut.
///
/// With `pad`, the result is right-padded with spaces to exactly `max_width`.
pub fn truncate_to_width(text: &str, max_width: usize, pad: bool) -> String {
    if max_width == 0 {
        return String::new();
    }

    let text_width = visible_width(text);
    let mut out = if text_width <= max_width {
        text.to_string()
    } else {
        let ellipsis = if max_width > ELLIPSIS.len() { ELLIPSIS } else { "" };
        let budget = max_width - ellipsis.len();
        let mut cut = String::new();
        let mut used = 0;
        for grapheme in text.graphemes(true) {
            let w = UnicodeWidthStr::width(grapheme);
            if used + w > budget {
                break;
            }
            cut.push_str(grapheme);
            used += w;
        }
        cut.push_str(ellipsis);
        cut
    };

    if pad {
        let used = visible_width(&out);
        out.push_str(&" ".repeat(max_width.saturating_sub(used)));
    }
    out
}
