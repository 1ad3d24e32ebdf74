use crate::parsing::{Node, kinds::BlockQuote, rope::LineIndex};

/// Length of the per-line prefix a fragment carries: the indentation and
/// blockquote markers in front of its opening fence.
///
/// A fence at column 1 has none. Otherwise the stretch of its line before
/// the fence is matched against the longest leading run of whitespace and
/// `>`; a stretch starting with anything else (such as a list marker)
/// yields 0.
pub fn base_indent(lines: &LineIndex, fragment: &Node) -> usize {
    let start = fragment.position.start;
    if start.column <= 1 {
        return 0;
    }
    let Some(line) = lines.line_text(start.line) else {
        return 0;
    };
    let before_fence: String = line.chars().take(start.column - 1).collect();
    BlockQuote::prefix_len(&before_fence)
}
