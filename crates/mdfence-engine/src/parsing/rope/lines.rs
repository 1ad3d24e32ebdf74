use xi_rope::Rope;

use super::{slice::slice_to_string, span::Span};
use crate::position::Position;

/// A single line in the rope by its byte span.
#[derive(Debug, Clone)]
pub struct LineRef {
    /// Byte span of this line in the rope (includes newline if present).
    pub span: Span,
}

/// Returns an iterator over lines with their byte spans.
///
/// Uses `lines_raw` to preserve newline characters, which is important for
/// accurate span tracking.
pub fn lines_with_spans(rope: &Rope) -> impl Iterator<Item = LineRef> + '_ {
    let mut offset = 0usize;
    rope.lines_raw(..).map(move |line| {
        let start = offset;
        offset += line.len();
        LineRef {
            span: Span { start, end: offset },
        }
    })
}

/// Converts between byte offsets and 1-based line/column positions.
///
/// Columns count Unicode scalar values. A text ending in a newline has a
/// final empty line, so the end-of-text offset always has a position.
#[derive(Debug, Clone)]
pub struct LineIndex {
    rope: Rope,
    /// Raw line spans, newline included.
    lines: Vec<Span>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let rope = Rope::from(text);
        let mut lines: Vec<Span> = lines_with_spans(&rope).map(|lr| lr.span).collect();
        if text.is_empty() || text.ends_with('\n') {
            lines.push(Span {
                start: text.len(),
                end: text.len(),
            });
        }
        Self { rope, lines }
    }

    /// Number of lines, counting a trailing empty line.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total length in bytes.
    pub fn len(&self) -> usize {
        self.rope.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len() == 0
    }

    /// Raw byte span of a 1-based line.
    pub fn line_span(&self, line: usize) -> Option<Span> {
        line.checked_sub(1).and_then(|i| self.lines.get(i)).copied()
    }

    /// Text of a 1-based line without its line terminator (`\n` or `\r\n`).
    pub fn line_text(&self, line: usize) -> Option<String> {
        let span = self.line_span(line)?;
        let mut text = slice_to_string(&self.rope, span);
        if text.ends_with('\n') {
            text.pop();
            if text.ends_with('\r') {
                text.pop();
            }
        }
        Some(text)
    }

    /// Position of a byte offset. Offsets past the end are clamped.
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.len());
        let idx = self
            .lines
            .partition_point(|sp| sp.start <= offset)
            .saturating_sub(1);
        let line = idx + 1;
        let start = self.lines.get(idx).map_or(0, |sp| sp.start);
        let rel = offset - start;
        let column = self
            .line_text(line)
            .map_or(0, |t| t.char_indices().take_while(|(i, _)| *i < rel).count())
            + 1;
        Position::with_offset(line, column, offset)
    }

    /// Byte offset of a position. The column may point one past the last
    /// character of the line; anything further is `None`.
    pub fn offset(&self, position: Position) -> Option<usize> {
        let span = self.line_span(position.line)?;
        let text = self.line_text(position.line)?;
        let col = position.column.checked_sub(1)?;
        let chars = text.chars().count();
        if col == chars {
            return Some(span.start + text.len());
        }
        text.char_indices().nth(col).map(|(i, _)| span.start + i)
    }
}
