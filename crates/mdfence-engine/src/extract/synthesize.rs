use std::sync::Arc;

use serde::Serialize;

use super::directives::Directive;
use super::indent::base_indent;
use crate::mapping::{MapError, PositionMapBuilder};
use crate::parsing::{
    Node,
    kinds::{BlockQuote, CodeFence},
    rope::LineIndex,
};
use crate::position::{Position, Range};
use crate::registry::{FragmentId, FragmentMap};

/// Written before each directive; directive text starts right after it.
pub const COMMENT_OPENER: &str = "/*";
/// Written after each directive.
pub const COMMENT_CLOSER: &str = "*/";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SynthesisError {
    #[error("fragment line {line} is outside the document ({line_count} lines)")]
    LineOutOfBounds { line: usize, line_count: usize },
    #[error("fragment has no language tag")]
    MissingLanguage,
    #[error(transparent)]
    Map(#[from] MapError),
}

/// Standalone source text for one fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SynthesizedSource {
    pub id: FragmentId,
    /// Virtual file name, `<document>/<ordinal>.<lang>`.
    pub identifier: String,
    pub lang: String,
    pub text: String,
}

#[derive(Debug)]
pub struct SynthesizedBlock {
    pub source: SynthesizedSource,
    pub map: FragmentMap,
}

/// Builds the source text of a fragment and the map back to the document.
///
/// The text is each directive as a `/*...*/` comment followed by the
/// fragment's content lines, each with up to the fragment's base indent
/// removed. The empty line after the final newline maps to the closing
/// fence, or to the end of the content when the fence is unclosed.
pub fn synthesize(
    lines: &Arc<LineIndex>,
    fragment: &Node,
    directives: &[Directive],
    id: FragmentId,
) -> Result<SynthesizedBlock, SynthesisError> {
    let lang = fragment
        .lang_tag()
        .ok_or(SynthesisError::MissingLanguage)?
        .to_string();
    let indent = base_indent(lines, fragment);
    let mut builder = PositionMapBuilder::new();
    let mut out: Vec<String> = Vec::new();

    for directive in directives {
        let comment = format!("{COMMENT_OPENER}{}{COMMENT_CLOSER}", directive.text);
        let first_line = out.len() + 1;
        let emitted_lines = comment.split('\n').count();
        out.extend(comment.split('\n').map(str::to_string));

        let loc = directive.location;
        let start = Position::new(first_line, COMMENT_OPENER.len() + 1);
        let end_line = first_line + loc.line_delta().min(emitted_lines - 1);
        let end_column =
            (start.column as i64 + loc.end.column as i64 - loc.start.column as i64).max(1);
        builder.add_mapping(
            loc,
            Range::new(start, Position::new(end_line, end_column as usize)),
        )?;
    }

    let body = content_lines(lines, fragment, indent)?;
    let directive_lines = out.len();
    let mut content_end = None;
    for (k, line) in body.content.enumerate() {
        let (stripped, text) = dedent(line_text(lines, line)?, indent);
        let len = text.chars().count();
        let generated_line = directive_lines + 1 + k;
        let end = Position::new(line, stripped + len + 1);
        builder.add_mapping(
            Range::new(Position::new(line, stripped + 1), end),
            Range::new(
                Position::new(generated_line, 1),
                Position::new(generated_line, len + 1),
            ),
        )?;
        content_end = Some(end);
        out.push(text);
    }

    let mut text = out.join("\n");
    if !out.is_empty() {
        text.push('\n');
        let last = match (body.closing, content_end) {
            (Some(line), _) => {
                let (stripped, _) = dedent(line_text(lines, line)?, indent);
                Position::new(line, stripped + 1)
            }
            (None, Some(end)) => end,
            (None, None) => fragment.position.end,
        };
        let trailing = Position::new(out.len() + 1, 1);
        builder.add_mapping(Range::new(last, last), Range::new(trailing, trailing))?;
    }

    let identifier = format!("{}/{}.{lang}", id.document, id.ordinal);
    let map = FragmentMap::new(id.clone(), builder.build(), &text, Arc::clone(lines));
    Ok(SynthesizedBlock {
        source: SynthesizedSource {
            id,
            identifier,
            lang,
            text,
        },
        map,
    })
}

/// Document lines of a fragment after its opening fence.
struct Body {
    content: std::ops::RangeInclusive<usize>,
    closing: Option<usize>,
}

fn line_text(lines: &LineIndex, line: usize) -> Result<String, SynthesisError> {
    lines
        .line_text(line)
        .ok_or(SynthesisError::LineOutOfBounds {
            line,
            line_count: lines.line_count(),
        })
}

/// Removes the container prefix of a line, but never more than `indent`
/// characters. Returns how many characters went.
fn dedent(line: String, indent: usize) -> (usize, String) {
    let stripped = indent.min(BlockQuote::prefix_len(&line));
    (stripped, line.chars().skip(stripped).collect())
}

fn content_lines(
    lines: &LineIndex,
    fragment: &Node,
    indent: usize,
) -> Result<Body, SynthesisError> {
    let first = fragment.position.start.line;
    let last = fragment.position.end.line;

    let (_, opening) = dedent(line_text(lines, first)?, indent);
    if last > first
        && let Some(fence) = CodeFence::open(&opening)
        && fence.closes(&dedent(line_text(lines, last)?, indent).1)
    {
        return Ok(Body {
            content: (first + 1)..=(last - 1),
            closing: Some(last),
        });
    }
    Ok(Body {
        content: (first + 1)..=last,
        closing: None,
    })
}
