//! # Document Parsing
//!
//! Turns Markdown text into the node tree the extractor walks.
//!
//! ## Modules
//!
//! - **`node`**: `Node` and `NodeKind`, an mdast-shaped tree with line/column positions
//! - **`walk`**: `Nodes`, a stack-driven document-order iterator
//! - **`kinds`**: Syntax knowledge for blockquote prefixes and code fences
//! - **`rope`**: Rope-backed line index converting offsets to positions
//!
//! Block structure is delegated to `pulldown-cmark`; this module only maps
//! its offset event stream onto nodes.
//!
//! ## Position Conventions
//!
//! - Code and html nodes start at their first non-prefix character, so a
//!   fence nested under `> ` starts at column 3
//! - A node's end excludes the line terminator that closes it

pub mod kinds;
pub mod node;
pub mod rope;
pub mod walk;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag};

use crate::position::Range;
use kinds::BlockQuote;
use rope::LineIndex;

pub use node::{Node, NodeKind};
pub use walk::{Nodes, walk};

#[derive(Debug)]
pub struct ParsedDoc {
    pub root: Node,
}

fn parser_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

pub fn parse_document(text: &str, lines: &LineIndex) -> ParsedDoc {
    let root = Node::new(
        NodeKind::Root,
        node_range(text, lines, NodeKind::Root, 0..text.len()),
    );
    let mut stack = vec![root];

    for (event, span) in Parser::new_ext(text, parser_options()).into_offset_iter() {
        match event {
            Event::Start(tag) => {
                let kind = kind_of(&tag);
                let mut node = Node::new(kind, node_range(text, lines, kind, span));
                match &tag {
                    Tag::CodeBlock(CodeBlockKind::Fenced(info)) => {
                        node.lang = Some(info.to_string()).filter(|s| !s.trim().is_empty());
                        node.value = Some(String::new());
                    }
                    Tag::CodeBlock(CodeBlockKind::Indented) | Tag::HtmlBlock => {
                        node.value = Some(String::new());
                    }
                    _ => {}
                }
                stack.push(node);
            }
            Event::End(_) => {
                // The root is never closed by an event.
                if stack.len() > 1
                    && let Some(node) = stack.pop()
                    && let Some(parent) = stack.last_mut()
                {
                    parent.children.push(node);
                }
            }
            Event::Text(t) | Event::Html(t) if accumulates(&stack) => {
                if let Some(value) = stack.last_mut().and_then(|n| n.value.as_mut()) {
                    value.push_str(&t);
                }
            }
            Event::Text(t) => {
                push_leaf(&mut stack, text, lines, NodeKind::Text, span, Some(&*t))
            }
            Event::Html(t) | Event::InlineHtml(t) => {
                push_leaf(&mut stack, text, lines, NodeKind::Html, span, Some(&*t))
            }
            Event::Code(t) => {
                push_leaf(&mut stack, text, lines, NodeKind::InlineCode, span, Some(&*t))
            }
            Event::Rule => {
                push_leaf(&mut stack, text, lines, NodeKind::ThematicBreak, span, None)
            }
            Event::HardBreak => push_leaf(&mut stack, text, lines, NodeKind::Break, span, None),
            _ => {}
        }
    }

    // Fold anything left open into its parent.
    while stack.len() > 1 {
        if let Some(node) = stack.pop()
            && let Some(parent) = stack.last_mut()
        {
            parent.children.push(node);
        }
    }

    ParsedDoc {
        root: stack.swap_remove(0),
    }
}

fn accumulates(stack: &[Node]) -> bool {
    stack
        .last()
        .is_some_and(|n| matches!(n.kind, NodeKind::Code | NodeKind::Html) && n.value.is_some())
}

fn push_leaf(
    stack: &mut [Node],
    text: &str,
    lines: &LineIndex,
    kind: NodeKind,
    span: std::ops::Range<usize>,
    value: Option<&str>,
) {
    let mut node = Node::new(kind, node_range(text, lines, kind, span));
    node.value = value.map(str::to_string);
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    }
}

fn kind_of(tag: &Tag<'_>) -> NodeKind {
    match tag {
        Tag::Paragraph => NodeKind::Paragraph,
        Tag::Heading { .. } => NodeKind::Heading,
        Tag::BlockQuote(_) => NodeKind::BlockQuote,
        Tag::CodeBlock(_) => NodeKind::Code,
        Tag::HtmlBlock => NodeKind::Html,
        Tag::List(_) => NodeKind::List,
        Tag::Item => NodeKind::ListItem,
        Tag::Emphasis => NodeKind::Emphasis,
        Tag::Strong => NodeKind::Strong,
        Tag::Link { .. } => NodeKind::Link,
        Tag::Image { .. } => NodeKind::Image,
        Tag::Table(_) => NodeKind::Table,
        _ => NodeKind::Other,
    }
}

/// Converts an event's byte span into a node range.
///
/// Block code and html nodes are moved past any container prefix left on
/// their first line, and every node's end is pulled back over its closing
/// line terminator.
fn node_range(
    text: &str,
    lines: &LineIndex,
    kind: NodeKind,
    span: std::ops::Range<usize>,
) -> Range {
    let mut start = span.start.min(text.len());
    let mut end = span.end.min(text.len()).max(start);

    if matches!(kind, NodeKind::Code | NodeKind::Html) {
        let first_line = text[start..end].split('\n').next().unwrap_or_default();
        start += BlockQuote::prefix_bytes(first_line);
    }

    if end > start && text[..end].ends_with('\n') {
        end -= 1;
        if end > start && text[..end].ends_with('\r') {
            end -= 1;
        }
    }

    Range::new(lines.position(start), lines.position(end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(md: &str) -> Node {
        let lines = LineIndex::new(md);
        parse_document(md, &lines).root
    }

    fn kinds(root: &Node) -> Vec<NodeKind> {
        walk(root).map(|n| n.kind).collect()
    }

    fn first(root: &Node, kind: NodeKind) -> &Node {
        walk(root)
            .find(|n| n.kind == kind)
            .unwrap_or_else(|| panic!("no {} node", kind.as_str()))
    }

    #[test]
    fn fenced_code_carries_info_string() {
        let root = parse("```js title=\"a.js\"\nlet a = 1;\n```\n");
        let code = first(&root, NodeKind::Code);
        assert_eq!(code.lang.as_deref(), Some("js title=\"a.js\""));
        assert_eq!(code.lang_tag(), Some("js"));
        assert_eq!(code.value.as_deref(), Some("let a = 1;\n"));
    }

    #[test]
    fn fenced_code_positions_span_fences() {
        let root = parse("# Title\n\n```js\nlet a = 1;\n```\n");
        let code = first(&root, NodeKind::Code);
        assert_eq!((code.position.start.line, code.position.start.column), (3, 1));
        assert_eq!((code.position.end.line, code.position.end.column), (5, 4));
        assert_eq!(code.position.start.offset, Some(9));
    }

    #[test]
    fn fence_without_info_has_no_lang() {
        let root = parse("```\nplain\n```\n");
        assert_eq!(first(&root, NodeKind::Code).lang, None);
    }

    #[test]
    fn quoted_fence_starts_after_prefix() {
        let root = parse("> ```js\n> let a = 1;\n> ```\n");
        let code = first(&root, NodeKind::Code);
        assert_eq!((code.position.start.line, code.position.start.column), (1, 3));
        assert_eq!(code.position.end.line, 3);
    }

    #[test]
    fn html_comment_value_is_raw_text() {
        let root = parse("<!-- eslint-disable no-alert -->\n\n```js\nalert(1);\n```\n");
        let html = first(&root, NodeKind::Html);
        assert_eq!(
            html.value.as_deref().map(str::trim),
            Some("<!-- eslint-disable no-alert -->")
        );
        assert_eq!(html.position.start.line, 1);
    }

    #[test]
    fn tree_preserves_document_order() {
        let root = parse("Intro text\n\n<!-- c -->\n\n```js\nx;\n```\n");
        assert_eq!(
            kinds(&root),
            vec![
                NodeKind::Root,
                NodeKind::Paragraph,
                NodeKind::Text,
                NodeKind::Html,
                NodeKind::Code,
            ]
        );
    }

    #[test]
    fn code_text_is_not_a_child() {
        let root = parse("```js\nconst a = '<b>';\n```\n");
        assert!(first(&root, NodeKind::Code).children.is_empty());
    }

    #[test]
    fn empty_document_is_bare_root() {
        let root = parse("");
        assert_eq!(root.kind, NodeKind::Root);
        assert!(root.children.is_empty());
    }
}
