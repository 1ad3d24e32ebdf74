use crate::position::Range;

/// The type of a document node, named after the mdast node types Markdown
/// tooling expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    Paragraph,
    Heading,
    BlockQuote,
    List,
    ListItem,
    /// Fenced or indented code block.
    Code,
    /// Block-level HTML or inline HTML (comments included).
    Html,
    Text,
    InlineCode,
    Emphasis,
    Strong,
    Link,
    Image,
    Table,
    ThematicBreak,
    Break,
    /// Anything the extractor has no use for (footnotes, metadata, ...).
    Other,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Root => "root",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Heading => "heading",
            NodeKind::BlockQuote => "blockquote",
            NodeKind::List => "list",
            NodeKind::ListItem => "listItem",
            NodeKind::Code => "code",
            NodeKind::Html => "html",
            NodeKind::Text => "text",
            NodeKind::InlineCode => "inlineCode",
            NodeKind::Emphasis => "emphasis",
            NodeKind::Strong => "strong",
            NodeKind::Link => "link",
            NodeKind::Image => "image",
            NodeKind::Table => "table",
            NodeKind::ThematicBreak => "thematicBreak",
            NodeKind::Break => "break",
            NodeKind::Other => "other",
        }
    }
}

/// One element of the document tree.
///
/// `lang` is the full info string of a fenced code block; `value` holds the
/// raw text of code, html, text and inline code nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub position: Range,
    pub lang: Option<String>,
    pub value: Option<String>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(kind: NodeKind, position: Range) -> Self {
        Self {
            kind,
            position,
            lang: None,
            value: None,
            children: Vec::new(),
        }
    }

    /// First whitespace-delimited token of the info string, e.g. `js` for
    /// `js title="demo.js"`.
    pub fn lang_tag(&self) -> Option<&str> {
        self.lang.as_deref()?.split_whitespace().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;

    fn code(lang: Option<&str>) -> Node {
        let mut node = Node::new(
            NodeKind::Code,
            Range::new(Position::new(1, 1), Position::new(3, 4)),
        );
        node.lang = lang.map(str::to_string);
        node
    }

    #[test]
    fn lang_tag_takes_first_token() {
        assert_eq!(code(Some("js title=\"x.js\"")).lang_tag(), Some("js"));
        assert_eq!(code(Some("  ts")).lang_tag(), Some("ts"));
    }

    #[test]
    fn lang_tag_absent_without_info() {
        assert_eq!(code(None).lang_tag(), None);
        assert_eq!(code(Some("   ")).lang_tag(), None);
    }

    #[test]
    fn kind_names_follow_mdast() {
        assert_eq!(NodeKind::BlockQuote.as_str(), "blockquote");
        assert_eq!(NodeKind::ListItem.as_str(), "listItem");
        assert_eq!(NodeKind::Code.as_str(), "code");
    }
}
