use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::parsing::Node;
use crate::position::Range;

/// Directive text that withholds all directives from the next fragment.
pub const SKIP_SENTINEL: &str = "eslint-skip";

static DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^<!--\s*(eslint\b.+?|global\s.+?)\s*-->$")
        .expect("Invalid directive regex pattern")
});

/// A linter directive found in an HTML comment, e.g. `eslint-disable no-alert`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Directive {
    pub text: String,
    /// Where the whole comment sits in the document.
    pub location: Range,
}

/// Returns the directive body of an HTML comment, or `None` when the
/// comment is not a directive.
pub fn parse_directive(html: &str) -> Option<&str> {
    DIRECTIVE
        .captures(html.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Accumulates directives that apply to the next fragment.
///
/// Directives only reach a fragment that follows them with no unrelated
/// content in between; anything else seen by the walker calls
/// [`DirectiveCollector::clear`].
#[derive(Debug, Default)]
pub struct DirectiveCollector {
    pending: Vec<Directive>,
    skipping: bool,
}

impl DirectiveCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds an html node.
    pub fn add(&mut self, node: &Node) {
        let value = node.value.as_deref().unwrap_or_default();
        let Some(text) = parse_directive(value) else {
            self.clear();
            return;
        };

        if text == SKIP_SENTINEL {
            log::debug!("{SKIP_SENTINEL} at {}", node.position.start);
            self.skipping = true;
            self.pending.clear();
        } else if !self.skipping {
            self.pending.push(Directive {
                text: text.to_string(),
                location: node.position,
            });
        }
    }

    /// Hands the pending directives to the fragment that follows and resets.
    pub fn consume(&mut self) -> Vec<Directive> {
        self.skipping = false;
        std::mem::take(&mut self.pending)
    }

    /// Drops pending directives and any active skip.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.skipping = false;
    }

    pub fn is_skipping(&self) -> bool {
        self.skipping
    }

    pub fn pending(&self) -> &[Directive] {
        &self.pending
    }
}
