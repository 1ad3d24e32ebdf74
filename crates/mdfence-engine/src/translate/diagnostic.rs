use serde::{Deserialize, Serialize};

/// A replacement of the byte range `range` with `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fix {
    pub range: [usize; 2],
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(default)]
    pub desc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix: Option<Fix>,
}

/// A lint message as reported against a synthesized source.
///
/// Lines are 1-based and columns 0-based, on input and on output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub rule_id: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub severity: u8,
    pub line: usize,
    pub column: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_line: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_column: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix: Option<Fix>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<Suggestion>,
}

impl Diagnostic {
    pub fn new(rule_id: Option<&str>, line: usize, column: usize) -> Self {
        Self {
            rule_id: rule_id.map(str::to_string),
            message: String::new(),
            severity: 2,
            line,
            column,
            end_line: None,
            end_column: None,
            fix: None,
            suggestions: Vec::new(),
        }
    }

    pub fn with_end(mut self, end_line: usize, end_column: usize) -> Self {
        self.end_line = Some(end_line);
        self.end_column = Some(end_column);
        self
    }

    pub fn with_fix(mut self, range: [usize; 2], text: &str) -> Self {
        self.fix = Some(Fix {
            range,
            text: text.to_string(),
        });
        self
    }

    pub fn with_suggestion(mut self, desc: &str, range: [usize; 2], text: &str) -> Self {
        self.suggestions.push(Suggestion {
            desc: desc.to_string(),
            fix: Some(Fix {
                range,
                text: text.to_string(),
            }),
        });
        self
    }

    /// Drops the fix and every suggestion's fix.
    pub fn strip_fixes(&mut self) {
        self.fix = None;
        for suggestion in &mut self.suggestions {
            suggestion.fix = None;
        }
    }
}
