#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

impl FenceKind {
    pub fn marker(self) -> char {
        match self {
            FenceKind::Backticks => '`',
            FenceKind::Tildes => '~',
        }
    }
}

/// An opening code fence: its marker and run length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeFence {
    pub kind: FenceKind,
    pub len: usize,
}

impl CodeFence {
    pub const MIN_LEN: usize = 3;

    /// Recognises an opening fence at the start of `remainder`, ignoring
    /// leading whitespace.
    pub fn open(remainder: &str) -> Option<Self> {
        let t = remainder.trim_start();
        let kind = match t.chars().next()? {
            '`' => FenceKind::Backticks,
            '~' => FenceKind::Tildes,
            _ => return None,
        };
        let len = t.chars().take_while(|&c| c == kind.marker()).count();
        (len >= Self::MIN_LEN).then_some(Self { kind, len })
    }

    /// Whether `remainder` is a closing fence for this opener: the same
    /// marker, at least as long, followed only by whitespace.
    pub fn closes(&self, remainder: &str) -> bool {
        let t = remainder.trim();
        let run = t.chars().take_while(|&c| c == self.kind.marker()).count();
        run >= self.len && t.chars().skip(run).all(char::is_whitespace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_backtick_fence() {
        assert_eq!(
            CodeFence::open("```rust"),
            Some(CodeFence {
                kind: FenceKind::Backticks,
                len: 3
            })
        );
    }

    #[test]
    fn detect_tilde_fence() {
        assert_eq!(
            CodeFence::open("~~~~"),
            Some(CodeFence {
                kind: FenceKind::Tildes,
                len: 4
            })
        );
    }

    #[test]
    fn no_fence() {
        assert_eq!(CodeFence::open("hello"), None);
        assert_eq!(CodeFence::open("``"), None);
    }

    #[test]
    fn closes_matching_fence() {
        let fence = CodeFence::open("```js").unwrap();
        assert!(fence.closes("```"));
        assert!(fence.closes("  ````  "));
    }

    #[test]
    fn does_not_close_mismatched_fence() {
        let ticks = CodeFence::open("````").unwrap();
        assert!(!ticks.closes("```"));
        assert!(!ticks.closes("~~~~"));
        assert!(!ticks.closes("```` js"));

        let tildes = CodeFence::open("~~~").unwrap();
        assert!(!tildes.closes("```"));
        assert!(tildes.closes("~~~"));
    }
}
