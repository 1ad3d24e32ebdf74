/// Blockquote container syntax.
///
/// All knowledge about the `>` marker lives here, not scattered through the
/// indent and node-position code.
pub struct BlockQuote;

impl BlockQuote {
    /// The blockquote prefix character.
    pub const PREFIX: char = '>';

    /// Length, in characters, of the longest leading run of whitespace and
    /// `>` markers.
    ///
    /// Handles `> text`, `>> nested`, `> > spaced nested` and plain
    /// indentation alike.
    pub fn prefix_len(s: &str) -> usize {
        s.chars()
            .take_while(|&c| c == Self::PREFIX || c.is_whitespace())
            .count()
    }

    /// Byte length of the same run, for slicing.
    pub fn prefix_bytes(s: &str) -> usize {
        s.char_indices()
            .find(|&(_, c)| c != Self::PREFIX && !c.is_whitespace())
            .map_or(s.len(), |(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("hello", 0)]
    #[case("> hello", 2)]
    #[case("> > hello", 4)]
    #[case(">> hello", 3)]
    #[case("   ```js", 3)]
    #[case(" >\t```", 3)]
    #[case("> ", 2)]
    fn prefix_len_cases(#[case] line: &str, #[case] expected: usize) {
        assert_eq!(BlockQuote::prefix_len(line), expected);
    }

    #[test]
    fn prefix_bytes_matches_chars_for_ascii() {
        assert_eq!(BlockQuote::prefix_bytes("> > x"), 4);
        assert_eq!(BlockQuote::prefix_bytes("> "), 2);
    }

    #[test]
    fn prefix_stops_at_list_marker() {
        assert_eq!(BlockQuote::prefix_len("- ```js"), 0);
    }
}
