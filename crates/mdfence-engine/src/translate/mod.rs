//! # Diagnostic Translation
//!
//! Moves lint diagnostics reported against synthesized sources back onto
//! the Markdown document.
//!
//! Fixes are forwarded ([`SUPPORTS_AUTOFIX`]) with their byte ranges
//! translated, except when a diagnostic ends on a different document line
//! than it starts: an edit computed against the contiguous synthesized
//! text cannot be assumed to cover the equivalent document region once
//! container prefixes sit between its lines.

pub mod diagnostic;

use crate::position::Position;
use crate::registry::{FragmentId, FragmentMap, MapRegistry, RegistryError};

pub use diagnostic::{Diagnostic, Fix, Suggestion};

/// Rules that can never pass on a fragment cut out of a larger document.
pub const UNSATISFIABLE_RULES: [&str; 2] = ["eol-last", "unicode-bom"];

/// Translation keeps automatic fixes.
pub const SUPPORTS_AUTOFIX: bool = true;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("document {document} has {expected} fragments but {actual} diagnostic batches were given")]
    BatchCountMismatch {
        document: String,
        expected: usize,
        actual: usize,
    },
}

/// Translates one batch of diagnostics per fragment, in the order the
/// fragments were extracted.
///
/// The number of batches must match the number of fragments registered for
/// `identifier`; a mismatch means the batches cannot be attributed and
/// nothing is translated.
pub fn translate(
    registry: &MapRegistry,
    identifier: &str,
    batches: &[Vec<Diagnostic>],
) -> Result<Vec<Diagnostic>, TranslateError> {
    let maps = registry.maps(identifier)?;
    if maps.len() != batches.len() {
        return Err(TranslateError::BatchCountMismatch {
            document: identifier.to_string(),
            expected: maps.len(),
            actual: batches.len(),
        });
    }

    Ok(maps
        .iter()
        .zip(batches)
        .flat_map(|(map, batch)| translate_batch(map, batch))
        .collect())
}

/// Translates batches addressed by fragment id rather than by position.
pub fn translate_batches(
    registry: &MapRegistry,
    batches: &[(FragmentId, Vec<Diagnostic>)],
) -> Result<Vec<Diagnostic>, TranslateError> {
    let mut out = Vec::new();
    for (id, batch) in batches {
        let map = registry.find(id)?;
        out.extend(translate_batch(map, batch));
    }
    Ok(out)
}

fn translate_batch(map: &FragmentMap, batch: &[Diagnostic]) -> Vec<Diagnostic> {
    batch
        .iter()
        .filter(|d| !is_unsatisfiable(d))
        .filter_map(|d| translate_diagnostic(map, d))
        .collect()
}

fn is_unsatisfiable(diagnostic: &Diagnostic) -> bool {
    diagnostic
        .rule_id
        .as_deref()
        .is_some_and(|rule| UNSATISFIABLE_RULES.contains(&rule))
}

/// Looks up a 1-based line, 0-based column pair.
fn lookup(map: &FragmentMap, line: usize, column: usize) -> Option<Position> {
    map.map_position(Position::new(line, column + 1))
}

fn translate_diagnostic(map: &FragmentMap, diagnostic: &Diagnostic) -> Option<Diagnostic> {
    let Some(start) = lookup(map, diagnostic.line, diagnostic.column) else {
        log::debug!(
            "dropping diagnostic at {}:{} in {}: no document position",
            diagnostic.line,
            diagnostic.column,
            map.id()
        );
        return None;
    };

    let mut out = diagnostic.clone();
    out.line = start.line;
    out.column = start.column - 1;

    let same_line = match (diagnostic.end_line, diagnostic.end_column) {
        (Some(line), Some(column)) => match lookup(map, line, column) {
            Some(end) => {
                out.end_line = Some(end.line);
                out.end_column = Some(end.column - 1);
                end.line == start.line
            }
            None => {
                out.end_line = None;
                out.end_column = None;
                false
            }
        },
        _ => true,
    };

    if !same_line {
        out.strip_fixes();
        return Some(out);
    }

    out.fix = out.fix.and_then(|fix| translate_fix(map, fix));
    for suggestion in &mut out.suggestions {
        suggestion.fix = suggestion.fix.take().and_then(|fix| translate_fix(map, fix));
    }
    Some(out)
}

fn translate_fix(map: &FragmentMap, fix: Fix) -> Option<Fix> {
    let start = map.map_offset(fix.range[0]);
    let end = map.map_offset(fix.range[1]);
    match (start, end) {
        (Some(start), Some(end)) if start <= end => Some(Fix {
            range: [start, end],
            text: fix.text,
        }),
        _ => {
            log::debug!("dropping fix {:?} in {}: range does not map", fix.range, map.id());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract;
    use pretty_assertions::assert_eq;

    const QUOTED: &str = "> ```js\n> let a = 1\n> let b = [\n>   2]\n> ```\n";

    fn registry_for(md: &str) -> MapRegistry {
        let mut registry = MapRegistry::new();
        extract(&mut registry, md, "doc.md");
        registry
    }

    #[test]
    fn translates_start_and_end() {
        let registry = registry_for(QUOTED);
        let d = Diagnostic::new(Some("no-unused-vars"), 1, 4).with_end(1, 5);
        let out = translate(&registry, "doc.md", &[vec![d]]).unwrap();
        assert_eq!((out[0].line, out[0].column), (2, 6));
        assert_eq!((out[0].end_line, out[0].end_column), (Some(2), Some(7)));
    }

    #[test]
    fn unsatisfiable_rules_are_removed() {
        let registry = registry_for(QUOTED);
        let batch = vec![
            Diagnostic::new(Some("eol-last"), 3, 4),
            Diagnostic::new(Some("unicode-bom"), 1, 0),
            Diagnostic::new(Some("semi"), 1, 9),
        ];
        let out = translate(&registry, "doc.md", &[batch]).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].rule_id.as_deref(), Some("semi"));
    }

    #[test]
    fn same_line_fix_is_translated() {
        let registry = registry_for(QUOTED);
        // "let a = 1" is bytes 0..9 of the source; the semicolon goes at 9
        let d = Diagnostic::new(Some("semi"), 1, 9)
            .with_end(1, 9)
            .with_fix([9, 9], ";")
            .with_suggestion("add semicolon", [9, 9], ";");
        let out = translate(&registry, "doc.md", &[vec![d]]).unwrap();

        // line 2 of the document is "> let a = 1", starting at byte 8
        let expected = Fix {
            range: [19, 19],
            text: ";".into(),
        };
        assert_eq!(out[0].fix.as_ref(), Some(&expected));
        assert_eq!(out[0].suggestions[0].fix.as_ref(), Some(&expected));
    }

    #[test]
    fn cross_line_fix_is_stripped() {
        let registry = registry_for(QUOTED);
        let d = Diagnostic::new(Some("array-bracket-newline"), 2, 8)
            .with_end(3, 4)
            .with_fix([18, 24], "[2]")
            .with_suggestion("collapse", [18, 24], "[2]");
        let out = translate(&registry, "doc.md", &[vec![d]]).unwrap();

        assert_eq!((out[0].line, out[0].end_line), (3, Some(4)));
        assert_eq!(out[0].fix, None);
        assert_eq!(out[0].suggestions[0].fix, None);
        assert_eq!(out[0].suggestions[0].desc, "collapse");
    }

    #[test]
    fn unmapped_start_drops_diagnostic() {
        let registry = registry_for(QUOTED);
        let d = Diagnostic::new(Some("max-len"), 1, 40);
        let out = translate(&registry, "doc.md", &[vec![d]]).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn end_of_input_diagnostic_lands_on_closing_fence() {
        let registry = registry_for("```js\nbroken(\n```\n");
        let d = Diagnostic::new(None, 2, 0);
        let out = translate(&registry, "doc.md", &[vec![d]]).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!((out[0].line, out[0].column), (3, 0));
    }

    #[test]
    fn fix_reaching_end_of_last_line_survives() {
        // "let a = 1;  \n" is the whole source; the document line starts at byte 6
        let registry = registry_for("```js\nlet a = 1;  \n```\n");
        let d = Diagnostic::new(Some("no-trailing-spaces"), 1, 10)
            .with_end(1, 12)
            .with_fix([10, 12], "")
            .with_suggestion("drop line end", [10, 13], "");
        let out = translate(&registry, "doc.md", &[vec![d]]).unwrap();

        assert_eq!(out[0].fix.as_ref().map(|f| f.range), Some([16, 18]));
        assert_eq!(
            out[0].suggestions[0].fix.as_ref().map(|f| f.range),
            Some([16, 19])
        );
    }

    #[test]
    fn unmapped_end_strips_fixes() {
        let registry = registry_for(QUOTED);
        let d = Diagnostic::new(Some("semi"), 1, 0)
            .with_end(1, 40)
            .with_fix([0, 1], "x");
        let out = translate(&registry, "doc.md", &[vec![d]]).unwrap();
        assert_eq!(out[0].end_line, None);
        assert_eq!(out[0].fix, None);
    }

    #[test]
    fn batch_count_must_match() {
        let registry = registry_for(QUOTED);
        let err = translate(&registry, "doc.md", &[vec![], vec![]]).unwrap_err();
        assert_eq!(
            err,
            TranslateError::BatchCountMismatch {
                document: "doc.md".into(),
                expected: 1,
                actual: 2,
            }
        );
    }

    #[test]
    fn unknown_document_is_an_error() {
        let registry = MapRegistry::new();
        let err = translate(&registry, "missing.md", &[]).unwrap_err();
        assert!(matches!(
            err,
            TranslateError::Registry(RegistryError::UnknownDocument(_))
        ));
    }

    #[test]
    fn output_is_flattened_in_fragment_order() {
        let md = "```js\nfirst()\n```\n\n```js\nsecond()\n```\n";
        let registry = registry_for(md);
        let batches = vec![
            vec![Diagnostic::new(Some("a"), 1, 0)],
            vec![
                Diagnostic::new(Some("b"), 1, 0),
                Diagnostic::new(Some("c"), 1, 6),
            ],
        ];
        let out = translate(&registry, "doc.md", &batches).unwrap();
        let rules: Vec<_> = out.iter().filter_map(|d| d.rule_id.as_deref()).collect();
        assert_eq!(rules, vec!["a", "b", "c"]);
        assert_eq!(out[1].line, 6);
    }

    #[test]
    fn keyed_batches_ignore_order() {
        let md = "```js\nfirst()\n```\n\n```js\nsecond()\n```\n";
        let registry = registry_for(md);
        let batches = vec![
            (FragmentId::new("doc.md", 1), vec![Diagnostic::new(Some("b"), 1, 0)]),
            (FragmentId::new("doc.md", 0), vec![Diagnostic::new(Some("a"), 1, 0)]),
        ];
        let out = translate_batches(&registry, &batches).unwrap();
        assert_eq!((out[0].line, out[1].line), (6, 2));
    }
}
