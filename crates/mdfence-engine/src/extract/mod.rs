//! # Fragment Extraction
//!
//! Walks a parsed document and turns every tagged fenced code block into a
//! [`SynthesizedSource`], registering the matching [`FragmentMap`] for later
//! translation.
//!
//! ## Walk Contract
//!
//! - html nodes feed the [`DirectiveCollector`]
//! - tagged fenced code blocks consume the pending directives; after an
//!   `eslint-skip` that is an empty list, or with
//!   [`ExtractOptions::skip_marked`] the fragment is left out
//! - every other node clears them, so directives only reach the fragment
//!   directly after them
//!
//! [`FragmentMap`]: crate::registry::FragmentMap

pub mod directives;
pub mod indent;
pub mod synthesize;

use std::sync::Arc;

use crate::parsing::{NodeKind, parse_document, rope::LineIndex, walk};
use crate::registry::{FragmentId, MapRegistry};

pub use directives::{Directive, DirectiveCollector, SKIP_SENTINEL, parse_directive};
pub use indent::base_indent;
pub use synthesize::{SynthesisError, SynthesizedBlock, SynthesizedSource, synthesize};

/// Which fragments get extracted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Language tags to extract. Empty means every tagged fragment.
    pub languages: Vec<String>,
    /// Leave out fragments marked with `eslint-skip` instead of extracting
    /// them without directives. Their ordinals are still used up.
    pub skip_marked: bool,
}

impl ExtractOptions {
    pub fn accepts(&self, lang: &str) -> bool {
        self.languages.is_empty() || self.languages.iter().any(|l| l == lang)
    }
}

/// A fragment that could not be synthesized.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisFailure {
    pub id: FragmentId,
    pub error: SynthesisError,
}

/// Result of extracting one document.
#[derive(Debug, Default)]
pub struct Extraction {
    /// Synthesized sources in document order. Source `i` corresponds to the
    /// `i`-th map registered for the document.
    pub sources: Vec<SynthesizedSource>,
    /// Fragments left out of `sources`.
    pub failures: Vec<SynthesisFailure>,
}

#[derive(Debug, Clone, Default)]
pub struct Extractor {
    options: ExtractOptions,
}

impl Extractor {
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Extracts every fragment of `text`, registering one map per returned
    /// source under `identifier`. Maps from an earlier run under the same
    /// identifier are discarded first.
    pub fn extract(&self, registry: &mut MapRegistry, text: &str, identifier: &str) -> Extraction {
        let lines = Arc::new(LineIndex::new(text));
        let doc = parse_document(text, &lines);
        let mut collector = DirectiveCollector::new();
        let mut extraction = Extraction::default();
        let mut ordinal = 0usize;

        registry.reset(identifier);

        for node in walk(&doc.root) {
            match node.kind {
                NodeKind::Html => collector.add(node),
                NodeKind::Code
                    if node
                        .lang_tag()
                        .is_some_and(|lang| self.options.accepts(lang)) =>
                {
                    let id = FragmentId::new(identifier, ordinal);
                    ordinal += 1;

                    if self.options.skip_marked && collector.is_skipping() {
                        log::debug!("skipping fragment {id} at {}", node.position.start);
                        collector.clear();
                        continue;
                    }

                    let directives = collector.consume();
                    match synthesize(&lines, node, &directives, id.clone()) {
                        Ok(block) => {
                            log::debug!(
                                "extracted {} ({} directives)",
                                block.source.identifier,
                                directives.len()
                            );
                            registry.register(identifier, block.map);
                            extraction.sources.push(block.source);
                        }
                        Err(error) => {
                            log::warn!("failed to synthesize fragment {id}: {error}");
                            extraction.failures.push(SynthesisFailure { id, error });
                        }
                    }
                }
                _ => collector.clear(),
            }
        }

        extraction
    }
}

/// Extracts with default options.
pub fn extract(registry: &mut MapRegistry, text: &str, identifier: &str) -> Extraction {
    Extractor::default().extract(registry, text, identifier)
}
