//! Extracts fenced code blocks from Markdown documents as standalone
//! sources and maps positions in those sources back to the document.
//!
//! ## Pipeline
//!
//! ```rust
//! use mdfence_engine::{Diagnostic, MapRegistry, extract, translate};
//!
//! let markdown = "# Demo\n\n> ```js\n> const x = 1\n> ```\n";
//! let mut registry = MapRegistry::new();
//!
//! // 1. Extraction: one synthesized source per fragment
//! let extraction = extract(&mut registry, markdown, "demo.md");
//! assert_eq!(extraction.sources[0].text, "const x = 1\n");
//!
//! // 2. External analysis reports against the synthesized source
//! let batches = vec![vec![Diagnostic::new(Some("prefer-const"), 1, 6)]];
//!
//! // 3. Translation back onto the document
//! let diagnostics = translate(&registry, "demo.md", &batches).unwrap();
//! assert_eq!((diagnostics[0].line, diagnostics[0].column), (4, 8));
//! ```

pub mod extract;
pub mod mapping;
pub mod parsing;
pub mod position;
pub mod registry;
pub mod translate;

// Re-export key types for easier usage
pub use extract::{
    Directive, DirectiveCollector, ExtractOptions, Extraction, Extractor, SynthesisError,
    SynthesisFailure, SynthesizedSource, extract,
};
pub use mapping::{MapError, PositionMap, PositionMapBuilder, Segment};
pub use position::{Position, Range};
pub use registry::{FragmentId, FragmentMap, MapRegistry, RegistryError};
pub use translate::{
    Diagnostic, Fix, SUPPORTS_AUTOFIX, Suggestion, TranslateError, UNSATISFIABLE_RULES,
    translate, translate_batches,
};
