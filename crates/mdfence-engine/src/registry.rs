use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::mapping::PositionMap;
use crate::parsing::rope::LineIndex;
use crate::position::Position;

/// Stable identity of a fragment: its document and its ordinal among the
/// document's tagged fenced blocks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FragmentId {
    pub document: String,
    pub ordinal: usize,
}

impl FragmentId {
    pub fn new(document: impl Into<String>, ordinal: usize) -> Self {
        Self {
            document: document.into(),
            ordinal,
        }
    }
}

impl std::fmt::Display for FragmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.document, self.ordinal)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("no fragments registered for document {0}")]
    UnknownDocument(String),
    #[error("document {document} has {len} fragments, index {index} requested")]
    FragmentOutOfRange {
        document: String,
        index: usize,
        len: usize,
    },
    #[error("fragment {0} is not registered")]
    UnknownFragment(FragmentId),
}

/// A fragment's position map together with what is needed to translate
/// byte offsets: line indexes of the synthesized text and of the document.
#[derive(Debug, Clone)]
pub struct FragmentMap {
    id: FragmentId,
    map: PositionMap,
    generated: LineIndex,
    original: Arc<LineIndex>,
}

impl FragmentMap {
    pub fn new(
        id: FragmentId,
        map: PositionMap,
        generated_text: &str,
        original: Arc<LineIndex>,
    ) -> Self {
        Self {
            id,
            map,
            generated: LineIndex::new(generated_text),
            original,
        }
    }

    pub fn id(&self) -> &FragmentId {
        &self.id
    }

    pub fn map_position(&self, generated: Position) -> Option<Position> {
        self.map.map_position(generated)
    }

    /// Translates a byte offset in the synthesized text into a byte offset
    /// in the document.
    pub fn map_offset(&self, generated: usize) -> Option<usize> {
        if generated > self.generated.len() {
            return None;
        }
        let original = self.map.map_position(self.generated.position(generated))?;
        self.original.offset(original)
    }
}

/// Fragment maps grouped by document identifier.
///
/// Owned by the caller and passed to both extraction and translation, so
/// each run decides the lifetime of what it registered.
#[derive(Debug, Default)]
pub struct MapRegistry {
    documents: HashMap<String, Vec<FragmentMap>>,
}

impl MapRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fresh, empty entry for `identifier`, dropping any maps a
    /// previous run registered under it.
    pub fn reset(&mut self, identifier: &str) {
        self.documents.insert(identifier.to_string(), Vec::new());
    }

    pub fn register(&mut self, identifier: &str, map: FragmentMap) {
        self.documents
            .entry(identifier.to_string())
            .or_default()
            .push(map);
    }

    pub fn get(&self, identifier: &str, index: usize) -> Result<&FragmentMap, RegistryError> {
        let maps = self.maps(identifier)?;
        maps.get(index).ok_or_else(|| RegistryError::FragmentOutOfRange {
            document: identifier.to_string(),
            index,
            len: maps.len(),
        })
    }

    pub fn find(&self, id: &FragmentId) -> Result<&FragmentMap, RegistryError> {
        self.maps(&id.document)?
            .iter()
            .find(|m| m.id() == id)
            .ok_or_else(|| RegistryError::UnknownFragment(id.clone()))
    }

    pub fn maps(&self, identifier: &str) -> Result<&[FragmentMap], RegistryError> {
        self.documents
            .get(identifier)
            .map(Vec::as_slice)
            .ok_or_else(|| RegistryError::UnknownDocument(identifier.to_string()))
    }

    pub fn len(&self, identifier: &str) -> usize {
        self.documents.get(identifier).map_or(0, Vec::len)
    }

    pub fn remove(&mut self, identifier: &str) -> Option<Vec<FragmentMap>> {
        self.documents.remove(identifier)
    }
}
