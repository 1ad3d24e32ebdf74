//! # Position Mapping
//!
//! Coordinate translation between a synthesized source and the document
//! it was cut from.
//!
//! A map is a sorted list of [`Segment`]s keyed by generated position.
//! Every mapped range contributes a `Mapping` at its generated start and a
//! `Terminator` at its generated end, so positions past the end of a range
//! are not attributed to it.
//!
//! Building and querying are split across two types: a
//! [`PositionMapBuilder`] only accepts insertions, and
//! [`PositionMapBuilder::build`] consumes it to produce an immutable
//! [`PositionMap`] that only answers queries.

use crate::position::{Position, Range};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("mapping at {inserted} inserted after segment at {previous}")]
    OutOfOrder {
        previous: Position,
        inserted: Position,
    },
    #[error("generated range ends at {end} before it starts at {start}")]
    InvertedRange { start: Position, end: Position },
}

/// One entry of a position map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// Generated positions from here on correspond to `original`.
    Mapping {
        generated: Position,
        original: Position,
    },
    /// Generated positions from here on have no original counterpart.
    Terminator { generated: Position },
}

impl Segment {
    pub fn generated(&self) -> Position {
        match *self {
            Segment::Mapping { generated, .. } | Segment::Terminator { generated } => generated,
        }
    }
}

/// Insert-only half of a position map.
#[derive(Debug, Default, Clone)]
pub struct PositionMapBuilder {
    segments: Vec<Segment>,
}

impl PositionMapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `generated` onto `original`.
    ///
    /// Ranges must be added in increasing generated order. A range may be
    /// empty, in which case its terminator shares its start position.
    pub fn add_mapping(&mut self, original: Range, generated: Range) -> Result<(), MapError> {
        if generated.end.key() < generated.start.key() {
            return Err(MapError::InvertedRange {
                start: generated.start,
                end: generated.end,
            });
        }
        if let Some(last) = self.segments.last()
            && generated.start.key() <= last.generated().key()
        {
            return Err(MapError::OutOfOrder {
                previous: last.generated(),
                inserted: generated.start,
            });
        }

        self.segments.push(Segment::Mapping {
            generated: Position::new(generated.start.line, generated.start.column),
            original: Position::new(original.start.line, original.start.column),
        });
        self.segments.push(Segment::Terminator {
            generated: Position::new(generated.end.line, generated.end.column),
        });
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn build(self) -> PositionMap {
        PositionMap {
            segments: self.segments,
        }
    }
}

/// Query-only half of a position map.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PositionMap {
    segments: Vec<Segment>,
}

impl PositionMap {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Translates a generated position into an original one.
    ///
    /// The nearest mapping at or before `generated` supplies the anchor; the
    /// line offset from the anchor is added to the original line and the
    /// anchor's column shift is applied to the column. Returns `None` before
    /// the first mapping and strictly past a terminator. A query landing
    /// exactly on a terminator still belongs to the range it closes.
    pub fn map_position(&self, generated: Position) -> Option<Position> {
        let key = generated.key();
        let idx = self.segments.partition_point(|s| s.generated().key() <= key);
        let anchor = match self.segments.get(idx.checked_sub(1)?)? {
            Segment::Mapping {
                generated: g,
                original: o,
            } => (*g, *o),
            Segment::Terminator { generated: t } if t.key() == key => {
                match self.segments.get(idx.checked_sub(2)?)? {
                    Segment::Mapping {
                        generated: g,
                        original: o,
                    } => (*g, *o),
                    Segment::Terminator { .. } => return None,
                }
            }
            Segment::Terminator { .. } => return None,
        };

        let (g, o) = anchor;
        let line = o.line + (generated.line - g.line);
        let column = (o.column as i64 + generated.column as i64 - g.column as i64).max(1) as usize;
        Some(Position::new(line, column))
    }
}
