//! Source marks carried by events, nodes and errors.
//!
//! A mark is a point in the input: 1-based line and column, the character
//! offset, and the byte offset when the input was a string. Nodes carry a start
//! and an end mark, so the text of a node is `input[start.byte..end.byte]`.

use saphyr_parser::{Marker, Span as ParserSpan};
use serde::{Deserialize, Serialize};

/// Storage for offsets inside a [`Location`].
///
/// `u32` unless the `huge_documents` feature is enabled; offsets that do not
/// fit are dropped rather than truncated.
#[cfg(not(feature = "huge_documents"))]
pub(crate) type Offset = u32;

#[cfg(feature = "huge_documents")]
pub(crate) type Offset = u64;

/// Point within the source YAML stream.
///
/// Every event, node and error carries marks of this type. Hand-built event
/// streams may use [`Location::new`] or [`Location::UNKNOWN`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// 1-indexed row number in the input stream.
    pub(crate) line: u32,
    /// 1-indexed column number in the input stream.
    pub(crate) column: u32,
    /// Characters before this mark, if known.
    #[serde(default)]
    pub(crate) index: Option<Offset>,
    /// UTF-8 bytes before this mark, if known.
    #[serde(default)]
    pub(crate) byte: Option<Offset>,
}

impl Location {
    /// Sentinel value meaning "location unknown".
    pub const UNKNOWN: Self = Self {
        line: 0,
        column: 0,
        index: None,
        byte: None,
    };

    /// Create a new mark from a 1-indexed line and column.
    pub const fn new(line: usize, column: usize) -> Self {
        Self {
            line: line as u32,
            column: column as u32,
            index: None,
            byte: None,
        }
    }

    #[inline]
    pub fn line(&self) -> u64 {
        self.line as u64
    }

    #[inline]
    pub fn column(&self) -> u64 {
        self.column as u64
    }

    /// Character offset from the start of the input.
    #[inline]
    pub fn index(&self) -> Option<u64> {
        self.index.map(u64::from)
    }

    /// Byte offset from the start of the input. Only set for string input.
    #[inline]
    pub fn byte_offset(&self) -> Option<u64> {
        self.byte.map(u64::from)
    }

    #[inline]
    pub fn is_known(&self) -> bool {
        self != &Location::UNKNOWN
    }
}

fn offset(value: usize) -> Option<Offset> {
    Offset::try_from(value).ok()
}

/// Mark at a parser marker. Parser columns are 0-based.
pub(crate) fn location_from_marker(marker: &Marker) -> Location {
    Location {
        index: offset(marker.index()),
        byte: marker.byte_offset().and_then(offset),
        ..Location::new(marker.line(), marker.col() + 1)
    }
}

/// Start and end marks of a parser span.
pub(crate) fn marks_from_span(span: &ParserSpan) -> (Location, Location) {
    (location_from_marker(&span.start), location_from_marker(&span.end))
}
