//! Defines the composer error and its location
use std::fmt;

use saphyr_parser::ScanError;

use crate::budget::BudgetBreach;
use crate::location::{location_from_marker, Location};

/// Error produced while composing a document.
///
/// Every variant aborts composition of the current document. Nodes allocated so
/// far are dropped together with the document's anchor table.
#[derive(Debug)]
pub enum Error {
    /// An alias names an anchor that has no binding in the current document.
    UndefinedAlias {
        anchor: String,
        location: Location,
    },
    /// The single-document API found a second document in the stream.
    MultipleDocuments {
        /// Start mark of the first document's root node.
        first: Location,
        /// Start mark of the second document-start event.
        second: Location,
    },
    /// The event producer failed to scan the input.
    Scan {
        msg: String,
        location: Location,
    },
    /// The event source ran out where an event was required.
    Eof {
        location: Location,
    },
    /// Something else than the expected event was seen.
    Unexpected {
        expected: &'static str,
        location: Location,
    },
    /// A composition budget limit was exceeded.
    Budget {
        breach: BudgetBreach,
        location: Location,
    },
}

impl Error {
    /// Construct an `UndefinedAlias` error for the given anchor name (unknown location).
    pub(crate) fn undefined_alias<S: Into<String>>(anchor: S) -> Self {
        Error::UndefinedAlias {
            anchor: anchor.into(),
            location: Location::UNKNOWN,
        }
    }

    /// Convenience for an `Unexpected` error pre-filled with a human phrase.
    ///
    /// Arguments:
    /// - `what`: short description like "document start".
    pub(crate) fn unexpected(what: &'static str) -> Self {
        Error::Unexpected {
            expected: what,
            location: Location::UNKNOWN,
        }
    }

    /// Construct an unexpected end-of-events error with unknown location.
    pub(crate) fn eof() -> Self {
        Error::Eof {
            location: Location::UNKNOWN,
        }
    }

    pub(crate) fn budget(breach: BudgetBreach) -> Self {
        Error::Budget {
            breach,
            location: Location::UNKNOWN,
        }
    }

    /// Attach/override a concrete location to this error and return it.
    ///
    /// `MultipleDocuments` carries two marks of its own and is returned unchanged.
    pub(crate) fn with_location(mut self, set_location: Location) -> Self {
        match &mut self {
            Error::UndefinedAlias { location, .. }
            | Error::Scan { location, .. }
            | Error::Eof { location }
            | Error::Unexpected { location, .. }
            | Error::Budget { location, .. } => {
                *location = set_location;
            }
            Error::MultipleDocuments { .. } => {}
        }
        self
    }

    /// If the error has a known location, return it.
    ///
    /// For `MultipleDocuments` this is the start of the second document.
    pub fn location(&self) -> Option<Location> {
        let location = match self {
            Error::UndefinedAlias { location, .. }
            | Error::Scan { location, .. }
            | Error::Eof { location }
            | Error::Unexpected { location, .. }
            | Error::Budget { location, .. } => location,
            Error::MultipleDocuments { second, .. } => second,
        };
        if location.is_known() {
            Some(*location)
        } else {
            None
        }
    }

    /// Map a `saphyr_parser::ScanError` into our error type with location.
    ///
    /// Called by:
    /// - The live events adapter when the underlying parser fails.
    pub(crate) fn from_scan_error(err: ScanError) -> Self {
        Error::Scan {
            msg: err.info().to_owned(),
            location: location_from_marker(err.marker()),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UndefinedAlias { anchor, location } => {
                fmt_with_location(f, &format!("found undefined alias {anchor}"), location)
            }
            Error::MultipleDocuments { first, second } => {
                fmt_with_location(f, "expected a single document in the stream", first)?;
                f.write_str("; ")?;
                fmt_with_location(f, "but found another document", second)
            }
            Error::Scan { msg, location } => fmt_with_location(f, msg, location),
            Error::Eof { location } => fmt_with_location(f, "unexpected end of events", location),
            Error::Unexpected { expected, location } => {
                fmt_with_location(f, &format!("unexpected event: expected {expected}"), location)
            }
            Error::Budget { breach, location } => {
                fmt_with_location(f, &format!("YAML budget breached: {breach:?}"), location)
            }
        }
    }
}

impl std::error::Error for Error {}

/// Print a message optionally suffixed with "at line X, column Y".
fn fmt_with_location(f: &mut fmt::Formatter<'_>, msg: &str, location: &Location) -> fmt::Result {
    if location.is_known() {
        write!(f, "{msg} at line {}, column {}", location.line, location.column)
    } else {
        write!(f, "{msg}")
    }
}
