//! Events consumed by the composer and the `EventSource` seam.
//!
//! Events mirror the YAML event grammar: stream and document boundaries,
//! scalars, aliases, and the start/end pairs of sequences and mappings.
//! Starts and ends nest like matched brackets; the composer relies on the
//! producer for this and does not re-validate it.

use std::collections::VecDeque;

pub use saphyr_parser::ScalarStyle;

use crate::error::Error;
use crate::location::Location;

/// Collection presentation style.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum FlowStyle {
    /// `[a, b]` / `{a: b}`
    Flow,
    /// Indentation based.
    Block,
    /// The producer did not say.
    #[default]
    Auto,
}

/// Whether a scalar's tag may be omitted, by presentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ImplicitTuple {
    /// The tag may be omitted when the scalar is written plain.
    pub plain: bool,
    /// The tag may be omitted when the scalar is written in any non-plain style.
    pub quoted: bool,
}

impl ImplicitTuple {
    pub const fn new(plain: bool, quoted: bool) -> Self {
        Self { plain, quoted }
    }

    /// The flag handed to the resolver for scalars.
    pub fn can_omit_tag_in_plain_scalar(&self) -> bool {
        self.plain
    }
}

/// Discriminant of [`EventData`], for lookahead checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    StreamStart,
    StreamEnd,
    DocumentStart,
    DocumentEnd,
    Alias,
    Scalar,
    SequenceStart,
    SequenceEnd,
    MappingStart,
    MappingEnd,
}

/// Payload of an event.
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    StreamStart,
    StreamEnd,
    DocumentStart {
        /// `---` was present in the source.
        explicit: bool,
    },
    DocumentEnd,
    Alias {
        anchor: String,
    },
    Scalar {
        anchor: Option<String>,
        tag: Option<String>,
        value: String,
        style: ScalarStyle,
        implicit: ImplicitTuple,
    },
    SequenceStart {
        anchor: Option<String>,
        tag: Option<String>,
        implicit: bool,
        flow_style: FlowStyle,
    },
    SequenceEnd,
    MappingStart {
        anchor: Option<String>,
        tag: Option<String>,
        implicit: bool,
        flow_style: FlowStyle,
    },
    MappingEnd,
}

/// One event with its source marks.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub data: EventData,
    pub start: Location,
    pub end: Location,
}

impl Event {
    /// An event without source marks.
    pub fn new(data: EventData) -> Self {
        Self {
            data,
            start: Location::UNKNOWN,
            end: Location::UNKNOWN,
        }
    }

    pub fn with_marks(mut self, start: Location, end: Location) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    pub fn kind(&self) -> EventKind {
        match &self.data {
            EventData::StreamStart => EventKind::StreamStart,
            EventData::StreamEnd => EventKind::StreamEnd,
            EventData::DocumentStart { .. } => EventKind::DocumentStart,
            EventData::DocumentEnd => EventKind::DocumentEnd,
            EventData::Alias { .. } => EventKind::Alias,
            EventData::Scalar { .. } => EventKind::Scalar,
            EventData::SequenceStart { .. } => EventKind::SequenceStart,
            EventData::SequenceEnd => EventKind::SequenceEnd,
            EventData::MappingStart { .. } => EventKind::MappingStart,
            EventData::MappingEnd => EventKind::MappingEnd,
        }
    }
}

/// Ordered source of events with one-event lookahead.
///
/// `Ok(None)` means the source is exhausted.
pub trait EventSource {
    /// Look at the next event without consuming it.
    fn peek(&mut self) -> Result<Option<&Event>, Error>;

    /// Consume and return the next event.
    fn next(&mut self) -> Result<Option<Event>, Error>;

    /// True if the next event exists and is of the given kind.
    fn is_next_kind(&mut self, kind: EventKind) -> Result<bool, Error> {
        Ok(self.peek()?.is_some_and(|ev| ev.kind() == kind))
    }
}

impl<S: EventSource + ?Sized> EventSource for &mut S {
    fn peek(&mut self) -> Result<Option<&Event>, Error> {
        (**self).peek()
    }

    fn next(&mut self) -> Result<Option<Event>, Error> {
        (**self).next()
    }
}

/// In-memory event source over a pre-recorded list of events.
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    events: VecDeque<Event>,
}

impl EventQueue {
    pub fn new<I: IntoIterator<Item = Event>>(events: I) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn push(&mut self, event: Event) {
        self.events.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl FromIterator<Event> for EventQueue {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        EventQueue::new(iter)
    }
}

impl FromIterator<EventData> for EventQueue {
    fn from_iter<I: IntoIterator<Item = EventData>>(iter: I) -> Self {
        EventQueue::new(iter.into_iter().map(Event::new))
    }
}

impl EventSource for EventQueue {
    fn peek(&mut self) -> Result<Option<&Event>, Error> {
        Ok(self.events.front())
    }

    fn next(&mut self) -> Result<Option<Event>, Error> {
        Ok(self.events.pop_front())
    }
}
