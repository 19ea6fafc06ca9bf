//!
//! Live events: an [`EventSource`] over the YAML event stream from `saphyr_parser::Parser`.
//!
//! Responsibilities
//! - Translate parser events into owned [`Event`]s, keeping stream and
//!   document markers (the composer needs them for document boundaries).
//! - Track source locations for diagnostics.
//! - Name anchors. The parser resolves anchor names to numeric ids (0 means
//!   "no anchor"); the decimal id becomes the anchor name. Aliases carry the
//!   id of the latest definition, so redefinitions resolve like names would.
//! - Derive the implicit-tag flags the parser does not report.
//! - Recover the flow/block style of collections from their start spans.
//!
//! Tags
//! - Tags are rendered as handle followed by suffix, so `!!str` becomes
//!   `tag:yaml.org,2002:str`, `!local` stays `!local` and the non-specific
//!   `!` stays `!`.

use std::borrow::Cow;

use saphyr_parser::{Event as RawEvent, Parser, ScalarStyle, Span, StrInput, Tag as RawTag};

use crate::error::Error;
use crate::event::{Event, EventData, EventSource, FlowStyle, ImplicitTuple};
use crate::location::{marks_from_span, Location};
use crate::tags::NON_SPECIFIC;

/// Live event source that wraps `saphyr_parser::Parser` for string input.
pub struct LiveEvents<'a> {
    /// Source text, consulted for collection styles.
    input: &'a str,
    /// Underlying streaming parser that produces raw events from the input.
    parser: Parser<'a, StrInput<'a>>,
    /// Single-item lookahead buffer (peeked event not yet consumed).
    look: Option<Event>,
    /// Location of the last yielded event (for better error reporting).
    last_location: Location,
}

impl<'a> LiveEvents<'a> {
    /// Create a new live event source over YAML text.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            parser: Parser::new_from_str(input),
            look: None,
            last_location: Location::UNKNOWN,
        }
    }

    /// Location of the last event handed out by `next` or `peek`.
    pub fn last_location(&self) -> Location {
        self.last_location
    }

    /// Pulls and translates the next parser event.
    ///
    /// Returns `Ok(None)` on true EOF.
    fn next_impl(&mut self) -> Result<Option<Event>, Error> {
        while let Some(item) = self.parser.next() {
            let (raw, span) = item.map_err(Error::from_scan_error)?;
            let (start, end) = marks_from_span(&span);

            let data = match raw {
                RawEvent::Nothing => continue,
                RawEvent::StreamStart => EventData::StreamStart,
                RawEvent::StreamEnd => EventData::StreamEnd,
                RawEvent::DocumentStart(explicit) => EventData::DocumentStart { explicit },
                RawEvent::DocumentEnd => EventData::DocumentEnd,
                RawEvent::Alias(anchor_id) => EventData::Alias {
                    anchor: anchor_id.to_string(),
                },
                RawEvent::Scalar(value, style, anchor_id, tag) => {
                    let tag = tag.map(render_tag);
                    let implicit = scalar_implicit(tag.as_deref(), style);
                    EventData::Scalar {
                        anchor: anchor_name(anchor_id),
                        tag,
                        value: value.into_owned(),
                        style,
                        implicit,
                    }
                }
                RawEvent::SequenceStart(anchor_id, tag) => {
                    let tag = tag.map(render_tag);
                    EventData::SequenceStart {
                        anchor: anchor_name(anchor_id),
                        implicit: collection_implicit(tag.as_deref()),
                        tag,
                        flow_style: detect_flow_style(self.input, &span, '['),
                    }
                }
                RawEvent::SequenceEnd => EventData::SequenceEnd,
                RawEvent::MappingStart(anchor_id, tag) => {
                    let tag = tag.map(render_tag);
                    EventData::MappingStart {
                        anchor: anchor_name(anchor_id),
                        implicit: collection_implicit(tag.as_deref()),
                        tag,
                        flow_style: detect_flow_style(self.input, &span, '{'),
                    }
                }
                RawEvent::MappingEnd => EventData::MappingEnd,
            };
            return Ok(Some(Event { data, start, end }));
        }

        Ok(None)
    }
}

impl<'a> EventSource for LiveEvents<'a> {
    /// Peek at the next event without consuming it, filling the lookahead buffer if empty.
    fn peek(&mut self) -> Result<Option<&Event>, Error> {
        if self.look.is_none() {
            self.look = self.next_impl()?;
        }
        if let Some(ev) = &self.look {
            self.last_location = ev.start;
        }
        Ok(self.look.as_ref())
    }

    /// Get the next event, using the lookahead buffer if present.
    fn next(&mut self) -> Result<Option<Event>, Error> {
        let ev = match self.look.take() {
            Some(ev) => Some(ev),
            None => self.next_impl()?,
        };
        if let Some(ev) = &ev {
            self.last_location = ev.start;
        }
        Ok(ev)
    }
}

fn anchor_name(anchor_id: usize) -> Option<String> {
    (anchor_id != 0).then(|| anchor_id.to_string())
}

fn render_tag(tag: Cow<'_, RawTag>) -> String {
    format!("{}{}", tag.handle, tag.suffix)
}

/// Plain scalars may drop their tag when untagged or tagged `!`; other styles only when untagged.
fn scalar_implicit(tag: Option<&str>, style: ScalarStyle) -> ImplicitTuple {
    let plain = matches!(style, ScalarStyle::Plain);
    ImplicitTuple::new(
        (tag.is_none() && plain) || tag == Some(NON_SPECIFIC),
        tag.is_none() && !plain,
    )
}

fn collection_implicit(tag: Option<&str>) -> bool {
    tag.is_none() || tag == Some(NON_SPECIFIC)
}

/// The parser gives a block collection start an empty span and a flow
/// collection start the span of its opening bracket.
fn detect_flow_style(input: &str, span: &Span, bracket: char) -> FlowStyle {
    if span.is_empty() {
        return FlowStyle::Block;
    }
    match span.start.byte_offset().and_then(|offset| input.get(offset..)) {
        Some(rest) if rest.starts_with(bracket) => FlowStyle::Flow,
        Some(_) => FlowStyle::Block,
        None => FlowStyle::Auto,
    }
}
