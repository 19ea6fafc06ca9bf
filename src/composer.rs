//! Composer: builds one node graph per YAML document from an event stream.
//!
//! Anchors and aliases
//! - An anchored node is bound in the document's anchor table as soon as it is
//!   allocated, before any of its children, so a child may alias its container.
//! - A later binding of the same name silently replaces the earlier one.
//! - An alias resolves to the bound [`NodeId`] itself; nothing is copied.
//!
//! Recursion detection
//! - `in_progress` holds the containers on the active path from the root to the
//!   node being filled in. A parent enters the set when one of its children
//!   starts composing and leaves it when that child is done.
//! - An alias to a member of the set proves a cycle: the target leaves the set
//!   and is flagged `recursive`.
//!
//! Composition runs on an explicit stack of open containers, so deeply nested
//! documents are bounded by the budget rather than by the call stack.
//!
//! Document boundaries
//! - The anchor table, the in-progress set and the node arena are cleared
//!   after every document, and after every error.

use ahash::{AHashMap, AHashSet};
use log::{debug, trace};
use smallvec::SmallVec;

use crate::budget::BudgetEnforcer;
use crate::error::Error;
use crate::event::{Event, EventData, EventKind, EventSource};
use crate::location::Location;
use crate::node::{Document, Node, NodeData, NodeId, NodeKind};
use crate::options::Options;
use crate::tags::{needs_resolution, Tag};
use crate::resolver::Resolver;

/// A container whose closing event has not been seen yet.
#[derive(Debug)]
struct OpenNode {
    id: NodeId,
    /// Key of the pair being composed; `None` for sequences and between pairs.
    pending_key: Option<NodeId>,
    end: EventKind,
}

/// Outcome of starting one node.
enum Started {
    /// Scalar or alias: complete on return.
    Complete(NodeId),
    /// Sequence or mapping: children follow.
    Open(OpenNode),
}

/// Pull-based composer: one [`Document`] per call to
/// [`next_document`](Composer::next_document).
///
/// A composer that returned an error must not be used for further documents;
/// as an [`Iterator`] it stops after the first error.
pub struct Composer<S, R> {
    events: S,
    resolver: R,
    /// Anchor name to node, for the current document only.
    anchors: AHashMap<String, NodeId>,
    /// Containers currently being composed (see module docs).
    in_progress: AHashSet<NodeId>,
    /// Arena of the document being composed.
    nodes: Vec<Node>,
    budget: Option<BudgetEnforcer>,
    failed: bool,
}

impl<S: EventSource, R: Resolver> Composer<S, R> {
    pub fn new(events: S, resolver: R) -> Self {
        Self::with_options(events, resolver, Options::default())
    }

    /// Create a composer that enforces `options.budget`.
    ///
    /// Resolver settings in `options` are not applied here; build the resolver
    /// with [`CoreResolver::from_options`](crate::CoreResolver::from_options).
    pub fn with_options(events: S, resolver: R, options: Options) -> Self {
        Self {
            events,
            resolver,
            anchors: AHashMap::new(),
            in_progress: AHashSet::new(),
            nodes: Vec::new(),
            budget: options.budget.map(BudgetEnforcer::new),
            failed: false,
        }
    }

    /// Give back the event source.
    pub fn into_events(self) -> S {
        self.events
    }

    /// Checks if further documents are available.
    ///
    /// Drops a leading stream-start event. An exhausted source has no more documents.
    pub fn has_more_documents(&mut self) -> Result<bool, Error> {
        if self.events.is_next_kind(EventKind::StreamStart)? {
            self.events.next()?;
        }
        Ok(!self.at_stream_end()?)
    }

    /// Reads and composes the next document.
    ///
    /// Returns `Ok(None)` when no more documents are available.
    pub fn next_document(&mut self) -> Result<Option<Document>, Error> {
        let result = match self.has_more_documents() {
            Ok(false) => return Ok(None),
            Ok(true) => self.compose_document().map(Some),
            Err(err) => Err(err),
        };
        self.reset_document();
        if result.is_err() {
            self.failed = true;
        }
        result
    }

    /// Reads a document from a stream that must contain at most one document.
    ///
    /// Returns `Ok(None)` for an empty stream, and
    /// [`Error::MultipleDocuments`] if a second document follows the first.
    pub fn single_document(&mut self) -> Result<Option<Document>, Error> {
        if self.events.is_next_kind(EventKind::StreamStart)? {
            self.events.next()?;
        }
        let document = if self.at_stream_end()? {
            None
        } else {
            self.next_document()?
        };
        if !self.at_stream_end()? {
            let event = self.next_event()?;
            let first = document
                .as_ref()
                .map(|doc| doc.root_node().start)
                .unwrap_or(Location::UNKNOWN);
            self.failed = true;
            return Err(Error::MultipleDocuments {
                first,
                second: event.start,
            });
        }
        // Drop the STREAM-END event.
        self.events.next()?;
        Ok(document)
    }

    fn at_stream_end(&mut self) -> Result<bool, Error> {
        Ok(match self.events.peek()? {
            None => true,
            Some(ev) => ev.kind() == EventKind::StreamEnd,
        })
    }

    fn next_event(&mut self) -> Result<Event, Error> {
        match self.events.next()? {
            Some(ev) => Ok(ev),
            None => Err(Error::eof().with_location(self.last_start())),
        }
    }

    /// Consume an event of the given kind.
    fn expect(&mut self, kind: EventKind, expected: &'static str) -> Result<Event, Error> {
        let ev = self.next_event()?;
        if ev.kind() != kind {
            return Err(Error::unexpected(expected).with_location(ev.start));
        }
        Ok(ev)
    }

    /// Start mark of the most recently allocated node, for errors without an event.
    fn last_start(&self) -> Location {
        self.nodes.last().map(|node| node.start).unwrap_or(Location::UNKNOWN)
    }

    fn compose_document(&mut self) -> Result<Document, Error> {
        let start = self.expect(EventKind::DocumentStart, "document start")?;
        if let Some(budget) = self.budget.as_mut() {
            budget.observe_document().map_err(|err| err.with_location(start.start))?;
        }
        let explicit_start = matches!(start.data, EventData::DocumentStart { explicit: true });
        debug!(
            "composing document at line {}, column {}",
            start.start.line(),
            start.start.column()
        );

        let root = self.compose_node()?;
        self.expect(EventKind::DocumentEnd, "document end")?;

        let nodes = std::mem::take(&mut self.nodes);
        debug!("composed document with {} nodes", nodes.len());
        Ok(Document {
            nodes,
            root,
            explicit_start,
        })
    }

    /// Drop all document-scoped state.
    fn reset_document(&mut self) {
        self.anchors.clear();
        self.in_progress.clear();
        self.nodes.clear();
    }

    /// Compose the node starting at the next event, including all its children.
    fn compose_node(&mut self) -> Result<NodeId, Error> {
        let mut stack: SmallVec<[OpenNode; 16]> = SmallVec::new();
        loop {
            if let Some(top) = stack.last() {
                let (id, end) = (top.id, top.end);
                if self.events.is_next_kind(end)? {
                    let ev = self.next_event()?;
                    if stack.last().is_some_and(|open| open.pending_key.is_some()) {
                        return Err(Error::unexpected("mapping value").with_location(ev.start));
                    }
                    stack.pop();
                    self.nodes[id.0].end = ev.end;
                    self.in_progress.remove(&id);
                    match stack.last_mut() {
                        None => return Ok(id),
                        Some(parent) => {
                            self.in_progress.remove(&parent.id);
                            self.attach(parent, id);
                        }
                    }
                    continue;
                }
            }

            let parent = stack.last().map(|open| open.id);
            if let Some(parent) = parent {
                self.in_progress.insert(parent);
            }
            match self.start_node()? {
                Started::Complete(id) => {
                    let Some(open) = stack.last_mut() else {
                        return Ok(id);
                    };
                    self.in_progress.remove(&open.id);
                    self.attach(open, id);
                }
                Started::Open(open) => {
                    if let Some(budget) = self.budget.as_ref() {
                        budget
                            .check_depth(stack.len() + 1)
                            .map_err(|err| err.with_location(self.nodes[open.id.0].start))?;
                    }
                    self.in_progress.insert(open.id);
                    stack.push(open);
                }
            }
        }
    }

    /// Add a finished child to its container.
    fn attach(&mut self, parent: &mut OpenNode, child: NodeId) {
        let key_is_merge = self.nodes[child.0].tag == Tag::MERGE;
        match &mut self.nodes[parent.id.0].data {
            NodeData::Sequence { children, .. } => children.push(child),
            NodeData::Mapping { pairs, merged, .. } => match parent.pending_key.take() {
                None => {
                    if key_is_merge {
                        *merged = true;
                    }
                    parent.pending_key = Some(child);
                }
                Some(key) => pairs.push((key, child)),
            },
            NodeData::Scalar { .. } => {}
        }
    }

    /// Consume the event that starts the next node.
    fn start_node(&mut self) -> Result<Started, Error> {
        let ev = self.next_event()?;
        let Event { data, start, end } = ev;
        match data {
            EventData::Alias { anchor } => self.resolve_alias(anchor, start).map(Started::Complete),
            EventData::Scalar {
                anchor,
                tag,
                value,
                style,
                implicit,
            } => {
                let (tag, resolved) = match tag {
                    Some(tag) if !needs_resolution(Some(tag.as_str())) => (Tag::new(tag), false),
                    _ => (
                        self.resolver.resolve(
                            NodeKind::Scalar,
                            Some(&value),
                            implicit.can_omit_tag_in_plain_scalar(),
                        ),
                        true,
                    ),
                };
                let node = Node::new(tag, resolved, start, end, NodeData::Scalar { value, style });
                let id = self.allocate(node, anchor)?;
                Ok(Started::Complete(id))
            }
            EventData::SequenceStart {
                anchor,
                tag,
                implicit,
                flow_style,
            } => {
                let (tag, resolved) = self.collection_tag(NodeKind::Sequence, tag, implicit);
                let data = NodeData::Sequence {
                    children: Vec::new(),
                    flow_style,
                };
                let id = self.allocate(Node::new(tag, resolved, start, end, data), anchor)?;
                Ok(Started::Open(OpenNode {
                    id,
                    pending_key: None,
                    end: EventKind::SequenceEnd,
                }))
            }
            EventData::MappingStart {
                anchor,
                tag,
                implicit,
                flow_style,
            } => {
                let (tag, resolved) = self.collection_tag(NodeKind::Mapping, tag, implicit);
                let data = NodeData::Mapping {
                    pairs: Vec::new(),
                    flow_style,
                    merged: false,
                };
                let id = self.allocate(Node::new(tag, resolved, start, end, data), anchor)?;
                Ok(Started::Open(OpenNode {
                    id,
                    pending_key: None,
                    end: EventKind::MappingEnd,
                }))
            }
            EventData::StreamStart
            | EventData::StreamEnd
            | EventData::DocumentStart { .. }
            | EventData::DocumentEnd
            | EventData::SequenceEnd
            | EventData::MappingEnd => Err(Error::unexpected("node").with_location(start)),
        }
    }

    fn collection_tag(&self, kind: NodeKind, tag: Option<String>, implicit: bool) -> (Tag, bool) {
        match tag {
            Some(tag) if !needs_resolution(Some(tag.as_str())) => (Tag::new(tag), false),
            _ => (self.resolver.resolve(kind, None, implicit), true),
        }
    }

    fn resolve_alias(&mut self, anchor: String, location: Location) -> Result<NodeId, Error> {
        if let Some(budget) = self.budget.as_mut() {
            budget.observe_alias().map_err(|err| err.with_location(location))?;
        }
        let Some(&id) = self.anchors.get(&anchor) else {
            return Err(Error::undefined_alias(anchor).with_location(location));
        };
        if self.in_progress.remove(&id) {
            debug!(
                "alias *{anchor} at line {}, column {} refers to its own ancestor",
                location.line(),
                location.column()
            );
            self.nodes[id.0].recursive = true;
        }
        trace!("alias *{anchor} resolved to node {}", id.0);
        Ok(id)
    }

    /// Put a node in the arena and bind its anchor, if any.
    fn allocate(&mut self, node: Node, anchor: Option<String>) -> Result<NodeId, Error> {
        let start = node.start;
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        if let Some(budget) = self.budget.as_mut() {
            budget
                .check_nodes(self.nodes.len())
                .map_err(|err| err.with_location(start))?;
        }
        if let Some(anchor) = anchor {
            if let Some(budget) = self.budget.as_mut() {
                budget.observe_anchor().map_err(|err| err.with_location(start))?;
            }
            trace!("anchor &{anchor} bound to node {}", id.0);
            // A redefinition within the document replaces the earlier binding.
            self.anchors.insert(anchor, id);
        }
        Ok(id)
    }
}

impl<S: EventSource, R: Resolver> Iterator for Composer<S, R> {
    type Item = Result<Document, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        self.next_document().transpose()
    }
}
