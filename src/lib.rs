//! YAML composer over `saphyr-parser` events.
//!
//! The composer turns the parser's event stream into one node graph per
//! document. Anchored nodes are shared: every alias refers to the same
//! [`NodeId`], and a node that contains an alias to itself (directly or through
//! descendants) is flagged [`Node::recursive`]. Untagged nodes get their tag
//! from a [`Resolver`]; [`CoreResolver`] implements the YAML 1.2 core schema.
//!
//! ```rust
//! use saphyr_composer::{compose_str, Tag};
//!
//! let doc = compose_str("base: &b [1, 2]\ncopy: *b\n").unwrap().unwrap();
//! let pairs = doc[doc.root()].pairs().unwrap();
//! assert_eq!(pairs[0].1, pairs[1].1); // the same node, not a copy
//! assert_eq!(doc[pairs[0].1].tag, Tag::SEQ);
//! ```

pub use budget::{Budget, BudgetBreach};
pub use composer::Composer;
pub use error::Error;
pub use event::{Event, EventData, EventKind, EventQueue, EventSource, FlowStyle, ImplicitTuple, ScalarStyle};
pub use live_events::LiveEvents;
pub use location::Location;
pub use node::{Document, Node, NodeData, NodeId, NodeKind};
pub use options::Options;
pub use resolver::{CoreResolver, Resolver};
pub use tags::Tag;

pub mod budget;
mod composer;
mod error;
pub mod event;
mod live_events;
mod location;
mod macros;
pub mod node;
pub mod options;
mod parse_scalars;
mod resolver;
mod tags;

/// Compose a stream that must contain at most one document.
///
/// Returns `Ok(None)` for an empty stream and [`Error::MultipleDocuments`] if
/// the stream holds more than one document.
pub fn compose_str(input: &str) -> Result<Option<Document>, Error> {
    compose_str_with_options(input, Options::default())
}

/// [`compose_str`] with explicit [`Options`].
pub fn compose_str_with_options(input: &str, options: Options) -> Result<Option<Document>, Error> {
    let resolver = CoreResolver::from_options(&options);
    Composer::with_options(LiveEvents::new(input), resolver, options).single_document()
}

/// Compose every document of a stream, in order.
pub fn compose_all_str(input: &str) -> Result<Vec<Document>, Error> {
    compose_all_str_with_options(input, Options::default())
}

/// [`compose_all_str`] with explicit [`Options`].
pub fn compose_all_str_with_options(input: &str, options: Options) -> Result<Vec<Document>, Error> {
    let resolver = CoreResolver::from_options(&options);
    Composer::with_options(LiveEvents::new(input), resolver, options).collect()
}
