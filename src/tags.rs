use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

const YAML_PREFIX: &str = "tag:yaml.org,2002:";

/// The non-specific tag `!`. A node carrying it has its tag resolved as if untagged.
pub(crate) const NON_SPECIFIC: &str = "!";

/// A node's tag: either copied verbatim from the source or inferred by a
/// [`Resolver`](crate::Resolver).
///
/// Standard tags are kept in their canonical `tag:yaml.org,2002:` form.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(Cow<'static, str>);

impl Tag {
    pub const NULL: Tag = Tag(Cow::Borrowed("tag:yaml.org,2002:null"));
    pub const BOOL: Tag = Tag(Cow::Borrowed("tag:yaml.org,2002:bool"));
    pub const INT: Tag = Tag(Cow::Borrowed("tag:yaml.org,2002:int"));
    pub const FLOAT: Tag = Tag(Cow::Borrowed("tag:yaml.org,2002:float"));
    pub const STR: Tag = Tag(Cow::Borrowed("tag:yaml.org,2002:str"));
    pub const SEQ: Tag = Tag(Cow::Borrowed("tag:yaml.org,2002:seq"));
    pub const MAP: Tag = Tag(Cow::Borrowed("tag:yaml.org,2002:map"));
    /// Key tag asking consumers to splice another mapping's entries in (`<<`).
    pub const MERGE: Tag = Tag(Cow::Borrowed("tag:yaml.org,2002:merge"));

    pub fn new<S: Into<String>>(tag: S) -> Self {
        Tag(Cow::Owned(tag.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for tags in the `tag:yaml.org,2002:` namespace.
    pub fn is_standard(&self) -> bool {
        self.0.starts_with(YAML_PREFIX)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Tag {
    fn from(tag: &str) -> Self {
        Tag::new(tag)
    }
}

impl From<String> for Tag {
    fn from(tag: String) -> Self {
        Tag::new(tag)
    }
}

impl PartialEq<str> for Tag {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Tag {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// True when an explicit tag must be ignored and the node's tag resolved instead.
pub(crate) fn needs_resolution(tag: Option<&str>) -> bool {
    match tag {
        None => true,
        Some(t) => t == NON_SPECIFIC,
    }
}
