//! Tag inference.
//!
//! The composer asks a [`Resolver`] for the tag of every node that has no
//! explicit tag (or carries the non-specific `!`). [`CoreResolver`] implements
//! the YAML 1.2 core schema plus the `<<` merge key.

use crate::node::NodeKind;
use crate::options::Options;
use crate::parse_scalars::{is_int, is_yaml12_bool, is_yaml12_float, is_yaml12_null, parse_yaml11_bool};
use crate::tags::Tag;

/// Infers a tag from node kind and content.
///
/// `value` is the scalar text for scalars and `None` for collections.
/// `implicit` tells whether the tag may be inferred from content; when false
/// a scalar must resolve to its default (string) tag. Implementations should
/// be pure.
pub trait Resolver {
    fn resolve(&self, kind: NodeKind, value: Option<&str>, implicit: bool) -> Tag;
}

impl<R: Resolver + ?Sized> Resolver for &R {
    fn resolve(&self, kind: NodeKind, value: Option<&str>, implicit: bool) -> Tag {
        (**self).resolve(kind, value, implicit)
    }
}

/// YAML 1.2 core-schema resolver.
#[derive(Clone, Copy, Debug, Default)]
pub struct CoreResolver {
    /// Only `true`/`false` in their core-schema spellings are booleans.
    pub strict_booleans: bool,
    /// `0755` style numbers are octal integers.
    pub legacy_octal_numbers: bool,
}

impl CoreResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_options(options: &Options) -> Self {
        Self {
            strict_booleans: options.strict_booleans,
            legacy_octal_numbers: options.legacy_octal_numbers,
        }
    }

    fn resolve_plain(&self, value: &str) -> Tag {
        if value == "<<" {
            Tag::MERGE
        } else if is_yaml12_null(value) {
            Tag::NULL
        } else if is_yaml12_bool(value) || (!self.strict_booleans && parse_yaml11_bool(value).is_ok()) {
            Tag::BOOL
        } else if is_int(value, self.legacy_octal_numbers) {
            Tag::INT
        } else if is_yaml12_float(value) {
            Tag::FLOAT
        } else {
            Tag::STR
        }
    }
}

impl Resolver for CoreResolver {
    fn resolve(&self, kind: NodeKind, value: Option<&str>, implicit: bool) -> Tag {
        match kind {
            NodeKind::Sequence => Tag::SEQ,
            NodeKind::Mapping => Tag::MAP,
            NodeKind::Scalar => match value {
                Some(v) if implicit => self.resolve_plain(v),
                _ => Tag::STR,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(resolver: &CoreResolver, value: &str) -> Tag {
        resolver.resolve(NodeKind::Scalar, Some(value), true)
    }

    #[test]
    fn plain_scalars_follow_the_core_schema() {
        let r = CoreResolver::new();
        assert_eq!(plain(&r, "~"), Tag::NULL);
        assert_eq!(plain(&r, ""), Tag::NULL);
        assert_eq!(plain(&r, "True"), Tag::BOOL);
        assert_eq!(plain(&r, "-42"), Tag::INT);
        assert_eq!(plain(&r, "0x2A"), Tag::INT);
        assert_eq!(plain(&r, "6.02e23"), Tag::FLOAT);
        assert_eq!(plain(&r, "-.inf"), Tag::FLOAT);
        assert_eq!(plain(&r, "<<"), Tag::MERGE);
        assert_eq!(plain(&r, "hello"), Tag::STR);
    }

    #[test]
    fn non_implicit_scalars_are_strings() {
        let r = CoreResolver::new();
        assert_eq!(r.resolve(NodeKind::Scalar, Some("42"), false), Tag::STR);
        assert_eq!(r.resolve(NodeKind::Scalar, Some("<<"), false), Tag::STR);
    }

    #[test]
    fn collections_ignore_implicit() {
        let r = CoreResolver::new();
        assert_eq!(r.resolve(NodeKind::Sequence, None, false), Tag::SEQ);
        assert_eq!(r.resolve(NodeKind::Mapping, None, true), Tag::MAP);
    }

    #[test]
    fn yaml11_booleans_are_optional() {
        let lenient = CoreResolver::new();
        assert_eq!(plain(&lenient, "yes"), Tag::BOOL);
        assert_eq!(plain(&lenient, "Off"), Tag::BOOL);

        let strict = CoreResolver {
            strict_booleans: true,
            ..CoreResolver::default()
        };
        assert_eq!(plain(&strict, "yes"), Tag::STR);
        assert_eq!(plain(&strict, "false"), Tag::BOOL);
    }

    #[test]
    fn legacy_octal_rejects_non_octal_digits() {
        let legacy = CoreResolver::from_options(&crate::options! { legacy_octal_numbers: true });
        assert_eq!(plain(&legacy, "0755"), Tag::INT);
        assert_ne!(plain(&legacy, "0789"), Tag::INT);
    }
}
