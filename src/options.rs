use crate::budget::Budget;
use serde::{Deserialize, Serialize};

/// Composer configuration options.
///
/// Use this to configure an optional composition [`Budget`] and how the
/// built-in [`CoreResolver`](crate::CoreResolver) infers tags for plain scalars.
///
/// Example: compose a small document using custom `Options`.
///
/// ```rust
/// use saphyr_composer::{compose_str_with_options, Tag};
///
/// let options = saphyr_composer::options! {
///     budget: saphyr_composer::budget! {
///         max_documents: 2,
///     },
///     strict_booleans: true,
/// };
///
/// let doc = compose_str_with_options("enabled: yes", options).unwrap().unwrap();
/// let (_, value) = doc[doc.root()].pairs().unwrap()[0];
/// assert_eq!(doc[value].tag, Tag::STR);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Optional budget enforced while composing.
    pub budget: Option<Budget>,
    /// If true, resolve only the exact core-schema literals `true`/`True`/`TRUE`
    /// and `false`/`False`/`FALSE` as booleans.
    /// YAML 1.1 forms like `yes`/`no`/`on`/`off` then resolve to strings.
    /// Default: false (accept YAML 1.1 boolean forms).
    pub strict_booleans: bool,
    /// Resolve values with a leading `0` followed by octal digits (`0755`) as
    /// integers. They are deprecated in YAML 1.2. Default: false.
    pub legacy_octal_numbers: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            budget: Some(Budget::default()),
            strict_booleans: false,
            legacy_octal_numbers: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_carry_a_budget() {
        let options = Options::default();
        assert!(options.budget.is_some());
        assert!(!options.strict_booleans);
        assert!(!options.legacy_octal_numbers);
    }
}
