//! Public macros for constructing option structs without relying on struct literal syntax.
//!
//! These macros exist to keep call sites ergonomic while allowing the crate to evolve
//! its option structs over time (e.g., adding fields) without forcing breaking changes.

/// Construct [`crate::Options`] from `Default` and a list of field assignments.
///
/// Example:
///
/// ```rust
/// let options = saphyr_composer::options! {
///     strict_booleans: true,
///     legacy_octal_numbers: true,
/// };
/// assert!(options.strict_booleans);
/// ```
#[macro_export]
macro_rules! options {
    ( $( $field:ident : $value:expr ),* $(,)? ) => {{
        let mut opt = $crate::Options::default();
        $(
            #[allow(deprecated)]
            {
                opt.$field = $value;
            }
        )*
        opt
    }};
}

/// Construct `Some(`[`crate::Budget`]`)` from `Default` and a list of field assignments.
///
/// The result plugs directly into [`crate::Options::budget`].
///
/// Example:
///
/// ```rust
/// let budget = saphyr_composer::budget! {
///     max_depth: 64,
///     max_aliases: 10,
/// };
/// assert_eq!(budget.unwrap().max_depth, 64);
/// ```
#[macro_export]
macro_rules! budget {
    ( $( $field:ident : $value:expr ),* $(,)? ) => {{
        let mut budget = $crate::Budget::default();
        $(
            #[allow(deprecated)]
            {
                budget.$field = $value;
            }
        )*
        Some(budget)
    }};
}
