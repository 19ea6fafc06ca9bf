//! Composition budget.
//!
//! A composed document keeps every node in memory, and aliases let a small
//! input describe a large graph. The budget caps the work done per document
//! so that pathological inputs fail early instead of exhausting memory.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Budgets for composing a YAML stream.
///
/// The defaults are intentionally permissive for typical configuration files
/// while stopping obvious resource-amplifying inputs.
///
/// ```rust
/// use saphyr_composer::{compose_str_with_options, Budget, Options};
///
/// let mut options = Options::default();
/// options.budget = Some(Budget {
///     max_depth: 2,
///     ..Budget::default()
/// });
///
/// assert!(compose_str_with_options("a: [1, 2]", options.clone()).is_ok());
/// assert!(compose_str_with_options("a: [[1], 2]", options).is_err());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Budget {
    /// Maximum structural nesting depth (sequences + mappings).
    ///
    /// Default: 2,000
    pub max_depth: usize,
    /// Maximum number of nodes allocated for one document.
    /// Aliases do not allocate and are not counted here.
    ///
    /// Default: 250,000
    pub max_nodes: usize,
    /// Maximum number of alias (`*ref`) events in one document.
    ///
    /// Default: 50,000
    pub max_aliases: usize,
    /// Maximum number of anchor bindings (`&anchor`) in one document.
    ///
    /// Default: 50,000
    pub max_anchors: usize,
    /// Maximum number of documents in the stream.
    ///
    /// Default: 1,024
    pub max_documents: usize,
}

impl Default for Budget {
    fn default() -> Self {
        Self {
            max_depth: 2_000,     // protects the work stack
            max_nodes: 250_000,   // sequences + maps + scalars
            max_aliases: 50_000,  // liberal absolute cap
            max_anchors: 50_000,
            max_documents: 1_024, // doc separator storms
        }
    }
}

/// What tripped the budget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BudgetBreach {
    /// The nesting depth exceeded [`Budget::max_depth`].
    Depth { depth: usize },
    /// The node count of one document exceeded [`Budget::max_nodes`].
    Nodes { nodes: usize },
    /// The alias count of one document exceeded [`Budget::max_aliases`].
    Aliases { aliases: usize },
    /// The anchor count of one document exceeded [`Budget::max_anchors`].
    Anchors { anchors: usize },
    /// The document count exceeded [`Budget::max_documents`].
    Documents { documents: usize },
}

/// Running counters checked against a [`Budget`].
///
/// Depth and node counts are passed in by the composer, which already tracks
/// them; aliases, anchors and documents are counted here.
#[derive(Debug)]
pub(crate) struct BudgetEnforcer {
    budget: Budget,
    documents: usize,
    aliases: usize,
    anchors: usize,
}

impl BudgetEnforcer {
    pub(crate) fn new(budget: Budget) -> Self {
        Self {
            budget,
            documents: 0,
            aliases: 0,
            anchors: 0,
        }
    }

    /// Count a new document and reset the per-document counters.
    pub(crate) fn observe_document(&mut self) -> Result<(), Error> {
        self.aliases = 0;
        self.anchors = 0;
        self.documents += 1;
        if self.documents > self.budget.max_documents {
            return Err(Error::budget(BudgetBreach::Documents {
                documents: self.documents,
            }));
        }
        Ok(())
    }

    pub(crate) fn observe_alias(&mut self) -> Result<(), Error> {
        self.aliases += 1;
        if self.aliases > self.budget.max_aliases {
            return Err(Error::budget(BudgetBreach::Aliases {
                aliases: self.aliases,
            }));
        }
        Ok(())
    }

    pub(crate) fn observe_anchor(&mut self) -> Result<(), Error> {
        self.anchors += 1;
        if self.anchors > self.budget.max_anchors {
            return Err(Error::budget(BudgetBreach::Anchors {
                anchors: self.anchors,
            }));
        }
        Ok(())
    }

    pub(crate) fn check_nodes(&self, nodes: usize) -> Result<(), Error> {
        if nodes > self.budget.max_nodes {
            return Err(Error::budget(BudgetBreach::Nodes { nodes }));
        }
        Ok(())
    }

    pub(crate) fn check_depth(&self, depth: usize) -> Result<(), Error> {
        if depth > self.budget.max_depth {
            return Err(Error::budget(BudgetBreach::Depth { depth }));
        }
        Ok(())
    }
}
