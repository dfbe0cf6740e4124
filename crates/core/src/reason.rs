//! Selection rationale: why resolution chose a particular version.
//!
//! A reason is an accumulated history of descriptors. Resolution appends
//! one descriptor per decision as it walks candidate paths, so the
//! history lives in a [`PersistentList`]: overlapping branches share
//! their common prefix instead of copying it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::list::PersistentList;

/// The cause attached to a single selection decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectionCause {
    /// The root component of the resolved graph.
    Root,
    /// The version was requested directly in a dependency declaration.
    Requested,
    /// A resolution rule picked this version.
    SelectedByRule,
    /// Conflict resolution between competing requested versions.
    ConflictResolution,
    /// The version was forced.
    Forced,
    /// A dependency constraint contributed this version.
    Constraint,
    /// A candidate was rejected on the way to this version.
    Rejection,
    /// Substituted by an included build.
    Composite,
    /// Version inherited from an ancestor node.
    ByAncestor,
}

impl SelectionCause {
    /// Canonical description used when a descriptor carries no custom text.
    pub fn default_description(self) -> &'static str {
        match self {
            SelectionCause::Root => "root",
            SelectionCause::Requested => "requested",
            SelectionCause::SelectedByRule => "selected by rule",
            SelectionCause::ConflictResolution => "conflict resolution",
            SelectionCause::Forced => "forced",
            SelectionCause::Constraint => "constraint",
            SelectionCause::Rejection => "rejection",
            SelectionCause::Composite => "composite build substitution",
            SelectionCause::ByAncestor => "by ancestor",
        }
    }
}

/// One cause plus its (possibly customized) human-readable description.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectionDescriptor {
    /// The cause of this decision.
    pub cause: SelectionCause,
    /// Custom text overriding the cause's default description.
    /// `None` means the default applies; this distinction survives
    /// persistence.
    pub custom_description: Option<String>,
}

impl SelectionDescriptor {
    /// A descriptor carrying the cause's default description.
    pub fn of(cause: SelectionCause) -> Self {
        SelectionDescriptor {
            cause,
            custom_description: None,
        }
    }

    /// A descriptor with custom text.
    pub fn with_description(cause: SelectionCause, description: impl Into<String>) -> Self {
        SelectionDescriptor {
            cause,
            custom_description: Some(description.into()),
        }
    }

    /// The effective description: custom text when present, otherwise the
    /// cause's default.
    pub fn description(&self) -> &str {
        self.custom_description
            .as_deref()
            .unwrap_or_else(|| self.cause.default_description())
    }
}

impl fmt::Display for SelectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Accumulated selection rationale for one resolved component.
///
/// Descriptors traverse most-recent-first, matching the underlying list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SelectionReason {
    descriptors: PersistentList<SelectionDescriptor>,
}

impl SelectionReason {
    /// A reason with no descriptors yet.
    pub fn empty() -> Self {
        SelectionReason {
            descriptors: PersistentList::empty(),
        }
    }

    /// A reason with a single default descriptor for `cause`.
    pub fn caused_by(cause: SelectionCause) -> Self {
        SelectionReason {
            descriptors: PersistentList::of(SelectionDescriptor::of(cause)),
        }
    }

    /// The reason for a directly requested version.
    pub fn requested() -> Self {
        SelectionReason::caused_by(SelectionCause::Requested)
    }

    /// The reason attached to the graph root.
    pub fn root() -> Self {
        SelectionReason::caused_by(SelectionCause::Root)
    }

    /// A new reason with `descriptor` prepended; the receiver is shared,
    /// not copied.
    #[must_use = "with_descriptor returns a new reason and leaves the receiver unchanged"]
    pub fn with_descriptor(&self, descriptor: SelectionDescriptor) -> Self {
        SelectionReason {
            descriptors: self.descriptors.extend(descriptor),
        }
    }

    /// The descriptor history, most recent first.
    pub fn descriptors(&self) -> &PersistentList<SelectionDescriptor> {
        &self.descriptors
    }

    /// Rebuild a reason from descriptors given in traversal order
    /// (most recent first), so that traversing the result reproduces the
    /// input order exactly.
    pub fn from_traversal_order(descriptors: Vec<SelectionDescriptor>) -> Self {
        let mut list = PersistentList::empty();
        for descriptor in descriptors.into_iter().rev() {
            list = list.extend(descriptor);
        }
        SelectionReason { descriptors: list }
    }

    /// True when any descriptor has the given cause.
    pub fn has_cause(&self, cause: SelectionCause) -> bool {
        self.descriptors.iter().any(|d| d.cause == cause)
    }
}
