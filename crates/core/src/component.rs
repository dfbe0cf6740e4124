//! Resolved-component records: one node of a resolved dependency graph.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::reason::SelectionReason;
use crate::variant::Variant;

/// Group/name/version triple identifying a module version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModuleCoordinate {
    /// Group (organization) of the module.
    pub group: String,
    /// Module name.
    pub name: String,
    /// Resolved version.
    pub version: String,
}

impl ModuleCoordinate {
    /// Create a coordinate from its three parts.
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        ModuleCoordinate {
            group: group.into(),
            name: name.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for ModuleCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.name, self.version)
    }
}

/// Identifier of a resolved component.
///
/// A closed set of kinds, each with its own fixed wire layout. `Opaque`
/// is the forward-compatibility fallback for identifier kinds this
/// version does not model; it still round-trips by display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentId {
    /// A module from a repository, identified by its coordinate.
    Module(ModuleCoordinate),
    /// A project in the current build.
    Project {
        /// Path of the build containing the project (`:` for the root build).
        build_path: String,
        /// Path of the project within its build.
        project_path: String,
    },
    /// Any other identifier kind, carried by display name only.
    Opaque {
        /// Human-readable identifier text.
        display_name: String,
    },
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentId::Module(coordinate) => write!(f, "{}", coordinate),
            ComponentId::Project {
                build_path,
                project_path,
            } => write!(f, "project {}{}", build_path, project_path),
            ComponentId::Opaque { display_name } => f.write_str(display_name),
        }
    }
}

/// One node of a resolved dependency graph.
///
/// Produced by the resolution algorithm, persisted once, and later
/// reconstructed as a detached record with no tie to the resolution
/// session that created it.
///
/// Invariants, guaranteed by the producer and not re-checked here:
/// `result_id` is unique within one resolution session, and every value
/// in `resolved_variants` also appears in `all_variants`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedComponent {
    /// Session-unique id used to cross-reference graph edges.
    pub result_id: u64,
    /// The module version this node resolved to.
    pub coordinate: ModuleCoordinate,
    /// Why this version was selected.
    pub selection_reason: SelectionReason,
    /// Identifier of the component (module, project, or other).
    pub component_id: ComponentId,
    /// Every variant the component exposes, in declaration order.
    pub all_variants: Vec<Variant>,
    /// The subset of `all_variants` actually used by this resolution,
    /// related by value equality rather than position.
    pub resolved_variants: Vec<Variant>,
    /// Name of the originating repository; `None` for components without
    /// one (e.g. projects). Distinct from `Some("")`.
    pub repository_name: Option<String>,
}
