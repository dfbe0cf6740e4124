//! Lockgraph - binary persistence for resolved dependency graphs
//!
//! Lockgraph records the outcome of a dependency-graph resolution: for
//! each resolved component, its identity, why that version was selected,
//! the variants it exposes, which of those were used, and the
//! originating repository. The persisted form backs result caches, so a
//! finished resolution can be reloaded without recomputation.
//!
//! # Quick Start
//!
//! ```ignore
//! use lockgraph::{
//!     ComponentId, GraphReader, GraphWriter, ModuleCoordinate,
//!     ResolvedComponent, SelectionReason, Variant,
//! };
//!
//! let coordinate = ModuleCoordinate::new("org.example", "lib", "1.0");
//! let component = ResolvedComponent {
//!     result_id: 1,
//!     coordinate: coordinate.clone(),
//!     selection_reason: SelectionReason::requested(),
//!     component_id: ComponentId::Module(coordinate),
//!     all_variants: vec![Variant::new("runtime")],
//!     resolved_variants: vec![Variant::new("runtime")],
//!     repository_name: Some("mavenCentral".into()),
//! };
//!
//! let mut bytes = Vec::new();
//! GraphWriter::new().write_graph(&mut bytes, &[component])?;
//! let reloaded = GraphReader::new().read_graph(bytes.as_slice())?;
//! ```
//!
//! # Architecture
//!
//! The data model (including the structurally shared list that
//! accumulates selection rationale) lives in `lockgraph-core`; the wire
//! format lives in `lockgraph-store`. This crate re-exports both.

pub use lockgraph_core::*;
pub use lockgraph_store::*;
