//! Core types for persisted dependency-resolution results.
//!
//! This crate defines the data model shared by the resolution engine and
//! the persistence layer:
//! - `PersistentList`: immutable, structurally shared list used to
//!   accumulate selection rationale across resolution branches
//! - `ResolvedComponent`: one node of a resolved dependency graph
//! - `ModuleCoordinate`, `ComponentId`: component identity
//! - `Variant`: exposed variants and their attributes
//! - `SelectionReason`, `SelectionDescriptor`, `SelectionCause`: why a
//!   version was selected
//!
//! No I/O lives here; the wire format is in `lockgraph-store`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod component;
pub mod list;
pub mod reason;
pub mod variant;

pub use component::{ComponentId, ModuleCoordinate, ResolvedComponent};
pub use list::PersistentList;
pub use reason::{SelectionCause, SelectionDescriptor, SelectionReason};
pub use variant::Variant;
