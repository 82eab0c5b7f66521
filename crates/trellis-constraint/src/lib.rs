//! Constraint construction for the Trellis layout engine.
//!
//! This crate implements:
//! - The registry mapping view properties to Cassowary variables
//! - Constraint descriptors and typed anchors for building them
//! - Lowering descriptors into solver constraints, with priority handling
//! - The intrinsic geometry every laid-out view carries

mod anchor;
mod compiler;
mod descriptor;
pub mod geometry;
mod linear;
mod registry;

pub use anchor::{Anchor, AnchorKind, Dimension, ViewAnchors, XAxis, YAxis};
pub use compiler::{compile, lower};
pub use descriptor::ConstraintDescriptor;
pub use geometry::{geometry_constraints, intrinsic_size_constraints, GEOMETRY_CONSTRAINT_COUNT};
pub use linear::{resolve_attribute, strength_for, PropertyConstraint, Terms};
pub use registry::{PropertyKey, VariableRegistry};
