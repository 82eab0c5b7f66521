//! Core types and utilities for the Trellis layout engine.
//!
//! This crate provides the foundational types used across all other trellis crates:
//! - Geometry values (points, sizes, rectangles, edge insets)
//! - View and constraint identifiers
//! - Layout attributes, relations and priorities
//! - Error types

pub mod errors;
pub mod geometry;
pub mod types;

pub use errors::*;
pub use geometry::*;
pub use types::*;
