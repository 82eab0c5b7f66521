//! Error types for the Trellis layout engine.

use thiserror::Error;

use crate::types::{Attribute, AttributeAxis, ConstraintId, ViewId};

/// Errors while turning a constraint description into solver terms.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstraintError {
    #[error("{view} does not participate in this layout (constraining {attribute})")]
    NotParticipating { view: ViewId, attribute: Attribute },

    #[error("{attribute} of {view} cannot be referenced by a constraint")]
    Unconstrainable { view: ViewId, attribute: Attribute },

    #[error("cannot create a {axis} anchor for {attribute} of {view}")]
    InvalidAnchor {
        view: ViewId,
        attribute: Attribute,
        axis: AttributeAxis,
    },
}

/// Errors reported by a layout session.
///
/// None of these are fatal: the session records them and carries on with the
/// offending operation not applied.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("constraint dropped: {0}")]
    Unresolvable(#[from] ConstraintError),

    #[error("required {constraint} ({description}) conflicts with installed constraints")]
    UnsatisfiableConstraint {
        constraint: ConstraintId,
        description: String,
    },

    #[error("geometry of {view} could not be installed: {reason}")]
    UnsatisfiableGeometry { view: ViewId, reason: String },

    #[error("solver rejected {operation} for {subject}: {reason}")]
    SolverRejected {
        operation: &'static str,
        subject: String,
        reason: String,
    },

    #[error("{view} does not participate in this layout")]
    NotParticipating { view: ViewId },

    #[error("{view} already participates in this layout")]
    AlreadyParticipating { view: ViewId },

    #[error("{constraint} is not installed")]
    UnknownConstraint { constraint: ConstraintId },

    #[error("container {attribute} solved to {solved}, but its frame gives {suggested}")]
    ContainerOverridden {
        attribute: Attribute,
        suggested: f64,
        solved: f64,
    },

    #[error("layout pass skipped: {} required constraint(s) remain unsatisfiable", .rejected.len())]
    UnsatisfiableSystem { rejected: Vec<ConstraintId> },
}
