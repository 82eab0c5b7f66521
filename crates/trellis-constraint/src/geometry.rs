//! Constraints every view carries regardless of user constraints.

use smallvec::smallvec;
use trellis_core::{Attribute, Axis, LayoutPriority, Relation, ViewId};

use crate::linear::PropertyConstraint;
use crate::registry::PropertyKey;

/// Number of constraints produced by [`geometry_constraints`].
pub const GEOMETRY_CONSTRAINT_COUNT: usize = 12;

/// The fixed identities relating a view's edges, center, size and margins.
pub fn geometry_constraints(view: ViewId) -> Vec<PropertyConstraint> {
    use Attribute::*;
    let required = LayoutPriority::REQUIRED;
    let relate = |lhs, rhs: &[(Attribute, f64)]| {
        PropertyConstraint::between(view, lhs, Relation::Equal, rhs, required)
    };
    let non_negative = |attribute| {
        PropertyConstraint::new(
            smallvec![(PropertyKey::new(view, attribute), 1.0)],
            0.0,
            Relation::GreaterThanOrEqual,
            required,
        )
    };

    vec![
        non_negative(Width),
        non_negative(Height),
        relate(Width, &[(Right, 1.0), (Left, -1.0)]),
        relate(Right, &[(Left, 1.0), (Width, 1.0)]),
        relate(Height, &[(Bottom, 1.0), (Top, -1.0)]),
        relate(Bottom, &[(Top, 1.0), (Height, 1.0)]),
        relate(CenterX, &[(Left, 1.0), (Width, 0.5)]),
        relate(CenterY, &[(Top, 1.0), (Height, 0.5)]),
        relate(LeftMargin, &[(Left, 1.0), (MarginInsetLeft, 1.0)]),
        relate(RightMargin, &[(Right, 1.0), (MarginInsetRight, -1.0)]),
        relate(TopMargin, &[(Top, 1.0), (MarginInsetTop, 1.0)]),
        relate(BottomMargin, &[(Bottom, 1.0), (MarginInsetBottom, -1.0)]),
    ]
}

/// Compression resistance and content hugging for one axis.
///
/// The view's size along `axis` should be no smaller than its intrinsic size
/// (at `compression`) and no larger (at `hugging`). When both are required the
/// pair collapses into a single equality.
pub fn intrinsic_size_constraints(
    view: ViewId,
    axis: Axis,
    compression: LayoutPriority,
    hugging: LayoutPriority,
) -> Vec<PropertyConstraint> {
    let size = Attribute::size(axis);
    let intrinsic = [(Attribute::intrinsic_size(axis), 1.0)];

    if compression.is_required() && hugging.is_required() {
        return vec![PropertyConstraint::between(
            view,
            size,
            Relation::Equal,
            &intrinsic,
            LayoutPriority::REQUIRED,
        )];
    }

    vec![
        PropertyConstraint::between(view, size, Relation::GreaterThanOrEqual, &intrinsic, compression),
        PropertyConstraint::between(view, size, Relation::LessThanOrEqual, &intrinsic, hugging),
    ]
}
