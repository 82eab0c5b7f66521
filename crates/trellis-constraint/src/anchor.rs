//! Typed anchors for building constraint descriptors.
//!
//! An anchor is a view attribute tagged with the kind of geometry it
//! measures, so that only compatible attributes can be related:
//!
//! ```
//! use trellis_constraint::ViewAnchors;
//! use trellis_core::ViewId;
//!
//! let container = ViewAnchors::of(ViewId(0));
//! let label = ViewAnchors::of(ViewId(1));
//!
//! let constraints = [
//!     label.leading().equal_to_offset(&container.left_margin(), 8.0),
//!     label.top().equal_to(&container.top_margin()),
//!     label.width().less_than_or_equal_to_constant(320.0),
//! ];
//! assert_eq!(constraints.len(), 3);
//! ```

use std::fmt;
use std::marker::PhantomData;

use trellis_core::{Attribute, AttributeAxis, ConstraintError, Relation, ViewId};

use crate::descriptor::ConstraintDescriptor;

/// Marker for the kind of geometry an anchor measures.
pub trait AnchorKind {
    const AXIS: AttributeAxis;
}

/// Positions along the x axis.
#[derive(Debug)]
pub enum XAxis {}

/// Positions along the y axis.
#[derive(Debug)]
pub enum YAxis {}

/// Widths and heights.
#[derive(Debug)]
pub enum Dimension {}

impl AnchorKind for XAxis {
    const AXIS: AttributeAxis = AttributeAxis::Horizontal;
}

impl AnchorKind for YAxis {
    const AXIS: AttributeAxis = AttributeAxis::Vertical;
}

impl AnchorKind for Dimension {
    const AXIS: AttributeAxis = AttributeAxis::Dimension;
}

/// An attribute of a view, typed by its axis.
pub struct Anchor<K> {
    view: ViewId,
    attribute: Attribute,
    kind: PhantomData<fn() -> K>,
}

impl<K> Clone for Anchor<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Anchor<K> {}

impl<K: AnchorKind> fmt::Debug for Anchor<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Anchor")
            .field("view", &self.view)
            .field("attribute", &self.attribute)
            .field("axis", &K::AXIS)
            .finish()
    }
}

impl<K: AnchorKind> Anchor<K> {
    /// Create an anchor, checking that the attribute lies on this anchor's axis.
    pub fn new(view: ViewId, attribute: Attribute) -> Result<Self, ConstraintError> {
        if attribute.axis() == Some(K::AXIS) {
            Ok(Self::unchecked(view, attribute))
        } else {
            Err(ConstraintError::InvalidAnchor {
                view,
                attribute,
                axis: K::AXIS,
            })
        }
    }

    fn unchecked(view: ViewId, attribute: Attribute) -> Self {
        Self {
            view,
            attribute,
            kind: PhantomData,
        }
    }

    pub fn view(&self) -> ViewId {
        self.view
    }

    pub fn attribute(&self) -> Attribute {
        self.attribute
    }

    fn relate(&self, relation: Relation, target: &Anchor<K>, constant: f64) -> ConstraintDescriptor {
        ConstraintDescriptor::new(
            self.view,
            self.attribute,
            relation,
            target.view,
            target.attribute,
            1.0,
            constant,
        )
    }

    pub fn equal_to(&self, target: &Anchor<K>) -> ConstraintDescriptor {
        self.relate(Relation::Equal, target, 0.0)
    }

    pub fn equal_to_offset(&self, target: &Anchor<K>, constant: f64) -> ConstraintDescriptor {
        self.relate(Relation::Equal, target, constant)
    }

    pub fn greater_than_or_equal_to(&self, target: &Anchor<K>) -> ConstraintDescriptor {
        self.relate(Relation::GreaterThanOrEqual, target, 0.0)
    }

    pub fn greater_than_or_equal_to_offset(
        &self,
        target: &Anchor<K>,
        constant: f64,
    ) -> ConstraintDescriptor {
        self.relate(Relation::GreaterThanOrEqual, target, constant)
    }

    pub fn less_than_or_equal_to(&self, target: &Anchor<K>) -> ConstraintDescriptor {
        self.relate(Relation::LessThanOrEqual, target, 0.0)
    }

    pub fn less_than_or_equal_to_offset(
        &self,
        target: &Anchor<K>,
        constant: f64,
    ) -> ConstraintDescriptor {
        self.relate(Relation::LessThanOrEqual, target, constant)
    }
}

impl Anchor<Dimension> {
    pub fn equal_to_constant(&self, constant: f64) -> ConstraintDescriptor {
        ConstraintDescriptor::constant(self.view, self.attribute, Relation::Equal, constant)
    }

    pub fn greater_than_or_equal_to_constant(&self, constant: f64) -> ConstraintDescriptor {
        ConstraintDescriptor::constant(
            self.view,
            self.attribute,
            Relation::GreaterThanOrEqual,
            constant,
        )
    }

    pub fn less_than_or_equal_to_constant(&self, constant: f64) -> ConstraintDescriptor {
        ConstraintDescriptor::constant(self.view, self.attribute, Relation::LessThanOrEqual, constant)
    }

    /// `self == multiplier * target + constant`
    pub fn equal_to_multiple(
        &self,
        target: &Anchor<Dimension>,
        multiplier: f64,
        constant: f64,
    ) -> ConstraintDescriptor {
        ConstraintDescriptor::new(
            self.view,
            self.attribute,
            Relation::Equal,
            target.view,
            target.attribute,
            multiplier,
            constant,
        )
    }
}

/// The anchors of one view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewAnchors {
    view: ViewId,
}

impl ViewAnchors {
    pub fn of(view: ViewId) -> Self {
        Self { view }
    }

    fn x(&self, attribute: Attribute) -> Anchor<XAxis> {
        Anchor::unchecked(self.view, attribute)
    }

    fn y(&self, attribute: Attribute) -> Anchor<YAxis> {
        Anchor::unchecked(self.view, attribute)
    }

    pub fn left(&self) -> Anchor<XAxis> {
        self.x(Attribute::Left)
    }

    pub fn right(&self) -> Anchor<XAxis> {
        self.x(Attribute::Right)
    }

    pub fn leading(&self) -> Anchor<XAxis> {
        self.x(Attribute::Leading)
    }

    pub fn trailing(&self) -> Anchor<XAxis> {
        self.x(Attribute::Trailing)
    }

    pub fn center_x(&self) -> Anchor<XAxis> {
        self.x(Attribute::CenterX)
    }

    pub fn left_margin(&self) -> Anchor<XAxis> {
        self.x(Attribute::LeftMargin)
    }

    pub fn right_margin(&self) -> Anchor<XAxis> {
        self.x(Attribute::RightMargin)
    }

    pub fn leading_margin(&self) -> Anchor<XAxis> {
        self.x(Attribute::LeadingMargin)
    }

    pub fn trailing_margin(&self) -> Anchor<XAxis> {
        self.x(Attribute::TrailingMargin)
    }

    pub fn center_x_within_margins(&self) -> Anchor<XAxis> {
        self.x(Attribute::CenterXWithinMargins)
    }

    pub fn top(&self) -> Anchor<YAxis> {
        self.y(Attribute::Top)
    }

    pub fn bottom(&self) -> Anchor<YAxis> {
        self.y(Attribute::Bottom)
    }

    pub fn center_y(&self) -> Anchor<YAxis> {
        self.y(Attribute::CenterY)
    }

    pub fn first_baseline(&self) -> Anchor<YAxis> {
        self.y(Attribute::FirstBaseline)
    }

    pub fn last_baseline(&self) -> Anchor<YAxis> {
        self.y(Attribute::LastBaseline)
    }

    pub fn top_margin(&self) -> Anchor<YAxis> {
        self.y(Attribute::TopMargin)
    }

    pub fn bottom_margin(&self) -> Anchor<YAxis> {
        self.y(Attribute::BottomMargin)
    }

    pub fn center_y_within_margins(&self) -> Anchor<YAxis> {
        self.y(Attribute::CenterYWithinMargins)
    }

    pub fn width(&self) -> Anchor<Dimension> {
        Anchor::unchecked(self.view, Attribute::Width)
    }

    pub fn height(&self) -> Anchor<Dimension> {
        Anchor::unchecked(self.view, Attribute::Height)
    }
}
