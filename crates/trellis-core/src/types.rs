//! Identifiers and layout value types.

use std::fmt;

/// Sentinel reported by a view that has no intrinsic size along an axis.
pub const NO_INTRINSIC_METRIC: f64 = -1.0;

/// Interpret an intrinsic size component.
///
/// Returns `None` for the sentinel and for any other negative or non-finite value.
pub fn intrinsic_metric(value: f64) -> Option<f64> {
    if value.is_finite() && value >= 0.0 {
        Some(value)
    } else {
        None
    }
}

/// Handle to a view. Views are owned by the widget layer; layout only refers to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewId(pub u64);

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view#{}", self.0)
    }
}

/// Handle to a user constraint installed in a layout session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstraintId(pub u64);

impl fmt::Display for ConstraintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "constraint#{}", self.0)
    }
}

/// A layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub const BOTH: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];
}

/// The kind of geometry an attribute measures. Anchors are typed by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttributeAxis {
    /// A position on the x axis
    Horizontal,
    /// A position on the y axis
    Vertical,
    /// A width or height
    Dimension,
}

impl fmt::Display for AttributeAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeAxis::Horizontal => write!(f, "X"),
            AttributeAxis::Vertical => write!(f, "Y"),
            AttributeAxis::Dimension => write!(f, "Dimension"),
        }
    }
}

/// A geometric property of a view.
///
/// The cases after `NotAnAttribute` cannot be referenced by user constraints;
/// they back the intrinsic content size and layout margin machinery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Attribute {
    Left,
    Right,
    Top,
    Bottom,
    Leading,
    Trailing,
    Width,
    Height,
    CenterX,
    CenterY,
    LastBaseline,
    FirstBaseline,
    LeftMargin,
    RightMargin,
    TopMargin,
    BottomMargin,
    LeadingMargin,
    TrailingMargin,
    CenterXWithinMargins,
    CenterYWithinMargins,
    NotAnAttribute,
    IntrinsicSizeX,
    IntrinsicSizeY,
    MarginInsetLeft,
    MarginInsetRight,
    MarginInsetTop,
    MarginInsetBottom,
}

impl Attribute {
    pub const ALL: [Attribute; 27] = [
        Attribute::Left,
        Attribute::Right,
        Attribute::Top,
        Attribute::Bottom,
        Attribute::Leading,
        Attribute::Trailing,
        Attribute::Width,
        Attribute::Height,
        Attribute::CenterX,
        Attribute::CenterY,
        Attribute::LastBaseline,
        Attribute::FirstBaseline,
        Attribute::LeftMargin,
        Attribute::RightMargin,
        Attribute::TopMargin,
        Attribute::BottomMargin,
        Attribute::LeadingMargin,
        Attribute::TrailingMargin,
        Attribute::CenterXWithinMargins,
        Attribute::CenterYWithinMargins,
        Attribute::NotAnAttribute,
        Attribute::IntrinsicSizeX,
        Attribute::IntrinsicSizeY,
        Attribute::MarginInsetLeft,
        Attribute::MarginInsetRight,
        Attribute::MarginInsetTop,
        Attribute::MarginInsetBottom,
    ];

    /// The axis this attribute lies on, if any.
    pub fn axis(self) -> Option<AttributeAxis> {
        use Attribute::*;
        match self {
            Left | Right | Leading | Trailing | CenterX | LeftMargin | RightMargin
            | LeadingMargin | TrailingMargin | CenterXWithinMargins => {
                Some(AttributeAxis::Horizontal)
            }
            Top | Bottom | CenterY | LastBaseline | FirstBaseline | TopMargin | BottomMargin
            | CenterYWithinMargins => Some(AttributeAxis::Vertical),
            Width | Height => Some(AttributeAxis::Dimension),
            _ => None,
        }
    }

    /// Whether a user constraint may reference this attribute.
    pub fn is_constrainable(self) -> bool {
        self.axis().is_some()
    }

    /// The intrinsic size attribute for an axis.
    pub fn intrinsic_size(axis: Axis) -> Attribute {
        match axis {
            Axis::Horizontal => Attribute::IntrinsicSizeX,
            Axis::Vertical => Attribute::IntrinsicSizeY,
        }
    }

    /// The size attribute for an axis.
    pub fn size(axis: Axis) -> Attribute {
        match axis {
            Axis::Horizontal => Attribute::Width,
            Axis::Vertical => Attribute::Height,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// The relation between the two sides of a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Relation {
    LessThanOrEqual,
    Equal,
    GreaterThanOrEqual,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::LessThanOrEqual => write!(f, "<="),
            Relation::Equal => write!(f, "=="),
            Relation::GreaterThanOrEqual => write!(f, ">="),
        }
    }
}

/// How important a constraint is, from 0 to 1000.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutPriority(f32);

impl LayoutPriority {
    pub const REQUIRED: LayoutPriority = LayoutPriority(1000.0);
    pub const DEFAULT_HIGH: LayoutPriority = LayoutPriority(750.0);
    pub const DEFAULT_LOW: LayoutPriority = LayoutPriority(500.0);
    pub const FITTING_SIZE_LEVEL: LayoutPriority = LayoutPriority(250.0);

    /// Create a priority, clamped into `0..=1000`. NaN becomes 0.
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, Self::REQUIRED.0))
    }

    pub fn value(self) -> f32 {
        self.0
    }

    /// Check if this priority must hold exactly.
    pub fn is_required(self) -> bool {
        self.0 >= Self::REQUIRED.0
    }
}

impl Default for LayoutPriority {
    fn default() -> Self {
        Self::REQUIRED
    }
}

impl From<f32> for LayoutPriority {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for LayoutPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
