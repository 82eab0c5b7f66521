//! Edit variables pinning the container's geometry.
//!
//! The container is laid out by its own superview, so inside its session its
//! attributes are fixed inputs: one edit variable per attribute, suggested
//! from the current frame and margins in the container's own coordinates.

use tracing::debug;
use trellis_constraint::PropertyKey;
use trellis_core::{Attribute, EdgeInsets, LayoutError, Rect};

use super::LayoutSession;
use crate::host::ViewHost;

/// Container attributes backed by edit variables.
pub const CONTAINER_ATTRIBUTES: [Attribute; 12] = [
    Attribute::Left,
    Attribute::Right,
    Attribute::Top,
    Attribute::Bottom,
    Attribute::Width,
    Attribute::Height,
    Attribute::CenterX,
    Attribute::CenterY,
    Attribute::LeftMargin,
    Attribute::RightMargin,
    Attribute::TopMargin,
    Attribute::BottomMargin,
];

/// How far a solved container attribute may drift from its suggestion.
const CONTAINER_TOLERANCE: f64 = 1e-6;

/// Values of [`CONTAINER_ATTRIBUTES`] for a frame and margins, in order.
///
/// Subviews are positioned in the container's bounds, so the origin is
/// always zero.
pub fn container_values(frame: Rect, margins: EdgeInsets) -> [(Attribute, f64); 12] {
    let (left, top) = (0.0, 0.0);
    let (width, height) = (frame.width(), frame.height());
    let right = left + width;
    let bottom = top + height;

    [
        (Attribute::Left, left),
        (Attribute::Right, right),
        (Attribute::Top, top),
        (Attribute::Bottom, bottom),
        (Attribute::Width, width),
        (Attribute::Height, height),
        (Attribute::CenterX, left + width / 2.0),
        (Attribute::CenterY, top + height / 2.0),
        (Attribute::LeftMargin, left + margins.left),
        (Attribute::RightMargin, right - margins.right),
        (Attribute::TopMargin, top + margins.top),
        (Attribute::BottomMargin, bottom - margins.bottom),
    ]
}

impl LayoutSession {
    pub(super) fn prime_container(&mut self) {
        for attribute in CONTAINER_ATTRIBUTES {
            self.add_edit_variable(PropertyKey::new(self.container, attribute));
        }
        debug!(container = %self.container, "container edit variables created");
    }

    /// Suggest the container's current frame and margins to the solver.
    ///
    /// Runs at the start of every [`solve`](Self::solve).
    pub fn refresh_container<H: ViewHost + ?Sized>(&mut self, host: &H) {
        let values = container_values(
            host.frame(self.container),
            host.layout_margins(self.container),
        );
        for (attribute, value) in values {
            self.suggest(PropertyKey::new(self.container, attribute), value);
        }
    }

    /// The first container attribute that required constraints moved away
    /// from its suggested value in the last solve.
    pub(super) fn container_override(&self) -> Option<LayoutError> {
        CONTAINER_ATTRIBUTES.into_iter().find_map(|attribute| {
            let suggested = *self.edits.get(&PropertyKey::new(self.container, attribute))?;
            let solved = self.value(self.variables.get(self.container, attribute)?);
            ((solved - suggested).abs() > CONTAINER_TOLERANCE).then_some(
                LayoutError::ContainerOverridden {
                    attribute,
                    suggested,
                    solved,
                },
            )
        })
    }
}
