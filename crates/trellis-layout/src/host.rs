//! The seam between a layout session and the widget layer that owns views.

use trellis_core::{Axis, EdgeInsets, LayoutPriority, Rect, Size, ViewId};

/// Read and write access to the views a layout session arranges.
///
/// Sessions never hold on to views; every query goes through the host with a
/// [`ViewId`]. Queries about unknown views should return neutral values
/// (zero geometry, no subviews) rather than panic.
pub trait ViewHost {
    /// Frame of a view in its superview's coordinate space.
    fn frame(&self, view: ViewId) -> Rect;

    fn set_frame(&mut self, view: ViewId, frame: Rect);

    fn layout_margins(&self, view: ViewId) -> EdgeInsets;

    /// Preferred size of a view's content.
    ///
    /// A component equal to [`trellis_core::NO_INTRINSIC_METRIC`] (or any
    /// negative value) means the view has no preference along that axis.
    fn intrinsic_content_size(&self, view: ViewId) -> Size;

    /// How strongly the view resists shrinking below its intrinsic size.
    fn content_compression_resistance_priority(&self, _view: ViewId, _axis: Axis) -> LayoutPriority {
        LayoutPriority::DEFAULT_HIGH
    }

    /// How strongly the view resists growing beyond its intrinsic size.
    fn content_hugging_priority(&self, _view: ViewId, _axis: Axis) -> LayoutPriority {
        LayoutPriority::FITTING_SIZE_LEVEL
    }

    /// Direct subviews, in order.
    fn subviews(&self, view: ViewId) -> &[ViewId];

    fn set_needs_display(&mut self, view: ViewId);

    /// Record the extent of a container's laid-out content.
    fn set_auto_layout_content_size(&mut self, view: ViewId, size: Size);
}
