//! Writing a solution back to views.

use glam::DVec2;
use tracing::trace;
use trellis_core::{Rect, Size, ViewId};

use crate::host::ViewHost;

/// Write solved frames into `subviews` and record the container's content size.
///
/// `read` supplies the solved frame of each subview. The content size is the
/// furthest right and bottom edge reached by any subview, extended by the
/// container's right and bottom layout margins.
pub fn apply_solution<H: ViewHost + ?Sized>(
    host: &mut H,
    container: ViewId,
    subviews: &[ViewId],
    read: impl Fn(ViewId) -> Rect,
    mark_needs_display: bool,
) -> Size {
    let mut extent = DVec2::ZERO;
    for &view in subviews {
        let frame = read(view);
        trace!(%view, ?frame, "frame solved");
        host.set_frame(view, frame);
        if mark_needs_display {
            host.set_needs_display(view);
        }
        extent = extent.max(frame.max_corner());
    }

    let content_size = Size::from(extent + host.layout_margins(container).trailing_corner());
    host.set_auto_layout_content_size(container, content_size);
    if mark_needs_display {
        host.set_needs_display(container);
    }
    content_size
}
