//! Auto layout for Trellis view trees.
//!
//! A [`LayoutSession`] keeps a Cassowary solver in sync with one container
//! view and its direct subviews, and writes solved frames back through a
//! [`ViewHost`].
//!
//! # Architecture
//!
//! 1. **Notifications**: the widget layer reports view, margin, intrinsic size
//!    and constraint changes; the session updates only what changed
//! 2. **Solving**: container geometry is re-suggested, then the solver resolves
//! 3. **Applying**: frames and the container's content size are written back
//!
//! # Example
//!
//! ```
//! use trellis_constraint::ViewAnchors;
//! use trellis_core::Rect;
//! use trellis_layout::{LayoutOptions, LayoutSession, ViewHost, ViewNode, ViewTree};
//!
//! let mut tree = ViewTree::new();
//! let root = tree.next_id();
//! tree.add_root(ViewNode::new(root).with_frame(Rect::new(0.0, 0.0, 320.0, 200.0)));
//! let label = tree.next_id();
//! tree.add_subview(root, ViewNode::new(label));
//!
//! let mut session = LayoutSession::for_container(&tree, root, LayoutOptions::default());
//! let (outer, inner) = (ViewAnchors::of(root), ViewAnchors::of(label));
//! session.notify_constraint_added(inner.left().equal_to_offset(&outer.left(), 16.0));
//! session.notify_constraint_added(inner.right().equal_to_offset(&outer.right(), -16.0));
//! session.notify_constraint_added(inner.height().equal_to_constant(24.0));
//!
//! session.solve(&mut tree)?;
//! assert!((tree.frame(label).width() - 288.0).abs() < 1e-6);
//! # Ok::<(), trellis_core::LayoutError>(())
//! ```

mod apply;
mod host;
mod options;
mod session;
mod tree;

pub use apply::apply_solution;
pub use host::ViewHost;
pub use options::LayoutOptions;
pub use session::{
    container_values, IntrinsicState, LayoutPass, LayoutSession, CONTAINER_ATTRIBUTES,
};
pub use tree::{ViewNode, ViewTree};
