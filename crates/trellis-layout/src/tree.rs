//! An arena of views.
//!
//! `ViewTree` is a minimal widget layer: it stores the properties a layout
//! session reads and writes, and implements [`ViewHost`] over them.

use std::collections::HashMap;

use trellis_core::{Axis, EdgeInsets, LayoutPriority, Rect, Size, ViewId, NO_INTRINSIC_METRIC};

use crate::host::ViewHost;

/// A view in a [`ViewTree`].
#[derive(Debug, Clone)]
pub struct ViewNode {
    pub id: ViewId,
    /// Optional name for debugging
    pub name: Option<String>,
    /// Frame in the superview's coordinate space
    pub frame: Rect,
    pub layout_margins: EdgeInsets,
    /// Preferred content size; [`NO_INTRINSIC_METRIC`] where there is none
    pub intrinsic_content_size: Size,
    /// Compression resistance, horizontal then vertical
    pub compression_resistance: [LayoutPriority; 2],
    /// Content hugging, horizontal then vertical
    pub hugging: [LayoutPriority; 2],
    pub parent: Option<ViewId>,
    pub subviews: Vec<ViewId>,
    /// Set when the frame or content changes; cleared by the renderer
    pub needs_display: bool,
    /// Extent of laid-out subviews, for scrolling containers
    pub auto_layout_content_size: Size,
}

fn axis_index(axis: Axis) -> usize {
    match axis {
        Axis::Horizontal => 0,
        Axis::Vertical => 1,
    }
}

impl ViewNode {
    pub fn new(id: ViewId) -> Self {
        Self {
            id,
            name: None,
            frame: Rect::ZERO,
            layout_margins: EdgeInsets::ZERO,
            intrinsic_content_size: Size::new(NO_INTRINSIC_METRIC, NO_INTRINSIC_METRIC),
            compression_resistance: [LayoutPriority::DEFAULT_HIGH; 2],
            hugging: [LayoutPriority::FITTING_SIZE_LEVEL; 2],
            parent: None,
            subviews: Vec::new(),
            needs_display: false,
            auto_layout_content_size: Size::ZERO,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_frame(mut self, frame: Rect) -> Self {
        self.frame = frame;
        self
    }

    pub fn with_layout_margins(mut self, margins: EdgeInsets) -> Self {
        self.layout_margins = margins;
        self
    }

    pub fn with_intrinsic_content_size(mut self, size: Size) -> Self {
        self.intrinsic_content_size = size;
        self
    }

    pub fn with_compression_resistance(mut self, axis: Axis, priority: impl Into<LayoutPriority>) -> Self {
        self.compression_resistance[axis_index(axis)] = priority.into();
        self
    }

    pub fn with_hugging(mut self, axis: Axis, priority: impl Into<LayoutPriority>) -> Self {
        self.hugging[axis_index(axis)] = priority.into();
        self
    }
}

/// Views indexed by id, with their superview/subview links.
#[derive(Debug, Clone, Default)]
pub struct ViewTree {
    nodes: HashMap<ViewId, ViewNode>,
    roots: Vec<ViewId>,
    next_id: u64,
}

impl ViewTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a new unique view ID.
    pub fn next_id(&mut self) -> ViewId {
        let id = ViewId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a view with no superview.
    pub fn add_root(&mut self, node: ViewNode) -> ViewId {
        let id = node.id;
        self.nodes.insert(id, node);
        self.roots.push(id);
        id
    }

    /// Append a view to a superview's subviews.
    pub fn add_subview(&mut self, parent: ViewId, mut node: ViewNode) -> ViewId {
        let id = node.id;
        node.parent = Some(parent);
        self.nodes.insert(id, node);

        if let Some(parent) = self.nodes.get_mut(&parent) {
            parent.subviews.push(id);
        }
        id
    }

    /// Detach a view and its descendants. Returns the detached view.
    pub fn remove_from_superview(&mut self, id: ViewId) -> Option<ViewNode> {
        let node = self.nodes.remove(&id)?;
        match node.parent {
            Some(parent) => {
                if let Some(parent) = self.nodes.get_mut(&parent) {
                    parent.subviews.retain(|&child| child != id);
                }
            }
            None => self.roots.retain(|&root| root != id),
        }

        let mut pending = node.subviews.clone();
        while let Some(descendant) = pending.pop() {
            if let Some(removed) = self.nodes.remove(&descendant) {
                pending.extend(removed.subviews);
            }
        }
        Some(node)
    }

    pub fn get(&self, id: ViewId) -> Option<&ViewNode> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: ViewId) -> Option<&mut ViewNode> {
        self.nodes.get_mut(&id)
    }

    pub fn roots(&self) -> &[ViewId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Clear a view's needs-display flag, returning its previous value.
    pub fn take_needs_display(&mut self, id: ViewId) -> bool {
        self.nodes
            .get_mut(&id)
            .map(|node| std::mem::take(&mut node.needs_display))
            .unwrap_or(false)
    }
}

impl ViewHost for ViewTree {
    fn frame(&self, view: ViewId) -> Rect {
        self.get(view).map_or(Rect::ZERO, |node| node.frame)
    }

    fn set_frame(&mut self, view: ViewId, frame: Rect) {
        if let Some(node) = self.get_mut(view) {
            node.frame = frame;
        }
    }

    fn layout_margins(&self, view: ViewId) -> EdgeInsets {
        self.get(view).map_or(EdgeInsets::ZERO, |node| node.layout_margins)
    }

    fn intrinsic_content_size(&self, view: ViewId) -> Size {
        self.get(view).map_or(
            Size::new(NO_INTRINSIC_METRIC, NO_INTRINSIC_METRIC),
            |node| node.intrinsic_content_size,
        )
    }

    fn content_compression_resistance_priority(&self, view: ViewId, axis: Axis) -> LayoutPriority {
        self.get(view).map_or(LayoutPriority::DEFAULT_HIGH, |node| {
            node.compression_resistance[axis_index(axis)]
        })
    }

    fn content_hugging_priority(&self, view: ViewId, axis: Axis) -> LayoutPriority {
        self.get(view)
            .map_or(LayoutPriority::FITTING_SIZE_LEVEL, |node| node.hugging[axis_index(axis)])
    }

    fn subviews(&self, view: ViewId) -> &[ViewId] {
        self.get(view).map(|node| node.subviews.as_slice()).unwrap_or(&[])
    }

    fn set_needs_display(&mut self, view: ViewId) {
        if let Some(node) = self.get_mut(view) {
            node.needs_display = true;
        }
    }

    fn set_auto_layout_content_size(&mut self, view: ViewId, size: Size) {
        if let Some(node) = self.get_mut(view) {
            node.auto_layout_content_size = size;
        }
    }
}
