//! Property tests: solved geometry always satisfies the view identities.

use proptest::prelude::*;
use trellis_constraint::ViewAnchors;
use trellis_core::{Attribute, EdgeInsets, Rect, ViewId};
use trellis_layout::{LayoutOptions, LayoutSession, ViewHost, ViewNode, ViewTree};

const TOLERANCE: f64 = 1e-6;

fn check_identities(session: &LayoutSession, view: ViewId, margins: EdgeInsets) {
    let value = |attribute| session.value_of(view, attribute).unwrap_or(0.0);
    let left = value(Attribute::Left);
    let right = value(Attribute::Right);
    let top = value(Attribute::Top);
    let bottom = value(Attribute::Bottom);
    let width = value(Attribute::Width);
    let height = value(Attribute::Height);

    let identities = [
        ("right", right, left + width),
        ("bottom", bottom, top + height),
        ("center x", value(Attribute::CenterX), left + width / 2.0),
        ("center y", value(Attribute::CenterY), top + height / 2.0),
        ("left margin", value(Attribute::LeftMargin), left + margins.left),
        ("right margin", value(Attribute::RightMargin), right - margins.right),
        ("top margin", value(Attribute::TopMargin), top + margins.top),
        ("bottom margin", value(Attribute::BottomMargin), bottom - margins.bottom),
    ];
    for (name, actual, expected) in identities {
        assert!(
            (actual - expected).abs() < TOLERANCE,
            "{name} of {view}: {actual} != {expected}"
        );
    }
    assert!(width >= -TOLERANCE && height >= -TOLERANCE);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn solved_geometry_is_closed(
        width in 1.0f64..2000.0,
        height in 1.0f64..2000.0,
        fraction in 0.1f64..1.0,
        offset in 0.0f64..100.0,
        inset in 0.0f64..40.0,
    ) {
        let mut tree = ViewTree::new();
        let root = tree.next_id();
        tree.add_root(ViewNode::new(root).with_frame(Rect::new(0.0, 0.0, width, height)));
        let child = tree.next_id();
        let margins = EdgeInsets::new(inset, inset / 2.0, inset * 2.0, inset + 1.0);
        tree.add_subview(root, ViewNode::new(child).with_layout_margins(margins));

        let mut session = LayoutSession::for_container(&tree, root, LayoutOptions::default());
        let (outer, inner) = (ViewAnchors::of(root), ViewAnchors::of(child));
        session.notify_constraint_added(inner.leading().equal_to_offset(&outer.leading(), offset));
        session.notify_constraint_added(inner.top().equal_to_offset(&outer.top_margin(), offset));
        session.notify_constraint_added(inner.width().equal_to_multiple(&outer.width(), fraction, 0.0));
        session.notify_constraint_added(inner.height().equal_to_multiple(&outer.height(), fraction / 2.0, 0.0));

        session.solve(&mut tree).unwrap();

        check_identities(&session, child, margins);
        let frame = tree.frame(child);
        prop_assert!((frame.min_x() - offset).abs() < TOLERANCE);
        prop_assert!((frame.width() - width * fraction).abs() < 1e-6 * width.max(1.0));
        prop_assert!(session.diagnostics().is_empty());
    }

    #[test]
    fn container_geometry_follows_its_frame(
        width in 0.0f64..3000.0,
        height in 0.0f64..3000.0,
        inset in 0.0f64..20.0,
    ) {
        let mut tree = ViewTree::new();
        let root = tree.next_id();
        let margins = EdgeInsets::uniform(inset);
        tree.add_root(
            ViewNode::new(root)
                .with_frame(Rect::new(10.0, 20.0, width, height))
                .with_layout_margins(margins),
        );

        let mut session = LayoutSession::new(root, LayoutOptions::default());
        session.solve(&mut tree).unwrap();

        prop_assert!(session.value_of(root, Attribute::Left).unwrap().abs() < TOLERANCE);
        prop_assert!((session.value_of(root, Attribute::Width).unwrap() - width).abs() < TOLERANCE);
        prop_assert!(
            (session.value_of(root, Attribute::BottomMargin).unwrap() - (height - inset)).abs()
                < TOLERANCE
        );
        prop_assert_eq!(session.content_size().width, inset);
    }
}
