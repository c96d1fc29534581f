//! Per-axis geometry resolution.
//!
//! Each function answers one question — "what is this widget's value on this
//! axis, given the tree's current resolved state?" — and either produces the
//! value or names the dependencies that must resolve first. The queue owns
//! ordering; nothing here is ever computed from stale inputs.

use crate::layout::measure::Measure;
use crate::tree::{Axis, Strategy, WidgetId, WidgetTree};

/// Outcome of attempting to resolve one (widget, axis) request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The axis resolved to this value.
    Ready(i32),
    /// Unresolved dependencies; enqueue these and retry behind them.
    Defer(Vec<(WidgetId, Axis)>),
    /// The widget left the tree; discard the request.
    Stale,
}

/// Resolve one axis of one widget against current tree state.
pub fn resolve_axis(tree: &WidgetTree, id: WidgetId, axis: Axis) -> Resolution {
    if !tree.contains(id) {
        return Resolution::Stale;
    }
    if axis.is_extent() {
        resolve_extent(tree, id, axis)
    } else {
        resolve_position(tree, id, axis)
    }
}

// ---------------------------------------------------------------------------
// Extents
// ---------------------------------------------------------------------------

fn resolve_extent(tree: &WidgetTree, id: WidgetId, axis: Axis) -> Resolution {
    let Some(data) = tree.get(id) else {
        return Resolution::Stale;
    };
    match data.geometry.measure(axis) {
        Measure::Fixed(px) => Resolution::Ready(px.max(0)),
        Measure::Percent(pct) => resolve_percent(tree, id, axis, pct),
        Measure::Stretch => resolve_stretch(tree, id, axis),
        Measure::Fit => resolve_fit(tree, id, axis),
    }
}

fn resolve_percent(tree: &WidgetTree, id: WidgetId, axis: Axis, pct: f32) -> Resolution {
    let Some(parent) = tree.parent(id) else {
        // A parentless percent keeps its current extent.
        return current_value(tree, id, axis);
    };
    let Some(pdata) = tree.get(parent) else {
        return Resolution::Stale;
    };
    if pdata.geometry.requested.contains(axis.flag()) {
        return Resolution::Defer(vec![(parent, axis)]);
    }
    let parent_extent = axis.get(pdata.geometry.slot);
    Resolution::Ready(Measure::scale_percent(pct, parent_extent).max(0))
}

fn resolve_stretch(tree: &WidgetTree, id: WidgetId, axis: Axis) -> Resolution {
    let Some(parent) = tree.parent(id) else {
        return current_value(tree, id, axis);
    };
    let Some(pdata) = tree.get(parent) else {
        return Resolution::Stale;
    };
    if pdata.geometry.requested.contains(axis.flag()) {
        return Resolution::Defer(vec![(parent, axis)]);
    }
    let parent_extent = axis.get(pdata.geometry.slot);

    let flow = in_flow(tree, parent);
    if pdata.strategy.stacked_axis() != Some(axis) || !flow.contains(&id) {
        // Cross-axis or free placement: fill the parent.
        return Resolution::Ready(parent_extent.max(0));
    }

    // Remaining space after non-stretched in-flow siblings, split evenly
    // among the stretched ones.
    let mut used = 0;
    let mut stretched = 0;
    let mut deps = Vec::new();
    for sibling in flow {
        let Some(sdata) = tree.get(sibling) else {
            continue;
        };
        if matches!(sdata.geometry.measure(axis), Measure::Stretch) {
            stretched += 1;
            continue;
        }
        if sdata.geometry.requested.contains(axis.flag()) {
            deps.push((sibling, axis));
            continue;
        }
        used += axis.get(sdata.geometry.slot);
    }
    if !deps.is_empty() {
        return Resolution::Defer(deps);
    }
    Resolution::Ready(((parent_extent - used) / stretched.max(1)).max(0))
}

fn resolve_fit(tree: &WidgetTree, id: WidgetId, axis: Axis) -> Resolution {
    let Some(data) = tree.get(id) else {
        return Resolution::Stale;
    };
    let children = tree.children(id);
    if children.is_empty() {
        // Childless fit falls back to the widget's intrinsic measure.
        let available = tree
            .parent(id)
            .and_then(|p| tree.get(p))
            .map(|p| p.geometry.slot.size())
            .unwrap_or_else(|| data.geometry.slot.size());
        let intrinsic = data.widget.measure(available);
        let value = match axis {
            Axis::Width => intrinsic.width,
            _ => intrinsic.height,
        };
        return Resolution::Ready(value.max(0));
    }

    // The union of child slots is measured from this widget's own origin,
    // so the companion position must be resolved first (the one
    // children-before-parent case).
    let origin_axis = axis.companion();
    if data.geometry.requested.contains(origin_axis.flag()) {
        return Resolution::Defer(vec![(id, origin_axis)]);
    }
    let origin = origin_axis.get(data.geometry.slot);

    let mut far = origin;
    let mut deps = Vec::new();
    for &child in children {
        let Some(cdata) = tree.get(child) else {
            continue;
        };
        let pending = cdata.geometry.requested;
        if pending.contains(axis.flag()) {
            deps.push((child, axis));
        }
        if pending.contains(origin_axis.flag()) {
            deps.push((child, origin_axis));
        }
        if deps.is_empty() {
            let child_far = origin_axis.get(cdata.geometry.slot) + axis.get(cdata.geometry.slot);
            far = far.max(child_far);
        }
    }
    if !deps.is_empty() {
        return Resolution::Defer(deps);
    }
    Resolution::Ready((far - origin).max(0))
}

// ---------------------------------------------------------------------------
// Positions
// ---------------------------------------------------------------------------

fn resolve_position(tree: &WidgetTree, id: WidgetId, axis: Axis) -> Resolution {
    let Some(data) = tree.get(id) else {
        return Resolution::Stale;
    };
    let authored = match axis {
        Axis::X => data.geometry.offset.x,
        _ => data.geometry.offset.y,
    };
    let Some(parent) = tree.parent(id) else {
        return Resolution::Ready(authored);
    };
    let Some(pdata) = tree.get(parent) else {
        return Resolution::Stale;
    };
    if pdata.geometry.requested.contains(axis.flag()) {
        return Resolution::Defer(vec![(parent, axis)]);
    }
    let parent_origin = axis.get(pdata.geometry.slot);
    let extent_axis = axis.companion();

    match &pdata.strategy {
        Strategy::Free => Resolution::Ready(free_position(tree, parent, parent_origin, authored, axis)),
        Strategy::Stack(_) => {
            if pdata.strategy.stacked_axis() != Some(extent_axis) {
                return Resolution::Ready(parent_origin);
            }
            let mut acc = 0;
            let mut deps = Vec::new();
            for &sibling in tree.children(parent) {
                if sibling == id {
                    break;
                }
                let Some(sdata) = tree.get(sibling) else {
                    continue;
                };
                if sdata.geometry.requested.contains(extent_axis.flag()) {
                    deps.push((sibling, extent_axis));
                    continue;
                }
                acc += extent_axis.get(sdata.geometry.slot);
            }
            if !deps.is_empty() {
                return Resolution::Defer(deps);
            }
            Resolution::Ready(parent_origin + acc)
        }
        Strategy::Dock(state) => {
            let Some(entry) = state.entry_for(id) else {
                // Not docked: placed like a free child.
                return Resolution::Ready(free_position(tree, parent, parent_origin, authored, axis));
            };
            if state.orientation().stacked_axis() != Some(extent_axis) {
                // Cross axis: docked children span from the container edge.
                return Resolution::Ready(parent_origin);
            }
            // Main axis: walk preceding entries, consuming from whichever
            // end they were docked against. Far-edge placement also needs
            // the container's extent resolved.
            if pdata.geometry.requested.contains(extent_axis.flag()) {
                return Resolution::Defer(vec![(parent, extent_axis)]);
            }
            let mut near = parent_origin;
            let mut far = parent_origin + extent_axis.get(pdata.geometry.slot);
            let mut deps = Vec::new();
            for preceding in state.entries() {
                if preceding.child == id {
                    break;
                }
                let Some(sdata) = tree.get(preceding.child) else {
                    continue;
                };
                if sdata.geometry.requested.contains(extent_axis.flag()) {
                    deps.push((preceding.child, extent_axis));
                    continue;
                }
                let extent = extent_axis.get(sdata.geometry.slot);
                if preceding.edge.is_near() {
                    near += extent;
                } else {
                    far -= extent;
                }
            }
            if entry.edge.is_near() {
                if deps.is_empty() {
                    return Resolution::Ready(near);
                }
                return Resolution::Defer(deps);
            }
            // Far edge: the widget's own extent positions it.
            if data.geometry.requested.contains(extent_axis.flag()) {
                deps.push((id, extent_axis));
            }
            if !deps.is_empty() {
                return Resolution::Defer(deps);
            }
            Resolution::Ready(far - extent_axis.get(data.geometry.slot))
        }
    }
}

/// Free placement: parent origin plus authored offset, shifted by the
/// parent's scroll position.
fn free_position(
    tree: &WidgetTree,
    parent: WidgetId,
    parent_origin: i32,
    authored: i32,
    axis: Axis,
) -> i32 {
    let scroll = tree
        .get(parent)
        .map(|p| p.widget.scroll_offset())
        .unwrap_or_default();
    let scroll_component = match axis {
        Axis::X => scroll.x,
        _ => scroll.y,
    };
    parent_origin + authored - scroll_component
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Children that participate in the parent's stacking: dock entries for dock
/// containers, every child otherwise.
fn in_flow(tree: &WidgetTree, parent: WidgetId) -> Vec<WidgetId> {
    match tree.get(parent).map(|p| &p.strategy) {
        Some(Strategy::Dock(state)) => state.entries().iter().map(|e| e.child).collect(),
        _ => tree.children(parent).to_vec(),
    }
}

fn current_value(tree: &WidgetTree, id: WidgetId, axis: Axis) -> Resolution {
    match tree.get(id) {
        Some(data) => Resolution::Ready(axis.get(data.geometry.slot).max(0)),
        None => Resolution::Stale,
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Offset, Region};
    use crate::layout::dock::{dock, DockEdge};
    use crate::tree::{AxisFlags, Mount};
    use crate::widgets::{Label, Panel};
    use pretty_assertions::assert_eq;

    fn set_slot(tree: &mut WidgetTree, id: WidgetId, slot: Region) {
        tree.get_mut(id).unwrap().geometry.slot = slot;
    }

    fn mark_pending(tree: &mut WidgetTree, id: WidgetId, axis: Axis) {
        tree.get_mut(id).unwrap().geometry.requested.insert(axis.flag());
    }

    fn ready(resolution: Resolution) -> i32 {
        match resolution {
            Resolution::Ready(v) => v,
            other => panic!("expected Ready, got {other:?}"),
        }
    }

    // -----------------------------------------------------------------------
    // Fixed / Percent
    // -----------------------------------------------------------------------

    #[test]
    fn fixed_resolves_directly_and_clamps() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Mount::new(Panel::new()).width(Measure::Fixed(120)));
        assert_eq!(ready(resolve_axis(&tree, root, Axis::Width)), 120);

        tree.get_mut(root).unwrap().geometry.width = Measure::Fixed(-5);
        assert_eq!(ready(resolve_axis(&tree, root, Axis::Width)), 0);
    }

    #[test]
    fn percent_of_resolved_parent() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Mount::new(Panel::new()));
        set_slot(&mut tree, root, Region::new(0, 0, 300, 200));
        let child = tree
            .attach(root, Mount::new(Panel::new()).height(Measure::percent(50.0)))
            .unwrap();
        assert_eq!(ready(resolve_axis(&tree, child, Axis::Height)), 100);
    }

    #[test]
    fn percent_defers_on_pending_parent() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Mount::new(Panel::new()));
        let child = tree
            .attach(root, Mount::new(Panel::new()).width(Measure::percent(25.0)))
            .unwrap();
        mark_pending(&mut tree, root, Axis::Width);
        assert_eq!(
            resolve_axis(&tree, child, Axis::Width),
            Resolution::Defer(vec![(root, Axis::Width)])
        );
    }

    // -----------------------------------------------------------------------
    // Stretch
    // -----------------------------------------------------------------------

    #[test]
    fn stretch_takes_remaining_space_in_stack() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Mount::row(Panel::new()));
        set_slot(&mut tree, root, Region::new(0, 0, 300, 100));
        let a = tree
            .attach(root, Mount::new(Panel::new()).width(Measure::Fixed(100)))
            .unwrap();
        let b = tree
            .attach(root, Mount::new(Panel::new()).width(Measure::Fixed(50)))
            .unwrap();
        let stretched = tree.attach(root, Mount::new(Panel::new())).unwrap();
        set_slot(&mut tree, a, Region::new(0, 0, 100, 100));
        set_slot(&mut tree, b, Region::new(100, 0, 50, 100));

        assert_eq!(ready(resolve_axis(&tree, stretched, Axis::Width)), 150);
    }

    #[test]
    fn stretch_splits_among_stretched_siblings() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Mount::row(Panel::new()));
        set_slot(&mut tree, root, Region::new(0, 0, 200, 50));
        let s1 = tree.attach(root, Mount::new(Panel::new())).unwrap();
        let _s2 = tree.attach(root, Mount::new(Panel::new())).unwrap();
        assert_eq!(ready(resolve_axis(&tree, s1, Axis::Width)), 100);
    }

    #[test]
    fn stretch_defers_on_unresolved_sibling() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Mount::row(Panel::new()));
        set_slot(&mut tree, root, Region::new(0, 0, 300, 100));
        let fixed = tree
            .attach(root, Mount::new(Panel::new()).width(Measure::Fixed(100)))
            .unwrap();
        let stretched = tree.attach(root, Mount::new(Panel::new())).unwrap();
        mark_pending(&mut tree, fixed, Axis::Width);

        assert_eq!(
            resolve_axis(&tree, stretched, Axis::Width),
            Resolution::Defer(vec![(fixed, Axis::Width)])
        );
    }

    #[test]
    fn stretch_on_cross_axis_fills_parent() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Mount::row(Panel::new()));
        set_slot(&mut tree, root, Region::new(0, 0, 300, 80));
        let child = tree.attach(root, Mount::new(Panel::new())).unwrap();
        assert_eq!(ready(resolve_axis(&tree, child, Axis::Height)), 80);
    }

    #[test]
    fn stretch_never_goes_negative() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Mount::row(Panel::new()));
        set_slot(&mut tree, root, Region::new(0, 0, 50, 50));
        let big = tree
            .attach(root, Mount::new(Panel::new()).width(Measure::Fixed(80)))
            .unwrap();
        let stretched = tree.attach(root, Mount::new(Panel::new())).unwrap();
        set_slot(&mut tree, big, Region::new(0, 0, 80, 50));
        assert_eq!(ready(resolve_axis(&tree, stretched, Axis::Width)), 0);
    }

    // -----------------------------------------------------------------------
    // Fit
    // -----------------------------------------------------------------------

    #[test]
    fn fit_unions_resolved_children() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(
            Mount::new(Panel::new())
                .width(Measure::Fit)
                .height(Measure::Fit),
        );
        set_slot(&mut tree, root, Region::new(0, 0, 0, 0));
        let a = tree
            .attach(root, Mount::new(Panel::new()).offset(Offset::new(0, 0)))
            .unwrap();
        let b = tree
            .attach(root, Mount::new(Panel::new()).offset(Offset::new(20, 20)))
            .unwrap();
        set_slot(&mut tree, a, Region::new(0, 0, 40, 40));
        set_slot(&mut tree, b, Region::new(20, 20, 40, 40));

        assert_eq!(ready(resolve_axis(&tree, root, Axis::Width)), 60);
        assert_eq!(ready(resolve_axis(&tree, root, Axis::Height)), 60);
    }

    #[test]
    fn fit_defers_on_pending_children() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Mount::new(Panel::new()).width(Measure::Fit));
        let child = tree.attach(root, Mount::new(Panel::new())).unwrap();
        mark_pending(&mut tree, child, Axis::Width);
        assert_eq!(
            resolve_axis(&tree, root, Axis::Width),
            Resolution::Defer(vec![(child, Axis::Width)])
        );
    }

    #[test]
    fn childless_fit_uses_intrinsic_measure() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Mount::new(Panel::new()));
        set_slot(&mut tree, root, Region::new(0, 0, 400, 400));
        let label = tree
            .attach(
                root,
                Mount::new(Label::new("hi"))
                    .width(Measure::Fit)
                    .height(Measure::Fit),
            )
            .unwrap();
        assert_eq!(ready(resolve_axis(&tree, label, Axis::Width)), 16);
        assert_eq!(ready(resolve_axis(&tree, label, Axis::Height)), 16);
    }

    // -----------------------------------------------------------------------
    // Positions
    // -----------------------------------------------------------------------

    #[test]
    fn root_position_is_its_offset() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Mount::new(Panel::new()));
        assert_eq!(ready(resolve_axis(&tree, root, Axis::X)), 0);
        tree.get_mut(root).unwrap().geometry.offset = Offset::new(7, 9);
        assert_eq!(ready(resolve_axis(&tree, root, Axis::Y)), 9);
    }

    #[test]
    fn stack_positions_follow_preceding_extents() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Mount::column(Panel::new()));
        set_slot(&mut tree, root, Region::new(10, 10, 100, 100));
        let a = tree.attach(root, Mount::new(Panel::new())).unwrap();
        let b = tree.attach(root, Mount::new(Panel::new())).unwrap();
        set_slot(&mut tree, a, Region::new(10, 10, 100, 30));

        assert_eq!(ready(resolve_axis(&tree, a, Axis::Y)), 10);
        assert_eq!(ready(resolve_axis(&tree, b, Axis::Y)), 40);
        // Cross axis pins to the parent origin.
        assert_eq!(ready(resolve_axis(&tree, b, Axis::X)), 10);
    }

    #[test]
    fn stack_position_defers_on_pending_sibling_extent() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Mount::column(Panel::new()));
        set_slot(&mut tree, root, Region::new(0, 0, 100, 100));
        let a = tree.attach(root, Mount::new(Panel::new())).unwrap();
        let b = tree.attach(root, Mount::new(Panel::new())).unwrap();
        mark_pending(&mut tree, a, Axis::Height);
        assert_eq!(
            resolve_axis(&tree, b, Axis::Y),
            Resolution::Defer(vec![(a, Axis::Height)])
        );
    }

    #[test]
    fn free_position_applies_offset_and_scroll() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Mount::new(crate::widgets::Viewport::new()));
        set_slot(&mut tree, root, Region::new(5, 5, 100, 100));
        let child = tree
            .attach(root, Mount::new(Panel::new()).offset(Offset::new(10, 20)))
            .unwrap();
        assert_eq!(ready(resolve_axis(&tree, child, Axis::X)), 15);
        assert_eq!(ready(resolve_axis(&tree, child, Axis::Y)), 25);

        let data = tree.get_mut(root).unwrap();
        data.widget
            .as_any_mut()
            .downcast_mut::<crate::widgets::Viewport>()
            .unwrap()
            .scroll_by(0, 12);
        assert_eq!(ready(resolve_axis(&tree, child, Axis::Y)), 13);
    }

    // -----------------------------------------------------------------------
    // Dock positions
    // -----------------------------------------------------------------------

    #[test]
    fn dock_entries_stack_from_both_edges() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Mount::dock(Panel::new()));
        set_slot(&mut tree, root, Region::new(0, 0, 600, 400));
        let top = tree
            .attach(root, Mount::new(Panel::new()).height(Measure::Fixed(20)))
            .unwrap();
        let bottom = tree
            .attach(root, Mount::new(Panel::new()).height(Measure::Fixed(30)))
            .unwrap();
        dock(&mut tree, root, top, DockEdge::Top).unwrap();
        dock(&mut tree, root, bottom, DockEdge::Bottom).unwrap();
        set_slot(&mut tree, top, Region::new(0, 0, 600, 20));
        set_slot(&mut tree, bottom, Region::new(0, 0, 600, 30));

        assert_eq!(ready(resolve_axis(&tree, top, Axis::Y)), 0);
        assert_eq!(ready(resolve_axis(&tree, bottom, Axis::Y)), 370);
        // Cross axis spans from the container edge.
        assert_eq!(ready(resolve_axis(&tree, bottom, Axis::X)), 0);
    }

    #[test]
    fn later_bottom_entry_sits_above_earlier_one() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Mount::dock(Panel::new()));
        set_slot(&mut tree, root, Region::new(0, 0, 100, 100));
        let first = tree
            .attach(root, Mount::new(Panel::new()).height(Measure::Fixed(10)))
            .unwrap();
        let second = tree
            .attach(root, Mount::new(Panel::new()).height(Measure::Fixed(10)))
            .unwrap();
        dock(&mut tree, root, first, DockEdge::Bottom).unwrap();
        dock(&mut tree, root, second, DockEdge::Bottom).unwrap();
        set_slot(&mut tree, first, Region::new(0, 0, 100, 10));
        set_slot(&mut tree, second, Region::new(0, 0, 100, 10));

        assert_eq!(ready(resolve_axis(&tree, first, Axis::Y)), 90);
        assert_eq!(ready(resolve_axis(&tree, second, Axis::Y)), 80);
    }

    #[test]
    fn dead_widget_is_stale() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Mount::new(Panel::new()));
        let child = tree.attach(root, Mount::new(Panel::new())).unwrap();
        tree.detach(child).unwrap();
        assert_eq!(resolve_axis(&tree, child, Axis::Width), Resolution::Stale);
    }

    #[test]
    fn pending_flags_are_observed_not_cleared() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Mount::new(Panel::new()));
        mark_pending(&mut tree, root, Axis::Width);
        let _ = resolve_axis(&tree, root, Axis::Width);
        assert!(tree
            .get(root)
            .unwrap()
            .geometry
            .requested
            .contains(AxisFlags::WIDTH));
    }
}
