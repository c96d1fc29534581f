//! The incremental layout queue.
//!
//! An ordered, deduplicating work queue of per-axis resolution requests.
//! The `registered` bit in each widget's geometry guarantees at most one
//! outstanding entry per (widget, axis); per-axis stamps make the newest
//! invalidation win when requests race. Requests whose inputs are not yet
//! resolved are deferred behind their dependencies; a bounded deferral count
//! turns genuine cycles into pinned last-known-good values instead of a
//! spinning drain.

use std::collections::VecDeque;

use crate::error::LayoutFault;
use crate::layout::resolve::{resolve_axis, Resolution};
use crate::observe::GeometryEvent;
use crate::render::damage::DamageTracker;
use crate::tree::{Axis, WidgetId, WidgetTree};

/// Deferrals allowed per request before the axis is pinned.
const MAX_DEFERRALS: u32 = 32;

/// One pending (widget, axis) resolution request.
#[derive(Debug, Clone, Copy)]
struct LayoutRequest {
    widget: WidgetId,
    axis: Axis,
    stamp: u32,
    deferrals: u32,
}

/// Counters for one drain pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DrainOutcome {
    /// Requests that produced a value.
    pub resolved: usize,
    /// Requests dropped as stale (dead widget or superseded stamp).
    pub discarded: usize,
    /// Requeues behind unresolved dependencies.
    pub deferred: usize,
    /// Axes pinned after failing to converge.
    pub faults: usize,
}

/// The layout scheduler.
#[derive(Debug, Default)]
pub struct LayoutQueue {
    queue: VecDeque<LayoutRequest>,
}

impl LayoutQueue {
    /// An empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of outstanding requests.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether no requests are outstanding.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Request resolution of one axis.
    ///
    /// Idempotent: if the axis already has an outstanding entry this only
    /// re-marks it as requested. Dead widgets are ignored.
    pub fn enqueue(&mut self, tree: &mut WidgetTree, id: WidgetId, axis: Axis) {
        let Some(data) = tree.get_mut(id) else {
            return;
        };
        let flag = axis.flag();
        data.geometry.requested.insert(flag);
        if data.geometry.registered.contains(flag) {
            return;
        }
        data.geometry.registered.insert(flag);
        self.queue.push_back(LayoutRequest {
            widget: id,
            axis,
            stamp: data.geometry.stamp(axis),
            deferrals: 0,
        });
    }

    /// Request resolution of one axis, superseding any queued entry.
    ///
    /// The stamp advances, so an entry already in the queue is discarded on
    /// pop and chased by a fresh one: the last invalidation wins.
    pub fn invalidate(&mut self, tree: &mut WidgetTree, id: WidgetId, axis: Axis) {
        if let Some(data) = tree.get_mut(id) {
            data.geometry.bump(axis);
        }
        self.enqueue(tree, id, axis);
    }

    /// Enqueue every axis of a widget and all of its descendants.
    pub fn enqueue_tree(&mut self, tree: &mut WidgetTree, start: WidgetId) {
        for id in tree.walk_pre_order(start) {
            for axis in Axis::ALL {
                self.enqueue(tree, id, axis);
            }
        }
    }

    /// Resolve outstanding requests until none remain.
    ///
    /// Slot changes are reported to `damage` (old and new rectangle) and to
    /// `events`; dependent axes are re-enqueued transitively. Stale requests
    /// are discarded, never resolved. The pass always terminates: deferrals
    /// are bounded per request and a global budget backstops cascades.
    pub fn drain(
        &mut self,
        tree: &mut WidgetTree,
        damage: &mut DamageTracker,
        events: &mut Vec<GeometryEvent>,
    ) -> DrainOutcome {
        let mut outcome = DrainOutcome::default();
        let budget = drain_budget(tree.len(), self.queue.len());
        let mut processed = 0usize;

        while let Some(mut request) = self.queue.pop_front() {
            processed += 1;
            if processed > budget {
                log::warn!(
                    "layout drain exceeded its budget of {budget} steps; pinning {} outstanding axes",
                    self.queue.len() + 1
                );
                self.pin(tree, request.widget, request.axis, events, &mut outcome);
                let rest: Vec<_> = self.queue.drain(..).collect();
                for stuck in rest {
                    self.pin(tree, stuck.widget, stuck.axis, events, &mut outcome);
                }
                break;
            }

            let Some(data) = tree.get(request.widget) else {
                outcome.discarded += 1;
                continue;
            };
            let current_stamp = data.geometry.stamp(request.axis);
            if current_stamp != request.stamp {
                // Superseded while queued. The registered bit is still held
                // by this entry, so chase with a fresh request if the axis
                // still wants resolution.
                outcome.discarded += 1;
                if data.geometry.requested.contains(request.axis.flag()) {
                    self.queue.push_back(LayoutRequest {
                        widget: request.widget,
                        axis: request.axis,
                        stamp: current_stamp,
                        deferrals: 0,
                    });
                }
                continue;
            }

            match resolve_axis(tree, request.widget, request.axis) {
                Resolution::Stale => outcome.discarded += 1,
                Resolution::Defer(deps) => {
                    request.deferrals += 1;
                    if request.deferrals > MAX_DEFERRALS {
                        self.pin(tree, request.widget, request.axis, events, &mut outcome);
                    } else {
                        for (dep_id, dep_axis) in deps {
                            self.enqueue(tree, dep_id, dep_axis);
                        }
                        outcome.deferred += 1;
                        self.queue.push_back(request);
                    }
                }
                Resolution::Ready(value) => {
                    outcome.resolved += 1;
                    self.commit(tree, request.widget, request.axis, value, damage, events);
                }
            }
        }
        outcome
    }

    /// Apply a resolved value: clear the axis bits, update the slot, and on
    /// change report damage and re-enqueue dependents.
    fn commit(
        &mut self,
        tree: &mut WidgetTree,
        id: WidgetId,
        axis: Axis,
        value: i32,
        damage: &mut DamageTracker,
        events: &mut Vec<GeometryEvent>,
    ) {
        let Some(data) = tree.get_mut(id) else {
            return;
        };
        let flag = axis.flag();
        data.geometry.requested.remove(flag);
        data.geometry.registered.remove(flag);

        let old = data.geometry.slot;
        let mut new = old;
        axis.set(&mut new, value);
        if new == old {
            return;
        }
        data.geometry.slot = new;

        damage.report(old);
        damage.report(new);
        events.push(GeometryEvent::SlotChanged { widget: id, old, new });
        self.cascade(tree, id, axis);
    }

    /// Re-enqueue the axes whose inputs just changed.
    fn cascade(&mut self, tree: &mut WidgetTree, id: WidgetId, axis: Axis) {
        let children: Vec<WidgetId> = tree.children(id).to_vec();
        if axis.is_extent() {
            // Children sized against this extent, and every child position
            // along the same dimension (stacks and far-edge docks move).
            for child in children {
                let sized_by_parent = tree
                    .get(child)
                    .is_some_and(|c| c.geometry.measure(axis).needs_parent());
                if sized_by_parent {
                    self.enqueue(tree, child, axis);
                }
                self.enqueue(tree, child, axis.companion());
            }
            // A far-edge docked widget moves when its own extent changes.
            self.enqueue(tree, id, axis.companion());

            if let Some(parent) = tree.parent(id) {
                let (stacked, parent_fits) = match tree.get(parent) {
                    Some(p) => (
                        p.strategy.stacked_axis() == Some(axis),
                        p.geometry.measure(axis).needs_children(),
                    ),
                    None => (false, false),
                };
                if stacked {
                    for sibling in tree.children(parent).to_vec() {
                        if sibling == id {
                            continue;
                        }
                        let stretches = tree.get(sibling).is_some_and(|s| {
                            matches!(s.geometry.measure(axis), crate::layout::measure::Measure::Stretch)
                        });
                        if stretches {
                            self.enqueue(tree, sibling, axis);
                        }
                        self.enqueue(tree, sibling, axis.companion());
                    }
                }
                if parent_fits {
                    self.enqueue(tree, parent, axis);
                }
            }
        } else {
            // A moved widget translates its children and can change the
            // content bounds a fit-sized self or parent unions over.
            for child in children {
                self.enqueue(tree, child, axis);
            }
            let extent = axis.companion();
            let self_fits = tree
                .get(id)
                .is_some_and(|d| d.geometry.measure(extent).needs_children());
            if self_fits {
                self.enqueue(tree, id, extent);
            }
            if let Some(parent) = tree.parent(id) {
                let parent_fits = tree
                    .get(parent)
                    .is_some_and(|p| p.geometry.measure(extent).needs_children());
                if parent_fits {
                    self.enqueue(tree, parent, extent);
                }
            }
        }
    }

    /// Pin a non-converging axis at its last-known-good value.
    fn pin(
        &mut self,
        tree: &mut WidgetTree,
        id: WidgetId,
        axis: Axis,
        events: &mut Vec<GeometryEvent>,
        outcome: &mut DrainOutcome,
    ) {
        let Some(data) = tree.get_mut(id) else {
            outcome.discarded += 1;
            return;
        };
        data.geometry.requested.remove(axis.flag());
        data.geometry.registered.remove(axis.flag());
        let pinned = axis.get(data.geometry.slot);
        log::warn!("layout axis {axis:?} of {id:?} failed to converge; pinned at {pinned}");
        events.push(GeometryEvent::Fault(LayoutFault { widget: id, axis, pinned }));
        outcome.faults += 1;
    }
}

/// Steps a drain may take before pinning whatever is left.
///
/// Generous enough for any converging cascade over the tree, small enough to
/// stop a misconfigured tree from spinning the update thread.
fn drain_budget(tree_len: usize, queued: usize) -> usize {
    ((tree_len * 4).max(16) + queued) * (MAX_DEFERRALS as usize + 1)
}

// ===========================================================================
// Tests
// ===========================================================================
