//! The orchestrator: one document, one lock, one update cycle.
//!
//! An [`Interface`] owns the widget tree, the layout queue, the damage
//! tracker, and the shared pixel buffer as a single lock-guarded document.
//! Host threads mutate the tree through cloned `Interface` handles; a
//! dedicated pump thread runs the update cycle on a fixed interval; the
//! windowing backend takes composited [`Frame`] snapshots with
//! [`Interface::poll_frame`]. Every access goes through one re-entrant lock
//! per instance, so observer callbacks may call straight back into the
//! interface from the thread that notified them. Widget code running inside
//! a paint or event pass mutates geometry through its context's
//! [`CycleRequest`]s, which the cycle applies between passes.

use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use parking_lot::{Mutex, ReentrantMutex};

use crate::error::{InterfaceError, StructuralError};
use crate::event::{InputEvent, MouseButton};
use crate::geometry::{Offset, Region, Size};
use crate::layout::dock::{self, DockEdge, DockOutcome};
use crate::layout::measure::Measure;
use crate::layout::queue::LayoutQueue;
use crate::observe::{GeometryEvent, Subscribers, SubscriptionId};
use crate::render::buffer::{FramePatch, PixelBuffer};
use crate::render::compositor::composite;
use crate::render::damage::DamageTracker;
use crate::tree::{Axis, Mount, WidgetId, WidgetTree};
use crate::widget::{CycleRequest, EventCtx, PaintCtx, Widget};
use crate::widgets::Panel;

/// Layout/paint passes one cycle may run before deferring leftover work to
/// the next cycle. Paint callbacks that invalidate geometry converge within
/// a pass or two; anything deeper is someone's feedback loop.
const MAX_CYCLE_PASSES: usize = 4;

// ---------------------------------------------------------------------------
// InterfaceConfig
// ---------------------------------------------------------------------------

/// Configuration for one interface instance.
#[derive(Debug, Clone)]
pub struct InterfaceConfig {
    /// Initial surface width in pixels.
    pub width: i32,
    /// Initial surface height in pixels.
    pub height: i32,
    /// Interval between background update cycles.
    pub pump_interval: Duration,
    /// Damage rectangles tracked before collapsing to a bounding box.
    pub max_damage_regions: usize,
    /// Canvas coverage fraction that promotes damage to a full repaint.
    pub collapse_coverage: f32,
    /// Pixel distance from a container edge that counts as a dock zone.
    pub dock_threshold: i32,
}

impl Default for InterfaceConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            pump_interval: Duration::from_millis(16),
            max_damage_regions: crate::render::damage::DEFAULT_MAX_REGIONS,
            collapse_coverage: crate::render::damage::DEFAULT_COLLAPSE_COVERAGE,
            dock_threshold: 24,
        }
    }
}

impl InterfaceConfig {
    /// Create a default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial surface size (builder).
    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the pump interval (builder).
    pub fn with_pump_interval(mut self, interval: Duration) -> Self {
        self.pump_interval = interval;
        self
    }

    /// Set the damage collapse limits (builder).
    pub fn with_damage_limits(mut self, max_regions: usize, collapse_coverage: f32) -> Self {
        self.max_damage_regions = max_regions;
        self.collapse_coverage = collapse_coverage;
        self
    }

    /// Set the dock zone threshold (builder).
    pub fn with_dock_threshold(mut self, threshold: i32) -> Self {
        self.dock_threshold = threshold;
        self
    }
}

// ---------------------------------------------------------------------------
// Phase / Frame
// ---------------------------------------------------------------------------

/// Where the update cycle currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    LayoutPending,
    Painting,
    Compositing,
}

/// One composited handoff: the patches that changed since the last cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Current surface dimensions.
    pub canvas: Size,
    /// Changed sub-rectangles, tightly packed ARGB.
    pub patches: Vec<FramePatch>,
}

impl Frame {
    /// Whether nothing changed this cycle.
    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// Everything one interface instance owns, guarded by the update lock.
struct Document {
    tree: WidgetTree,
    root: WidgetId,
    queue: LayoutQueue,
    damage: DamageTracker,
    buffer: PixelBuffer,
    phase: Phase,
    config: InterfaceConfig,
}

impl Document {
    fn new(config: InterfaceConfig) -> Result<Self, InterfaceError> {
        let size = Size::new(config.width, config.height);
        let buffer = PixelBuffer::new(size)?;
        let damage = DamageTracker::with_limits(size, config.max_damage_regions, config.collapse_coverage);

        let mut tree = WidgetTree::new();
        let root = tree.insert_root(
            Mount::dock(Panel::new())
                .width(Measure::Fixed(size.width))
                .height(Measure::Fixed(size.height)),
        );
        let mut queue = LayoutQueue::new();
        queue.enqueue_tree(&mut tree, root);

        Ok(Self {
            tree,
            root,
            queue,
            damage,
            buffer,
            phase: Phase::LayoutPending,
            config,
        })
    }

    fn mark_pending(&mut self) {
        if self.phase == Phase::Idle && (!self.queue.is_empty() || self.damage.pending()) {
            self.phase = Phase::LayoutPending;
        }
    }

    /// One full update cycle: drain layout, paint damaged widgets, drain
    /// damage, composite. Idempotent: with no pending work it does nothing
    /// and returns an empty frame.
    fn run_cycle(&mut self, events: &mut Vec<GeometryEvent>) -> Frame {
        if self.queue.is_empty() && !self.damage.pending() {
            self.phase = Phase::Idle;
            return Frame { canvas: self.buffer.size(), patches: Vec::new() };
        }

        let mut requests: Vec<CycleRequest> = Vec::new();
        let mut passes = 0;
        loop {
            self.phase = Phase::LayoutPending;
            let _ = self.queue.drain(&mut self.tree, &mut self.damage, events);

            self.phase = Phase::Painting;
            self.paint_pass(&mut requests);

            if requests.is_empty() {
                break;
            }
            self.apply_requests(&mut requests);
            passes += 1;
            if passes >= MAX_CYCLE_PASSES {
                // Leftover nested invalidations carry into the next cycle.
                break;
            }
        }

        self.phase = Phase::Compositing;
        let dirty = self.damage.drain();
        let patches = composite(&self.buffer, dirty);
        self.phase = if self.queue.is_empty() { Phase::Idle } else { Phase::LayoutPending };
        Frame { canvas: self.buffer.size(), patches }
    }

    /// Repaint every visible widget whose slot intersects pending damage,
    /// in pre-order (parents beneath children, earlier siblings beneath
    /// later ones).
    fn paint_pass(&mut self, requests: &mut Vec<CycleRequest>) {
        // Scope the whole pass to the damaged area: a widget overlapping it
        // repaints only the overlap, so damage never balloons to the slot of
        // whichever ancestor happens to span the surface.
        let Some(scope) = self.damage.pending_bounds() else {
            return;
        };
        let clip = self.buffer.bounds().intersection(scope);
        if clip.is_empty() {
            return;
        }
        self.paint_rec(self.root, clip, requests);
    }

    fn paint_rec(&mut self, id: WidgetId, clip: Region, requests: &mut Vec<CycleRequest>) {
        let Some(data) = self.tree.get(id) else {
            return;
        };
        if !data.visible {
            return;
        }
        // A widget with pending axes is never painted; its subtree waits for
        // the next drain to produce a fully resolved slot.
        if !data.geometry.is_resolved() {
            return;
        }
        let slot = data.geometry.slot;
        let child_clip = if data.widget.clips_children() {
            clip.intersection(slot)
        } else {
            clip
        };

        let target = slot.intersection(clip);
        if self.damage.covers(target) {
            if let Some(data) = self.tree.get_mut(id) {
                let mut ctx = PaintCtx {
                    buffer: &mut self.buffer,
                    damage: &mut self.damage,
                    requests,
                    widget: id,
                    slot,
                    clip,
                    painted: false,
                };
                match data.widget.paint(&mut ctx) {
                    // Pixels actually written join the damage set so widgets
                    // stacked above repaint over them in turn.
                    Ok(()) => {
                        if ctx.painted {
                            self.damage.report(target);
                        }
                    }
                    Err(err) => log::warn!(
                        "paint of {:?} ({}) failed: {err}; region skipped this cycle",
                        id,
                        data.widget.type_name()
                    ),
                }
            }
        }

        for child in self.tree.children(id).to_vec() {
            self.paint_rec(child, child_clip, requests);
        }
    }

    /// Apply geometry mutations queued by paint and event callbacks.
    fn apply_requests(&mut self, requests: &mut Vec<CycleRequest>) {
        for request in requests.drain(..) {
            match request {
                CycleRequest::Layout(id, axis) => {
                    self.queue.invalidate(&mut self.tree, id, axis);
                }
                CycleRequest::Paint(id) => {
                    if let Some(data) = self.tree.get(id) {
                        self.damage.report(data.geometry.slot);
                    }
                }
                CycleRequest::ChildPositions(id) => {
                    for child in self.tree.children(id).to_vec() {
                        self.queue.invalidate(&mut self.tree, child, Axis::X);
                        self.queue.invalidate(&mut self.tree, child, Axis::Y);
                    }
                }
            }
        }
    }

    /// Re-request the geometry that depends on a container's membership:
    /// stretched extents and positions of its children, plus its own
    /// fit extents.
    fn reflow_container(&mut self, container: WidgetId) {
        for child in self.tree.children(container).to_vec() {
            for axis in [Axis::Width, Axis::Height] {
                let stretches = self
                    .tree
                    .get(child)
                    .is_some_and(|c| matches!(c.geometry.measure(axis), Measure::Stretch));
                if stretches {
                    self.queue.enqueue(&mut self.tree, child, axis);
                }
            }
            self.queue.enqueue(&mut self.tree, child, Axis::X);
            self.queue.enqueue(&mut self.tree, child, Axis::Y);
        }
        for axis in [Axis::Width, Axis::Height] {
            let fits = self
                .tree
                .get(container)
                .is_some_and(|c| c.geometry.measure(axis).needs_children());
            if fits {
                self.queue.enqueue(&mut self.tree, container, axis);
            }
        }
    }

    /// Topmost visible widget hit by a point: the last match in painting
    /// order is the one drawn on top.
    fn hit_test(&self, x: i32, y: i32) -> Option<WidgetId> {
        let mut hit = None;
        for id in self.tree.walk_pre_order(self.root) {
            let Some(data) = self.tree.get(id) else {
                continue;
            };
            if !data.visible || !data.geometry.is_resolved() {
                continue;
            }
            let slot = data.geometry.slot;
            if slot.contains(x, y) && data.widget.hit_test(x, y, slot) {
                hit = Some(id);
            }
        }
        hit
    }

    /// Dispatch an input event to the widget under it, bubbling to ancestors
    /// until one handles it.
    fn dispatch_input(&mut self, event: InputEvent) -> bool {
        let (x, y) = event.position();
        let Some(target) = self.hit_test(x, y) else {
            return false;
        };
        let mut chain = vec![target];
        chain.extend(self.tree.ancestors(target));

        let mut requests = Vec::new();
        let mut handled = false;
        for id in chain {
            let Some(data) = self.tree.get_mut(id) else {
                continue;
            };
            let slot = data.geometry.slot;
            let mut ctx = EventCtx { requests: &mut requests, widget: id, slot };
            if data.widget.on_event(&event, &mut ctx) {
                handled = true;
                break;
            }
        }
        self.apply_requests(&mut requests);
        self.mark_pending();
        handled
    }
}

// ---------------------------------------------------------------------------
// Interface
// ---------------------------------------------------------------------------

struct Shared {
    doc: ReentrantMutex<RefCell<Document>>,
    subscribers: Mutex<Subscribers>,
    frame_slot: Mutex<Option<Frame>>,
}

/// A cloneable handle to one widget-toolkit instance.
///
/// All methods serialize on the instance's re-entrant update lock.
#[derive(Clone)]
pub struct Interface {
    shared: Arc<Shared>,
}

impl Interface {
    /// Create an instance with a fixed-size root dock container.
    ///
    /// Fails only for an unusable surface — the fatal initialization case;
    /// everything later is contained per cycle.
    pub fn new(config: InterfaceConfig) -> Result<Self, InterfaceError> {
        let document = Document::new(config)?;
        Ok(Self {
            shared: Arc::new(Shared {
                doc: ReentrantMutex::new(RefCell::new(document)),
                subscribers: Mutex::new(Subscribers::new()),
                frame_slot: Mutex::new(None),
            }),
        })
    }

    /// The root widget: a dock container spanning the surface.
    pub fn root(&self) -> WidgetId {
        self.with_doc(|doc, _| doc.root)
    }

    /// The current update-cycle phase.
    pub fn phase(&self) -> Phase {
        self.with_doc(|doc, _| doc.phase)
    }

    // -- tree mutation ------------------------------------------------------

    /// Attach a mounted widget (and anything it composes) under `parent`.
    pub fn attach(&self, parent: WidgetId, mount: Mount) -> Result<WidgetId, StructuralError> {
        self.with_doc(|doc, _| {
            let id = doc.tree.attach(parent, mount)?;
            doc.queue.enqueue_tree(&mut doc.tree, id);
            doc.reflow_container(parent);
            doc.mark_pending();
            Ok(id)
        })
    }

    /// Remove a widget subtree.
    ///
    /// Outstanding layout requests for the subtree are implicitly cancelled;
    /// the vacated pixels become damage.
    pub fn detach(&self, id: WidgetId) -> Result<(), StructuralError> {
        self.with_doc(|doc, _| {
            let parent = doc.tree.parent(id);
            let vacated = doc.tree.detach(id)?;
            for region in vacated {
                doc.damage.report(region);
            }
            if let Some(parent) = parent {
                doc.reflow_container(parent);
            }
            doc.mark_pending();
            Ok(())
        })
    }

    /// Replace a widget's width measure.
    pub fn set_width(&self, id: WidgetId, measure: Measure) -> Result<(), StructuralError> {
        self.set_measure(id, Axis::Width, measure)
    }

    /// Replace a widget's height measure.
    pub fn set_height(&self, id: WidgetId, measure: Measure) -> Result<(), StructuralError> {
        self.set_measure(id, Axis::Height, measure)
    }

    fn set_measure(&self, id: WidgetId, axis: Axis, measure: Measure) -> Result<(), StructuralError> {
        self.with_doc(|doc, _| {
            let data = doc.tree.get_mut(id).ok_or(StructuralError::DeadWidget(id))?;
            match axis {
                Axis::Width => data.geometry.width = measure,
                _ => data.geometry.height = measure,
            }
            doc.queue.invalidate(&mut doc.tree, id, axis);
            doc.mark_pending();
            Ok(())
        })
    }

    /// Replace a widget's authored offset (free placement).
    pub fn set_offset(&self, id: WidgetId, offset: Offset) -> Result<(), StructuralError> {
        self.with_doc(|doc, _| {
            let data = doc.tree.get_mut(id).ok_or(StructuralError::DeadWidget(id))?;
            data.geometry.offset = offset;
            doc.queue.invalidate(&mut doc.tree, id, Axis::X);
            doc.queue.invalidate(&mut doc.tree, id, Axis::Y);
            doc.mark_pending();
            Ok(())
        })
    }

    /// Show or hide a widget. Hidden widgets keep their slot.
    pub fn set_visible(&self, id: WidgetId, visible: bool) -> Result<(), StructuralError> {
        self.with_doc(|doc, _| {
            let data = doc.tree.get_mut(id).ok_or(StructuralError::DeadWidget(id))?;
            if data.visible != visible {
                data.visible = visible;
                let slot = data.geometry.slot;
                doc.damage.report(slot);
                doc.mark_pending();
            }
            Ok(())
        })
    }

    /// Repaint a widget without changing geometry.
    pub fn request_paint(&self, id: WidgetId) -> Result<(), StructuralError> {
        self.with_doc(|doc, _| {
            let data = doc.tree.get(id).ok_or(StructuralError::DeadWidget(id))?;
            let slot = data.geometry.slot;
            doc.damage.report(slot);
            doc.mark_pending();
            Ok(())
        })
    }

    // -- docking ------------------------------------------------------------

    /// Dock `child` against an edge of `container`.
    pub fn dock(
        &self,
        container: WidgetId,
        child: WidgetId,
        edge: DockEdge,
    ) -> Result<DockOutcome, StructuralError> {
        self.with_doc(|doc, _| {
            let outcome = dock::dock(&mut doc.tree, container, child, edge)?;
            for axis in Axis::ALL {
                doc.queue.invalidate(&mut doc.tree, child, axis);
            }
            if let DockOutcome::Wrapped(nested) = outcome {
                doc.queue.enqueue_tree(&mut doc.tree, nested);
            }
            doc.reflow_container(container);
            doc.mark_pending();
            Ok(outcome)
        })
    }

    /// Remove `child` from its container's docked list.
    pub fn undock(&self, child: WidgetId) -> Result<(), StructuralError> {
        self.with_doc(|doc, _| {
            let parent = doc.tree.parent(child);
            dock::undock(&mut doc.tree, child)?;
            for axis in Axis::ALL {
                doc.queue.invalidate(&mut doc.tree, child, axis);
            }
            if let Some(parent) = parent {
                doc.reflow_container(parent);
            }
            doc.mark_pending();
            Ok(())
        })
    }

    /// The stack orientation a dock container is locked to, or `None` for
    /// widgets that are not dock containers.
    pub fn dock_orientation(&self, container: WidgetId) -> Option<dock::Orientation> {
        self.with_doc(|doc, _| match &doc.tree.get(container)?.strategy {
            crate::tree::Strategy::Dock(state) => Some(state.orientation()),
            _ => None,
        })
    }

    /// The dock edge a drag at (x, y) would target, within the configured
    /// pixel threshold of `container`'s edges.
    pub fn dock_zone_at(&self, container: WidgetId, x: i32, y: i32) -> Option<DockEdge> {
        self.with_doc(|doc, _| {
            let slot = doc.tree.get(container)?.geometry.slot;
            dock::edge_at(slot, x, y, doc.config.dock_threshold)
        })
    }

    // -- widget access ------------------------------------------------------

    /// The widget's resolved slot, if it is alive.
    pub fn slot_of(&self, id: WidgetId) -> Option<Region> {
        self.with_doc(|doc, _| doc.tree.get(id).map(|d| d.geometry.slot))
    }

    /// Read a widget's concrete type.
    pub fn with_widget<W: Widget + 'static, R>(
        &self,
        id: WidgetId,
        f: impl FnOnce(&W) -> R,
    ) -> Option<R> {
        self.with_doc(|doc, _| {
            doc.tree
                .get(id)
                .and_then(|d| d.widget.as_any().downcast_ref::<W>())
                .map(f)
        })
    }

    /// Mutate a widget's concrete type.
    ///
    /// The widget is repainted, and fit-sized extents re-resolve in case its
    /// intrinsic content changed.
    pub fn update_widget<W: Widget + 'static, R>(
        &self,
        id: WidgetId,
        f: impl FnOnce(&mut W) -> R,
    ) -> Option<R> {
        self.with_doc(|doc, _| {
            let result = doc
                .tree
                .get_mut(id)
                .and_then(|d| d.widget.as_any_mut().downcast_mut::<W>())
                .map(f)?;
            if let Some(data) = doc.tree.get(id) {
                doc.damage.report(data.geometry.slot);
            }
            for axis in [Axis::Width, Axis::Height] {
                let fits = doc
                    .tree
                    .get(id)
                    .is_some_and(|d| d.geometry.measure(axis).needs_children());
                if fits {
                    doc.queue.invalidate(&mut doc.tree, id, axis);
                }
            }
            doc.mark_pending();
            Some(result)
        })
    }

    // -- cycle and frames ---------------------------------------------------

    /// Run one update cycle and return the composited frame.
    pub fn update_cycle(&self) -> Frame {
        self.with_doc(|doc, events| doc.run_cycle(events))
    }

    /// Take the latest frame the pump published, if any.
    pub fn poll_frame(&self) -> Option<Frame> {
        self.shared.frame_slot.lock().take()
    }

    /// Start the background update pump.
    ///
    /// The pump runs [`Interface::update_cycle`] on the configured interval
    /// and publishes non-empty frames for [`Interface::poll_frame`]. Stops
    /// when the returned handle is stopped or dropped.
    pub fn start_pump(&self) -> Result<PumpHandle, InterfaceError> {
        let interval = self.with_doc(|doc, _| doc.config.pump_interval);
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);
        let interface = self.clone();
        let thread = thread::Builder::new()
            .name("sash-pump".into())
            .spawn(move || {
                log::debug!("update pump started at {interval:?}");
                while !stop_flag.load(Ordering::Relaxed) {
                    let frame = interface.update_cycle();
                    if !frame.is_empty() {
                        *interface.shared.frame_slot.lock() = Some(frame);
                    }
                    thread::sleep(interval);
                }
                log::debug!("update pump stopped");
            })?;
        Ok(PumpHandle { stop, thread: Some(thread) })
    }

    // -- host event entry points --------------------------------------------

    /// Adopt a new surface size: reallocates the buffer, resizes the root,
    /// and invalidates everything.
    pub fn process_resize(&self, size: Size) -> Result<(), InterfaceError> {
        self.with_doc(|doc, _| {
            if size == doc.buffer.size() {
                return Ok(());
            }
            doc.buffer = PixelBuffer::new(size)?;
            doc.damage.resize(size);
            let root = doc.root;
            if let Some(data) = doc.tree.get_mut(root) {
                data.geometry.width = Measure::Fixed(size.width);
                data.geometry.height = Measure::Fixed(size.height);
            }
            doc.queue.invalidate(&mut doc.tree, root, Axis::Width);
            doc.queue.invalidate(&mut doc.tree, root, Axis::Height);
            doc.mark_pending();
            Ok(())
        })
    }

    /// Route a pointer move to the widget under it.
    pub fn process_mouse_move(&self, x: i32, y: i32) -> bool {
        self.process_event(InputEvent::PointerMoved { x, y })
    }

    /// Route a button press/release to the widget under it.
    pub fn process_mouse_button(&self, button: MouseButton, pressed: bool, x: i32, y: i32) -> bool {
        self.process_event(InputEvent::PointerButton { button, pressed, x, y })
    }

    /// Route scroll input to the widget under it.
    pub fn process_scroll(&self, x: i32, y: i32, dx: i32, dy: i32) -> bool {
        self.process_event(InputEvent::Scroll { x, y, dx, dy })
    }

    fn process_event(&self, event: InputEvent) -> bool {
        self.with_doc(|doc, _| doc.dispatch_input(event))
    }

    // -- observers ----------------------------------------------------------

    /// Subscribe to geometry events. Callbacks run on whichever thread ran
    /// the cycle, after the document borrow is released, so they may call
    /// back into this interface.
    pub fn subscribe(
        &self,
        callback: impl Fn(&GeometryEvent) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.shared.subscribers.lock().subscribe(callback)
    }

    /// Remove a subscription.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.shared.subscribers.lock().unsubscribe(id)
    }

    // -- internals ----------------------------------------------------------

    fn with_doc<R>(&self, f: impl FnOnce(&mut Document, &mut Vec<GeometryEvent>) -> R) -> R {
        let mut events = Vec::new();
        let guard = self.shared.doc.lock();
        let result = {
            let mut doc = guard.borrow_mut();
            f(&mut doc, &mut events)
        };
        drop(guard);
        self.dispatch_events(events);
        result
    }

    fn dispatch_events(&self, events: Vec<GeometryEvent>) {
        if events.is_empty() {
            return;
        }
        let callbacks = self.shared.subscribers.lock().snapshot();
        for event in &events {
            for callback in &callbacks {
                callback(event);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// PumpHandle
// ---------------------------------------------------------------------------

/// Owner of the background pump thread. Stops the pump on drop.
pub struct PumpHandle {
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl PumpHandle {
    /// Stop the pump and join its thread.
    pub fn stop(mut self) {
        self.halt();
    }

    fn halt(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for PumpHandle {
    fn drop(&mut self) {
        self.halt();
    }
}

// ===========================================================================
// Tests
// ===========================================================================
