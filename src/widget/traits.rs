//! Widget trait: measure, paint, hit-test, event handling.
//!
//! `Widget` is the capability interface every widget variant implements.
//! It is object-safe; geometry lives in the tree's `GeometryState`, not in
//! the widget, so implementations stay plain data plus drawing code. Widgets
//! that need to mutate geometry from inside a paint or event callback queue
//! [`CycleRequest`]s through their context instead of touching the tree —
//! the update cycle applies them after the pass, which is what keeps nested
//! mutation deadlock-free.

use std::any::Any;

use crate::error::PaintError;
use crate::event::InputEvent;
use crate::geometry::{Offset, Region, Size};
use crate::render::buffer::PixelBuffer;
use crate::render::damage::DamageTracker;
use crate::tree::{Axis, Mount, WidgetId};

// ---------------------------------------------------------------------------
// Widget trait
// ---------------------------------------------------------------------------

/// Core trait implemented by all widgets.
///
/// `Send` is required because the document — widgets included — is driven
/// from the background update thread.
pub trait Widget: Send {
    /// The widget's type name (e.g. "Panel", "Label").
    fn type_name(&self) -> &'static str;

    /// Intrinsic content size, consulted when a childless widget is mounted
    /// with fit sizing. `available` is the parent's current extent.
    fn measure(&self, _available: Size) -> Size {
        Size::ZERO
    }

    /// Child widgets to mount beneath this one when it enters the tree.
    ///
    /// Defaults to none (leaf widget). Templated composites expand here.
    fn compose(&mut self) -> Vec<Mount> {
        Vec::new()
    }

    /// Draw into the shared buffer within the resolved slot.
    ///
    /// A failure is logged by the update cycle and the widget's region
    /// skipped for that cycle only.
    fn paint(&mut self, ctx: &mut PaintCtx<'_>) -> Result<(), PaintError>;

    /// Whether a point inside the slot actually hits this widget.
    ///
    /// Defaults to the whole slot. Override for non-rectangular targets.
    fn hit_test(&self, x: i32, y: i32, slot: Region) -> bool {
        slot.contains(x, y)
    }

    /// Handle an input event dispatched to this widget.
    ///
    /// Return `true` to stop the event from bubbling to ancestors.
    fn on_event(&mut self, _event: &InputEvent, _ctx: &mut EventCtx<'_>) -> bool {
        false
    }

    /// Whether descendants paint only inside this widget's slot.
    fn clips_children(&self) -> bool {
        false
    }

    /// Scroll displacement applied to free-placed children.
    fn scroll_offset(&self) -> Offset {
        Offset::ZERO
    }

    /// Downcast to `&dyn Any` for runtime type inspection.
    fn as_any(&self) -> &dyn Any;

    /// Downcast to `&mut dyn Any` for mutable runtime type inspection.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

// ---------------------------------------------------------------------------
// CycleRequest
// ---------------------------------------------------------------------------

/// A geometry mutation requested from inside a paint or event callback,
/// applied by the update cycle once the current pass finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleRequest {
    /// Re-resolve one axis of a widget.
    Layout(WidgetId, Axis),
    /// Repaint a widget without geometry changes.
    Paint(WidgetId),
    /// Re-resolve the positions of a widget's children (scrolling).
    ChildPositions(WidgetId),
}

// ---------------------------------------------------------------------------
// PaintCtx
// ---------------------------------------------------------------------------

/// Paint access to the shared buffer, clipped to the widget's slot.
pub struct PaintCtx<'a> {
    pub(crate) buffer: &'a mut PixelBuffer,
    pub(crate) damage: &'a mut DamageTracker,
    pub(crate) requests: &'a mut Vec<CycleRequest>,
    pub(crate) widget: WidgetId,
    pub(crate) slot: Region,
    pub(crate) clip: Region,
    pub(crate) painted: bool,
}

impl PaintCtx<'_> {
    /// The widget's resolved slot in absolute pixels.
    pub fn slot(&self) -> Region {
        self.slot
    }

    /// Fill a rectangle, clipped to the slot and any ancestor clip.
    pub fn fill(&mut self, rect: Region, color: u32) {
        let clipped = rect.intersection(self.slot).intersection(self.clip);
        if !clipped.is_empty() {
            self.buffer.fill_rect(clipped, color);
            self.painted = true;
        }
    }

    /// Fill the entire slot.
    pub fn fill_slot(&mut self, color: u32) {
        self.fill(self.slot, color);
    }

    /// Report extra damage beyond the widget's own slot.
    pub fn report_dirty(&mut self, rect: Region) {
        self.damage.report(rect);
    }

    /// Request re-resolution of one of this widget's axes after the pass.
    pub fn request_layout(&mut self, axis: Axis) {
        self.requests.push(CycleRequest::Layout(self.widget, axis));
    }

    /// Request another repaint of this widget after the pass.
    pub fn request_paint(&mut self) {
        self.requests.push(CycleRequest::Paint(self.widget));
    }
}

// ---------------------------------------------------------------------------
// EventCtx
// ---------------------------------------------------------------------------

/// Invalidation access for event handlers.
pub struct EventCtx<'a> {
    pub(crate) requests: &'a mut Vec<CycleRequest>,
    pub(crate) widget: WidgetId,
    pub(crate) slot: Region,
}

impl EventCtx<'_> {
    /// The widget's resolved slot in absolute pixels.
    pub fn slot(&self) -> Region {
        self.slot
    }

    /// Request re-resolution of one of this widget's axes.
    pub fn request_layout(&mut self, axis: Axis) {
        self.requests.push(CycleRequest::Layout(self.widget, axis));
    }

    /// Request a repaint of this widget.
    pub fn request_paint(&mut self) {
        self.requests.push(CycleRequest::Paint(self.widget));
    }

    /// Request re-resolution of this widget's children's positions.
    pub fn request_child_positions(&mut self) {
        self.requests.push(CycleRequest::ChildPositions(self.widget));
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;
    use pretty_assertions::assert_eq;

    struct Probe;

    impl Widget for Probe {
        fn type_name(&self) -> &'static str {
            "Probe"
        }

        fn paint(&mut self, ctx: &mut PaintCtx<'_>) -> Result<(), PaintError> {
            ctx.fill_slot(0xFF00_FF00);
            Ok(())
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    fn paint_probe(slot: Region, clip: Region) -> (PixelBuffer, Vec<CycleRequest>) {
        let mut buffer = PixelBuffer::new(Size::new(20, 20)).unwrap();
        let mut damage = DamageTracker::new(Size::new(20, 20));
        let mut requests = Vec::new();
        let mut ctx = PaintCtx {
            buffer: &mut buffer,
            damage: &mut damage,
            requests: &mut requests,
            widget: WidgetId::default(),
            slot,
            clip,
            painted: false,
        };
        Probe.paint(&mut ctx).unwrap();
        (buffer, requests)
    }

    #[test]
    fn widget_defaults() {
        let probe = Probe;
        assert_eq!(probe.measure(Size::new(100, 100)), Size::ZERO);
        assert!(probe.hit_test(5, 5, Region::new(0, 0, 10, 10)));
        assert!(!probe.hit_test(15, 5, Region::new(0, 0, 10, 10)));
        assert!(!probe.clips_children());
        assert_eq!(probe.scroll_offset(), Offset::ZERO);
    }

    #[test]
    fn widget_is_object_safe() {
        let mut boxed: Box<dyn Widget> = Box::new(Probe);
        assert_eq!(boxed.type_name(), "Probe");
        assert!(boxed.compose().is_empty());
        assert!(boxed.as_any().downcast_ref::<Probe>().is_some());
    }

    #[test]
    fn paint_fill_is_clipped_to_slot() {
        let slot = Region::new(2, 2, 5, 5);
        let (buffer, _) = paint_probe(slot, Region::new(0, 0, 20, 20));
        assert_eq!(buffer.pixel(2, 2), Some(0xFF00_FF00));
        assert_eq!(buffer.pixel(6, 6), Some(0xFF00_FF00));
        assert_eq!(buffer.pixel(7, 7), Some(0x0000_0000));
    }

    #[test]
    fn paint_fill_respects_ancestor_clip() {
        let slot = Region::new(0, 0, 10, 10);
        let (buffer, _) = paint_probe(slot, Region::new(0, 0, 4, 4));
        assert_eq!(buffer.pixel(3, 3), Some(0xFF00_FF00));
        assert_eq!(buffer.pixel(5, 5), Some(0x0000_0000));
    }

    #[test]
    fn context_requests_accumulate() {
        let mut buffer = PixelBuffer::new(Size::new(10, 10)).unwrap();
        let mut damage = DamageTracker::new(Size::new(10, 10));
        let mut requests = Vec::new();
        let id = WidgetId::default();
        let mut ctx = PaintCtx {
            buffer: &mut buffer,
            damage: &mut damage,
            requests: &mut requests,
            widget: id,
            slot: Region::new(0, 0, 5, 5),
            clip: Region::new(0, 0, 10, 10),
            painted: false,
        };
        ctx.request_layout(Axis::Width);
        ctx.request_paint();
        assert_eq!(
            requests,
            vec![CycleRequest::Layout(id, Axis::Width), CycleRequest::Paint(id)]
        );
    }
}
