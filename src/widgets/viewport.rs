//! Viewport: a scrolling container that clips its children.

use std::any::Any;

use crate::error::PaintError;
use crate::event::InputEvent;
use crate::geometry::Offset;
use crate::widget::{EventCtx, PaintCtx, Widget};

/// A scrollable, clipping container.
///
/// Children are mounted with the free strategy and placed at their authored
/// offsets shifted by the current scroll position; anything outside the
/// viewport's slot is clipped away during paint.
#[derive(Debug, Default, Clone)]
pub struct Viewport {
    scroll: Offset,
    background: Option<u32>,
}

impl Viewport {
    /// A viewport scrolled to the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ARGB background color (builder).
    pub fn background(mut self, color: u32) -> Self {
        self.background = Some(color);
        self
    }

    /// The current scroll position.
    pub fn scroll(&self) -> Offset {
        self.scroll
    }

    /// Scroll by a delta, clamping each component at zero.
    pub fn scroll_by(&mut self, dx: i32, dy: i32) {
        self.scroll.x = (self.scroll.x + dx).max(0);
        self.scroll.y = (self.scroll.y + dy).max(0);
    }
}

impl Widget for Viewport {
    fn type_name(&self) -> &'static str {
        "Viewport"
    }

    fn paint(&mut self, ctx: &mut PaintCtx<'_>) -> Result<(), PaintError> {
        if let Some(color) = self.background {
            ctx.fill_slot(color);
        }
        Ok(())
    }

    fn on_event(&mut self, event: &InputEvent, ctx: &mut EventCtx<'_>) -> bool {
        match *event {
            InputEvent::Scroll { dx, dy, .. } => {
                let before = self.scroll;
                self.scroll_by(dx, dy);
                if self.scroll != before {
                    ctx.request_child_positions();
                    ctx.request_paint();
                }
                true
            }
            _ => false,
        }
    }

    fn clips_children(&self) -> bool {
        true
    }

    fn scroll_offset(&self) -> Offset {
        self.scroll
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
