//! Panel: the general-purpose container widget.

use std::any::Any;

use crate::error::PaintError;
use crate::widget::{PaintCtx, Widget};

/// A rectangular container, optionally filled with a background color.
///
/// How its children are placed is decided by the [`crate::tree::Strategy`]
/// it is mounted with, not by the widget itself.
#[derive(Debug, Default, Clone)]
pub struct Panel {
    background: Option<u32>,
}

impl Panel {
    /// A panel with no background fill.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ARGB background color (builder).
    pub fn background(mut self, color: u32) -> Self {
        self.background = Some(color);
        self
    }
}

impl Widget for Panel {
    fn type_name(&self) -> &'static str {
        "Panel"
    }

    fn paint(&mut self, ctx: &mut PaintCtx<'_>) -> Result<(), PaintError> {
        if let Some(color) = self.background {
            ctx.fill_slot(color);
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Region, Size};
    use crate::render::buffer::PixelBuffer;
    use crate::render::damage::DamageTracker;
    use crate::tree::WidgetId;

    #[test]
    fn panel_paints_background() {
        let mut buffer = PixelBuffer::new(Size::new(10, 10)).unwrap();
        let mut damage = DamageTracker::new(Size::new(10, 10));
        let mut requests = Vec::new();
        let mut panel = Panel::new().background(0xFF12_3456);
        let mut ctx = PaintCtx {
            buffer: &mut buffer,
            damage: &mut damage,
            requests: &mut requests,
            widget: WidgetId::default(),
            slot: Region::new(1, 1, 4, 4),
            clip: Region::new(0, 0, 10, 10),
            painted: false,
        };
        panel.paint(&mut ctx).unwrap();
        assert_eq!(buffer.pixel(1, 1), Some(0xFF12_3456));
        assert_eq!(buffer.pixel(0, 0), Some(0x0000_0000));
    }

    #[test]
    fn bare_panel_paints_nothing() {
        let mut buffer = PixelBuffer::new(Size::new(10, 10)).unwrap();
        let mut damage = DamageTracker::new(Size::new(10, 10));
        let mut requests = Vec::new();
        let mut panel = Panel::new();
        let mut ctx = PaintCtx {
            buffer: &mut buffer,
            damage: &mut damage,
            requests: &mut requests,
            widget: WidgetId::default(),
            slot: Region::new(0, 0, 10, 10),
            clip: Region::new(0, 0, 10, 10),
            painted: false,
        };
        panel.paint(&mut ctx).unwrap();
        assert!(buffer.pixels().iter().all(|&p| p == 0x0000_0000));
    }
}
