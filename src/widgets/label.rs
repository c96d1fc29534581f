//! Label: a leaf widget with intrinsic, content-driven sizing.

use std::any::Any;

use crate::error::PaintError;
use crate::geometry::Size;
use crate::widget::{PaintCtx, Widget};

/// Nominal per-glyph advance used for intrinsic sizing. Hosts with a real
/// text shaper mount labels with explicit measures instead.
const GLYPH_ADVANCE: i32 = 8;
/// Nominal line height for intrinsic sizing.
const LINE_HEIGHT: i32 = 16;

/// A single line of text.
///
/// Glyph rendering belongs to the host backend; the core's responsibility
/// ends at reserving a correctly-sized slot and filling its background.
#[derive(Debug, Clone)]
pub struct Label {
    text: String,
    background: Option<u32>,
}

impl Label {
    /// Create a label.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            background: None,
        }
    }

    /// Set the ARGB background color (builder).
    pub fn background(mut self, color: u32) -> Self {
        self.background = Some(color);
        self
    }

    /// The label's text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text. The caller re-resolves fit axes and repaints.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl Widget for Label {
    fn type_name(&self) -> &'static str {
        "Label"
    }

    fn measure(&self, _available: Size) -> Size {
        Size::new(self.text.chars().count() as i32 * GLYPH_ADVANCE, LINE_HEIGHT)
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
    use pretty_assertions::assert_eq;

    #[test]
    fn intrinsic_size_tracks_text_length() {
        let label = Label::new("hello");
        assert_eq!(label.measure(Size::ZERO), Size::new(5 * GLYPH_ADVANCE, LINE_HEIGHT));
        assert_eq!(Label::new("").measure(Size::ZERO), Size::new(0, LINE_HEIGHT));
    }

    #[test]
    fn intrinsic_size_counts_chars_not_bytes() {
        let label = Label::new("héllo");
        assert_eq!(label.measure(Size::ZERO).width, 5 * GLYPH_ADVANCE);
    }

    #[test]
    fn set_text_replaces_content() {
        let mut label = Label::new("a");
        label.set_text("abc");
        assert_eq!(label.text(), "abc");
        assert_eq!(label.measure(Size::ZERO).width, 3 * GLYPH_ADVANCE);
    }
}
