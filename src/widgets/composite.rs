//! Composite: a widget expanded from a mount template.

use std::any::Any;

use crate::error::PaintError;
use crate::widget::{PaintCtx, Widget};
use crate::tree::Mount;

/// A templated composite widget.
///
/// Holds a list of [`Mount`]s that are expanded into real children when the
/// composite is attached to the tree. External loaders that build subtrees
/// from markup produce these.
#[derive(Default)]
pub struct Composite {
    template: Vec<Mount>,
    background: Option<u32>,
}

impl Composite {
    /// Create a composite from a template.
    pub fn new(template: Vec<Mount>) -> Self {
        Self {
            template,
            background: None,
        }
    }

    /// Append one mount to the template (builder).
    pub fn child(mut self, mount: Mount) -> Self {
        self.template.push(mount);
        self
    }

    /// Set the ARGB background color (builder).
    pub fn background(mut self, color: u32) -> Self {
        self.background = Some(color);
        self
    }
}

impl Widget for Composite {
    fn type_name(&self) -> &'static str {
        "Composite"
    }

    fn compose(&mut self) -> Vec<Mount> {
        std::mem::take(&mut self.template)
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
