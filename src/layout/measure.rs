//! Sizing intent: the Measure model.

use std::fmt;

/// Declarative sizing intent for one extent axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measure {
    /// A fixed pixel extent.
    Fixed(i32),
    /// A percentage of the parent's resolved extent, in `[0, 100]`.
    Percent(f32),
    /// Fill the space left over after non-stretched siblings.
    Stretch,
    /// Size to content: the union of resolved child slots, or the widget's
    /// intrinsic measure for a childless widget.
    Fit,
}

impl Measure {
    /// Create a percentage measure, clamping into `[0, 100]`.
    pub fn percent(value: f32) -> Self {
        Measure::Percent(value.clamp(0.0, 100.0))
    }

    /// Resolve a percentage against a parent extent. Non-finite and
    /// out-of-range fractions are clamped before scaling.
    pub(crate) fn scale_percent(value: f32, parent_extent: i32) -> i32 {
        let pct = if value.is_finite() { value.clamp(0.0, 100.0) } else { 0.0 };
        (parent_extent as f32 * pct / 100.0).round() as i32
    }

    /// Whether this measure depends on the parent's extent.
    pub fn needs_parent(&self) -> bool {
        matches!(self, Measure::Percent(_) | Measure::Stretch)
    }

    /// Whether this measure depends on resolved children.
    pub fn needs_children(&self) -> bool {
        matches!(self, Measure::Fit)
    }
}

impl Default for Measure {
    fn default() -> Self {
        Measure::Stretch
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measure::Fixed(px) => write!(f, "{px}px"),
            Measure::Percent(pct) => {
                if pct.fract() == 0.0 {
                    write!(f, "{}%", *pct as i64)
                } else {
                    write!(f, "{pct}%")
                }
            }
            Measure::Stretch => write!(f, "stretch"),
            Measure::Fit => write!(f, "fit"),
        }
    }
}
