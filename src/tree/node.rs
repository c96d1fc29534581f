//! Node types: WidgetId, Axis, AxisFlags, GeometryState, Strategy, Mount.

use bitflags::bitflags;
use slotmap::new_key_type;

use crate::geometry::{Offset, Region};
use crate::layout::dock::DockState;
use crate::layout::measure::Measure;
use crate::widget::Widget;

new_key_type! {
    /// Generational identifier for a widget node. Copy, lightweight (u64).
    pub struct WidgetId;
}

// ---------------------------------------------------------------------------
// Axis
// ---------------------------------------------------------------------------

/// One geometry axis of a widget's slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Width,
    Height,
}

impl Axis {
    /// All four axes, extents before positions.
    pub const ALL: [Axis; 4] = [Axis::Width, Axis::Height, Axis::X, Axis::Y];

    /// The matching [`AxisFlags`] bit.
    #[inline]
    pub const fn flag(self) -> AxisFlags {
        match self {
            Axis::X => AxisFlags::X,
            Axis::Y => AxisFlags::Y,
            Axis::Width => AxisFlags::WIDTH,
            Axis::Height => AxisFlags::HEIGHT,
        }
    }

    /// Whether this is an extent axis (Width/Height) rather than a position.
    #[inline]
    pub const fn is_extent(self) -> bool {
        matches!(self, Axis::Width | Axis::Height)
    }

    /// The paired axis on the same dimension: `Width <-> X`, `Height <-> Y`.
    #[inline]
    pub const fn companion(self) -> Axis {
        match self {
            Axis::X => Axis::Width,
            Axis::Y => Axis::Height,
            Axis::Width => Axis::X,
            Axis::Height => Axis::Y,
        }
    }

    /// Stable index into per-axis arrays.
    #[inline]
    pub(crate) const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Width => 2,
            Axis::Height => 3,
        }
    }

    /// Read this axis' component out of a region.
    #[inline]
    pub const fn get(self, region: Region) -> i32 {
        match self {
            Axis::X => region.x,
            Axis::Y => region.y,
            Axis::Width => region.width,
            Axis::Height => region.height,
        }
    }

    /// Write this axis' component into a region.
    #[inline]
    pub fn set(self, region: &mut Region, value: i32) {
        match self {
            Axis::X => region.x = value,
            Axis::Y => region.y = value,
            Axis::Width => region.width = value,
            Axis::Height => region.height = value,
        }
    }
}

bitflags! {
    /// Bitmask over the four layout axes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct AxisFlags: u8 {
        const X = 1;
        const Y = 2;
        const WIDTH = 4;
        const HEIGHT = 8;
    }
}

// ---------------------------------------------------------------------------
// GeometryState
// ---------------------------------------------------------------------------

/// Per-widget mutable geometry record.
///
/// `registered` tracks which axes already have a pending layout queue entry
/// (at most one per axis); `requested` tracks which axes still need
/// resolution. A widget is never painted while any `requested` bit is set.
#[derive(Debug)]
pub struct GeometryState {
    /// Requested sizing intent for the horizontal extent.
    pub width: Measure,
    /// Requested sizing intent for the vertical extent.
    pub height: Measure,
    /// Authored position, used by free-placement containers.
    pub offset: Offset,
    /// The resolved absolute rectangle this widget occupies.
    pub slot: Region,
    /// Axes with an outstanding queue entry.
    pub registered: AxisFlags,
    /// Axes awaiting resolution.
    pub requested: AxisFlags,
    stamps: [u32; 4],
}

impl GeometryState {
    /// Create a state with the given extent measures and no resolved slot.
    pub fn new(width: Measure, height: Measure) -> Self {
        Self {
            width,
            height,
            offset: Offset::ZERO,
            slot: Region::EMPTY,
            registered: AxisFlags::empty(),
            requested: AxisFlags::empty(),
            stamps: [0; 4],
        }
    }

    /// The sizing intent governing an axis. Position axes report the measure
    /// of their companion extent.
    pub fn measure(&self, axis: Axis) -> Measure {
        match axis {
            Axis::X | Axis::Width => self.width,
            Axis::Y | Axis::Height => self.height,
        }
    }

    /// Whether every axis has been resolved.
    pub fn is_resolved(&self) -> bool {
        self.requested.is_empty()
    }

    /// Current invalidation stamp for an axis.
    pub(crate) fn stamp(&self, axis: Axis) -> u32 {
        self.stamps[axis.index()]
    }

    /// Advance an axis' invalidation stamp, superseding any queued entry.
    pub(crate) fn bump(&mut self, axis: Axis) -> u32 {
        let slot = &mut self.stamps[axis.index()];
        *slot = slot.wrapping_add(1);
        *slot
    }
}

// ---------------------------------------------------------------------------
// Strategy
// ---------------------------------------------------------------------------

/// Direction a stack container flows its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Horizontal,
    Vertical,
}

/// How a container positions its children.
///
/// Selected by composition: any widget can be mounted with any strategy.
#[derive(Debug)]
pub enum Strategy {
    /// Children placed end to end along one axis, stretching on the other.
    Stack(Flow),
    /// Children snapped against container edges; see [`DockState`].
    Dock(DockState),
    /// Children placed at their authored offsets.
    Free,
}

impl Strategy {
    /// The extent axis along which children consume space, if any.
    pub fn stacked_axis(&self) -> Option<Axis> {
        match self {
            Strategy::Stack(Flow::Horizontal) => Some(Axis::Width),
            Strategy::Stack(Flow::Vertical) => Some(Axis::Height),
            Strategy::Dock(state) => state.orientation().stacked_axis(),
            Strategy::Free => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Mount
// ---------------------------------------------------------------------------

/// A widget plus the geometry it should be attached with.
///
/// This is the unit external loaders hand to `Interface::attach`, and the
/// unit composite widgets return from [`Widget::compose`].
pub struct Mount {
    pub widget: Box<dyn Widget>,
    pub width: Measure,
    pub height: Measure,
    pub offset: Offset,
    pub strategy: Strategy,
    pub visible: bool,
}

impl Mount {
    /// Mount a widget with stretch sizing and free child placement.
    pub fn new(widget: impl Widget + 'static) -> Self {
        Self {
            widget: Box::new(widget),
            width: Measure::Stretch,
            height: Measure::Stretch,
            offset: Offset::ZERO,
            strategy: Strategy::Free,
            visible: true,
        }
    }

    /// Mount a container that stacks children top to bottom.
    pub fn column(widget: impl Widget + 'static) -> Self {
        Self::new(widget).strategy(Strategy::Stack(Flow::Vertical))
    }

    /// Mount a container that stacks children left to right.
    pub fn row(widget: impl Widget + 'static) -> Self {
        Self::new(widget).strategy(Strategy::Stack(Flow::Horizontal))
    }

    /// Mount a dock container with no orientation fixed yet.
    pub fn dock(widget: impl Widget + 'static) -> Self {
        Self::new(widget).strategy(Strategy::Dock(DockState::new()))
    }

    /// Set the width measure (builder).
    pub fn width(mut self, measure: Measure) -> Self {
        self.width = measure;
        self
    }

    /// Set the height measure (builder).
    pub fn height(mut self, measure: Measure) -> Self {
        self.height = measure;
        self
    }

    /// Set the authored offset (builder).
    pub fn offset(mut self, offset: Offset) -> Self {
        self.offset = offset;
        self
    }

    /// Set the child-placement strategy (builder).
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set initial visibility (builder).
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::Panel;

    #[test]
    fn axis_flags_match_axes() {
        assert_eq!(Axis::X.flag(), AxisFlags::X);
        assert_eq!(Axis::Height.flag(), AxisFlags::HEIGHT);
        let all: AxisFlags = Axis::ALL.iter().fold(AxisFlags::empty(), |acc, a| acc | a.flag());
        assert_eq!(all, AxisFlags::all());
    }

    #[test]
    fn axis_companions_pair_dimensions() {
        assert_eq!(Axis::X.companion(), Axis::Width);
        assert_eq!(Axis::Width.companion(), Axis::X);
        assert_eq!(Axis::Y.companion(), Axis::Height);
        assert_eq!(Axis::Height.companion(), Axis::Y);
    }

    #[test]
    fn axis_get_set_roundtrip() {
        let mut r = Region::new(1, 2, 3, 4);
        for (axis, expect) in [(Axis::X, 1), (Axis::Y, 2), (Axis::Width, 3), (Axis::Height, 4)] {
            assert_eq!(axis.get(r), expect);
            axis.set(&mut r, expect + 10);
            assert_eq!(axis.get(r), expect + 10);
        }
    }

    #[test]
    fn geometry_state_defaults() {
        let g = GeometryState::new(Measure::Fixed(10), Measure::Stretch);
        assert_eq!(g.slot, Region::EMPTY);
        assert!(g.is_resolved());
        assert_eq!(g.measure(Axis::Width), Measure::Fixed(10));
        assert_eq!(g.measure(Axis::X), Measure::Fixed(10));
        assert_eq!(g.measure(Axis::Height), Measure::Stretch);
    }

    #[test]
    fn stamps_advance_per_axis() {
        let mut g = GeometryState::new(Measure::Stretch, Measure::Stretch);
        assert_eq!(g.stamp(Axis::Width), 0);
        assert_eq!(g.bump(Axis::Width), 1);
        assert_eq!(g.bump(Axis::Width), 2);
        // Other axes unaffected.
        assert_eq!(g.stamp(Axis::Height), 0);
    }

    #[test]
    fn strategy_stacked_axis() {
        assert_eq!(Strategy::Stack(Flow::Horizontal).stacked_axis(), Some(Axis::Width));
        assert_eq!(Strategy::Stack(Flow::Vertical).stacked_axis(), Some(Axis::Height));
        assert_eq!(Strategy::Free.stacked_axis(), None);
        assert_eq!(Strategy::Dock(DockState::new()).stacked_axis(), None);
    }

    #[test]
    fn mount_builders() {
        let m = Mount::column(Panel::new())
            .width(Measure::Fixed(100))
            .height(Measure::percent(50.0))
            .offset(Offset::new(5, 6))
            .visible(false);
        assert_eq!(m.width, Measure::Fixed(100));
        assert_eq!(m.height, Measure::Percent(50.0));
        assert_eq!(m.offset, Offset::new(5, 6));
        assert!(!m.visible);
        assert!(matches!(m.strategy, Strategy::Stack(Flow::Vertical)));
    }
}
