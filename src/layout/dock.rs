//! Edge docking: orientation locking, nested wrapping, zone detection.
//!
//! A dock container stacks docked children against its edges. The first dock
//! fixes the container's stack orientation; a later dock perpendicular to the
//! locked orientation wraps into a nested dock container instead of mutating
//! it. Docking couples the child's cross-axis measure to the container
//! (stretch) while the main-axis measure stays as authored.

use crate::error::StructuralError;
use crate::geometry::Region;
use crate::layout::measure::Measure;
use crate::tree::{Axis, Mount, Strategy, WidgetId, WidgetTree};
use crate::widgets::Panel;

// ---------------------------------------------------------------------------
// DockEdge / Orientation
// ---------------------------------------------------------------------------

/// The container edge a child is snapped against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DockEdge {
    Top,
    Bottom,
    Left,
    Right,
}

impl DockEdge {
    /// The stack orientation this edge implies.
    pub const fn orientation(self) -> Orientation {
        match self {
            DockEdge::Top | DockEdge::Bottom => Orientation::Vertical,
            DockEdge::Left | DockEdge::Right => Orientation::Horizontal,
        }
    }

    /// Whether children stack from the near edge (Top/Left) rather than the
    /// far edge (Bottom/Right).
    pub const fn is_near(self) -> bool {
        matches!(self, DockEdge::Top | DockEdge::Left)
    }

    /// The extent axis docked children consume along this edge's stack.
    pub const fn main_axis(self) -> Axis {
        match self {
            DockEdge::Top | DockEdge::Bottom => Axis::Height,
            DockEdge::Left | DockEdge::Right => Axis::Width,
        }
    }
}

/// Stack orientation of a dock container.
///
/// `Unset` until the first dock; stable until the last docked child leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Unset,
    Horizontal,
    Vertical,
}

impl Orientation {
    /// The extent axis children consume, if the orientation is fixed.
    pub const fn stacked_axis(self) -> Option<Axis> {
        match self {
            Orientation::Unset => None,
            Orientation::Horizontal => Some(Axis::Width),
            Orientation::Vertical => Some(Axis::Height),
        }
    }

    /// Whether a dock against `edge` is allowed without wrapping.
    pub const fn accepts(self, edge: DockEdge) -> bool {
        match self {
            Orientation::Unset => true,
            Orientation::Horizontal => matches!(edge, DockEdge::Left | DockEdge::Right),
            Orientation::Vertical => matches!(edge, DockEdge::Top | DockEdge::Bottom),
        }
    }

    /// The near edge of a fixed orientation (Top or Left).
    const fn near_edge(self) -> Option<DockEdge> {
        match self {
            Orientation::Unset => None,
            Orientation::Horizontal => Some(DockEdge::Left),
            Orientation::Vertical => Some(DockEdge::Top),
        }
    }
}

// ---------------------------------------------------------------------------
// DockState
// ---------------------------------------------------------------------------

/// One docked child and the edge it was docked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DockEntry {
    pub child: WidgetId,
    pub edge: DockEdge,
}

/// Per-container docking record: the locked orientation plus the ordered
/// list of docked children.
#[derive(Debug, Default)]
pub struct DockState {
    orientation: Orientation,
    entries: Vec<DockEntry>,
}

impl DockState {
    /// An empty dock with no orientation fixed.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current stack orientation.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Docked children in dock order.
    pub fn entries(&self) -> &[DockEntry] {
        &self.entries
    }

    /// The entry for a child, if it is docked here.
    pub fn entry_for(&self, child: WidgetId) -> Option<DockEntry> {
        self.entries.iter().copied().find(|e| e.child == child)
    }

    pub(crate) fn push_entry(&mut self, child: WidgetId, edge: DockEdge) {
        if self.orientation == Orientation::Unset {
            self.orientation = edge.orientation();
        }
        self.entries.push(DockEntry { child, edge });
    }

    /// Remove a child's entry. The orientation resets to `Unset` once the
    /// last docked child is gone. Returns whether an entry was removed.
    pub(crate) fn remove_entry(&mut self, child: WidgetId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.child != child);
        if self.entries.is_empty() {
            self.orientation = Orientation::Unset;
        }
        before != self.entries.len()
    }
}

// ---------------------------------------------------------------------------
// Dock operations
// ---------------------------------------------------------------------------

/// Result of a dock request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockOutcome {
    /// The child was docked directly into the container.
    Docked,
    /// The request was perpendicular to the locked orientation; the child
    /// was docked inside this newly inserted nested container instead.
    Wrapped(WidgetId),
}

/// Dock `child` against an edge of `container`.
///
/// The child is reparented into the container if necessary. Its cross-axis
/// measure is set to [`Measure::Stretch`]; the main-axis measure stays as
/// authored, so a Top-docked panel keeps its height but fills the width.
pub fn dock(
    tree: &mut WidgetTree,
    container: WidgetId,
    child: WidgetId,
    edge: DockEdge,
) -> Result<DockOutcome, StructuralError> {
    let data = tree.get(container).ok_or(StructuralError::DeadWidget(container))?;
    let orientation = match &data.strategy {
        Strategy::Dock(state) => state.orientation(),
        _ => return Err(StructuralError::NotADock(container)),
    };
    if !tree.contains(child) {
        return Err(StructuralError::DeadWidget(child));
    }

    if !orientation.accepts(edge) {
        // Perpendicular request: wrap in a nested dock that fills the
        // remaining stack space, then dock the child inside it.
        let near = orientation
            .near_edge()
            .expect("locked orientation must have a near edge");
        let nested = tree.attach(container, Mount::dock(Panel::new()))?;
        register_entry(tree, container, nested, near);
        dock(tree, nested, child, edge)?;
        return Ok(DockOutcome::Wrapped(nested));
    }

    if tree.parent(child) != Some(container) {
        tree.reparent(child, container)?;
    }
    register_entry(tree, container, child, edge);
    Ok(DockOutcome::Docked)
}

/// Remove `child` from its container's docked list.
///
/// The child stays attached (positioned by its authored offset); the
/// container's orientation resets to `Unset` if no docked children remain.
pub fn undock(tree: &mut WidgetTree, child: WidgetId) -> Result<(), StructuralError> {
    let parent = tree.parent(child).ok_or(StructuralError::NotDocked(child))?;
    let data = tree.get_mut(parent).ok_or(StructuralError::DeadWidget(parent))?;
    match &mut data.strategy {
        Strategy::Dock(state) => {
            if state.remove_entry(child) {
                Ok(())
            } else {
                Err(StructuralError::NotDocked(child))
            }
        }
        _ => Err(StructuralError::NotDocked(child)),
    }
}

/// Map a point near a container edge to the edge a drag gesture targets.
///
/// Returns `None` outside the container or beyond `threshold` pixels from
/// every edge. Within threshold of two edges at a corner, the horizontal
/// edges (Top/Bottom) win, matching the orientation rule's vertical bias.
pub fn edge_at(slot: Region, x: i32, y: i32, threshold: i32) -> Option<DockEdge> {
    if !slot.contains(x, y) {
        return None;
    }
    let candidates = [
        (DockEdge::Top, y - slot.y),
        (DockEdge::Bottom, slot.bottom() - 1 - y),
        (DockEdge::Left, x - slot.x),
        (DockEdge::Right, slot.right() - 1 - x),
    ];
    let mut best: Option<(DockEdge, i32)> = None;
    for (edge, dist) in candidates {
        if dist <= threshold && best.map_or(true, |(_, d)| dist < d) {
            best = Some((edge, dist));
        }
    }
    best.map(|(edge, _)| edge)
}

fn register_entry(tree: &mut WidgetTree, container: WidgetId, child: WidgetId, edge: DockEdge) {
    if let Some(data) = tree.get_mut(container) {
        if let Strategy::Dock(state) = &mut data.strategy {
            state.push_entry(child, edge);
        }
    }
    if let Some(data) = tree.get_mut(child) {
        match edge.main_axis() {
            Axis::Height => data.geometry.width = Measure::Stretch,
            _ => data.geometry.height = Measure::Stretch,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
