//! Error taxonomy.
//!
//! Structural misuse fails fast and synchronously ([`StructuralError`]);
//! instance-fatal conditions surface at construction ([`InterfaceError`]);
//! layout non-convergence is contained and reported as a [`LayoutFault`]
//! value rather than thrown across the update thread; paint failures
//! ([`PaintError`]) are logged and the affected region skipped for one cycle.

use crate::tree::{Axis, WidgetId};

/// Invalid tree or dock operation. The tree is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StructuralError {
    /// The referenced widget has been removed from the tree.
    #[error("widget {0:?} is not in the tree")]
    DeadWidget(WidgetId),

    /// Attaching here would make a widget its own ancestor.
    #[error("cannot attach {0:?} beneath itself")]
    AttachCycle(WidgetId),

    /// The dock operation targeted a container without a dock strategy.
    #[error("widget {0:?} is not a dock container")]
    NotADock(WidgetId),

    /// The child is not currently docked anywhere.
    #[error("widget {0:?} is not docked")]
    NotDocked(WidgetId),

    /// The root widget cannot be detached.
    #[error("the root widget cannot be detached")]
    DetachRoot,
}

/// Fatal conditions for one `Interface` instance.
#[derive(Debug, thiserror::Error)]
pub enum InterfaceError {
    /// The requested surface has a non-positive or overflowing pixel area.
    #[error("surface of {0}x{1} pixels is not usable")]
    InvalidSurface(i32, i32),

    /// The background update pump thread could not be spawned.
    #[error("update pump could not be started: {0}")]
    PumpUnavailable(#[from] std::io::Error),
}

/// A widget's paint capability failed for one cycle.
///
/// The compositor logs these and skips the widget's region; the next
/// invalidation retries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaintError {
    /// The widget attempted to paint entirely outside the surface.
    #[error("paint target lies outside the surface")]
    OutOfSurface,

    /// The host rendering backend reported a failure.
    #[error("backend paint failure: {0}")]
    Backend(String),
}

/// A layout axis failed to converge and was pinned to its last-known-good
/// value.
///
/// Emitted through [`crate::observe::GeometryEvent::Fault`], never raised as
/// an error: the update cycle continues and the axis self-heals on the next
/// consistent invalidation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutFault {
    /// The widget whose axis failed to converge.
    pub widget: WidgetId,
    /// The axis that was pinned.
    pub axis: Axis,
    /// The last-known-good value the axis was pinned to.
    pub pinned: i32,
}
