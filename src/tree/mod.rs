//! The widget tree: a slotmap arena of nodes with per-axis geometry state.
//!
//! Ownership is strictly parent-owns-children. Everything else — the layout
//! queue, dock entries, observers — holds only the copyable generational
//! [`WidgetId`], so a removed widget invalidates every outstanding reference
//! at once instead of dangling.

pub mod node;
#[allow(clippy::module_inception)]
pub mod tree;

pub use node::{Axis, AxisFlags, Flow, GeometryState, Mount, Strategy, WidgetId};
pub use tree::{WidgetData, WidgetTree};
