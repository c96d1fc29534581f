//! # sash
//!
//! A retained-mode widget toolkit core. An application builds a tree of
//! widgets, declares sizing intent per axis, and `sash` resolves geometry
//! incrementally through a deduplicating layout queue, repaints only what
//! changed, and hands the host backend minimal dirty-rectangle patches of a
//! shared ARGB pixel buffer.
//!
//! ## Core Systems
//!
//! - **[`geometry`]** — Offset, Size, Region pixel primitives
//! - **[`tree`]** — Slotmap-backed widget arena with per-axis geometry state
//! - **[`layout`]** — Measure model, the incremental layout queue, and docking
//! - **[`render`]** — Pixel buffer, damage tracking, patch compositor
//! - **[`widget`]** — Widget capability trait and paint context
//! - **[`widgets`]** — Built-in widgets: Panel, Label, Viewport, Composite
//! - **[`event`]** — Backend-decoupled input events
//! - **[`observe`]** — Typed geometry-change subscriptions
//! - **[`interface`]** — The orchestrator: update cycle, lock, pump thread
//!
//! Rendering backends, windowing, and markup loading are host concerns: the
//! core consumes [`event::InputEvent`]s, exposes [`interface::Frame`]
//! snapshots, and never talks to a platform API itself.

// Foundation
pub mod error;
pub mod event;
pub mod geometry;

// Core systems
pub mod layout;
pub mod render;
pub mod tree;

// Widget system
pub mod widget;
pub mod widgets;

// Observation
pub mod observe;

// Orchestration
pub mod interface;

pub use error::{InterfaceError, LayoutFault, PaintError, StructuralError};
pub use geometry::{Offset, Region, Size};
pub use interface::{Frame, Interface, InterfaceConfig, Phase, PumpHandle};
pub use layout::dock::{DockEdge, DockOutcome, Orientation};
pub use layout::measure::Measure;
pub use observe::GeometryEvent;
pub use tree::{Axis, AxisFlags, Mount, Strategy, WidgetId};
pub use widget::Widget;
