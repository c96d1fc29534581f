//! Incremental layout: sizing intent, the layout queue, and docking.
//!
//! Geometry is resolved lazily through [`queue::LayoutQueue`], a
//! deduplicating work queue of per-axis requests. Requests that cannot yet be
//! satisfied are deferred behind their dependencies rather than resolved with
//! stale inputs; a bounded deferral count converts genuine dependency cycles
//! into contained [`crate::error::LayoutFault`]s.

pub mod dock;
pub mod measure;
pub mod queue;
pub mod resolve;

pub use dock::{DockEdge, DockOutcome, DockState, Orientation};
pub use measure::Measure;
pub use queue::{DrainOutcome, LayoutQueue};
