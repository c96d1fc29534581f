//! The widget capability layer: the `Widget` trait and its contexts.

pub mod traits;

pub use traits::{CycleRequest, EventCtx, PaintCtx, Widget};
