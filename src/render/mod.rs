//! Rendering: the shared pixel buffer, damage tracking, and compositing.
//!
//! The core never draws primitives itself — widgets write solid fills into
//! the ARGB buffer through [`crate::widget::PaintCtx`], the
//! [`damage::DamageTracker`] folds their invalidations into a minimal dirty
//! region, and [`compositor::composite`] slices that region out of the buffer
//! as [`buffer::FramePatch`]es for the host backend to blit.

pub mod buffer;
pub mod compositor;
pub mod damage;

pub use buffer::{FramePatch, PixelBuffer};
pub use damage::{DamageTracker, DirtyRegion};
