//! Dirty-region accumulation and collapse.

use crate::geometry::{Region, Size};

/// Default cap on tracked rectangles before collapsing to a bounding box.
pub const DEFAULT_MAX_REGIONS: usize = 8;

/// Default canvas coverage fraction beyond which a full repaint is cheaper
/// than per-rect compositing.
pub const DEFAULT_COLLAPSE_COVERAGE: f32 = 0.7;

// ---------------------------------------------------------------------------
// DirtyRegion
// ---------------------------------------------------------------------------

/// The drained result of one composite cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirtyRegion {
    /// Everything must be repainted.
    Full,
    /// Only these rectangles changed. Empty means nothing changed.
    Rects(Vec<Region>),
}

impl DirtyRegion {
    /// Whether no pixels need compositing.
    pub fn is_empty(&self) -> bool {
        match self {
            DirtyRegion::Full => false,
            DirtyRegion::Rects(rects) => rects.is_empty(),
        }
    }
}

// ---------------------------------------------------------------------------
// DamageTracker
// ---------------------------------------------------------------------------

/// Accumulates rectangular invalidations between composites.
///
/// The tracker may over-approximate (repainting clean pixels is harmless) but
/// never under-approximates: everything reported since the last [`drain`]
/// is covered by what the next drain returns.
///
/// [`drain`]: DamageTracker::drain
#[derive(Debug)]
pub struct DamageTracker {
    canvas: Size,
    regions: Vec<Region>,
    full: bool,
    max_regions: usize,
    collapse_coverage: f32,
}

impl DamageTracker {
    /// Create a tracker for a canvas of the given size with default limits.
    pub fn new(canvas: Size) -> Self {
        Self::with_limits(canvas, DEFAULT_MAX_REGIONS, DEFAULT_COLLAPSE_COVERAGE)
    }

    /// Create a tracker with explicit collapse limits.
    pub fn with_limits(canvas: Size, max_regions: usize, collapse_coverage: f32) -> Self {
        Self {
            canvas,
            regions: Vec::new(),
            full: false,
            max_regions: max_regions.max(1),
            collapse_coverage: collapse_coverage.clamp(0.0, 1.0),
        }
    }

    /// Union a rectangle into the accumulator.
    ///
    /// Rectangles are clipped to the canvas; empty results are ignored.
    /// Overlapping rectangles merge in place, and once the cardinality or
    /// coverage limit is hit the whole set collapses.
    pub fn report(&mut self, rect: Region) {
        if self.full {
            return;
        }
        let rect = rect.intersection(self.canvas.to_region());
        if rect.is_empty() {
            return;
        }

        let mut merged = rect;
        self.regions.retain(|existing| {
            if existing.overlaps(merged) {
                merged = merged.union(*existing);
                false
            } else {
                true
            }
        });
        self.regions.push(merged);

        if self.regions.len() > self.max_regions {
            let bounding = self.bounding();
            self.regions.clear();
            self.regions.push(bounding);
        }
        self.apply_coverage_limit();
    }

    /// Mark the whole canvas dirty.
    pub fn report_full(&mut self) {
        self.regions.clear();
        self.full = true;
    }

    /// Whether anything is awaiting composite.
    pub fn pending(&self) -> bool {
        self.full || !self.regions.is_empty()
    }

    /// Whether the pending region covers any pixel of `rect`.
    ///
    /// Non-destructive: the paint pass uses this to pick which widgets to
    /// repaint before the composite drains.
    pub fn covers(&self, rect: Region) -> bool {
        if rect.is_empty() {
            return false;
        }
        if self.full {
            return rect.overlaps(self.canvas.to_region());
        }
        self.regions.iter().any(|r| r.overlaps(rect))
    }

    /// Bounding rectangle of everything pending, without draining.
    ///
    /// The paint pass clips to this so repainting stays scoped to the
    /// damaged area instead of re-reporting whole widget slots.
    pub fn pending_bounds(&self) -> Option<Region> {
        if self.full {
            return Some(self.canvas.to_region());
        }
        if self.regions.is_empty() {
            None
        } else {
            Some(self.bounding())
        }
    }

    /// Return the accumulated region and reset to empty.
    ///
    /// Single-consumer: called exactly once per composite cycle.
    pub fn drain(&mut self) -> DirtyRegion {
        if self.full {
            self.full = false;
            self.regions.clear();
            DirtyRegion::Full
        } else {
            DirtyRegion::Rects(std::mem::take(&mut self.regions))
        }
    }

    /// Adopt a new canvas size. Everything becomes dirty.
    pub fn resize(&mut self, canvas: Size) {
        self.canvas = canvas;
        self.report_full();
    }

    fn bounding(&self) -> Region {
        self.regions
            .iter()
            .fold(Region::EMPTY, |acc, r| acc.union(*r))
    }

    fn apply_coverage_limit(&mut self) {
        let canvas_area = self.canvas.area();
        if canvas_area == 0 {
            return;
        }
        let covered = self.bounding().area() as f32 / canvas_area as f32;
        if covered >= self.collapse_coverage {
            self.report_full();
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
