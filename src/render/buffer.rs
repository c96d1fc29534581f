//! The shared off-screen pixel buffer.
//!
//! Pixels are 32-bit packed ARGB, row-major, stride = width * 4 bytes. The
//! core treats color values as opaque `u32`s; decoding and presentation
//! belong to the host backend.

use crate::error::InterfaceError;
use crate::geometry::{Region, Size};

/// Fully transparent black.
pub const CLEAR: u32 = 0x0000_0000;

/// Largest supported pixel area, a guard against degenerate resize requests.
const MAX_AREA: i64 = 1 << 28;

// ---------------------------------------------------------------------------
// FramePatch
// ---------------------------------------------------------------------------

/// A tightly-packed copy of one buffer sub-rectangle, ready for blitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramePatch {
    /// Where in the surface these pixels belong.
    pub region: Region,
    /// Row-major ARGB pixels, `region.width` per row.
    pub pixels: Vec<u32>,
}

impl FramePatch {
    /// Row stride in bytes.
    pub fn stride(&self) -> usize {
        self.region.width.max(0) as usize * 4
    }
}

// ---------------------------------------------------------------------------
// PixelBuffer
// ---------------------------------------------------------------------------

/// The widget tree's composited surface.
#[derive(Debug)]
pub struct PixelBuffer {
    size: Size,
    pixels: Vec<u32>,
}

impl PixelBuffer {
    /// Allocate a cleared buffer.
    ///
    /// Fails for non-positive or absurdly large dimensions — the one fatal
    /// initialization error this core can produce on its own.
    pub fn new(size: Size) -> Result<Self, InterfaceError> {
        if !size.is_usable() || size.area() > MAX_AREA {
            return Err(InterfaceError::InvalidSurface(size.width, size.height));
        }
        Ok(Self {
            size,
            pixels: vec![CLEAR; size.area() as usize],
        })
    }

    /// Surface dimensions.
    pub fn size(&self) -> Size {
        self.size
    }

    /// The full surface as a region.
    pub fn bounds(&self) -> Region {
        self.size.to_region()
    }

    /// The raw pixel row-major ARGB contents.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Read one pixel; `None` outside the surface.
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        if !self.bounds().contains(x, y) {
            return None;
        }
        Some(self.pixels[self.index(x, y)])
    }

    /// Fill a rectangle with a solid color, clipped to the surface.
    pub fn fill_rect(&mut self, rect: Region, color: u32) {
        let rect = rect.intersection(self.bounds());
        if rect.is_empty() {
            return;
        }
        let width = self.size.width as usize;
        for row in rect.y..rect.bottom() {
            let start = row as usize * width + rect.x as usize;
            self.pixels[start..start + rect.width as usize].fill(color);
        }
    }

    /// Copy a sub-rectangle into a tightly-packed patch for handoff.
    ///
    /// Returns `None` when the rectangle misses the surface entirely.
    pub fn extract(&self, rect: Region) -> Option<FramePatch> {
        let rect = rect.intersection(self.bounds());
        if rect.is_empty() {
            return None;
        }
        let mut pixels = Vec::with_capacity(rect.area() as usize);
        let width = self.size.width as usize;
        for row in rect.y..rect.bottom() {
            let start = row as usize * width + rect.x as usize;
            pixels.extend_from_slice(&self.pixels[start..start + rect.width as usize]);
        }
        Some(FramePatch { region: rect, pixels })
    }

    fn index(&self, x: i32, y: i32) -> usize {
        y as usize * self.size.width as usize + x as usize
    }
}

// ===========================================================================
// Tests
// ===========================================================================
