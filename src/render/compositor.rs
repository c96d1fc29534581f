//! The composite step: slicing drained damage out of the pixel buffer.

use crate::render::buffer::{FramePatch, PixelBuffer};
use crate::render::damage::DirtyRegion;

/// Copy every rectangle of a drained dirty region out of the buffer as
/// tightly-packed patches for the host backend.
///
/// A full repaint hands off the entire buffer as one patch. Rectangles that
/// miss the surface (a widget removed after a resize shrank the canvas)
/// contribute nothing.
pub fn composite(buffer: &PixelBuffer, dirty: DirtyRegion) -> Vec<FramePatch> {
    match dirty {
        DirtyRegion::Full => buffer.extract(buffer.bounds()).into_iter().collect(),
        DirtyRegion::Rects(rects) => rects
            .into_iter()
            .filter_map(|rect| buffer.extract(rect))
            .collect(),
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Region, Size};
    use pretty_assertions::assert_eq;

    fn checkered_buffer() -> PixelBuffer {
        let mut buf = PixelBuffer::new(Size::new(20, 20)).unwrap();
        buf.fill_rect(Region::new(0, 0, 20, 20), 0xFF10_1010);
        buf.fill_rect(Region::new(10, 0, 10, 20), 0xFF20_2020);
        buf
    }

    #[test]
    fn empty_dirty_region_yields_no_patches() {
        let buf = checkered_buffer();
        assert!(composite(&buf, DirtyRegion::Rects(Vec::new())).is_empty());
    }

    #[test]
    fn full_repaint_hands_off_whole_buffer() {
        let buf = checkered_buffer();
        let patches = composite(&buf, DirtyRegion::Full);
        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].region, Region::new(0, 0, 20, 20));
        assert_eq!(patches[0].pixels.len(), 400);
    }

    #[test]
    fn each_rect_becomes_one_patch() {
        let buf = checkered_buffer();
        let dirty = DirtyRegion::Rects(vec![
            Region::new(0, 0, 5, 5),
            Region::new(12, 12, 4, 4),
        ]);
        let patches = composite(&buf, dirty);
        assert_eq!(patches.len(), 2);
        assert!(patches[0].pixels.iter().all(|&p| p == 0xFF10_1010));
        assert!(patches[1].pixels.iter().all(|&p| p == 0xFF20_2020));
    }

    #[test]
    fn rects_off_the_surface_are_dropped() {
        let buf = checkered_buffer();
        let dirty = DirtyRegion::Rects(vec![Region::new(100, 100, 5, 5)]);
        assert!(composite(&buf, dirty).is_empty());
    }
}
