//! Placement transform computation for rendered math.
//!
//! A rendered math glyph is measured in the renderer's internal units and has
//! to land on the anchor point of the `<text>` element it replaces, inside
//! that element's existing SVG coordinate system. The placement is an affine
//! composition of three steps:
//!
//! 1. **Anchor translate**: move to the text element's `(x, y)` attributes.
//! 2. **Justify/baseline translate**: shift left by `0`, half, or the full
//!    scaled glyph width depending on justification, and up by the full
//!    scaled glyph height so the glyph sits on the text baseline.
//! 3. **Uniform scale**: `configured scale factor × effective font size`.
//!
//! The order matters. Scale is applied last in the attribute string, so it
//! affects only the glyph's own coordinates and not the two translations;
//! swapping the steps would scale the offsets twice and misplace the glyph.

use crate::scanner::Justification;

/// A 2D point in document coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Measured extent of a rendered math glyph, in renderer-internal units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderedBounds {
    pub width: f64,
    pub height: f64,
}

impl RenderedBounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// The affine placement of one rendered glyph at its anchor.
///
/// Never persisted; recomputed per staged item from the anchor attributes,
/// the measured bounds, and the effective font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementTransform {
    /// The text element's anchor point (its `x`/`y` attributes)
    pub anchor: Point,
    /// Justification and baseline offset, already scaled
    pub offset: Point,
    /// Uniform scale: configured factor × font size in pixels
    pub scale: f64,
}

impl PlacementTransform {
    /// Compute the placement for one rendered glyph.
    ///
    /// `configured_scale` is the process-wide scale factor (default `0.09`),
    /// multiplied by the effective font size of the original text element to
    /// produce the final uniform scale.
    pub fn compute(
        bounds: RenderedBounds,
        anchor: Point,
        font_size_px: f64,
        configured_scale: f64,
        justification: Justification,
    ) -> Self {
        let scale = configured_scale * font_size_px;

        let x1 = match justification {
            Justification::Left => 0.0,
            Justification::Right => -bounds.width * scale,
            Justification::Center => -bounds.width * 0.5 * scale,
        };
        let y1 = -bounds.height * scale;

        Self {
            anchor,
            offset: Point::new(x1, y1),
            scale,
        }
    }

    /// Serialize as an SVG `transform` attribute value.
    ///
    /// Anchor translate, then offset translate, then scale: the composition
    /// order the placement math assumes.
    pub fn to_attribute(&self) -> String {
        format!(
            "translate({} {}) translate({} {}) scale({})",
            self.anchor.x, self.anchor.y, self.offset.x, self.offset.y, self.scale
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_left_justification_has_no_x_offset() {
        let t = PlacementTransform::compute(
            RenderedBounds::new(40.0, 10.0),
            Point::new(0.0, 0.0),
            10.0,
            0.1,
            Justification::Left,
        );
        assert!(approx_eq(t.offset.x, 0.0), "x offset: got {}", t.offset.x);
    }

    #[test]
    fn test_right_justification_offsets_full_scaled_width() {
        let t = PlacementTransform::compute(
            RenderedBounds::new(40.0, 10.0),
            Point::new(0.0, 0.0),
            10.0,
            0.1,
            Justification::Right,
        );
        // scale = 0.1 * 10 = 1, so offset is the full width
        assert!(approx_eq(t.offset.x, -40.0), "x offset: got {}", t.offset.x);
    }

    #[test]
    fn test_center_justification_offsets_half_scaled_width() {
        let t = PlacementTransform::compute(
            RenderedBounds::new(40.0, 10.0),
            Point::new(0.0, 0.0),
            10.0,
            0.1,
            Justification::Center,
        );
        assert!(approx_eq(t.offset.x, -20.0), "x offset: got {}", t.offset.x);
    }

    #[test]
    fn test_baseline_offset_is_scaled_height() {
        let t = PlacementTransform::compute(
            RenderedBounds::new(40.0, 10.0),
            Point::new(0.0, 0.0),
            20.0,
            0.1,
            Justification::Left,
        );
        // scale = 2, height 10 -> y offset -20
        assert!(approx_eq(t.offset.y, -20.0), "y offset: got {}", t.offset.y);
    }

    #[test]
    fn test_reference_placement() {
        // Anchor (10, 20), box 100x50, configured scale 0.1, font size 20,
        // centered: scale 2, offset (-100, -100).
        let t = PlacementTransform::compute(
            RenderedBounds::new(100.0, 50.0),
            Point::new(10.0, 20.0),
            20.0,
            0.1,
            Justification::Center,
        );
        assert!(approx_eq(t.scale, 2.0));
        assert!(approx_eq(t.offset.x, -100.0));
        assert!(approx_eq(t.offset.y, -100.0));
        assert_eq!(
            t.to_attribute(),
            "translate(10 20) translate(-100 -100) scale(2)"
        );
    }

    #[test]
    fn test_attribute_composition_order() {
        let t = PlacementTransform {
            anchor: Point::new(1.5, -2.0),
            offset: Point::new(-3.25, -4.0),
            scale: 0.5,
        };
        assert_eq!(
            t.to_attribute(),
            "translate(1.5 -2) translate(-3.25 -4) scale(0.5)"
        );
    }
}
