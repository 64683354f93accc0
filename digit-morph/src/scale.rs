use kurbo::{BezPath, Point, Size};

use crate::glyph::{DESIGN_HEIGHT, DESIGN_WIDTH, Digit, Glyph, GlyphTable};
use crate::path;

/// Horizontal overscan so strokes past the design box are not clipped.
const X_SCALE: f64 = 1.4;
const X_OFFSET: f64 = -0.2;

/// Vertical squeeze into the middle 60% of the box.
const Y_SCALE: f64 = 0.6;
const Y_OFFSET: f64 = 0.2;

/// Maps a design-space point into a `size` bounding box.
pub fn scale_point(p: Point, size: Size) -> Point {
    Point::new(
        (p.x / DESIGN_WIDTH * X_SCALE + X_OFFSET) * size.width,
        (p.y / DESIGN_HEIGHT * Y_SCALE + Y_OFFSET) * size.height,
    )
}

pub fn scale_glyph(glyph: &Glyph, size: Size) -> Glyph {
    glyph.map(|p| scale_point(p, size))
}

/// Every digit scaled into one bounding box, plus its static path.
///
/// Built in one go from the design table; a resize replaces the whole value.
#[derive(Debug, Clone)]
pub struct ScaledTable {
    size: Size,
    glyphs: [Glyph; 10],
    paths: [BezPath; 10],
}

impl ScaledTable {
    pub fn new(table: &GlyphTable, size: Size) -> Self {
        let glyphs = table.glyphs().map(|g| scale_glyph(&g, size));
        let paths = std::array::from_fn(|d| path::build_glyph(&glyphs[d]));

        Self {
            size,
            glyphs,
            paths,
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn glyph(&self, digit: Digit) -> &Glyph {
        &self.glyphs[digit.index()]
    }

    pub fn path(&self, digit: Digit) -> &BezPath {
        &self.paths[digit.index()]
    }
}
