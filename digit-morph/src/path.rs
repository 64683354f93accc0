use kurbo::{BezPath, Point};

use crate::glyph::Glyph;

/// Move to the first endpoint, then one cubic per following endpoint.
///
/// `control_points1` and `control_points2` must each hold one point per segment.
pub fn build(endpoints: &[Point], control_points1: &[Point], control_points2: &[Point]) -> BezPath {
    let mut path = BezPath::new();

    let Some((&start, rest)) = endpoints.split_first() else {
        return path;
    };

    debug_assert_eq!(control_points1.len(), rest.len());
    debug_assert_eq!(control_points2.len(), rest.len());

    path.move_to(start);

    for ((&end, &cp1), &cp2) in rest.iter().zip(control_points1).zip(control_points2) {
        path.curve_to(cp1, cp2, end);
    }

    path
}

pub fn build_glyph(glyph: &Glyph) -> BezPath {
    build(&glyph.endpoints, &glyph.control_points1, &glyph.control_points2)
}
