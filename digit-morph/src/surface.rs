use kurbo::{BezPath, ParamCurve, Point, Size};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::symbols::Marker;
use ratatui::widgets::Widget;
use ratatui::widgets::canvas::{Canvas, Line};

use crate::config::StrokeStyle;

/// Receives every finished path the engine produces.
pub trait Surface {
    fn present(&mut self, path: &BezPath);
}

/// Keeps only the latest path.
impl Surface for BezPath {
    fn present(&mut self, path: &BezPath) {
        self.clone_from(path);
    }
}

/// Records every path, oldest first.
impl Surface for Vec<BezPath> {
    fn present(&mut self, path: &BezPath) {
        self.push(path.clone());
    }
}

const SAMPLES_PER_SEGMENT: usize = 16;

/// Strokes a glyph path onto a braille canvas.
///
/// `size` is the box the path was scaled into; it is stretched over the
/// whole render area. Paths are y-down, the canvas is y-up.
pub struct GlyphCanvas<'a> {
    path: &'a BezPath,
    size: Size,
    style: StrokeStyle,
    marker: Marker,
}

impl<'a> GlyphCanvas<'a> {
    pub fn new(path: &'a BezPath, size: Size) -> Self {
        Self {
            path,
            size,
            style: StrokeStyle::default(),
            marker: Marker::Braille,
        }
    }

    pub fn style(mut self, style: StrokeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn marker(mut self, marker: Marker) -> Self {
        self.marker = marker;
        self
    }
}

impl Widget for GlyphCanvas<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = self.size.height;
        let color = self.style.color;
        let points = polyline(self.path, SAMPLES_PER_SEGMENT);

        Canvas::default()
            .marker(self.marker)
            .x_bounds([0.0, self.size.width])
            .y_bounds([0.0, height])
            .paint(|ctx| {
                for pair in points.windows(2) {
                    ctx.draw(&Line {
                        x1: pair[0].x,
                        y1: height - pair[0].y,
                        x2: pair[1].x,
                        y2: height - pair[1].y,
                        color,
                    });
                }
            })
            .render(area, buf);
    }
}

/// Samples each segment at `samples` evenly spaced parameters.
pub fn polyline(path: &BezPath, samples: usize) -> Vec<Point> {
    let samples = samples.max(1);
    let mut points = Vec::new();

    for seg in path.segments() {
        if points.is_empty() {
            points.push(seg.start());
        }

        points.extend((1..=samples).map(|i| seg.eval(i as f64 / samples as f64)));
    }

    points
}
