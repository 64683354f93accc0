use std::fmt;

use kurbo::Point;

use crate::error::Error;

/// Height of the authoring coordinate system. Width is 1000.
pub const DESIGN_HEIGHT: f64 = 800.0;
pub const DESIGN_WIDTH: f64 = 1000.0;

pub const ENDPOINTS: usize = 5;
pub const SEGMENTS: usize = ENDPOINTS - 1;

/// A decimal digit, guaranteed to be in `0..=9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Digit(u8);

impl Digit {
    pub const ZERO: Self = Self(0);
    pub const NINE: Self = Self(9);

    pub fn new(value: u8) -> Result<Self, Error> {
        Self::try_from(u32::from(value))
    }

    /// Least significant decimal digit of `n`.
    pub fn least_significant(n: u32) -> Self {
        Self((n % 10) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Next digit, wrapping 9 to 0.
    pub fn succ(self) -> Self {
        Self((self.0 + 1) % 10)
    }

    /// Previous digit, wrapping 0 to 9.
    pub fn pred(self) -> Self {
        Self((self.0 + 9) % 10)
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..10).map(Self)
    }
}

impl TryFrom<u32> for Digit {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self, Error> {
        if value > 9 {
            return Err(Error::DigitOutOfRange(value));
        }

        Ok(Self(value as u8))
    }
}

impl TryFrom<u8> for Digit {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Error> {
        Self::new(value)
    }
}

impl TryFrom<char> for Digit {
    type Error = Error;

    fn try_from(value: char) -> Result<Self, Error> {
        match value.to_digit(10) {
            Some(d) => Self::try_from(d),
            None => Err(Error::NotADigit(value)),
        }
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> u8 {
        digit.0
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Five endpoints joined by four cubic segments.
///
/// Both glyphs of a morph share this topology, so points pair up by index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    pub endpoints: [Point; ENDPOINTS],
    pub control_points1: [Point; SEGMENTS],
    pub control_points2: [Point; SEGMENTS],
}

impl Glyph {
    /// Applies `f` to every endpoint and control point.
    pub fn map(&self, f: impl Fn(Point) -> Point) -> Glyph {
        Glyph {
            endpoints: self.endpoints.map(&f),
            control_points1: self.control_points1.map(&f),
            control_points2: self.control_points2.map(&f),
        }
    }

    /// `self + (other - self) * factor` per coordinate. `factor` is not clamped.
    pub fn lerp(&self, other: &Glyph, factor: f64) -> Glyph {
        Glyph {
            endpoints: lerp_points(&self.endpoints, &other.endpoints, factor),
            control_points1: lerp_points(&self.control_points1, &other.control_points1, factor),
            control_points2: lerp_points(&self.control_points2, &other.control_points2, factor),
        }
    }

    fn from_authored(
        endpoints: &[[f64; 2]; ENDPOINTS],
        control_points1: &[[f64; 2]; SEGMENTS],
        control_points2: &[[f64; 2]; SEGMENTS],
    ) -> Glyph {
        let to_point = |[x, y]: [f64; 2]| Point::new(x, y);

        Glyph {
            endpoints: endpoints.map(to_point),
            control_points1: control_points1.map(to_point),
            control_points2: control_points2.map(to_point),
        }
    }
}

fn lerp_points<const N: usize>(cur: &[Point; N], next: &[Point; N], factor: f64) -> [Point; N] {
    std::array::from_fn(|i| lerp(cur[i], next[i], factor))
}

pub(crate) fn lerp(cur: Point, next: Point, factor: f64) -> Point {
    Point::new(
        cur.x + (next.x - cur.x) * factor,
        cur.y + (next.y - cur.y) * factor,
    )
}

/// All ten digits in design space, y axis pointing down.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphTable {
    glyphs: [Glyph; 10],
}

impl GlyphTable {
    /// Builds the table from the authored data and flips it into the
    /// y-down rendering convention.
    pub fn load() -> Self {
        let glyphs = std::array::from_fn(|d| {
            Glyph::from_authored(
                &ENDPOINTS_AUTHORED[d],
                &CONTROL_POINTS1_AUTHORED[d],
                &CONTROL_POINTS2_AUTHORED[d],
            )
            .map(flip_y)
        });

        Self { glyphs }
    }

    pub fn glyph(&self, digit: Digit) -> &Glyph {
        &self.glyphs[digit.index()]
    }

    pub fn glyphs(&self) -> &[Glyph; 10] {
        &self.glyphs
    }
}

impl Default for GlyphTable {
    fn default() -> Self {
        Self::load()
    }
}

fn flip_y(p: Point) -> Point {
    Point::new(p.x, DESIGN_HEIGHT - p.y)
}

// Authored with y pointing up. Shapes are hand-tuned; do not regenerate.

const ENDPOINTS_AUTHORED: [[[f64; 2]; ENDPOINTS]; 10] = [
    [[500.0, 800.0], [740.0, 400.0], [500.0, 0.0], [260.0, 400.0], [500.0, 800.0]],
    [[383.0, 712.0], [500.0, 800.0], [500.0, 0.0], [500.0, 800.0], [383.0, 712.0]],
    [[300.0, 640.0], [700.0, 640.0], [591.0, 369.0], [300.0, 0.0], [700.0, 0.0]],
    [[300.0, 600.0], [700.0, 600.0], [500.0, 400.0], [700.0, 200.0], [300.0, 200.0]],
    [[650.0, 0.0], [650.0, 140.0], [650.0, 800.0], [260.0, 140.0], [760.0, 140.0]],
    [[645.0, 800.0], [400.0, 800.0], [300.0, 480.0], [690.0, 285.0], [272.0, 92.0]],
    [[640.0, 800.0], [321.0, 458.0], [715.0, 144.0], [257.0, 146.0], [321.0, 458.0]],
    [[275.0, 800.0], [725.0, 800.0], [586.0, 544.0], [424.0, 262.0], [275.0, 0.0]],
    [[500.0, 400.0], [500.0, 0.0], [500.0, 400.0], [500.0, 800.0], [500.0, 400.0]],
    [[679.0, 342.0], [743.0, 654.0], [285.0, 656.0], [679.0, 342.0], [360.0, 0.0]],
];

const CONTROL_POINTS1_AUTHORED: [[[f64; 2]; SEGMENTS]; 10] = [
    [[650.0, 800.0], [740.0, 200.0], [350.0, 0.0], [260.0, 600.0]],
    [[383.0, 712.0], [500.0, 488.0], [500.0, 488.0], [383.0, 712.0]],
    [[335.0, 853.0], [710.0, 538.0], [477.0, 213.0], [450.0, 0.0]],
    [[300.0, 864.0], [700.0, 400.0], [500.0, 400.0], [700.0, -64.0]],
    [[650.0, 50.0], [650.0, 340.0], [502.0, 572.0], [350.0, 140.0]],
    [[550.0, 800.0], [400.0, 800.0], [495.0, 567.0], [717.0, 30.0]],
    [[578.0, 730.0], [492.0, 613.0], [634.0, -50.0], [208.0, 264.0]],
    [[350.0, 800.0], [676.0, 700.0], [538.0, 456.0], [366.0, 160.0]],
    [[775.0, 400.0], [225.0, 0.0], [225.0, 400.0], [775.0, 800.0]],
    [[746.0, 412.0], [662.0, 850.0], [164.0, 398.0], [561.0, 219.0]],
];

const CONTROL_POINTS2_AUTHORED: [[[f64; 2]; SEGMENTS]; 10] = [
    [[740.0, 600.0], [650.0, 0.0], [260.0, 200.0], [350.0, 800.0]],
    [[500.0, 800.0], [500.0, 312.0], [500.0, 312.0], [500.0, 800.0]],
    [[665.0, 853.0], [658.0, 461.0], [424.0, 164.0], [544.0, 1.0]],
    [[700.0, 864.0], [500.0, 400.0], [700.0, 400.0], [300.0, -64.0]],
    [[650.0, 100.0], [650.0, 600.0], [356.0, 347.0], [680.0, 140.0]],
    [[450.0, 800.0], [300.0, 480.0], [672.0, 460.0], [410.0, -100.0]],
    [[455.0, 602.0], [840.0, 444.0], [337.0, -46.0], [255.0, 387.0]],
    [[500.0, 800.0], [634.0, 631.0], [487.0, 372.0], [334.0, 102.0]],
    [[775.0, 0.0], [225.0, 400.0], [225.0, 800.0], [775.0, 400.0]],
    [[792.0, 536.0], [371.0, 840.0], [475.0, 195.0], [432.0, 79.0]],
];
