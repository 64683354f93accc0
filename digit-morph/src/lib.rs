//! Digits 0-9 drawn as cubic Bézier glyphs that morph into each other,
//! one frame per external clock tick.

pub mod config;
pub mod easing;
pub mod error;
pub mod glyph;
pub mod morph;
pub mod path;
pub mod scale;
pub mod surface;

pub use config::{MorphConfig, StrokeStyle};
pub use easing::{Easing, Interpolator};
pub use error::Error;
pub use glyph::{Digit, Glyph, GlyphTable};
pub use morph::{DigitMorph, MorphState};
pub use scale::ScaledTable;
pub use surface::{GlyphCanvas, Surface};
