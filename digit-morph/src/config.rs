use std::time::Duration;

use kurbo::Size;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::easing::Interpolator;
use crate::error::Error;

pub const DEFAULT_FONT_SIZE: f64 = 24.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MorphConfig {
    #[serde(rename = "duration_secs", with = "duration_secs")]
    pub duration: Duration,
    pub easing: Interpolator,
    /// Rate of the external clock driving `on_clock_tick`.
    pub fps: u32,
    pub stroke: StrokeStyle,
}

impl Default for MorphConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(500),
            easing: Interpolator::default(),
            fps: 60,
            stroke: StrokeStyle::default(),
        }
    }
}

impl MorphConfig {
    /// Parses a (possibly partial) JSON config; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(json)?;
        config.stroke.validate()?;
        Ok(config)
    }

    /// Frames a morph spans at this clock rate. Never less than one.
    pub fn max_frames(&self) -> u32 {
        let frames = (self.duration.as_secs_f64() * f64::from(self.fps)).round();

        if frames <= 0.0 { 1 } else { frames as u32 }
    }
}

/// Stroke styling handed to the render surface. The engine never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "StrokeStyleDef")]
pub struct StrokeStyle {
    pub font_size: f64,
    pub line_width: f64,
    pub color: Color,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            line_width: 2.0,
            color: Color::Gray,
        }
    }
}

impl StrokeStyle {
    pub fn with_font_size(font_size: f64) -> Result<Self, Error> {
        let mut style = Self::default();
        style.set_font_size(font_size)?;
        Ok(style)
    }

    /// Also resets `line_width` to `font_size / 16`.
    pub fn set_font_size(&mut self, font_size: f64) -> Result<(), Error> {
        if !font_size.is_finite() || font_size <= 0.0 {
            return Err(Error::InvalidFontSize(font_size));
        }

        self.font_size = font_size;
        self.line_width = font_size / 16.0;
        Ok(())
    }

    /// Natural widget size, roughly 13:24.
    pub fn intrinsic_size(&self) -> Size {
        Size::new(self.font_size * 0.65, self.font_size * 1.2)
    }

    fn validate(&self) -> Result<(), Error> {
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(Error::InvalidFontSize(self.font_size));
        }

        Ok(())
    }
}

/// Serialized form of [`StrokeStyle`]. A `line_width` left out follows `font_size`.
#[derive(Deserialize)]
#[serde(default)]
struct StrokeStyleDef {
    font_size: Option<f64>,
    line_width: Option<f64>,
    color: Color,
}

impl Default for StrokeStyleDef {
    fn default() -> Self {
        Self {
            font_size: None,
            line_width: None,
            color: StrokeStyle::default().color,
        }
    }
}

impl From<StrokeStyleDef> for StrokeStyle {
    fn from(def: StrokeStyleDef) -> Self {
        let mut style = StrokeStyle {
            color: def.color,
            ..StrokeStyle::default()
        };

        // Validated in `MorphConfig::from_json`.
        if let Some(font_size) = def.font_size {
            style.font_size = font_size;
            style.line_width = font_size / 16.0;
        }

        if let Some(line_width) = def.line_width {
            style.line_width = line_width;
        }

        style
    }
}

/// `Duration` as a plain number of seconds.
mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(duration.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(<D::Error as de::Error>::custom)
    }
}
