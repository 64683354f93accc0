use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Maps normalized progress to a blend factor. Output is not clamped.
pub trait Easing {
    fn interpolation(&self, x: f64) -> f64;
}

impl<F> Easing for F
where
    F: Fn(f64) -> f64,
{
    fn interpolation(&self, x: f64) -> f64 {
        self(x)
    }
}

/// The built-in easing curves, selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Interpolator {
    Linear,
    Overshoot { tension: f64 },
    Spring { tension: f64 },
    Bounce,
    AnticipateOvershoot { tension: f64 },
    CubicHermite { tangent0: f64, tangent1: f64 },
}

impl Interpolator {
    pub const OVERSHOOT: Self = Self::Overshoot { tension: 2.0 };
    pub const SPRING: Self = Self::Spring { tension: 0.3 };
    pub const ANTICIPATE_OVERSHOOT: Self = Self::AnticipateOvershoot { tension: 2.0 };
    pub const CUBIC_HERMITE: Self = Self::CubicHermite {
        tangent0: 2.2,
        tangent1: 2.2,
    };

    /// Every variant with its stock parameters, in a stable order.
    pub const ALL: [Self; 6] = [
        Self::Linear,
        Self::OVERSHOOT,
        Self::SPRING,
        Self::Bounce,
        Self::ANTICIPATE_OVERSHOOT,
        Self::CUBIC_HERMITE,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Overshoot { .. } => "overshoot",
            Self::Spring { .. } => "spring",
            Self::Bounce => "bounce",
            Self::AnticipateOvershoot { .. } => "anticipate-overshoot",
            Self::CubicHermite { .. } => "cubic-hermite",
        }
    }
}

impl Default for Interpolator {
    fn default() -> Self {
        Self::Overshoot { tension: 1.3 }
    }
}

impl Easing for Interpolator {
    fn interpolation(&self, x: f64) -> f64 {
        match *self {
            Self::Linear => linear(x),
            Self::Overshoot { tension } => overshoot(x, tension),
            Self::Spring { tension } => spring(x, tension),
            Self::Bounce => bounce(x),
            Self::AnticipateOvershoot { tension } => anticipate_overshoot(x, tension),
            Self::CubicHermite { tangent0, tangent1 } => cubic_hermite(x, tangent0, tangent1),
        }
    }
}

pub fn linear(x: f64) -> f64 {
    x
}

pub fn overshoot(x: f64, tension: f64) -> f64 {
    let x2 = x - 1.0;
    x2 * x2 * ((tension + 1.0) * x2 + tension) + 1.0
}

/// Damped sine settling on 1. `tension` is the oscillation period.
pub fn spring(x: f64, tension: f64) -> f64 {
    2f64.powf(-10.0 * x) * ((x - tension / 4.0) * (2.0 * PI) / tension).sin() + 1.0
}

pub fn bounce(x: f64) -> f64 {
    fn parabola(t: f64) -> f64 {
        t * t * 8.0
    }

    if x < 0.3535 {
        parabola(x)
    } else if x < 0.7408 {
        parabola(x - 0.54719) + 0.7
    } else if x < 0.9644 {
        parabola(x - 0.8526) + 0.9
    } else {
        parabola(x - 1.0435) + 0.95
    }
}

pub fn anticipate_overshoot(x: f64, tension: f64) -> f64 {
    let anticipate = |t: f64| t * t * ((tension + 1.0) * t - tension);
    let overshoot = |t: f64| t * t * ((tension + 1.0) * t + tension);

    if x < 0.5 {
        0.5 * anticipate(x * 2.0)
    } else {
        0.5 * (overshoot(x * 2.0 - 2.0) + 2.0)
    }
}

/// Hermite blend from 0 to 1 with the given end tangents.
pub fn cubic_hermite(t: f64, tangent0: f64, tangent1: f64) -> f64 {
    let (start, end) = (0.0, 1.0);
    let t2 = t * t;
    let t3 = t2 * t;

    (2.0 * t3 - 3.0 * t2 + 1.0) * start
        + (t3 - 2.0 * t2 + t) * tangent0
        + (-2.0 * t3 + 3.0 * t2) * end
        + (t3 - t2) * tangent1
}
