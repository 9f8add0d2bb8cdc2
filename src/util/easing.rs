//! Easing curves for camera flights.
//!
//! Every curve maps clamped progress in [0, 1] to eased progress in [0, 1],
//! is monotonic over that range, and hits both endpoints exactly.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Easing function variants for flight curves.
#[derive(
    Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    Linear,
    /// Quadratic ease-in (slow start, fast end).
    QuadraticIn,
    /// Quadratic ease-out (fast start, slow end).
    QuadraticOut,
    /// Quadratic ease-in-out (slow at both ends).
    QuadraticInOut,
    /// Cubic Hermite interpolation with configurable control points.
    /// Formula: c1·3t(1-t)² + c2·3(1-t)t² + t³
    ///
    /// Monotonic when both control points lie in [0, 1].
    CubicHermite {
        /// First inner control point.
        c1: f32,
        /// Second inner control point.
        c2: f32,
    },
}

impl EasingFunction {
    /// Default flight curve: quadratic ease-out.
    pub const DEFAULT: Self = Self::QuadraticOut;

    /// Evaluate the easing function at time t.
    ///
    /// Input t is clamped to [0.0, 1.0].
    #[inline]
    #[must_use]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::QuadraticIn => t * t,
            Self::QuadraticOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt
            }
            Self::QuadraticInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let omt = 1.0 - t;
                    1.0 - 2.0 * omt * omt
                }
            }
            Self::CubicHermite { c1, c2 } => {
                let omt = 1.0 - t;
                c1 * 3.0 * t * omt * omt + c2 * 3.0 * omt * t * t + t * t * t
            }
        }
    }
}

impl Default for EasingFunction {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}
