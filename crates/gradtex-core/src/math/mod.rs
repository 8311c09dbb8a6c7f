// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Scalar helpers, the [`Rgba`] color type and pixel extents.
//!
//! Every function here is total: out-of-range inputs are clamped, never
//! rejected.

// --- Fundamental Constants ---

/// A small constant for floating-point comparisons.
pub const EPSILON: f32 = 1e-5;

// --- Declare Sub-Modules ---

pub mod color;
pub mod dimension;

// --- Re-export Principal Types ---

pub use self::color::Rgba;
pub use self::dimension::Extent2D;

// --- Utility Functions ---

/// Clamps a floating-point value to the `[0.0, 1.0]` range.
///
/// `NaN` is mapped to `0.0` so that a corrupted key position can never
/// propagate into pixel coordinates.
///
/// # Examples
///
/// ```
/// use gradtex_core::math::saturate;
/// assert_eq!(saturate(1.5), 1.0);
/// assert_eq!(saturate(-0.5), 0.0);
/// assert_eq!(saturate(f32::NAN), 0.0);
/// ```
#[inline]
pub fn saturate(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Linearly interpolates between two scalars. `t` is not clamped.
///
/// # Examples
///
/// ```
/// use gradtex_core::math::lerp;
/// assert_eq!(lerp(2.0, 4.0, 0.5), 3.0);
/// ```
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Performs an approximate equality comparison between two floats with a custom tolerance.
///
/// # Examples
///
/// ```
/// use gradtex_core::math::approx_eq_eps;
/// assert!(approx_eq_eps(0.001, 0.002, 1e-2));
/// assert!(!approx_eq_eps(0.001, 0.002, 1e-4));
/// ```
#[inline]
pub fn approx_eq_eps(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() < epsilon
}

/// Performs an approximate equality comparison using the module's default [`EPSILON`].
///
/// # Examples
///
/// ```
/// use gradtex_core::math::{approx_eq, EPSILON};
/// assert!(approx_eq(1.0, 1.0 + EPSILON / 2.0));
/// assert!(!approx_eq(1.0, 1.0 + EPSILON * 2.0));
/// ```
#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    approx_eq_eps(a, b, EPSILON)
}
