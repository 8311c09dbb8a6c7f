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

//! Defines the `Rgba` color type and its color-space conversions.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// An RGBA color with `f32` components.
///
/// The type itself carries no color-space tag: gradient keys are authored in
/// whatever encoding the asset declares, and the raster decides at fill time
/// whether [`to_linear`](Self::to_linear) or [`to_gamma`](Self::to_gamma) has
/// to be applied. Components may exceed `1.0` for HDR content.
///
/// `#[repr(C)]` lets HDR pixel rows be viewed as raw bytes for export.
#[derive(
    Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize,
)]
#[repr(C)]
pub struct Rgba {
    /// The red component.
    pub r: f32,
    /// The green component.
    pub g: f32,
    /// The blue component.
    pub b: f32,
    /// The alpha (opacity) component; never gamma corrected.
    pub a: f32,
}

impl Rgba {
    // --- Common Color Constants ---

    /// Opaque white (`[1.0, 1.0, 1.0, 1.0]`).
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// Opaque black (`[0.0, 0.0, 0.0, 1.0]`).
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// Fully transparent black (`[0.0, 0.0, 0.0, 0.0]`).
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a new `Rgba` with explicit RGBA values.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a new opaque `Rgba` (alpha = 1.0).
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Creates a color from normalized 8-bit channels.
    #[inline]
    pub fn from_rgba8(texel: [u8; 4]) -> Self {
        Self {
            r: texel[0] as f32 / 255.0,
            g: texel[1] as f32 / 255.0,
            b: texel[2] as f32 / 255.0,
            a: texel[3] as f32 / 255.0,
        }
    }

    /// Quantizes to 8 bits per channel, clamping to `[0, 1]` first.
    #[inline]
    pub fn to_rgba8(&self) -> [u8; 4] {
        [
            quantize(self.r),
            quantize(self.g),
            quantize(self.b),
            quantize(self.a),
        ]
    }

    /// Returns the components as an array in RGBA order.
    #[inline]
    pub const fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Returns `true` if every component is finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }
}

#[inline]
fn quantize(c: f32) -> u8 {
    (super::saturate(c) * 255.0).round() as u8
}

// --- Helper functions for sRGB conversion ---
/// Converts an sRGB component to linear space.
#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    // `max` also maps NaN to 0.
    let c = c.max(0.0);
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Converts a linear component to sRGB space.
#[inline]
fn linear_to_srgb(c: f32) -> f32 {
    let c = c.max(0.0);
    if c <= 0.0031308 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

// --- Conversions ---
impl Rgba {
    /// Decodes gamma (sRGB) encoded RGB to linear light. Alpha is untouched.
    ///
    /// Negative and `NaN` channels become `0.0`; values above `1.0` follow
    /// the same power curve, so HDR headroom survives.
    #[inline]
    pub fn to_linear(&self) -> Self {
        Self {
            r: srgb_to_linear(self.r),
            g: srgb_to_linear(self.g),
            b: srgb_to_linear(self.b),
            a: self.a,
        }
    }

    /// Encodes linear RGB to gamma (sRGB). Alpha is untouched.
    #[inline]
    pub fn to_gamma(&self) -> Self {
        Self {
            r: linear_to_srgb(self.r),
            g: linear_to_srgb(self.g),
            b: linear_to_srgb(self.b),
            a: self.a,
        }
    }
}

// --- Manipulations ---
impl Rgba {
    /// Returns a new color with the same RGB components but a different alpha.
    #[inline]
    pub fn with_alpha(&self, a: f32) -> Self {
        Self { a, ..*self }
    }

    /// Linearly interpolates between two colors.
    /// The factor `t` is clamped to `[0.0, 1.0]`.
    #[inline]
    pub fn lerp(start: Self, end: Self, t: f32) -> Self {
        let t = super::saturate(t);
        Self {
            r: start.r + (end.r - start.r) * t,
            g: start.g + (end.g - start.g) * t,
            b: start.b + (end.b - start.b) * t,
            a: start.a + (end.a - start.a) * t,
        }
    }
}

// --- Operator Overloads ---

impl Default for Rgba {
    /// Returns opaque black, the fallback of an empty gradient.
    #[inline]
    fn default() -> Self {
        Self::BLACK
    }
}

impl Add for Rgba {
    type Output = Self;
    /// Adds two colors component-wise.
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            r: self.r + rhs.r,
            g: self.g + rhs.g,
            b: self.b + rhs.b,
            a: self.a + rhs.a,
        }
    }
}

impl Sub for Rgba {
    type Output = Self;
    /// Subtracts two colors component-wise.
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            r: self.r - rhs.r,
            g: self.g - rhs.g,
            b: self.b - rhs.b,
            a: self.a - rhs.a,
        }
    }
}

impl Mul<f32> for Rgba {
    type Output = Self;
    /// Multiplies all components by a scalar.
    #[inline]
    fn mul(self, scalar: f32) -> Self::Output {
        Self {
            r: self.r * scalar,
            g: self.g * scalar,
            b: self.b * scalar,
            a: self.a * scalar,
        }
    }
}
