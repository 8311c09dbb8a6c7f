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

use super::bracket;
use crate::math::saturate;
use serde::{Deserialize, Serialize};

/// A point on a [`BlendCurve`].
///
/// Tangents are slopes (`dy/dx`). An infinite tangent on either side of a
/// segment turns it into a step that holds the left key's value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Position on the x axis.
    pub time: f32,
    /// Curve value at `time`.
    pub value: f32,
    /// Incoming slope.
    #[serde(default)]
    pub in_tangent: f32,
    /// Outgoing slope.
    #[serde(default)]
    pub out_tangent: f32,
}

impl Keyframe {
    /// A keyframe with flat tangents.
    #[inline]
    pub const fn new(time: f32, value: f32) -> Self {
        Self::with_tangents(time, value, 0.0, 0.0)
    }

    /// A keyframe with explicit tangents.
    #[inline]
    pub const fn with_tangents(time: f32, value: f32, in_tangent: f32, out_tangent: f32) -> Self {
        Self {
            time,
            value,
            in_tangent,
            out_tangent,
        }
    }
}

/// A 1D easing function built from Hermite segments.
///
/// Used as the vertical blend weight between the bottom and top gradients.
/// The default is the identity line from `(0, 0)` to `(1, 1)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "BlendCurveRepr")]
pub struct BlendCurve {
    keys: Vec<Keyframe>,
}

#[derive(Deserialize)]
#[serde(rename = "BlendCurve")]
struct BlendCurveRepr {
    #[serde(default)]
    keys: Vec<Keyframe>,
}

impl From<BlendCurveRepr> for BlendCurve {
    fn from(repr: BlendCurveRepr) -> Self {
        Self::new(repr.keys)
    }
}

impl BlendCurve {
    /// Builds a curve from unsorted keyframes.
    ///
    /// Times are clamped to `[0, 1]` (NaN becomes `0.0`) and keys are stably
    /// sorted by time.
    pub fn new(keys: Vec<Keyframe>) -> Self {
        let mut keys: Vec<Keyframe> = keys
            .into_iter()
            .map(|k| Keyframe { time: saturate(k.time), ..k })
            .collect();
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keys }
    }

    /// A straight line through `(x0, y0)` and `(x1, y1)`.
    pub fn linear(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        let slope = if x1 != x0 { (y1 - y0) / (x1 - x0) } else { 0.0 };
        Self::new(vec![
            Keyframe::with_tangents(x0, y0, slope, slope),
            Keyframe::with_tangents(x1, y1, slope, slope),
        ])
    }

    /// A smoothstep-like ease from `(x0, y0)` to `(x1, y1)` with flat ends.
    pub fn ease_in_out(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self::new(vec![Keyframe::new(x0, y0), Keyframe::new(x1, y1)])
    }

    /// A flat curve returning `value` everywhere.
    pub fn constant(value: f32) -> Self {
        Self::new(vec![Keyframe::new(0.0, value), Keyframe::new(1.0, value)])
    }

    /// The sorted keyframes.
    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Returns `true` if the curve has no keyframes.
    pub fn is_degenerate(&self) -> bool {
        self.keys.is_empty()
    }

    /// Evaluates the curve at `x`, clamped to `[0, 1]` and then to the first
    /// and last keyframe. An empty curve evaluates to `0.0`.
    pub fn evaluate(&self, x: f32) -> f32 {
        let x = saturate(x);
        let Some((lo, hi, s)) = bracket(&self.keys, x, |k| k.time) else {
            return 0.0;
        };
        let (k0, k1) = (&self.keys[lo], &self.keys[hi]);
        if lo == hi {
            return k0.value;
        }
        if !k0.out_tangent.is_finite() || !k1.in_tangent.is_finite() {
            return k0.value;
        }

        let dt = k1.time - k0.time;
        let m0 = k0.out_tangent * dt;
        let m1 = k1.in_tangent * dt;

        let s2 = s * s;
        let s3 = s2 * s;
        let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
        let h10 = s3 - 2.0 * s2 + s;
        let h01 = -2.0 * s3 + 3.0 * s2;
        let h11 = s3 - s2;

        h00 * k0.value + h10 * m0 + h01 * k1.value + h11 * m1
    }
}

impl Default for BlendCurve {
    fn default() -> Self {
        Self::linear(0.0, 0.0, 1.0, 1.0)
    }
}
