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

//! One-dimensional color ramps and easing curves.
//!
//! - [`GradientField`]: color and alpha keys evaluated independently.
//! - [`BlendCurve`]: keyframes with Hermite tangents, used as the vertical
//!   blend weight between two gradients.
//!
//! Both types sort their keys once at construction and are immutable
//! afterwards; an edit replaces the whole value.

mod curve;
mod field;

pub use curve::{BlendCurve, Keyframe};
pub use field::{AlphaKey, ColorKey, GradientField, GradientMode};

/// Locates the keys bracketing `t` in a list sorted by `position`.
///
/// Returns `(lower, upper, factor)`; `lower == upper` when `t` lies on or
/// beyond an endpoint. `None` for an empty list.
pub(crate) fn bracket<K>(
    keys: &[K],
    t: f32,
    position: impl Fn(&K) -> f32,
) -> Option<(usize, usize, f32)> {
    let last = keys.len().checked_sub(1)?;
    if t <= position(&keys[0]) {
        return Some((0, 0, 0.0));
    }
    if t >= position(&keys[last]) {
        return Some((last, last, 0.0));
    }

    // Unordered positions (NaN) can leave nothing at or below `t`.
    let upper = keys.partition_point(|k| position(k) <= t);
    let Some(lower) = upper.checked_sub(1) else {
        return Some((0, 0, 0.0));
    };
    let (p0, p1) = (position(&keys[lower]), position(&keys[upper]));
    Some((lower, upper, (t - p0) / (p1 - p0)))
}

#[cfg(test)]
mod tests {
    use super::bracket;

    #[test]
    fn bracket_handles_endpoints_and_duplicates() {
        let keys = [0.0_f32, 0.5, 0.5, 1.0];
        assert_eq!(bracket(&keys, 0.0, |k| *k), Some((0, 0, 0.0)));
        assert_eq!(bracket(&keys, 1.0, |k| *k), Some((3, 3, 0.0)));
        assert_eq!(bracket(&keys, 0.25, |k| *k), Some((0, 1, 0.5)));
        // On a duplicated position the later key wins.
        assert_eq!(bracket(&keys, 0.5, |k| *k), Some((2, 3, 0.0)));
        assert_eq!(bracket::<f32>(&[], 0.5, |k| *k), None);
    }

    #[test]
    fn bracket_survives_nan_positions() {
        let keys = [-f32::NAN, 1.0];
        assert_eq!(bracket(&keys, 0.5, |k| *k), Some((0, 0, 0.0)));
    }
}
