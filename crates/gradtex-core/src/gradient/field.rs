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
use crate::error::DegenerateGradient;
use crate::math::{lerp, saturate, Rgba};
use crate::texture::GradientSlot;
use serde::{Deserialize, Serialize};

/// How a [`GradientField`] blends between neighbouring keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GradientMode {
    /// Linear interpolation between the two bracketing keys.
    #[default]
    Blend,
    /// Step function: the value of the first key at or after `t`.
    Fixed,
}

/// A color control point. The alpha of `color` is ignored; opacity comes
/// from the [`AlphaKey`] list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorKey {
    /// Position along the gradient, clamped to `[0, 1]`.
    pub position: f32,
    /// Key color.
    pub color: Rgba,
}

impl ColorKey {
    /// Creates a color key.
    #[inline]
    pub const fn new(position: f32, color: Rgba) -> Self {
        Self { position, color }
    }
}

/// An opacity control point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlphaKey {
    /// Position along the gradient, clamped to `[0, 1]`.
    pub position: f32,
    /// Key opacity.
    pub alpha: f32,
}

impl AlphaKey {
    /// Creates an alpha key.
    #[inline]
    pub const fn new(position: f32, alpha: f32) -> Self {
        Self { position, alpha }
    }
}

/// A 1D color ramp made of independent color and alpha key lists.
///
/// Keys are sorted by position on construction (stable, so keys sharing a
/// position keep their authored order) and positions are clamped to
/// `[0, 1]`. Color and alpha never need to share key positions: each
/// channel group is interpolated between its own bracketing keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "GradientFieldRepr")]
pub struct GradientField {
    color_keys: Vec<ColorKey>,
    alpha_keys: Vec<AlphaKey>,
    mode: GradientMode,
}

#[derive(Deserialize)]
#[serde(rename = "GradientField")]
struct GradientFieldRepr {
    #[serde(default)]
    color_keys: Vec<ColorKey>,
    #[serde(default)]
    alpha_keys: Vec<AlphaKey>,
    #[serde(default)]
    mode: GradientMode,
}

impl From<GradientFieldRepr> for GradientField {
    fn from(repr: GradientFieldRepr) -> Self {
        Self::new(repr.color_keys, repr.alpha_keys).with_mode(repr.mode)
    }
}

impl GradientField {
    /// Builds a gradient from unsorted key lists.
    pub fn new(color_keys: Vec<ColorKey>, alpha_keys: Vec<AlphaKey>) -> Self {
        let mut color_keys: Vec<ColorKey> = color_keys
            .into_iter()
            .map(|k| ColorKey::new(saturate(k.position), k.color))
            .collect();
        let mut alpha_keys: Vec<AlphaKey> = alpha_keys
            .into_iter()
            .map(|k| AlphaKey::new(saturate(k.position), k.alpha))
            .collect();
        color_keys.sort_by(|a, b| a.position.total_cmp(&b.position));
        alpha_keys.sort_by(|a, b| a.position.total_cmp(&b.position));

        Self {
            color_keys,
            alpha_keys,
            mode: GradientMode::Blend,
        }
    }

    /// An opaque two-color ramp from `start` at 0 to `end` at 1.
    pub fn two_color(start: Rgba, end: Rgba) -> Self {
        Self::new(
            vec![ColorKey::new(0.0, start), ColorKey::new(1.0, end)],
            vec![AlphaKey::new(0.0, 1.0), AlphaKey::new(1.0, 1.0)],
        )
    }

    /// Returns this gradient with a different blend mode.
    pub fn with_mode(mut self, mode: GradientMode) -> Self {
        self.mode = mode;
        self
    }

    /// The sorted color keys.
    pub fn color_keys(&self) -> &[ColorKey] {
        &self.color_keys
    }

    /// The sorted alpha keys.
    pub fn alpha_keys(&self) -> &[AlphaKey] {
        &self.alpha_keys
    }

    /// The blend mode.
    pub fn mode(&self) -> GradientMode {
        self.mode
    }

    /// Samples the gradient at `t`, clamped to `[0, 1]`.
    ///
    /// An empty color list yields black RGB and an empty alpha list yields
    /// an alpha of `1.0`; see [`degeneracies`](Self::degeneracies).
    pub fn evaluate(&self, t: f32) -> Rgba {
        let t = saturate(t);

        let (r, g, b) = match self.mode {
            GradientMode::Blend => match bracket(&self.color_keys, t, |k| k.position) {
                None => (0.0, 0.0, 0.0),
                Some((lo, hi, f)) => {
                    let (c0, c1) = (self.color_keys[lo].color, self.color_keys[hi].color);
                    (lerp(c0.r, c1.r, f), lerp(c0.g, c1.g, f), lerp(c0.b, c1.b, f))
                }
            },
            GradientMode::Fixed => match step_index(&self.color_keys, t, |k| k.position) {
                None => (0.0, 0.0, 0.0),
                Some(i) => {
                    let c = self.color_keys[i].color;
                    (c.r, c.g, c.b)
                }
            },
        };

        let a = match self.mode {
            GradientMode::Blend => match bracket(&self.alpha_keys, t, |k| k.position) {
                None => 1.0,
                Some((lo, hi, f)) => {
                    lerp(self.alpha_keys[lo].alpha, self.alpha_keys[hi].alpha, f)
                }
            },
            GradientMode::Fixed => step_index(&self.alpha_keys, t, |k| k.position)
                .map_or(1.0, |i| self.alpha_keys[i].alpha),
        };

        Rgba::new(r, g, b, a)
    }

    /// Returns `true` if either key list is empty.
    pub fn is_degenerate(&self) -> bool {
        self.color_keys.is_empty() || self.alpha_keys.is_empty()
    }

    /// Lists the fallbacks [`evaluate`](Self::evaluate) will apply, tagged with
    /// the slot this gradient occupies in its texture.
    pub fn degeneracies(&self, slot: GradientSlot) -> Vec<DegenerateGradient> {
        let mut found = Vec::new();
        if self.color_keys.is_empty() {
            found.push(DegenerateGradient::NoColorKeys { slot });
        }
        if self.alpha_keys.is_empty() {
            found.push(DegenerateGradient::NoAlphaKeys { slot });
        }
        found
    }
}

/// Index of the first key at or after `t`, or the last key past the end.
fn step_index<K>(keys: &[K], t: f32, position: impl Fn(&K) -> f32) -> Option<usize> {
    let last = keys.len().checked_sub(1)?;
    Some(keys.partition_point(|k| position(k) < t).min(last))
}

impl Default for GradientField {
    /// Black to white, fully opaque.
    fn default() -> Self {
        Self::new(
            vec![ColorKey::new(0.0, Rgba::BLACK), ColorKey::new(1.0, Rgba::WHITE)],
            vec![AlphaKey::new(1.0, 1.0)],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq;

    #[test]
    fn test_default_is_black_to_white() {
        let gradient = GradientField::default();
        assert_eq!(gradient.evaluate(0.0), Rgba::BLACK);
        assert_eq!(gradient.evaluate(1.0), Rgba::WHITE);
        let mid = gradient.evaluate(0.25);
        assert!(approx_eq(mid.r, 0.25));
        assert!(approx_eq(mid.a, 1.0));
    }

    #[test]
    fn test_evaluate_clamps_outside_unit_range() {
        let gradient = GradientField::two_color(Rgba::rgb(1.0, 0.0, 0.0), Rgba::rgb(0.0, 0.0, 1.0));
        assert_eq!(gradient.evaluate(-3.0), gradient.evaluate(0.0));
        assert_eq!(gradient.evaluate(7.0), gradient.evaluate(1.0));
        assert_eq!(gradient.evaluate(f32::NAN), gradient.evaluate(0.0));
    }

    #[test]
    fn test_color_and_alpha_use_their_own_keys() {
        let gradient = GradientField::new(
            vec![ColorKey::new(0.0, Rgba::BLACK), ColorKey::new(1.0, Rgba::WHITE)],
            vec![
                AlphaKey::new(0.0, 0.0),
                AlphaKey::new(0.2, 1.0),
                AlphaKey::new(1.0, 1.0),
            ],
        );
        let sample = gradient.evaluate(0.1);
        assert!(approx_eq(sample.r, 0.1));
        assert!(approx_eq(sample.a, 0.5));
    }

    #[test]
    fn test_unsorted_keys_are_sorted() {
        let gradient = GradientField::new(
            vec![ColorKey::new(1.0, Rgba::WHITE), ColorKey::new(0.0, Rgba::BLACK)],
            vec![AlphaKey::new(0.5, 1.0)],
        );
        assert_eq!(gradient.color_keys()[0].color, Rgba::BLACK);
        assert!(approx_eq(gradient.evaluate(0.75).g, 0.75));
    }

    #[test]
    fn test_positions_are_clamped() {
        let gradient = GradientField::new(
            vec![ColorKey::new(-1.0, Rgba::BLACK), ColorKey::new(2.0, Rgba::WHITE)],
            vec![AlphaKey::new(0.0, 1.0)],
        );
        assert_eq!(gradient.color_keys()[0].position, 0.0);
        assert_eq!(gradient.color_keys()[1].position, 1.0);
        assert!(approx_eq(gradient.evaluate(0.5).b, 0.5));
    }

    #[test]
    fn test_fixed_mode_steps() {
        let gradient = GradientField::new(
            vec![
                ColorKey::new(0.0, Rgba::BLACK),
                ColorKey::new(0.5, Rgba::rgb(1.0, 0.0, 0.0)),
                ColorKey::new(1.0, Rgba::WHITE),
            ],
            vec![AlphaKey::new(0.0, 1.0)],
        )
        .with_mode(GradientMode::Fixed);
        assert_eq!(gradient.evaluate(0.0), Rgba::BLACK);
        assert_eq!(gradient.evaluate(0.3), Rgba::rgb(1.0, 0.0, 0.0));
        assert_eq!(gradient.evaluate(0.5), Rgba::rgb(1.0, 0.0, 0.0));
        assert_eq!(gradient.evaluate(0.51), Rgba::WHITE);
    }

    #[test]
    fn test_fixed_mode_takes_first_of_shared_position() {
        let red = Rgba::rgb(1.0, 0.0, 0.0);
        let green = Rgba::rgb(0.0, 1.0, 0.0);
        let gradient = GradientField::new(
            vec![
                ColorKey::new(0.0, Rgba::BLACK),
                ColorKey::new(0.5, red),
                ColorKey::new(0.5, green),
            ],
            vec![AlphaKey::new(0.5, 0.25), AlphaKey::new(0.5, 0.75)],
        )
        .with_mode(GradientMode::Fixed);
        assert_eq!(gradient.evaluate(0.5), red.with_alpha(0.25));
        assert_eq!(gradient.evaluate(0.4), red.with_alpha(0.25));
        assert_eq!(gradient.evaluate(0.9), green.with_alpha(0.75));
    }

    #[test]
    fn test_empty_keys_fall_back_to_opaque_black() {
        let gradient = GradientField::new(Vec::new(), Vec::new());
        assert!(gradient.is_degenerate());
        for t in [0.0, 0.3, 1.0, 5.0] {
            assert_eq!(gradient.evaluate(t), Rgba::BLACK);
        }
        assert_eq!(
            gradient.degeneracies(GradientSlot::Top),
            vec![
                DegenerateGradient::NoColorKeys { slot: GradientSlot::Top },
                DegenerateGradient::NoAlphaKeys { slot: GradientSlot::Top },
            ]
        );
    }

    #[test]
    fn test_single_key_is_constant() {
        let gradient = GradientField::new(
            vec![ColorKey::new(0.4, Rgba::rgb(0.2, 0.4, 0.6))],
            vec![AlphaKey::new(0.9, 0.5)],
        );
        assert_eq!(gradient.evaluate(0.0), Rgba::new(0.2, 0.4, 0.6, 0.5));
        assert_eq!(gradient.evaluate(1.0), Rgba::new(0.2, 0.4, 0.6, 0.5));
    }
}
