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

//! Pixel storage, reconciliation against [`FormatParameters`] and the
//! gradient fill.

use super::format::{validate_resolution, FormatParameters, TextureFormat};
use crate::error::{DegenerateGradient, TextureError};
use crate::gradient::{BlendCurve, GradientField};
use crate::math::{Extent2D, Rgba};
use std::fmt;

/// Identifies one of the two gradients of a texture in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GradientSlot {
    /// The gradient shown at the top edge (blend weight 1).
    Top,
    /// The gradient shown at the bottom edge (blend weight 0).
    Bottom,
}

impl fmt::Display for GradientSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradientSlot::Top => write!(f, "top"),
            GradientSlot::Bottom => write!(f, "bottom"),
        }
    }
}

/// What [`RasterBuffer::reconcile`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileResult {
    /// There was no buffer; one was created.
    Allocated,
    /// The existing buffer no longer matched and was replaced.
    Reallocated,
    /// The existing buffer already matched; its pixels are untouched.
    Unchanged,
}

impl ReconcileResult {
    /// Returns `true` if new storage was allocated and the pixels must be refilled.
    #[inline]
    pub fn allocated(&self) -> bool {
        !matches!(self, ReconcileResult::Unchanged)
    }
}

/// The gradients a fill reads from.
#[derive(Debug, Clone, Copy)]
pub struct FillSources<'a> {
    /// Gradient at blend weight 1, and the only one used in single-gradient mode.
    pub top: &'a GradientField,
    /// Gradient at blend weight 0. `None` falls back to `top` alone.
    pub bottom: Option<&'a GradientField>,
    /// Maps the normalized row coordinate to a blend weight.
    pub curve: &'a BlendCurve,
}

/// Outcome of a [`RasterBuffer::fill`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FillReport {
    /// Fallbacks applied because a gradient or the curve had no keys.
    pub diagnostics: Vec<DegenerateGradient>,
    /// Number of level-0 pixels written.
    pub pixels_written: usize,
}

impl FillReport {
    /// Returns `true` when no fallback was applied.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Normalized sample coordinate of texel `index` along an edge of `extent` texels.
///
/// This is `index / extent`, not `index / (extent - 1)`: the last texel of an
/// edge longer than one never samples exactly `1.0`.
#[inline]
pub fn texel_coordinate(index: u32, extent: u32) -> f32 {
    index as f32 / extent as f32
}

/// Applies the color-space correction of a fill to one raw gradient color.
///
/// | target | `store_as_srgb && project_is_linear` | otherwise |
/// |--------|--------------------------------------|-----------|
/// | HDR    | `to_linear(color)`                   | `color`   |
/// | LDR    | `color`                              | `to_gamma(color)` |
#[inline]
pub fn correct_color_space(
    color: Rgba,
    is_hdr_target: bool,
    store_as_srgb: bool,
    project_is_linear: bool,
) -> Rgba {
    let srgb_in_linear_project = store_as_srgb && project_is_linear;
    match (is_hdr_target, srgb_in_linear_project) {
        (true, true) => color.to_linear(),
        (true, false) => color,
        (false, true) => color,
        (false, false) => color.to_gamma(),
    }
}

#[derive(Debug, Clone, PartialEq)]
enum TexelData {
    Ldr(Vec<[u8; 4]>),
    Hdr(Vec<Rgba>),
}

impl TexelData {
    fn allocate(format: TextureFormat, count: usize) -> Result<Self, TextureError> {
        let bytes = count.saturating_mul(format.bytes_per_pixel() as usize);
        let failure = |_| TextureError::AllocationFailure { bytes };
        match format {
            TextureFormat::Rgba8Unorm => {
                let mut texels = Vec::new();
                texels.try_reserve_exact(count).map_err(failure)?;
                texels.resize(count, [0; 4]);
                Ok(TexelData::Ldr(texels))
            }
            TextureFormat::Rgba32Float => {
                let mut texels = Vec::new();
                texels.try_reserve_exact(count).map_err(failure)?;
                texels.resize(count, Rgba::TRANSPARENT);
                Ok(TexelData::Hdr(texels))
            }
        }
    }

    #[inline]
    fn get(&self, index: usize) -> Rgba {
        match self {
            TexelData::Ldr(texels) => Rgba::from_rgba8(texels[index]),
            TexelData::Hdr(texels) => texels[index],
        }
    }

    #[inline]
    fn set(&mut self, index: usize, color: Rgba) {
        match self {
            TexelData::Ldr(texels) => texels[index] = color.to_rgba8(),
            TexelData::Hdr(texels) => texels[index] = color,
        }
    }

    fn as_bytes(&self) -> &[u8] {
        match self {
            TexelData::Ldr(texels) => bytemuck::cast_slice(texels),
            TexelData::Hdr(texels) => bytemuck::cast_slice(texels),
        }
    }
}

/// CPU-side pixel storage of a gradient texture, with its mip chain.
///
/// Row `0` is the bottom row of the image, matching the vertical blend where
/// weight `0` selects the bottom gradient. Encoders flip rows when writing
/// top-down container formats.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterBuffer {
    extent: Extent2D,
    format: TextureFormat,
    levels: Vec<TexelData>,
    stale: bool,
    dirty: bool,
}

impl RasterBuffer {
    /// Allocates zeroed storage matching `params`.
    ///
    /// The resolution is validated before any memory is requested. The
    /// returned buffer is stale (must be filled) and dirty.
    pub fn allocate(params: &FormatParameters) -> Result<Self, TextureError> {
        params.validate()?;
        let extent = params.resolution;
        let format = params.texture_format();

        let level_count = params.mip_level_count();
        let mut levels = Vec::new();
        levels
            .try_reserve_exact(level_count as usize)
            .map_err(|_| TextureError::AllocationFailure { bytes: usize::MAX })?;
        for level in 0..level_count {
            let count = extent
                .mip_level(level)
                .area()
                .ok_or(TextureError::AllocationFailure { bytes: usize::MAX })?;
            levels.push(TexelData::allocate(format, count)?);
        }

        Ok(Self {
            extent,
            format,
            levels,
            stale: true,
            dirty: true,
        })
    }

    /// Wraps already decoded 8-bit pixels (row 0 at the bottom) in a
    /// single-level LDR buffer.
    pub fn from_rgba8(extent: Extent2D, texels: Vec<[u8; 4]>) -> Result<Self, TextureError> {
        Self::check_pixel_count(extent, texels.len())?;
        Ok(Self::wrap(extent, TextureFormat::Rgba8Unorm, TexelData::Ldr(texels)))
    }

    /// Wraps already decoded float pixels (row 0 at the bottom) in a
    /// single-level HDR buffer.
    pub fn from_rgba32f(extent: Extent2D, texels: Vec<Rgba>) -> Result<Self, TextureError> {
        Self::check_pixel_count(extent, texels.len())?;
        Ok(Self::wrap(extent, TextureFormat::Rgba32Float, TexelData::Hdr(texels)))
    }

    fn check_pixel_count(extent: Extent2D, actual: usize) -> Result<(), TextureError> {
        validate_resolution(extent)?;
        let expected = extent.area().unwrap_or(usize::MAX);
        if expected != actual {
            return Err(TextureError::PixelCountMismatch { expected, actual });
        }
        Ok(())
    }

    fn wrap(extent: Extent2D, format: TextureFormat, level0: TexelData) -> Self {
        Self {
            extent,
            format,
            levels: vec![level0],
            stale: false,
            dirty: false,
        }
    }

    /// Returns `true` if `current` has to be replaced to satisfy `params`.
    ///
    /// A buffer with exactly one mip level counts as "mipmaps disabled", so
    /// the mip comparison is `(mip_level_count == 1) == generate_mipmaps`.
    pub fn needs_reallocation(current: Option<&Self>, params: &FormatParameters) -> bool {
        match current {
            None => true,
            Some(buffer) => {
                buffer.width() != params.resolution.width
                    || buffer.height() != params.resolution.height
                    || buffer.is_hdr() != params.high_dynamic_range
                    || (buffer.mip_level_count() == 1) == params.generate_mipmaps
            }
        }
    }

    /// Brings the buffer in `slot` in line with `params`.
    ///
    /// When reallocation is needed the new storage is built completely before
    /// it replaces the old one, so on error `slot` is left as it was.
    pub fn reconcile(
        slot: &mut Option<Self>,
        params: &FormatParameters,
    ) -> Result<ReconcileResult, TextureError> {
        params.validate()?;
        if !Self::needs_reallocation(slot.as_ref(), params) {
            return Ok(ReconcileResult::Unchanged);
        }

        let fresh = Self::allocate(params)?;
        log::debug!(
            "Allocated {}x{} {:?} raster with {} mip level(s)",
            fresh.width(),
            fresh.height(),
            fresh.format(),
            fresh.mip_level_count()
        );
        let result = if slot.is_some() {
            ReconcileResult::Reallocated
        } else {
            ReconcileResult::Allocated
        };
        *slot = Some(fresh);
        Ok(result)
    }

    /// Recomputes every pixel from `sources`.
    ///
    /// The color-space branch follows the buffer's actual format, not
    /// `params.high_dynamic_range`; callers reconcile before filling so the
    /// two agree. Regenerates the mip chain and marks the buffer dirty.
    pub fn fill(
        &mut self,
        sources: &FillSources<'_>,
        params: &FormatParameters,
        project_is_linear: bool,
    ) -> FillReport {
        let mut diagnostics = sources.top.degeneracies(GradientSlot::Top);
        let bottom = if params.use_two_gradients {
            if sources.bottom.is_none() {
                log::debug!("Two gradients requested without a bottom gradient, using top only");
            }
            sources.bottom
        } else {
            None
        };
        if let Some(bottom) = bottom {
            diagnostics.extend(bottom.degeneracies(GradientSlot::Bottom));
            if sources.curve.is_degenerate() {
                diagnostics.push(DegenerateGradient::EmptyCurve);
            }
        }
        for diagnostic in &diagnostics {
            log::warn!("{diagnostic}");
        }

        let Extent2D { width, height } = self.extent;
        let is_hdr_target = self.format.is_hdr();

        // Columns share their horizontal coordinate, so each gradient is
        // evaluated once per column rather than once per pixel.
        let top_row: Vec<Rgba> = (0..width)
            .map(|x| sources.top.evaluate(texel_coordinate(x, width)))
            .collect();
        let bottom_row: Option<Vec<Rgba>> = bottom.map(|bottom| {
            (0..width)
                .map(|x| bottom.evaluate(texel_coordinate(x, width)))
                .collect()
        });

        let level0 = &mut self.levels[0];
        for y in 0..height {
            let row_start = y as usize * width as usize;
            let t_vertical = match bottom_row {
                Some(_) => sources.curve.evaluate(texel_coordinate(y, height)),
                None => 1.0,
            };
            for x in 0..width as usize {
                let raw = match &bottom_row {
                    Some(bottom_row) => Rgba::lerp(bottom_row[x], top_row[x], t_vertical),
                    None => top_row[x],
                };
                let color = correct_color_space(
                    raw,
                    is_hdr_target,
                    params.store_as_srgb,
                    project_is_linear,
                );
                level0.set(row_start + x, color);
            }
        }

        self.regenerate_mips();
        self.stale = false;
        self.dirty = true;

        FillReport {
            diagnostics,
            pixels_written: width as usize * height as usize,
        }
    }

    /// Rebuilds levels `1..` from level 0 with a 2×2 box filter.
    ///
    /// Odd edges reuse their last row or column.
    pub fn regenerate_mips(&mut self) {
        for level in 1..self.levels.len() {
            let src_extent = self.extent.mip_level(level as u32 - 1);
            let dst_extent = self.extent.mip_level(level as u32);
            let (head, tail) = self.levels.split_at_mut(level);
            let src = &head[level - 1];
            let dst = &mut tail[0];

            let src_index = |x: u32, y: u32| {
                let x = x.min(src_extent.width - 1) as usize;
                let y = y.min(src_extent.height - 1) as usize;
                y * src_extent.width as usize + x
            };

            for y in 0..dst_extent.height {
                for x in 0..dst_extent.width {
                    let sum = src.get(src_index(2 * x, 2 * y))
                        + src.get(src_index(2 * x + 1, 2 * y))
                        + src.get(src_index(2 * x, 2 * y + 1))
                        + src.get(src_index(2 * x + 1, 2 * y + 1));
                    let index = y as usize * dst_extent.width as usize + x as usize;
                    dst.set(index, sum * 0.25);
                }
            }
        }
    }

    /// Size of mip level 0.
    #[inline]
    pub fn extent(&self) -> Extent2D {
        self.extent
    }

    /// Width of mip level 0.
    #[inline]
    pub fn width(&self) -> u32 {
        self.extent.width
    }

    /// Height of mip level 0.
    #[inline]
    pub fn height(&self) -> u32 {
        self.extent.height
    }

    /// Pixel format of every level.
    #[inline]
    pub fn format(&self) -> TextureFormat {
        self.format
    }

    /// Returns `true` for float storage.
    #[inline]
    pub fn is_hdr(&self) -> bool {
        self.format.is_hdr()
    }

    /// Number of mip levels, level 0 included. Always at least 1.
    #[inline]
    pub fn mip_level_count(&self) -> u32 {
        self.levels.len() as u32
    }

    /// Extent of mip `level`, or `None` past the end of the chain.
    pub fn level_extent(&self, level: u32) -> Option<Extent2D> {
        ((level as usize) < self.levels.len()).then(|| self.extent.mip_level(level))
    }

    /// Reads a level-0 pixel.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.mip_pixel(0, x, y)
    }

    /// Reads a pixel of mip `level`. LDR texels are returned normalized.
    pub fn mip_pixel(&self, level: u32, x: u32, y: u32) -> Option<Rgba> {
        let extent = self.level_extent(level)?;
        if x >= extent.width || y >= extent.height {
            return None;
        }
        let index = y as usize * extent.width as usize + x as usize;
        Some(self.levels[level as usize].get(index))
    }

    /// Raw bytes of mip `level`, rows bottom-up, in [`format`](Self::format) layout.
    pub fn level_bytes(&self, level: u32) -> Option<&[u8]> {
        self.levels.get(level as usize).map(TexelData::as_bytes)
    }

    /// Returns `true` between an allocation and the next fill.
    #[inline]
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Returns `true` if the pixels changed since the last [`clear_dirty`](Self::clear_dirty).
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Called by the persistence layer once the pixels are saved.
    #[inline]
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq;

    fn params(width: u32, height: u32) -> FormatParameters {
        FormatParameters {
            resolution: Extent2D::new(width, height),
            high_dynamic_range: true,
            store_as_srgb: false,
            generate_mipmaps: false,
            use_two_gradients: false,
        }
    }

    #[test]
    fn test_texel_coordinate_never_reaches_one() {
        for width in [1_u32, 2, 3, 7, 256, 1000] {
            for x in 0..width {
                assert_eq!(texel_coordinate(x, width), x as f32 / width as f32);
                assert!(texel_coordinate(x, width) < 1.0);
            }
        }
    }

    #[test]
    fn test_color_space_truth_table() {
        let c = Rgba::new(0.5, 0.5, 0.5, 1.0);
        assert_eq!(correct_color_space(c, true, true, true), c.to_linear());
        assert_eq!(correct_color_space(c, true, true, false), c);
        assert_eq!(correct_color_space(c, true, false, true), c);
        assert_eq!(correct_color_space(c, true, false, false), c);
        assert_eq!(correct_color_space(c, false, true, true), c);
        assert_eq!(correct_color_space(c, false, true, false), c.to_gamma());
        assert_eq!(correct_color_space(c, false, false, true), c.to_gamma());
        assert_eq!(correct_color_space(c, false, false, false), c.to_gamma());
    }

    #[test]
    fn test_allocate_matches_parameters() {
        let mut p = params(8, 4);
        p.generate_mipmaps = true;
        let buffer = RasterBuffer::allocate(&p).unwrap();
        assert_eq!(buffer.extent(), Extent2D::new(8, 4));
        assert!(buffer.is_hdr());
        assert_eq!(buffer.mip_level_count(), 4);
        assert_eq!(buffer.level_extent(3), Some(Extent2D::new(1, 1)));
        assert_eq!(buffer.level_extent(4), None);
        assert!(buffer.is_stale());
        assert!(buffer.is_dirty());
        assert_eq!(buffer.level_bytes(0).map(<[u8]>::len), Some(8 * 4 * 16));
    }

    #[test]
    fn test_invalid_resolution_rejected_before_allocation() {
        let mut slot = Some(RasterBuffer::allocate(&params(4, 4)).unwrap());
        let before = slot.clone();
        let err = RasterBuffer::reconcile(&mut slot, &params(0, 4)).unwrap_err();
        assert_eq!(err, TextureError::InvalidResolution { width: 0, height: 4 });
        assert_eq!(slot, before);
    }

    #[test]
    fn test_ldr_fill_quantizes() {
        let mut p = params(4, 1);
        p.high_dynamic_range = false;
        p.store_as_srgb = true;
        let mut buffer = RasterBuffer::allocate(&p).unwrap();
        let top = GradientField::default();
        let curve = BlendCurve::default();
        let sources = FillSources {
            top: &top,
            bottom: None,
            curve: &curve,
        };
        buffer.fill(&sources, &p, true);
        assert_eq!(&buffer.level_bytes(0).unwrap()[4..8], &[64_u8, 64, 64, 255]);
        assert!(approx_eq(buffer.pixel(1, 0).unwrap().r, 64.0 / 255.0));
    }

    #[test]
    fn test_mips_average_level_zero() {
        let mut p = params(4, 2);
        p.generate_mipmaps = true;
        let mut buffer = RasterBuffer::allocate(&p).unwrap();
        let top = GradientField::default();
        let curve = BlendCurve::default();
        let sources = FillSources {
            top: &top,
            bottom: None,
            curve: &curve,
        };
        buffer.fill(&sources, &p, false);

        // Level 0 columns are 0, 0.25, 0.5, 0.75.
        assert!(approx_eq(buffer.mip_pixel(1, 0, 0).unwrap().r, 0.125));
        assert!(approx_eq(buffer.mip_pixel(1, 1, 0).unwrap().r, 0.625));
        assert!(approx_eq(buffer.mip_pixel(2, 0, 0).unwrap().r, 0.375));
        assert_eq!(buffer.mip_pixel(2, 1, 0), None);
    }

    #[test]
    fn test_from_rgba8_checks_count() {
        let extent = Extent2D::new(2, 2);
        assert_eq!(
            RasterBuffer::from_rgba8(extent, vec![[0; 4]; 3]).unwrap_err(),
            TextureError::PixelCountMismatch {
                expected: 4,
                actual: 3
            }
        );
        let buffer = RasterBuffer::from_rgba8(extent, vec![[255, 0, 0, 255]; 4]).unwrap();
        assert!(!buffer.is_stale());
        assert!(!buffer.is_dirty());
        assert_eq!(buffer.pixel(1, 1), Some(Rgba::rgb(1.0, 0.0, 0.0)));
    }
}
