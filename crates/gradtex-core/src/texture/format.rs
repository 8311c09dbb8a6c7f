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

//! Pixel formats and the user-facing format parameters of a gradient texture.

use crate::error::TextureError;
use crate::math::Extent2D;
use serde::{Deserialize, Serialize};

/// Largest edge, in pixels, a raster buffer may have.
pub const MAX_TEXTURE_DIMENSION: u32 = 16384;

/// Defines the memory format of pixels in a raster buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    /// Four 8-bit unsigned normalized components (RGBA). Used for LDR targets.
    Rgba8Unorm,
    /// Four 32-bit float components. Used for HDR targets.
    Rgba32Float,
}

impl TextureFormat {
    /// The format backing a target of the given dynamic range.
    #[inline]
    pub fn for_dynamic_range(high_dynamic_range: bool) -> Self {
        if high_dynamic_range {
            TextureFormat::Rgba32Float
        } else {
            TextureFormat::Rgba8Unorm
        }
    }

    /// Returns the size in bytes of a single pixel for this format.
    pub fn bytes_per_pixel(&self) -> u32 {
        match self {
            TextureFormat::Rgba8Unorm => 4,
            TextureFormat::Rgba32Float => 16,
        }
    }

    /// Returns `true` for floating-point formats that can hold values above `1.0`.
    pub fn is_hdr(&self) -> bool {
        matches!(self, TextureFormat::Rgba32Float)
    }
}

/// Rejects extents with a zero edge or an edge above [`MAX_TEXTURE_DIMENSION`].
pub fn validate_resolution(resolution: Extent2D) -> Result<(), TextureError> {
    let Extent2D { width, height } = resolution;
    if resolution.is_empty() || width > MAX_TEXTURE_DIMENSION || height > MAX_TEXTURE_DIMENSION {
        return Err(TextureError::InvalidResolution { width, height });
    }
    Ok(())
}

/// The format-level settings a raster buffer is reconciled against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatParameters {
    /// Size of mip level 0.
    pub resolution: Extent2D,
    /// Store floating-point pixels instead of 8-bit ones.
    pub high_dynamic_range: bool,
    /// Gradient colors are authored in gamma (sRGB) encoding.
    pub store_as_srgb: bool,
    /// Keep a full mip chain next to level 0.
    pub generate_mipmaps: bool,
    /// Blend a bottom gradient into the top one along the vertical axis.
    /// When `false` only the top gradient is used.
    pub use_two_gradients: bool,
}

impl Default for FormatParameters {
    fn default() -> Self {
        Self {
            resolution: Extent2D::new(256, 256),
            high_dynamic_range: true,
            store_as_srgb: true,
            generate_mipmaps: false,
            use_two_gradients: true,
        }
    }
}

impl FormatParameters {
    /// Rejects zero-sized or oversized resolutions.
    ///
    /// Callers are expected to clamp user input to at least 1×1 first.
    pub fn validate(&self) -> Result<(), TextureError> {
        validate_resolution(self.resolution)
    }

    /// The pixel format a buffer built from these parameters uses.
    #[inline]
    pub fn texture_format(&self) -> TextureFormat {
        TextureFormat::for_dynamic_range(self.high_dynamic_range)
    }

    /// The mip level count a buffer built from these parameters has.
    #[inline]
    pub fn mip_level_count(&self) -> u32 {
        if self.generate_mipmaps {
            self.resolution.full_mip_chain_len()
        } else {
            1
        }
    }
}
