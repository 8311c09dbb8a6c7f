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

//! The contract between a gradient texture and the codec that serializes it.
//!
//! The core only guarantees that the pixels handed to a [`PixelEncoder`] are
//! display-ready; the byte layout of each container belongs to the encoder.

use crate::texture::RasterBuffer;
use serde::{Deserialize, Serialize};

/// Image container an exported texture is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerFormat {
    /// Lossless 8-bit RGBA (PNG).
    Png,
    /// Lossless 8-bit RGBA (Truevision TGA).
    Tga,
    /// Lossless 32-bit float RGBA (OpenEXR). Keeps HDR values above `1.0`.
    Exr,
    /// Lossy 8-bit RGB (JPEG). Alpha is dropped.
    Jpeg {
        /// Encoder quality, `1..=100`.
        quality: u8,
    },
}

impl ContainerFormat {
    /// Default JPEG quality used when a format is inferred from a file name.
    pub const DEFAULT_JPEG_QUALITY: u8 = 90;

    /// Conventional file extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ContainerFormat::Png => "png",
            ContainerFormat::Tga => "tga",
            ContainerFormat::Exr => "exr",
            ContainerFormat::Jpeg { .. } => "jpg",
        }
    }

    /// Infers a format from a file extension (case-insensitive).
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "png" => Some(ContainerFormat::Png),
            "tga" => Some(ContainerFormat::Tga),
            "exr" => Some(ContainerFormat::Exr),
            "jpg" | "jpeg" => Some(ContainerFormat::Jpeg {
                quality: Self::DEFAULT_JPEG_QUALITY,
            }),
            _ => None,
        }
    }

    /// Returns `true` unless the container discards information.
    pub fn is_lossless(&self) -> bool {
        !matches!(self, ContainerFormat::Jpeg { .. })
    }

    /// Returns `true` if values above `1.0` survive encoding.
    pub fn supports_hdr(&self) -> bool {
        matches!(self, ContainerFormat::Exr)
    }
}

/// Serializes a raster buffer into an image container.
///
/// Implemented outside the core (see `gradtex-io`'s `ImageCodec`); tests can
/// implement it to capture the pixels an export sees.
pub trait PixelEncoder {
    /// Error reported when the pixels cannot be encoded.
    type Error;

    /// Encodes mip level 0 of `raster` into `format`.
    fn encode(
        &self,
        raster: &RasterBuffer,
        format: ContainerFormat,
    ) -> Result<Vec<u8>, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_round_trip() {
        for format in [
            ContainerFormat::Png,
            ContainerFormat::Tga,
            ContainerFormat::Exr,
            ContainerFormat::Jpeg { quality: 90 },
        ] {
            assert_eq!(ContainerFormat::from_extension(format.extension()), Some(format));
        }
        assert_eq!(
            ContainerFormat::from_extension("JPEG"),
            Some(ContainerFormat::Jpeg { quality: 90 })
        );
        assert_eq!(ContainerFormat::from_extension("bmp"), None);
    }

    #[test]
    fn test_format_capabilities() {
        assert!(ContainerFormat::Exr.supports_hdr());
        assert!(!ContainerFormat::Png.supports_hdr());
        assert!(!ContainerFormat::Jpeg { quality: 50 }.is_lossless());
    }
}
