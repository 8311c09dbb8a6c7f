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


//! [`PixelEncoder`] implementation backed by the `image` crate.
//!
//! Raster buffers store their bottom row first; every container written
//! here expects the top row first, so rows are flipped on the way out.

use gradtex_core::{ContainerFormat, PixelEncoder, RasterBuffer, Rgba, TextureFormat};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, Rgba32FImage, RgbaImage};
use std::io::Cursor;
use thiserror::Error;

/// An error raised while turning a raster into container bytes.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The `image` encoder rejected the pixels.
    #[error("Image encoding failed")]
    Image(#[from] image::ImageError),
    /// The pixel data does not cover the raster extent.
    #[error("Pixel buffer does not match a {width}x{height} image")]
    BufferSize {
        /// Raster width.
        width: u32,
        /// Raster height.
        height: u32,
    },
}

/// Encodes mip level 0 of a raster into PNG, TGA, EXR or JPEG.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCodec;

impl ImageCodec {
    /// Creates a codec.
    pub fn new() -> Self {
        Self
    }
}

impl PixelEncoder for ImageCodec {
    type Error = CodecError;

    fn encode(
        &self,
        raster: &RasterBuffer,
        format: ContainerFormat,
    ) -> Result<Vec<u8>, CodecError> {
        let mut bytes = Cursor::new(Vec::new());
        match format {
            ContainerFormat::Png => {
                to_rgba8_image(raster)?.write_to(&mut bytes, ImageFormat::Png)?;
            }
            ContainerFormat::Tga => {
                to_rgba8_image(raster)?.write_to(&mut bytes, ImageFormat::Tga)?;
            }
            ContainerFormat::Exr => {
                to_rgba32f_image(raster)?.write_to(&mut bytes, ImageFormat::OpenExr)?;
            }
            ContainerFormat::Jpeg { quality } => {
                // JPEG has no alpha channel.
                let rgb = DynamicImage::ImageRgba8(to_rgba8_image(raster)?).to_rgb8();
                let mut encoder = JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100));
                encoder.encode_image(&rgb)?;
            }
        }

        let bytes = bytes.into_inner();
        log::debug!(
            "Encoded {}x{} raster as {:?} ({} bytes)",
            raster.width(),
            raster.height(),
            format,
            bytes.len()
        );
        Ok(bytes)
    }
}

/// Level 0 of `raster` as a top-down 8-bit image. HDR values are clamped.
pub fn to_rgba8_image(raster: &RasterBuffer) -> Result<RgbaImage, CodecError> {
    let (width, height) = (raster.width(), raster.height());
    let texels: Vec<u8> = match (raster.format(), raster.level_bytes(0)) {
        (TextureFormat::Rgba8Unorm, Some(level)) => level
            .chunks_exact(width as usize * 4)
            .rev()
            .flatten()
            .copied()
            .collect(),
        _ => pixels_top_down(raster).flat_map(|c| c.to_rgba8()).collect(),
    };
    RgbaImage::from_raw(width, height, texels).ok_or(CodecError::BufferSize { width, height })
}

/// Level 0 of `raster` as a top-down float image.
pub fn to_rgba32f_image(raster: &RasterBuffer) -> Result<Rgba32FImage, CodecError> {
    let (width, height) = (raster.width(), raster.height());
    let texels: Vec<f32> = pixels_top_down(raster).flat_map(|c| c.to_array()).collect();
    Rgba32FImage::from_raw(width, height, texels).ok_or(CodecError::BufferSize { width, height })
}

fn pixels_top_down(raster: &RasterBuffer) -> impl Iterator<Item = Rgba> + '_ {
    let (width, height) = (raster.width(), raster.height());
    (0..height)
        .rev()
        .flat_map(move |y| (0..width).map(move |x| raster.pixel(x, y).unwrap_or_default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradtex_core::Extent2D;

    const RED: [u8; 4] = [255, 0, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];

    /// Bottom row red, top row blue.
    fn striped() -> RasterBuffer {
        RasterBuffer::from_rgba8(Extent2D::new(2, 2), vec![RED, RED, BLUE, BLUE]).unwrap()
    }

    #[test]
    fn test_png_is_written_top_down() {
        let bytes = ImageCodec.encode(&striped(), ContainerFormat::Png).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.get_pixel(0, 0).0, BLUE);
        assert_eq!(decoded.get_pixel(1, 1).0, RED);
    }

    #[test]
    fn test_tga_keeps_alpha() {
        let raster =
            RasterBuffer::from_rgba8(Extent2D::new(1, 1), vec![[10, 20, 30, 40]]).unwrap();
        let bytes = ImageCodec.encode(&raster, ContainerFormat::Tga).unwrap();
        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Tga)
            .unwrap()
            .to_rgba8();
        assert_eq!(decoded.get_pixel(0, 0).0, [10, 20, 30, 40]);
    }

    #[test]
    fn test_exr_keeps_hdr_values() {
        let bright = Rgba::rgb(4.0, 0.5, 0.0);
        let raster = RasterBuffer::from_rgba32f(Extent2D::new(2, 1), vec![bright; 2]).unwrap();
        let bytes = ImageCodec.encode(&raster, ContainerFormat::Exr).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba32f();
        assert_eq!(decoded.get_pixel(1, 0).0, [4.0, 0.5, 0.0, 1.0]);
    }

    #[test]
    fn test_jpeg_header() {
        let bytes = ImageCodec
            .encode(&striped(), ContainerFormat::Jpeg { quality: 80 })
            .unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_hdr_raster_to_ldr_image_clamps() {
        let raster =
            RasterBuffer::from_rgba32f(Extent2D::new(1, 1), vec![Rgba::new(2.0, -1.0, 0.5, 1.0)])
                .unwrap();
        let image = to_rgba8_image(&raster).unwrap();
        assert_eq!(image.get_pixel(0, 0).0, [255, 0, 128, 255]);
    }
}
