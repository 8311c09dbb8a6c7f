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

//! Integration tests for `GradientTexture::export_pixels`.

use anyhow::Result;
use gradtex_core::{
    ContainerFormat, ExportError, Extent2D, FormatParameters, GradientTexture, PixelEncoder,
    RasterBuffer, TextureError,
};
use std::cell::Cell;
use std::io;

/// Returns the raw level-0 bytes and records the sRGB-relevant format it saw.
#[derive(Default)]
struct CaptureEncoder {
    saw_hdr: Cell<Option<bool>>,
}

impl PixelEncoder for CaptureEncoder {
    type Error = io::Error;

    fn encode(&self, raster: &RasterBuffer, _: ContainerFormat) -> io::Result<Vec<u8>> {
        self.saw_hdr.set(Some(raster.is_hdr()));
        raster
            .level_bytes(0)
            .map(<[u8]>::to_vec)
            .ok_or_else(|| io::Error::other("no level 0"))
    }
}

struct FailingEncoder;

impl PixelEncoder for FailingEncoder {
    type Error = io::Error;

    fn encode(&self, _: &RasterBuffer, _: ContainerFormat) -> io::Result<Vec<u8>> {
        Err(io::Error::other("disk full"))
    }
}

fn texture(high_dynamic_range: bool, store_as_srgb: bool) -> Result<GradientTexture> {
    let mut texture = GradientTexture::new(
        "export",
        FormatParameters {
            resolution: Extent2D::new(8, 4),
            high_dynamic_range,
            store_as_srgb,
            generate_mipmaps: false,
            use_two_gradients: true,
        },
    );
    texture.update(true)?;
    Ok(texture)
}

fn level0(texture: &GradientTexture) -> Vec<u8> {
    texture
        .texture()
        .and_then(|raster| raster.level_bytes(0))
        .map(<[u8]>::to_vec)
        .unwrap_or_default()
}

#[test]
fn test_ldr_export_restores_flag_and_pixels() -> Result<()> {
    let mut texture = texture(false, false)?;
    let before = level0(&texture);
    let encoder = CaptureEncoder::default();

    let exported = texture.export_pixels(ContainerFormat::Png, &encoder, true)?;

    assert_eq!(encoder.saw_hdr.get(), Some(false));
    // Exported with sRGB on, so the gamma correction applied to the live
    // pixels is skipped for the export.
    assert_ne!(exported, before);
    assert!(!texture.store_as_srgb());
    assert_eq!(level0(&texture), before);
    Ok(())
}

#[test]
fn test_hdr_export_clears_srgb_temporarily() -> Result<()> {
    let mut texture = texture(true, true)?;
    let before = level0(&texture);

    let exported = texture.export_pixels(ContainerFormat::Exr, &CaptureEncoder::default(), true)?;

    assert_ne!(exported, before);
    assert!(texture.store_as_srgb());
    assert_eq!(level0(&texture), before);
    Ok(())
}

#[test]
fn test_export_matches_flag_already_set() -> Result<()> {
    let mut texture = texture(false, true)?;
    let before = level0(&texture);

    let exported = texture.export_pixels(ContainerFormat::Tga, &CaptureEncoder::default(), true)?;

    assert_eq!(exported, before);
    Ok(())
}

#[test]
fn test_failed_encode_still_restores() -> Result<()> {
    let mut texture = texture(true, true)?;
    let before = level0(&texture);

    let err = texture
        .export_pixels(ContainerFormat::Exr, &FailingEncoder, true)
        .unwrap_err();

    assert!(matches!(err, ExportError::Encode(ref io_err) if io_err.to_string() == "disk full"));
    assert!(texture.store_as_srgb());
    assert_eq!(level0(&texture), before);
    Ok(())
}

#[test]
fn test_export_without_raster_fails() {
    let mut texture = GradientTexture::new("unbaked", FormatParameters::default());
    let err = texture
        .export_pixels(ContainerFormat::Png, &CaptureEncoder::default(), true)
        .unwrap_err();
    assert!(matches!(err, ExportError::Texture(TextureError::NotAllocated)));
}
