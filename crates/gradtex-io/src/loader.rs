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


//! Decoding a previously baked texture back into a [`RasterBuffer`].

use crate::error::AssetError;
use gradtex_core::{Extent2D, RasterBuffer, Rgba};
use image::{DynamicImage, ImageFormat};
use std::fs;
use std::path::Path;

/// Decodes image bytes, guessing the container from its header.
///
/// Float images (EXR) become HDR buffers, everything else 8-bit LDR. The
/// result has a single mip level and is neither stale nor dirty.
pub fn load_raster(bytes: &[u8]) -> Result<RasterBuffer, AssetError> {
    let image = image::load_from_memory(bytes)?;
    into_raster(image)
}

/// Reads and decodes an image file. The container is taken from the
/// extension when it has one, since TGA files carry no signature.
pub fn load_raster_file(path: impl AsRef<Path>) -> Result<RasterBuffer, AssetError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| AssetError::io(path, e))?;
    let image = match ImageFormat::from_path(path) {
        Ok(format) => image::load_from_memory_with_format(&bytes, format)?,
        Err(_) => image::load_from_memory(&bytes)?,
    };
    let raster = into_raster(image)?;
    log::debug!(
        "Loaded {}x{} {:?} raster from '{}'",
        raster.width(),
        raster.height(),
        raster.format(),
        path.display()
    );
    Ok(raster)
}

fn into_raster(image: DynamicImage) -> Result<RasterBuffer, AssetError> {
    let extent = Extent2D::new(image.width(), image.height());
    let row = extent.width as usize;

    let raster = match &image {
        DynamicImage::ImageRgb32F(_) | DynamicImage::ImageRgba32F(_) => {
            let pixels = image.to_rgba32f().into_raw();
            let texels: Vec<Rgba> = pixels
                .chunks_exact(4 * row.max(1))
                .rev()
                .flat_map(|line| line.chunks_exact(4))
                .map(|c| Rgba::new(c[0], c[1], c[2], c[3]))
                .collect();
            RasterBuffer::from_rgba32f(extent, texels)?
        }
        _ => {
            let pixels = image.to_rgba8().into_raw();
            let texels: Vec<[u8; 4]> = pixels
                .chunks_exact(4 * row.max(1))
                .rev()
                .flat_map(|line| line.chunks_exact(4))
                .map(|c| [c[0], c[1], c[2], c[3]])
                .collect();
            RasterBuffer::from_rgba8(extent, texels)?
        }
    };
    Ok(raster)
}
