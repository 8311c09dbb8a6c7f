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


//! Square icon previews of a baked raster, shown next to the asset in the
//! project browser.

use crate::codec::{to_rgba8_image, CodecError};
use crate::error::AssetError;
use gradtex_core::RasterBuffer;
use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbaImage};
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// Scales level 0 of `raster` to a `size`×`size` 8-bit icon. HDR values are clamped.
pub fn render_icon(raster: &RasterBuffer, size: u32) -> Result<RgbaImage, CodecError> {
    let size = size.max(1);
    let full = to_rgba8_image(raster)?;
    Ok(imageops::resize(&full, size, size, FilterType::Triangle))
}

/// Renders an icon and writes it to `path` as PNG.
pub fn write_icon(
    raster: &RasterBuffer,
    size: u32,
    path: impl AsRef<Path>,
) -> Result<(), AssetError> {
    let path = path.as_ref();
    let icon = render_icon(raster, size)?;

    let mut bytes = Cursor::new(Vec::new());
    icon.write_to(&mut bytes, ImageFormat::Png)
        .map_err(CodecError::from)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| AssetError::io(parent, e))?;
    }
    fs::write(path, bytes.into_inner()).map_err(|e| AssetError::io(path, e))?;
    log::info!("Wrote {size}x{size} icon to '{}'", path.display());
    Ok(())
}
