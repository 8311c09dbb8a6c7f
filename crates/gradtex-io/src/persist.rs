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


//! Baking a gradient texture to an image file.

use crate::codec::ImageCodec;
use crate::error::AssetError;
use gradtex_core::{ContainerFormat, GradientTexture};
use std::fs;
use std::path::{Path, PathBuf};

/// Infers the container from the extension of `path`.
pub fn format_for_path(path: &Path) -> Result<ContainerFormat, AssetError> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(ContainerFormat::from_extension)
        .ok_or_else(|| AssetError::UnsupportedExtension(path.to_path_buf()))
}

/// File name of a baked texture: `{name}_baked.{ext}`.
pub fn baked_file_name(name: &str, format: ContainerFormat) -> PathBuf {
    PathBuf::from(format!("{name}_baked.{}", format.extension()))
}

/// Regenerates `texture` and writes it to `path`.
///
/// `format` defaults to the one named by the extension of `path`. Parent
/// directories are created as needed. On success the raster is no longer
/// dirty. Returns the number of bytes written.
pub fn bake_to_file(
    texture: &mut GradientTexture,
    path: impl AsRef<Path>,
    format: Option<ContainerFormat>,
    project_is_linear: bool,
) -> Result<usize, AssetError> {
    let path = path.as_ref();
    let format = match format {
        Some(format) => format,
        None => format_for_path(path)?,
    };

    let report = texture.update(project_is_linear)?;
    if report.reconciled.allocated() {
        log::debug!("Raster of '{}' was (re)allocated before baking", texture.name());
    }
    if texture.params().high_dynamic_range && !format.supports_hdr() {
        log::warn!(
            "'{}' is HDR but {:?} stores 8 bits per channel, values above 1.0 are clamped",
            texture.name(),
            format
        );
    }

    let bytes = texture.export_pixels(format, &ImageCodec, project_is_linear)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| AssetError::io(parent, e))?;
    }
    fs::write(path, &bytes).map_err(|e| AssetError::io(path, e))?;
    if let Some(raster) = texture.texture_mut() {
        raster.clear_dirty();
    }

    log::info!(
        "Baked '{}' to '{}' ({:.2} KB)",
        texture.name(),
        path.display(),
        bytes.len() as f64 / 1024.0
    );
    Ok(bytes.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_for_path() {
        assert_eq!(format_for_path(Path::new("a/b.EXR")).unwrap(), ContainerFormat::Exr);
        assert!(matches!(
            format_for_path(Path::new("noext")),
            Err(AssetError::UnsupportedExtension(_))
        ));
    }

    #[test]
    fn test_baked_file_name() {
        assert_eq!(
            baked_file_name("Sky", ContainerFormat::Png),
            PathBuf::from("Sky_baked.png")
        );
        assert_eq!(
            baked_file_name("Sky", ContainerFormat::Jpeg { quality: 75 }),
            PathBuf::from("Sky_baked.jpg")
        );
    }
}
