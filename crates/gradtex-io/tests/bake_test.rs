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


//! Integration tests for baking, reloading and asset definitions on disk.

use anyhow::Result;
use gradtex_core::{ContainerFormat, Extent2D, FormatParameters, GradientField, Rgba};
use gradtex_io::{
    bake_to_file, load_definition, load_raster_file, save_definition, AssetError, ColorSpace,
    GradientTextureDefinition, ProjectSettings, SETTINGS_FILE_NAME,
};
use std::fs;

fn definition(high_dynamic_range: bool) -> GradientTextureDefinition {
    let mut definition = GradientTextureDefinition::named("ramp");
    definition.params = FormatParameters {
        resolution: Extent2D::new(8, 4),
        high_dynamic_range,
        store_as_srgb: true,
        generate_mipmaps: false,
        use_two_gradients: false,
    };
    definition
}

#[test]
fn test_ldr_bake_reloads_identical_pixels() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("out").join("ramp_baked.png");
    let mut texture = definition(false).into_texture();

    let written = bake_to_file(&mut texture, &path, None, true)?;
    assert_eq!(written as u64, fs::metadata(&path)?.len());

    let live = texture.texture().expect("baked texture has a raster");
    assert!(!live.is_dirty());
    let loaded = load_raster_file(&path)?;
    assert!(!loaded.is_hdr());
    assert_eq!(loaded.extent(), live.extent());
    assert_eq!(loaded.level_bytes(0), live.level_bytes(0));
    Ok(())
}

#[test]
fn test_hdr_bake_exports_uncorrected_colors() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("ramp_baked.exr");
    let mut texture = definition(true).into_texture();

    bake_to_file(&mut texture, &path, None, true)?;
    let loaded = load_raster_file(&path)?;
    assert!(loaded.is_hdr());
    assert_eq!(loaded.pixel(4, 0), Some(Rgba::rgb(0.5, 0.5, 0.5)));

    // The live raster went back to the linearized colors.
    assert!(texture.store_as_srgb());
    let live = texture.texture().and_then(|r| r.pixel(4, 0)).expect("pixel");
    assert_eq!(live, Rgba::rgb(0.5, 0.5, 0.5).to_linear());
    Ok(())
}

#[test]
fn test_explicit_format_overrides_extension() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("ramp.bin");
    let mut texture = definition(false).into_texture();

    assert!(matches!(
        bake_to_file(&mut texture, &path, None, true),
        Err(AssetError::UnsupportedExtension(_))
    ));
    bake_to_file(&mut texture, &path, Some(ContainerFormat::Tga), true)?;
    assert!(path.exists());
    Ok(())
}

#[test]
fn test_definition_file_round_trip() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("ramp.ron");
    let mut original = definition(true);
    original.top = GradientField::two_color(Rgba::rgb(0.1, 0.2, 0.3), Rgba::rgb(2.0, 2.0, 2.0));

    save_definition(&path, &original)?;
    assert_eq!(load_definition(&path)?, original);
    Ok(())
}

#[test]
fn test_settings_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join(SETTINGS_FILE_NAME);
    fs::write(&path, "color_space = \"gamma\"\nicon_size = 32\n")?;

    let settings = ProjectSettings::load(&path)?;
    assert_eq!(settings.color_space, ColorSpace::Gamma);
    assert_eq!(settings.icon_size, 32);
    Ok(())
}
