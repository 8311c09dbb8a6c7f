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


//! An editing session on one gradient texture asset file.

use crate::authoring::TextureAuthoring;
use anyhow::{bail, Context, Result};
use gradtex_core::{
    ContainerFormat, DegenerateGradient, FormatParameters, GradientSlot, GradientTexture,
    RasterBuffer, UpdateReport,
};
use gradtex_io::{
    bake_to_file, baked_file_name, load_definition, load_raster_file, save_definition, write_icon,
    GradientTextureDefinition, ProjectSettings,
};
use std::path::{Path, PathBuf};

/// Containers probed, in order, when looking for a previous bake.
const BAKED_FORMATS: [ContainerFormat; 4] = [
    ContainerFormat::Exr,
    ContainerFormat::Png,
    ContainerFormat::Tga,
    ContainerFormat::Jpeg {
        quality: ContainerFormat::DEFAULT_JPEG_QUALITY,
    },
];

/// Project context shared by every session: where outputs go and which
/// color space fills use.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    /// Directory bakes and icons are written to.
    pub output_dir: PathBuf,
    /// Default icon edge length.
    pub icon_size: u32,
    /// Whether the project renders in linear space.
    pub project_is_linear: bool,
}

impl Project {
    /// Resolves `settings` against the directory holding the settings file.
    pub fn from_settings(settings: &ProjectSettings, root: &Path) -> Self {
        Self {
            output_dir: root.join(&settings.output_dir),
            icon_size: settings.icon_size,
            project_is_linear: settings.color_space.is_linear(),
        }
    }
}

/// A gradient texture loaded from its `.ron` definition.
#[derive(Debug)]
pub struct EditorSession {
    definition_path: PathBuf,
    project: Project,
    texture: GradientTexture,
}

impl EditorSession {
    /// Opens an existing definition.
    pub fn open(definition_path: impl Into<PathBuf>, project: Project) -> Result<Self> {
        let definition_path = definition_path.into();
        let definition = load_definition(&definition_path).with_context(|| {
            format!("Failed to load gradient texture '{}'", definition_path.display())
        })?;
        Ok(Self {
            definition_path,
            project,
            texture: definition.into_texture(),
        })
    }

    /// Writes a new definition with default gradients and opens it.
    ///
    /// The asset name defaults to the file stem. Fails if the file exists
    /// and `overwrite` is not set.
    pub fn create(
        definition_path: impl Into<PathBuf>,
        name: Option<&str>,
        params: FormatParameters,
        overwrite: bool,
        project: Project,
    ) -> Result<Self> {
        let definition_path = definition_path.into();
        if definition_path.exists() && !overwrite {
            bail!("'{}' already exists", definition_path.display());
        }
        params
            .validate()
            .context("Invalid parameters for a new gradient texture")?;

        let name = match name {
            Some(name) => name.to_owned(),
            None => definition_path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .context("Cannot derive an asset name from the file name")?
                .to_owned(),
        };
        let mut definition = GradientTextureDefinition::named(name);
        definition.params = params;
        save_definition(&definition_path, &definition)?;
        log::info!("Created '{}'", definition_path.display());

        Ok(Self {
            definition_path,
            project,
            texture: definition.into_texture(),
        })
    }

    /// Writes the current authoring state back to the definition file.
    pub fn save(&self) -> Result<()> {
        let definition = GradientTextureDefinition::from_texture(&self.texture);
        save_definition(&self.definition_path, &definition)?;
        Ok(())
    }

    /// The edited texture.
    pub fn gradient_texture(&self) -> &GradientTexture {
        &self.texture
    }

    /// Mutable access to the edited texture.
    pub fn gradient_texture_mut(&mut self) -> &mut GradientTexture {
        &mut self.texture
    }

    /// Path of the `.ron` definition.
    pub fn definition_path(&self) -> &Path {
        &self.definition_path
    }

    /// Container used when none is requested: EXR for HDR, PNG otherwise.
    pub fn default_format(&self) -> ContainerFormat {
        if self.texture.params().high_dynamic_range {
            ContainerFormat::Exr
        } else {
            ContainerFormat::Png
        }
    }

    /// Where a bake in `format` goes by default.
    pub fn default_bake_path(&self, format: ContainerFormat) -> PathBuf {
        self.project
            .output_dir
            .join(baked_file_name(self.texture.name(), format))
    }

    /// Where the icon goes by default.
    pub fn default_icon_path(&self) -> PathBuf {
        self.project
            .output_dir
            .join(format!("{}_icon.png", self.texture.name()))
    }

    /// Bakes the texture and returns the file written.
    ///
    /// With an explicit `output` and no `format`, the container follows the
    /// extension of `output`.
    pub fn bake(
        &mut self,
        output: Option<PathBuf>,
        format: Option<ContainerFormat>,
    ) -> Result<PathBuf> {
        let (path, format) = match (output, format) {
            (Some(path), format) => (path, format),
            (None, format) => {
                let format = format.unwrap_or_else(|| self.default_format());
                (self.default_bake_path(format), Some(format))
            }
        };
        bake_to_file(&mut self.texture, &path, format, self.project.project_is_linear)
            .with_context(|| format!("Failed to bake '{}'", self.texture.name()))?;
        Ok(path)
    }

    /// Writes a square preview icon and returns the file written.
    pub fn icon(&mut self, output: Option<PathBuf>, size: Option<u32>) -> Result<PathBuf> {
        if self.texture.texture().is_none() {
            self.create_texture()?;
        }
        let path = output.unwrap_or_else(|| self.default_icon_path());
        let size = size.unwrap_or(self.project.icon_size);
        let raster = self
            .texture
            .texture()
            .context("Texture has no raster to preview")?;
        write_icon(raster, size, &path)?;
        Ok(path)
    }

    /// A human-readable report of the asset and its raster.
    pub fn summary(&self) -> String {
        let texture = &self.texture;
        let params = texture.params();
        let (top, bottom) = (texture.top(), texture.bottom());

        let mut lines = vec![
            format!("name:          {}", texture.name()),
            format!(
                "resolution:    {}x{}",
                params.resolution.width, params.resolution.height
            ),
            format!("format:        {:?}", params.texture_format()),
            format!("sRGB:          {}", params.store_as_srgb),
            format!("mipmaps:       {} level(s)", params.mip_level_count()),
            format!("two gradients: {}", params.use_two_gradients),
            format!(
                "top:           {} color / {} alpha keys",
                top.color_keys().len(),
                top.alpha_keys().len()
            ),
            format!(
                "bottom:        {} color / {} alpha keys",
                bottom.color_keys().len(),
                bottom.alpha_keys().len()
            ),
            format!("curve:         {} keyframe(s)", texture.curve().keys().len()),
        ];

        let mut diagnostics = top.degeneracies(GradientSlot::Top);
        if params.use_two_gradients {
            diagnostics.extend(bottom.degeneracies(GradientSlot::Bottom));
            if texture.curve().is_degenerate() {
                diagnostics.push(DegenerateGradient::EmptyCurve);
            }
        }
        lines.extend(
            diagnostics
                .iter()
                .map(|diagnostic| format!("warning:       {diagnostic}")),
        );

        lines.push(match texture.texture() {
            Some(raster) => {
                let state = if RasterBuffer::needs_reallocation(Some(raster), params) {
                    "out of date"
                } else {
                    "up to date"
                };
                format!(
                    "raster:        {}x{} {:?}, {}",
                    raster.width(),
                    raster.height(),
                    raster.format(),
                    state
                )
            }
            None => "raster:        none".to_string(),
        });

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

impl TextureAuthoring for EditorSession {
    fn create_texture(&mut self) -> Result<UpdateReport> {
        let report = self
            .texture
            .update(self.project.project_is_linear)
            .with_context(|| format!("Failed to generate '{}'", self.texture.name()))?;
        Ok(report)
    }

    fn texture(&self) -> Option<&RasterBuffer> {
        self.texture.texture()
    }

    fn load_existing_texture(&mut self) -> Result<bool> {
        let Some(path) = BAKED_FORMATS
            .iter()
            .map(|format| self.default_bake_path(*format))
            .find(|path| path.exists())
        else {
            log::debug!("No baked file for '{}'", self.texture.name());
            return Ok(false);
        };

        let raster = load_raster_file(&path)?;
        log::info!("Loaded existing texture from '{}'", path.display());
        self.texture.install_texture(raster);
        Ok(true)
    }
}
