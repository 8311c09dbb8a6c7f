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


//! The on-disk description of a gradient texture asset.
//!
//! Definitions are stored as RON. Only the authoring inputs are saved; the
//! raster is always regenerated (or loaded from a previous bake).

use crate::error::AssetError;
use gradtex_core::{BlendCurve, FormatParameters, GradientField, GradientTexture};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Serializable authoring state of a [`GradientTexture`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientTextureDefinition {
    /// Asset name. Baked files are named `{name}_baked.{ext}`.
    pub name: String,
    /// Format parameters.
    pub params: FormatParameters,
    /// Gradient at the top edge.
    pub top: GradientField,
    /// Gradient at the bottom edge, used when `params.use_two_gradients` is set.
    pub bottom: GradientField,
    /// Vertical blend curve from bottom (0) to top (1).
    pub curve: BlendCurve,
}

impl Default for GradientTextureDefinition {
    fn default() -> Self {
        Self {
            name: "GradientTexture".to_owned(),
            params: FormatParameters::default(),
            top: GradientField::default(),
            bottom: GradientField::default(),
            curve: BlendCurve::default(),
        }
    }
}

impl GradientTextureDefinition {
    /// A default definition with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Captures the authoring state of `texture`.
    pub fn from_texture(texture: &GradientTexture) -> Self {
        Self {
            name: texture.name().to_owned(),
            params: *texture.params(),
            top: texture.top().clone(),
            bottom: texture.bottom().clone(),
            curve: texture.curve().clone(),
        }
    }

    /// Builds a texture without a raster. Call `update` to generate pixels.
    pub fn into_texture(self) -> GradientTexture {
        GradientTexture::new(self.name, self.params).with_gradients(
            self.top,
            self.bottom,
            self.curve,
        )
    }

    /// Serializes to human-readable RON.
    pub fn to_string_pretty(&self) -> Result<String, AssetError> {
        let pretty_config = ron::ser::PrettyConfig::default().indentor("  ".to_string());
        Ok(ron::ser::to_string_pretty(self, pretty_config)?)
    }
}

impl FromStr for GradientTextureDefinition {
    type Err = AssetError;

    /// Parses a RON definition.
    fn from_str(source: &str) -> Result<Self, AssetError> {
        Ok(ron::de::from_str(source)?)
    }
}

/// Reads a definition from a `.ron` file.
pub fn load_definition(path: impl AsRef<Path>) -> Result<GradientTextureDefinition, AssetError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|e| AssetError::io(path, e))?;
    let definition: GradientTextureDefinition = source.parse()?;
    log::debug!("Loaded definition '{}' from '{}'", definition.name, path.display());
    Ok(definition)
}

/// Writes a definition to a `.ron` file, replacing any previous content.
pub fn save_definition(
    path: impl AsRef<Path>,
    definition: &GradientTextureDefinition,
) -> Result<(), AssetError> {
    let path = path.as_ref();
    let source = definition.to_string_pretty()?;
    fs::write(path, source).map_err(|e| AssetError::io(path, e))?;
    log::debug!("Saved definition '{}' to '{}'", definition.name, path.display());
    Ok(())
}
