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


//! Project-level settings read from `Gradtex.toml`.

use crate::error::AssetError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the project root.
pub const SETTINGS_FILE_NAME: &str = "Gradtex.toml";

/// Color space the host project renders in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSpace {
    /// Lighting is computed in linear space.
    #[default]
    Linear,
    /// Lighting is computed directly on gamma-encoded values.
    Gamma,
}

impl ColorSpace {
    /// The `project_is_linear` flag passed to fills and exports.
    pub fn is_linear(self) -> bool {
        self == ColorSpace::Linear
    }
}

/// Represents the structure of the `Gradtex.toml` settings file.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ProjectSettings {
    /// Project color space.
    pub color_space: ColorSpace,
    /// Directory baked textures and icons are written to, relative to the project root.
    pub output_dir: PathBuf,
    /// Edge length of generated icons, in pixels.
    pub icon_size: u32,
}

impl Default for ProjectSettings {
    /// Provides a default configuration if `Gradtex.toml` is not found.
    ///
    /// Linear color space, output to `baked/`, 64 pixel icons.
    fn default() -> Self {
        Self {
            color_space: ColorSpace::Linear,
            output_dir: PathBuf::from("baked"),
            icon_size: 64,
        }
    }
}

impl ProjectSettings {
    /// Parses settings from TOML text.
    pub fn from_toml(source: &str) -> Result<Self, AssetError> {
        Ok(toml::from_str(source)?)
    }

    /// Loads settings from `path`. If the file does not exist, it returns
    /// the default configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No '{}' found. Using default settings.", path.display());
            return Ok(Self::default());
        }
        let source = fs::read_to_string(path).map_err(|e| AssetError::io(path, e))?;
        let settings = Self::from_toml(&source)?;
        log::info!("Loaded settings from '{}'", path.display());
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings() {
        let settings = ProjectSettings::from_toml("color_space = \"gamma\"\n").unwrap();
        assert_eq!(settings.color_space, ColorSpace::Gamma);
        assert!(!settings.color_space.is_linear());
        assert_eq!(settings.output_dir, PathBuf::from("baked"));
        assert_eq!(settings.icon_size, 64);
    }

    #[test]
    fn test_unknown_color_space_is_rejected() {
        assert!(ProjectSettings::from_toml("color_space = \"aces\"").is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = ProjectSettings::load(dir.path().join(SETTINGS_FILE_NAME)).unwrap();
        assert_eq!(settings, ProjectSettings::default());
    }
}
