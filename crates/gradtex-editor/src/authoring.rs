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


//! The capability an editor front end needs from a gradient texture asset.

use anyhow::Result;
use gradtex_core::{RasterBuffer, UpdateReport};

/// Editor-only operations on a gradient texture asset.
///
/// Runtime code works with [`GradientTexture`](gradtex_core::GradientTexture)
/// directly; only authoring tools go through this trait.
pub trait TextureAuthoring {
    /// Reconciles the raster with the current parameters and fills it.
    fn create_texture(&mut self) -> Result<UpdateReport>;

    /// The current raster, if one was created or loaded.
    fn texture(&self) -> Option<&RasterBuffer>;

    /// Installs the pixels of a previous bake in place of the raster.
    ///
    /// Returns `false` when no baked file exists.
    fn load_existing_texture(&mut self) -> Result<bool>;
}
