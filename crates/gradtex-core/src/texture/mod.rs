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

//! The raster side of a gradient texture.
//!
//! A [`RasterBuffer`] moves through three states, driven only by parameter
//! comparison:
//!
//! - absent (`None` in its owner),
//! - allocated but stale (pixels undefined until the next fill),
//! - allocated and fresh.
//!
//! [`GradientTexture`] bundles the buffer with the gradients and parameters
//! that produce it.

mod asset;
mod format;
mod raster;

pub use asset::{GradientTexture, UpdateReport};
pub use format::{validate_resolution, FormatParameters, TextureFormat, MAX_TEXTURE_DIMENSION};
pub use raster::{
    correct_color_space, texel_coordinate, FillReport, FillSources, GradientSlot, RasterBuffer,
    ReconcileResult,
};
