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


//! # Gradtex IO
//!
//! Everything a [`GradientTexture`](gradtex_core::GradientTexture) needs from
//! the outside world: the [`ImageCodec`] that serializes its pixels, the RON
//! asset [`definition`], baking to disk ([`persist`]), decoding a previous
//! bake ([`loader`]), icon [`preview`]s and the project [`settings`] file.

pub mod codec;
pub mod definition;
pub mod error;
pub mod loader;
pub mod persist;
pub mod preview;
pub mod settings;

pub use codec::{CodecError, ImageCodec};
pub use definition::{load_definition, save_definition, GradientTextureDefinition};
pub use error::AssetError;
pub use loader::{load_raster, load_raster_file};
pub use persist::{bake_to_file, baked_file_name, format_for_path};
pub use preview::{render_icon, write_icon};
pub use settings::{ColorSpace, ProjectSettings, SETTINGS_FILE_NAME};
