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


//! Error type shared by the asset operations of this crate.

use crate::codec::CodecError;
use gradtex_core::{ExportError, TextureError};
use std::path::PathBuf;
use thiserror::Error;

/// An error raised while reading, writing or converting a gradient texture asset.
#[derive(Debug, Error)]
pub enum AssetError {
    /// A file could not be read or written.
    #[error("Failed to access '{}'", path.display())]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file extension does not name a supported container.
    #[error("Unsupported image extension for '{}' (expected png, tga, exr or jpg)", .0.display())]
    UnsupportedExtension(PathBuf),
    /// An asset definition could not be parsed.
    #[error("Invalid gradient texture definition")]
    DefinitionParse(#[from] ron::error::SpannedError),
    /// An asset definition could not be serialized.
    #[error("Failed to serialize gradient texture definition")]
    DefinitionWrite(#[from] ron::Error),
    /// `Gradtex.toml` could not be parsed.
    #[error("Invalid project settings")]
    Settings(#[from] toml::de::Error),
    /// An image file could not be decoded.
    #[error("Failed to decode image")]
    Decode(#[from] image::ImageError),
    /// A pixel or icon buffer could not be encoded.
    #[error(transparent)]
    Codec(#[from] CodecError),
    /// The texture could not be reconciled or filled.
    #[error(transparent)]
    Texture(#[from] TextureError),
    /// The texture could not be exported.
    #[error(transparent)]
    Export(#[from] ExportError<CodecError>),
}

impl AssetError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AssetError::Io {
            path: path.into(),
            source,
        }
    }
}
