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

//! Defines the error and diagnostic types of the gradient texture core.

use crate::texture::GradientSlot;
use std::fmt;

/// A gradient or curve without control points.
///
/// This is a diagnostic, not a failure: evaluation substitutes a fallback
/// value and the fill completes. It is reported through
/// [`FillReport`](crate::texture::FillReport).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegenerateGradient {
    /// The gradient has no color keys; RGB falls back to black.
    NoColorKeys {
        /// Which gradient of the texture is affected.
        slot: GradientSlot,
    },
    /// The gradient has no alpha keys; alpha falls back to `1.0`.
    NoAlphaKeys {
        /// Which gradient of the texture is affected.
        slot: GradientSlot,
    },
    /// The blend curve has no keyframes; it evaluates to `0.0`.
    EmptyCurve,
}

impl fmt::Display for DegenerateGradient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegenerateGradient::NoColorKeys { slot } => {
                write!(f, "{slot} gradient has no color keys, using black")
            }
            DegenerateGradient::NoAlphaKeys { slot } => {
                write!(f, "{slot} gradient has no alpha keys, using opaque alpha")
            }
            DegenerateGradient::EmptyCurve => {
                write!(
                    f,
                    "Blend curve has no keyframes, blending fully towards the bottom gradient"
                )
            }
        }
    }
}

impl std::error::Error for DegenerateGradient {}

/// An error raised while allocating or updating a raster buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextureError {
    /// The requested resolution has a zero edge or exceeds
    /// [`MAX_TEXTURE_DIMENSION`](crate::texture::MAX_TEXTURE_DIMENSION).
    InvalidResolution {
        /// The requested width.
        width: u32,
        /// The requested height.
        height: u32,
    },
    /// The pixel storage could not be allocated. Any previous buffer is kept.
    AllocationFailure {
        /// Number of bytes that were requested, saturated on overflow.
        bytes: usize,
    },
    /// An operation that needs pixels was called before the first reconcile.
    NotAllocated,
    /// Pixels handed to a buffer constructor do not cover its extent.
    PixelCountMismatch {
        /// `width * height` of the target extent.
        expected: usize,
        /// Number of pixels supplied.
        actual: usize,
    },
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::InvalidResolution { width, height } => {
                write!(f, "Invalid texture resolution {width}x{height}")
            }
            TextureError::AllocationFailure { bytes } => {
                write!(f, "Failed to allocate {bytes} bytes of pixel storage")
            }
            TextureError::NotAllocated => {
                write!(f, "The texture has no raster buffer, reconcile it first")
            }
            TextureError::PixelCountMismatch { expected, actual } => {
                write!(f, "Expected {expected} pixels, got {actual}")
            }
        }
    }
}

impl std::error::Error for TextureError {}

/// An error raised by
/// [`GradientTexture::export_pixels`](crate::texture::GradientTexture::export_pixels).
///
/// `E` is the error type of the [`PixelEncoder`](crate::export::PixelEncoder).
#[derive(Debug)]
pub enum ExportError<E> {
    /// The texture could not be prepared for export.
    Texture(TextureError),
    /// The encoder rejected the pixels.
    Encode(E),
}

impl<E: fmt::Display> fmt::Display for ExportError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Texture(err) => write!(f, "Texture export failed: {err}"),
            ExportError::Encode(err) => write!(f, "Pixel encoding failed: {err}"),
        }
    }
}

impl<E> std::error::Error for ExportError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Texture(err) => Some(err),
            ExportError::Encode(err) => Some(err),
        }
    }
}

impl<E> From<TextureError> for ExportError<E> {
    fn from(err: TextureError) -> Self {
        ExportError::Texture(err)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn texture_error_display() {
        let err = TextureError::InvalidResolution {
            width: 0,
            height: 16,
        };
        assert_eq!(err.to_string(), "Invalid texture resolution 0x16");
        assert_eq!(
            TextureError::AllocationFailure { bytes: 64 }.to_string(),
            "Failed to allocate 64 bytes of pixel storage"
        );
    }

    #[test]
    fn degenerate_gradient_display_names_slot() {
        let diag = DegenerateGradient::NoColorKeys {
            slot: GradientSlot::Bottom,
        };
        assert_eq!(diag.to_string(), "bottom gradient has no color keys, using black");
    }

    #[test]
    fn export_error_source_chain() {
        let err: ExportError<TextureError> = TextureError::NotAllocated.into();
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("Texture export failed"));
    }
}
