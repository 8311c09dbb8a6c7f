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

//! # Gradtex Core
//!
//! Gradient rasterization and texture-state reconciliation.
//!
//! A [`GradientTexture`] holds two horizontal [`GradientField`]s, a vertical
//! [`BlendCurve`] and a set of [`FormatParameters`]. From those it keeps a
//! [`RasterBuffer`] in sync: [`RasterBuffer::reconcile`] decides whether the
//! buffer has to be (re)allocated, [`RasterBuffer::fill`] recomputes every
//! pixel, and [`GradientTexture::export_pixels`] hands the result to a
//! [`PixelEncoder`] supplied by the caller.
//!
//! This crate performs no I/O. Encoding, persistence and asset files live in
//! `gradtex-io`.

#![warn(missing_docs)]

pub mod error;
pub mod export;
pub mod gradient;
pub mod math;
pub mod texture;

pub use error::{DegenerateGradient, ExportError, TextureError};
pub use export::{ContainerFormat, PixelEncoder};
pub use gradient::{AlphaKey, BlendCurve, ColorKey, GradientField, GradientMode, Keyframe};
pub use math::{Extent2D, Rgba};
pub use texture::{
    FillReport, FillSources, FormatParameters, GradientSlot, GradientTexture, RasterBuffer,
    ReconcileResult, TextureFormat, UpdateReport,
};
