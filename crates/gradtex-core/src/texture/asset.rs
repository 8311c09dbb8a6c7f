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

//! The gradient texture aggregate: settings, gradients and the raster they produce.

use super::format::FormatParameters;
use super::raster::{FillReport, FillSources, RasterBuffer, ReconcileResult};
use crate::error::{ExportError, TextureError};
use crate::export::{ContainerFormat, PixelEncoder};
use crate::gradient::{BlendCurve, GradientField};

/// Outcome of [`GradientTexture::update`].
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateReport {
    /// What the reconcile step did.
    pub reconciled: ReconcileResult,
    /// What the fill step reported.
    pub fill: FillReport,
}

/// A texture generated from two horizontal gradients blended vertically.
///
/// The texture exclusively owns its [`RasterBuffer`]; every mutation goes
/// through `&mut self`, so reconcile, fill and export are serialized by the
/// borrow checker. The raster is only reachable through
/// [`texture`](Self::texture).
///
/// The color space of the host project is never read from global state: it
/// is the `project_is_linear` argument of every operation that fills pixels.
#[derive(Debug, Clone)]
pub struct GradientTexture {
    name: String,
    params: FormatParameters,
    top: GradientField,
    bottom: GradientField,
    curve: BlendCurve,
    raster: Option<RasterBuffer>,
}

impl GradientTexture {
    /// Creates a texture with default gradients and no raster yet.
    pub fn new(name: impl Into<String>, params: FormatParameters) -> Self {
        Self {
            name: name.into(),
            params,
            top: GradientField::default(),
            bottom: GradientField::default(),
            curve: BlendCurve::default(),
            raster: None,
        }
    }

    /// Replaces both gradients and the blend curve.
    pub fn with_gradients(
        mut self,
        top: GradientField,
        bottom: GradientField,
        curve: BlendCurve,
    ) -> Self {
        self.top = top;
        self.bottom = bottom;
        self.curve = curve;
        self
    }

    /// Asset name, used to derive file names on export.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the asset.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Current format parameters.
    pub fn params(&self) -> &FormatParameters {
        &self.params
    }

    /// Replaces the format parameters. Call [`update`](Self::update) afterwards.
    pub fn set_params(&mut self, params: FormatParameters) {
        self.params = params;
    }

    /// The top gradient.
    pub fn top(&self) -> &GradientField {
        &self.top
    }

    /// Replaces the top gradient. Call [`fill`](Self::fill) afterwards.
    pub fn set_top(&mut self, gradient: GradientField) {
        self.top = gradient;
    }

    /// The bottom gradient.
    pub fn bottom(&self) -> &GradientField {
        &self.bottom
    }

    /// Replaces the bottom gradient. Call [`fill`](Self::fill) afterwards.
    pub fn set_bottom(&mut self, gradient: GradientField) {
        self.bottom = gradient;
    }

    /// The vertical blend curve.
    pub fn curve(&self) -> &BlendCurve {
        &self.curve
    }

    /// Replaces the vertical blend curve. Call [`fill`](Self::fill) afterwards.
    pub fn set_curve(&mut self, curve: BlendCurve) {
        self.curve = curve;
    }

    /// The raster, if one was reconciled or installed.
    pub fn texture(&self) -> Option<&RasterBuffer> {
        self.raster.as_ref()
    }

    /// Mutable access for the persistence layer (clearing the dirty flag).
    pub fn texture_mut(&mut self) -> Option<&mut RasterBuffer> {
        self.raster.as_mut()
    }

    /// Installs a raster produced elsewhere (e.g. decoded from a previous
    /// bake) and returns the one it replaces. The next reconcile decides
    /// whether it can be kept.
    pub fn install_texture(&mut self, raster: RasterBuffer) -> Option<RasterBuffer> {
        self.raster.replace(raster)
    }

    /// Whether gradient colors are stored as sRGB.
    pub fn store_as_srgb(&self) -> bool {
        self.params.store_as_srgb
    }

    /// Changes the sRGB flag and, if a raster exists, brings it up to date.
    pub fn set_store_as_srgb(
        &mut self,
        value: bool,
        project_is_linear: bool,
    ) -> Result<(), TextureError> {
        self.params.store_as_srgb = value;
        if self.raster.is_some() {
            self.update(project_is_linear)?;
        }
        Ok(())
    }

    /// Reconciles the raster with the current parameters.
    pub fn reconcile(&mut self) -> Result<ReconcileResult, TextureError> {
        RasterBuffer::reconcile(&mut self.raster, &self.params)
    }

    /// Recomputes every pixel of the existing raster.
    ///
    /// Reconcile first: the fill trusts the raster's current format.
    pub fn fill(&mut self, project_is_linear: bool) -> Result<FillReport, TextureError> {
        let raster = self.raster.as_mut().ok_or(TextureError::NotAllocated)?;
        let sources = FillSources {
            top: &self.top,
            bottom: Some(&self.bottom),
            curve: &self.curve,
        };
        Ok(raster.fill(&sources, &self.params, project_is_linear))
    }

    /// Reconcile followed by fill.
    pub fn update(&mut self, project_is_linear: bool) -> Result<UpdateReport, TextureError> {
        let reconciled = self.reconcile()?;
        let fill = self.fill(project_is_linear)?;
        Ok(UpdateReport { reconciled, fill })
    }

    /// Encodes the raster with the sRGB flag an export expects.
    ///
    /// HDR rasters are exported with `store_as_srgb = false` and LDR rasters
    /// with `store_as_srgb = true`. The flag is set, the raster refilled and
    /// encoded, then the original flag is restored and the raster refilled
    /// again, whether or not encoding succeeded.
    pub fn export_pixels<E: PixelEncoder>(
        &mut self,
        format: ContainerFormat,
        encoder: &E,
        project_is_linear: bool,
    ) -> Result<Vec<u8>, ExportError<E::Error>> {
        let is_hdr = self
            .raster
            .as_ref()
            .map(RasterBuffer::is_hdr)
            .ok_or(TextureError::NotAllocated)?;

        let was_srgb = self.params.store_as_srgb;
        self.params.store_as_srgb = !is_hdr;

        let encoded = match self.fill(project_is_linear) {
            Ok(_) => match self.raster.as_ref() {
                Some(raster) => encoder.encode(raster, format).map_err(ExportError::Encode),
                None => Err(TextureError::NotAllocated.into()),
            },
            Err(err) => Err(err.into()),
        };

        self.params.store_as_srgb = was_srgb;
        self.fill(project_is_linear)?;

        if encoded.is_ok() {
            log::debug!("Exported '{}' as {:?}", self.name, format);
        }
        encoded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Extent2D;

    #[test]
    fn test_fill_requires_raster() {
        let mut texture = GradientTexture::new("empty", FormatParameters::default());
        assert_eq!(texture.fill(true).unwrap_err(), TextureError::NotAllocated);
        assert!(texture.texture().is_none());
    }

    #[test]
    fn test_update_allocates_then_keeps() {
        let params = FormatParameters {
            resolution: Extent2D::new(16, 8),
            ..Default::default()
        };
        let mut texture = GradientTexture::new("sky", params);
        let first = texture.update(true).unwrap();
        assert_eq!(first.reconciled, ReconcileResult::Allocated);
        assert_eq!(first.fill.pixels_written, 128);
        let second = texture.update(true).unwrap();
        assert_eq!(second.reconciled, ReconcileResult::Unchanged);
    }

    #[test]
    fn test_set_srgb_without_raster_only_stores_flag() {
        let mut texture = GradientTexture::new("flag", FormatParameters::default());
        texture.set_store_as_srgb(false, true).unwrap();
        assert!(!texture.store_as_srgb());
        assert!(texture.texture().is_none());
    }
}
