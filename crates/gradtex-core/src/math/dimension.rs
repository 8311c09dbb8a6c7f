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

//! Pixel extents and the mip chain arithmetic derived from them.

use serde::{Deserialize, Serialize};

/// A two-dimensional extent, representing width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Extent2D {
    /// The width component of the extent.
    pub width: u32,
    /// The height component of the extent.
    pub height: u32,
}

impl Extent2D {
    /// Creates a new extent.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns `true` if either edge is zero.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of pixels covered by this extent, or `None` on overflow.
    #[inline]
    pub fn area(&self) -> Option<usize> {
        (self.width as usize).checked_mul(self.height as usize)
    }

    /// Number of levels in a full mip chain down to 1×1.
    ///
    /// ```
    /// use gradtex_core::math::Extent2D;
    /// assert_eq!(Extent2D::new(256, 256).full_mip_chain_len(), 9);
    /// assert_eq!(Extent2D::new(256, 1).full_mip_chain_len(), 9);
    /// assert_eq!(Extent2D::new(1, 1).full_mip_chain_len(), 1);
    /// ```
    #[inline]
    pub fn full_mip_chain_len(&self) -> u32 {
        let largest = self.width.max(self.height).max(1);
        u32::BITS - largest.leading_zeros()
    }

    /// Extent of the given mip level; edges never shrink below one pixel.
    #[inline]
    pub fn mip_level(&self, level: u32) -> Self {
        Self {
            width: (self.width >> level).max(1),
            height: (self.height >> level).max(1),
        }
    }
}

impl From<(u32, u32)> for Extent2D {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mip_level_extents() {
        let extent = Extent2D::new(300, 20);
        assert_eq!(extent.full_mip_chain_len(), 9);
        assert_eq!(extent.mip_level(0), Extent2D::new(300, 20));
        assert_eq!(extent.mip_level(1), Extent2D::new(150, 10));
        assert_eq!(extent.mip_level(5), Extent2D::new(9, 1));
        assert_eq!(extent.mip_level(8), Extent2D::new(1, 1));
    }

    #[test]
    fn test_empty_and_area() {
        assert!(Extent2D::new(0, 4).is_empty());
        assert!(!Extent2D::new(1, 1).is_empty());
        assert_eq!(Extent2D::new(4, 3).area(), Some(12));
    }
}
