// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Viewport rectangle and depth range.

use serde::{Deserialize, Serialize};

/// Target rectangle in window coordinates, plus the depth range it maps to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub near: f32,
    pub far: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport::new(1, 1)
    }
}

impl Viewport {
    /// A viewport at the origin covering `width` by `height`, mapping depth to `[0, 1]`.
    ///
    /// Zero dimensions become 1.
    pub fn new(width: u32, height: u32) -> Self {
        Viewport {
            x: 0,
            y: 0,
            width: i32::try_from(width.max(1)).unwrap_or(i32::MAX),
            height: i32::try_from(height.max(1)).unwrap_or(i32::MAX),
            near: 0.0,
            far: 1.0,
        }
    }

    /// What a fresh context reports before any viewport is applied.
    pub(crate) const fn initial() -> Self {
        Viewport {
            x: 0,
            y: 0,
            width: 1,
            height: 1,
            near: 0.0,
            far: 0.0,
        }
    }

    pub(crate) fn same_rect(&self, other: &Viewport) -> bool {
        self.x == other.x
            && self.y == other.y
            && self.width == other.width
            && self.height == other.height
    }

    pub(crate) fn same_depth_range(&self, other: &Viewport) -> bool {
        self.near == other.near && self.far == other.far
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_dimensions_clamp() {
        let v = Viewport::new(0, 720);
        assert_eq!((v.width, v.height, v.near, v.far), (1, 720, 0.0, 1.0));
        assert!(!v.same_rect(&Viewport::initial()));
        assert!(!Viewport::new(1, 1).same_depth_range(&Viewport::initial()));
    }
}
