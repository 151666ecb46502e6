// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Texture targets and sampler parameters.

use crate::sys;
use serde::{Deserialize, Serialize};

/// Where a texture's image data goes: the 2D target, or one face of a cube map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u32)]
pub enum TextureTarget {
    #[default]
    #[serde(rename = "TEXTURE_2D")]
    Texture2d = sys::TEXTURE_2D,
    TextureCubeMapPositiveX = sys::TEXTURE_CUBE_MAP_POSITIVE_X,
    TextureCubeMapNegativeX = sys::TEXTURE_CUBE_MAP_NEGATIVE_X,
    TextureCubeMapPositiveY = sys::TEXTURE_CUBE_MAP_POSITIVE_Y,
    TextureCubeMapNegativeY = sys::TEXTURE_CUBE_MAP_NEGATIVE_Y,
    TextureCubeMapPositiveZ = sys::TEXTURE_CUBE_MAP_POSITIVE_Z,
    TextureCubeMapNegativeZ = sys::TEXTURE_CUBE_MAP_NEGATIVE_Z,
}

impl TextureTarget {
    pub const ALL: [TextureTarget; 7] = [
        TextureTarget::Texture2d,
        TextureTarget::TextureCubeMapPositiveX,
        TextureTarget::TextureCubeMapNegativeX,
        TextureTarget::TextureCubeMapPositiveY,
        TextureTarget::TextureCubeMapNegativeY,
        TextureTarget::TextureCubeMapPositiveZ,
        TextureTarget::TextureCubeMapNegativeZ,
    ];

    /// The six cube faces in attachment order.
    pub const CUBE_FACES: [TextureTarget; 6] = [
        TextureTarget::TextureCubeMapPositiveX,
        TextureTarget::TextureCubeMapNegativeX,
        TextureTarget::TextureCubeMapPositiveY,
        TextureTarget::TextureCubeMapNegativeY,
        TextureTarget::TextureCubeMapPositiveZ,
        TextureTarget::TextureCubeMapNegativeZ,
    ];

    pub const fn gl(self) -> u32 {
        self as u32
    }

    pub fn from_gl(value: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.gl() == value)
    }

    pub const fn is_cube_face(self) -> bool {
        !matches!(self, TextureTarget::Texture2d)
    }

    /// Target the texture object binds to. Every cube face binds as the cube map.
    pub const fn bind_target(self) -> u32 {
        if self.is_cube_face() {
            sys::TEXTURE_CUBE_MAP
        } else {
            sys::TEXTURE_2D
        }
    }

    /// Query reporting the texture bound at [`Self::bind_target`].
    pub const fn binding_query(self) -> u32 {
        if self.is_cube_face() {
            sys::TEXTURE_BINDING_CUBE_MAP
        } else {
            sys::TEXTURE_BINDING_2D
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u32)]
pub enum WrapMode {
    Repeat = sys::REPEAT,
    #[default]
    ClampToEdge = sys::CLAMP_TO_EDGE,
    MirroredRepeat = sys::MIRRORED_REPEAT,
}

impl WrapMode {
    pub const fn gl(self) -> u32 {
        self as u32
    }

    pub fn from_gl(value: u32) -> Option<Self> {
        [WrapMode::Repeat, WrapMode::ClampToEdge, WrapMode::MirroredRepeat]
            .into_iter()
            .find(|w| w.gl() == value)
    }
}

/// Minification filter. The mipmap variants need a complete mip chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u32)]
pub enum MinFilter {
    #[default]
    Nearest = sys::NEAREST,
    Linear = sys::LINEAR,
    NearestMipmapNearest = sys::NEAREST_MIPMAP_NEAREST,
    LinearMipmapNearest = sys::LINEAR_MIPMAP_NEAREST,
    NearestMipmapLinear = sys::NEAREST_MIPMAP_LINEAR,
    LinearMipmapLinear = sys::LINEAR_MIPMAP_LINEAR,
}

impl MinFilter {
    pub const fn gl(self) -> u32 {
        self as u32
    }

    pub fn from_gl(value: u32) -> Option<Self> {
        [
            MinFilter::Nearest,
            MinFilter::Linear,
            MinFilter::NearestMipmapNearest,
            MinFilter::LinearMipmapNearest,
            MinFilter::NearestMipmapLinear,
            MinFilter::LinearMipmapLinear,
        ]
        .into_iter()
        .find(|m| m.gl() == value)
    }

    pub const fn uses_mipmaps(self) -> bool {
        !matches!(self, MinFilter::Nearest | MinFilter::Linear)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u32)]
pub enum MagFilter {
    #[default]
    Nearest = sys::NEAREST,
    Linear = sys::LINEAR,
}

impl MagFilter {
    pub const fn gl(self) -> u32 {
        self as u32
    }

    pub fn from_gl(value: u32) -> Option<Self> {
        [MagFilter::Nearest, MagFilter::Linear]
            .into_iter()
            .find(|m| m.gl() == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_faces_bind_as_cube_map() {
        for face in TextureTarget::CUBE_FACES {
            assert_eq!(face.bind_target(), sys::TEXTURE_CUBE_MAP);
            assert_eq!(face.binding_query(), sys::TEXTURE_BINDING_CUBE_MAP);
        }
        assert_eq!(TextureTarget::Texture2d.bind_target(), sys::TEXTURE_2D);
        assert_eq!(TextureTarget::from_gl(0x851A), Some(TextureTarget::TextureCubeMapNegativeZ));
    }

    #[test]
    fn filters() {
        assert!(MinFilter::LinearMipmapLinear.uses_mipmaps());
        assert!(!MinFilter::Linear.uses_mipmaps());
        assert_eq!(MagFilter::from_gl(sys::LINEAR), Some(MagFilter::Linear));
        assert_eq!(WrapMode::default().gl(), sys::CLAMP_TO_EDGE);
    }
}
