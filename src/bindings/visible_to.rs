// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Resource kinds and usage declarations.
//!
//! Every descriptor carries a [`ResourceType`], which selects the code path that creates
//! its backing object, and a [`ResourceSubType`], which refines how that object is bound
//! and used within the path.
//!
//! The narrower usage enums ([`BufferUsage`], [`TextureUsage`], [`RenderbufferUsage`])
//! are what descriptors actually store. Each converts into the matching sub-kind.
//!
//! # Examples
//!
//! ```
//! use resources_and_state::bindings::visible_to::{BufferUsage, ResourceSubType};
//! use resources_and_state::sys;
//!
//! let usage = BufferUsage::Element;
//! assert_eq!(usage.target(), sys::ELEMENT_ARRAY_BUFFER);
//! assert_eq!(ResourceSubType::from(usage), ResourceSubType::ElementBuffer);
//! ```

use crate::sys;
use serde::{Deserialize, Serialize};

/// Which family a resource belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u32)]
pub enum ResourceType {
    #[default]
    Unknown = 0,
    Texture = 1,
    DataBuffer = 2,
    FrameBuffer = 3,
    RenderBuffer = 4,
    ShaderProgram = 5,
    /// Fixed-function state groups. These never own a backing object.
    StateObject = 6,
}

/// Refines a [`ResourceType`] with its bind target or usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u32)]
pub enum ResourceSubType {
    #[default]
    Unknown = 0,
    VertexBuffer = 1,
    #[serde(alias = "INDEX_BUFFER")]
    ElementBuffer = 2,
    UniformBuffer = 3,
    GenericBuffer = 4,
    #[serde(rename = "TEXTURE_2D")]
    Texture2d = 5,
    TextureCube = 6,
    TextureDepth = 7,
    RenderTarget = 8,
    PixelBuffer = 9,
    DepthBuffer = 10,
    StencilBuffer = 11,
    DepthStencilBuffer = 12,
    GraphicsShader = 13,
    ComputeShader = 14,
    BlendState = 15,
    ClearState = 16,
    DepthStencilState = 17,
    RasterState = 18,
}

impl ResourceSubType {
    /// The family this sub-kind belongs to.
    pub const fn resource_type(self) -> ResourceType {
        match self {
            ResourceSubType::Unknown => ResourceType::Unknown,
            ResourceSubType::VertexBuffer
            | ResourceSubType::ElementBuffer
            | ResourceSubType::UniformBuffer
            | ResourceSubType::GenericBuffer => ResourceType::DataBuffer,
            ResourceSubType::Texture2d
            | ResourceSubType::TextureCube
            | ResourceSubType::TextureDepth => ResourceType::Texture,
            ResourceSubType::RenderTarget => ResourceType::FrameBuffer,
            ResourceSubType::PixelBuffer
            | ResourceSubType::DepthBuffer
            | ResourceSubType::StencilBuffer
            | ResourceSubType::DepthStencilBuffer => ResourceType::RenderBuffer,
            ResourceSubType::GraphicsShader | ResourceSubType::ComputeShader => {
                ResourceType::ShaderProgram
            }
            ResourceSubType::BlendState
            | ResourceSubType::ClearState
            | ResourceSubType::DepthStencilState
            | ResourceSubType::RasterState => ResourceType::StateObject,
        }
    }
}

/// How a data buffer is bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BufferUsage {
    #[serde(rename = "VERTEX_BUFFER")]
    Vertex,
    /// Index data. Binds to the element array target.
    #[serde(rename = "ELEMENT_BUFFER", alias = "INDEX_BUFFER")]
    Element,
    #[serde(rename = "UNIFORM_BUFFER")]
    Uniform,
    #[default]
    #[serde(rename = "GENERIC_BUFFER")]
    Generic,
}

impl BufferUsage {
    /// Bind target for buffers of this usage.
    pub const fn target(self) -> u32 {
        match self {
            BufferUsage::Element => sys::ELEMENT_ARRAY_BUFFER,
            _ => sys::ARRAY_BUFFER,
        }
    }

    /// Query that reports the buffer currently bound to [`Self::target`].
    pub const fn binding_query(self) -> u32 {
        match self {
            BufferUsage::Element => sys::ELEMENT_ARRAY_BUFFER_BINDING,
            _ => sys::ARRAY_BUFFER_BINDING,
        }
    }
}

impl From<BufferUsage> for ResourceSubType {
    fn from(usage: BufferUsage) -> Self {
        match usage {
            BufferUsage::Vertex => ResourceSubType::VertexBuffer,
            BufferUsage::Element => ResourceSubType::ElementBuffer,
            BufferUsage::Uniform => ResourceSubType::UniformBuffer,
            BufferUsage::Generic => ResourceSubType::GenericBuffer,
        }
    }
}

/// What a texture holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TextureUsage {
    #[default]
    #[serde(rename = "TEXTURE_2D")]
    Texture2d,
    #[serde(rename = "TEXTURE_CUBE")]
    TextureCube,
    #[serde(rename = "TEXTURE_DEPTH")]
    TextureDepth,
}

impl From<TextureUsage> for ResourceSubType {
    fn from(usage: TextureUsage) -> Self {
        match usage {
            TextureUsage::Texture2d => ResourceSubType::Texture2d,
            TextureUsage::TextureCube => ResourceSubType::TextureCube,
            TextureUsage::TextureDepth => ResourceSubType::TextureDepth,
        }
    }
}

/// Which framebuffer role a renderbuffer fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RenderbufferUsage {
    #[serde(rename = "PIXEL_BUFFER")]
    Pixel,
    #[default]
    #[serde(rename = "DEPTH_BUFFER")]
    Depth,
    #[serde(rename = "STENCIL_BUFFER")]
    Stencil,
    #[serde(rename = "DEPTH_STENCIL_BUFFER")]
    DepthStencil,
}

impl From<RenderbufferUsage> for ResourceSubType {
    fn from(usage: RenderbufferUsage) -> Self {
        match usage {
            RenderbufferUsage::Pixel => ResourceSubType::PixelBuffer,
            RenderbufferUsage::Depth => ResourceSubType::DepthBuffer,
            RenderbufferUsage::Stencil => ResourceSubType::StencilBuffer,
            RenderbufferUsage::DepthStencil => ResourceSubType::DepthStencilBuffer,
        }
    }
}

/// How often the contents of a buffer are expected to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u32)]
pub enum UpdateType {
    /// Written once, drawn many times.
    StaticDraw = sys::STATIC_DRAW,
    /// Written once, drawn a few times.
    #[default]
    StreamDraw = sys::STREAM_DRAW,
    /// Written and drawn repeatedly.
    DynamicDraw = sys::DYNAMIC_DRAW,
}

impl UpdateType {
    pub const fn gl(self) -> u32 {
        self as u32
    }

    pub fn from_gl(value: u32) -> Option<Self> {
        [UpdateType::StaticDraw, UpdateType::StreamDraw, UpdateType::DynamicDraw]
            .into_iter()
            .find(|u| u.gl() == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_types_belong_to_their_family() {
        assert_eq!(ResourceSubType::ElementBuffer.resource_type(), ResourceType::DataBuffer);
        assert_eq!(ResourceSubType::RasterState.resource_type(), ResourceType::StateObject);
        assert_eq!(
            ResourceSubType::from(RenderbufferUsage::DepthStencil).resource_type(),
            ResourceType::RenderBuffer
        );
        assert_eq!(ResourceSubType::Texture2d as u32, 5);
    }

    #[test]
    fn update_type_values() {
        assert_eq!(UpdateType::default().gl(), sys::STREAM_DRAW);
        assert_eq!(UpdateType::from_gl(0x88E4), Some(UpdateType::StaticDraw));
        assert_eq!(UpdateType::from_gl(0), None);
    }
}
