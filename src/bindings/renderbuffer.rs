// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Renderbuffers: render-only storage for framebuffer attachments.

use crate::bindings::resource::{warn_if_backed, Resource};
use crate::bindings::visible_to::{RenderbufferUsage, ResourceSubType, ResourceType};
use crate::diagnostics::Diagnostics;
use crate::error::Error;
use crate::imp::GraphicsContext;
use crate::sys;
use serde::{Deserialize, Serialize};

/// Internal storage format of a renderbuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u32)]
pub enum RenderbufferFormat {
    Rgba4 = sys::RGBA4,
    Rgb565 = sys::RGB565,
    Rgb5A1 = sys::RGB5_A1,
    #[default]
    DepthComponent16 = sys::DEPTH_COMPONENT16,
    StencilIndex8 = sys::STENCIL_INDEX8,
    DepthStencil = sys::DEPTH_STENCIL,
}

impl RenderbufferFormat {
    pub const fn gl(self) -> u32 {
        self as u32
    }

    pub fn from_gl(value: u32) -> Option<Self> {
        [
            RenderbufferFormat::Rgba4,
            RenderbufferFormat::Rgb565,
            RenderbufferFormat::Rgb5A1,
            RenderbufferFormat::DepthComponent16,
            RenderbufferFormat::StencilIndex8,
            RenderbufferFormat::DepthStencil,
        ]
        .into_iter()
        .find(|f| f.gl() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderbufferAttributes {
    pub width: u32,
    pub height: u32,
    pub format: RenderbufferFormat,
    pub usage: RenderbufferUsage,
}

impl Default for RenderbufferAttributes {
    fn default() -> Self {
        RenderbufferAttributes {
            width: 1,
            height: 1,
            format: RenderbufferFormat::DepthComponent16,
            usage: RenderbufferUsage::Depth,
        }
    }
}

pub struct Renderbuffer<C: GraphicsContext> {
    attributes: RenderbufferAttributes,
    handle: Option<C::Renderbuffer>,
}

impl<C: GraphicsContext> std::fmt::Debug for Renderbuffer<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderbuffer")
            .field("attributes", &self.attributes)
            .field("handle", &self.handle)
            .finish()
    }
}

impl<C: GraphicsContext> Default for Renderbuffer<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: GraphicsContext> Renderbuffer<C> {
    pub fn new() -> Self {
        Renderbuffer {
            attributes: RenderbufferAttributes::default(),
            handle: None,
        }
    }

    pub fn attributes(&self) -> &RenderbufferAttributes {
        &self.attributes
    }

    pub fn handle(&self) -> Option<C::Renderbuffer> {
        self.handle
    }

    pub fn usage(&self) -> RenderbufferUsage {
        self.attributes.usage
    }
}

impl<C: GraphicsContext> Resource<C> for Renderbuffer<C> {
    type Attributes = RenderbufferAttributes;

    fn resource_type(&self) -> ResourceType {
        ResourceType::RenderBuffer
    }

    fn sub_type(&self) -> ResourceSubType {
        self.attributes.usage.into()
    }

    fn is_backed(&self) -> bool {
        self.handle.is_some()
    }

    fn specify_attributes(&mut self, attributes: RenderbufferAttributes) -> bool {
        warn_if_backed(self.handle.is_some(), ResourceType::RenderBuffer);
        self.attributes = RenderbufferAttributes {
            width: attributes.width.max(1),
            height: attributes.height.max(1),
            ..attributes
        };
        true
    }

    fn create_backing_resources(
        &mut self,
        gl: &mut C,
        _diagnostics: Option<&mut dyn Diagnostics>,
    ) -> Result<(), Error> {
        if self.handle.is_some() {
            return Ok(());
        }
        let previous = gl.get_parameter_renderbuffer(sys::RENDERBUFFER_BINDING);
        let renderbuffer = gl
            .create_renderbuffer()
            .ok_or(Error::AllocationFailed(ResourceType::RenderBuffer))?;
        let RenderbufferAttributes { width, height, format, .. } = self.attributes;
        gl.bind_renderbuffer(sys::RENDERBUFFER, Some(renderbuffer));
        gl.renderbuffer_storage(
            sys::RENDERBUFFER,
            format.gl(),
            i32::try_from(width).unwrap_or(i32::MAX),
            i32::try_from(height).unwrap_or(i32::MAX),
        );
        gl.bind_renderbuffer(sys::RENDERBUFFER, previous);
        logwise::info_sync!(
            "created renderbuffer {width}x{height}",
            width = width,
            height = height
        );
        self.handle = Some(renderbuffer);
        Ok(())
    }

    fn delete_backing_resources(&mut self, gl: &mut C) -> &mut Self {
        if let Some(renderbuffer) = self.handle.take() {
            if !gl.is_context_lost() {
                gl.delete_renderbuffer(renderbuffer);
            }
            logwise::info_sync!("deleted renderbuffer");
        }
        self
    }

    fn serialize(&self) -> RenderbufferAttributes {
        self.attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imp::{Call, RecordingContext};

    #[test]
    fn dimensions_clamp_and_storage_is_allocated() {
        let mut gl = RecordingContext::new();
        let mut renderbuffer = Renderbuffer::<RecordingContext>::new();
        renderbuffer.specify_attributes(RenderbufferAttributes {
            width: 0,
            height: 64,
            format: RenderbufferFormat::Rgba4,
            usage: RenderbufferUsage::Pixel,
        });
        assert_eq!(renderbuffer.attributes().width, 1);
        renderbuffer.create_backing_resources(&mut gl, None).unwrap();
        assert!(gl.calls().contains(&Call::RenderbufferStorage {
            target: sys::RENDERBUFFER,
            internal_format: sys::RGBA4,
            width: 1,
            height: 64,
        }));
        assert_eq!(gl.get_parameter_renderbuffer(sys::RENDERBUFFER_BINDING), None);
        assert_eq!(renderbuffer.sub_type(), ResourceSubType::PixelBuffer);
    }
}
