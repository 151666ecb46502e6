// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! Framebuffers and their attachment table.

A framebuffer has sixteen color slots, one depth slot and one stencil slot. A combined
depth-stencil attachment fills both of the latter with the same object and is detached
with a single call. Cube-map textures attach all six faces at the same attachment point.

Attaching and detaching bind the framebuffer for the duration of the call and then put
back whatever framebuffer was bound before.

```
use resources_and_state::bindings::framebuffer::Framebuffer;
use resources_and_state::bindings::renderbuffer::{Renderbuffer, RenderbufferAttributes, RenderbufferFormat};
use resources_and_state::bindings::resource::Resource;
use resources_and_state::bindings::visible_to::RenderbufferUsage;
use resources_and_state::imp::RecordingContext;

let mut gl = RecordingContext::new();
let mut depth = Renderbuffer::<RecordingContext>::new();
depth.specify_attributes(RenderbufferAttributes {
    width: 64,
    height: 64,
    format: RenderbufferFormat::DepthStencil,
    usage: RenderbufferUsage::DepthStencil,
});
depth.create_backing_resources(&mut gl, None).unwrap();

let mut target = Framebuffer::<RecordingContext>::new();
target.create_backing_resources(&mut gl, None).unwrap();
target.attach_depth_stencil_renderbuffer(&mut gl, &depth).unwrap();
assert!(target.has_combined_depth_stencil());
```
*/

use crate::bindings::renderbuffer::Renderbuffer;
use crate::bindings::resource::{warn_if_backed, Resource};
use crate::bindings::sampler::TextureTarget;
use crate::bindings::texture::Texture;
use crate::bindings::visible_to::{ResourceSubType, ResourceType};
use crate::diagnostics::Diagnostics;
use crate::error::Error;
use crate::imp::GraphicsContext;
use crate::sys;
use crate::MAX_COLOR_ATTACHMENTS;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FramebufferAttributes {
    pub width: u32,
    pub height: u32,
}

impl Default for FramebufferAttributes {
    fn default() -> Self {
        FramebufferAttributes {
            width: 1,
            height: 1,
        }
    }
}

/// An object occupying an attachment slot.
pub enum Attachment<C: GraphicsContext> {
    Texture {
        handle: C::Texture,
        /// Image target used for a single-face attachment.
        target: TextureTarget,
        /// Cube maps are attached on all six faces.
        cube: bool,
    },
    Renderbuffer(C::Renderbuffer),
}

impl<C: GraphicsContext> Clone for Attachment<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: GraphicsContext> Copy for Attachment<C> {}

impl<C: GraphicsContext> PartialEq for Attachment<C> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Attachment::Texture { handle: a, .. }, Attachment::Texture { handle: b, .. }) => a == b,
            (Attachment::Renderbuffer(a), Attachment::Renderbuffer(b)) => a == b,
            _ => false,
        }
    }
}

impl<C: GraphicsContext> std::fmt::Debug for Attachment<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Attachment::Texture { handle, target, cube } => f
                .debug_struct("Texture")
                .field("handle", handle)
                .field("target", target)
                .field("cube", cube)
                .finish(),
            Attachment::Renderbuffer(handle) => f.debug_tuple("Renderbuffer").field(handle).finish(),
        }
    }
}

impl<C: GraphicsContext> Attachment<C> {
    fn texture(texture: &Texture<C>) -> Result<Self, Error> {
        let handle = texture
            .handle()
            .ok_or(Error::NotBacked(ResourceType::Texture))?;
        let target = texture.target();
        Ok(Attachment::Texture {
            handle,
            target,
            cube: target.is_cube_face(),
        })
    }

    fn renderbuffer(renderbuffer: &Renderbuffer<C>) -> Result<Self, Error> {
        renderbuffer
            .handle()
            .map(Attachment::Renderbuffer)
            .ok_or(Error::NotBacked(ResourceType::RenderBuffer))
    }

    /// Issues the attach call(s), or the matching detach call(s) when `attach` is false.
    fn issue(&self, gl: &mut C, point: u32, attach: bool) {
        match *self {
            Attachment::Texture { handle, cube: true, .. } => {
                let handle = attach.then_some(handle);
                for face in TextureTarget::CUBE_FACES {
                    gl.framebuffer_texture_2d(sys::FRAMEBUFFER, point, face.gl(), handle, 0);
                }
            }
            Attachment::Texture { handle, target, cube: false } => {
                gl.framebuffer_texture_2d(
                    sys::FRAMEBUFFER,
                    point,
                    target.gl(),
                    attach.then_some(handle),
                    0,
                );
            }
            Attachment::Renderbuffer(handle) => {
                gl.framebuffer_renderbuffer(
                    sys::FRAMEBUFFER,
                    point,
                    sys::RENDERBUFFER,
                    attach.then_some(handle),
                );
            }
        }
    }
}

/// What the draw context records about a bound framebuffer.
pub struct FramebufferBinding<C: GraphicsContext> {
    pub handle: C::Framebuffer,
    /// Color attachment points in attach order.
    pub draw_buffers: Vec<u32>,
}

impl<C: GraphicsContext> Clone for FramebufferBinding<C> {
    fn clone(&self) -> Self {
        FramebufferBinding {
            handle: self.handle,
            draw_buffers: self.draw_buffers.clone(),
        }
    }
}

impl<C: GraphicsContext> PartialEq for FramebufferBinding<C> {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl<C: GraphicsContext> std::fmt::Debug for FramebufferBinding<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FramebufferBinding")
            .field("handle", &self.handle)
            .field("draw_buffers", &self.draw_buffers)
            .finish()
    }
}

pub struct Framebuffer<C: GraphicsContext> {
    attributes: FramebufferAttributes,
    handle: Option<C::Framebuffer>,
    color: [Option<Attachment<C>>; MAX_COLOR_ATTACHMENTS],
    depth: Option<Attachment<C>>,
    stencil: Option<Attachment<C>>,
    combined_depth_stencil: bool,
    draw_buffers: Vec<u32>,
}

impl<C: GraphicsContext> std::fmt::Debug for Framebuffer<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Framebuffer")
            .field("attributes", &self.attributes)
            .field("handle", &self.handle)
            .field("color", &self.color)
            .field("depth", &self.depth)
            .field("stencil", &self.stencil)
            .field("draw_buffers", &self.draw_buffers)
            .finish()
    }
}

impl<C: GraphicsContext> Default for Framebuffer<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: GraphicsContext> Framebuffer<C> {
    pub fn new() -> Self {
        Framebuffer {
            attributes: FramebufferAttributes::default(),
            handle: None,
            color: [None; MAX_COLOR_ATTACHMENTS],
            depth: None,
            stencil: None,
            combined_depth_stencil: false,
            draw_buffers: Vec::new(),
        }
    }

    pub fn attributes(&self) -> &FramebufferAttributes {
        &self.attributes
    }

    pub fn handle(&self) -> Option<C::Framebuffer> {
        self.handle
    }

    pub fn color_attachment(&self, index: usize) -> Option<&Attachment<C>> {
        self.color.get(index).and_then(Option::as_ref)
    }

    pub fn depth_attachment(&self) -> Option<&Attachment<C>> {
        self.depth.as_ref()
    }

    pub fn stencil_attachment(&self) -> Option<&Attachment<C>> {
        self.stencil.as_ref()
    }

    /// True when one object fills both the depth and stencil slots.
    pub fn has_combined_depth_stencil(&self) -> bool {
        self.combined_depth_stencil
    }

    /// Color attachment points routed to fragment outputs, in attach order.
    pub fn draw_buffers(&self) -> &[u32] {
        &self.draw_buffers
    }

    /// Snapshot for draw context binding calls, or `None` if unbacked.
    pub fn binding(&self) -> Option<FramebufferBinding<C>> {
        if self.handle.is_none() {
            logwise::warn_sync!("binding requested for an unbacked framebuffer");
        }
        self.handle.map(|handle| FramebufferBinding {
            handle,
            draw_buffers: self.draw_buffers.clone(),
        })
    }

    /// Runs `f` with this framebuffer bound, then rebinds the previous one.
    fn with_bound(&self, gl: &mut C, f: impl FnOnce(&mut C)) -> Result<(), Error> {
        let handle = self
            .handle
            .ok_or(Error::NotBacked(ResourceType::FrameBuffer))?;
        let previous = gl.get_parameter_framebuffer(sys::FRAMEBUFFER_BINDING);
        gl.bind_framebuffer(sys::FRAMEBUFFER, Some(handle));
        f(gl);
        gl.bind_framebuffer(sys::FRAMEBUFFER, previous);
        Ok(())
    }

    fn attach_color(&mut self, gl: &mut C, attachment: Attachment<C>, index: u32) -> Result<&mut Self, Error> {
        let slot = index as usize;
        if slot >= MAX_COLOR_ATTACHMENTS {
            logwise::warn_sync!(
                "color attachment {index} out of range",
                index = index
            );
            return Err(Error::AttachmentOutOfRange(index));
        }
        let point = sys::COLOR_ATTACHMENT0 + index;
        self.with_bound(gl, |gl| attachment.issue(gl, point, true))?;
        if self.color[slot].replace(attachment).is_none() {
            self.draw_buffers.push(point);
        }
        Ok(self)
    }

    /// Attaches a 2D texture or all faces of a cube map at color attachment `index`.
    pub fn attach_color_texture(
        &mut self,
        gl: &mut C,
        texture: &Texture<C>,
        index: u32,
    ) -> Result<&mut Self, Error> {
        let attachment = Attachment::texture(texture)?;
        self.attach_color(gl, attachment, index)
    }

    pub fn attach_color_renderbuffer(
        &mut self,
        gl: &mut C,
        renderbuffer: &Renderbuffer<C>,
        index: u32,
    ) -> Result<&mut Self, Error> {
        let attachment = Attachment::renderbuffer(renderbuffer)?;
        self.attach_color(gl, attachment, index)
    }

    fn attach_depth(&mut self, gl: &mut C, attachment: Attachment<C>) -> Result<&mut Self, Error> {
        self.with_bound(gl, |gl| attachment.issue(gl, sys::DEPTH_ATTACHMENT, true))?;
        if self.combined_depth_stencil {
            self.stencil = None;
            self.combined_depth_stencil = false;
        }
        self.depth = Some(attachment);
        Ok(self)
    }

    fn attach_stencil(&mut self, gl: &mut C, attachment: Attachment<C>) -> Result<&mut Self, Error> {
        self.with_bound(gl, |gl| attachment.issue(gl, sys::STENCIL_ATTACHMENT, true))?;
        if self.combined_depth_stencil {
            self.depth = None;
            self.combined_depth_stencil = false;
        }
        self.stencil = Some(attachment);
        Ok(self)
    }

    fn attach_depth_stencil(&mut self, gl: &mut C, attachment: Attachment<C>) -> Result<&mut Self, Error> {
        self.with_bound(gl, |gl| {
            attachment.issue(gl, sys::DEPTH_STENCIL_ATTACHMENT, true)
        })?;
        self.depth = Some(attachment);
        self.stencil = Some(attachment);
        self.combined_depth_stencil = true;
        Ok(self)
    }

    pub fn attach_depth_texture(&mut self, gl: &mut C, texture: &Texture<C>) -> Result<&mut Self, Error> {
        let attachment = Attachment::texture(texture)?;
        self.attach_depth(gl, attachment)
    }

    pub fn attach_depth_renderbuffer(
        &mut self,
        gl: &mut C,
        renderbuffer: &Renderbuffer<C>,
    ) -> Result<&mut Self, Error> {
        let attachment = Attachment::renderbuffer(renderbuffer)?;
        self.attach_depth(gl, attachment)
    }

    pub fn attach_stencil_renderbuffer(
        &mut self,
        gl: &mut C,
        renderbuffer: &Renderbuffer<C>,
    ) -> Result<&mut Self, Error> {
        let attachment = Attachment::renderbuffer(renderbuffer)?;
        self.attach_stencil(gl, attachment)
    }

    /// Attaches a depth-stencil texture (`UNSIGNED_INT_24_8_WEBGL`) to both slots.
    pub fn attach_depth_stencil_texture(
        &mut self,
        gl: &mut C,
        texture: &Texture<C>,
    ) -> Result<&mut Self, Error> {
        let attachment = Attachment::texture(texture)?;
        self.attach_depth_stencil(gl, attachment)
    }

    pub fn attach_depth_stencil_renderbuffer(
        &mut self,
        gl: &mut C,
        renderbuffer: &Renderbuffer<C>,
    ) -> Result<&mut Self, Error> {
        let attachment = Attachment::renderbuffer(renderbuffer)?;
        self.attach_depth_stencil(gl, attachment)
    }

    /// Detaches everything in one pass and empties the draw buffer list.
    ///
    /// On an unbacked framebuffer or a lost context only the local table is cleared.
    pub fn detach(&mut self, gl: &mut C) -> &mut Self {
        let color = std::mem::replace(&mut self.color, [None; MAX_COLOR_ATTACHMENTS]);
        let depth = self.depth.take();
        let stencil = self.stencil.take();
        let combined = std::mem::take(&mut self.combined_depth_stencil);
        self.draw_buffers.clear();

        let attached = color.iter().any(Option::is_some) || depth.is_some() || stencil.is_some();
        if !attached || gl.is_context_lost() {
            return self;
        }
        let detached = self.with_bound(gl, |gl| {
            for (index, attachment) in (0u32..).zip(color.iter()) {
                if let Some(attachment) = attachment {
                    attachment.issue(gl, sys::COLOR_ATTACHMENT0 + index, false);
                }
            }
            if combined {
                if let Some(attachment) = depth {
                    attachment.issue(gl, sys::DEPTH_STENCIL_ATTACHMENT, false);
                }
            } else {
                if let Some(attachment) = depth {
                    attachment.issue(gl, sys::DEPTH_ATTACHMENT, false);
                }
                if let Some(attachment) = stencil {
                    attachment.issue(gl, sys::STENCIL_ATTACHMENT, false);
                }
            }
        });
        if let Err(err) = detached {
            logwise::warn_sync!(
                "framebuffer detach skipped: {err}",
                err = logwise::privacy::LogIt(&err)
            );
        }
        self
    }
}

impl<C: GraphicsContext> Resource<C> for Framebuffer<C> {
    type Attributes = FramebufferAttributes;

    fn resource_type(&self) -> ResourceType {
        ResourceType::FrameBuffer
    }

    fn sub_type(&self) -> ResourceSubType {
        ResourceSubType::RenderTarget
    }

    fn is_backed(&self) -> bool {
        self.handle.is_some()
    }

    fn specify_attributes(&mut self, attributes: FramebufferAttributes) -> bool {
        warn_if_backed(self.handle.is_some(), ResourceType::FrameBuffer);
        self.attributes = FramebufferAttributes {
            width: attributes.width.max(1),
            height: attributes.height.max(1),
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
        let framebuffer = gl
            .create_framebuffer()
            .ok_or(Error::AllocationFailed(ResourceType::FrameBuffer))?;
        logwise::info_sync!(
            "created framebuffer {width}x{height}",
            width = self.attributes.width,
            height = self.attributes.height
        );
        self.handle = Some(framebuffer);
        Ok(())
    }

    /// Detaches everything, then releases the framebuffer.
    fn delete_backing_resources(&mut self, gl: &mut C) -> &mut Self {
        self.detach(gl);
        if let Some(framebuffer) = self.handle.take() {
            if !gl.is_context_lost() {
                gl.delete_framebuffer(framebuffer);
            }
            logwise::info_sync!("deleted framebuffer");
        }
        self
    }

    fn serialize(&self) -> FramebufferAttributes {
        self.attributes
    }
}
