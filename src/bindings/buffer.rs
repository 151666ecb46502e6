// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Data buffers holding vertex, index, or generic element data.
//!
//! A buffer is sized as `element_size * element_count` bytes. Creating the backing
//! object allocates that much storage with no contents and leaves whatever buffer was
//! bound before still bound. Uploads go through the [`DrawContext`] so the binding they
//! leave in place is reflected in its shadow state.
//!
//! ```
//! use resources_and_state::bindings::buffer::{Buffer, BufferAttributes};
//! use resources_and_state::bindings::resource::Resource;
//! use resources_and_state::bindings::visible_to::BufferUsage;
//! use resources_and_state::images::draw_context::DrawContext;
//! use resources_and_state::imp::RecordingContext;
//!
//! let mut dc = DrawContext::new(RecordingContext::new());
//! let mut vertices = Buffer::<RecordingContext>::new();
//! vertices.specify_attributes(BufferAttributes {
//!     usage: BufferUsage::Vertex,
//!     element_size: 12,
//!     element_count: 3,
//!     ..BufferAttributes::default()
//! });
//! vertices.create_backing_resources(dc.gl_mut(), None).unwrap();
//! assert_eq!(vertices.total_size(), 36);
//! vertices.upload(&mut dc, &[0.0f32; 9]).unwrap();
//! ```
//!
//! [`DrawContext`]: crate::images::draw_context::DrawContext

use crate::bindings::resource::{warn_if_backed, Resource};
use crate::bindings::visible_to::{BufferUsage, ResourceSubType, ResourceType, UpdateType};
use crate::diagnostics::Diagnostics;
use crate::error::Error;
use crate::images::draw_context::DrawContext;
use crate::imp::GraphicsContext;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BufferAttributes {
    pub usage: BufferUsage,
    pub update_type: UpdateType,
    /// Bytes per element. Zero is treated as one.
    pub element_size: u32,
    pub element_count: u32,
}

impl Default for BufferAttributes {
    fn default() -> Self {
        BufferAttributes {
            usage: BufferUsage::Generic,
            update_type: UpdateType::StreamDraw,
            element_size: 1,
            element_count: 0,
        }
    }
}

/// What the draw context records about a bound buffer.
pub struct BufferBinding<C: GraphicsContext> {
    pub handle: C::Buffer,
    pub target: u32,
    pub element_size: u32,
}

impl<C: GraphicsContext> Clone for BufferBinding<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: GraphicsContext> Copy for BufferBinding<C> {}

impl<C: GraphicsContext> PartialEq for BufferBinding<C> {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl<C: GraphicsContext> std::fmt::Debug for BufferBinding<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BufferBinding")
            .field("handle", &self.handle)
            .field("target", &self.target)
            .field("element_size", &self.element_size)
            .finish()
    }
}

/// A GPU data buffer.
pub struct Buffer<C: GraphicsContext> {
    attributes: BufferAttributes,
    handle: Option<C::Buffer>,
}

impl<C: GraphicsContext> std::fmt::Debug for Buffer<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("attributes", &self.attributes)
            .field("handle", &self.handle)
            .finish()
    }
}

impl<C: GraphicsContext> Default for Buffer<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: GraphicsContext> Buffer<C> {
    pub fn new() -> Self {
        Buffer {
            attributes: BufferAttributes::default(),
            handle: None,
        }
    }

    pub fn attributes(&self) -> &BufferAttributes {
        &self.attributes
    }

    pub fn handle(&self) -> Option<C::Buffer> {
        self.handle
    }

    pub fn usage(&self) -> BufferUsage {
        self.attributes.usage
    }

    pub fn element_size(&self) -> u32 {
        self.attributes.element_size
    }

    pub fn element_count(&self) -> u32 {
        self.attributes.element_count
    }

    /// Bytes of storage the backing object holds.
    pub fn total_size(&self) -> usize {
        self.attributes.element_size as usize * self.attributes.element_count as usize
    }

    /// Bind target chosen by the usage.
    pub fn target(&self) -> u32 {
        self.attributes.usage.target()
    }

    /// Snapshot for [`DrawContext`] binding calls, or `None` if unbacked.
    pub fn binding(&self) -> Option<BufferBinding<C>> {
        if self.handle.is_none() {
            logwise::warn_sync!("binding requested for an unbacked buffer");
        }
        self.handle.map(|handle| BufferBinding {
            handle,
            target: self.target(),
            element_size: self.attributes.element_size,
        })
    }

    fn bind(&self, dc: &mut DrawContext<C>) -> Result<u32, Error> {
        let binding = self
            .binding()
            .ok_or(Error::NotBacked(ResourceType::DataBuffer))?;
        match self.attributes.usage {
            BufferUsage::Element => dc.bind_index_buffer(Some(binding)),
            _ => dc.bind_array_buffer(Some(binding)),
        };
        Ok(binding.target)
    }

    /// Replaces the whole contents with `data`, resizing the storage to fit.
    ///
    /// The buffer is left bound.
    pub fn upload<T: bytemuck::Pod>(&self, dc: &mut DrawContext<C>, data: &[T]) -> Result<(), Error> {
        let target = self.bind(dc)?;
        let usage = self.attributes.update_type.gl();
        dc.gl_mut()
            .buffer_data_u8_slice(target, bytemuck::cast_slice(data), usage);
        Ok(())
    }

    /// Overwrites the bytes starting at `byte_offset` with `data`.
    ///
    /// The buffer is left bound.
    pub fn upload_region<T: bytemuck::Pod>(
        &self,
        dc: &mut DrawContext<C>,
        byte_offset: usize,
        data: &[T],
    ) -> Result<(), Error> {
        let target = self.bind(dc)?;
        let offset = i32::try_from(byte_offset).unwrap_or(i32::MAX);
        dc.gl_mut()
            .buffer_sub_data_u8_slice(target, offset, bytemuck::cast_slice(data));
        Ok(())
    }
}

impl<C: GraphicsContext> Resource<C> for Buffer<C> {
    type Attributes = BufferAttributes;

    fn resource_type(&self) -> ResourceType {
        ResourceType::DataBuffer
    }

    fn sub_type(&self) -> ResourceSubType {
        self.attributes.usage.into()
    }

    fn is_backed(&self) -> bool {
        self.handle.is_some()
    }

    fn specify_attributes(&mut self, attributes: BufferAttributes) -> bool {
        warn_if_backed(self.handle.is_some(), ResourceType::DataBuffer);
        self.attributes = BufferAttributes {
            element_size: attributes.element_size.max(1),
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
        let usage = self.attributes.usage;
        let previous = gl.get_parameter_buffer(usage.binding_query());
        let buffer = gl
            .create_buffer()
            .ok_or(Error::AllocationFailed(ResourceType::DataBuffer))?;
        let size = i32::try_from(self.total_size()).unwrap_or(i32::MAX);
        gl.bind_buffer(usage.target(), Some(buffer));
        gl.buffer_data_size(usage.target(), size, self.attributes.update_type.gl());
        gl.bind_buffer(usage.target(), previous);
        logwise::info_sync!(
            "created buffer of {size} bytes",
            size = self.total_size()
        );
        self.handle = Some(buffer);
        Ok(())
    }

    fn delete_backing_resources(&mut self, gl: &mut C) -> &mut Self {
        if let Some(buffer) = self.handle.take() {
            if !gl.is_context_lost() {
                gl.delete_buffer(buffer);
            }
            logwise::info_sync!("deleted buffer");
        }
        self
    }

    fn serialize(&self) -> BufferAttributes {
        self.attributes
    }
}
