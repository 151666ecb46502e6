// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! resources_and_state is a resource and state layer for immediate-mode graphics APIs
in the WebGL 1 / OpenGL ES 2 family.

It has three parts:

| Part                 | Module                                   | What it does                                                         |
|----------------------|------------------------------------------|----------------------------------------------------------------------|
| Layout engine        | [`images::vertex_layout`], [`pixel_formats`] | Byte layout of interleaved vertex data, image storage and mip chains |
| Resource descriptors | [`bindings`]                             | Buffers, textures, renderbuffers, framebuffers, programs, state groups |
| Draw context         | [`images::draw_context`]                 | A shadow of the context's bindings that suppresses redundant calls   |

# Resources

Every descriptor follows the same lifecycle, defined by [`bindings::resource::Resource`]:
attributes are specified (and clamped to something valid), a backing object is created
on a [`imp::GraphicsContext`], and later deleted.  A descriptor's attributes serialize
with serde, so after a context loss a scene can be rebuilt from its saved attributes.

Creation never disturbs the caller's bindings: anything a descriptor binds while it is
being created is restored before it returns.

# Backends

All GPU access goes through [`imp::GraphicsContext`].  [`imp::RecordingContext`] records
calls instead of issuing them, and with the `backend_glow` feature `imp::GlowContext`
forwards to a live [glow](https://docs.rs/glow) context.

```
use resources_and_state::bindings::buffer::{Buffer, BufferAttributes};
use resources_and_state::bindings::resource::Resource;
use resources_and_state::bindings::visible_to::BufferUsage;
use resources_and_state::images::draw_context::{DrawContext, Primitive};
use resources_and_state::imp::RecordingContext;

let mut dc = DrawContext::new(RecordingContext::new());
let mut vertices = Buffer::<RecordingContext>::new();
vertices.specify_attributes(BufferAttributes {
    usage: BufferUsage::Vertex,
    element_size: 12,
    element_count: 3,
    ..BufferAttributes::default()
});
vertices.create_backing_resources(dc.gl_mut(), None).unwrap();
dc.bind_array_buffer(vertices.binding());
dc.draw(Primitive::Triangles, 0, 3);
```
*/

pub mod bindings;
pub mod diagnostics;
pub mod error;
pub mod images;
pub mod imp;
pub mod pixel_formats;
pub mod sys;

pub use error::Error;
pub use images::draw_context::DrawContext;
pub use imp::GraphicsContext;

/// Texture units the draw context tracks.
pub const TEXTURE_UNITS: u32 = 32;

/// Color attachment slots on a framebuffer.
pub const MAX_COLOR_ATTACHMENTS: usize = 16;
