// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
The draw context: a shadow of what is bound and enabled on one graphics context.

[`DrawContext`] owns the [`GraphicsContext`] and keeps an in-memory copy of every
binding and fixed-function setting it has issued.  Each bind and apply operation
compares the request against that copy and only calls into the context when something
actually changes, so callers can re-apply their full state every frame without paying
for redundant transitions.

The shadow is only correct while every state change goes through the draw context.
[`DrawContext::gl_mut`] exists for resource creation, which saves and restores any
binding it disturbs; code that changes bindings directly through it must restore them.

```
use resources_and_state::images::draw_context::{DrawContext, Primitive};
use resources_and_state::bindings::state::BlendState;
use resources_and_state::imp::RecordingContext;

let mut dc = DrawContext::new(RecordingContext::new());
let blend = BlendState { blend_enabled: true, ..BlendState::default() };
dc.apply_blend_state(&blend);
let after_first = dc.gl().calls().len();
dc.apply_blend_state(&blend);
assert_eq!(dc.gl().calls().len(), after_first);

dc.draw(Primitive::Triangles, 0, 3);
```
*/

mod bind;
mod state;
mod submit;
mod uniform;

pub use submit::{IndexType, Primitive};
pub use uniform::UniformValue;

use crate::bindings::buffer::BufferBinding;
use crate::bindings::framebuffer::FramebufferBinding;
use crate::bindings::program::ProgramLinkage;
use crate::bindings::state::{BlendState, ClearState, DepthStencilState, RasterState};
use crate::bindings::texture::TextureBinding;
use crate::images::viewport::Viewport;
use crate::imp::GraphicsContext;
use crate::{sys, TEXTURE_UNITS};
use std::collections::HashMap;
use std::rc::Rc;

/// Vendor prefixes tried, in order, after the bare extension name.
const VENDOR_PREFIXES: [&str; 4] = ["MOZ_", "WEBKIT_", "O_", "IE_"];

/// See the module documentation.
pub struct DrawContext<C: GraphicsContext> {
    gl: C,
    extensions: HashMap<String, String>,
    draw_buffers_supported: bool,
    /// The draw-buffer routing last submitted.
    draw_buffers: Vec<u32>,
    program: Option<Rc<ProgramLinkage<C>>>,
    bound_texture_count: u32,
    framebuffer: Option<FramebufferBinding<C>>,
    array_buffer: Option<BufferBinding<C>>,
    index_buffer: Option<BufferBinding<C>>,
    textures: [Option<TextureBinding<C>>; TEXTURE_UNITS as usize],
    active_unit: u32,
    viewport: Viewport,
    blend: BlendState,
    clear: ClearState,
    raster: RasterState,
    depth_stencil: DepthStencilState,
    stencil_write_front: u32,
    stencil_write_back: u32,
}

impl<C: GraphicsContext> std::fmt::Debug for DrawContext<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawContext")
            .field("extensions", &self.extensions)
            .field("draw_buffers", &self.draw_buffers)
            .field("program", &self.program.as_ref().map(|p| p.program()))
            .field("bound_texture_count", &self.bound_texture_count)
            .field("framebuffer", &self.framebuffer)
            .field("array_buffer", &self.array_buffer)
            .field("index_buffer", &self.index_buffer)
            .field("active_unit", &self.active_unit)
            .field("viewport", &self.viewport)
            .finish_non_exhaustive()
    }
}

impl<C: GraphicsContext> DrawContext<C> {
    /// Wraps a context whose state is still at its defaults.
    pub fn new(gl: C) -> Self {
        DrawContext {
            gl,
            extensions: HashMap::new(),
            draw_buffers_supported: false,
            draw_buffers: vec![sys::BACK],
            program: None,
            bound_texture_count: 0,
            framebuffer: None,
            array_buffer: None,
            index_buffer: None,
            textures: [None; TEXTURE_UNITS as usize],
            active_unit: 0,
            viewport: Viewport::initial(),
            blend: BlendState::default(),
            clear: ClearState::default(),
            raster: RasterState::default(),
            depth_stencil: DepthStencilState::default(),
            stencil_write_front: 0xFFFF_FFFF,
            stencil_write_back: 0xFFFF_FFFF,
        }
    }

    pub fn gl(&self) -> &C {
        &self.gl
    }

    /// Direct access to the context, for resource creation and uploads.
    pub fn gl_mut(&mut self) -> &mut C {
        &mut self.gl
    }

    pub fn into_inner(self) -> C {
        self.gl
    }

    /// Enables `name`, trying the bare name first and then each vendor prefix.
    ///
    /// Returns whether the extension is now enabled.  Enabling `WEBGL_draw_buffers`
    /// turns on draw-buffer routing in [`Self::bind_framebuffer`].
    pub fn enable_extension(&mut self, name: &str) -> bool {
        if self.extensions.contains_key(name) {
            return true;
        }
        let candidates = std::iter::once(name.to_owned())
            .chain(VENDOR_PREFIXES.iter().map(|prefix| format!("{prefix}{name}")));
        for candidate in candidates {
            if self.gl.get_extension(&candidate) {
                self.record_extension(name.to_owned(), candidate);
                return true;
            }
        }
        logwise::warn_sync!(
            "extension {name} is not supported",
            name = logwise::privacy::LogIt(&name)
        );
        false
    }

    /// Enables every extension the context advertises, keyed by unprefixed name.
    ///
    /// Returns the number of extensions enabled by this call.
    pub fn enable_all_extensions(&mut self) -> usize {
        let mut enabled = 0;
        for full_name in self.gl.supported_extensions() {
            if !self.gl.get_extension(&full_name) {
                continue;
            }
            let bare = VENDOR_PREFIXES
                .iter()
                .find_map(|prefix| full_name.strip_prefix(prefix))
                .unwrap_or(&full_name)
                .to_owned();
            self.record_extension(bare, full_name);
            enabled += 1;
        }
        enabled
    }

    fn record_extension(&mut self, bare: String, full_name: String) {
        if bare == sys::DRAW_BUFFERS_EXTENSION {
            self.draw_buffers_supported = true;
        }
        logwise::info_sync!(
            "enabled extension {name}",
            name = logwise::privacy::LogIt(&full_name)
        );
        self.extensions.insert(bare, full_name);
    }

    /// The full name an enabled extension was found under.
    pub fn extension(&self, name: &str) -> Option<&str> {
        self.extensions.get(name).map(String::as_str)
    }

    pub fn draw_buffers_supported(&self) -> bool {
        self.draw_buffers_supported
    }

    /// Forgets everything the shadow knows, without issuing any calls.
    ///
    /// Call after a lost context is restored: the new context starts at its defaults
    /// with no extensions enabled, and every descriptor has to be recreated.
    pub fn reset_after_context_loss(&mut self) {
        self.extensions.clear();
        self.draw_buffers_supported = false;
        self.forget_bindings();
        self.viewport = Viewport::initial();
        self.blend = BlendState::default();
        self.clear = ClearState::default();
        self.raster = RasterState::default();
        self.depth_stencil = DepthStencilState::default();
        self.stencil_write_front = 0xFFFF_FFFF;
        self.stencil_write_back = 0xFFFF_FFFF;
        logwise::info_sync!("draw context shadow reset after context loss");
    }

    fn forget_bindings(&mut self) {
        self.draw_buffers = vec![sys::BACK];
        self.program = None;
        self.bound_texture_count = 0;
        self.framebuffer = None;
        self.array_buffer = None;
        self.index_buffer = None;
        self.textures = [None; TEXTURE_UNITS as usize];
        self.active_unit = 0;
    }

    pub fn program(&self) -> Option<&Rc<ProgramLinkage<C>>> {
        self.program.as_ref()
    }

    /// Texture units the active program's sampler uniforms have claimed.
    pub fn bound_texture_count(&self) -> u32 {
        self.bound_texture_count
    }

    pub fn framebuffer(&self) -> Option<&FramebufferBinding<C>> {
        self.framebuffer.as_ref()
    }

    pub fn array_buffer(&self) -> Option<BufferBinding<C>> {
        self.array_buffer
    }

    pub fn index_buffer(&self) -> Option<BufferBinding<C>> {
        self.index_buffer
    }

    /// The texture bound on `unit`, if any.  Units past the last one report `None`.
    pub fn texture(&self, unit: u32) -> Option<TextureBinding<C>> {
        self.textures.get(unit as usize).copied().flatten()
    }

    pub fn active_unit(&self) -> u32 {
        self.active_unit
    }

    /// The draw-buffer routing last submitted.
    pub fn draw_buffers(&self) -> &[u32] {
        &self.draw_buffers
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn blend_state(&self) -> &BlendState {
        &self.blend
    }

    pub fn clear_state(&self) -> &ClearState {
        &self.clear
    }

    pub fn raster_state(&self) -> &RasterState {
        &self.raster
    }

    pub fn depth_stencil_state(&self) -> &DepthStencilState {
        &self.depth_stencil
    }

    /// Stencil write masks as `(front, back)`.
    pub fn stencil_write_masks(&self) -> (u32, u32) {
        (self.stencil_write_front, self.stencil_write_back)
    }
}
