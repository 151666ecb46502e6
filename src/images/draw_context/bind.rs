// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Shadowed bindings: programs, buffers, textures and framebuffers.

use super::DrawContext;
use crate::bindings::buffer::BufferBinding;
use crate::bindings::framebuffer::FramebufferBinding;
use crate::bindings::program::ProgramLinkage;
use crate::bindings::texture::TextureBinding;
use crate::error::Error;
use crate::imp::GraphicsContext;
use crate::{sys, TEXTURE_UNITS};
use std::rc::Rc;

/// Swaps the buffer in `slot` for `next`, binding on `target` only on change.
fn switch_buffer<C: GraphicsContext>(
    gl: &mut C,
    slot: &mut Option<BufferBinding<C>>,
    target: u32,
    next: Option<BufferBinding<C>>,
) -> Option<BufferBinding<C>> {
    let previous = *slot;
    if previous == next {
        return previous;
    }
    gl.bind_buffer(target, next.map(|b| b.handle));
    logwise::trace_sync!(
        "bound buffer {buffer} on {target}",
        buffer = logwise::privacy::LogIt(&next.map(|b| b.handle)),
        target = target
    );
    *slot = next;
    previous
}

impl<C: GraphicsContext> DrawContext<C> {
    /// Makes `program` current and returns the one it replaces.
    ///
    /// A change of program resets the sampler unit counter.
    pub fn bind_program(
        &mut self,
        program: Option<Rc<ProgramLinkage<C>>>,
    ) -> Option<Rc<ProgramLinkage<C>>> {
        let current = self.program.as_ref().map(|p| p.program());
        let next = program.as_ref().map(|p| p.program());
        if current == next {
            return self.program.clone();
        }
        self.gl.use_program(next);
        logwise::trace_sync!(
            "using program {program}",
            program = logwise::privacy::LogIt(&next)
        );
        self.bound_texture_count = 0;
        std::mem::replace(&mut self.program, program)
    }

    pub fn bind_array_buffer(
        &mut self,
        buffer: Option<BufferBinding<C>>,
    ) -> Option<BufferBinding<C>> {
        switch_buffer(&mut self.gl, &mut self.array_buffer, sys::ARRAY_BUFFER, buffer)
    }

    pub fn bind_index_buffer(
        &mut self,
        buffer: Option<BufferBinding<C>>,
    ) -> Option<BufferBinding<C>> {
        switch_buffer(
            &mut self.gl,
            &mut self.index_buffer,
            sys::ELEMENT_ARRAY_BUFFER,
            buffer,
        )
    }

    /// Selects texture unit `unit` if it is not already active.
    pub(super) fn select_unit(&mut self, unit: u32) {
        if self.active_unit != unit {
            self.gl.active_texture(sys::TEXTURE0 + unit);
            self.active_unit = unit;
        }
    }

    /// Binds `texture` on `unit` and returns what the unit held before.
    ///
    /// When the new texture uses a different target than the old one, the old target
    /// is unbound so the unit never samples from two textures.
    pub fn bind_texture(
        &mut self,
        unit: u32,
        texture: Option<TextureBinding<C>>,
    ) -> Result<Option<TextureBinding<C>>, Error> {
        let previous = *self
            .textures
            .get(unit as usize)
            .ok_or(Error::TextureUnitOutOfRange(unit))?;
        if previous == texture {
            return Ok(previous);
        }
        self.select_unit(unit);
        if let Some(old) = previous {
            if texture.is_none_or(|t| t.bind_target != old.bind_target) {
                self.gl.bind_texture(old.bind_target, None);
            }
        }
        if let Some(new) = texture {
            self.gl.bind_texture(new.bind_target, Some(new.handle));
        }
        self.textures[unit as usize] = texture;
        Ok(previous)
    }

    /// Binds `framebuffer`, or the default framebuffer for `None`, and returns the
    /// previous binding.
    ///
    /// With draw buffers enabled, a framebuffer with several color attachments routes
    /// output to all of them; anything else routes to a single buffer.
    pub fn bind_framebuffer(
        &mut self,
        framebuffer: Option<FramebufferBinding<C>>,
    ) -> Option<FramebufferBinding<C>> {
        let current = self.framebuffer.as_ref().map(|f| f.handle);
        let next = framebuffer.as_ref().map(|f| f.handle);
        if current == next {
            return self.framebuffer.clone();
        }
        self.gl.bind_framebuffer(sys::FRAMEBUFFER, next);
        logwise::trace_sync!(
            "bound framebuffer {framebuffer}",
            framebuffer = logwise::privacy::LogIt(&next)
        );
        let routing = match &framebuffer {
            Some(f) if f.draw_buffers.len() > 1 => f.draw_buffers.clone(),
            Some(_) => vec![sys::COLOR_ATTACHMENT0],
            None => vec![sys::BACK],
        };
        self.route_draw_buffers(routing);
        std::mem::replace(&mut self.framebuffer, framebuffer)
    }

    /// The draw-buffer list is per framebuffer object, so it is resubmitted on
    /// every framebuffer change rather than diffed against the last list sent.
    fn route_draw_buffers(&mut self, routing: Vec<u32>) {
        if self.draw_buffers_supported {
            self.gl.draw_buffers(&routing);
            self.draw_buffers = routing;
        }
    }

    pub fn unbind_program(&mut self) -> Option<Rc<ProgramLinkage<C>>> {
        self.bind_program(None)
    }

    pub fn unbind_array_buffer(&mut self) -> Option<BufferBinding<C>> {
        self.bind_array_buffer(None)
    }

    pub fn unbind_index_buffer(&mut self) -> Option<BufferBinding<C>> {
        self.bind_index_buffer(None)
    }

    pub fn unbind_framebuffer(&mut self) -> Option<FramebufferBinding<C>> {
        self.bind_framebuffer(None)
    }

    /// Unbinds whatever `unit` holds, then returns to the unit that was active.
    pub fn unbind_texture(&mut self, unit: u32) -> Result<Option<TextureBinding<C>>, Error> {
        let previous = *self
            .textures
            .get(unit as usize)
            .ok_or(Error::TextureUnitOutOfRange(unit))?;
        if let Some(old) = previous {
            let restore = self.active_unit;
            self.select_unit(unit);
            self.gl.bind_texture(old.bind_target, None);
            self.textures[unit as usize] = None;
            self.select_unit(restore);
        }
        Ok(previous)
    }

    /// Unbinds every occupied unit and hands all units back to the active program.
    pub fn unbind_all_textures(&mut self) {
        let mut unbound = false;
        for unit in 0..TEXTURE_UNITS {
            if self.textures[unit as usize].is_none() {
                continue;
            }
            self.select_unit(unit);
            self.gl.bind_texture(sys::TEXTURE_2D, None);
            self.gl.bind_texture(sys::TEXTURE_CUBE_MAP, None);
            self.textures[unit as usize] = None;
            unbound = true;
        }
        if unbound {
            self.select_unit(0);
        }
        self.bound_texture_count = 0;
    }

    /// Unbinds everything without consulting the shadow, then clears it.
    ///
    /// Every call is issued even on a lost context, since the shadow cannot be
    /// trusted after loss.
    pub fn unbind(&mut self) {
        for unit in 0..TEXTURE_UNITS {
            self.gl.active_texture(sys::TEXTURE0 + unit);
            self.gl.bind_texture(sys::TEXTURE_2D, None);
            self.gl.bind_texture(sys::TEXTURE_CUBE_MAP, None);
        }
        self.gl.active_texture(sys::TEXTURE0);
        self.gl.bind_buffer(sys::ARRAY_BUFFER, None);
        self.gl.bind_buffer(sys::ELEMENT_ARRAY_BUFFER, None);
        self.gl.bind_framebuffer(sys::FRAMEBUFFER, None);
        self.gl.use_program(None);
        if self.draw_buffers_supported {
            self.gl.draw_buffers(&[sys::BACK]);
        }
        self.forget_bindings();
    }
}
