// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Fixed-function state, diffed field by field against the shadow.

use super::DrawContext;
use crate::bindings::state::{BlendState, ClearState, DepthStencilState, RasterState};
use crate::images::viewport::Viewport;
use crate::imp::GraphicsContext;
use crate::sys;

fn toggle<C: GraphicsContext>(gl: &mut C, capability: u32, enabled: bool) {
    if enabled {
        gl.enable(capability);
    } else {
        gl.disable(capability);
    }
}

impl<C: GraphicsContext> DrawContext<C> {
    /// A viewport at the origin covering `width` by `height`.  Zero dimensions become 1.
    pub fn create_viewport(&self, width: u32, height: u32) -> Viewport {
        Viewport::new(width, height)
    }

    pub fn apply_viewport(&mut self, viewport: &Viewport) -> &mut Self {
        if !self.viewport.same_rect(viewport) {
            self.gl
                .viewport(viewport.x, viewport.y, viewport.width, viewport.height);
        }
        if !self.viewport.same_depth_range(viewport) {
            self.gl.depth_range_f32(viewport.near, viewport.far);
        }
        self.viewport = *viewport;
        self
    }

    pub fn apply_blend_state(&mut self, state: &BlendState) -> &mut Self {
        let active = &mut self.blend;
        let gl = &mut self.gl;
        if active.blend_enabled != state.blend_enabled {
            toggle(gl, sys::BLEND, state.blend_enabled);
        }
        if active.function_color != state.function_color
            || active.function_alpha != state.function_alpha
        {
            gl.blend_equation_separate(state.function_color.gl(), state.function_alpha.gl());
        }
        if active.source_factor_color != state.source_factor_color
            || active.source_factor_alpha != state.source_factor_alpha
            || active.target_factor_color != state.target_factor_color
            || active.target_factor_alpha != state.target_factor_alpha
        {
            gl.blend_func_separate(
                state.source_factor_color.gl(),
                state.target_factor_color.gl(),
                state.source_factor_alpha.gl(),
                state.target_factor_alpha.gl(),
            );
        }
        if active.constant_color != state.constant_color {
            let [r, g, b, a] = state.constant_color;
            gl.blend_color(r, g, b, a);
        }
        *active = *state;
        self
    }

    /// Applies clear values.  The clear switches are only recorded, for
    /// [`Self::clear_framebuffer`].
    pub fn apply_clear_state(&mut self, state: &ClearState) -> &mut Self {
        let active = &mut self.clear;
        if active.color_value != state.color_value {
            let [r, g, b, a] = state.color_value;
            self.gl.clear_color(r, g, b, a);
        }
        if active.depth_value != state.depth_value {
            self.gl.clear_depth_f32(state.depth_value);
        }
        if active.stencil_value != state.stencil_value {
            self.gl.clear_stencil(state.stencil_value);
        }
        *active = *state;
        self
    }

    pub fn apply_raster_state(&mut self, state: &RasterState) -> &mut Self {
        let active = &mut self.raster;
        let gl = &mut self.gl;
        if active.culling_enabled != state.culling_enabled {
            toggle(gl, sys::CULL_FACE, state.culling_enabled);
        }
        if active.cull_face != state.cull_face {
            gl.cull_face(state.cull_face.gl());
        }
        if active.winding_order != state.winding_order {
            gl.front_face(state.winding_order.gl());
        }
        if active.scissor_test_enabled != state.scissor_test_enabled {
            toggle(gl, sys::SCISSOR_TEST, state.scissor_test_enabled);
        }
        if active.scissor_x != state.scissor_x
            || active.scissor_y != state.scissor_y
            || active.scissor_width != state.scissor_width
            || active.scissor_height != state.scissor_height
        {
            gl.scissor(
                state.scissor_x,
                state.scissor_y,
                state.scissor_width,
                state.scissor_height,
            );
        }
        if active.offset_factor != state.offset_factor
            || active.offset_units != state.offset_units
        {
            gl.polygon_offset(state.offset_factor, state.offset_units);
        }
        if active.sample_coverage_enabled != state.sample_coverage_enabled {
            toggle(gl, sys::SAMPLE_COVERAGE, state.sample_coverage_enabled);
        }
        if active.sample_alpha_to_coverage != state.sample_alpha_to_coverage {
            toggle(gl, sys::SAMPLE_ALPHA_TO_COVERAGE, state.sample_alpha_to_coverage);
        }
        if active.invert_coverage != state.invert_coverage
            || active.coverage_value != state.coverage_value
        {
            gl.sample_coverage(state.coverage_value, state.invert_coverage);
        }
        if active.line_width != state.line_width {
            gl.line_width(state.line_width);
        }
        if active.color_write != state.color_write {
            let [r, g, b, a] = state.color_write;
            gl.color_mask(r, g, b, a);
        }
        *active = *state;
        self
    }

    pub fn apply_depth_stencil_state(&mut self, state: &DepthStencilState) -> &mut Self {
        let active = &mut self.depth_stencil;
        let gl = &mut self.gl;
        if active.depth_write_enabled != state.depth_write_enabled {
            gl.depth_mask(state.depth_write_enabled);
        }
        if active.depth_test_enabled != state.depth_test_enabled {
            toggle(gl, sys::DEPTH_TEST, state.depth_test_enabled);
        }
        if active.depth_test_function != state.depth_test_function {
            gl.depth_func(state.depth_test_function.gl());
        }
        if active.stencil_test_enabled != state.stencil_test_enabled {
            toggle(gl, sys::STENCIL_TEST, state.stencil_test_enabled);
        }
        if active.back_func() != state.back_func() {
            let (function, reference, mask) = state.back_func();
            gl.stencil_func_separate(sys::BACK, function.gl(), reference, mask);
        }
        if active.back_ops() != state.back_ops() {
            let (fail, depth_fail, pass) = state.back_ops();
            gl.stencil_op_separate(sys::BACK, fail.gl(), depth_fail.gl(), pass.gl());
        }
        if active.front_func() != state.front_func() {
            let (function, reference, mask) = state.front_func();
            gl.stencil_func_separate(sys::FRONT, function.gl(), reference, mask);
        }
        if active.front_ops() != state.front_ops() {
            let (fail, depth_fail, pass) = state.front_ops();
            gl.stencil_op_separate(sys::FRONT, fail.gl(), depth_fail.gl(), pass.gl());
        }
        *active = *state;
        self
    }

    /// Sets the scissor rectangle, enabling the scissor test for a non-empty region
    /// and disabling it for an empty one.
    pub fn apply_scissor_region(&mut self, x: i32, y: i32, width: i32, height: i32) -> &mut Self {
        let active = &mut self.raster;
        let non_empty = width > 0 && height > 0;
        if non_empty != active.scissor_test_enabled {
            toggle(&mut self.gl, sys::SCISSOR_TEST, non_empty);
            active.scissor_test_enabled = non_empty;
        }
        if (active.scissor_x, active.scissor_y, active.scissor_width, active.scissor_height)
            != (x, y, width, height)
        {
            self.gl.scissor(x, y, width, height);
            active.scissor_x = x;
            active.scissor_y = y;
            active.scissor_width = width;
            active.scissor_height = height;
        }
        self
    }

    /// Per-face stencil write masks.
    pub fn apply_stencil_mask(&mut self, front: u32, back: u32) -> &mut Self {
        if self.stencil_write_back != back {
            self.gl.stencil_mask_separate(sys::BACK, back);
            self.stencil_write_back = back;
        }
        if self.stencil_write_front != front {
            self.gl.stencil_mask_separate(sys::FRONT, front);
            self.stencil_write_front = front;
        }
        self
    }

    /// Turns writes to all four color channels, and to depth, on or off.
    ///
    /// Use [`RasterState::color_write`] for per-channel control.
    pub fn apply_write_masks(&mut self, color: bool, depth: bool) -> &mut Self {
        if self.raster.color_write != [color; 4] {
            self.gl.color_mask(color, color, color, color);
            self.raster.color_write = [color; 4];
        }
        if self.depth_stencil.depth_write_enabled != depth {
            self.gl.depth_mask(depth);
            self.depth_stencil.depth_write_enabled = depth;
        }
        self
    }

    /// Clears whichever buffers the active clear state selects.
    pub fn clear_framebuffer(&mut self) -> &mut Self {
        self.gl.clear(self.clear.clear_flags());
        self
    }
}
