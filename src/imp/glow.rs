// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! [`GraphicsContext`] over a live `glow::Context`.
//!
//! Every method is a direct forward. glow's entry points are `unsafe` because they
//! call into the driver; the invariants they rely on (a current context on this
//! thread, handles created by this context) are the ones [`GlowContext::new`] asks
//! the caller to uphold.

use super::GraphicsContext;
use ::glow::HasContext;

type Native = ::glow::Context;

/// Owns a `glow::Context` and forwards to it.
pub struct GlowContext {
    gl: Native,
}

impl std::fmt::Debug for GlowContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlowContext").finish_non_exhaustive()
    }
}

impl GlowContext {
    /// Wraps `gl`.
    ///
    /// # Safety
    /// `gl` must stay current on the calling thread for as long as the wrapper is used,
    /// and only handles issued through this wrapper may be passed back into it.
    pub unsafe fn new(gl: Native) -> Self {
        logwise::info_sync!("GlowContext wrapping a native context");
        GlowContext { gl }
    }

    pub fn native(&self) -> &Native {
        &self.gl
    }

    pub fn into_native(self) -> Native {
        self.gl
    }
}

impl GraphicsContext for GlowContext {
    type Buffer = <Native as HasContext>::Buffer;
    type Texture = <Native as HasContext>::Texture;
    type Renderbuffer = <Native as HasContext>::Renderbuffer;
    type Framebuffer = <Native as HasContext>::Framebuffer;
    type Shader = <Native as HasContext>::Shader;
    type Program = <Native as HasContext>::Program;
    type UniformLocation = <Native as HasContext>::UniformLocation;

    fn is_context_lost(&self) -> bool {
        // glow exposes no loss query
        false
    }

    fn supported_extensions(&self) -> Vec<String> {
        self.gl.supported_extensions().iter().cloned().collect()
    }

    fn get_extension(&mut self, name: &str) -> bool {
        self.gl.supported_extensions().contains(name)
    }

    fn get_parameter_buffer(&self, parameter: u32) -> Option<Self::Buffer> {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.get_parameter_buffer(parameter) }
    }

    fn get_parameter_texture(&self, parameter: u32) -> Option<Self::Texture> {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.get_parameter_texture(parameter) }
    }

    fn get_parameter_renderbuffer(&self, parameter: u32) -> Option<Self::Renderbuffer> {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.get_parameter_renderbuffer(parameter) }
    }

    fn get_parameter_framebuffer(&self, parameter: u32) -> Option<Self::Framebuffer> {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.get_parameter_framebuffer(parameter) }
    }

    fn create_buffer(&mut self) -> Option<Self::Buffer> {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.create_buffer().ok() }
    }

    fn delete_buffer(&mut self, buffer: Self::Buffer) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.delete_buffer(buffer) }
    }

    fn bind_buffer(&mut self, target: u32, buffer: Option<Self::Buffer>) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.bind_buffer(target, buffer) }
    }

    fn buffer_data_size(&mut self, target: u32, size: i32, usage: u32) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.buffer_data_size(target, size, usage) }
    }

    fn buffer_data_u8_slice(&mut self, target: u32, data: &[u8], usage: u32) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.buffer_data_u8_slice(target, data, usage) }
    }

    fn buffer_sub_data_u8_slice(&mut self, target: u32, offset: i32, data: &[u8]) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.buffer_sub_data_u8_slice(target, offset, data) }
    }

    fn create_texture(&mut self) -> Option<Self::Texture> {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.create_texture().ok() }
    }

    fn delete_texture(&mut self, texture: Self::Texture) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.delete_texture(texture) }
    }

    fn bind_texture(&mut self, target: u32, texture: Option<Self::Texture>) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.bind_texture(target, texture) }
    }

    fn active_texture(&mut self, unit: u32) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.active_texture(unit) }
    }

    fn tex_parameter_i32(&mut self, target: u32, parameter: u32, value: i32) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.tex_parameter_i32(target, parameter, value) }
    }

    fn pixel_store_i32(&mut self, parameter: u32, value: i32) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.pixel_store_i32(parameter, value) }
    }

    fn pixel_store_bool(&mut self, parameter: u32, value: bool) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.pixel_store_bool(parameter, value) }
    }

    fn tex_image_2d(
        &mut self,
        target: u32,
        level: i32,
        internal_format: i32,
        width: i32,
        height: i32,
        border: i32,
        format: u32,
        ty: u32,
        pixels: Option<&[u8]>,
    ) {
        // SAFETY: see GlowContext::new
        unsafe {
            self.gl.tex_image_2d(
                target,
                level,
                internal_format,
                width,
                height,
                border,
                format,
                ty,
                ::glow::PixelUnpackData::Slice(pixels),
            )
        }
    }

    fn compressed_tex_image_2d(
        &mut self,
        target: u32,
        level: i32,
        internal_format: i32,
        width: i32,
        height: i32,
        border: i32,
        pixels: &[u8],
    ) {
        let image_size = i32::try_from(pixels.len()).unwrap_or(i32::MAX);
        // SAFETY: see GlowContext::new
        unsafe {
            self.gl.compressed_tex_image_2d(
                target,
                level,
                internal_format,
                width,
                height,
                border,
                image_size,
                pixels,
            )
        }
    }

    fn tex_sub_image_2d(
        &mut self,
        target: u32,
        level: i32,
        x_offset: i32,
        y_offset: i32,
        width: i32,
        height: i32,
        format: u32,
        ty: u32,
        pixels: &[u8],
    ) {
        // SAFETY: see GlowContext::new
        unsafe {
            self.gl.tex_sub_image_2d(
                target,
                level,
                x_offset,
                y_offset,
                width,
                height,
                format,
                ty,
                ::glow::PixelUnpackData::Slice(Some(pixels)),
            )
        }
    }

    fn compressed_tex_sub_image_2d(
        &mut self,
        target: u32,
        level: i32,
        x_offset: i32,
        y_offset: i32,
        width: i32,
        height: i32,
        format: u32,
        pixels: &[u8],
    ) {
        // SAFETY: see GlowContext::new
        unsafe {
            self.gl.compressed_tex_sub_image_2d(
                target,
                level,
                x_offset,
                y_offset,
                width,
                height,
                format,
                ::glow::CompressedPixelUnpackData::Slice(pixels),
            )
        }
    }

    fn generate_mipmap(&mut self, target: u32) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.generate_mipmap(target) }
    }

    fn create_renderbuffer(&mut self) -> Option<Self::Renderbuffer> {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.create_renderbuffer().ok() }
    }

    fn delete_renderbuffer(&mut self, renderbuffer: Self::Renderbuffer) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.delete_renderbuffer(renderbuffer) }
    }

    fn bind_renderbuffer(&mut self, target: u32, renderbuffer: Option<Self::Renderbuffer>) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.bind_renderbuffer(target, renderbuffer) }
    }

    fn renderbuffer_storage(&mut self, target: u32, internal_format: u32, width: i32, height: i32) {
        // SAFETY: see GlowContext::new
        unsafe {
            self.gl
                .renderbuffer_storage(target, internal_format, width, height)
        }
    }

    fn create_framebuffer(&mut self) -> Option<Self::Framebuffer> {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.create_framebuffer().ok() }
    }

    fn delete_framebuffer(&mut self, framebuffer: Self::Framebuffer) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.delete_framebuffer(framebuffer) }
    }

    fn bind_framebuffer(&mut self, target: u32, framebuffer: Option<Self::Framebuffer>) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.bind_framebuffer(target, framebuffer) }
    }

    fn framebuffer_texture_2d(
        &mut self,
        target: u32,
        attachment: u32,
        texture_target: u32,
        texture: Option<Self::Texture>,
        level: i32,
    ) {
        // SAFETY: see GlowContext::new
        unsafe {
            self.gl
                .framebuffer_texture_2d(target, attachment, texture_target, texture, level)
        }
    }

    fn framebuffer_renderbuffer(
        &mut self,
        target: u32,
        attachment: u32,
        renderbuffer_target: u32,
        renderbuffer: Option<Self::Renderbuffer>,
    ) {
        // SAFETY: see GlowContext::new
        unsafe {
            self.gl
                .framebuffer_renderbuffer(target, attachment, renderbuffer_target, renderbuffer)
        }
    }

    fn draw_buffers(&mut self, buffers: &[u32]) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.draw_buffers(buffers) }
    }

    fn create_shader(&mut self, shader_type: u32) -> Option<Self::Shader> {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.create_shader(shader_type).ok() }
    }

    fn shader_source(&mut self, shader: Self::Shader, source: &str) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.shader_source(shader, source) }
    }

    fn compile_shader(&mut self, shader: Self::Shader) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.compile_shader(shader) }
    }

    fn get_shader_compile_status(&self, shader: Self::Shader) -> bool {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.get_shader_compile_status(shader) }
    }

    fn get_shader_info_log(&self, shader: Self::Shader) -> String {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.get_shader_info_log(shader) }
    }

    fn delete_shader(&mut self, shader: Self::Shader) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.delete_shader(shader) }
    }

    fn create_program(&mut self) -> Option<Self::Program> {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.create_program().ok() }
    }

    fn attach_shader(&mut self, program: Self::Program, shader: Self::Shader) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.attach_shader(program, shader) }
    }

    fn detach_shader(&mut self, program: Self::Program, shader: Self::Shader) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.detach_shader(program, shader) }
    }

    fn bind_attrib_location(&mut self, program: Self::Program, index: u32, name: &str) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.bind_attrib_location(program, index, name) }
    }

    fn link_program(&mut self, program: Self::Program) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.link_program(program) }
    }

    fn get_program_link_status(&self, program: Self::Program) -> bool {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.get_program_link_status(program) }
    }

    fn get_program_info_log(&self, program: Self::Program) -> String {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.get_program_info_log(program) }
    }

    fn delete_program(&mut self, program: Self::Program) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.delete_program(program) }
    }

    fn get_uniform_location(
        &mut self,
        program: Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation> {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.get_uniform_location(program, name) }
    }

    fn use_program(&mut self, program: Option<Self::Program>) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.use_program(program) }
    }

    fn enable(&mut self, capability: u32) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.enable(capability) }
    }

    fn disable(&mut self, capability: u32) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.disable(capability) }
    }

    fn blend_equation_separate(&mut self, mode_rgb: u32, mode_alpha: u32) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.blend_equation_separate(mode_rgb, mode_alpha) }
    }

    fn blend_func_separate(&mut self, src_rgb: u32, dst_rgb: u32, src_alpha: u32, dst_alpha: u32) {
        // SAFETY: see GlowContext::new
        unsafe {
            self.gl
                .blend_func_separate(src_rgb, dst_rgb, src_alpha, dst_alpha)
        }
    }

    fn blend_color(&mut self, red: f32, green: f32, blue: f32, alpha: f32) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.blend_color(red, green, blue, alpha) }
    }

    fn clear_color(&mut self, red: f32, green: f32, blue: f32, alpha: f32) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.clear_color(red, green, blue, alpha) }
    }

    fn clear_depth_f32(&mut self, depth: f32) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.clear_depth_f32(depth) }
    }

    fn clear_stencil(&mut self, stencil: i32) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.clear_stencil(stencil) }
    }

    fn clear(&mut self, mask: u32) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.clear(mask) }
    }

    fn cull_face(&mut self, face: u32) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.cull_face(face) }
    }

    fn front_face(&mut self, winding: u32) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.front_face(winding) }
    }

    fn scissor(&mut self, x: i32, y: i32, width: i32, height: i32) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.scissor(x, y, width, height) }
    }

    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.viewport(x, y, width, height) }
    }

    fn depth_range_f32(&mut self, near: f32, far: f32) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.depth_range_f32(near, far) }
    }

    fn polygon_offset(&mut self, factor: f32, units: f32) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.polygon_offset(factor, units) }
    }

    fn sample_coverage(&mut self, value: f32, invert: bool) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.sample_coverage(value, invert) }
    }

    fn line_width(&mut self, width: f32) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.line_width(width) }
    }

    fn color_mask(&mut self, red: bool, green: bool, blue: bool, alpha: bool) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.color_mask(red, green, blue, alpha) }
    }

    fn depth_mask(&mut self, enabled: bool) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.depth_mask(enabled) }
    }

    fn depth_func(&mut self, function: u32) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.depth_func(function) }
    }

    fn stencil_func_separate(&mut self, face: u32, function: u32, reference: i32, mask: u32) {
        // SAFETY: see GlowContext::new
        unsafe {
            self.gl
                .stencil_func_separate(face, function, reference, mask)
        }
    }

    fn stencil_op_separate(&mut self, face: u32, fail: u32, depth_fail: u32, pass: u32) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.stencil_op_separate(face, fail, depth_fail, pass) }
    }

    fn stencil_mask_separate(&mut self, face: u32, mask: u32) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.stencil_mask_separate(face, mask) }
    }

    fn uniform_1_f32(&mut self, location: Option<&Self::UniformLocation>, x: f32) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.uniform_1_f32(location, x) }
    }

    fn uniform_2_f32_slice(&mut self, location: Option<&Self::UniformLocation>, v: &[f32]) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.uniform_2_f32_slice(location, v) }
    }

    fn uniform_3_f32_slice(&mut self, location: Option<&Self::UniformLocation>, v: &[f32]) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.uniform_3_f32_slice(location, v) }
    }

    fn uniform_4_f32_slice(&mut self, location: Option<&Self::UniformLocation>, v: &[f32]) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.uniform_4_f32_slice(location, v) }
    }

    fn uniform_1_i32(&mut self, location: Option<&Self::UniformLocation>, x: i32) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.uniform_1_i32(location, x) }
    }

    fn uniform_2_i32_slice(&mut self, location: Option<&Self::UniformLocation>, v: &[i32]) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.uniform_2_i32_slice(location, v) }
    }

    fn uniform_3_i32_slice(&mut self, location: Option<&Self::UniformLocation>, v: &[i32]) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.uniform_3_i32_slice(location, v) }
    }

    fn uniform_4_i32_slice(&mut self, location: Option<&Self::UniformLocation>, v: &[i32]) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.uniform_4_i32_slice(location, v) }
    }

    fn uniform_matrix_2_f32_slice(
        &mut self,
        location: Option<&Self::UniformLocation>,
        transpose: bool,
        v: &[f32],
    ) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.uniform_matrix_2_f32_slice(location, transpose, v) }
    }

    fn uniform_matrix_3_f32_slice(
        &mut self,
        location: Option<&Self::UniformLocation>,
        transpose: bool,
        v: &[f32],
    ) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.uniform_matrix_3_f32_slice(location, transpose, v) }
    }

    fn uniform_matrix_4_f32_slice(
        &mut self,
        location: Option<&Self::UniformLocation>,
        transpose: bool,
        v: &[f32],
    ) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.uniform_matrix_4_f32_slice(location, transpose, v) }
    }

    fn vertex_attrib_1_f32(&mut self, index: u32, x: f32) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.vertex_attrib_1_f32(index, x) }
    }

    fn vertex_attrib_2_f32(&mut self, index: u32, x: f32, y: f32) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.vertex_attrib_2_f32(index, x, y) }
    }

    fn vertex_attrib_3_f32(&mut self, index: u32, x: f32, y: f32, z: f32) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.vertex_attrib_3_f32(index, x, y, z) }
    }

    fn vertex_attrib_4_f32(&mut self, index: u32, x: f32, y: f32, z: f32, w: f32) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.vertex_attrib_4_f32(index, x, y, z, w) }
    }

    fn enable_vertex_attrib_array(&mut self, index: u32) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.enable_vertex_attrib_array(index) }
    }

    fn disable_vertex_attrib_array(&mut self, index: u32) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.disable_vertex_attrib_array(index) }
    }

    fn vertex_attrib_pointer_f32(
        &mut self,
        index: u32,
        size: i32,
        data_type: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    ) {
        // SAFETY: see GlowContext::new
        unsafe {
            self.gl
                .vertex_attrib_pointer_f32(index, size, data_type, normalized, stride, offset)
        }
    }

    fn draw_arrays(&mut self, mode: u32, first: i32, count: i32) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.draw_arrays(mode, first, count) }
    }

    fn draw_elements(&mut self, mode: u32, count: i32, element_type: u32, offset: i32) {
        // SAFETY: see GlowContext::new
        unsafe { self.gl.draw_elements(mode, count, element_type, offset) }
    }
}
