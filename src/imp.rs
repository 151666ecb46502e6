// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! The graphics context collaborator and its backends.
//!
//! Everything in this crate that touches the GPU does so through [`GraphicsContext`].
//! Method names follow the glow crate so a glow-based backend is a thin forwarding
//! layer; enumerants are passed as raw `u32` values taken from [`crate::sys`].
//!
//! Two backends ship with the crate:
//!
//! * [`RecordingContext`] keeps every call in memory.  It is always built and is what
//!   the tests drive.
//! * `GlowContext` (feature `backend_glow`) forwards to a live `glow::Context`.

use std::fmt::Debug;

mod recording;
pub use recording::*;

#[cfg(feature = "backend_glow")]
mod glow;
#[cfg(feature = "backend_glow")]
pub use self::glow::GlowContext;

/// An immediate-mode graphics API.
///
/// Handles are opaque and compared by identity.  Creation functions return `None`
/// when the context cannot allocate, which includes the lost-context case.
pub trait GraphicsContext {
    type Buffer: Copy + Eq + Debug;
    type Texture: Copy + Eq + Debug;
    type Renderbuffer: Copy + Eq + Debug;
    type Framebuffer: Copy + Eq + Debug;
    type Shader: Copy + Eq + Debug;
    type Program: Copy + Eq + Debug;
    type UniformLocation: Clone + Debug;

    // queries
    fn is_context_lost(&self) -> bool;
    fn supported_extensions(&self) -> Vec<String>;
    /// Enables `name` if the context supports it.
    fn get_extension(&mut self, name: &str) -> bool;
    fn get_parameter_buffer(&self, parameter: u32) -> Option<Self::Buffer>;
    fn get_parameter_texture(&self, parameter: u32) -> Option<Self::Texture>;
    fn get_parameter_renderbuffer(&self, parameter: u32) -> Option<Self::Renderbuffer>;
    fn get_parameter_framebuffer(&self, parameter: u32) -> Option<Self::Framebuffer>;

    // buffers
    fn create_buffer(&mut self) -> Option<Self::Buffer>;
    fn delete_buffer(&mut self, buffer: Self::Buffer);
    fn bind_buffer(&mut self, target: u32, buffer: Option<Self::Buffer>);
    fn buffer_data_size(&mut self, target: u32, size: i32, usage: u32);
    fn buffer_data_u8_slice(&mut self, target: u32, data: &[u8], usage: u32);
    fn buffer_sub_data_u8_slice(&mut self, target: u32, offset: i32, data: &[u8]);

    // textures
    fn create_texture(&mut self) -> Option<Self::Texture>;
    fn delete_texture(&mut self, texture: Self::Texture);
    fn bind_texture(&mut self, target: u32, texture: Option<Self::Texture>);
    fn active_texture(&mut self, unit: u32);
    fn tex_parameter_i32(&mut self, target: u32, parameter: u32, value: i32);
    fn pixel_store_i32(&mut self, parameter: u32, value: i32);
    fn pixel_store_bool(&mut self, parameter: u32, value: bool);
    #[allow(clippy::too_many_arguments)]
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
    );
    #[allow(clippy::too_many_arguments)]
    fn compressed_tex_image_2d(
        &mut self,
        target: u32,
        level: i32,
        internal_format: i32,
        width: i32,
        height: i32,
        border: i32,
        pixels: &[u8],
    );
    #[allow(clippy::too_many_arguments)]
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
    );
    #[allow(clippy::too_many_arguments)]
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
    );
    fn generate_mipmap(&mut self, target: u32);

    // renderbuffers
    fn create_renderbuffer(&mut self) -> Option<Self::Renderbuffer>;
    fn delete_renderbuffer(&mut self, renderbuffer: Self::Renderbuffer);
    fn bind_renderbuffer(&mut self, target: u32, renderbuffer: Option<Self::Renderbuffer>);
    fn renderbuffer_storage(&mut self, target: u32, internal_format: u32, width: i32, height: i32);

    // framebuffers
    fn create_framebuffer(&mut self) -> Option<Self::Framebuffer>;
    fn delete_framebuffer(&mut self, framebuffer: Self::Framebuffer);
    fn bind_framebuffer(&mut self, target: u32, framebuffer: Option<Self::Framebuffer>);
    fn framebuffer_texture_2d(
        &mut self,
        target: u32,
        attachment: u32,
        texture_target: u32,
        texture: Option<Self::Texture>,
        level: i32,
    );
    fn framebuffer_renderbuffer(
        &mut self,
        target: u32,
        attachment: u32,
        renderbuffer_target: u32,
        renderbuffer: Option<Self::Renderbuffer>,
    );
    fn draw_buffers(&mut self, buffers: &[u32]);

    // shaders and programs
    fn create_shader(&mut self, shader_type: u32) -> Option<Self::Shader>;
    fn shader_source(&mut self, shader: Self::Shader, source: &str);
    fn compile_shader(&mut self, shader: Self::Shader);
    fn get_shader_compile_status(&self, shader: Self::Shader) -> bool;
    fn get_shader_info_log(&self, shader: Self::Shader) -> String;
    fn delete_shader(&mut self, shader: Self::Shader);
    fn create_program(&mut self) -> Option<Self::Program>;
    fn attach_shader(&mut self, program: Self::Program, shader: Self::Shader);
    fn detach_shader(&mut self, program: Self::Program, shader: Self::Shader);
    fn bind_attrib_location(&mut self, program: Self::Program, index: u32, name: &str);
    fn link_program(&mut self, program: Self::Program);
    fn get_program_link_status(&self, program: Self::Program) -> bool;
    fn get_program_info_log(&self, program: Self::Program) -> String;
    fn delete_program(&mut self, program: Self::Program);
    fn get_uniform_location(
        &mut self,
        program: Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation>;
    fn use_program(&mut self, program: Option<Self::Program>);

    // fixed-function state
    fn enable(&mut self, capability: u32);
    fn disable(&mut self, capability: u32);
    fn blend_equation_separate(&mut self, mode_rgb: u32, mode_alpha: u32);
    fn blend_func_separate(&mut self, src_rgb: u32, dst_rgb: u32, src_alpha: u32, dst_alpha: u32);
    fn blend_color(&mut self, red: f32, green: f32, blue: f32, alpha: f32);
    fn clear_color(&mut self, red: f32, green: f32, blue: f32, alpha: f32);
    fn clear_depth_f32(&mut self, depth: f32);
    fn clear_stencil(&mut self, stencil: i32);
    fn clear(&mut self, mask: u32);
    fn cull_face(&mut self, face: u32);
    fn front_face(&mut self, winding: u32);
    fn scissor(&mut self, x: i32, y: i32, width: i32, height: i32);
    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32);
    fn depth_range_f32(&mut self, near: f32, far: f32);
    fn polygon_offset(&mut self, factor: f32, units: f32);
    fn sample_coverage(&mut self, value: f32, invert: bool);
    fn line_width(&mut self, width: f32);
    fn color_mask(&mut self, red: bool, green: bool, blue: bool, alpha: bool);
    fn depth_mask(&mut self, enabled: bool);
    fn depth_func(&mut self, function: u32);
    fn stencil_func_separate(&mut self, face: u32, function: u32, reference: i32, mask: u32);
    fn stencil_op_separate(&mut self, face: u32, fail: u32, depth_fail: u32, pass: u32);
    fn stencil_mask_separate(&mut self, face: u32, mask: u32);

    // uniforms
    fn uniform_1_f32(&mut self, location: Option<&Self::UniformLocation>, x: f32);
    fn uniform_2_f32_slice(&mut self, location: Option<&Self::UniformLocation>, v: &[f32]);
    fn uniform_3_f32_slice(&mut self, location: Option<&Self::UniformLocation>, v: &[f32]);
    fn uniform_4_f32_slice(&mut self, location: Option<&Self::UniformLocation>, v: &[f32]);
    fn uniform_1_i32(&mut self, location: Option<&Self::UniformLocation>, x: i32);
    fn uniform_2_i32_slice(&mut self, location: Option<&Self::UniformLocation>, v: &[i32]);
    fn uniform_3_i32_slice(&mut self, location: Option<&Self::UniformLocation>, v: &[i32]);
    fn uniform_4_i32_slice(&mut self, location: Option<&Self::UniformLocation>, v: &[i32]);
    fn uniform_matrix_2_f32_slice(
        &mut self,
        location: Option<&Self::UniformLocation>,
        transpose: bool,
        v: &[f32],
    );
    fn uniform_matrix_3_f32_slice(
        &mut self,
        location: Option<&Self::UniformLocation>,
        transpose: bool,
        v: &[f32],
    );
    fn uniform_matrix_4_f32_slice(
        &mut self,
        location: Option<&Self::UniformLocation>,
        transpose: bool,
        v: &[f32],
    );

    // vertex attributes
    fn vertex_attrib_1_f32(&mut self, index: u32, x: f32);
    fn vertex_attrib_2_f32(&mut self, index: u32, x: f32, y: f32);
    fn vertex_attrib_3_f32(&mut self, index: u32, x: f32, y: f32, z: f32);
    fn vertex_attrib_4_f32(&mut self, index: u32, x: f32, y: f32, z: f32, w: f32);
    fn enable_vertex_attrib_array(&mut self, index: u32);
    fn disable_vertex_attrib_array(&mut self, index: u32);
    fn vertex_attrib_pointer_f32(
        &mut self,
        index: u32,
        size: i32,
        data_type: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    );

    // submission
    fn draw_arrays(&mut self, mode: u32, first: i32, count: i32);
    fn draw_elements(&mut self, mode: u32, count: i32, element_type: u32, offset: i32);
}
