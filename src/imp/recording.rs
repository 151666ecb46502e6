// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
A graphics context that records calls instead of issuing them.

[`RecordingContext`] hands out sequential handles, keeps just enough binding state to
answer the `get_parameter_*` queries, and appends every state-changing call to a log
of [`Call`] values.  It is the backend the crate's tests run against, and it is
useful anywhere the exact sequence of driver calls matters more than pixels.

```
use resources_and_state::imp::{Call, GraphicsContext, RecordingContext};
use resources_and_state::sys;

let mut gl = RecordingContext::new();
let buffer = gl.create_buffer();
gl.bind_buffer(sys::ARRAY_BUFFER, buffer);
assert_eq!(gl.calls().last(), Some(&Call::BindBuffer { target: sys::ARRAY_BUFFER, buffer }));
```
*/

use super::GraphicsContext;
use crate::sys;
use std::collections::{HashMap, HashSet};

/// Handles issued by [`RecordingContext`]. Zero is never issued.
pub type Handle = u32;

/// Which shader stage [`RecordingContext::fail_compile`] should reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderKind {
    Vertex,
    Fragment,
}

impl ShaderKind {
    fn from_gl(shader_type: u32) -> Option<ShaderKind> {
        match shader_type {
            sys::VERTEX_SHADER => Some(ShaderKind::Vertex),
            sys::FRAGMENT_SHADER => Some(ShaderKind::Fragment),
            _ => None,
        }
    }
}

/// One recorded call.  Queries are not recorded.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetExtension { name: String },
    CreateBuffer(Option<Handle>),
    DeleteBuffer(Handle),
    BindBuffer { target: u32, buffer: Option<Handle> },
    BufferDataSize { target: u32, size: i32, usage: u32 },
    BufferData { target: u32, data: Vec<u8>, usage: u32 },
    BufferSubData { target: u32, offset: i32, data: Vec<u8> },
    CreateTexture(Option<Handle>),
    DeleteTexture(Handle),
    BindTexture { target: u32, texture: Option<Handle> },
    ActiveTexture(u32),
    TexParameter { target: u32, parameter: u32, value: i32 },
    PixelStoreI32 { parameter: u32, value: i32 },
    PixelStoreBool { parameter: u32, value: bool },
    TexImage2D {
        target: u32,
        level: i32,
        internal_format: i32,
        width: i32,
        height: i32,
        format: u32,
        ty: u32,
        len: Option<usize>,
    },
    CompressedTexImage2D {
        target: u32,
        level: i32,
        internal_format: i32,
        width: i32,
        height: i32,
        len: usize,
    },
    TexSubImage2D {
        target: u32,
        level: i32,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        format: u32,
        ty: u32,
        len: usize,
    },
    CompressedTexSubImage2D {
        target: u32,
        level: i32,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        format: u32,
        len: usize,
    },
    GenerateMipmap(u32),
    CreateRenderbuffer(Option<Handle>),
    DeleteRenderbuffer(Handle),
    BindRenderbuffer { target: u32, renderbuffer: Option<Handle> },
    RenderbufferStorage { target: u32, internal_format: u32, width: i32, height: i32 },
    CreateFramebuffer(Option<Handle>),
    DeleteFramebuffer(Handle),
    BindFramebuffer { target: u32, framebuffer: Option<Handle> },
    FramebufferTexture2D {
        target: u32,
        attachment: u32,
        texture_target: u32,
        texture: Option<Handle>,
        level: i32,
    },
    FramebufferRenderbuffer {
        target: u32,
        attachment: u32,
        renderbuffer_target: u32,
        renderbuffer: Option<Handle>,
    },
    DrawBuffers(Vec<u32>),
    CreateShader { shader_type: u32, shader: Option<Handle> },
    ShaderSource { shader: Handle, source: String },
    CompileShader(Handle),
    DeleteShader(Handle),
    CreateProgram(Option<Handle>),
    AttachShader { program: Handle, shader: Handle },
    DetachShader { program: Handle, shader: Handle },
    BindAttribLocation { program: Handle, index: u32, name: String },
    LinkProgram(Handle),
    DeleteProgram(Handle),
    GetUniformLocation { program: Handle, name: String },
    UseProgram(Option<Handle>),
    Enable(u32),
    Disable(u32),
    BlendEquationSeparate { mode_rgb: u32, mode_alpha: u32 },
    BlendFuncSeparate { src_rgb: u32, dst_rgb: u32, src_alpha: u32, dst_alpha: u32 },
    BlendColor([f32; 4]),
    ClearColor([f32; 4]),
    ClearDepth(f32),
    ClearStencil(i32),
    Clear(u32),
    CullFace(u32),
    FrontFace(u32),
    Scissor { x: i32, y: i32, width: i32, height: i32 },
    Viewport { x: i32, y: i32, width: i32, height: i32 },
    DepthRange { near: f32, far: f32 },
    PolygonOffset { factor: f32, units: f32 },
    SampleCoverage { value: f32, invert: bool },
    LineWidth(f32),
    ColorMask([bool; 4]),
    DepthMask(bool),
    DepthFunc(u32),
    StencilFuncSeparate { face: u32, function: u32, reference: i32, mask: u32 },
    StencilOpSeparate { face: u32, fail: u32, depth_fail: u32, pass: u32 },
    StencilMaskSeparate { face: u32, mask: u32 },
    UniformF32 { location: Option<Handle>, values: Vec<f32> },
    UniformI32 { location: Option<Handle>, values: Vec<i32> },
    UniformMatrix { location: Option<Handle>, columns: u32, transpose: bool, values: Vec<f32> },
    VertexAttrib { index: u32, values: Vec<f32> },
    EnableVertexAttribArray(u32),
    DisableVertexAttribArray(u32),
    VertexAttribPointer {
        index: u32,
        size: i32,
        data_type: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    },
    DrawArrays { mode: u32, first: i32, count: i32 },
    DrawElements { mode: u32, count: i32, element_type: u32, offset: i32 },
}

impl Call {
    /// True for calls that create or destroy objects, bind them, or change fixed-function state.
    ///
    /// Uploads, draws and uniform transfers are not state calls.
    pub fn is_state_call(&self) -> bool {
        !matches!(
            self,
            Call::BufferData { .. }
                | Call::BufferDataSize { .. }
                | Call::BufferSubData { .. }
                | Call::TexImage2D { .. }
                | Call::CompressedTexImage2D { .. }
                | Call::TexSubImage2D { .. }
                | Call::CompressedTexSubImage2D { .. }
                | Call::UniformF32 { .. }
                | Call::UniformI32 { .. }
                | Call::UniformMatrix { .. }
                | Call::DrawArrays { .. }
                | Call::DrawElements { .. }
                | Call::Clear(_)
        )
    }
}

#[derive(Debug, Default)]
struct ShaderRecord {
    kind: Option<ShaderKind>,
    compiled: bool,
}

/// See the module documentation.
#[derive(Debug)]
pub struct RecordingContext {
    calls: Vec<Call>,
    next_handle: Handle,
    lost: bool,
    fail_allocations: bool,
    fail_compile: Option<ShaderKind>,
    fail_link: bool,
    info_log: String,
    supported: Vec<String>,
    enabled: HashSet<String>,
    shaders: HashMap<Handle, ShaderRecord>,
    linked: HashSet<Handle>,
    array_buffer: Option<Handle>,
    element_buffer: Option<Handle>,
    renderbuffer: Option<Handle>,
    framebuffer: Option<Handle>,
    active_unit: u32,
    textures_2d: HashMap<u32, Handle>,
    textures_cube: HashMap<u32, Handle>,
}

impl Default for RecordingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingContext {
    /// A fresh context with no extensions and no failures armed.
    pub fn new() -> Self {
        RecordingContext {
            calls: Vec::new(),
            next_handle: 1,
            lost: false,
            fail_allocations: false,
            fail_compile: None,
            fail_link: false,
            info_log: String::from("error: simulated failure"),
            supported: Vec::new(),
            enabled: HashSet::new(),
            shaders: HashMap::new(),
            linked: HashSet::new(),
            array_buffer: None,
            element_buffer: None,
            renderbuffer: None,
            framebuffer: None,
            active_unit: 0,
            textures_2d: HashMap::new(),
            textures_cube: HashMap::new(),
        }
    }

    /// Every call recorded so far, oldest first.
    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    /// Returns the recorded calls and starts a new log.
    pub fn take_calls(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.calls)
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Number of recorded calls matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| predicate(c)).count()
    }

    /// Number of recorded calls for which [`Call::is_state_call`] holds.
    pub fn state_call_count(&self) -> usize {
        self.count(Call::is_state_call)
    }

    /// Simulates a context-loss event.  Creation calls fail until [`Self::restore_context`].
    pub fn lose_context(&mut self) {
        self.lost = true;
    }

    /// Ends a simulated loss.  Binding state starts over, as it would on a new context.
    pub fn restore_context(&mut self) {
        self.lost = false;
        self.array_buffer = None;
        self.element_buffer = None;
        self.renderbuffer = None;
        self.framebuffer = None;
        self.active_unit = 0;
        self.textures_2d.clear();
        self.textures_cube.clear();
        self.shaders.clear();
        self.linked.clear();
    }

    /// While set, every `create_*` call returns `None`.
    pub fn fail_allocations(&mut self, fail: bool) {
        self.fail_allocations = fail;
    }

    /// Shaders of `kind` compile unsuccessfully until reset with `None`.
    pub fn fail_compile(&mut self, kind: Option<ShaderKind>) {
        self.fail_compile = kind;
    }

    pub fn fail_link(&mut self, fail: bool) {
        self.fail_link = fail;
    }

    /// Info log returned for failed compiles and links.
    pub fn set_info_log(&mut self, log: impl Into<String>) {
        self.info_log = log.into();
    }

    /// Advertises an extension by its full (possibly vendor-prefixed) name.
    pub fn add_extension(&mut self, name: impl Into<String>) {
        self.supported.push(name.into());
    }

    /// Whether [`GraphicsContext::get_extension`] has enabled `name`.
    pub fn is_extension_enabled(&self, name: &str) -> bool {
        self.enabled.contains(name)
    }

    /// The texture the context has bound to `target` on `unit`.
    pub fn texture_binding(&self, unit: u32, target: u32) -> Option<Handle> {
        match target {
            sys::TEXTURE_CUBE_MAP => self.textures_cube.get(&unit).copied(),
            _ => self.textures_2d.get(&unit).copied(),
        }
    }

    pub fn active_unit(&self) -> u32 {
        self.active_unit
    }

    fn allocate(&mut self) -> Option<Handle> {
        if self.lost || self.fail_allocations {
            return None;
        }
        let handle = self.next_handle;
        self.next_handle += 1;
        Some(handle)
    }

    fn record(&mut self, call: Call) {
        self.calls.push(call);
    }
}

impl GraphicsContext for RecordingContext {
    type Buffer = Handle;
    type Texture = Handle;
    type Renderbuffer = Handle;
    type Framebuffer = Handle;
    type Shader = Handle;
    type Program = Handle;
    type UniformLocation = Handle;

    fn is_context_lost(&self) -> bool {
        self.lost
    }

    fn supported_extensions(&self) -> Vec<String> {
        if self.lost {
            return Vec::new();
        }
        self.supported.clone()
    }

    fn get_extension(&mut self, name: &str) -> bool {
        self.record(Call::GetExtension { name: name.to_owned() });
        if self.lost || !self.supported.iter().any(|s| s == name) {
            return false;
        }
        self.enabled.insert(name.to_owned());
        true
    }

    fn get_parameter_buffer(&self, parameter: u32) -> Option<Handle> {
        match parameter {
            sys::ARRAY_BUFFER_BINDING => self.array_buffer,
            sys::ELEMENT_ARRAY_BUFFER_BINDING => self.element_buffer,
            _ => None,
        }
    }

    fn get_parameter_texture(&self, parameter: u32) -> Option<Handle> {
        match parameter {
            sys::TEXTURE_BINDING_2D => self.texture_binding(self.active_unit, sys::TEXTURE_2D),
            sys::TEXTURE_BINDING_CUBE_MAP => {
                self.texture_binding(self.active_unit, sys::TEXTURE_CUBE_MAP)
            }
            _ => None,
        }
    }

    fn get_parameter_renderbuffer(&self, parameter: u32) -> Option<Handle> {
        match parameter {
            sys::RENDERBUFFER_BINDING => self.renderbuffer,
            _ => None,
        }
    }

    fn get_parameter_framebuffer(&self, parameter: u32) -> Option<Handle> {
        match parameter {
            sys::FRAMEBUFFER_BINDING => self.framebuffer,
            _ => None,
        }
    }

    fn create_buffer(&mut self) -> Option<Handle> {
        let handle = self.allocate();
        self.record(Call::CreateBuffer(handle));
        handle
    }

    fn delete_buffer(&mut self, buffer: Handle) {
        if self.array_buffer == Some(buffer) {
            self.array_buffer = None;
        }
        if self.element_buffer == Some(buffer) {
            self.element_buffer = None;
        }
        self.record(Call::DeleteBuffer(buffer));
    }

    fn bind_buffer(&mut self, target: u32, buffer: Option<Handle>) {
        match target {
            sys::ARRAY_BUFFER => self.array_buffer = buffer,
            sys::ELEMENT_ARRAY_BUFFER => self.element_buffer = buffer,
            _ => {}
        }
        self.record(Call::BindBuffer { target, buffer });
    }

    fn buffer_data_size(&mut self, target: u32, size: i32, usage: u32) {
        self.record(Call::BufferDataSize { target, size, usage });
    }

    fn buffer_data_u8_slice(&mut self, target: u32, data: &[u8], usage: u32) {
        self.record(Call::BufferData {
            target,
            data: data.to_vec(),
            usage,
        });
    }

    fn buffer_sub_data_u8_slice(&mut self, target: u32, offset: i32, data: &[u8]) {
        self.record(Call::BufferSubData {
            target,
            offset,
            data: data.to_vec(),
        });
    }

    fn create_texture(&mut self) -> Option<Handle> {
        let handle = self.allocate();
        self.record(Call::CreateTexture(handle));
        handle
    }

    fn delete_texture(&mut self, texture: Handle) {
        self.textures_2d.retain(|_, t| *t != texture);
        self.textures_cube.retain(|_, t| *t != texture);
        self.record(Call::DeleteTexture(texture));
    }

    fn bind_texture(&mut self, target: u32, texture: Option<Handle>) {
        let slots = match target {
            sys::TEXTURE_CUBE_MAP => &mut self.textures_cube,
            _ => &mut self.textures_2d,
        };
        match texture {
            Some(t) => {
                slots.insert(self.active_unit, t);
            }
            None => {
                slots.remove(&self.active_unit);
            }
        }
        self.record(Call::BindTexture { target, texture });
    }

    fn active_texture(&mut self, unit: u32) {
        self.active_unit = unit.saturating_sub(sys::TEXTURE0);
        self.record(Call::ActiveTexture(unit));
    }

    fn tex_parameter_i32(&mut self, target: u32, parameter: u32, value: i32) {
        self.record(Call::TexParameter {
            target,
            parameter,
            value,
        });
    }

    fn pixel_store_i32(&mut self, parameter: u32, value: i32) {
        self.record(Call::PixelStoreI32 { parameter, value });
    }

    fn pixel_store_bool(&mut self, parameter: u32, value: bool) {
        self.record(Call::PixelStoreBool { parameter, value });
    }

    fn tex_image_2d(
        &mut self,
        target: u32,
        level: i32,
        internal_format: i32,
        width: i32,
        height: i32,
        _border: i32,
        format: u32,
        ty: u32,
        pixels: Option<&[u8]>,
    ) {
        self.record(Call::TexImage2D {
            target,
            level,
            internal_format,
            width,
            height,
            format,
            ty,
            len: pixels.map(<[u8]>::len),
        });
    }

    fn compressed_tex_image_2d(
        &mut self,
        target: u32,
        level: i32,
        internal_format: i32,
        width: i32,
        height: i32,
        _border: i32,
        pixels: &[u8],
    ) {
        self.record(Call::CompressedTexImage2D {
            target,
            level,
            internal_format,
            width,
            height,
            len: pixels.len(),
        });
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
        self.record(Call::TexSubImage2D {
            target,
            level,
            x: x_offset,
            y: y_offset,
            width,
            height,
            format,
            ty,
            len: pixels.len(),
        });
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
        self.record(Call::CompressedTexSubImage2D {
            target,
            level,
            x: x_offset,
            y: y_offset,
            width,
            height,
            format,
            len: pixels.len(),
        });
    }

    fn generate_mipmap(&mut self, target: u32) {
        self.record(Call::GenerateMipmap(target));
    }

    fn create_renderbuffer(&mut self) -> Option<Handle> {
        let handle = self.allocate();
        self.record(Call::CreateRenderbuffer(handle));
        handle
    }

    fn delete_renderbuffer(&mut self, renderbuffer: Handle) {
        if self.renderbuffer == Some(renderbuffer) {
            self.renderbuffer = None;
        }
        self.record(Call::DeleteRenderbuffer(renderbuffer));
    }

    fn bind_renderbuffer(&mut self, target: u32, renderbuffer: Option<Handle>) {
        self.renderbuffer = renderbuffer;
        self.record(Call::BindRenderbuffer {
            target,
            renderbuffer,
        });
    }

    fn renderbuffer_storage(&mut self, target: u32, internal_format: u32, width: i32, height: i32) {
        self.record(Call::RenderbufferStorage {
            target,
            internal_format,
            width,
            height,
        });
    }

    fn create_framebuffer(&mut self) -> Option<Handle> {
        let handle = self.allocate();
        self.record(Call::CreateFramebuffer(handle));
        handle
    }

    fn delete_framebuffer(&mut self, framebuffer: Handle) {
        if self.framebuffer == Some(framebuffer) {
            self.framebuffer = None;
        }
        self.record(Call::DeleteFramebuffer(framebuffer));
    }

    fn bind_framebuffer(&mut self, target: u32, framebuffer: Option<Handle>) {
        self.framebuffer = framebuffer;
        self.record(Call::BindFramebuffer {
            target,
            framebuffer,
        });
    }

    fn framebuffer_texture_2d(
        &mut self,
        target: u32,
        attachment: u32,
        texture_target: u32,
        texture: Option<Handle>,
        level: i32,
    ) {
        self.record(Call::FramebufferTexture2D {
            target,
            attachment,
            texture_target,
            texture,
            level,
        });
    }

    fn framebuffer_renderbuffer(
        &mut self,
        target: u32,
        attachment: u32,
        renderbuffer_target: u32,
        renderbuffer: Option<Handle>,
    ) {
        self.record(Call::FramebufferRenderbuffer {
            target,
            attachment,
            renderbuffer_target,
            renderbuffer,
        });
    }

    fn draw_buffers(&mut self, buffers: &[u32]) {
        self.record(Call::DrawBuffers(buffers.to_vec()));
    }

    fn create_shader(&mut self, shader_type: u32) -> Option<Handle> {
        let shader = self.allocate();
        if let Some(handle) = shader {
            self.shaders.insert(
                handle,
                ShaderRecord {
                    kind: ShaderKind::from_gl(shader_type),
                    compiled: false,
                },
            );
        }
        self.record(Call::CreateShader {
            shader_type,
            shader,
        });
        shader
    }

    fn shader_source(&mut self, shader: Handle, source: &str) {
        self.record(Call::ShaderSource {
            shader,
            source: source.to_owned(),
        });
    }

    fn compile_shader(&mut self, shader: Handle) {
        let lost = self.lost;
        let failing = self.fail_compile;
        if let Some(record) = self.shaders.get_mut(&shader) {
            record.compiled = !lost && (failing.is_none() || record.kind != failing);
        }
        self.record(Call::CompileShader(shader));
    }

    fn get_shader_compile_status(&self, shader: Handle) -> bool {
        self.shaders.get(&shader).is_some_and(|s| s.compiled)
    }

    fn get_shader_info_log(&self, shader: Handle) -> String {
        if self.get_shader_compile_status(shader) {
            String::new()
        } else {
            self.info_log.clone()
        }
    }

    fn delete_shader(&mut self, shader: Handle) {
        self.shaders.remove(&shader);
        self.record(Call::DeleteShader(shader));
    }

    fn create_program(&mut self) -> Option<Handle> {
        let handle = self.allocate();
        self.record(Call::CreateProgram(handle));
        handle
    }

    fn attach_shader(&mut self, program: Handle, shader: Handle) {
        self.record(Call::AttachShader { program, shader });
    }

    fn detach_shader(&mut self, program: Handle, shader: Handle) {
        self.record(Call::DetachShader { program, shader });
    }

    fn bind_attrib_location(&mut self, program: Handle, index: u32, name: &str) {
        self.record(Call::BindAttribLocation {
            program,
            index,
            name: name.to_owned(),
        });
    }

    fn link_program(&mut self, program: Handle) {
        if !self.lost && !self.fail_link {
            self.linked.insert(program);
        }
        self.record(Call::LinkProgram(program));
    }

    fn get_program_link_status(&self, program: Handle) -> bool {
        self.linked.contains(&program)
    }

    fn get_program_info_log(&self, program: Handle) -> String {
        if self.linked.contains(&program) {
            String::new()
        } else {
            self.info_log.clone()
        }
    }

    fn delete_program(&mut self, program: Handle) {
        self.linked.remove(&program);
        self.record(Call::DeleteProgram(program));
    }

    fn get_uniform_location(&mut self, program: Handle, name: &str) -> Option<Handle> {
        self.record(Call::GetUniformLocation {
            program,
            name: name.to_owned(),
        });
        if self.lost {
            return None;
        }
        let location = self.next_handle;
        self.next_handle += 1;
        Some(location)
    }

    fn use_program(&mut self, program: Option<Handle>) {
        self.record(Call::UseProgram(program));
    }

    fn enable(&mut self, capability: u32) {
        self.record(Call::Enable(capability));
    }

    fn disable(&mut self, capability: u32) {
        self.record(Call::Disable(capability));
    }

    fn blend_equation_separate(&mut self, mode_rgb: u32, mode_alpha: u32) {
        self.record(Call::BlendEquationSeparate {
            mode_rgb,
            mode_alpha,
        });
    }

    fn blend_func_separate(&mut self, src_rgb: u32, dst_rgb: u32, src_alpha: u32, dst_alpha: u32) {
        self.record(Call::BlendFuncSeparate {
            src_rgb,
            dst_rgb,
            src_alpha,
            dst_alpha,
        });
    }

    fn blend_color(&mut self, red: f32, green: f32, blue: f32, alpha: f32) {
        self.record(Call::BlendColor([red, green, blue, alpha]));
    }

    fn clear_color(&mut self, red: f32, green: f32, blue: f32, alpha: f32) {
        self.record(Call::ClearColor([red, green, blue, alpha]));
    }

    fn clear_depth_f32(&mut self, depth: f32) {
        self.record(Call::ClearDepth(depth));
    }

    fn clear_stencil(&mut self, stencil: i32) {
        self.record(Call::ClearStencil(stencil));
    }

    fn clear(&mut self, mask: u32) {
        self.record(Call::Clear(mask));
    }

    fn cull_face(&mut self, face: u32) {
        self.record(Call::CullFace(face));
    }

    fn front_face(&mut self, winding: u32) {
        self.record(Call::FrontFace(winding));
    }

    fn scissor(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.record(Call::Scissor {
            x,
            y,
            width,
            height,
        });
    }

    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.record(Call::Viewport {
            x,
            y,
            width,
            height,
        });
    }

    fn depth_range_f32(&mut self, near: f32, far: f32) {
        self.record(Call::DepthRange { near, far });
    }

    fn polygon_offset(&mut self, factor: f32, units: f32) {
        self.record(Call::PolygonOffset { factor, units });
    }

    fn sample_coverage(&mut self, value: f32, invert: bool) {
        self.record(Call::SampleCoverage { value, invert });
    }

    fn line_width(&mut self, width: f32) {
        self.record(Call::LineWidth(width));
    }

    fn color_mask(&mut self, red: bool, green: bool, blue: bool, alpha: bool) {
        self.record(Call::ColorMask([red, green, blue, alpha]));
    }

    fn depth_mask(&mut self, enabled: bool) {
        self.record(Call::DepthMask(enabled));
    }

    fn depth_func(&mut self, function: u32) {
        self.record(Call::DepthFunc(function));
    }

    fn stencil_func_separate(&mut self, face: u32, function: u32, reference: i32, mask: u32) {
        self.record(Call::StencilFuncSeparate {
            face,
            function,
            reference,
            mask,
        });
    }

    fn stencil_op_separate(&mut self, face: u32, fail: u32, depth_fail: u32, pass: u32) {
        self.record(Call::StencilOpSeparate {
            face,
            fail,
            depth_fail,
            pass,
        });
    }

    fn stencil_mask_separate(&mut self, face: u32, mask: u32) {
        self.record(Call::StencilMaskSeparate { face, mask });
    }

    fn uniform_1_f32(&mut self, location: Option<&Handle>, x: f32) {
        self.record(Call::UniformF32 {
            location: location.copied(),
            values: vec![x],
        });
    }

    fn uniform_2_f32_slice(&mut self, location: Option<&Handle>, v: &[f32]) {
        self.record(Call::UniformF32 {
            location: location.copied(),
            values: v.to_vec(),
        });
    }

    fn uniform_3_f32_slice(&mut self, location: Option<&Handle>, v: &[f32]) {
        self.record(Call::UniformF32 {
            location: location.copied(),
            values: v.to_vec(),
        });
    }

    fn uniform_4_f32_slice(&mut self, location: Option<&Handle>, v: &[f32]) {
        self.record(Call::UniformF32 {
            location: location.copied(),
            values: v.to_vec(),
        });
    }

    fn uniform_1_i32(&mut self, location: Option<&Handle>, x: i32) {
        self.record(Call::UniformI32 {
            location: location.copied(),
            values: vec![x],
        });
    }

    fn uniform_2_i32_slice(&mut self, location: Option<&Handle>, v: &[i32]) {
        self.record(Call::UniformI32 {
            location: location.copied(),
            values: v.to_vec(),
        });
    }

    fn uniform_3_i32_slice(&mut self, location: Option<&Handle>, v: &[i32]) {
        self.record(Call::UniformI32 {
            location: location.copied(),
            values: v.to_vec(),
        });
    }

    fn uniform_4_i32_slice(&mut self, location: Option<&Handle>, v: &[i32]) {
        self.record(Call::UniformI32 {
            location: location.copied(),
            values: v.to_vec(),
        });
    }

    fn uniform_matrix_2_f32_slice(&mut self, location: Option<&Handle>, transpose: bool, v: &[f32]) {
        self.record(Call::UniformMatrix {
            location: location.copied(),
            columns: 2,
            transpose,
            values: v.to_vec(),
        });
    }

    fn uniform_matrix_3_f32_slice(&mut self, location: Option<&Handle>, transpose: bool, v: &[f32]) {
        self.record(Call::UniformMatrix {
            location: location.copied(),
            columns: 3,
            transpose,
            values: v.to_vec(),
        });
    }

    fn uniform_matrix_4_f32_slice(&mut self, location: Option<&Handle>, transpose: bool, v: &[f32]) {
        self.record(Call::UniformMatrix {
            location: location.copied(),
            columns: 4,
            transpose,
            values: v.to_vec(),
        });
    }

    fn vertex_attrib_1_f32(&mut self, index: u32, x: f32) {
        self.record(Call::VertexAttrib {
            index,
            values: vec![x],
        });
    }

    fn vertex_attrib_2_f32(&mut self, index: u32, x: f32, y: f32) {
        self.record(Call::VertexAttrib {
            index,
            values: vec![x, y],
        });
    }

    fn vertex_attrib_3_f32(&mut self, index: u32, x: f32, y: f32, z: f32) {
        self.record(Call::VertexAttrib {
            index,
            values: vec![x, y, z],
        });
    }

    fn vertex_attrib_4_f32(&mut self, index: u32, x: f32, y: f32, z: f32, w: f32) {
        self.record(Call::VertexAttrib {
            index,
            values: vec![x, y, z, w],
        });
    }

    fn enable_vertex_attrib_array(&mut self, index: u32) {
        self.record(Call::EnableVertexAttribArray(index));
    }

    fn disable_vertex_attrib_array(&mut self, index: u32) {
        self.record(Call::DisableVertexAttribArray(index));
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
        self.record(Call::VertexAttribPointer {
            index,
            size,
            data_type,
            normalized,
            stride,
            offset,
        });
    }

    fn draw_arrays(&mut self, mode: u32, first: i32, count: i32) {
        self.record(Call::DrawArrays { mode, first, count });
    }

    fn draw_elements(&mut self, mode: u32, count: i32, element_type: u32, offset: i32) {
        self.record(Call::DrawElements {
            mode,
            count,
            element_type,
            offset,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_start_at_one_and_fail_when_lost() {
        let mut gl = RecordingContext::new();
        assert_eq!(gl.create_buffer(), Some(1));
        assert_eq!(gl.create_texture(), Some(2));
        gl.lose_context();
        assert_eq!(gl.create_framebuffer(), None);
        gl.restore_context();
        assert_eq!(gl.create_framebuffer(), Some(3));
    }

    #[test]
    fn binding_queries_follow_the_active_unit() {
        let mut gl = RecordingContext::new();
        gl.active_texture(sys::TEXTURE0 + 3);
        gl.bind_texture(sys::TEXTURE_2D, Some(7));
        assert_eq!(gl.get_parameter_texture(sys::TEXTURE_BINDING_2D), Some(7));
        gl.active_texture(sys::TEXTURE0);
        assert_eq!(gl.get_parameter_texture(sys::TEXTURE_BINDING_2D), None);
        assert_eq!(gl.texture_binding(3, sys::TEXTURE_2D), Some(7));
    }

    #[test]
    fn compile_failure_targets_one_stage() {
        let mut gl = RecordingContext::new();
        gl.fail_compile(Some(ShaderKind::Fragment));
        let vs = gl.create_shader(sys::VERTEX_SHADER).unwrap();
        let fs = gl.create_shader(sys::FRAGMENT_SHADER).unwrap();
        gl.compile_shader(vs);
        gl.compile_shader(fs);
        assert!(gl.get_shader_compile_status(vs));
        assert!(!gl.get_shader_compile_status(fs));
        assert_eq!(gl.get_shader_info_log(fs), "error: simulated failure");
    }

    #[test]
    fn extensions_must_be_advertised() {
        let mut gl = RecordingContext::new();
        gl.add_extension("WEBKIT_WEBGL_draw_buffers");
        assert!(!gl.get_extension("WEBGL_draw_buffers"));
        assert!(gl.get_extension("WEBKIT_WEBGL_draw_buffers"));
        assert!(gl.is_extension_enabled("WEBKIT_WEBGL_draw_buffers"));
    }
}
