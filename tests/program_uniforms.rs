// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
use resources_and_state::bindings::buffer::{Buffer, BufferAttributes};
use resources_and_state::bindings::program::{Program, ProgramAttributes};
use resources_and_state::bindings::resource::Resource;
use resources_and_state::bindings::texture::Texture;
use resources_and_state::bindings::texture_builder::LevelChain;
use resources_and_state::bindings::visible_to::BufferUsage;
use resources_and_state::diagnostics::{OwnedReport, Stage};
use resources_and_state::images::draw_context::{DrawContext, IndexType, UniformValue};
use resources_and_state::images::vertex_layout::{element_size, DataType, Field};
use resources_and_state::imp::{Call, RecordingContext};
use resources_and_state::{sys, Error};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_test::wasm_bindgen_test as test;

const VERTEX: &str = "
attribute vec3 aPosition;
attribute vec2 aTexCoord;
uniform mat4 uModelViewProjection;
uniform vec3 uLightDirection;
void main() {}
";

const FRAGMENT: &str = "
uniform sampler2D uDiffuse;
uniform sampler2D uDetail;
uniform float uExposure;
uniform ivec2 uTiles;
void main() {}
";

fn program(dc: &mut DrawContext<RecordingContext>) -> Program<RecordingContext> {
    let mut program = Program::new();
    program.specify_attributes(ProgramAttributes {
        vertex_shader: VERTEX.into(),
        fragment_shader: FRAGMENT.into(),
    });
    program.create_backing_resources(dc.gl_mut(), None).unwrap();
    program
}

fn texture(dc: &mut DrawContext<RecordingContext>) -> Texture<RecordingContext> {
    let mut texture = Texture::new();
    texture.specify_attributes(LevelChain::new(16, 16).attributes());
    texture.create_backing_resources(dc.gl_mut(), None).unwrap();
    texture
}

#[test]
fn reflected_tables() {
    let mut dc = DrawContext::new(RecordingContext::new());
    let program = program(&mut dc);
    let linkage = program.linkage().unwrap();
    assert_eq!(linkage.attribute_names(), &["aPosition", "aTexCoord"]);
    assert_eq!(linkage.attribute_index("aTexCoord"), Some(1));
    assert_eq!(
        linkage.uniform_names(),
        &["uModelViewProjection", "uLightDirection", "uDiffuse", "uDetail", "uExposure", "uTiles"]
    );
}

#[test]
fn switching_programs_resets_sampler_units() {
    let mut dc = DrawContext::new(RecordingContext::new());
    let first = program(&mut dc);
    let second = program(&mut dc);
    let diffuse = texture(&mut dc);
    let detail = texture(&mut dc);

    dc.bind_program(first.binding());
    dc.set_uniform("uDiffuse", UniformValue::Texture(diffuse.binding().unwrap()))
        .unwrap();
    dc.set_uniform("uDetail", UniformValue::Texture(detail.binding().unwrap()))
        .unwrap();
    assert_eq!(dc.bound_texture_count(), 2);

    // same program again: nothing changes
    dc.bind_program(first.binding());
    assert_eq!(dc.bound_texture_count(), 2);

    dc.bind_program(second.binding());
    assert_eq!(dc.bound_texture_count(), 0);
    dc.gl_mut().clear_calls();
    dc.set_uniform("uDetail", UniformValue::Texture(detail.binding().unwrap()))
        .unwrap();
    // unit 0 now holds the detail texture instead of the diffuse one
    assert_eq!(dc.texture(0), detail.binding());
    assert!(matches!(
        dc.gl().calls().last(),
        Some(Call::UniformI32 { values, .. }) if values.as_slice() == [0]
    ));
}

#[test]
fn uniform_shapes_follow_the_reflected_type() {
    let mut dc = DrawContext::new(RecordingContext::new());
    let program = program(&mut dc);
    dc.bind_program(program.binding());
    dc.gl_mut().clear_calls();

    dc.set_uniform("uLightDirection", UniformValue::Floats(&[0.0, -1.0, 0.0]))
        .unwrap();
    dc.set_uniform("uExposure", UniformValue::Float(1.5)).unwrap();
    dc.set_uniform("uTiles", UniformValue::Ints(&[4, 2])).unwrap();
    assert!(matches!(
        dc.set_uniform("uExposure", UniformValue::Int(1)),
        Err(Error::UniformTypeMismatch { .. })
    ));

    let calls = dc.gl().calls();
    assert_eq!(calls.len(), 3);
    assert!(matches!(&calls[0], Call::UniformF32 { values, .. } if values == &vec![0.0, -1.0, 0.0]));
    assert!(matches!(&calls[1], Call::UniformF32 { values, .. } if values == &vec![1.5]));
    assert!(matches!(&calls[2], Call::UniformI32 { values, .. } if values == &vec![4, 2]));
}

#[test]
fn attributes_bind_each_buffer_before_its_pointer() {
    let mut dc = DrawContext::new(RecordingContext::new());
    let program = program(&mut dc);
    let positions = Field::new("aPosition", DataType::Float, 0, 3, false);
    let tex_coords = Field::new("aTexCoord", DataType::UnsignedShort, 0, 2, true);

    let mut position_buffer = Buffer::<RecordingContext>::new();
    position_buffer.specify_attributes(BufferAttributes {
        usage: BufferUsage::Vertex,
        element_size: element_size(std::slice::from_ref(&positions)) as u32,
        element_count: 3,
        ..BufferAttributes::default()
    });
    position_buffer.create_backing_resources(dc.gl_mut(), None).unwrap();
    let mut uv_buffer = Buffer::<RecordingContext>::new();
    uv_buffer.specify_attributes(BufferAttributes {
        usage: BufferUsage::Vertex,
        element_size: 4,
        element_count: 3,
        ..BufferAttributes::default()
    });
    uv_buffer.create_backing_resources(dc.gl_mut(), None).unwrap();

    dc.bind_program(program.binding());
    dc.gl_mut().clear_calls();
    dc.enable_attributes(&[positions, tex_coords], &[&position_buffer, &uv_buffer])
        .unwrap();
    assert_eq!(
        dc.gl().calls(),
        &[
            Call::BindBuffer { target: sys::ARRAY_BUFFER, buffer: position_buffer.handle() },
            Call::EnableVertexAttribArray(0),
            Call::VertexAttribPointer {
                index: 0,
                size: 3,
                data_type: sys::FLOAT,
                normalized: false,
                stride: 12,
                offset: 0,
            },
            Call::BindBuffer { target: sys::ARRAY_BUFFER, buffer: uv_buffer.handle() },
            Call::EnableVertexAttribArray(1),
            Call::VertexAttribPointer {
                index: 1,
                size: 2,
                data_type: sys::UNSIGNED_SHORT,
                normalized: true,
                stride: 4,
                offset: 0,
            },
        ]
    );

    dc.draw_indexed_triangles(0, 3, IndexType::UnsignedShort);
    assert_eq!(
        dc.gl().calls().last(),
        Some(&Call::DrawElements {
            mode: sys::TRIANGLES,
            count: 3,
            element_type: sys::UNSIGNED_SHORT,
            offset: 0,
        })
    );
}

#[test]
fn compile_failure_reports_the_failing_stage() {
    let mut dc = DrawContext::new(RecordingContext::new());
    dc.gl_mut().fail_compile(Some(resources_and_state::imp::ShaderKind::Vertex));
    dc.gl_mut().set_info_log("0:2: syntax error");
    let mut program = Program::<RecordingContext>::new();
    program.specify_attributes(ProgramAttributes {
        vertex_shader: VERTEX.into(),
        fragment_shader: FRAGMENT.into(),
    });
    let mut reports: Vec<OwnedReport> = Vec::new();
    let result = program.create_backing_resources(dc.gl_mut(), Some(&mut reports));
    assert!(matches!(
        result,
        Err(Error::ShaderCompile { stage: Stage::VertexCompile, .. })
    ));
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].log, "0:2: syntax error");
    assert_eq!(reports[0].source, VERTEX);
    // both shaders were released
    assert_eq!(dc.gl().count(|c| matches!(c, Call::DeleteShader(_))), 2);
    assert!(program.binding().is_none());
}
