// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
use resources_and_state::bindings::buffer::{Buffer, BufferAttributes};
use resources_and_state::bindings::renderbuffer::Renderbuffer;
use resources_and_state::bindings::resource::Resource;
use resources_and_state::bindings::texture::Texture;
use resources_and_state::bindings::texture_builder::LevelChain;
use resources_and_state::bindings::visible_to::{BufferUsage, ResourceType, UpdateType};
use resources_and_state::images::draw_context::DrawContext;
use resources_and_state::imp::{Call, GraphicsContext, RecordingContext};
use resources_and_state::{sys, Error};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_test::wasm_bindgen_test as test;

fn vertex_buffer() -> Buffer<RecordingContext> {
    let mut buffer = Buffer::new();
    buffer.specify_attributes(BufferAttributes {
        usage: BufferUsage::Vertex,
        update_type: UpdateType::StaticDraw,
        element_size: 16,
        element_count: 4,
    });
    buffer
}

#[test]
fn deleting_an_unbacked_resource_does_nothing() {
    let mut gl = RecordingContext::new();
    let mut buffer = vertex_buffer();
    let mut texture = Texture::<RecordingContext>::new();
    let mut renderbuffer = Renderbuffer::<RecordingContext>::new();
    buffer.delete_backing_resources(&mut gl);
    texture.delete_backing_resources(&mut gl);
    renderbuffer.delete_backing_resources(&mut gl);
    assert!(gl.calls().is_empty());
    assert!(!buffer.is_backed());
    assert!(!texture.is_backed());
    assert!(!renderbuffer.is_backed());
}

#[test]
fn deleting_on_a_lost_context_clears_handles_silently() {
    let mut gl = RecordingContext::new();
    let mut buffer = vertex_buffer();
    buffer.create_backing_resources(&mut gl, None).unwrap();
    let mut texture = Texture::<RecordingContext>::new();
    texture.specify_attributes(LevelChain::new(4, 4).attributes());
    texture.create_backing_resources(&mut gl, None).unwrap();

    gl.lose_context();
    gl.clear_calls();
    buffer.delete_backing_resources(&mut gl);
    texture.delete_backing_resources(&mut gl);
    assert!(gl.calls().is_empty());
    assert!(!buffer.is_backed());
    assert!(!texture.is_backed());
}

#[test]
fn creation_is_idempotent() {
    let mut gl = RecordingContext::new();
    let mut buffer = vertex_buffer();
    buffer.create_backing_resources(&mut gl, None).unwrap();
    let handle = buffer.handle();
    buffer.create_backing_resources(&mut gl, None).unwrap();
    assert_eq!(buffer.handle(), handle);
    assert_eq!(gl.count(|c| matches!(c, Call::CreateBuffer(_))), 1);
}

#[test]
fn buffer_creation_allocates_the_whole_store() {
    let mut gl = RecordingContext::new();
    let mut buffer = vertex_buffer();
    buffer.create_backing_resources(&mut gl, None).unwrap();
    assert!(gl.calls().contains(&Call::BufferDataSize {
        target: sys::ARRAY_BUFFER,
        size: 64,
        usage: sys::STATIC_DRAW,
    }));
    assert_eq!(gl.get_parameter_buffer(sys::ARRAY_BUFFER_BINDING), None);
}

#[test]
fn uploads_go_through_the_draw_context_shadow() {
    let mut dc = DrawContext::new(RecordingContext::new());
    let mut buffer = vertex_buffer();
    buffer.create_backing_resources(dc.gl_mut(), None).unwrap();
    dc.gl_mut().clear_calls();

    buffer.upload(&mut dc, &[1.0f32; 16]).unwrap();
    buffer.upload(&mut dc, &[2.0f32; 16]).unwrap();
    assert_eq!(dc.gl().count(|c| matches!(c, Call::BindBuffer { .. })), 1);
    assert_eq!(dc.array_buffer(), buffer.binding());
    assert_eq!(dc.gl().count(|c| matches!(c, Call::BufferData { .. })), 2);
}

#[test]
fn lost_context_recovery_from_attributes() {
    let mut gl = RecordingContext::new();
    let mut buffer = vertex_buffer();
    buffer.create_backing_resources(&mut gl, None).unwrap();
    let saved = buffer.serialize();

    gl.lose_context();
    assert!(matches!(
        Buffer::<RecordingContext>::new().create_backing_resources(&mut gl, None),
        Err(Error::AllocationFailed(ResourceType::DataBuffer))
    ));
    buffer.delete_backing_resources(&mut gl);
    gl.restore_context();

    let mut rebuilt = Buffer::<RecordingContext>::new();
    rebuilt.specify_attributes(saved);
    rebuilt.create_backing_resources(&mut gl, None).unwrap();
    assert!(rebuilt.is_backed());
    assert_eq!(rebuilt.total_size(), 64);
}

#[test]
fn whole_image_upload_disables_unpack_processing_first() {
    let mut gl = RecordingContext::new();
    let mut texture = Texture::<RecordingContext>::new();
    texture.specify_attributes(LevelChain::new(3, 3).attributes());
    texture.create_backing_resources(&mut gl, None).unwrap();
    gl.clear_calls();

    texture.upload_image(&mut gl, 3, 3, Some(&[0u8; 27])).unwrap();
    let calls = gl.calls();
    let upload = calls
        .iter()
        .position(|c| matches!(c, Call::TexImage2D { .. }))
        .unwrap();
    let unpack = [
        Call::PixelStoreBool { parameter: sys::UNPACK_PREMULTIPLY_ALPHA_WEBGL, value: false },
        Call::PixelStoreBool { parameter: sys::UNPACK_FLIP_Y_WEBGL, value: false },
        Call::PixelStoreI32 { parameter: sys::UNPACK_ALIGNMENT, value: 1 },
    ];
    for call in &unpack {
        let at = calls.iter().position(|c| c == call).unwrap();
        assert!(at < upload);
    }
}
