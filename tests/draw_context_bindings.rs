// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
use resources_and_state::bindings::buffer::{Buffer, BufferAttributes};
use resources_and_state::bindings::framebuffer::Framebuffer;
use resources_and_state::bindings::resource::Resource;
use resources_and_state::bindings::texture::Texture;
use resources_and_state::bindings::texture_builder::LevelChain;
use resources_and_state::bindings::visible_to::BufferUsage;
use resources_and_state::images::draw_context::DrawContext;
use resources_and_state::imp::{Call, RecordingContext};
use resources_and_state::{sys, TEXTURE_UNITS};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_test::wasm_bindgen_test as test;

fn buffer(dc: &mut DrawContext<RecordingContext>, usage: BufferUsage) -> Buffer<RecordingContext> {
    let mut buffer = Buffer::new();
    buffer.specify_attributes(BufferAttributes {
        usage,
        element_size: 4,
        element_count: 8,
        ..BufferAttributes::default()
    });
    buffer.create_backing_resources(dc.gl_mut(), None).unwrap();
    buffer
}

fn texture(dc: &mut DrawContext<RecordingContext>) -> Texture<RecordingContext> {
    let mut texture = Texture::new();
    texture.specify_attributes(LevelChain::new(4, 4).attributes());
    texture.create_backing_resources(dc.gl_mut(), None).unwrap();
    texture
}

#[test]
fn buffer_binding_is_idempotent_and_returns_the_previous() {
    let mut dc = DrawContext::new(RecordingContext::new());
    let first = buffer(&mut dc, BufferUsage::Vertex);
    let second = buffer(&mut dc, BufferUsage::Vertex);
    dc.gl_mut().clear_calls();

    assert_eq!(dc.bind_array_buffer(first.binding()), None);
    assert_eq!(dc.bind_array_buffer(first.binding()), first.binding());
    assert_eq!(dc.gl().calls().len(), 1);

    assert_eq!(dc.bind_array_buffer(second.binding()), first.binding());
    assert_eq!(
        dc.gl().calls().last(),
        Some(&Call::BindBuffer { target: sys::ARRAY_BUFFER, buffer: second.handle() })
    );
    assert_eq!(dc.array_buffer(), second.binding());
}

#[test]
fn unbinding_when_nothing_is_bound_issues_nothing() {
    let mut dc = DrawContext::new(RecordingContext::new());
    assert_eq!(dc.unbind_index_buffer(), None);
    assert_eq!(dc.unbind_array_buffer(), None);
    assert!(dc.unbind_framebuffer().is_none());
    assert!(dc.unbind_program().is_none());
    assert!(dc.gl().calls().is_empty());
}

#[test]
fn index_buffers_use_their_own_slot() {
    let mut dc = DrawContext::new(RecordingContext::new());
    let vertices = buffer(&mut dc, BufferUsage::Vertex);
    let indices = buffer(&mut dc, BufferUsage::Element);
    dc.gl_mut().clear_calls();
    dc.bind_array_buffer(vertices.binding());
    dc.bind_index_buffer(indices.binding());
    assert_eq!(
        dc.gl().calls(),
        &[
            Call::BindBuffer { target: sys::ARRAY_BUFFER, buffer: vertices.handle() },
            Call::BindBuffer { target: sys::ELEMENT_ARRAY_BUFFER, buffer: indices.handle() },
        ]
    );
}

#[test]
fn vendor_prefixed_extension_is_found() {
    let mut gl = RecordingContext::new();
    gl.add_extension("WEBKIT_WEBGL_draw_buffers");
    let mut dc = DrawContext::new(gl);
    assert!(dc.enable_extension(sys::DRAW_BUFFERS_EXTENSION));
    assert_eq!(
        dc.extension(sys::DRAW_BUFFERS_EXTENSION),
        Some("WEBKIT_WEBGL_draw_buffers")
    );
    assert!(dc.draw_buffers_supported());
    let attempts = dc.gl().count(|c| matches!(c, Call::GetExtension { .. }));
    assert_eq!(attempts, 3);

    // cached
    dc.enable_extension(sys::DRAW_BUFFERS_EXTENSION);
    assert_eq!(dc.gl().count(|c| matches!(c, Call::GetExtension { .. })), 3);
    assert!(!dc.enable_extension("OES_texture_float"));
}

#[test]
fn enable_all_strips_prefixes() {
    let mut gl = RecordingContext::new();
    gl.add_extension("OES_element_index_uint");
    gl.add_extension("MOZ_WEBGL_compressed_texture_s3tc");
    let mut dc = DrawContext::new(gl);
    assert_eq!(dc.enable_all_extensions(), 2);
    assert_eq!(
        dc.extension("WEBGL_compressed_texture_s3tc"),
        Some("MOZ_WEBGL_compressed_texture_s3tc")
    );
    assert!(dc.extension("OES_element_index_uint").is_some());
    assert!(!dc.draw_buffers_supported());
}

#[test]
fn multi_target_framebuffer_routes_draw_buffers() {
    let mut gl = RecordingContext::new();
    gl.add_extension(sys::DRAW_BUFFERS_EXTENSION);
    let mut dc = DrawContext::new(gl);
    dc.enable_extension(sys::DRAW_BUFFERS_EXTENSION);
    let first = texture(&mut dc);
    let second = texture(&mut dc);
    let mut target = Framebuffer::<RecordingContext>::new();
    target.create_backing_resources(dc.gl_mut(), None).unwrap();
    target
        .attach_color_texture(dc.gl_mut(), &first, 0)
        .unwrap()
        .attach_color_texture(dc.gl_mut(), &second, 1)
        .unwrap();
    dc.gl_mut().clear_calls();

    assert!(dc.bind_framebuffer(target.binding()).is_none());
    assert_eq!(
        dc.gl().calls(),
        &[
            Call::BindFramebuffer { target: sys::FRAMEBUFFER, framebuffer: target.handle() },
            Call::DrawBuffers(vec![sys::COLOR_ATTACHMENT0, sys::COLOR_ATTACHMENT0 + 1]),
        ]
    );
    dc.gl_mut().clear_calls();
    dc.bind_framebuffer(target.binding());
    assert!(dc.gl().calls().is_empty());

    let previous = dc.unbind_framebuffer();
    assert_eq!(previous, target.binding());
    assert_eq!(
        dc.gl().calls(),
        &[
            Call::BindFramebuffer { target: sys::FRAMEBUFFER, framebuffer: None },
            Call::DrawBuffers(vec![sys::BACK]),
        ]
    );
}

fn draw_buffers_context() -> DrawContext<RecordingContext> {
    let mut gl = RecordingContext::new();
    gl.add_extension(sys::DRAW_BUFFERS_EXTENSION);
    let mut dc = DrawContext::new(gl);
    dc.enable_extension(sys::DRAW_BUFFERS_EXTENSION);
    dc
}

fn framebuffer_with_targets(
    dc: &mut DrawContext<RecordingContext>,
    targets: u32,
) -> (Framebuffer<RecordingContext>, Vec<Texture<RecordingContext>>) {
    let mut framebuffer = Framebuffer::<RecordingContext>::new();
    framebuffer.create_backing_resources(dc.gl_mut(), None).unwrap();
    let textures: Vec<_> = (0..targets).map(|_| texture(dc)).collect();
    for (slot, color) in textures.iter().enumerate() {
        framebuffer
            .attach_color_texture(dc.gl_mut(), color, slot as u32)
            .unwrap();
    }
    (framebuffer, textures)
}

fn submitted_draw_buffers(dc: &DrawContext<RecordingContext>) -> Vec<Vec<u32>> {
    dc.gl()
        .calls()
        .iter()
        .filter_map(|c| match c {
            Call::DrawBuffers(list) => Some(list.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn second_multi_target_framebuffer_gets_its_own_draw_buffers() {
    let mut dc = draw_buffers_context();
    let (first, _first_targets) = framebuffer_with_targets(&mut dc, 2);
    let (second, _second_targets) = framebuffer_with_targets(&mut dc, 2);
    dc.bind_framebuffer(first.binding());
    dc.gl_mut().clear_calls();

    dc.bind_framebuffer(second.binding());
    assert_eq!(
        dc.gl().calls(),
        &[
            Call::BindFramebuffer { target: sys::FRAMEBUFFER, framebuffer: second.handle() },
            Call::DrawBuffers(vec![sys::COLOR_ATTACHMENT0, sys::COLOR_ATTACHMENT0 + 1]),
        ]
    );
}

#[test]
fn routing_follows_each_framebuffer_change() {
    let mut dc = draw_buffers_context();
    let (multi, _multi_targets) = framebuffer_with_targets(&mut dc, 3);
    let (single, _single_target) = framebuffer_with_targets(&mut dc, 1);
    let (other_single, _other_target) = framebuffer_with_targets(&mut dc, 1);
    dc.gl_mut().clear_calls();

    dc.bind_framebuffer(multi.binding());
    dc.bind_framebuffer(single.binding());
    dc.bind_framebuffer(other_single.binding());
    dc.bind_framebuffer(multi.binding());
    let all = vec![
        sys::COLOR_ATTACHMENT0,
        sys::COLOR_ATTACHMENT0 + 1,
        sys::COLOR_ATTACHMENT0 + 2,
    ];
    assert_eq!(
        submitted_draw_buffers(&dc),
        vec![
            all.clone(),
            vec![sys::COLOR_ATTACHMENT0],
            vec![sys::COLOR_ATTACHMENT0],
            all.clone(),
        ]
    );
    assert_eq!(dc.draw_buffers(), all.as_slice());
}

#[test]
fn without_the_extension_no_routing_is_submitted() {
    let mut dc = DrawContext::new(RecordingContext::new());
    let mut target = Framebuffer::<RecordingContext>::new();
    target.create_backing_resources(dc.gl_mut(), None).unwrap();
    dc.gl_mut().clear_calls();
    dc.bind_framebuffer(target.binding());
    dc.unbind_framebuffer();
    assert_eq!(dc.gl().count(|c| matches!(c, Call::DrawBuffers(_))), 0);
}

#[test]
fn unbind_all_textures_clears_occupied_units() {
    let mut dc = DrawContext::new(RecordingContext::new());
    let a = texture(&mut dc);
    let b = texture(&mut dc);
    dc.bind_texture(0, a.binding()).unwrap();
    dc.bind_texture(4, b.binding()).unwrap();
    dc.gl_mut().clear_calls();

    dc.unbind_all_textures();
    assert_eq!(
        dc.gl().calls(),
        &[
            Call::ActiveTexture(sys::TEXTURE0),
            Call::BindTexture { target: sys::TEXTURE_2D, texture: None },
            Call::BindTexture { target: sys::TEXTURE_CUBE_MAP, texture: None },
            Call::ActiveTexture(sys::TEXTURE0 + 4),
            Call::BindTexture { target: sys::TEXTURE_2D, texture: None },
            Call::BindTexture { target: sys::TEXTURE_CUBE_MAP, texture: None },
            Call::ActiveTexture(sys::TEXTURE0),
        ]
    );
    assert_eq!(dc.active_unit(), 0);
    assert_eq!(dc.texture(4), None);
    assert_eq!(dc.bound_texture_count(), 0);
}

#[test]
fn full_unbind_ignores_the_shadow() {
    let mut dc = DrawContext::new(RecordingContext::new());
    dc.unbind();
    let calls = dc.gl().calls();
    let units = TEXTURE_UNITS as usize;
    // three calls per unit, then unit 0, both buffers, framebuffer and program
    assert_eq!(calls.len(), units * 3 + 5);
    assert_eq!(calls[units * 3], Call::ActiveTexture(sys::TEXTURE0));
    assert_eq!(calls.last(), Some(&Call::UseProgram(None)));
    assert_eq!(dc.active_unit(), 0);
}
