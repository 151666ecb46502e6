// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
use resources_and_state::bindings::framebuffer::Framebuffer;
use resources_and_state::bindings::renderbuffer::{
    Renderbuffer, RenderbufferAttributes, RenderbufferFormat,
};
use resources_and_state::bindings::resource::Resource;
use resources_and_state::bindings::sampler::TextureTarget;
use resources_and_state::bindings::texture::Texture;
use resources_and_state::bindings::texture_builder::LevelChain;
use resources_and_state::bindings::visible_to::{RenderbufferUsage, TextureUsage};
use resources_and_state::imp::{Call, RecordingContext};
use resources_and_state::sys;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_test::wasm_bindgen_test as test;

fn texture(gl: &mut RecordingContext, chain: LevelChain) -> Texture<RecordingContext> {
    let mut texture = Texture::new();
    texture.specify_attributes(chain.attributes());
    texture.create_backing_resources(gl, None).unwrap();
    texture
}

fn framebuffer(gl: &mut RecordingContext) -> Framebuffer<RecordingContext> {
    let mut framebuffer = Framebuffer::new();
    framebuffer.create_backing_resources(gl, None).unwrap();
    framebuffer
}

fn is_texture_attach(call: &Call, attach: bool) -> bool {
    matches!(call, Call::FramebufferTexture2D { texture, .. } if texture.is_some() == attach)
}

#[test]
fn cube_map_color_target_covers_every_face() {
    let mut gl = RecordingContext::new();
    let cube = texture(
        &mut gl,
        LevelChain::new(32, 32)
            .with_target(TextureUsage::TextureCube, TextureTarget::TextureCubeMapPositiveX),
    );
    let mut target = framebuffer(&mut gl);
    gl.clear_calls();

    target.attach_color_texture(&mut gl, &cube, 0).unwrap();
    assert_eq!(gl.count(|c| is_texture_attach(c, true)), 6);
    let faces: Vec<u32> = gl
        .calls()
        .iter()
        .filter_map(|c| match c {
            Call::FramebufferTexture2D { texture_target, .. } => Some(*texture_target),
            _ => None,
        })
        .collect();
    let expected: Vec<u32> = TextureTarget::CUBE_FACES.iter().map(|f| f.gl()).collect();
    assert_eq!(faces, expected);
    assert_eq!(target.draw_buffers(), &[sys::COLOR_ATTACHMENT0]);

    gl.clear_calls();
    target.detach(&mut gl);
    assert_eq!(gl.count(|c| is_texture_attach(c, false)), 6);
    assert!(target.draw_buffers().is_empty());
    assert!(target.color_attachment(0).is_none());
}

#[test]
fn combined_depth_stencil_detaches_once() {
    let mut gl = RecordingContext::new();
    let mut depth_stencil = Renderbuffer::<RecordingContext>::new();
    depth_stencil.specify_attributes(RenderbufferAttributes {
        width: 128,
        height: 128,
        format: RenderbufferFormat::DepthStencil,
        usage: RenderbufferUsage::DepthStencil,
    });
    depth_stencil.create_backing_resources(&mut gl, None).unwrap();
    let mut target = framebuffer(&mut gl);
    target
        .attach_depth_stencil_renderbuffer(&mut gl, &depth_stencil)
        .unwrap();
    gl.clear_calls();

    target.detach(&mut gl);
    let detaches: Vec<u32> = gl
        .calls()
        .iter()
        .filter_map(|c| match c {
            Call::FramebufferRenderbuffer { attachment, renderbuffer: None, .. } => Some(*attachment),
            _ => None,
        })
        .collect();
    assert_eq!(detaches, vec![sys::DEPTH_STENCIL_ATTACHMENT]);
    assert!(!target.has_combined_depth_stencil());
}

#[test]
fn several_color_targets_accumulate_draw_buffers() {
    let mut gl = RecordingContext::new();
    let albedo = texture(&mut gl, LevelChain::new(64, 64));
    let normals = texture(&mut gl, LevelChain::new(64, 64));
    let mut target = framebuffer(&mut gl);
    target
        .attach_color_texture(&mut gl, &albedo, 0)
        .unwrap()
        .attach_color_texture(&mut gl, &normals, 2)
        .unwrap();
    assert_eq!(
        target.draw_buffers(),
        &[sys::COLOR_ATTACHMENT0, sys::COLOR_ATTACHMENT0 + 2]
    );
    assert_eq!(target.binding().unwrap().draw_buffers.len(), 2);
}

#[test]
fn deleting_detaches_first() {
    let mut gl = RecordingContext::new();
    let color = texture(&mut gl, LevelChain::new(8, 8));
    let mut target = framebuffer(&mut gl);
    let handle = target.handle().unwrap();
    target.attach_color_texture(&mut gl, &color, 0).unwrap();
    gl.clear_calls();

    target.delete_backing_resources(&mut gl);
    let detach = gl.calls().iter().position(|c| is_texture_attach(c, false));
    let delete = gl
        .calls()
        .iter()
        .position(|c| *c == Call::DeleteFramebuffer(handle));
    assert!(detach.unwrap() < delete.unwrap());
    assert!(!target.is_backed());
}

#[test]
fn attaching_to_an_unbacked_framebuffer_fails() {
    let mut gl = RecordingContext::new();
    let color = texture(&mut gl, LevelChain::new(8, 8));
    let mut target = Framebuffer::<RecordingContext>::new();
    gl.clear_calls();
    assert!(target.attach_color_texture(&mut gl, &color, 0).is_err());
    assert!(gl.calls().is_empty());
    assert!(target.draw_buffers().is_empty());
}
