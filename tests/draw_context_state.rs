// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
use resources_and_state::bindings::state::{
    BlendEquation, BlendFactor, BlendState, ClearState, CompareFunction, DepthStencilState, Face,
    RasterState, StencilOp, Winding,
};
use resources_and_state::images::draw_context::DrawContext;
use resources_and_state::imp::{Call, RecordingContext};
use resources_and_state::sys;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_test::wasm_bindgen_test as test;

fn busy_blend() -> BlendState {
    BlendState {
        blend_enabled: true,
        constant_color: [0.25, 0.5, 0.75, 1.0],
        source_factor_color: BlendFactor::SrcAlpha,
        source_factor_alpha: BlendFactor::One,
        target_factor_color: BlendFactor::OneMinusSrcAlpha,
        target_factor_alpha: BlendFactor::OneMinusSrcAlpha,
        function_color: BlendEquation::FuncAdd,
        function_alpha: BlendEquation::FuncReverseSubtract,
    }
}

fn busy_raster() -> RasterState {
    RasterState {
        color_write: [true, true, true, false],
        culling_enabled: true,
        cull_face: Face::Front,
        winding_order: Winding::Cw,
        scissor_test_enabled: true,
        scissor_x: 4,
        scissor_y: 8,
        scissor_width: 100,
        scissor_height: 50,
        line_width: 2.0,
        offset_factor: 1.0,
        offset_units: 2.0,
        sample_coverage_enabled: true,
        sample_alpha_to_coverage: true,
        invert_coverage: true,
        coverage_value: 0.5,
    }
}

fn busy_depth_stencil() -> DepthStencilState {
    DepthStencilState {
        depth_write_enabled: false,
        depth_test_enabled: true,
        depth_test_function: CompareFunction::Lequal,
        stencil_test_enabled: true,
        stencil_reference_back: 3,
        stencil_fail_op_back: StencilOp::Replace,
        stencil_function_front: CompareFunction::Notequal,
        stencil_pass_z_pass_op_front: StencilOp::IncrWrap,
        ..DepthStencilState::default()
    }
}

#[test]
fn identical_state_applies_nothing_the_second_time() {
    let mut dc = DrawContext::new(RecordingContext::new());
    dc.apply_blend_state(&busy_blend())
        .apply_raster_state(&busy_raster())
        .apply_depth_stencil_state(&busy_depth_stencil())
        .apply_clear_state(&ClearState {
            color_value: [0.1, 0.2, 0.3, 1.0],
            depth_value: 0.5,
            stencil_value: 1,
            ..ClearState::default()
        });
    assert!(!dc.gl().calls().is_empty());
    dc.gl_mut().clear_calls();

    dc.apply_blend_state(&busy_blend())
        .apply_raster_state(&busy_raster())
        .apply_depth_stencil_state(&busy_depth_stencil())
        .apply_clear_state(&ClearState {
            color_value: [0.1, 0.2, 0.3, 1.0],
            depth_value: 0.5,
            stencil_value: 1,
            ..ClearState::default()
        });
    assert!(dc.gl().calls().is_empty());
}

#[test]
fn defaults_match_a_fresh_context() {
    let mut dc = DrawContext::new(RecordingContext::new());
    dc.apply_blend_state(&BlendState::default())
        .apply_raster_state(&RasterState::default())
        .apply_depth_stencil_state(&DepthStencilState::default())
        .apply_clear_state(&ClearState::default());
    assert!(dc.gl().calls().is_empty());
}

#[test]
fn blend_state_issues_each_group_once() {
    let mut dc = DrawContext::new(RecordingContext::new());
    dc.apply_blend_state(&busy_blend());
    assert_eq!(
        dc.gl().calls(),
        &[
            Call::Enable(sys::BLEND),
            Call::BlendEquationSeparate {
                mode_rgb: sys::FUNC_ADD,
                mode_alpha: sys::FUNC_REVERSE_SUBTRACT,
            },
            Call::BlendFuncSeparate {
                src_rgb: sys::SRC_ALPHA,
                dst_rgb: sys::ONE_MINUS_SRC_ALPHA,
                src_alpha: sys::ONE,
                dst_alpha: sys::ONE_MINUS_SRC_ALPHA,
            },
            Call::BlendColor([0.25, 0.5, 0.75, 1.0]),
        ]
    );

    dc.gl_mut().clear_calls();
    dc.apply_blend_state(&BlendState {
        blend_enabled: false,
        ..busy_blend()
    });
    assert_eq!(dc.gl().calls(), &[Call::Disable(sys::BLEND)]);
}

#[test]
fn raster_state_order() {
    let mut dc = DrawContext::new(RecordingContext::new());
    dc.apply_raster_state(&busy_raster());
    assert_eq!(
        dc.gl().calls(),
        &[
            Call::Enable(sys::CULL_FACE),
            Call::CullFace(sys::FRONT),
            Call::FrontFace(sys::CW),
            Call::Enable(sys::SCISSOR_TEST),
            Call::Scissor { x: 4, y: 8, width: 100, height: 50 },
            Call::PolygonOffset { factor: 1.0, units: 2.0 },
            Call::Enable(sys::SAMPLE_COVERAGE),
            Call::Enable(sys::SAMPLE_ALPHA_TO_COVERAGE),
            Call::SampleCoverage { value: 0.5, invert: true },
            Call::LineWidth(2.0),
            Call::ColorMask([true, true, true, false]),
        ]
    );
    assert_eq!(dc.raster_state(), &busy_raster());
}

#[test]
fn depth_stencil_faces_are_separate() {
    let mut dc = DrawContext::new(RecordingContext::new());
    dc.apply_depth_stencil_state(&busy_depth_stencil());
    assert_eq!(
        dc.gl().calls(),
        &[
            Call::DepthMask(false),
            Call::Enable(sys::DEPTH_TEST),
            Call::DepthFunc(sys::LEQUAL),
            Call::Enable(sys::STENCIL_TEST),
            Call::StencilFuncSeparate {
                face: sys::BACK,
                function: sys::ALWAYS,
                reference: 3,
                mask: 0xFFFF_FFFF,
            },
            Call::StencilOpSeparate {
                face: sys::BACK,
                fail: sys::REPLACE,
                depth_fail: sys::KEEP,
                pass: sys::KEEP,
            },
            Call::StencilFuncSeparate {
                face: sys::FRONT,
                function: sys::NOTEQUAL,
                reference: 0,
                mask: 0xFFFF_FFFF,
            },
            Call::StencilOpSeparate {
                face: sys::FRONT,
                fail: sys::KEEP,
                depth_fail: sys::KEEP,
                pass: sys::INCR_WRAP,
            },
        ]
    );
}

#[test]
fn changing_one_channel_of_the_constant_color() {
    let mut dc = DrawContext::new(RecordingContext::new());
    dc.apply_blend_state(&busy_blend());
    dc.gl_mut().clear_calls();
    let mut blend = busy_blend();
    blend.constant_color[2] = 0.0;
    dc.apply_blend_state(&blend);
    assert_eq!(dc.gl().calls(), &[Call::BlendColor([0.25, 0.5, 0.0, 1.0])]);
}

#[test]
fn context_loss_reset_forgets_state() {
    let mut gl = RecordingContext::new();
    gl.add_extension(sys::DRAW_BUFFERS_EXTENSION);
    let mut dc = DrawContext::new(gl);
    dc.enable_extension(sys::DRAW_BUFFERS_EXTENSION);
    dc.apply_blend_state(&busy_blend());
    dc.gl_mut().lose_context();
    dc.gl_mut().restore_context();
    dc.reset_after_context_loss();
    assert_eq!(dc.blend_state(), &BlendState::default());
    assert!(dc.extension(sys::DRAW_BUFFERS_EXTENSION).is_none());
    assert!(!dc.draw_buffers_supported());

    dc.gl_mut().clear_calls();
    dc.apply_blend_state(&busy_blend());
    assert_eq!(dc.gl().calls().len(), 4);
}
