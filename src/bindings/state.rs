// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Fixed-function state groups.
//!
//! Each group is a plain value describing one axis of pipeline state: blending, clearing,
//! rasterization, or depth and stencil testing. None of them owns a GPU object, so their
//! [`Resource`] implementations are trivial and the groups are their own attributes.
//!
//! Groups are applied through [`crate::images::draw_context::DrawContext`], which keeps one
//! live copy of each and only issues calls for the fields that differ.
//!
//! ```
//! use resources_and_state::bindings::state::{BlendFactor, BlendState};
//!
//! let premultiplied = BlendState {
//!     blend_enabled: true,
//!     source_factor_color: BlendFactor::One,
//!     target_factor_color: BlendFactor::OneMinusSrcAlpha,
//!     source_factor_alpha: BlendFactor::One,
//!     target_factor_alpha: BlendFactor::OneMinusSrcAlpha,
//!     ..BlendState::default()
//! };
//! assert_ne!(premultiplied, BlendState::default());
//! ```

use crate::bindings::resource::Resource;
use crate::bindings::visible_to::{ResourceSubType, ResourceType};
use crate::diagnostics::Diagnostics;
use crate::error::Error;
use crate::imp::GraphicsContext;
use crate::sys;
use serde::{Deserialize, Serialize};

/// Weighting applied to a source or destination color in blending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u32)]
pub enum BlendFactor {
    Zero = sys::ZERO,
    One = sys::ONE,
    SrcColor = sys::SRC_COLOR,
    OneMinusSrcColor = sys::ONE_MINUS_SRC_COLOR,
    DstColor = sys::DST_COLOR,
    OneMinusDstColor = sys::ONE_MINUS_DST_COLOR,
    SrcAlpha = sys::SRC_ALPHA,
    OneMinusSrcAlpha = sys::ONE_MINUS_SRC_ALPHA,
    DstAlpha = sys::DST_ALPHA,
    OneMinusDstAlpha = sys::ONE_MINUS_DST_ALPHA,
    ConstantColor = sys::CONSTANT_COLOR,
    OneMinusConstantColor = sys::ONE_MINUS_CONSTANT_COLOR,
    ConstantAlpha = sys::CONSTANT_ALPHA,
    OneMinusConstantAlpha = sys::ONE_MINUS_CONSTANT_ALPHA,
    /// Only valid as a source factor.
    SrcAlphaSaturate = sys::SRC_ALPHA_SATURATE,
}

impl BlendFactor {
    pub const fn gl(self) -> u32 {
        self as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u32)]
pub enum BlendEquation {
    #[default]
    FuncAdd = sys::FUNC_ADD,
    FuncSubtract = sys::FUNC_SUBTRACT,
    FuncReverseSubtract = sys::FUNC_REVERSE_SUBTRACT,
}

impl BlendEquation {
    pub const fn gl(self) -> u32 {
        self as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u32)]
pub enum Face {
    Front = sys::FRONT,
    #[default]
    Back = sys::BACK,
    FrontAndBack = sys::FRONT_AND_BACK,
}

impl Face {
    pub const fn gl(self) -> u32 {
        self as u32
    }
}

/// Vertex order that marks a triangle as front-facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u32)]
pub enum Winding {
    Cw = sys::CW,
    #[default]
    Ccw = sys::CCW,
}

impl Winding {
    pub const fn gl(self) -> u32 {
        self as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u32)]
pub enum CompareFunction {
    Never = sys::NEVER,
    Less = sys::LESS,
    Equal = sys::EQUAL,
    Lequal = sys::LEQUAL,
    Greater = sys::GREATER,
    Notequal = sys::NOTEQUAL,
    Gequal = sys::GEQUAL,
    Always = sys::ALWAYS,
}

impl CompareFunction {
    pub const fn gl(self) -> u32 {
        self as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u32)]
pub enum StencilOp {
    #[default]
    Keep = sys::KEEP,
    Zero = sys::ZERO,
    Replace = sys::REPLACE,
    Incr = sys::INCR,
    Decr = sys::DECR,
    Invert = sys::INVERT,
    IncrWrap = sys::INCR_WRAP,
    DecrWrap = sys::DECR_WRAP,
}

impl StencilOp {
    pub const fn gl(self) -> u32 {
        self as u32
    }
}

/// Color blending.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BlendState {
    pub blend_enabled: bool,
    /// Used by the constant-color and constant-alpha factors.
    pub constant_color: [f32; 4],
    pub source_factor_color: BlendFactor,
    pub source_factor_alpha: BlendFactor,
    pub target_factor_color: BlendFactor,
    pub target_factor_alpha: BlendFactor,
    pub function_color: BlendEquation,
    pub function_alpha: BlendEquation,
}

impl Default for BlendState {
    fn default() -> Self {
        BlendState {
            blend_enabled: false,
            constant_color: [0.0; 4],
            source_factor_color: BlendFactor::One,
            source_factor_alpha: BlendFactor::One,
            target_factor_color: BlendFactor::Zero,
            target_factor_alpha: BlendFactor::Zero,
            function_color: BlendEquation::FuncAdd,
            function_alpha: BlendEquation::FuncAdd,
        }
    }
}

/// Which buffers a clear touches, and the values it writes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClearState {
    pub clear_color: bool,
    pub clear_depth: bool,
    pub clear_stencil: bool,
    pub color_value: [f32; 4],
    pub depth_value: f32,
    pub stencil_value: i32,
}

impl Default for ClearState {
    fn default() -> Self {
        ClearState {
            clear_color: true,
            clear_depth: true,
            clear_stencil: true,
            color_value: [0.0; 4],
            depth_value: 1.0,
            stencil_value: 0,
        }
    }
}

impl ClearState {
    /// Buffer bits to pass to `clear`.
    pub fn clear_flags(&self) -> u32 {
        let mut flags = 0;
        if self.clear_color {
            flags |= sys::COLOR_BUFFER_BIT;
        }
        if self.clear_depth {
            flags |= sys::DEPTH_BUFFER_BIT;
        }
        if self.clear_stencil {
            flags |= sys::STENCIL_BUFFER_BIT;
        }
        flags
    }
}

/// Rasterizer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RasterState {
    /// Write enables for the red, green, blue and alpha channels.
    pub color_write: [bool; 4],
    pub culling_enabled: bool,
    pub cull_face: Face,
    pub winding_order: Winding,
    pub scissor_test_enabled: bool,
    pub scissor_x: i32,
    pub scissor_y: i32,
    pub scissor_width: i32,
    pub scissor_height: i32,
    /// Widths above 1 are implementation-specific.
    pub line_width: f32,
    pub offset_factor: f32,
    pub offset_units: f32,
    pub sample_coverage_enabled: bool,
    pub sample_alpha_to_coverage: bool,
    pub invert_coverage: bool,
    pub coverage_value: f32,
}

impl Default for RasterState {
    fn default() -> Self {
        RasterState {
            color_write: [true; 4],
            culling_enabled: false,
            cull_face: Face::Back,
            winding_order: Winding::Ccw,
            scissor_test_enabled: false,
            scissor_x: 0,
            scissor_y: 0,
            scissor_width: 0,
            scissor_height: 0,
            line_width: 1.0,
            offset_factor: 0.0,
            offset_units: 0.0,
            sample_coverage_enabled: false,
            sample_alpha_to_coverage: false,
            invert_coverage: false,
            coverage_value: 1.0,
        }
    }
}

/// Depth and stencil testing, with separate stencil configuration per face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DepthStencilState {
    pub depth_write_enabled: bool,
    pub depth_test_enabled: bool,
    pub depth_test_function: CompareFunction,
    pub stencil_test_enabled: bool,
    pub stencil_mask_back: u32,
    pub stencil_reference_back: i32,
    pub stencil_function_back: CompareFunction,
    pub stencil_fail_op_back: StencilOp,
    pub stencil_pass_z_fail_op_back: StencilOp,
    pub stencil_pass_z_pass_op_back: StencilOp,
    pub stencil_mask_front: u32,
    pub stencil_reference_front: i32,
    pub stencil_function_front: CompareFunction,
    pub stencil_fail_op_front: StencilOp,
    pub stencil_pass_z_fail_op_front: StencilOp,
    pub stencil_pass_z_pass_op_front: StencilOp,
}

impl Default for DepthStencilState {
    fn default() -> Self {
        DepthStencilState {
            depth_write_enabled: true,
            depth_test_enabled: false,
            depth_test_function: CompareFunction::Less,
            stencil_test_enabled: false,
            stencil_mask_back: 0xFFFF_FFFF,
            stencil_reference_back: 0,
            stencil_function_back: CompareFunction::Always,
            stencil_fail_op_back: StencilOp::Keep,
            stencil_pass_z_fail_op_back: StencilOp::Keep,
            stencil_pass_z_pass_op_back: StencilOp::Keep,
            stencil_mask_front: 0xFFFF_FFFF,
            stencil_reference_front: 0,
            stencil_function_front: CompareFunction::Always,
            stencil_fail_op_front: StencilOp::Keep,
            stencil_pass_z_fail_op_front: StencilOp::Keep,
            stencil_pass_z_pass_op_front: StencilOp::Keep,
        }
    }
}

impl DepthStencilState {
    pub(crate) fn back_func(&self) -> (CompareFunction, i32, u32) {
        (
            self.stencil_function_back,
            self.stencil_reference_back,
            self.stencil_mask_back,
        )
    }

    pub(crate) fn front_func(&self) -> (CompareFunction, i32, u32) {
        (
            self.stencil_function_front,
            self.stencil_reference_front,
            self.stencil_mask_front,
        )
    }

    pub(crate) fn back_ops(&self) -> (StencilOp, StencilOp, StencilOp) {
        (
            self.stencil_fail_op_back,
            self.stencil_pass_z_fail_op_back,
            self.stencil_pass_z_pass_op_back,
        )
    }

    pub(crate) fn front_ops(&self) -> (StencilOp, StencilOp, StencilOp) {
        (
            self.stencil_fail_op_front,
            self.stencil_pass_z_fail_op_front,
            self.stencil_pass_z_pass_op_front,
        )
    }
}

// State groups own no GPU object.
macro_rules! state_group_resource {
    ($ty:ty, $sub:expr) => {
        impl<C: GraphicsContext> Resource<C> for $ty {
            type Attributes = $ty;

            fn resource_type(&self) -> ResourceType {
                ResourceType::StateObject
            }

            fn sub_type(&self) -> ResourceSubType {
                $sub
            }

            fn is_backed(&self) -> bool {
                false
            }

            fn specify_attributes(&mut self, attributes: $ty) -> bool {
                *self = attributes;
                true
            }

            fn create_backing_resources(
                &mut self,
                _gl: &mut C,
                _diagnostics: Option<&mut dyn Diagnostics>,
            ) -> Result<(), Error> {
                Ok(())
            }

            fn delete_backing_resources(&mut self, _gl: &mut C) -> &mut Self {
                self
            }

            fn serialize(&self) -> $ty {
                *self
            }
        }
    };
}

state_group_resource!(BlendState, ResourceSubType::BlendState);
state_group_resource!(ClearState, ResourceSubType::ClearState);
state_group_resource!(RasterState, ResourceSubType::RasterState);
state_group_resource!(DepthStencilState, ResourceSubType::DepthStencilState);
