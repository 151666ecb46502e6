// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! Layout and draw-time modules */

pub mod draw_context;
pub mod vertex_layout;
pub mod viewport;

pub use draw_context::DrawContext;
pub use viewport::Viewport;
