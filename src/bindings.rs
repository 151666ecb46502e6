// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! Resource descriptors */

pub mod buffer;
pub mod framebuffer;
pub mod program;
pub mod reflection;
pub mod renderbuffer;
pub mod resource;
pub mod sampler;
pub mod state;
pub mod texture;
pub mod texture_builder;
pub mod visible_to;

pub use resource::Resource;
