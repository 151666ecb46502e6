// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Primitive submission.

use super::DrawContext;
use crate::imp::GraphicsContext;
use crate::sys;
use serde::{Deserialize, Serialize};

/// How vertices are assembled into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u32)]
pub enum Primitive {
    Points = sys::POINTS,
    Lines = sys::LINES,
    LineLoop = sys::LINE_LOOP,
    LineStrip = sys::LINE_STRIP,
    Triangles = sys::TRIANGLES,
    TriangleStrip = sys::TRIANGLE_STRIP,
    TriangleFan = sys::TRIANGLE_FAN,
}

impl Primitive {
    pub const fn gl(self) -> u32 {
        self as u32
    }
}

/// Element type of an index buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u32)]
pub enum IndexType {
    UnsignedByte = sys::UNSIGNED_BYTE,
    UnsignedShort = sys::UNSIGNED_SHORT,
    UnsignedInt = sys::UNSIGNED_INT,
}

impl IndexType {
    pub const fn gl(self) -> u32 {
        self as u32
    }

    /// Index type for indices `width` bytes wide.
    ///
    /// Widths of 0 and 1 are bytes, 2 is shorts and 4 is ints. Any other width,
    /// including 3, is not an index width and yields `None`.
    pub const fn from_byte_width(width: u32) -> Option<Self> {
        match width {
            0 | 1 => Some(IndexType::UnsignedByte),
            2 => Some(IndexType::UnsignedShort),
            4 => Some(IndexType::UnsignedInt),
            _ => None,
        }
    }

    /// Bytes per index.
    pub const fn byte_width(self) -> u32 {
        match self {
            IndexType::UnsignedByte => 1,
            IndexType::UnsignedShort => 2,
            IndexType::UnsignedInt => 4,
        }
    }
}

impl<C: GraphicsContext> DrawContext<C> {
    /// Draws `count` vertices starting at vertex `first`.
    pub fn draw(&mut self, primitive: Primitive, first: u32, count: u32) -> &mut Self {
        self.gl.draw_arrays(
            primitive.gl(),
            i32::try_from(first).unwrap_or(i32::MAX),
            i32::try_from(count).unwrap_or(i32::MAX),
        );
        self
    }

    /// Draws `count` indices from the bound index buffer, starting at index `offset`.
    pub fn draw_indexed(
        &mut self,
        primitive: Primitive,
        offset: u32,
        count: u32,
        index_type: IndexType,
    ) -> &mut Self {
        let byte_offset = u64::from(offset) * u64::from(index_type.byte_width());
        self.gl.draw_elements(
            primitive.gl(),
            i32::try_from(count).unwrap_or(i32::MAX),
            index_type.gl(),
            i32::try_from(byte_offset).unwrap_or(i32::MAX),
        );
        self
    }

    pub fn draw_points(&mut self, first: u32, count: u32) -> &mut Self {
        self.draw(Primitive::Points, first, count)
    }

    pub fn draw_lines(&mut self, first: u32, count: u32) -> &mut Self {
        self.draw(Primitive::Lines, first, count)
    }

    pub fn draw_line_loop(&mut self, first: u32, count: u32) -> &mut Self {
        self.draw(Primitive::LineLoop, first, count)
    }

    pub fn draw_line_strip(&mut self, first: u32, count: u32) -> &mut Self {
        self.draw(Primitive::LineStrip, first, count)
    }

    pub fn draw_triangles(&mut self, first: u32, count: u32) -> &mut Self {
        self.draw(Primitive::Triangles, first, count)
    }

    pub fn draw_triangle_fan(&mut self, first: u32, count: u32) -> &mut Self {
        self.draw(Primitive::TriangleFan, first, count)
    }

    pub fn draw_triangle_strip(&mut self, first: u32, count: u32) -> &mut Self {
        self.draw(Primitive::TriangleStrip, first, count)
    }

    pub fn draw_indexed_points(&mut self, offset: u32, count: u32, index_type: IndexType) -> &mut Self {
        self.draw_indexed(Primitive::Points, offset, count, index_type)
    }

    pub fn draw_indexed_lines(&mut self, offset: u32, count: u32, index_type: IndexType) -> &mut Self {
        self.draw_indexed(Primitive::Lines, offset, count, index_type)
    }

    pub fn draw_indexed_line_loop(&mut self, offset: u32, count: u32, index_type: IndexType) -> &mut Self {
        self.draw_indexed(Primitive::LineLoop, offset, count, index_type)
    }

    pub fn draw_indexed_line_strip(&mut self, offset: u32, count: u32, index_type: IndexType) -> &mut Self {
        self.draw_indexed(Primitive::LineStrip, offset, count, index_type)
    }

    pub fn draw_indexed_triangles(&mut self, offset: u32, count: u32, index_type: IndexType) -> &mut Self {
        self.draw_indexed(Primitive::Triangles, offset, count, index_type)
    }

    pub fn draw_indexed_triangle_fan(&mut self, offset: u32, count: u32, index_type: IndexType) -> &mut Self {
        self.draw_indexed(Primitive::TriangleFan, offset, count, index_type)
    }

    pub fn draw_indexed_triangle_strip(&mut self, offset: u32, count: u32, index_type: IndexType) -> &mut Self {
        self.draw_indexed(Primitive::TriangleStrip, offset, count, index_type)
    }
}
