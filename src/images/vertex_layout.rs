// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Element layouts for interleaved vertex and index buffers.
//!
//! An element is one structured record in a buffer, such as one vertex. It is described
//! by a list of [`Field`]s, each naming a shader attribute and giving its scalar type,
//! byte offset and component count.
//!
//! # Overview
//!
//! Fields belonging to one element must be sorted by ascending byte offset. The stride
//! of the element is the last field's offset plus that field's size, so trailing padding
//! is whatever the caller builds into the last field's offset. Nothing here rounds or
//! aligns on the caller's behalf.
//!
//! # Example
//!
//! ```
//! use resources_and_state::images::vertex_layout::{
//!     element_size, interleave, DataType, Field, FieldData,
//! };
//!
//! let fields = vec![
//!     Field::new("position", DataType::Float, 0, 3, false),
//!     Field::new("color", DataType::UnsignedByte, 12, 4, true),
//! ];
//! assert_eq!(element_size(&fields), 16);
//!
//! let positions = [0.0f32, 1.0, 2.0, 3.0, 4.0, 5.0];
//! let colors = [255u8, 0, 0, 255, 0, 255, 0, 255];
//! let out = interleave(
//!     &fields,
//!     &[FieldData::F32(&positions), FieldData::U8(&colors)],
//!     2,
//! )
//! .unwrap();
//! assert_eq!(out.buffer.len(), 32);
//! ```

use crate::error::Error;
use crate::sys;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Scalar type of one field component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u32)]
pub enum DataType {
    Byte = sys::BYTE,
    UnsignedByte = sys::UNSIGNED_BYTE,
    Short = sys::SHORT,
    UnsignedShort = sys::UNSIGNED_SHORT,
    Int = sys::INT,
    UnsignedInt = sys::UNSIGNED_INT,
    #[default]
    Float = sys::FLOAT,
}

impl DataType {
    pub const ALL: [DataType; 7] = [
        DataType::Byte,
        DataType::UnsignedByte,
        DataType::Short,
        DataType::UnsignedShort,
        DataType::Int,
        DataType::UnsignedInt,
        DataType::Float,
    ];

    pub const fn gl(self) -> u32 {
        self as u32
    }

    pub fn from_gl(value: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.gl() == value)
    }

    /// Bytes in one component.
    pub const fn unit_size(self) -> usize {
        match self {
            DataType::Byte | DataType::UnsignedByte => 1,
            DataType::Short | DataType::UnsignedShort => 2,
            DataType::Int | DataType::UnsignedInt | DataType::Float => 4,
        }
    }
}

/// One attribute inside an element.
///
/// The name should match the attribute name in the shader program that reads it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    pub data_type: DataType,
    /// Offset of the first component from the start of the element.
    pub byte_offset: usize,
    /// Number of components, e.g. 3 for a three-component vector.
    pub dimension: usize,
    /// Whether integer data is mapped into `[0, 1]` before the shader sees it.
    pub normalize: bool,
}

impl Field {
    pub fn new(
        name: impl Into<String>,
        data_type: DataType,
        byte_offset: usize,
        dimension: usize,
        normalize: bool,
    ) -> Self {
        Field {
            name: name.into(),
            data_type,
            byte_offset,
            dimension,
            normalize,
        }
    }

    /// Size of this field in bytes.
    pub fn size(&self) -> usize {
        field_size(self)
    }
}

/// Size of `field` in bytes.
pub fn field_size(field: &Field) -> usize {
    field.data_type.unit_size() * field.dimension
}

/// Stride of an element made of `fields`, which must be sorted by byte offset.
///
/// ```
/// use resources_and_state::images::vertex_layout::{element_size, DataType, Field};
/// // 8 bytes of padding after the position, declared through the second offset
/// let fields = [
///     Field::new("position", DataType::Float, 0, 2, false),
///     Field::new("uv", DataType::UnsignedShort, 16, 2, true),
/// ];
/// assert_eq!(element_size(&fields), 20);
/// assert_eq!(element_size(&[]), 0);
/// ```
pub fn element_size(fields: &[Field]) -> usize {
    match fields.last() {
        Some(last) => last.byte_offset + field_size(last),
        None => 0,
    }
}

/// Orders fields by ascending byte offset.
pub fn order_by_byte_offset(a: &Field, b: &Field) -> Ordering {
    a.byte_offset.cmp(&b.byte_offset)
}

/// Sorts `fields` into the order [`element_size`] and [`BufferView`] expect.
pub fn sort_fields(fields: &mut [Field]) {
    fields.sort_by(order_by_byte_offset);
}

/// A single component value of any [`DataType`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    F32(f32),
}

impl Scalar {
    pub fn to_f64(self) -> f64 {
        match self {
            Scalar::I8(v) => v.into(),
            Scalar::U8(v) => v.into(),
            Scalar::I16(v) => v.into(),
            Scalar::U16(v) => v.into(),
            Scalar::I32(v) => v.into(),
            Scalar::U32(v) => v.into(),
            Scalar::F32(v) => v.into(),
        }
    }

    /// Converts to `data_type` with `as` semantics: floats truncate, out-of-range values saturate.
    pub fn cast(self, data_type: DataType) -> Scalar {
        let v = self.to_f64();
        match data_type {
            DataType::Byte => Scalar::I8(v as i8),
            DataType::UnsignedByte => Scalar::U8(v as u8),
            DataType::Short => Scalar::I16(v as i16),
            DataType::UnsignedShort => Scalar::U16(v as u16),
            DataType::Int => Scalar::I32(v as i32),
            DataType::UnsignedInt => Scalar::U32(v as u32),
            DataType::Float => Scalar::F32(v as f32),
        }
    }

    fn write_to(self, out: &mut [u8]) {
        match self {
            Scalar::I8(v) => out.copy_from_slice(bytemuck::bytes_of(&v)),
            Scalar::U8(v) => out.copy_from_slice(bytemuck::bytes_of(&v)),
            Scalar::I16(v) => out.copy_from_slice(bytemuck::bytes_of(&v)),
            Scalar::U16(v) => out.copy_from_slice(bytemuck::bytes_of(&v)),
            Scalar::I32(v) => out.copy_from_slice(bytemuck::bytes_of(&v)),
            Scalar::U32(v) => out.copy_from_slice(bytemuck::bytes_of(&v)),
            Scalar::F32(v) => out.copy_from_slice(bytemuck::bytes_of(&v)),
        }
    }

    fn read_from(data_type: DataType, bytes: &[u8]) -> Scalar {
        match data_type {
            DataType::Byte => Scalar::I8(bytemuck::pod_read_unaligned(bytes)),
            DataType::UnsignedByte => Scalar::U8(bytes[0]),
            DataType::Short => Scalar::I16(bytemuck::pod_read_unaligned(bytes)),
            DataType::UnsignedShort => Scalar::U16(bytemuck::pod_read_unaligned(bytes)),
            DataType::Int => Scalar::I32(bytemuck::pod_read_unaligned(bytes)),
            DataType::UnsignedInt => Scalar::U32(bytemuck::pod_read_unaligned(bytes)),
            DataType::Float => Scalar::F32(bytemuck::pod_read_unaligned(bytes)),
        }
    }
}

impl From<f32> for Scalar {
    fn from(v: f32) -> Self {
        Scalar::F32(v)
    }
}

impl From<u8> for Scalar {
    fn from(v: u8) -> Self {
        Scalar::U8(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Scalar::I32(v)
    }
}

impl From<u16> for Scalar {
    fn from(v: u16) -> Self {
        Scalar::U16(v)
    }
}

/// Per-field source values for [`interleave`], laid out `element * dimension + component`.
#[derive(Debug, Clone, Copy)]
pub enum FieldData<'a> {
    I8(&'a [i8]),
    U8(&'a [u8]),
    I16(&'a [i16]),
    U16(&'a [u16]),
    I32(&'a [i32]),
    U32(&'a [u32]),
    F32(&'a [f32]),
}

impl FieldData<'_> {
    pub fn len(&self) -> usize {
        match self {
            FieldData::I8(s) => s.len(),
            FieldData::U8(s) => s.len(),
            FieldData::I16(s) => s.len(),
            FieldData::U16(s) => s.len(),
            FieldData::I32(s) => s.len(),
            FieldData::U32(s) => s.len(),
            FieldData::F32(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<Scalar> {
        match self {
            FieldData::I8(s) => s.get(index).copied().map(Scalar::I8),
            FieldData::U8(s) => s.get(index).copied().map(Scalar::U8),
            FieldData::I16(s) => s.get(index).copied().map(Scalar::I16),
            FieldData::U16(s) => s.get(index).copied().map(Scalar::U16),
            FieldData::I32(s) => s.get(index).copied().map(Scalar::I32),
            FieldData::U32(s) => s.get(index).copied().map(Scalar::U32),
            FieldData::F32(s) => s.get(index).copied().map(Scalar::F32),
        }
    }
}

/// Cursor for one field, in units of that field's data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FieldCursor {
    data_type: DataType,
    base_offset: usize,
    offset: usize,
    size: usize,
}

/**
Strided, typed access into interleaved element storage.

The view holds one cursor per field. Offsets and sizes are measured in units of the
field's own data type, not bytes: a `FLOAT` field at byte 12 of a 16 byte element has
base offset 3 and size 4.

A view does not own or borrow the storage; each accessor takes it as an argument. This
lets one view walk any buffer with the same layout.

```
use resources_and_state::images::vertex_layout::{BufferView, DataType, Field, Scalar};

let fields = [
    Field::new("position", DataType::Float, 0, 2, false),
    Field::new("color", DataType::UnsignedByte, 8, 4, true),
];
let mut storage = vec![0u8; 24];
let mut view = BufferView::new(&fields);
assert_eq!(view.base_offsets(), vec![0, 8]);
assert_eq!(view.sizes(), vec![3, 12]);

view.advance(0);
view.write(&mut storage, 0, 1, 2.5f32);
assert_eq!(view.read(&storage, 0, 1), Some(Scalar::F32(2.5)));
view.reset();
assert_eq!(view.offsets(), vec![0, 8]);
```
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferView {
    cursors: Vec<FieldCursor>,
}

impl BufferView {
    pub fn new(fields: &[Field]) -> Self {
        let stride = element_size(fields);
        let cursors = fields
            .iter()
            .map(|f| {
                let unit = f.data_type.unit_size();
                FieldCursor {
                    data_type: f.data_type,
                    base_offset: f.byte_offset / unit,
                    offset: f.byte_offset / unit,
                    size: stride / unit,
                }
            })
            .collect();
        BufferView { cursors }
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.cursors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cursors.is_empty()
    }

    pub fn data_type(&self, field: usize) -> Option<DataType> {
        self.cursors.get(field).map(|c| c.data_type)
    }

    pub fn base_offsets(&self) -> Vec<usize> {
        self.cursors.iter().map(|c| c.base_offset).collect()
    }

    pub fn offsets(&self) -> Vec<usize> {
        self.cursors.iter().map(|c| c.offset).collect()
    }

    /// Stride of each field in its own units.
    pub fn sizes(&self) -> Vec<usize> {
        self.cursors.iter().map(|c| c.size).collect()
    }

    fn byte_range(&self, field: usize, component: usize) -> Option<(DataType, std::ops::Range<usize>)> {
        let cursor = self.cursors.get(field)?;
        let unit = cursor.data_type.unit_size();
        let start = (cursor.offset + component) * unit;
        Some((cursor.data_type, start..start + unit))
    }

    /// Reads component `component` of `field` at the field's current offset.
    ///
    /// Returns `None` if the field does not exist or the read falls outside `storage`.
    pub fn read(&self, storage: &[u8], field: usize, component: usize) -> Option<Scalar> {
        let (data_type, range) = self.byte_range(field, component)?;
        storage
            .get(range)
            .map(|bytes| Scalar::read_from(data_type, bytes))
    }

    /// Writes `value`, converted to the field's type, at the field's current offset.
    ///
    /// Returns false if the field does not exist or the write falls outside `storage`.
    pub fn write(
        &self,
        storage: &mut [u8],
        field: usize,
        component: usize,
        value: impl Into<Scalar>,
    ) -> bool {
        let Some((data_type, range)) = self.byte_range(field, component) else {
            return false;
        };
        match storage.get_mut(range) {
            Some(out) => {
                value.into().cast(data_type).write_to(out);
                true
            }
            None => false,
        }
    }

    /// Moves `field` to the next element.
    pub fn advance(&mut self, field: usize) {
        if let Some(cursor) = self.cursors.get_mut(field) {
            cursor.offset += cursor.size;
        }
    }

    /// Moves every field to the next element.
    pub fn advance_all(&mut self) {
        for cursor in &mut self.cursors {
            cursor.offset += cursor.size;
        }
    }

    /// Returns every field to its base offset.
    pub fn reset(&mut self) -> &mut Self {
        for cursor in &mut self.cursors {
            cursor.offset = cursor.base_offset;
        }
        self
    }
}

/// Creates a [`BufferView`] over storage laid out by `fields`.
pub fn create_buffer_view(fields: &[Field]) -> BufferView {
    BufferView::new(fields)
}

/// Result of [`interleave`]: the packed bytes and a view positioned at element 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Interleaved {
    pub buffer: Vec<u8>,
    pub view: BufferView,
}

/// Packs per-field source arrays into one buffer of `element_size(fields) * count` bytes.
///
/// Source values are converted to each field's data type. Every source must hold at
/// least `count * dimension` values.
pub fn interleave(fields: &[Field], sources: &[FieldData<'_>], count: usize) -> Result<Interleaved, Error> {
    for (index, field) in fields.iter().enumerate() {
        let needed = count * field.dimension;
        let len = sources.get(index).map_or(0, FieldData::len);
        if len < needed {
            return Err(Error::SourceTooShort {
                field: field.name.clone(),
                needed,
                len,
            });
        }
    }

    let stride = element_size(fields);
    let mut buffer = vec![0u8; stride * count];
    let mut view = BufferView::new(fields);
    for element in 0..count {
        for (index, (field, source)) in fields.iter().zip(sources).enumerate() {
            let base = element * field.dimension;
            for component in 0..field.dimension {
                if let Some(value) = source.get(base + component) {
                    view.write(&mut buffer, index, component, value);
                }
            }
            view.advance(index);
        }
    }
    view.reset();
    Ok(Interleaved { buffer, view })
}
