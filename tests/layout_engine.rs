// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
use resources_and_state::Error;
use resources_and_state::images::vertex_layout::{
    create_buffer_view, element_size, field_size, interleave, sort_fields, DataType, Field,
    FieldData, Scalar,
};
use resources_and_state::pixel_formats::{
    image_storage_attributes, mip_level_count, mip_level_dimension, PixelFormat, PixelType,
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_test::wasm_bindgen_test as test;

#[test]
fn element_size_ends_at_the_last_field() {
    let mut fields = vec![
        Field::new("normal", DataType::Float, 12, 3, false),
        Field::new("position", DataType::Float, 0, 3, false),
        Field::new("color", DataType::UnsignedByte, 24, 4, true),
        Field::new("weight", DataType::Short, 28, 1, false),
    ];
    sort_fields(&mut fields);
    assert_eq!(fields[0].name, "position");
    let last = fields.last().unwrap();
    assert_eq!(element_size(&fields), last.byte_offset + field_size(last));
    assert_eq!(element_size(&fields), 30);
    assert_eq!(element_size(&fields[..1]), 12);
}

#[test]
fn interleaved_values_read_back_exactly() {
    let fields = [
        Field::new("size", DataType::Float, 0, 1, false),
        Field::new("position", DataType::Float, 4, 3, false),
        Field::new("color", DataType::UnsignedByte, 16, 4, true),
    ];
    let sizes = [0.5f32, 1.5];
    let positions = [1.0f32, 2.0, 3.0, -4.0, -5.0, -6.0];
    let colors = [255u8, 128, 0, 64, 1, 2, 3, 4];
    let out = interleave(
        &fields,
        &[
            FieldData::F32(&sizes),
            FieldData::F32(&positions),
            FieldData::U8(&colors),
        ],
        2,
    )
    .unwrap();
    assert_eq!(out.buffer.len(), element_size(&fields) * 2);

    // read back through an independent view, advanced by stride
    let mut view = create_buffer_view(&fields);
    for element in 0..2 {
        assert_eq!(view.read(&out.buffer, 0, 0), Some(Scalar::F32(sizes[element])));
        for c in 0..3 {
            assert_eq!(
                view.read(&out.buffer, 1, c),
                Some(Scalar::F32(positions[element * 3 + c]))
            );
        }
        for c in 0..4 {
            assert_eq!(
                view.read(&out.buffer, 2, c),
                Some(Scalar::U8(colors[element * 4 + c]))
            );
        }
        view.advance_all();
    }
    view.reset();
    assert_eq!(view.offsets(), view.base_offsets());
}

#[test]
fn short_sources_are_rejected() {
    let fields = [Field::new("position", DataType::Float, 0, 3, false)];
    let result = interleave(&fields, &[FieldData::F32(&[0.0; 5])], 2);
    assert!(matches!(
        result,
        Err(Error::SourceTooShort { needed: 6, len: 5, .. })
    ));
}

#[test]
fn mip_math() {
    assert_eq!(mip_level_count(256, 256, 1), 9);
    assert_eq!(mip_level_count(1, 1, 1), 1);
    assert_eq!(mip_level_dimension(256, 8), 1);
    assert_eq!(mip_level_dimension(17, 1), 8);
}

#[test]
fn image_storage() {
    let rgba = image_storage_attributes(5, 5, PixelFormat::Rgba, PixelType::UnsignedByte);
    assert_eq!(rgba.byte_size, 100);

    let dxt5 = image_storage_attributes(
        5,
        5,
        PixelFormat::CompressedRgbaS3tcDxt5Ext,
        PixelType::UnsignedByte,
    );
    // a 2x2 grid of 16 byte blocks
    assert_eq!((dxt5.width, dxt5.height), (8, 8));
    assert_eq!(dxt5.byte_size, 64);
}
