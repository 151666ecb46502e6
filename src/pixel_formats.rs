// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Pixel formats, pixel unit types, and image storage sizing.
//!
//! An image level is described by two values:
//!
//! - a [`PixelFormat`], which fixes how many components a logical pixel has, or for the
//!   block-compressed formats, how pixels are grouped into blocks
//! - a [`PixelType`], which fixes the width of the smallest addressable unit of data
//!
//! From these, [`image_storage_attributes`] computes how many bytes one level occupies,
//! and [`create_image_view`] carves that level out of a larger backing store.
//!
//! # Examples
//!
//! ```
//! use resources_and_state::pixel_formats::{image_storage_attributes, PixelFormat, PixelType};
//!
//! let storage = image_storage_attributes(5, 5, PixelFormat::Rgba, PixelType::UnsignedByte);
//! assert_eq!(storage.byte_size, 100);
//!
//! // DXT1 sizes by 4x4 blocks, so a 5x5 image occupies a 2x2 block grid.
//! let dxt = image_storage_attributes(5, 5, PixelFormat::CompressedRgbS3tcDxt1Ext, PixelType::UnsignedByte);
//! assert_eq!((dxt.width, dxt.height, dxt.byte_size), (8, 8, 32));
//! ```
//!
//! Mip chains follow the usual halving rule:
//!
//! ```
//! use resources_and_state::pixel_formats::{mip_level_count, mip_level_dimension};
//! assert_eq!(mip_level_count(256, 256, 1), 9);
//! assert_eq!(mip_level_dimension(17, 1), 8);
//! ```

use crate::sys;
use serde::{Deserialize, Serialize};

pub use half::f16;

/// Layout of a logical pixel.
///
/// Uncompressed formats are sized per component; the compressed formats are sized per
/// block and need the matching extension on the context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u32)]
pub enum PixelFormat {
    Alpha = sys::ALPHA,
    Luminance = sys::LUMINANCE,
    LuminanceAlpha = sys::LUMINANCE_ALPHA,
    Rgb = sys::RGB,
    #[default]
    Rgba = sys::RGBA,
    DepthComponent = sys::DEPTH_COMPONENT,
    DepthStencil = sys::DEPTH_STENCIL,
    SrgbExt = sys::SRGB_EXT,
    SrgbAlphaExt = sys::SRGB_ALPHA_EXT,
    CompressedRgbS3tcDxt1Ext = sys::COMPRESSED_RGB_S3TC_DXT1_EXT,
    CompressedRgbaS3tcDxt1Ext = sys::COMPRESSED_RGBA_S3TC_DXT1_EXT,
    CompressedRgbaS3tcDxt3Ext = sys::COMPRESSED_RGBA_S3TC_DXT3_EXT,
    CompressedRgbaS3tcDxt5Ext = sys::COMPRESSED_RGBA_S3TC_DXT5_EXT,
    CompressedRgbAtcWebgl = sys::COMPRESSED_RGB_ATC_WEBGL,
    CompressedRgbaAtcExplicitAlphaWebgl = sys::COMPRESSED_RGBA_ATC_EXPLICIT_ALPHA_WEBGL,
    CompressedRgbaAtcInterpolatedAlphaWebgl = sys::COMPRESSED_RGBA_ATC_INTERPOLATED_ALPHA_WEBGL,
    #[serde(rename = "COMPRESSED_RGB_PVRTC_4BPPV1_IMG")]
    CompressedRgbPvrtc4BppV1Img = sys::COMPRESSED_RGB_PVRTC_4BPPV1_IMG,
    #[serde(rename = "COMPRESSED_RGB_PVRTC_2BPPV1_IMG")]
    CompressedRgbPvrtc2BppV1Img = sys::COMPRESSED_RGB_PVRTC_2BPPV1_IMG,
    #[serde(rename = "COMPRESSED_RGBA_PVRTC_4BPPV1_IMG")]
    CompressedRgbaPvrtc4BppV1Img = sys::COMPRESSED_RGBA_PVRTC_4BPPV1_IMG,
    #[serde(rename = "COMPRESSED_RGBA_PVRTC_2BPPV1_IMG")]
    CompressedRgbaPvrtc2BppV1Img = sys::COMPRESSED_RGBA_PVRTC_2BPPV1_IMG,
}

/// How a compressed format groups its pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    /// 4x4 pixel blocks of a fixed byte size.
    Block { bytes_per_block: usize },
    /// PVRTC: a minimum image size and a fixed number of bits per pixel.
    Pvrtc {
        min_width: usize,
        min_height: usize,
        bits_per_pixel: usize,
    },
}

impl PixelFormat {
    pub const ALL: [PixelFormat; 20] = [
        PixelFormat::Alpha,
        PixelFormat::Luminance,
        PixelFormat::LuminanceAlpha,
        PixelFormat::Rgb,
        PixelFormat::Rgba,
        PixelFormat::DepthComponent,
        PixelFormat::DepthStencil,
        PixelFormat::SrgbExt,
        PixelFormat::SrgbAlphaExt,
        PixelFormat::CompressedRgbS3tcDxt1Ext,
        PixelFormat::CompressedRgbaS3tcDxt1Ext,
        PixelFormat::CompressedRgbaS3tcDxt3Ext,
        PixelFormat::CompressedRgbaS3tcDxt5Ext,
        PixelFormat::CompressedRgbAtcWebgl,
        PixelFormat::CompressedRgbaAtcExplicitAlphaWebgl,
        PixelFormat::CompressedRgbaAtcInterpolatedAlphaWebgl,
        PixelFormat::CompressedRgbPvrtc4BppV1Img,
        PixelFormat::CompressedRgbPvrtc2BppV1Img,
        PixelFormat::CompressedRgbaPvrtc4BppV1Img,
        PixelFormat::CompressedRgbaPvrtc2BppV1Img,
    ];

    pub const fn gl(self) -> u32 {
        self as u32
    }

    pub fn from_gl(value: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.gl() == value)
    }

    /// Components in one logical pixel.
    pub const fn component_count(self) -> usize {
        match self {
            PixelFormat::Alpha | PixelFormat::Luminance | PixelFormat::DepthComponent => 1,
            PixelFormat::LuminanceAlpha | PixelFormat::DepthStencil => 2,
            PixelFormat::Rgb
            | PixelFormat::SrgbExt
            | PixelFormat::CompressedRgbS3tcDxt1Ext
            | PixelFormat::CompressedRgbAtcWebgl
            | PixelFormat::CompressedRgbPvrtc4BppV1Img
            | PixelFormat::CompressedRgbPvrtc2BppV1Img => 3,
            _ => 4,
        }
    }

    pub const fn compression(self) -> Option<Compression> {
        match self {
            PixelFormat::CompressedRgbS3tcDxt1Ext
            | PixelFormat::CompressedRgbaS3tcDxt1Ext
            | PixelFormat::CompressedRgbAtcWebgl => Some(Compression::Block { bytes_per_block: 8 }),
            PixelFormat::CompressedRgbaS3tcDxt3Ext
            | PixelFormat::CompressedRgbaS3tcDxt5Ext
            | PixelFormat::CompressedRgbaAtcExplicitAlphaWebgl
            | PixelFormat::CompressedRgbaAtcInterpolatedAlphaWebgl => {
                Some(Compression::Block { bytes_per_block: 16 })
            }
            PixelFormat::CompressedRgbPvrtc2BppV1Img | PixelFormat::CompressedRgbaPvrtc2BppV1Img => {
                Some(Compression::Pvrtc {
                    min_width: 16,
                    min_height: 8,
                    bits_per_pixel: 2,
                })
            }
            PixelFormat::CompressedRgbPvrtc4BppV1Img | PixelFormat::CompressedRgbaPvrtc4BppV1Img => {
                Some(Compression::Pvrtc {
                    min_width: 8,
                    min_height: 8,
                    bits_per_pixel: 4,
                })
            }
            _ => None,
        }
    }

    pub const fn is_compressed(self) -> bool {
        self.compression().is_some()
    }
}

/// Width and interpretation of the smallest addressable unit of image data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u32)]
pub enum PixelType {
    #[default]
    UnsignedByte = sys::UNSIGNED_BYTE,
    UnsignedShort = sys::UNSIGNED_SHORT,
    UnsignedInt = sys::UNSIGNED_INT,
    Float = sys::FLOAT,
    HalfFloatOes = sys::HALF_FLOAT_OES,
    #[serde(rename = "UNSIGNED_SHORT_5_6_5")]
    UnsignedShort565 = sys::UNSIGNED_SHORT_5_6_5,
    #[serde(rename = "UNSIGNED_SHORT_4_4_4_4")]
    UnsignedShort4444 = sys::UNSIGNED_SHORT_4_4_4_4,
    #[serde(rename = "UNSIGNED_SHORT_5_5_5_1")]
    UnsignedShort5551 = sys::UNSIGNED_SHORT_5_5_5_1,
    #[serde(rename = "UNSIGNED_INT_24_8_WEBGL")]
    UnsignedInt248Webgl = sys::UNSIGNED_INT_24_8_WEBGL,
}

impl PixelType {
    pub const ALL: [PixelType; 9] = [
        PixelType::UnsignedByte,
        PixelType::UnsignedShort,
        PixelType::UnsignedInt,
        PixelType::Float,
        PixelType::HalfFloatOes,
        PixelType::UnsignedShort565,
        PixelType::UnsignedShort4444,
        PixelType::UnsignedShort5551,
        PixelType::UnsignedInt248Webgl,
    ];

    pub const fn gl(self) -> u32 {
        self as u32
    }

    pub fn from_gl(value: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.gl() == value)
    }

    /// Bytes in one unit of this type.
    pub const fn unit_size(self) -> usize {
        match self {
            PixelType::UnsignedByte => 1,
            PixelType::UnsignedShort
            | PixelType::HalfFloatOes
            | PixelType::UnsignedShort565
            | PixelType::UnsignedShort4444
            | PixelType::UnsignedShort5551 => 2,
            PixelType::UnsignedInt | PixelType::Float | PixelType::UnsignedInt248Webgl => 4,
        }
    }

    /// Packed types hold a whole pixel in one unit.
    pub const fn is_packed(self) -> bool {
        matches!(
            self,
            PixelType::UnsignedShort565
                | PixelType::UnsignedShort4444
                | PixelType::UnsignedShort5551
                | PixelType::UnsignedInt248Webgl
        )
    }
}

/// Storage requirements of one image level.
///
/// `width` and `height` may be larger than requested: block-compressed formats pad to
/// whole blocks and PVRTC clamps to its minimum size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageStorage {
    pub width: usize,
    pub height: usize,
    pub byte_size: usize,
}

/// Computes the byte size of one image level.
pub fn image_storage_attributes(
    width: usize,
    height: usize,
    format: PixelFormat,
    pixel_type: PixelType,
) -> ImageStorage {
    match format.compression() {
        Some(Compression::Block { bytes_per_block }) => {
            let blocks_wide = width.div_ceil(4);
            let blocks_high = height.div_ceil(4);
            ImageStorage {
                width: blocks_wide * 4,
                height: blocks_high * 4,
                byte_size: blocks_wide * blocks_high * bytes_per_block,
            }
        }
        Some(Compression::Pvrtc {
            min_width,
            min_height,
            bits_per_pixel,
        }) => {
            let width = width.max(min_width);
            let height = height.max(min_height);
            ImageStorage {
                width,
                height,
                byte_size: width * height * bits_per_pixel / 8,
            }
        }
        None => {
            let byte_size = if pixel_type.is_packed() {
                width * height * pixel_type.unit_size()
            } else {
                width * height * format.component_count() * pixel_type.unit_size()
            };
            ImageStorage {
                width,
                height,
                byte_size,
            }
        }
    }
}

/// A typed window onto one level of a larger image store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageView<'a> {
    pixel_type: PixelType,
    bytes: &'a [u8],
}

impl<'a> ImageView<'a> {
    pub fn pixel_type(&self) -> PixelType {
        self.pixel_type
    }

    /// Width in bytes of each unit in the view.
    pub fn unit_width(&self) -> usize {
        self.pixel_type.unit_size()
    }

    /// Number of whole units in the view.
    pub fn len(&self) -> usize {
        self.bytes.len() / self.unit_width()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Unit `index` zero-extended to 32 bits, in native byte order.
    pub fn unit(&self, index: usize) -> Option<u32> {
        let width = self.unit_width();
        let start = index.checked_mul(width)?;
        let chunk = self.bytes.get(start..start + width)?;
        Some(match width {
            1 => u32::from(chunk[0]),
            2 => u32::from(bytemuck::pod_read_unaligned::<u16>(chunk)),
            _ => bytemuck::pod_read_unaligned::<u32>(chunk),
        })
    }

    /// Unit `index` of a `FLOAT` or `HALF_FLOAT_OES` view.
    pub fn float(&self, index: usize) -> Option<f32> {
        match self.pixel_type {
            PixelType::Float => self.unit(index).map(f32::from_bits),
            PixelType::HalfFloatOes => self
                .unit(index)
                .map(|bits| f16::from_bits(bits as u16).to_f32()),
            _ => None,
        }
    }
}

/// Views `size` bytes of `data` starting at `offset`, typed by `unit_type`.
///
/// Returns `None` if the range does not fit in `data`.
pub fn create_image_view(
    data: &[u8],
    unit_type: PixelType,
    offset: usize,
    size: usize,
) -> Option<ImageView<'_>> {
    let end = offset.checked_add(size)?;
    let bytes = data.get(offset..end)?;
    // a trailing partial unit is not addressable
    let whole = bytes.len() - bytes.len() % unit_type.unit_size();
    Some(ImageView {
        pixel_type: unit_type,
        bytes: &bytes[..whole],
    })
}

/// Levels in a full mip chain, down to and including the 1x1 level.
///
/// Zero dimensions count as one.
pub fn mip_level_count(width: usize, height: usize, slices: usize) -> usize {
    let major = width.max(1).max(height.max(1)).max(slices.max(1));
    (usize::BITS - major.leading_zeros()) as usize
}

/// Size of `base_dimension` at `level_index`, never below one.
pub fn mip_level_dimension(base_dimension: usize, level_index: usize) -> usize {
    base_dimension
        .checked_shr(level_index as u32)
        .unwrap_or(0)
        .max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mip_math() {
        assert_eq!(mip_level_count(256, 256, 1), 9);
        assert_eq!(mip_level_count(1, 1, 1), 1);
        assert_eq!(mip_level_count(0, 0, 0), 1);
        assert_eq!(mip_level_count(300, 17, 1), 9);
        assert_eq!(mip_level_count(4, 4, 64), 7);
        assert_eq!(mip_level_dimension(256, 8), 1);
        assert_eq!(mip_level_dimension(256, 9), 1);
        assert_eq!(mip_level_dimension(17, 1), 8);
        assert_eq!(mip_level_dimension(17, 200), 1);
    }

    #[test]
    fn uncompressed_sizes() {
        let s = image_storage_attributes(5, 5, PixelFormat::Rgba, PixelType::UnsignedByte);
        assert_eq!(s, ImageStorage { width: 5, height: 5, byte_size: 100 });
        let s = image_storage_attributes(4, 2, PixelFormat::Rgb, PixelType::Float);
        assert_eq!(s.byte_size, 96);
        let s = image_storage_attributes(4, 2, PixelFormat::LuminanceAlpha, PixelType::HalfFloatOes);
        assert_eq!(s.byte_size, 32);
        // packed types ignore the component count
        let s = image_storage_attributes(3, 3, PixelFormat::Rgba, PixelType::UnsignedShort4444);
        assert_eq!(s.byte_size, 18);
        let s = image_storage_attributes(3, 3, PixelFormat::DepthStencil, PixelType::UnsignedInt248Webgl);
        assert_eq!(s.byte_size, 36);
    }

    #[test]
    fn compressed_sizes() {
        let s = image_storage_attributes(5, 5, PixelFormat::CompressedRgbaS3tcDxt5Ext, PixelType::UnsignedByte);
        assert_eq!(s, ImageStorage { width: 8, height: 8, byte_size: 64 });
        let s = image_storage_attributes(4, 4, PixelFormat::CompressedRgbAtcWebgl, PixelType::UnsignedByte);
        assert_eq!(s.byte_size, 8);
        let s = image_storage_attributes(1, 1, PixelFormat::CompressedRgbPvrtc2BppV1Img, PixelType::UnsignedByte);
        assert_eq!(s, ImageStorage { width: 16, height: 8, byte_size: 32 });
        let s = image_storage_attributes(32, 32, PixelFormat::CompressedRgbaPvrtc4BppV1Img, PixelType::UnsignedByte);
        assert_eq!(s, ImageStorage { width: 32, height: 32, byte_size: 512 });
    }

    #[test]
    fn image_views_respect_bounds() {
        let data: Vec<u8> = (0..16).collect();
        let view = create_image_view(&data, PixelType::UnsignedShort, 4, 8).unwrap();
        assert_eq!(view.len(), 4);
        assert_eq!(view.unit(0), Some(u32::from(u16::from_ne_bytes([4, 5]))));
        assert_eq!(view.unit(4), None);
        assert!(create_image_view(&data, PixelType::UnsignedByte, 10, 8).is_none());

        let halves: Vec<u8> = [f16::from_f32(0.5), f16::from_f32(-2.0)]
            .iter()
            .flat_map(|h| h.to_bits().to_ne_bytes())
            .collect();
        let view = create_image_view(&halves, PixelType::HalfFloatOes, 0, 4).unwrap();
        assert_eq!(view.float(1), Some(-2.0));
    }

    #[test]
    fn gl_round_trip() {
        for format in PixelFormat::ALL {
            assert_eq!(PixelFormat::from_gl(format.gl()), Some(format));
        }
        assert_eq!(PixelType::from_gl(0x8D61), Some(PixelType::HalfFloatOes));
        assert_eq!(PixelType::from_gl(0xDEAD), None);
    }
}
