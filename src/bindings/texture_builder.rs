// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Builder for texture attributes and their level tables.

use crate::bindings::sampler::{MagFilter, MinFilter, TextureTarget, WrapMode};
use crate::bindings::texture::{LevelDesc, TextureAttributes};
use crate::bindings::visible_to::TextureUsage;
use crate::pixel_formats::{
    image_storage_attributes, mip_level_count, mip_level_dimension, PixelFormat, PixelType,
};

/// Lays out a texture's levels back to back in one byte store.
///
/// Each level's size comes from [`image_storage_attributes`], so compressed formats get
/// their padded or clamped dimensions. Without mipmaps the chain has a single level.
///
/// ```
/// use resources_and_state::bindings::texture_builder::LevelChain;
///
/// let chain = LevelChain::new(4, 2).with_mipmaps(true);
/// let levels = chain.levels();
/// assert_eq!(levels.len(), 3);
/// assert_eq!((levels[2].width, levels[2].height), (1, 1));
/// assert_eq!(levels[1].byte_offset, 32);
/// assert_eq!(chain.total_size(), 32 + 8 + 4);
/// ```
#[derive(Debug, Clone)]
pub struct LevelChain {
    width: u32,
    height: u32,
    format: PixelFormat,
    pixel_type: PixelType,
    mipmaps: bool,
    usage: TextureUsage,
    target: TextureTarget,
    wrap: (WrapMode, WrapMode),
    filters: (MinFilter, MagFilter),
    user_type: String,
}

impl LevelChain {
    /// An RGBA8 chain. Zero dimensions become one.
    pub fn new(width: u32, height: u32) -> Self {
        LevelChain {
            width: width.max(1),
            height: height.max(1),
            format: PixelFormat::default(),
            pixel_type: PixelType::default(),
            mipmaps: false,
            usage: TextureUsage::default(),
            target: TextureTarget::default(),
            wrap: (WrapMode::default(), WrapMode::default()),
            filters: (MinFilter::default(), MagFilter::default()),
            user_type: String::new(),
        }
    }

    pub fn with_format(mut self, format: PixelFormat, pixel_type: PixelType) -> Self {
        self.format = format;
        self.pixel_type = pixel_type;
        self
    }

    /// Extend the chain down to 1x1.
    pub fn with_mipmaps(mut self, mipmaps: bool) -> Self {
        self.mipmaps = mipmaps;
        self
    }

    pub fn with_target(mut self, usage: TextureUsage, target: TextureTarget) -> Self {
        self.usage = usage;
        self.target = target;
        self
    }

    pub fn with_wrap(mut self, s: WrapMode, t: WrapMode) -> Self {
        self.wrap = (s, t);
        self
    }

    pub fn with_filters(mut self, min: MinFilter, mag: MagFilter) -> Self {
        self.filters = (min, mag);
        self
    }

    pub fn with_user_type(mut self, user_type: impl Into<String>) -> Self {
        self.user_type = user_type.into();
        self
    }

    pub fn level_count(&self) -> usize {
        if self.mipmaps {
            mip_level_count(self.width as usize, self.height as usize, 1)
        } else {
            1
        }
    }

    pub fn levels(&self) -> Vec<LevelDesc> {
        let mut byte_offset = 0;
        (0..self.level_count())
            .map(|level| {
                let storage = image_storage_attributes(
                    mip_level_dimension(self.width as usize, level),
                    mip_level_dimension(self.height as usize, level),
                    self.format,
                    self.pixel_type,
                );
                let desc = LevelDesc {
                    width: u32::try_from(storage.width).unwrap_or(u32::MAX),
                    height: u32::try_from(storage.height).unwrap_or(u32::MAX),
                    byte_size: storage.byte_size,
                    byte_offset,
                };
                byte_offset += storage.byte_size;
                desc
            })
            .collect()
    }

    /// Bytes needed to hold every level.
    pub fn total_size(&self) -> usize {
        self.levels().iter().map(|l| l.byte_size).sum()
    }

    pub fn attributes(&self) -> TextureAttributes {
        TextureAttributes {
            user_type: self.user_type.clone(),
            usage: self.usage,
            target: self.target,
            format: self.format,
            data_type: self.pixel_type,
            wrap_s: self.wrap.0,
            wrap_t: self.wrap.1,
            mag_filter: self.filters.1,
            min_filter: self.filters.0,
            compressed: self.format.is_compressed(),
            has_mipmaps: self.mipmaps,
            levels: self.levels(),
        }
    }
}
