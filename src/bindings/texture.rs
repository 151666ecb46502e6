// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! 2D and cube-map textures.

A texture's attributes carry an explicit table of levels. Each [`LevelDesc`] says where
one mip level lives inside the byte store handed to [`Texture::upload`], so a whole mip
chain (or one cube face of it) can be uploaded from a single contiguous allocation.
The table is required even without mipmaps; it then has exactly one entry.
[`LevelChain`](crate::bindings::texture_builder::LevelChain) fills it in.

Every operation here that binds the texture restores whatever the active texture unit
had bound before, so calling them does not disturb a draw context's shadow state.
*/

use crate::bindings::resource::{warn_if_backed, Resource};
use crate::bindings::sampler::{MagFilter, MinFilter, TextureTarget, WrapMode};
use crate::bindings::visible_to::{ResourceSubType, ResourceType, TextureUsage};
use crate::diagnostics::Diagnostics;
use crate::error::Error;
use crate::imp::GraphicsContext;
use crate::pixel_formats::{create_image_view, ImageView, PixelFormat, PixelType};
use crate::sys;
use serde::{Deserialize, Serialize};

/// Placement and size of one mip level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LevelDesc {
    pub width: u32,
    pub height: u32,
    pub byte_size: usize,
    pub byte_offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextureAttributes {
    /// Free-form tag for the caller's own bookkeeping.
    #[serde(rename = "type")]
    pub user_type: String,
    pub usage: TextureUsage,
    pub target: TextureTarget,
    pub format: PixelFormat,
    pub data_type: PixelType,
    pub wrap_s: WrapMode,
    pub wrap_t: WrapMode,
    pub mag_filter: MagFilter,
    pub min_filter: MinFilter,
    pub compressed: bool,
    pub has_mipmaps: bool,
    /// Level 0 first.
    pub levels: Vec<LevelDesc>,
}

/// What the draw context records about a bound texture.
pub struct TextureBinding<C: GraphicsContext> {
    pub handle: C::Texture,
    /// `TEXTURE_2D` or `TEXTURE_CUBE_MAP`.
    pub bind_target: u32,
}

impl<C: GraphicsContext> Clone for TextureBinding<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: GraphicsContext> Copy for TextureBinding<C> {}

impl<C: GraphicsContext> PartialEq for TextureBinding<C> {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle && self.bind_target == other.bind_target
    }
}

impl<C: GraphicsContext> std::fmt::Debug for TextureBinding<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextureBinding")
            .field("handle", &self.handle)
            .field("bind_target", &self.bind_target)
            .finish()
    }
}

pub struct Texture<C: GraphicsContext> {
    attributes: TextureAttributes,
    handle: Option<C::Texture>,
}

impl<C: GraphicsContext> std::fmt::Debug for Texture<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Texture")
            .field("attributes", &self.attributes)
            .field("handle", &self.handle)
            .finish()
    }
}

impl<C: GraphicsContext> Default for Texture<C> {
    fn default() -> Self {
        Self::new()
    }
}

fn dimension(value: impl TryInto<i32>) -> i32 {
    value.try_into().unwrap_or(i32::MAX)
}

impl<C: GraphicsContext> Texture<C> {
    pub fn new() -> Self {
        Texture {
            attributes: TextureAttributes::default(),
            handle: None,
        }
    }

    pub fn attributes(&self) -> &TextureAttributes {
        &self.attributes
    }

    pub fn handle(&self) -> Option<C::Texture> {
        self.handle
    }

    pub fn target(&self) -> TextureTarget {
        self.attributes.target
    }

    pub fn levels(&self) -> &[LevelDesc] {
        &self.attributes.levels
    }

    /// Width and height of level 0.
    pub fn size(&self) -> (u32, u32) {
        self.attributes
            .levels
            .first()
            .map_or((0, 0), |level| (level.width, level.height))
    }

    /// Snapshot for draw context binding calls, or `None` if unbacked.
    pub fn binding(&self) -> Option<TextureBinding<C>> {
        if self.handle.is_none() {
            logwise::warn_sync!("binding requested for an unbacked texture");
        }
        self.handle.map(|handle| TextureBinding {
            handle,
            bind_target: self.attributes.target.bind_target(),
        })
    }

    /// Binds the texture on the active unit and returns what was bound there.
    fn bind_saving(&self, gl: &mut C) -> Result<Option<C::Texture>, Error> {
        let handle = self.handle.ok_or(Error::NotBacked(ResourceType::Texture))?;
        let target = self.attributes.target;
        let previous = gl.get_parameter_texture(target.binding_query());
        gl.bind_texture(target.bind_target(), Some(handle));
        Ok(previous)
    }

    fn restore(&self, gl: &mut C, previous: Option<C::Texture>) {
        gl.bind_texture(self.attributes.target.bind_target(), previous);
    }

    fn unpack_exact(gl: &mut C) {
        gl.pixel_store_bool(sys::UNPACK_PREMULTIPLY_ALPHA_WEBGL, false);
        gl.pixel_store_bool(sys::UNPACK_FLIP_Y_WEBGL, false);
        gl.pixel_store_i32(sys::UNPACK_ALIGNMENT, 1);
    }

    fn level_view<'a>(&self, data: &'a [u8], level: usize, desc: &LevelDesc) -> Result<ImageView<'a>, Error> {
        create_image_view(data, self.attributes.data_type, desc.byte_offset, desc.byte_size)
            .ok_or(Error::LevelOutOfRange { level })
    }

    /// Uploads every declared level from `data`.
    ///
    /// Levels are located by their `byte_offset` and `byte_size`. Nothing is uploaded if
    /// any level lies outside `data`.
    pub fn upload(&self, gl: &mut C, data: &[u8]) -> Result<(), Error> {
        let views = self
            .attributes
            .levels
            .iter()
            .enumerate()
            .map(|(level, desc)| self.level_view(data, level, desc))
            .collect::<Result<Vec<_>, _>>()?;
        let previous = self.bind_saving(gl)?;
        Self::unpack_exact(gl);
        let target = self.attributes.target.gl();
        let format = self.attributes.format;
        for (level, (desc, view)) in self.attributes.levels.iter().zip(&views).enumerate() {
            let level = dimension(level);
            if self.attributes.compressed {
                gl.compressed_tex_image_2d(
                    target,
                    level,
                    format.gl() as i32,
                    dimension(desc.width),
                    dimension(desc.height),
                    0,
                    view.as_bytes(),
                );
            } else {
                gl.tex_image_2d(
                    target,
                    level,
                    format.gl() as i32,
                    dimension(desc.width),
                    dimension(desc.height),
                    0,
                    format.gl(),
                    self.attributes.data_type.gl(),
                    Some(view.as_bytes()),
                );
            }
        }
        self.restore(gl, previous);
        Ok(())
    }

    /// Uploads a sub-rectangle of one level.
    ///
    /// `desc` describes the rectangle's size and where it sits in `data`, the same way a
    /// [`LevelDesc`] describes a whole level.
    pub fn upload_region(
        &self,
        gl: &mut C,
        x: i32,
        y: i32,
        level: usize,
        data: &[u8],
        desc: &LevelDesc,
    ) -> Result<(), Error> {
        let view = self.level_view(data, level, desc)?;
        let previous = self.bind_saving(gl)?;
        Self::unpack_exact(gl);
        let target = self.attributes.target.gl();
        let format = self.attributes.format.gl();
        if self.attributes.compressed {
            gl.compressed_tex_sub_image_2d(
                target,
                dimension(level),
                x,
                y,
                dimension(desc.width),
                dimension(desc.height),
                format,
                view.as_bytes(),
            );
        } else {
            gl.tex_sub_image_2d(
                target,
                dimension(level),
                x,
                y,
                dimension(desc.width),
                dimension(desc.height),
                format,
                self.attributes.data_type.gl(),
                view.as_bytes(),
            );
        }
        self.restore(gl, previous);
        Ok(())
    }

    /// Uploads a whole decoded image as level 0, regenerating mips if the texture has them.
    ///
    /// Compressed textures cannot take decoded images; the call does nothing for them.
    pub fn upload_image(
        &self,
        gl: &mut C,
        width: u32,
        height: u32,
        pixels: Option<&[u8]>,
    ) -> Result<(), Error> {
        if self.attributes.compressed {
            return Ok(());
        }
        let previous = self.bind_saving(gl)?;
        Self::unpack_exact(gl);
        let format = self.attributes.format.gl();
        gl.tex_image_2d(
            self.attributes.target.gl(),
            0,
            format as i32,
            dimension(width),
            dimension(height),
            0,
            format,
            self.attributes.data_type.gl(),
            pixels,
        );
        if self.attributes.has_mipmaps {
            gl.generate_mipmap(self.attributes.target.bind_target());
        }
        self.restore(gl, previous);
        Ok(())
    }
}

impl<C: GraphicsContext> Resource<C> for Texture<C> {
    type Attributes = TextureAttributes;

    fn resource_type(&self) -> ResourceType {
        ResourceType::Texture
    }

    fn sub_type(&self) -> ResourceSubType {
        self.attributes.usage.into()
    }

    fn is_backed(&self) -> bool {
        self.handle.is_some()
    }

    /// Rejects attributes with an empty level table.
    ///
    /// A compressed pixel format forces `compressed` on.
    fn specify_attributes(&mut self, attributes: TextureAttributes) -> bool {
        if attributes.levels.is_empty() {
            logwise::warn_sync!("texture attributes rejected: no levels");
            return false;
        }
        warn_if_backed(self.handle.is_some(), ResourceType::Texture);
        let compressed = attributes.compressed || attributes.format.is_compressed();
        self.attributes = TextureAttributes {
            compressed,
            ..attributes
        };
        true
    }

    fn create_backing_resources(
        &mut self,
        gl: &mut C,
        _diagnostics: Option<&mut dyn Diagnostics>,
    ) -> Result<(), Error> {
        if self.handle.is_some() {
            return Ok(());
        }
        let target = self.attributes.target;
        let previous = gl.get_parameter_texture(target.binding_query());
        let texture = gl
            .create_texture()
            .ok_or(Error::AllocationFailed(ResourceType::Texture))?;
        let bind_target = target.bind_target();
        gl.bind_texture(bind_target, Some(texture));
        gl.tex_parameter_i32(bind_target, sys::TEXTURE_WRAP_S, self.attributes.wrap_s.gl() as i32);
        gl.tex_parameter_i32(bind_target, sys::TEXTURE_WRAP_T, self.attributes.wrap_t.gl() as i32);
        gl.tex_parameter_i32(
            bind_target,
            sys::TEXTURE_MIN_FILTER,
            self.attributes.min_filter.gl() as i32,
        );
        gl.tex_parameter_i32(
            bind_target,
            sys::TEXTURE_MAG_FILTER,
            self.attributes.mag_filter.gl() as i32,
        );
        gl.bind_texture(bind_target, previous);
        let (width, height) = self.size();
        logwise::info_sync!(
            "created texture {width}x{height} with {levels} levels",
            width = width,
            height = height,
            levels = self.attributes.levels.len()
        );
        self.handle = Some(texture);
        Ok(())
    }

    fn delete_backing_resources(&mut self, gl: &mut C) -> &mut Self {
        if let Some(texture) = self.handle.take() {
            if !gl.is_context_lost() {
                gl.delete_texture(texture);
            }
            logwise::info_sync!("deleted texture");
        }
        self
    }

    fn serialize(&self) -> TextureAttributes {
        self.attributes.clone()
    }
}
