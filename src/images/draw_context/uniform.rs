// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Uniform and vertex attribute transfer for the active program.

use super::DrawContext;
use crate::bindings::buffer::Buffer;
use crate::bindings::reflection::ShaderDataType;
use crate::bindings::texture::TextureBinding;
use crate::bindings::visible_to::ResourceType;
use crate::error::Error;
use crate::images::vertex_layout::Field;
use crate::imp::GraphicsContext;
use crate::sys;

/// A value for [`DrawContext::set_uniform`].
///
/// The active program's reflected type picks the transfer call; the value only has
/// to have the right shape for it.  Vectors and matrices are passed as slices with
/// exactly as many components as the type has.
#[derive(Debug)]
pub enum UniformValue<'a, C: GraphicsContext> {
    Float(f32),
    /// `vec2` through `vec4`, and `mat2` through `mat4` in column-major order.
    Floats(&'a [f32]),
    Int(i32),
    /// `ivec2` through `ivec4`, and `bvec2` through `bvec4` as 0 or 1.
    Ints(&'a [i32]),
    Bool(bool),
    /// A texture for a sampler uniform.  It is bound to the next free unit.
    Texture(TextureBinding<C>),
}

impl<C: GraphicsContext> DrawContext<C> {
    /// Transfers `value` to the active program's uniform `name`.
    ///
    /// Sampler uniforms claim the next unit from [`Self::bound_texture_count`], bind the
    /// texture there, and point the uniform at that unit.
    pub fn set_uniform(&mut self, name: &str, value: UniformValue<'_, C>) -> Result<(), Error> {
        let program = self.program.clone().ok_or(Error::NoActiveProgram)?;
        let slot = program
            .uniform(name)
            .ok_or_else(|| Error::UnknownUniform(name.to_owned()))?;
        let location = slot.location.as_ref();
        let mismatch = || Error::UniformTypeMismatch {
            name: name.to_owned(),
            expected: slot.data_type,
        };
        let Some(data_type) = slot.data_type else {
            return Err(mismatch());
        };
        use ShaderDataType as T;
        use UniformValue as V;
        let gl = &mut self.gl;
        match (data_type, value) {
            (T::Float, V::Float(x)) => gl.uniform_1_f32(location, x),
            (T::FloatVec2, V::Floats(v)) if v.len() == 2 => gl.uniform_2_f32_slice(location, v),
            (T::FloatVec3, V::Floats(v)) if v.len() == 3 => gl.uniform_3_f32_slice(location, v),
            (T::FloatVec4, V::Floats(v)) if v.len() == 4 => gl.uniform_4_f32_slice(location, v),
            (T::FloatMat2, V::Floats(v)) if v.len() == 4 => {
                gl.uniform_matrix_2_f32_slice(location, false, v)
            }
            (T::FloatMat3, V::Floats(v)) if v.len() == 9 => {
                gl.uniform_matrix_3_f32_slice(location, false, v)
            }
            (T::FloatMat4, V::Floats(v)) if v.len() == 16 => {
                gl.uniform_matrix_4_f32_slice(location, false, v)
            }
            (T::Int | T::Bool, V::Int(x)) => gl.uniform_1_i32(location, x),
            (T::Int | T::Bool, V::Bool(b)) => gl.uniform_1_i32(location, i32::from(b)),
            (T::IntVec2 | T::BoolVec2, V::Ints(v)) if v.len() == 2 => {
                gl.uniform_2_i32_slice(location, v)
            }
            (T::IntVec3 | T::BoolVec3, V::Ints(v)) if v.len() == 3 => {
                gl.uniform_3_i32_slice(location, v)
            }
            (T::IntVec4 | T::BoolVec4, V::Ints(v)) if v.len() == 4 => {
                gl.uniform_4_i32_slice(location, v)
            }
            (T::Sampler2d, V::Texture(texture)) if texture.bind_target == sys::TEXTURE_2D => {
                self.bind_sampler(location, texture)?
            }
            (T::SamplerCube, V::Texture(texture))
                if texture.bind_target == sys::TEXTURE_CUBE_MAP =>
            {
                self.bind_sampler(location, texture)?
            }
            _ => return Err(mismatch()),
        }
        Ok(())
    }

    fn bind_sampler(
        &mut self,
        location: Option<&C::UniformLocation>,
        texture: TextureBinding<C>,
    ) -> Result<(), Error> {
        let unit = self.bound_texture_count;
        self.bind_texture(unit, Some(texture))?;
        self.gl.uniform_1_i32(location, unit as i32);
        self.bound_texture_count += 1;
        Ok(())
    }

    /// Gives attribute `name` the same value for every vertex and disables its array.
    ///
    /// Only float attributes (`float` through `vec4`) are supported.
    pub fn set_constant_attribute(&mut self, name: &str, value: &[f32]) -> Result<(), Error> {
        let program = self.program.clone().ok_or(Error::NoActiveProgram)?;
        let slot = *program
            .attribute(name)
            .ok_or_else(|| Error::UnknownAttribute(name.to_owned()))?;
        let index = slot.index;
        match (slot.data_type, value) {
            (Some(ShaderDataType::Float), &[x]) => self.gl.vertex_attrib_1_f32(index, x),
            (Some(ShaderDataType::FloatVec2), &[x, y]) => self.gl.vertex_attrib_2_f32(index, x, y),
            (Some(ShaderDataType::FloatVec3), &[x, y, z]) => {
                self.gl.vertex_attrib_3_f32(index, x, y, z)
            }
            (Some(ShaderDataType::FloatVec4), &[x, y, z, w]) => {
                self.gl.vertex_attrib_4_f32(index, x, y, z, w)
            }
            _ => {
                return Err(Error::AttributeTypeMismatch {
                    name: name.to_owned(),
                    expected: slot.data_type,
                });
            }
        }
        self.gl.disable_vertex_attrib_array(index);
        Ok(())
    }

    /// Sources each field from its paired buffer.
    ///
    /// The pointer call captures whatever array buffer is bound, so each field's buffer
    /// is bound right before its pointer is declared.
    pub fn enable_attributes(&mut self, fields: &[Field], buffers: &[&Buffer<C>]) -> Result<(), Error> {
        let program = self.program.clone().ok_or(Error::NoActiveProgram)?;
        if fields.len() != buffers.len() {
            logwise::warn_sync!(
                "{fields} fields paired with {buffers} buffers",
                fields = fields.len(),
                buffers = buffers.len()
            );
        }
        for (field, buffer) in fields.iter().zip(buffers) {
            let index = program
                .attribute_index(&field.name)
                .ok_or_else(|| Error::UnknownAttribute(field.name.clone()))?;
            let binding = buffer
                .binding()
                .ok_or(Error::NotBacked(ResourceType::DataBuffer))?;
            self.bind_array_buffer(Some(binding));
            self.gl.enable_vertex_attrib_array(index);
            self.gl.vertex_attrib_pointer_f32(
                index,
                i32::try_from(field.dimension).unwrap_or(i32::MAX),
                field.data_type.gl(),
                field.normalize,
                i32::try_from(binding.element_size).unwrap_or(i32::MAX),
                i32::try_from(field.byte_offset).unwrap_or(i32::MAX),
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::program::{Program, ProgramAttributes};
    use crate::bindings::resource::Resource;
    use crate::imp::{Call, RecordingContext};

    const VERTEX: &str = "attribute vec3 aPosition;\nattribute vec4 aColor;\nuniform mat4 uMVP;\nvoid main() {}";
    const FRAGMENT: &str = "uniform sampler2D uAlbedo;\nuniform samplerCube uSky;\nuniform bool uLit;\nvoid main() {}";

    fn linked() -> (DrawContext<RecordingContext>, Program<RecordingContext>) {
        let mut dc = DrawContext::new(RecordingContext::new());
        let mut program = Program::new();
        program.specify_attributes(ProgramAttributes {
            vertex_shader: VERTEX.into(),
            fragment_shader: FRAGMENT.into(),
        });
        program.create_backing_resources(dc.gl_mut(), None).unwrap();
        dc.bind_program(program.binding());
        dc.gl_mut().clear_calls();
        (dc, program)
    }

    #[test]
    fn samplers_claim_consecutive_units() {
        let (mut dc, _program) = linked();
        let albedo = TextureBinding { handle: 40, bind_target: sys::TEXTURE_2D };
        let sky = TextureBinding { handle: 41, bind_target: sys::TEXTURE_CUBE_MAP };
        dc.set_uniform("uAlbedo", UniformValue::Texture(albedo)).unwrap();
        dc.set_uniform("uSky", UniformValue::Texture(sky)).unwrap();
        assert_eq!(dc.bound_texture_count(), 2);
        assert_eq!(dc.texture(0), Some(albedo));
        assert_eq!(dc.texture(1), Some(sky));
        let units: Vec<i32> = dc
            .gl()
            .calls()
            .iter()
            .filter_map(|c| match c {
                Call::UniformI32 { values, .. } => Some(values[0]),
                _ => None,
            })
            .collect();
        assert_eq!(units, vec![0, 1]);
    }

    #[test]
    fn sampler_rejects_the_wrong_target() {
        let (mut dc, _program) = linked();
        let flat = TextureBinding { handle: 40, bind_target: sys::TEXTURE_2D };
        assert!(matches!(
            dc.set_uniform("uSky", UniformValue::Texture(flat)),
            Err(Error::UniformTypeMismatch { .. })
        ));
        assert_eq!(dc.bound_texture_count(), 0);
    }

    #[test]
    fn matrix_needs_every_component() {
        let (mut dc, _program) = linked();
        assert!(dc.set_uniform("uMVP", UniformValue::Floats(&[1.0; 9])).is_err());
        dc.set_uniform("uMVP", UniformValue::Floats(&[1.0; 16])).unwrap();
        assert!(matches!(
            dc.gl().calls(),
            [Call::UniformMatrix { columns: 4, transpose: false, .. }]
        ));
        dc.set_uniform("uLit", UniformValue::Bool(true)).unwrap();
        assert!(matches!(dc.gl().calls().last(), Some(Call::UniformI32 { values, .. }) if values == &vec![1]));
    }

    #[test]
    fn unknown_names_are_errors() {
        let (mut dc, _program) = linked();
        assert!(matches!(
            dc.set_uniform("uMissing", UniformValue::Float(1.0)),
            Err(Error::UnknownUniform(_))
        ));
        assert!(matches!(
            dc.set_constant_attribute("aMissing", &[0.0]),
            Err(Error::UnknownAttribute(_))
        ));
        assert!(dc.gl().calls().is_empty());
    }

    #[test]
    fn constant_attribute_disables_the_array() {
        let (mut dc, _program) = linked();
        dc.set_constant_attribute("aColor", &[1.0, 0.5, 0.25, 1.0]).unwrap();
        assert_eq!(
            dc.gl().calls(),
            &[
                Call::VertexAttrib { index: 1, values: vec![1.0, 0.5, 0.25, 1.0] },
                Call::DisableVertexAttribArray(1),
            ]
        );
    }

    #[test]
    fn no_program_bound() {
        let mut dc = DrawContext::<RecordingContext>::new(RecordingContext::new());
        assert!(matches!(
            dc.set_uniform("uMVP", UniformValue::Float(0.0)),
            Err(Error::NoActiveProgram)
        ));
    }
}
