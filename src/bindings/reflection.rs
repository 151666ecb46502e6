// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! Attribute and uniform discovery by source scan.

This is deliberately not a shading-language parser. It finds single-line declarations
of the form `uniform <type> <name>;` and `attribute <type> <name>;` and nothing else:

* declarations split across lines are not found
* declarations inside comments are found
* array declarations (`uniform vec4 colors[4];`) do not match, so they are skipped

```
use resources_and_state::bindings::reflection::{reflect_attributes, ShaderDataType};

let vs = "attribute vec3 aPosition;\nattribute vec2 aTexCoord;\nvoid main() {}";
let attributes = reflect_attributes(vs).unwrap();
assert_eq!(attributes[1].name, "aTexCoord");
assert_eq!(attributes[1].data_type, Some(ShaderDataType::FloatVec2));
```
*/

use crate::error::Error;
use crate::sys;
use regex::Regex;
use std::sync::LazyLock;

static UNIFORM_DECLARATION: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"uniform\s+(\w+)\s+(\w+)\s*;"));
static ATTRIBUTE_DECLARATION: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"attribute\s+(\w+)\s+(\w+)\s*;"));

/// A reflected uniform or attribute type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ShaderDataType {
    Float = sys::FLOAT,
    FloatVec2 = sys::FLOAT_VEC2,
    FloatVec3 = sys::FLOAT_VEC3,
    FloatVec4 = sys::FLOAT_VEC4,
    Int = sys::INT,
    IntVec2 = sys::INT_VEC2,
    IntVec3 = sys::INT_VEC3,
    IntVec4 = sys::INT_VEC4,
    Bool = sys::BOOL,
    BoolVec2 = sys::BOOL_VEC2,
    BoolVec3 = sys::BOOL_VEC3,
    BoolVec4 = sys::BOOL_VEC4,
    FloatMat2 = sys::FLOAT_MAT2,
    FloatMat3 = sys::FLOAT_MAT3,
    FloatMat4 = sys::FLOAT_MAT4,
    Sampler2d = sys::SAMPLER_2D,
    SamplerCube = sys::SAMPLER_CUBE,
}

impl ShaderDataType {
    pub const fn gl(self) -> u32 {
        self as u32
    }

    /// Maps a GLSL type name such as `vec3` or `samplerCube`.
    pub fn from_glsl(name: &str) -> Option<Self> {
        Some(match name {
            "float" => ShaderDataType::Float,
            "vec2" => ShaderDataType::FloatVec2,
            "vec3" => ShaderDataType::FloatVec3,
            "vec4" => ShaderDataType::FloatVec4,
            "int" => ShaderDataType::Int,
            "ivec2" => ShaderDataType::IntVec2,
            "ivec3" => ShaderDataType::IntVec3,
            "ivec4" => ShaderDataType::IntVec4,
            "bool" => ShaderDataType::Bool,
            "bvec2" => ShaderDataType::BoolVec2,
            "bvec3" => ShaderDataType::BoolVec3,
            "bvec4" => ShaderDataType::BoolVec4,
            "mat2" => ShaderDataType::FloatMat2,
            "mat3" => ShaderDataType::FloatMat3,
            "mat4" => ShaderDataType::FloatMat4,
            "sampler2D" => ShaderDataType::Sampler2d,
            "samplerCube" => ShaderDataType::SamplerCube,
            _ => return None,
        })
    }

    pub const fn is_sampler(self) -> bool {
        matches!(self, ShaderDataType::Sampler2d | ShaderDataType::SamplerCube)
    }
}

/// One declaration found by the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    /// The type name as written in the source.
    pub type_name: String,
    /// `None` when the type name is not one of the recognized GLSL types.
    pub data_type: Option<ShaderDataType>,
}

fn scan(pattern: &Regex, source: &str, out: &mut Vec<Declaration>) {
    for captures in pattern.captures_iter(source) {
        let name = &captures[2];
        if out.iter().any(|d| d.name == name) {
            continue;
        }
        let type_name = &captures[1];
        out.push(Declaration {
            name: name.to_owned(),
            type_name: type_name.to_owned(),
            data_type: ShaderDataType::from_glsl(type_name),
        });
    }
}

/// Uniforms declared in either stage, vertex stage first.
///
/// A uniform declared in both stages is reported once, with the vertex stage's type.
pub fn reflect_uniforms(vertex_source: &str, fragment_source: &str) -> Result<Vec<Declaration>, Error> {
    let pattern = UNIFORM_DECLARATION.as_ref().map_err(Clone::clone)?;
    let mut out = Vec::new();
    scan(pattern, vertex_source, &mut out);
    scan(pattern, fragment_source, &mut out);
    Ok(out)
}

/// Vertex attributes in order of appearance. The position in the result is the attribute index.
pub fn reflect_attributes(vertex_source: &str) -> Result<Vec<Declaration>, Error> {
    let pattern = ATTRIBUTE_DECLARATION.as_ref().map_err(Clone::clone)?;
    let mut out = Vec::new();
    scan(pattern, vertex_source, &mut out);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declaration_patterns_are_built_once() {
        assert!(UNIFORM_DECLARATION.is_ok());
        assert!(ATTRIBUTE_DECLARATION.is_ok());
        let first = reflect_attributes("attribute vec2 aUv;").unwrap();
        let again = reflect_attributes("attribute vec2 aUv;").unwrap();
        assert_eq!(first, again);
        let pattern: *const Regex = ATTRIBUTE_DECLARATION.as_ref().unwrap();
        let same: *const Regex = ATTRIBUTE_DECLARATION.as_ref().unwrap();
        assert_eq!(pattern, same);
    }

    const VS: &str = "
        attribute vec3 aPosition;
        attribute vec4 aColor;
        uniform mat4 uProjection;
        uniform vec4 uTint;
        uniform vec4 uPalette[4];
        void main() { gl_Position = uProjection * vec4(aPosition, 1.0); }
    ";
    const FS: &str = "
        precision mediump float;
        uniform sampler2D uAlbedo;
        uniform vec4 uTint;
        uniform highp float uExposure;
        void main() {}
    ";

    #[test]
    fn uniforms_from_both_stages() {
        let uniforms = reflect_uniforms(VS, FS).unwrap();
        let names: Vec<&str> = uniforms.iter().map(|u| u.name.as_str()).collect();
        // arrays and qualified declarations do not match the pattern
        assert_eq!(names, ["uProjection", "uTint", "uAlbedo"]);
        assert_eq!(uniforms[2].data_type, Some(ShaderDataType::Sampler2d));
        assert!(uniforms[2].data_type.is_some_and(ShaderDataType::is_sampler));
    }

    #[test]
    fn attributes_keep_source_order() {
        let attributes = reflect_attributes(VS).unwrap();
        assert_eq!(attributes.len(), 2);
        assert_eq!(attributes[0].name, "aPosition");
        assert_eq!(attributes[1].data_type, Some(ShaderDataType::FloatVec4));
    }

    #[test]
    fn unknown_types_are_kept() {
        let attributes = reflect_attributes("attribute half4 aOdd; attribute float aWeight;").unwrap();
        assert_eq!(attributes[0].data_type, None);
        assert_eq!(attributes[0].type_name, "half4");
        assert_eq!(attributes[1].name, "aWeight");
    }
}
