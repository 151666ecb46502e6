// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
use crate::bindings::reflection::ShaderDataType;
use crate::bindings::visible_to::ResourceType;
use crate::diagnostics::Stage;
use std::fmt::Display;

/// Failures surfaced by resource creation, uploads and draw-time dispatch.
///
/// Invalid configuration is never an error here: descriptors clamp and default
/// such values in `specify_attributes`. What remains are allocation failures,
/// shader build failures, context loss and calls that name something the active
/// program does not have.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    ShaderCompile { stage: Stage, log: String },
    Link { log: String },
    AllocationFailed(ResourceType),
    ContextLost,
    NotBacked(ResourceType),
    NoActiveProgram,
    UnknownUniform(String),
    UnknownAttribute(String),
    UniformTypeMismatch {
        name: String,
        expected: Option<ShaderDataType>,
    },
    AttributeTypeMismatch {
        name: String,
        expected: Option<ShaderDataType>,
    },
    SourceTooShort {
        field: String,
        needed: usize,
        len: usize,
    },
    LevelOutOfRange { level: usize },
    TextureUnitOutOfRange(u32),
    AttachmentOutOfRange(u32),
    Pattern(#[from] regex::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ShaderCompile { stage, log } => write!(f, "{:?} failed: {}", stage, log),
            Error::Link { log } => write!(f, "program failed to link: {}", log),
            Error::AllocationFailed(kind) => {
                write!(f, "the context could not allocate a {:?} object", kind)
            }
            Error::ContextLost => write!(f, "the graphics context is lost"),
            Error::NotBacked(kind) => write!(f, "the {:?} resource has no backing object", kind),
            Error::NoActiveProgram => write!(f, "no program is bound"),
            Error::UnknownUniform(name) => {
                write!(f, "the active program has no uniform named {}", name)
            }
            Error::UnknownAttribute(name) => {
                write!(f, "the active program has no attribute named {}", name)
            }
            Error::UniformTypeMismatch { name, expected } => {
                write!(f, "value does not fit uniform {} of type {:?}", name, expected)
            }
            Error::AttributeTypeMismatch { name, expected } => {
                write!(f, "value does not fit attribute {} of type {:?}", name, expected)
            }
            Error::SourceTooShort { field, needed, len } => write!(
                f,
                "source for field {} holds {} values but {} are needed",
                field, len, needed
            ),
            Error::LevelOutOfRange { level } => {
                write!(f, "level {} lies outside the source data", level)
            }
            Error::TextureUnitOutOfRange(unit) => write!(f, "no texture unit {}", unit),
            Error::AttachmentOutOfRange(index) => write!(f, "no color attachment {}", index),
            Error::Pattern(e) => write!(f, "{}", e),
        }
    }
}
