// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! The lifecycle every descriptor follows.

A descriptor moves through four states:

1. **Unbacked.** Freshly constructed with default attributes. No GPU object exists.
2. **Specified.** [`Resource::specify_attributes`] has normalized and stored caller
   configuration. This never touches the context and may be repeated.
3. **Backed.** [`Resource::create_backing_resources`] has allocated the GPU object.
   Calling it again does nothing.
4. **Unbacked again.** [`Resource::delete_backing_resources`] released the object. This is
   safe on an unbacked descriptor and on a lost context; in the latter case no calls
   reach the context but local state is still cleared.

[`Resource::serialize`] returns attributes that, passed back to `specify_attributes`,
reproduce the same backing object. This is how callers rebuild after context loss.
*/

use crate::bindings::buffer::BufferAttributes;
use crate::bindings::framebuffer::FramebufferAttributes;
use crate::bindings::program::ProgramAttributes;
use crate::bindings::renderbuffer::RenderbufferAttributes;
use crate::bindings::state::{BlendState, ClearState, DepthStencilState, RasterState};
use crate::bindings::texture::TextureAttributes;
use crate::bindings::visible_to::{ResourceSubType, ResourceType};
use crate::diagnostics::Diagnostics;
use crate::error::Error;
use crate::imp::GraphicsContext;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Shared contract of every descriptor kind.
pub trait Resource<C: GraphicsContext> {
    /// Plain, serializable configuration.
    type Attributes: Clone + Default + Serialize + DeserializeOwned;

    fn resource_type(&self) -> ResourceType;
    fn sub_type(&self) -> ResourceSubType;
    fn is_backed(&self) -> bool;

    /// Normalizes and stores `attributes`. Returns false if they were rejected.
    fn specify_attributes(&mut self, attributes: Self::Attributes) -> bool;

    /// Allocates the backing object. `Ok(())` if it already exists.
    fn create_backing_resources(
        &mut self,
        gl: &mut C,
        diagnostics: Option<&mut dyn Diagnostics>,
    ) -> Result<(), Error>;

    /// Releases the backing object, if any.
    fn delete_backing_resources(&mut self, gl: &mut C) -> &mut Self;

    fn serialize(&self) -> Self::Attributes;
}

/// Warns about re-specifying a descriptor whose backing object was built from older attributes.
pub(crate) fn warn_if_backed(backed: bool, kind: ResourceType) {
    if backed {
        logwise::warn_sync!(
            "{kind} re-specified while backed; delete and recreate to apply",
            kind = logwise::privacy::LogIt(&kind)
        );
    }
}

/// Attributes of any descriptor, tagged with its kind.
///
/// ```
/// use resources_and_state::bindings::resource::SerializedDescriptor;
/// use resources_and_state::bindings::buffer::BufferAttributes;
///
/// let json = r#"{"kind":"buffer","usage":"INDEX_BUFFER","elementSize":2,"elementCount":36}"#;
/// let SerializedDescriptor::Buffer(attributes) = serde_json::from_str(json).unwrap() else {
///     panic!("expected a buffer");
/// };
/// assert_eq!(attributes.element_count, 36);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SerializedDescriptor {
    Buffer(BufferAttributes),
    Texture(TextureAttributes),
    Renderbuffer(RenderbufferAttributes),
    Framebuffer(FramebufferAttributes),
    Program(ProgramAttributes),
    BlendState(BlendState),
    ClearState(ClearState),
    RasterState(RasterState),
    DepthStencilState(DepthStencilState),
}

impl SerializedDescriptor {
    pub fn resource_type(&self) -> ResourceType {
        match self {
            SerializedDescriptor::Buffer(_) => ResourceType::DataBuffer,
            SerializedDescriptor::Texture(_) => ResourceType::Texture,
            SerializedDescriptor::Renderbuffer(_) => ResourceType::RenderBuffer,
            SerializedDescriptor::Framebuffer(_) => ResourceType::FrameBuffer,
            SerializedDescriptor::Program(_) => ResourceType::ShaderProgram,
            SerializedDescriptor::BlendState(_)
            | SerializedDescriptor::ClearState(_)
            | SerializedDescriptor::RasterState(_)
            | SerializedDescriptor::DepthStencilState(_) => ResourceType::StateObject,
        }
    }
}
