// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! Shader programs.

Creating a program compiles both stages, binds attribute locations, links, and then
resolves uniform locations. Attribute locations are assigned before linking from the
order in which attributes are declared in the vertex source; uniform locations are
looked up after linking. See [`reflection`](crate::bindings::reflection) for what the
declaration scan does and does not find.

A compile or link failure releases every object created so far, reports the info log
and source to the caller's [`Diagnostics`] sink if one was supplied, and comes back as
an [`Error`] value.

```
use resources_and_state::bindings::program::{Program, ProgramAttributes};
use resources_and_state::bindings::resource::Resource;
use resources_and_state::diagnostics::OwnedReport;
use resources_and_state::imp::{RecordingContext, ShaderKind};

let mut gl = RecordingContext::new();
gl.fail_compile(Some(ShaderKind::Fragment));

let mut program = Program::<RecordingContext>::new();
program.specify_attributes(ProgramAttributes {
    vertex_shader: "attribute vec3 aPosition; void main() {}".into(),
    fragment_shader: "void main() { broken }".into(),
});
let mut reports: Vec<OwnedReport> = Vec::new();
assert!(program.create_backing_resources(&mut gl, Some(&mut reports)).is_err());
assert_eq!(reports.len(), 1);
assert!(!program.is_backed());
```
*/

use crate::bindings::reflection::{reflect_attributes, reflect_uniforms, Declaration, ShaderDataType};
use crate::bindings::resource::{warn_if_backed, Resource};
use crate::bindings::visible_to::{ResourceSubType, ResourceType};
use crate::diagnostics::{Diagnostics, Report, Stage};
use crate::error::Error;
use crate::imp::GraphicsContext;
use crate::sys;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProgramAttributes {
    /// Vertex stage source text.
    pub vertex_shader: String,
    /// Fragment stage source text.
    pub fragment_shader: String,
}

/// A vertex attribute of a linked program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeSlot {
    pub index: u32,
    pub data_type: Option<ShaderDataType>,
}

/// A uniform of a linked program.
pub struct UniformSlot<C: GraphicsContext> {
    pub data_type: Option<ShaderDataType>,
    /// `None` when the linker optimized the uniform away.
    pub location: Option<C::UniformLocation>,
}

impl<C: GraphicsContext> Clone for UniformSlot<C> {
    fn clone(&self) -> Self {
        UniformSlot {
            data_type: self.data_type,
            location: self.location.clone(),
        }
    }
}

impl<C: GraphicsContext> std::fmt::Debug for UniformSlot<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UniformSlot")
            .field("data_type", &self.data_type)
            .field("location", &self.location)
            .finish()
    }
}

/// Reflection tables of a linked program. This is what the draw context binds.
pub struct ProgramLinkage<C: GraphicsContext> {
    program: C::Program,
    attribute_names: Vec<String>,
    attributes: HashMap<String, AttributeSlot>,
    uniform_names: Vec<String>,
    uniforms: HashMap<String, UniformSlot<C>>,
}

impl<C: GraphicsContext> std::fmt::Debug for ProgramLinkage<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgramLinkage")
            .field("program", &self.program)
            .field("attribute_names", &self.attribute_names)
            .field("uniform_names", &self.uniform_names)
            .finish_non_exhaustive()
    }
}

impl<C: GraphicsContext> ProgramLinkage<C> {
    pub fn program(&self) -> C::Program {
        self.program
    }

    /// Attribute names in location order.
    pub fn attribute_names(&self) -> &[String] {
        &self.attribute_names
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeSlot> {
        self.attributes.get(name)
    }

    pub fn attribute_index(&self, name: &str) -> Option<u32> {
        self.attributes.get(name).map(|a| a.index)
    }

    /// Uniform names, vertex stage first.
    pub fn uniform_names(&self) -> &[String] {
        &self.uniform_names
    }

    pub fn uniform(&self, name: &str) -> Option<&UniformSlot<C>> {
        self.uniforms.get(name)
    }
}

pub struct Program<C: GraphicsContext> {
    attributes: ProgramAttributes,
    vertex_shader: Option<C::Shader>,
    fragment_shader: Option<C::Shader>,
    linkage: Option<Rc<ProgramLinkage<C>>>,
}

impl<C: GraphicsContext> std::fmt::Debug for Program<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Program")
            .field("vertex_shader", &self.vertex_shader)
            .field("fragment_shader", &self.fragment_shader)
            .field("linkage", &self.linkage)
            .finish_non_exhaustive()
    }
}

impl<C: GraphicsContext> Default for Program<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Deletes shaders created for a failed build. Nothing reaches a lost context.
fn discard_shaders<C: GraphicsContext>(gl: &mut C, shaders: [C::Shader; 2]) {
    if gl.is_context_lost() {
        return;
    }
    let [vertex, fragment] = shaders;
    gl.delete_shader(fragment);
    gl.delete_shader(vertex);
}

impl<C: GraphicsContext> Program<C> {
    pub fn new() -> Self {
        Program {
            attributes: ProgramAttributes::default(),
            vertex_shader: None,
            fragment_shader: None,
            linkage: None,
        }
    }

    pub fn attributes(&self) -> &ProgramAttributes {
        &self.attributes
    }

    pub fn handle(&self) -> Option<C::Program> {
        self.linkage.as_ref().map(|l| l.program)
    }

    pub fn linkage(&self) -> Option<&ProgramLinkage<C>> {
        self.linkage.as_deref()
    }

    /// Shared handle for draw context binding calls, or `None` if unbacked.
    pub fn binding(&self) -> Option<Rc<ProgramLinkage<C>>> {
        if self.linkage.is_none() {
            logwise::warn_sync!("binding requested for an unbacked program");
        }
        self.linkage.clone()
    }

    fn compile(
        gl: &mut C,
        shader: C::Shader,
        source: &str,
        stage: Stage,
        diagnostics: &mut Option<&mut dyn Diagnostics>,
    ) -> Result<(), Error> {
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
        if gl.get_shader_compile_status(shader) {
            return Ok(());
        }
        if gl.is_context_lost() {
            return Err(Error::ContextLost);
        }
        let log = gl.get_shader_info_log(shader);
        if let Some(diagnostics) = diagnostics.as_deref_mut() {
            diagnostics.report(Report {
                stage,
                resource: ResourceType::ShaderProgram,
                log: &log,
                source,
            });
        }
        Err(Error::ShaderCompile { stage, log })
    }

    fn build(
        &self,
        gl: &mut C,
        shaders: [C::Shader; 2],
        mut diagnostics: Option<&mut dyn Diagnostics>,
    ) -> Result<ProgramLinkage<C>, Error> {
        let [vs, fs] = shaders;
        let vertex = self.attributes.vertex_shader.as_str();
        let fragment = self.attributes.fragment_shader.as_str();
        let attributes = reflect_attributes(vertex)?;
        let uniforms = reflect_uniforms(vertex, fragment)?;

        Self::compile(gl, vs, vertex, Stage::VertexCompile, &mut diagnostics)?;
        Self::compile(gl, fs, fragment, Stage::FragmentCompile, &mut diagnostics)?;

        let program = gl
            .create_program()
            .ok_or(Error::AllocationFailed(ResourceType::ShaderProgram))?;
        gl.attach_shader(program, vs);
        gl.attach_shader(program, fs);
        // locations must be bound before linking
        for (index, attribute) in (0u32..).zip(&attributes) {
            gl.bind_attrib_location(program, index, &attribute.name);
        }
        gl.link_program(program);
        if !gl.get_program_link_status(program) {
            if gl.is_context_lost() {
                return Err(Error::ContextLost);
            }
            let log = gl.get_program_info_log(program);
            gl.detach_shader(program, fs);
            gl.detach_shader(program, vs);
            gl.delete_program(program);
            if let Some(diagnostics) = diagnostics {
                let source = format!("{vertex}\n\n{fragment}");
                diagnostics.report(Report {
                    stage: Stage::Link,
                    resource: ResourceType::ShaderProgram,
                    log: &log,
                    source: &source,
                });
            }
            return Err(Error::Link { log });
        }

        let uniforms = uniforms
            .into_iter()
            .map(|Declaration { name, data_type, .. }| {
                let location = gl.get_uniform_location(program, &name);
                (name, UniformSlot { data_type, location })
            })
            .collect::<Vec<_>>();
        Ok(ProgramLinkage {
            program,
            attribute_names: attributes.iter().map(|a| a.name.clone()).collect(),
            attributes: (0u32..)
                .zip(attributes)
                .map(|(index, a)| {
                    (
                        a.name,
                        AttributeSlot {
                            index,
                            data_type: a.data_type,
                        },
                    )
                })
                .collect(),
            uniform_names: uniforms.iter().map(|(name, _)| name.clone()).collect(),
            uniforms: uniforms.into_iter().collect(),
        })
    }
}

impl<C: GraphicsContext> Resource<C> for Program<C> {
    type Attributes = ProgramAttributes;

    fn resource_type(&self) -> ResourceType {
        ResourceType::ShaderProgram
    }

    fn sub_type(&self) -> ResourceSubType {
        ResourceSubType::GraphicsShader
    }

    fn is_backed(&self) -> bool {
        self.linkage.is_some()
    }

    fn specify_attributes(&mut self, attributes: ProgramAttributes) -> bool {
        warn_if_backed(self.linkage.is_some(), ResourceType::ShaderProgram);
        self.attributes = attributes;
        true
    }

    fn create_backing_resources(
        &mut self,
        gl: &mut C,
        diagnostics: Option<&mut dyn Diagnostics>,
    ) -> Result<(), Error> {
        if self.linkage.is_some() {
            return Ok(());
        }
        let vs = gl.create_shader(sys::VERTEX_SHADER);
        let fs = gl.create_shader(sys::FRAGMENT_SHADER);
        let (Some(vs), Some(fs)) = (vs, fs) else {
            if !gl.is_context_lost() {
                for shader in [fs, vs].into_iter().flatten() {
                    gl.delete_shader(shader);
                }
            }
            return Err(Error::AllocationFailed(ResourceType::ShaderProgram));
        };
        match self.build(gl, [vs, fs], diagnostics) {
            Ok(linkage) => {
                logwise::info_sync!(
                    "linked program with {attributes} attributes and {uniforms} uniforms",
                    attributes = linkage.attribute_names.len(),
                    uniforms = linkage.uniform_names.len()
                );
                self.vertex_shader = Some(vs);
                self.fragment_shader = Some(fs);
                self.linkage = Some(Rc::new(linkage));
                Ok(())
            }
            Err(e) => {
                discard_shaders(gl, [vs, fs]);
                Err(e)
            }
        }
    }

    fn delete_backing_resources(&mut self, gl: &mut C) -> &mut Self {
        let vs = self.vertex_shader.take();
        let fs = self.fragment_shader.take();
        if let (Some(linkage), Some(vs), Some(fs)) = (self.linkage.take(), vs, fs) {
            if !gl.is_context_lost() {
                gl.detach_shader(linkage.program, fs);
                gl.detach_shader(linkage.program, vs);
                gl.delete_shader(fs);
                gl.delete_shader(vs);
                gl.delete_program(linkage.program);
            }
            logwise::info_sync!("deleted program");
        }
        self
    }

    fn serialize(&self) -> ProgramAttributes {
        self.attributes.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::OwnedReport;
    use crate::imp::{Call, RecordingContext};

    const VS: &str = "attribute vec3 aPosition;\nattribute vec2 aUv;\nuniform mat4 uMvp;\nvoid main() {}";
    const FS: &str = "uniform sampler2D uAlbedo;\nvoid main() {}";

    fn program() -> Program<RecordingContext> {
        let mut program = Program::new();
        program.specify_attributes(ProgramAttributes {
            vertex_shader: VS.into(),
            fragment_shader: FS.into(),
        });
        program
    }

    #[test]
    fn attribute_locations_are_bound_before_linking() {
        let mut gl = RecordingContext::new();
        let mut program = program();
        program.create_backing_resources(&mut gl, None).unwrap();
        let handle = program.handle().unwrap();
        let calls = gl.calls();
        let link = calls.iter().position(|c| *c == Call::LinkProgram(handle)).unwrap();
        let second = calls
            .iter()
            .position(|c| {
                *c == Call::BindAttribLocation { program: handle, index: 1, name: "aUv".into() }
            })
            .unwrap();
        assert!(second < link);
        let linkage = program.linkage().unwrap();
        assert_eq!(linkage.attribute_index("aPosition"), Some(0));
        assert_eq!(linkage.uniform_names(), ["uMvp", "uAlbedo"]);
        assert_eq!(
            linkage.uniform("uAlbedo").unwrap().data_type,
            Some(ShaderDataType::Sampler2d)
        );
    }

    #[test]
    fn link_failure_cleans_up_and_reports_both_sources() {
        let mut gl = RecordingContext::new();
        gl.fail_link(true);
        gl.set_info_log("link error");
        let mut program = program();
        let mut reports: Vec<OwnedReport> = Vec::new();
        let err = program
            .create_backing_resources(&mut gl, Some(&mut reports))
            .unwrap_err();
        assert!(matches!(err, Error::Link { ref log } if log == "link error"));
        assert_eq!(reports[0].stage, Stage::Link);
        assert_eq!(reports[0].source, format!("{VS}\n\n{FS}"));
        assert_eq!(gl.count(|c| matches!(c, Call::DetachShader { .. })), 2);
        assert_eq!(gl.count(|c| matches!(c, Call::DeleteProgram(_))), 1);
        assert_eq!(gl.count(|c| matches!(c, Call::DeleteShader(_))), 2);
        assert!(!program.is_backed());
    }

    #[test]
    fn lost_context_fails_without_reports() {
        let mut gl = RecordingContext::new();
        let mut program = program();
        let mut reports: Vec<OwnedReport> = Vec::new();
        gl.lose_context();
        let err = program
            .create_backing_resources(&mut gl, Some(&mut reports))
            .unwrap_err();
        assert!(matches!(err, Error::AllocationFailed(ResourceType::ShaderProgram)));
        assert!(reports.is_empty());
    }

    #[test]
    fn delete_releases_everything_once() {
        let mut gl = RecordingContext::new();
        let mut program = program();
        program.create_backing_resources(&mut gl, None).unwrap();
        gl.clear_calls();
        program.delete_backing_resources(&mut gl);
        program.delete_backing_resources(&mut gl);
        assert_eq!(gl.calls().len(), 5);
        assert!(!program.is_backed());
    }
}
