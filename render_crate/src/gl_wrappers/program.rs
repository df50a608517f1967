//! Exports [`Program`].
use std::ffi::{CStr, CString};

use glam::Mat4;

use super::{read_info_log, CompiledShader};
use crate::RenderError;

/// Wrapper for an OpenGL program.
///
/// <https://www.khronos.org/opengl/wiki/GLSL_Object#Program_objects>
pub struct Program {
    /// The internal OpenGL id for this object.
    id: gl::types::GLuint,
}

/// Make a new [`Program`].
///
/// Attribute bindings go after the `;` as `location => name` pairs.
///
/// # Usage
/// ```no_run
/// # use render::gl_wrappers::Shader;
/// # use render::construct_program;
/// # use std::ffi::CStr;
/// # fn f(vert_source: &CStr, frag_source: &CStr) -> Result<(), render::RenderError> {
/// let vert_shader = Shader::vertex(vert_source).compile()?;
/// let frag_shader = Shader::fragment(frag_source).compile()?;
/// let program = construct_program!(vert_shader, frag_shader; 0 => c"vPosition")?;
/// # Ok(()) }
/// ```
#[macro_export]
macro_rules! construct_program {
    ($vert_sh:expr, $frag_shader:expr; $($location:expr => $name:expr),* $(,)?) => {{
        let args = $crate::gl_wrappers::program::ProgramArgs {
            vert_shader: &$vert_sh,
            frag_shader: &$frag_shader,
            attrib_bindings: &[
                $(($location, $name)),*
            ],
        };
        $crate::gl_wrappers::program::Program::from_args(args)
    }};
}

/// Shaders and attribute bindings to create a [`Program`].
/// Use [`construct_program!`] to easily create one of these.
pub struct ProgramArgs<'a> {
    /// A vertex shader.
    pub vert_shader: &'a CompiledShader,
    /// A fragment shader.
    pub frag_shader: &'a CompiledShader,
    /// Vertex attribute locations to bind before linking.
    pub attrib_bindings: &'a [(gl::types::GLuint, &'a CStr)],
}

impl Program {
    /// Create a new program from a [`ProgramArgs`] struct.
    ///
    /// # Errors
    /// Errors if linking failed, with the response from OpenGL.
    pub fn from_args(args: ProgramArgs<'_>) -> Result<Self, RenderError> {
        let inner = unsafe {
            let program = gl::CreateProgram();
            gl::AttachShader(program, args.vert_shader.id());
            gl::AttachShader(program, args.frag_shader.id());
            for (location, name) in args.attrib_bindings.iter() {
                gl::BindAttribLocation(program, *location, name.as_ptr());
            }
            gl::LinkProgram(program);
            let mut success = 0;
            gl::GetProgramiv(program, gl::LINK_STATUS, &mut success);
            if success != gl::TRUE.into() {
                let mut log_length = 0;
                gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut log_length);
                let log = read_info_log(log_length, |capacity, length, buf| {
                    gl::GetProgramInfoLog(program, capacity, length, buf)
                });
                gl::DeleteProgram(program);
                return Err(RenderError::ProgramLink(log));
            }
            program
        };
        tracing::debug!(id = inner, "linked program");

        Ok(Self { id: inner })
    }
    /// Get the internal id of this program.
    pub fn id(&self) -> gl::types::GLuint {
        self.id
    }
    /// Make this the active program.
    pub fn bind(&self) {
        unsafe { gl::UseProgram(self.id) }
    }
    /// Deactivate whichever program is active.
    pub fn unbind() {
        unsafe { gl::UseProgram(0) }
    }
    /// Get the location of a uniform in this program.
    ///
    /// Returns `None` if `name` contains interior nuls or the uniform
    /// does not exist (or was optimised away).
    pub fn uniform_location(&self, name: impl AsRef<str>) -> Option<gl::types::GLint> {
        let name = CString::new(name.as_ref()).ok()?;
        let uniform_location = unsafe { gl::GetUniformLocation(self.id, name.as_ptr()) };
        (uniform_location >= 0).then_some(uniform_location)
    }
    /// Get the location of an attrib in this program.
    ///
    /// Returns `None` if `name` contains interior nuls or the attrib does not exist.
    pub fn attrib_location(&self, name: impl AsRef<str>) -> Option<gl::types::GLint> {
        let name = CString::new(name.as_ref()).ok()?;
        let attrib_location = unsafe { gl::GetAttribLocation(self.id, name.as_ptr()) };
        (attrib_location >= 0).then_some(attrib_location)
    }
    /// Check that every attribute in `bindings` ended up at its bound location.
    ///
    /// # Errors
    /// Errors naming the first attribute that is missing or elsewhere.
    pub fn verify_attrib_bindings(
        &self,
        bindings: &[(gl::types::GLuint, &CStr)],
    ) -> Result<(), RenderError> {
        verify_bindings(bindings, |name| self.attrib_location(name))
    }
    /// Upload a column-major matrix to a uniform of the bound program.
    pub fn set_uniform_mat4(&self, location: gl::types::GLint, value: &Mat4) {
        let columns = value.to_cols_array();
        unsafe { gl::UniformMatrix4fv(location, 1, gl::FALSE, columns.as_ptr()) }
    }
}

/// Compare `bindings` against the locations reported by `lookup`.
pub(crate) fn verify_bindings(
    bindings: &[(gl::types::GLuint, &CStr)],
    lookup: impl Fn(&str) -> Option<gl::types::GLint>,
) -> Result<(), RenderError> {
    for (location, name) in bindings {
        let name = name.to_string_lossy();
        let found = lookup(&name);
        if found.and_then(|found| u32::try_from(found).ok()) != Some(*location) {
            return Err(RenderError::Layout(format!(
                "attribute `{name}` bound to {location} but found at {found:?}"
            )));
        }
    }
    Ok(())
}

impl Drop for Program {
    fn drop(&mut self) {
        tracing::debug!(id = self.id, "deleting program");
        unsafe { gl::DeleteProgram(self.id) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BINDINGS: [(gl::types::GLuint, &CStr); 2] = [(0, c"vPosition"), (1, c"vColor")];

    #[test]
    fn bindings_in_place() {
        let lookup = |name: &str| match name {
            "vPosition" => Some(0),
            "vColor" => Some(1),
            _ => None,
        };
        verify_bindings(&BINDINGS, lookup).unwrap();
    }

    #[test]
    fn swapped_binding_is_reported() {
        let lookup = |name: &str| match name {
            "vPosition" => Some(1),
            "vColor" => Some(0),
            _ => None,
        };
        let err = verify_bindings(&BINDINGS, lookup).unwrap_err();
        assert!(err.to_string().contains("`vPosition` bound to 0"), "{err}");
    }

    #[test]
    fn inactive_attribute_is_reported() {
        let lookup = |name: &str| (name == "vPosition").then_some(0);
        let err = verify_bindings(&BINDINGS, lookup).unwrap_err();
        assert!(err.to_string().contains("found at None"), "{err}");
    }
}
