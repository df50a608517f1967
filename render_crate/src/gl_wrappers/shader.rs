//! Exports [`Shader`] and [`CompiledShader`].
use std::{ffi::CString, ptr::null};

use super::read_info_log;
use crate::RenderError;

/// An uncompiled OpenGL shader.
/// Contains the source code necessary to compile it.
pub struct Shader {
    /// GL ID for this shader.
    inner: gl::types::GLuint,
    /// The source code for this shader.
    source: CString,
    /// Ownership of `inner` moved to a [`CompiledShader`].
    was_compiled: bool,
}

/// Represents the type of a shader object.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShaderType {
    /// This shader is a Fragment shader.
    Fragment,
    /// This shader is a Vertex shader.
    Vertex,
}

impl ShaderType {
    pub const fn gl_enum(self) -> gl::types::GLenum {
        match self {
            ShaderType::Fragment => gl::FRAGMENT_SHADER,
            ShaderType::Vertex => gl::VERTEX_SHADER,
        }
    }
}

impl Shader {
    /// Wrap shader source code into a type-safe Rust struct.
    pub fn new(shader_type: ShaderType, source: impl Into<CString>) -> Self {
        let shader = unsafe { gl::CreateShader(shader_type.gl_enum()) };
        Self {
            inner: shader,
            source: source.into(),
            was_compiled: false,
        }
    }
    /// Helper function for `Shader::new()` with vertex shaders.
    pub fn vertex(source: impl Into<CString>) -> Self {
        Self::new(ShaderType::Vertex, source)
    }
    /// Helper function for `Shader::new()` with fragment shaders.
    pub fn fragment(source: impl Into<CString>) -> Self {
        Self::new(ShaderType::Fragment, source)
    }

    /// Compile this shader.
    ///
    /// Returns a [`CompiledShader`], for use in [`Program`](super::Program)s.
    ///
    /// # Errors
    /// Errors if compilation was unsuccessful, with the response from OpenGL.
    pub fn compile(mut self) -> Result<CompiledShader, RenderError> {
        let compiled_shader = unsafe {
            gl::ShaderSource(self.inner, 1, &self.source.as_ptr(), null());
            gl::CompileShader(self.inner);

            let mut success = 0;
            gl::GetShaderiv(self.inner, gl::COMPILE_STATUS, &mut success);

            if success != gl::TRUE.into() {
                let mut log_length = 0;
                gl::GetShaderiv(self.inner, gl::INFO_LOG_LENGTH, &mut log_length);
                let log = read_info_log(log_length, |capacity, length, buf| {
                    gl::GetShaderInfoLog(self.inner, capacity, length, buf)
                });
                return Err(RenderError::ShaderCompile(log));
            }
            self.was_compiled = true;
            self.inner
        };
        tracing::debug!(id = compiled_shader, "compiled shader");
        // SAFETY: compile status was checked above.
        unsafe { Ok(CompiledShader::new_unchecked(compiled_shader)) }
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe {
            if !self.was_compiled {
                gl::DeleteShader(self.inner);
            }
        }
    }
}

/// A compiled shader object.
/// This can be linked and used in [`Program`](super::Program)s.
///
/// Dropping it after linking only flags it for deletion; the program
/// keeps working.
pub struct CompiledShader {
    /// GL ID for this compiled shader.
    id: gl::types::GLuint,
}

impl Drop for CompiledShader {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteShader(self.id);
        };
    }
}

impl CompiledShader {
    /// Create a new CompiledShader from the GL ID of a compiled shader.
    ///
    /// # Safety
    /// The uint passed into this function MUST be the id of a shader that
    /// compiled successfully, and nothing else may delete it.
    pub unsafe fn new_unchecked(shader: gl::types::GLuint) -> Self {
        Self { id: shader }
    }
    /// Get the internal GL ID of this shader.
    pub fn id(&self) -> gl::types::GLuint {
        self.id
    }
}
