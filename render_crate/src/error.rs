//! Exports [`RenderError`].

/// Errors from creating or using GL objects.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("shader compilation error: {0}")]
    ShaderCompile(String),
    #[error("error linking program. OpenGL reply: '{0}'")]
    ProgramLink(String),
    #[error("invalid vertex layout: {0}")]
    Layout(String),
    #[error("invalid mesh: {0}")]
    InvalidMesh(String),
    #[error("OpenGL error 0x{code:04x} after {context}")]
    Gl { code: gl::types::GLenum, context: &'static str },
    #[error("a Render already exists")]
    AlreadyInitialised,
}
