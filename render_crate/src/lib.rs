//! The rendering arm of the bootstrap: OpenGL wrappers, vertex layouts,
//! meshes, debug gizmos and the per-frame [`Render`] context.
use std::{
    ffi::CStr,
    sync::atomic::{AtomicBool, Ordering},
};

pub mod error;
pub mod gizmos;
#[macro_use]
pub mod gl_wrappers;
pub mod mesh;
pub mod render_vec;

pub use error::RenderError;
pub use gizmos::{GizmoBatch, Gizmos};
pub use gl;
pub use gl_wrappers::gl_upd_viewport;
pub use mesh::IndexedMesh;

use glam::{Mat4, Vec4};
use world::Vertex;

use crate::{
    gl_wrappers::{check_gl_error, Program, Shader},
    render_vec::{GlIndex, GlLayout, VertexAttrib},
};

macro_rules! include_cstr {
    ( $path:literal $(,)? ) => {{
        // Use a constant to force the verification to run at compile time.
        const VALUE: &'static ::core::ffi::CStr = match ::core::ffi::CStr::from_bytes_with_nul(
            concat!(include_str!($path), "\0").as_bytes(),
        ) {
            Ok(value) => value,
            Err(_) => panic!(concat!("interior NUL byte(s) in `", $path, "`")),
        };
        VALUE
    }};
}

pub const COLOUR_VERT_SHADER_SOURCE: &CStr = include_cstr!("../glsl/colour_vert.glsl");
pub const COLOUR_FRAG_SHADER_SOURCE: &CStr = include_cstr!("../glsl/colour_frag.glsl");

/// Name of the combined camera matrix uniform in the colour shader.
pub const PROJECTION_VIEW_UNIFORM: &str = "projectionView";

/// Attribute locations bound before the colour program is linked.
pub const COLOUR_ATTRIB_BINDINGS: [(gl::types::GLuint, &CStr); 2] =
    [(0, c"vPosition"), (1, c"vColor")];

// SAFETY:
// Vertex is repr(C): 4 f32s of position followed by 4 f32s of colour.
unsafe impl GlLayout for Vertex {
    const ATTRIBS: &'static [VertexAttrib] = &[
        VertexAttrib::vec4(0, Vertex::POSITION_OFFSET),
        VertexAttrib::vec4(1, Vertex::COLOUR_OFFSET),
    ];
}

/// Compile and link the fixed position/colour shader pair.
///
/// # Errors
/// Errors with the driver's log if either stage fails to compile or the
/// program fails to link.
pub fn build_colour_program() -> Result<Program, RenderError> {
    let vert_shader = Shader::vertex(COLOUR_VERT_SHADER_SOURCE).compile()?;
    let frag_shader = Shader::fragment(COLOUR_FRAG_SHADER_SOURCE).compile()?;
    let [(position, position_name), (colour, colour_name)] = COLOUR_ATTRIB_BINDINGS;
    construct_program!(vert_shader, frag_shader; position => position_name, colour => colour_name)
}

/// Wipe colour and depth.
pub fn clear_screen(colour: Vec4) {
    unsafe {
        gl::ClearColor(colour.x, colour.y, colour.z, colour.w);
        gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
    }
}

static INITIALIZED_ALREADY: AtomicBool = AtomicBool::new(false);

/// Owns the colour program used to draw meshes. Only one may exist at a time.
pub struct Render {
    program: Program,
    projection_view: Option<gl::types::GLint>,
}

impl Render {
    /// Compile the colour shader and set up blending and depth testing.
    ///
    /// Needs a current GL context with loaded symbols.
    pub fn init() -> Result<Self, RenderError> {
        if INITIALIZED_ALREADY.swap(true, Ordering::AcqRel) {
            return Err(RenderError::AlreadyInitialised);
        }
        let program = build_colour_program().and_then(|program| {
            program.verify_attrib_bindings(&COLOUR_ATTRIB_BINDINGS)?;
            Ok(program)
        });
        let program = match program {
            Ok(program) => program,
            Err(err) => {
                INITIALIZED_ALREADY.store(false, Ordering::Release);
                return Err(err);
            }
        };
        let projection_view = program.uniform_location(PROJECTION_VIEW_UNIFORM);
        if projection_view.is_none() {
            tracing::warn!("colour program has no `{PROJECTION_VIEW_UNIFORM}` uniform");
        }
        unsafe {
            gl::Enable(gl::BLEND);
            gl::BlendFunc(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA);
            gl::Enable(gl::DEPTH_TEST);
            gl::PolygonMode(gl::FRONT_AND_BACK, gl::FILL);
        }
        tracing::info!(program = program.id(), "render initialised");
        Ok(Render {
            program,
            projection_view,
        })
    }

    /// Draw `mesh` as seen through `projection_view`.
    pub fn draw_mesh<I: GlIndex>(
        &mut self,
        mesh: &IndexedMesh<I>,
        projection_view: &Mat4,
    ) -> Result<(), RenderError> {
        self.program.bind();
        if let Some(location) = self.projection_view {
            self.program.set_uniform_mat4(location, projection_view);
        }
        mesh.draw();
        Program::unbind();
        check_gl_error("glDrawElements")
    }
}

impl Drop for Render {
    fn drop(&mut self) {
        INITIALIZED_ALREADY.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shader_sources_bind_expected_names() {
        let vert = COLOUR_VERT_SHADER_SOURCE.to_str().unwrap();
        assert!(vert.starts_with("#version 400"));
        for (_, name) in COLOUR_ATTRIB_BINDINGS {
            assert!(vert.contains(name.to_str().unwrap()));
        }
        assert!(vert.contains(PROJECTION_VIEW_UNIFORM));
        let frag = COLOUR_FRAG_SHADER_SOURCE.to_str().unwrap();
        assert!(frag.contains("fColor"));
    }

    #[test]
    fn bindings_match_vertex_layout() {
        let locations: Vec<_> = Vertex::ATTRIBS.iter().map(|a| a.location).collect();
        let bound: Vec<_> = COLOUR_ATTRIB_BINDINGS.iter().map(|(l, _)| *l).collect();
        assert_eq!(locations, bound);
    }
}
