//! Immediate-mode debug primitives: fill a batch during update, draw it
//! with one call per primitive type.
use glam::{Mat4, Vec3, Vec4};
use world::{Grid, Vertex};

use crate::{
    build_colour_program,
    gl_wrappers::{check_gl_error, Buffer, BufferTarget, BufferUsage, Program, VertexArray},
    render_vec::{GlLayout, RenderVec},
    RenderError, PROJECTION_VIEW_UNIFORM,
};

/// Bounded lists of line and triangle vertices. Touches no GL state.
#[derive(Clone, Debug)]
pub struct GizmoBatch {
    lines: RenderVec<Vertex>,
    tris: RenderVec<Vertex>,
    max_lines: usize,
    max_tris: usize,
    dropped: usize,
}

impl GizmoBatch {
    pub fn new(max_lines: usize, max_tris: usize) -> Self {
        Self {
            lines: RenderVec::with_capacity(max_lines * 2),
            tris: RenderVec::with_capacity(max_tris * 3),
            max_lines,
            max_tris,
            dropped: 0,
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len() / 2
    }

    pub fn tri_count(&self) -> usize {
        self.tris.len() / 3
    }

    /// Primitives refused since the last [`GizmoBatch::clear`].
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn lines(&self) -> &RenderVec<Vertex> {
        &self.lines
    }

    pub fn tris(&self) -> &RenderVec<Vertex> {
        &self.tris
    }

    fn refuse(&mut self, kind: &str, max: usize) -> bool {
        if self.dropped == 0 {
            tracing::warn!("gizmo {kind} limit of {max} reached, dropping the rest of this frame");
        }
        self.dropped += 1;
        false
    }

    /// Queue a line. Returns `false` if the batch is full.
    pub fn add_line(&mut self, start: Vec3, end: Vec3, colour: Vec4) -> bool {
        if self.line_count() >= self.max_lines {
            return self.refuse("line", self.max_lines);
        }
        self.lines.push(Vertex::from_xyz(start, colour));
        self.lines.push(Vertex::from_xyz(end, colour));
        true
    }

    /// Queue a filled triangle. Returns `false` if the batch is full.
    pub fn add_tri(&mut self, a: Vec3, b: Vec3, c: Vec3, colour: Vec4) -> bool {
        if self.tri_count() >= self.max_tris {
            return self.refuse("triangle", self.max_tris);
        }
        self.tris.extend_from_slice(&[
            Vertex::from_xyz(a, colour),
            Vertex::from_xyz(b, colour),
            Vertex::from_xyz(c, colour),
        ]);
        true
    }

    /// Queue the X, Y and Z axes of `transform` in red, green and blue.
    pub fn add_transform(&mut self, transform: &Mat4, scale: f32) {
        let origin = transform.w_axis.truncate();
        let axes = [
            (transform.x_axis, Vec4::new(1.0, 0.0, 0.0, 1.0)),
            (transform.y_axis, Vec4::new(0.0, 1.0, 0.0, 1.0)),
            (transform.z_axis, Vec4::new(0.0, 0.0, 1.0, 1.0)),
        ];
        for (axis, colour) in axes {
            self.add_line(origin, origin + axis.truncate() * scale, colour);
        }
    }

    pub fn add_grid(&mut self, grid: &Grid) {
        for line in grid.lines() {
            self.add_line(line.start, line.end, line.colour);
        }
    }

    /// Forget everything queued, ready for the next frame.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.tris.clear();
        self.dropped = 0;
    }
}

/// One dynamic vertex stream: a VAO around a VBO re-uploaded every draw.
struct Stream {
    vao: VertexArray,
    vbo: Buffer,
}

impl Stream {
    fn new() -> Self {
        let vao = VertexArray::new();
        let vbo = Buffer::new(BufferTarget::Vertex);
        vao.bind();
        vbo.bind();
        Vertex::setup_vertex_attrib_pointers();
        VertexArray::unbind();
        Buffer::unbind(BufferTarget::Vertex);
        Self { vao, vbo }
    }

    fn draw(&self, mode: gl::types::GLenum, vertices: &RenderVec<Vertex>) {
        if vertices.is_empty() {
            return;
        }
        self.vao.bind();
        self.vbo.bind();
        self.vbo.upload_bytes(vertices.as_bytes(), BufferUsage::Dynamic);
        unsafe { gl::DrawArrays(mode, 0, vertices.gl_len()) };
        VertexArray::unbind();
        Buffer::unbind(BufferTarget::Vertex);
    }
}

/// The debug-primitive helper: a [`GizmoBatch`] plus what it takes to draw it.
pub struct Gizmos {
    batch: GizmoBatch,
    program: Program,
    projection_view: Option<gl::types::GLint>,
    lines: Stream,
    tris: Stream,
}

impl Gizmos {
    /// Compile the gizmo shader and allocate room for the given primitive counts.
    pub fn create(max_lines: usize, max_tris: usize) -> Result<Self, RenderError> {
        let program = build_colour_program()?;
        let projection_view = program.uniform_location(PROJECTION_VIEW_UNIFORM);
        tracing::info!(max_lines, max_tris, "gizmos created");
        Ok(Self {
            batch: GizmoBatch::new(max_lines, max_tris),
            program,
            projection_view,
            lines: Stream::new(),
            tris: Stream::new(),
        })
    }

    pub fn batch(&self) -> &GizmoBatch {
        &self.batch
    }

    pub fn clear(&mut self) {
        self.batch.clear();
    }

    pub fn add_line(&mut self, start: Vec3, end: Vec3, colour: Vec4) -> bool {
        self.batch.add_line(start, end, colour)
    }

    pub fn add_tri(&mut self, a: Vec3, b: Vec3, c: Vec3, colour: Vec4) -> bool {
        self.batch.add_tri(a, b, c, colour)
    }

    pub fn add_transform(&mut self, transform: &Mat4, scale: f32) {
        self.batch.add_transform(transform, scale);
    }

    pub fn add_grid(&mut self, grid: &Grid) {
        self.batch.add_grid(grid);
    }

    /// Draw everything queued since the last [`Gizmos::clear`].
    pub fn draw(&self, projection_view: &Mat4) -> Result<(), RenderError> {
        self.program.bind();
        if let Some(location) = self.projection_view {
            self.program.set_uniform_mat4(location, projection_view);
        }
        self.lines.draw(gl::LINES, self.batch.lines());
        self.tris.draw(gl::TRIANGLES, self.batch.tris());
        Program::unbind();
        check_gl_error("drawing gizmos")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_fills_batch() {
        let mut batch = GizmoBatch::new(10_000, 10_000);
        batch.add_grid(&Grid::default());
        assert_eq!(batch.line_count(), 42);
        assert_eq!(batch.lines().len(), 84);
        assert_eq!(batch.dropped(), 0);
    }

    #[test]
    fn full_batch_drops_primitives() {
        let mut batch = GizmoBatch::new(2, 1);
        assert!(batch.add_line(Vec3::ZERO, Vec3::X, Vec4::ONE));
        assert!(batch.add_line(Vec3::ZERO, Vec3::Y, Vec4::ONE));
        assert!(!batch.add_line(Vec3::ZERO, Vec3::Z, Vec4::ONE));
        assert!(batch.add_tri(Vec3::ZERO, Vec3::X, Vec3::Y, Vec4::ONE));
        assert!(!batch.add_tri(Vec3::ZERO, Vec3::X, Vec3::Z, Vec4::ONE));
        assert_eq!(batch.line_count(), 2);
        assert_eq!(batch.tri_count(), 1);
        assert_eq!(batch.dropped(), 2);

        batch.clear();
        assert_eq!(batch.line_count(), 0);
        assert_eq!(batch.tri_count(), 0);
        assert_eq!(batch.dropped(), 0);
        assert!(batch.add_line(Vec3::ZERO, Vec3::X, Vec4::ONE));
    }

    #[test]
    fn transform_draws_three_axes() {
        let mut batch = GizmoBatch::new(16, 0);
        let transform = Mat4::from_translation(Vec3::new(-2.0, 0.0, 0.0));
        batch.add_transform(&transform, 2.0);
        assert_eq!(batch.line_count(), 3);

        let bytes = batch.lines().as_bytes();
        let stride = batch.lines().stride();
        let vertex = |i: usize| -> Vertex {
            bytemuck::pod_read_unaligned(&bytes[i * stride..(i + 1) * stride])
        };
        assert_eq!(vertex(0).position, Vec4::new(-2.0, 0.0, 0.0, 1.0));
        assert_eq!(vertex(1).position, Vec4::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(vertex(1).colour, Vec4::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(vertex(3).position, Vec4::new(-2.0, 2.0, 0.0, 1.0));
        assert_eq!(vertex(5).position, Vec4::new(-2.0, 0.0, 2.0, 1.0));
    }
}
