//! Exports [`IndexedMesh`].
use std::{marker::PhantomData, ptr::null};

use crate::{
    gl_wrappers::{Buffer, BufferTarget, BufferUsage, VertexArray},
    render_vec::{validate_layout, GlIndex, GlLayout, GlType},
    RenderError,
};

/// Check that `indices` only reference existing vertices.
pub fn validate_indices<I: GlIndex>(vertex_count: usize, indices: &[I]) -> Result<(), RenderError> {
    if vertex_count == 0 {
        return Err(RenderError::InvalidMesh("no vertices".into()));
    }
    if indices.is_empty() {
        return Err(RenderError::InvalidMesh("no indices".into()));
    }
    if indices.len() % 3 != 0 {
        return Err(RenderError::InvalidMesh(format!(
            "{} indices do not make whole triangles",
            indices.len()
        )));
    }
    if let Some((position, index)) = indices
        .iter()
        .map(|index| index.as_usize())
        .enumerate()
        .find(|&(_, index)| index >= vertex_count)
    {
        return Err(RenderError::InvalidMesh(format!(
            "index {index} at position {position} is out of range for {vertex_count} vertices"
        )));
    }
    Ok(())
}

/// Index count and index type for `glDrawElements` over `indices`.
pub fn draw_params<I: GlIndex>(
    indices: &[I],
) -> Result<(gl::types::GLsizei, GlType), RenderError> {
    let index_count = indices
        .len()
        .try_into()
        .map_err(|_| RenderError::InvalidMesh(format!("{} indices", indices.len())))?;
    Ok((index_count, I::GL_TYPE))
}

/// Vertices and triangle indices in graphics memory, grouped under one VAO.
///
/// All three GL objects are released on drop.
pub struct IndexedMesh<I: GlIndex> {
    vao: VertexArray,
    // kept alive for the VAO
    _vbo: Buffer,
    _ibo: Buffer,
    index_count: gl::types::GLsizei,
    index_type: GlType,
    _index: PhantomData<I>,
}

impl<I: GlIndex> IndexedMesh<I> {
    /// Upload `vertices` and `indices` once.
    ///
    /// # Errors
    /// Errors if the vertex layout is inconsistent, either slice is empty,
    /// or an index points past the last vertex.
    pub fn upload<V: GlLayout>(vertices: &[V], indices: &[I]) -> Result<Self, RenderError> {
        validate_layout::<V>()?;
        validate_indices(vertices.len(), indices)?;
        let (index_count, index_type) = draw_params(indices)?;

        // bind the VAO first, then bind and fill the buffers, then configure attributes
        let vao = VertexArray::new();
        let vbo = Buffer::new(BufferTarget::Vertex);
        let ibo = Buffer::new(BufferTarget::Index);
        vao.bind();
        vbo.bind();
        ibo.bind();
        vbo.upload(vertices, BufferUsage::Static);
        ibo.upload(indices, BufferUsage::Static);
        V::setup_vertex_attrib_pointers();

        // the VAO must be unbound before the index buffer, or it forgets it
        VertexArray::unbind();
        Buffer::unbind(BufferTarget::Vertex);
        Buffer::unbind(BufferTarget::Index);

        tracing::debug!(
            vao = vao.id(),
            vbo = vbo.id(),
            ibo = ibo.id(),
            vertices = vertices.len(),
            indices = indices.len(),
            "uploaded mesh"
        );
        Ok(Self {
            vao,
            _vbo: vbo,
            _ibo: ibo,
            index_count,
            index_type,
            _index: PhantomData,
        })
    }

    pub fn index_count(&self) -> gl::types::GLsizei {
        self.index_count
    }

    pub fn index_type(&self) -> GlType {
        self.index_type
    }

    /// One indexed draw of every triangle. Needs a bound program.
    pub fn draw(&self) {
        self.vao.bind();
        unsafe {
            gl::DrawElements(
                gl::TRIANGLES,
                self.index_count,
                self.index_type.gl_enum(),
                null(),
            );
        }
        VertexArray::unbind();
    }
}

#[cfg(test)]
mod tests {
    use world::{CUBE_INDEX_COUNT, CUBE_INDICES, CUBE_VERTICES};

    use super::*;

    #[test]
    fn cube_data_is_a_valid_mesh() {
        validate_indices(CUBE_VERTICES.len(), &CUBE_INDICES).unwrap();
    }

    #[test]
    fn cube_draws_36_unsigned_bytes() {
        let (index_count, index_type) = draw_params(&CUBE_INDICES).unwrap();
        assert_eq!(index_count, 36);
        assert_eq!(index_count as usize, CUBE_INDEX_COUNT);
        assert_eq!(index_type, GlType::UnsignedByte);
        assert_eq!(index_type.gl_enum(), gl::UNSIGNED_BYTE);
    }

    #[test]
    fn wider_indices_pick_wider_gl_type() {
        let (index_count, index_type) = draw_params(&[0u32, 1, 2]).unwrap();
        assert_eq!(index_count, 3);
        assert_eq!(index_type.gl_enum(), gl::UNSIGNED_INT);
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let err = validate_indices(3, &[0u16, 1, 3]).unwrap_err();
        assert!(matches!(err, RenderError::InvalidMesh(_)));
        assert!(err.to_string().contains("index 3 at position 2"), "{err}");
    }

    #[test]
    fn empty_and_partial_meshes_are_rejected() {
        assert!(validate_indices::<u8>(0, &[0, 0, 0]).is_err());
        assert!(validate_indices::<u8>(3, &[]).is_err());
        assert!(validate_indices::<u8>(3, &[0, 1]).is_err());
    }
}
