//! Exports [`Buffer`] and [`VertexArray`].
use std::ffi::c_void;

use bytemuck::Pod;

/// What a [`Buffer`] is bound as.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferTarget {
    /// Vertex data, `GL_ARRAY_BUFFER`.
    Vertex,
    /// Triangle indices, `GL_ELEMENT_ARRAY_BUFFER`.
    Index,
}

impl BufferTarget {
    pub const fn gl_enum(self) -> gl::types::GLenum {
        match self {
            BufferTarget::Vertex => gl::ARRAY_BUFFER,
            BufferTarget::Index => gl::ELEMENT_ARRAY_BUFFER,
        }
    }
}

/// How often a [`Buffer`]'s contents are expected to change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferUsage {
    /// Uploaded once.
    Static,
    /// Re-uploaded every frame.
    Dynamic,
}

impl BufferUsage {
    pub const fn gl_enum(self) -> gl::types::GLenum {
        match self {
            BufferUsage::Static => gl::STATIC_DRAW,
            BufferUsage::Dynamic => gl::DYNAMIC_DRAW,
        }
    }
}

/// A buffer in graphics memory. Deleted on drop.
pub struct Buffer {
    id: gl::types::GLuint,
    target: BufferTarget,
}

impl Buffer {
    pub fn new(target: BufferTarget) -> Self {
        let mut id = 0;
        unsafe { gl::GenBuffers(1, &mut id) };
        Self { id, target }
    }
    pub fn id(&self) -> gl::types::GLuint {
        self.id
    }
    pub fn bind(&self) {
        unsafe { gl::BindBuffer(self.target.gl_enum(), self.id) }
    }
    /// Unbind whatever buffer is bound to `target`.
    pub fn unbind(target: BufferTarget) {
        unsafe { gl::BindBuffer(target.gl_enum(), 0) }
    }
    /// Replace the contents of this buffer. The buffer must be bound.
    pub fn upload<T: Pod>(&self, data: &[T], usage: BufferUsage) {
        self.upload_bytes(bytemuck::cast_slice(data), usage);
    }
    /// Replace the contents of this buffer with raw bytes. The buffer must be bound.
    pub fn upload_bytes(&self, bytes: &[u8], usage: BufferUsage) {
        // slices never exceed isize::MAX bytes
        let size = bytes.len() as gl::types::GLsizeiptr;
        unsafe {
            gl::BufferData(
                self.target.gl_enum(),
                size,
                bytes.as_ptr().cast::<c_void>(),
                usage.gl_enum(),
            )
        }
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        unsafe { gl::DeleteBuffers(1, &self.id) }
    }
}

/// A vertex array object: remembers buffer bindings and attribute
/// pointers set while it is bound. Deleted on drop.
pub struct VertexArray {
    id: gl::types::GLuint,
}

impl VertexArray {
    pub fn new() -> Self {
        let mut id = 0;
        unsafe { gl::GenVertexArrays(1, &mut id) };
        Self { id }
    }
    pub fn id(&self) -> gl::types::GLuint {
        self.id
    }
    pub fn bind(&self) {
        unsafe { gl::BindVertexArray(self.id) }
    }
    pub fn unbind() {
        unsafe { gl::BindVertexArray(0) }
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        unsafe { gl::DeleteVertexArrays(1, &self.id) }
    }
}
