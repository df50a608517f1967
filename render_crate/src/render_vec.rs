//! Vertex layouts and the CPU-side staging buffer built on them.
use std::marker::PhantomData;

use bytemuck::Pod;

use crate::RenderError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlType {
    Float,         // f32
    Double,        // f64
    UnsignedByte,  // u8
    UnsignedShort, // u16
    UnsignedInt,   // u32
}

impl GlType {
    pub const fn get_size(&self) -> usize {
        match *self {
            GlType::Double => size_of::<f64>(),
            GlType::Float => size_of::<f32>(),
            GlType::UnsignedByte => size_of::<u8>(),
            GlType::UnsignedShort => size_of::<u16>(),
            GlType::UnsignedInt => size_of::<u32>(),
        }
    }
    pub const fn gl_enum(&self) -> gl::types::GLenum {
        match *self {
            GlType::Double => gl::DOUBLE,
            GlType::Float => gl::FLOAT,
            GlType::UnsignedByte => gl::UNSIGNED_BYTE,
            GlType::UnsignedShort => gl::UNSIGNED_SHORT,
            GlType::UnsignedInt => gl::UNSIGNED_INT,
        }
    }
}

/// One attribute of a vertex, as handed to `glVertexAttribPointer`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VertexAttrib {
    /// Shader input location.
    pub location: gl::types::GLuint,
    /// How many values make up the attribute (1 to 4).
    pub components: gl::types::GLint,
    pub gl_type: GlType,
    /// Bytes from the beginning of the vertex.
    pub offset: usize,
    pub normalized: bool,
}

impl VertexAttrib {
    /// Four floats at `offset`, the common case.
    pub const fn vec4(location: gl::types::GLuint, offset: usize) -> Self {
        Self {
            location,
            components: 4,
            gl_type: GlType::Float,
            offset,
            normalized: false,
        }
    }
    pub const fn byte_size(&self) -> usize {
        self.components as usize * self.gl_type.get_size()
    }
}

/// A vertex type that can be uploaded as-is.
///
/// # Safety
/// You must ensure that `ATTRIBS` matches the byte layout of `Self`.
/// If an attribute says 4 floats at offset 16, bytes 16..32 of every
/// value must be 4 f32s.
pub unsafe trait GlLayout: Pod {
    /// Every attribute, in any order.
    const ATTRIBS: &'static [VertexAttrib];

    /// Size of an entire vertex.
    fn stride() -> usize {
        size_of::<Self>()
    }

    /// Enable and describe every attribute on the bound VAO/VBO pair.
    fn setup_vertex_attrib_pointers() {
        let stride = Self::stride() as gl::types::GLsizei;
        for attrib in Self::ATTRIBS {
            unsafe {
                gl::EnableVertexAttribArray(attrib.location);
                gl::VertexAttribPointer(
                    attrib.location,
                    attrib.components,
                    attrib.gl_type.gl_enum(),
                    if attrib.normalized { gl::TRUE } else { gl::FALSE },
                    stride,
                    attrib.offset as *const _,
                );
            }
        }
    }
}

/// Check that the attributes of `T` fit inside its stride without overlapping.
pub fn validate_layout<T: GlLayout>() -> Result<(), RenderError> {
    let stride = T::stride();
    if T::ATTRIBS.is_empty() {
        return Err(RenderError::Layout("no attributes".into()));
    }
    let mut spans: Vec<(usize, usize, gl::types::GLuint)> = Vec::with_capacity(T::ATTRIBS.len());
    for attrib in T::ATTRIBS {
        if !(1..=4).contains(&attrib.components) {
            return Err(RenderError::Layout(format!(
                "attribute {} has {} components",
                attrib.location, attrib.components
            )));
        }
        let end = attrib.offset + attrib.byte_size();
        if end > stride {
            return Err(RenderError::Layout(format!(
                "attribute {} ends at byte {end}, past the stride of {stride}",
                attrib.location
            )));
        }
        spans.push((attrib.offset, end, attrib.location));
    }
    spans.sort_unstable();
    for pair in spans.windows(2) {
        let (_, prev_end, prev_location) = pair[0];
        let (start, _, location) = pair[1];
        if start < prev_end {
            return Err(RenderError::Layout(format!(
                "attributes {prev_location} and {location} overlap"
            )));
        }
    }
    let mut locations: Vec<_> = spans.iter().map(|&(_, _, location)| location).collect();
    locations.sort_unstable();
    if let Some(pair) = locations.windows(2).find(|pair| pair[0] == pair[1]) {
        return Err(RenderError::Layout(format!(
            "location {} used twice",
            pair[0]
        )));
    }
    Ok(())
}

/// An index type for `glDrawElements`.
///
/// # Safety
/// `GL_TYPE` must have the same size as `Self`.
pub unsafe trait GlIndex: Pod {
    const GL_TYPE: GlType;
    fn as_usize(self) -> usize;
}

unsafe impl GlIndex for u8 {
    const GL_TYPE: GlType = GlType::UnsignedByte;
    fn as_usize(self) -> usize {
        self.into()
    }
}

unsafe impl GlIndex for u16 {
    const GL_TYPE: GlType = GlType::UnsignedShort;
    fn as_usize(self) -> usize {
        self.into()
    }
}

unsafe impl GlIndex for u32 {
    const GL_TYPE: GlType = GlType::UnsignedInt;
    fn as_usize(self) -> usize {
        self as usize
    }
}

/// Growable vertex bytes, ready to hand to `glBufferData`.
#[derive(Clone, Debug)]
pub struct RenderVec<LayoutT: GlLayout> {
    inner: Vec<u8>,
    stride: usize,
    _phantom: PhantomData<LayoutT>,
}

impl<LayoutT: GlLayout> Default for RenderVec<LayoutT> {
    fn default() -> Self {
        Self::new()
    }
}

impl<LayoutT: GlLayout> RenderVec<LayoutT> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }
    /// Room for `vertices` vertices without reallocating.
    pub fn with_capacity(vertices: usize) -> Self {
        let stride = LayoutT::stride();
        Self {
            inner: Vec::with_capacity(vertices * stride),
            stride,
            _phantom: PhantomData,
        }
    }
    pub fn push(&mut self, value: LayoutT) {
        self.inner.extend_from_slice(bytemuck::bytes_of(&value));
    }
    pub fn extend_from_slice(&mut self, slice: &[LayoutT]) {
        self.inner.extend_from_slice(bytemuck::cast_slice(slice));
    }
    pub fn clear(&mut self) {
        self.inner.clear();
    }
    pub fn stride(&self) -> usize {
        self.stride
    }
    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.inner.len() / self.stride
    }
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
    pub fn gl_byte_size(&self) -> usize {
        self.inner.len()
    }
    /// Vertex count as `glDrawArrays` wants it.
    pub fn gl_len(&self) -> gl::types::GLsizei {
        self.len().try_into().unwrap_or(gl::types::GLsizei::MAX)
    }
    pub fn as_bytes(&self) -> &[u8] {
        &self.inner
    }
}
