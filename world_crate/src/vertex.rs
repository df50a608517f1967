//! Exports [`Vertex`].
use bytemuck::{Pod, Zeroable};
use glam::{Vec3, Vec4};

/// A single vertex as it is laid out in graphics memory.
///
/// If you're adding a field, ensure to update the `GlLayout` impl
/// in the render crate as well!
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Homogeneous position, `w` is normally 1.
    pub position: Vec4,
    /// RGBA colour.
    pub colour: Vec4,
}

impl Vertex {
    /// Byte offset of [`Vertex::position`].
    pub const POSITION_OFFSET: usize = 0;
    /// Byte offset of [`Vertex::colour`].
    pub const COLOUR_OFFSET: usize = size_of::<Vec4>();
    /// Size of an entire vertex.
    pub const STRIDE: usize = size_of::<Vertex>();

    pub const fn new(position: Vec4, colour: Vec4) -> Self {
        Self { position, colour }
    }

    /// Make a vertex from a 3D point, with `w` set to 1.
    pub fn from_xyz(position: Vec3, colour: Vec4) -> Self {
        Self {
            position: position.extend(1.0),
            colour,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_declared_offsets() {
        assert_eq!(Vertex::STRIDE, 8 * size_of::<f32>());
        assert_eq!(Vertex::POSITION_OFFSET, 0);
        assert_eq!(Vertex::COLOUR_OFFSET, 4 * size_of::<f32>());
        assert_eq!(std::mem::offset_of!(Vertex, colour), Vertex::COLOUR_OFFSET);
    }

    #[test]
    fn bytes_are_position_then_colour() {
        let vertex = Vertex::new(
            Vec4::new(1.0, 2.0, 3.0, 4.0),
            Vec4::new(5.0, 6.0, 7.0, 8.0),
        );
        let floats: &[f32] = bytemuck::cast_slice(bytemuck::bytes_of(&vertex));
        assert_eq!(floats, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    }

    #[test]
    fn from_xyz_sets_w() {
        let vertex = Vertex::from_xyz(Vec3::new(1.0, 0.0, -1.0), Vec4::ONE);
        assert_eq!(vertex.position.w, 1.0);
    }
}
