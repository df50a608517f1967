//! The hard-coded unit cube uploaded once at startup.
use glam::Vec4;

use crate::Vertex;

const fn vert(x: f32, y: f32, z: f32, colour: [f32; 4]) -> Vertex {
    Vertex::new(
        Vec4::new(x, y, z, 1.0),
        Vec4::new(colour[0], colour[1], colour[2], colour[3]),
    )
}

/// Corners of a unit cube centred on the origin.
///
/// The front face (+Z) is half transparent.
#[rustfmt::skip]
pub const CUBE_VERTICES: [Vertex; 8] = [
    // front
    vert(-0.5, -0.5,  0.5, [1.0, 0.0, 0.0, 0.5]), // 0
    vert( 0.5, -0.5,  0.5, [0.0, 1.0, 0.0, 0.5]), // 1
    vert( 0.5,  0.5,  0.5, [1.0, 0.0, 1.0, 0.5]), // 2
    vert(-0.5,  0.5,  0.5, [1.0, 1.0, 1.0, 0.5]), // 3
    // back
    vert(-0.5, -0.5, -0.5, [1.0, 0.0, 0.0, 1.0]), // 4
    vert( 0.5, -0.5, -0.5, [0.0, 1.0, 0.0, 1.0]), // 5
    vert( 0.5,  0.5, -0.5, [0.0, 0.0, 1.0, 1.0]), // 6
    vert(-0.5,  0.5, -0.5, [1.0, 1.0, 1.0, 1.0]), // 7
];

/// Twelve counter-clockwise triangles, two per face.
#[rustfmt::skip]
pub const CUBE_INDICES: [u8; 36] = [
    0, 1, 2,    0, 2, 3, // front
    5, 4, 7,    5, 7, 6, // back
    1, 5, 6,    1, 6, 2, // right
    4, 0, 3,    4, 3, 7, // left
    3, 2, 6,    3, 6, 7, // top
    4, 5, 1,    4, 1, 0, // bottom
];

pub const CUBE_INDEX_COUNT: usize = CUBE_INDICES.len();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twelve_triangles() {
        assert_eq!(CUBE_INDEX_COUNT, 36);
        assert_eq!(CUBE_INDEX_COUNT / 3, 12);
    }

    #[test]
    fn indices_stay_in_range() {
        assert!(CUBE_INDICES
            .iter()
            .all(|&i| usize::from(i) < CUBE_VERTICES.len()));
    }

    #[test]
    fn every_corner_is_used() {
        for corner in 0..CUBE_VERTICES.len() as u8 {
            assert!(CUBE_INDICES.contains(&corner), "corner {corner} unused");
        }
    }

    #[test]
    fn triangles_face_outwards() {
        for tri in CUBE_INDICES.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]]
                .map(|i| CUBE_VERTICES[usize::from(i)].position.truncate());
            let normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(normal.dot(centroid) > 0.0, "triangle {tri:?} faces inwards");
        }
    }

    #[test]
    fn unit_extent() {
        for vertex in CUBE_VERTICES {
            let p = vertex.position;
            assert_eq!(p.w, 1.0);
            assert_eq!(p.truncate().abs(), glam::Vec3::splat(0.5));
        }
    }
}
