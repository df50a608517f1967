//! GL-free scene data: the vertex format, the cube mesh, the debug grid
//! and the orbiting camera.

pub mod camera;
pub mod cube;
pub mod grid;
pub mod vertex;

pub use camera::{spin_transform, Camera};
pub use cube::{CUBE_INDEX_COUNT, CUBE_INDICES, CUBE_VERTICES};
pub use grid::{Grid, GridLine};
pub use vertex::Vertex;
