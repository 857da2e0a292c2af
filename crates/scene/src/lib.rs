//! CPU-side scene model for the two-cube demo.
//!
//! Everything here is pure data and pure math: the cube mesh, the fixed
//! camera, the per-frame transform computation, and a reference
//! implementation of the lighting formula the fragment shader applies.
//!
//! # Invariants
//! - The mesh never changes after construction; the GPU uploads it once.
//! - `Scene::frame` is a pure function of elapsed time; all per-frame
//!   mutation lives in the returned `FrameState`.
//! - The camera and light are constant for the life of the program.

mod camera;
mod frame;
mod lighting;
mod mesh;

pub use camera::Camera;
pub use frame::{FrameState, ObjectState, SPIN_AXIS, Scene, SpinCube};
pub use lighting::{AMBIENT_STRENGTH, PointLight, shade};
pub use mesh::{CUBE_VERTEX_COUNT, Vertex, cube_vertices};
