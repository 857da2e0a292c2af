use bytemuck::{Pod, Zeroable};

/// Number of vertices in the cube mesh: 6 faces x 2 triangles x 3 vertices.
pub const CUBE_VERTEX_COUNT: u32 = 36;

/// Interleaved vertex as uploaded to the GPU: position then normal,
/// 24-byte stride.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

const fn v(position: [f32; 3], normal: [f32; 3]) -> Vertex {
    Vertex { position, normal }
}

/// Unit cube centered at the origin as 12 independent triangles with flat
/// per-face normals. Deliberately non-indexed: both draw bindings reference
/// this one array and draw all 36 vertices.
pub fn cube_vertices() -> [Vertex; 36] {
    let p = 0.5_f32;
    #[rustfmt::skip]
    let vertices = [
        // -Z face
        v([-p, -p, -p], [0.0, 0.0, -1.0]),
        v([ p, -p, -p], [0.0, 0.0, -1.0]),
        v([ p,  p, -p], [0.0, 0.0, -1.0]),
        v([ p,  p, -p], [0.0, 0.0, -1.0]),
        v([-p,  p, -p], [0.0, 0.0, -1.0]),
        v([-p, -p, -p], [0.0, 0.0, -1.0]),
        // +Z face
        v([-p, -p,  p], [0.0, 0.0, 1.0]),
        v([-p,  p,  p], [0.0, 0.0, 1.0]),
        v([ p,  p,  p], [0.0, 0.0, 1.0]),
        v([ p,  p,  p], [0.0, 0.0, 1.0]),
        v([ p, -p,  p], [0.0, 0.0, 1.0]),
        v([-p, -p,  p], [0.0, 0.0, 1.0]),
        // -X face
        v([-p,  p,  p], [-1.0, 0.0, 0.0]),
        v([-p,  p, -p], [-1.0, 0.0, 0.0]),
        v([-p, -p, -p], [-1.0, 0.0, 0.0]),
        v([-p, -p, -p], [-1.0, 0.0, 0.0]),
        v([-p, -p,  p], [-1.0, 0.0, 0.0]),
        v([-p,  p,  p], [-1.0, 0.0, 0.0]),
        // +X face
        v([ p,  p,  p], [1.0, 0.0, 0.0]),
        v([ p, -p, -p], [1.0, 0.0, 0.0]),
        v([ p,  p, -p], [1.0, 0.0, 0.0]),
        v([ p, -p, -p], [1.0, 0.0, 0.0]),
        v([ p,  p,  p], [1.0, 0.0, 0.0]),
        v([ p, -p,  p], [1.0, 0.0, 0.0]),
        // -Y face
        v([-p, -p, -p], [0.0, -1.0, 0.0]),
        v([ p, -p, -p], [0.0, -1.0, 0.0]),
        v([ p, -p,  p], [0.0, -1.0, 0.0]),
        v([ p, -p,  p], [0.0, -1.0, 0.0]),
        v([-p, -p,  p], [0.0, -1.0, 0.0]),
        v([-p, -p, -p], [0.0, -1.0, 0.0]),
        // +Y face
        v([-p,  p, -p], [0.0, 1.0, 0.0]),
        v([ p,  p,  p], [0.0, 1.0, 0.0]),
        v([ p,  p, -p], [0.0, 1.0, 0.0]),
        v([ p,  p,  p], [0.0, 1.0, 0.0]),
        v([-p,  p, -p], [0.0, 1.0, 0.0]),
        v([-p,  p,  p], [0.0, 1.0, 0.0]),
    ];
    vertices
}
