use glam::Vec3;

/// Single white point light shared by every draw.
#[derive(Debug, Clone, Copy)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Vec3,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: Vec3::new(1.0, 1.0, 2.0),
            color: Vec3::ONE,
        }
    }
}

/// Ambient strength applied before the diffuse term.
pub const AMBIENT_STRENGTH: f32 = 0.1;

/// Reference implementation of the fragment shader's lighting:
/// `(0.1 * lightColor + max(0, N.L) * lightColor) * objectColor`,
/// with L pointing from the surface point toward the light.
///
/// The WGSL in the render backend must stay in lockstep with this function;
/// the tests here pin the contract.
pub fn shade(normal: Vec3, frag_pos: Vec3, light: &PointLight, object_color: Vec3) -> Vec3 {
    let ambient = AMBIENT_STRENGTH * light.color;
    let n = normal.normalize();
    let light_dir = (light.position - frag_pos).normalize();
    let diffuse = n.dot(light_dir).max(0.0) * light.color;
    (ambient + diffuse) * object_color
}
