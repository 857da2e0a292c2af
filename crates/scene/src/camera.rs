use glam::{Mat4, Vec3};

/// Fixed camera: position, look direction, and projection parameters.
/// Constant for the life of the program; matrices are rebuilt from it on
/// every frame anyway.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub eye: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 3.0),
            forward: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::Y,
            fov_y: 45.0_f32.to_radians(),
            aspect: 800.0 / 600.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Camera {
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.eye + self.forward, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_constants() {
        let cam = Camera::default();
        assert_eq!(cam.eye, Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(cam.forward, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(cam.up, Vec3::Y);
        assert_eq!(cam.fov_y, 45.0_f32.to_radians());
        assert_eq!(cam.near, 0.1);
        assert_eq!(cam.far, 100.0);
    }

    #[test]
    fn matrices_are_finite() {
        let cam = Camera::default();
        for m in [cam.view_matrix(), cam.projection_matrix()] {
            assert!(m.to_cols_array().iter().all(|c| c.is_finite()));
        }
    }

    #[test]
    fn view_moves_eye_to_origin() {
        let cam = Camera::default();
        let at_origin = cam.view_matrix().transform_point3(cam.eye);
        assert!(at_origin.length() < 1e-6);
    }
}
