use crate::camera::Camera;
use crate::lighting::PointLight;
use glam::{Mat4, Vec3};

/// Rotation axis shared by both cubes. Not a unit vector; `Scene::frame`
/// normalizes it before building the rotation, since
/// `Mat4::from_axis_angle` requires a normalized axis.
pub const SPIN_AXIS: Vec3 = Vec3::new(1.0, 1.0, 1.0);

/// Per-cube constants: where it sits, what color it is, and how fast it
/// spins. Negative `spin_dps` spins the opposite way.
#[derive(Debug, Clone, Copy)]
pub struct SpinCube {
    pub offset: Vec3,
    pub color: Vec3,
    /// Angular speed in degrees per second, signed.
    pub spin_dps: f32,
}

impl SpinCube {
    /// Rotation angle in radians at the given elapsed time.
    pub fn angle_at(&self, elapsed_secs: f32) -> f32 {
        elapsed_secs * self.spin_dps.to_radians()
    }

    /// Model matrix at the given elapsed time: translate to the cube's
    /// offset, then rotate about the shared axis.
    pub fn model_at(&self, elapsed_secs: f32) -> Mat4 {
        Mat4::from_translation(self.offset)
            * Mat4::from_axis_angle(SPIN_AXIS.normalize(), self.angle_at(elapsed_secs))
    }
}

/// The whole scene: two cubes, one light, one fixed camera. All constants;
/// the only per-frame input is elapsed time.
#[derive(Debug, Clone, Copy)]
pub struct Scene {
    pub cubes: [SpinCube; 2],
    pub light: PointLight,
    pub camera: Camera,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            cubes: [
                SpinCube {
                    offset: Vec3::new(-1.0, 0.0, 0.0),
                    color: Vec3::new(1.0, 1.0, 0.2),
                    spin_dps: 50.0,
                },
                SpinCube {
                    offset: Vec3::new(1.0, 0.0, 0.0),
                    color: Vec3::new(0.0, 1.0, 0.0),
                    spin_dps: -50.0,
                },
            ],
            light: PointLight::default(),
            camera: Camera::default(),
        }
    }
}

/// Per-object state for one frame.
#[derive(Debug, Clone, Copy)]
pub struct ObjectState {
    pub model: Mat4,
    pub color: Vec3,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameState {
    pub view: Mat4,
    pub projection: Mat4,
    pub objects: [ObjectState; 2],
}

impl Scene {
    /// Compute one frame's matrices from elapsed time. Pure: view and
    /// projection come out identical every call (the camera never moves),
    /// but rebuilding them here keeps the frame path a single function of
    /// time.
    pub fn frame(&self, elapsed_secs: f32) -> FrameState {
        let objects = self.cubes.map(|cube| ObjectState {
            model: cube.model_at(elapsed_secs),
            color: cube.color,
        });
        FrameState {
            view: self.camera.view_matrix(),
            projection: self.camera.projection_matrix(),
            objects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn at_time_zero_models_are_pure_translations() {
        let scene = Scene::default();
        let frame = scene.frame(0.0);
        let expected_a = Mat4::from_translation(Vec3::new(-1.0, 0.0, 0.0));
        let expected_b = Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0));
        assert!(frame.objects[0].model.abs_diff_eq(expected_a, EPS));
        assert!(frame.objects[1].model.abs_diff_eq(expected_b, EPS));
    }

    #[test]
    fn angle_is_elapsed_times_fifty_degrees() {
        let scene = Scene::default();
        let t = 2.5;
        assert_eq!(scene.cubes[0].angle_at(t), t * 50.0_f32.to_radians());
    }

    #[test]
    fn cube_b_angle_negates_cube_a() {
        let scene = Scene::default();
        for t in [0.0, 0.25, 1.0, 7.5, 60.0] {
            assert_eq!(scene.cubes[1].angle_at(t), -scene.cubes[0].angle_at(t));
        }
    }

    #[test]
    fn colors_are_time_invariant() {
        let scene = Scene::default();
        for t in [0.0, 1.0, 123.4] {
            let frame = scene.frame(t);
            assert_eq!(frame.objects[0].color, Vec3::new(1.0, 1.0, 0.2));
            assert_eq!(frame.objects[1].color, Vec3::new(0.0, 1.0, 0.0));
        }
    }

    #[test]
    fn model_is_translation_of_axis_angle_rotation() {
        let scene = Scene::default();
        let t = 3.0;
        let cube = scene.cubes[0];
        let expected = Mat4::from_translation(cube.offset)
            * Mat4::from_axis_angle(SPIN_AXIS.normalize(), cube.angle_at(t));
        assert!(cube.model_at(t).abs_diff_eq(expected, EPS));
    }

    #[test]
    fn rotation_preserves_the_spin_axis() {
        let scene = Scene::default();
        let model = scene.cubes[0].model_at(4.2);
        let spun = model.transform_vector3(SPIN_AXIS);
        assert!((spun - SPIN_AXIS).length() < 1e-4);
    }

    #[test]
    fn view_and_projection_match_the_camera() {
        let scene = Scene::default();
        let frame = scene.frame(9.0);
        assert!(frame.view.abs_diff_eq(scene.camera.view_matrix(), EPS));
        assert!(
            frame
                .projection
                .abs_diff_eq(scene.camera.projection_matrix(), EPS)
        );
    }
}
