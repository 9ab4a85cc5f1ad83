use glam::{Mat4, Vec3};

use crate::config::CameraConfig;

const PITCH_LIMIT: f32 = 89.0;
const MIN_ZOOM: f32 = 1.0;
const MAX_ZOOM: f32 = 45.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Movement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// Free-flying camera with Euler angles in degrees.
#[derive(Clone, Debug)]
pub struct Camera {
    position: Vec3,
    front: Vec3,
    up: Vec3,
    right: Vec3,
    world_up: Vec3,
    yaw: f32,
    pitch: f32,
    zoom: f32,
    movement_speed: f32,
    sensitivity: f32,
}

impl Camera {
    pub fn new(config: &CameraConfig) -> Self {
        let mut camera = Self {
            position: Vec3::from(config.position),
            front: Vec3::NEG_Z,
            up: Vec3::Y,
            right: Vec3::X,
            world_up: Vec3::Y,
            yaw: config.yaw,
            pitch: config.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            zoom: config.zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            movement_speed: config.movement_speed,
            sensitivity: config.sensitivity,
        };
        camera.update_vectors();
        camera
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    pub fn perspective(&self, aspect_ratio: f32, near: f32, far: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.zoom.to_radians(), aspect_ratio, near, far)
    }

    /// Move along the camera axes for `delta` seconds; up and down follow the camera's own up.
    pub fn travel(&mut self, movement: Movement, delta: f32) {
        let velocity = self.movement_speed * delta;
        self.position += velocity
            * match movement {
                Movement::Forward => self.front,
                Movement::Backward => -self.front,
                Movement::Left => -self.right,
                Movement::Right => self.right,
                Movement::Up => self.up,
                Movement::Down => -self.up,
            };
    }

    /// `y_offset` is positive when the mouse moves up.
    pub fn look(&mut self, x_offset: f32, y_offset: f32) {
        self.yaw += x_offset * self.sensitivity;
        self.pitch = (self.pitch + y_offset * self.sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_vectors();
    }

    pub fn scroll(&mut self, y_offset: f32) {
        self.zoom = (self.zoom - y_offset).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos())
            .normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

#[cfg(test)]
impl Camera {
    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Vertical field of view in degrees
    pub fn zoom(&self) -> f32 {
        self.zoom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        a.abs_diff_eq(b, 1e-5)
    }

    #[test]
    fn default_camera_looks_down_negative_z() {
        let camera = Camera::new(&CameraConfig::default());
        assert!(close(camera.front(), Vec3::NEG_Z));
        assert!(close(camera.right(), Vec3::X));
        assert!(close(camera.up(), Vec3::Y));
        assert_eq!(camera.position(), Vec3::new(0.0, 1.8, 8.0));
    }

    #[test]
    fn travel_scales_with_speed_and_time() {
        let mut camera = Camera::new(&CameraConfig::default());
        camera.travel(Movement::Forward, 2.0);
        assert!(close(camera.position(), Vec3::new(0.0, 1.8, 3.0)));
        camera.travel(Movement::Right, 1.0);
        camera.travel(Movement::Up, 0.4);
        assert!(close(camera.position(), Vec3::new(2.5, 2.8, 3.0)));
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = Camera::new(&CameraConfig::default());
        camera.look(0.0, 10_000.0);
        assert!(camera.front().y > 0.99);
        assert!(camera.front().y < 1.0);
        assert!(camera.up().is_finite());
    }

    #[test]
    fn zoom_is_clamped() {
        let mut camera = Camera::new(&CameraConfig::default());
        camera.scroll(100.0);
        assert_eq!(camera.zoom(), MIN_ZOOM);
        camera.scroll(-100.0);
        assert_eq!(camera.zoom(), MAX_ZOOM);
    }

    #[test]
    fn view_maps_target_onto_negative_z() {
        let camera = Camera::new(&CameraConfig::default());
        let target = camera.position() + camera.front() * 3.0;
        let in_view = camera.view().transform_point3(target);
        assert!(close(in_view, Vec3::new(0.0, 0.0, -3.0)));
    }
}
