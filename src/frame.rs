use glam::{Mat4, Vec3};
use glium::{index::NoIndices, index::PrimitiveType, DrawParameters, Frame, Surface};
use tracing::trace;

use crate::{
    animation::{MeshAnimationData, MeshAnimations},
    buffer::GpuScene,
    camera::{Camera, Movement},
    clock::AnimationClock,
    config::ViewerConfig,
    error::ViewerError,
    input::{FrameInput, InputState, KeyBindings, ViewerAction},
    lighting::Lighting,
    load::Model,
    shader::Programs,
    uniforms::UniformSet,
};

const MOVEMENTS: [Movement; 6] = [
    Movement::Forward,
    Movement::Backward,
    Movement::Left,
    Movement::Right,
    Movement::Up,
    Movement::Down,
];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    Continue,
    Exit,
}

/// All state touched by the frame loop: written by `update`, read when drawing.
pub struct Viewer {
    config: ViewerConfig,
    model: Model,
    animations: MeshAnimations,
    camera: Camera,
    clock: AnimationClock,
    input: InputState,
    params: DrawParameters<'static>,
}

impl Viewer {
    pub fn new(config: ViewerConfig, model: Model) -> Self {
        let animations = MeshAnimations::new(model.meshes(), model.bounds().center());
        Self {
            camera: Camera::new(&config.camera),
            config,
            model,
            animations,
            clock: AnimationClock::default(),
            input: InputState::new(KeyBindings::default()),
            params: DrawParameters {
                depth: glium::Depth {
                    test: glium::DepthTest::IfLess,
                    write: true,
                    ..Default::default()
                },
                polygon_mode: glium::PolygonMode::Fill,
                ..Default::default()
            },
        }
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Apply this frame's input, then advance the animation clock by `delta` seconds.
    pub fn update(&mut self, delta: f32) -> FrameStatus {
        let frame = self.input.begin_frame();
        self.apply_input(&frame, delta);
        self.clock.advance(delta);
        if frame.is_held(ViewerAction::Quit) {
            FrameStatus::Exit
        } else {
            FrameStatus::Continue
        }
    }

    fn apply_input(&mut self, frame: &FrameInput, delta: f32) {
        let boost = if frame.is_held(ViewerAction::Boost) {
            self.config.camera.boost
        } else {
            1.0
        };
        for movement in MOVEMENTS {
            if frame.is_held(ViewerAction::Move(movement)) {
                self.camera.travel(movement, delta * boost);
            }
        }

        // window y grows downwards, pitch grows upwards
        if frame.mouse_delta.length_squared() > 0.0 {
            self.camera.look(frame.mouse_delta.x, -frame.mouse_delta.y);
        }
        if frame.scroll_delta != 0.0 {
            self.camera.scroll(frame.scroll_delta);
        }

        for command in frame.pressed.iter().filter_map(|a| a.animation_command()) {
            self.clock.apply(command);
        }
    }

    pub fn lighting(&self) -> Lighting {
        Lighting::at(self.clock.time(), self.camera.position(), self.camera.front())
    }

    pub fn projection(&self, aspect_ratio: f32) -> Mat4 {
        let camera = &self.config.camera;
        self.camera.perspective(aspect_ratio, camera.near, camera.far)
    }

    pub fn model_transform(&self) -> Mat4 {
        let model = &self.config.model;
        Mat4::from_translation(Vec3::from(model.offset))
            * Mat4::from_scale(Vec3::splat(model.scale))
    }

    /// Uniforms shared by every mesh of the car this frame
    pub fn car_uniforms<'t>(&self, lighting: &Lighting, aspect_ratio: f32) -> UniformSet<'t> {
        let animation = &self.config.animation;
        let mut set = UniformSet::new();
        set.set_mat4("projection", self.projection(aspect_ratio))
            .set_mat4("view", self.camera.view())
            .set_mat4("model", self.model_transform())
            .set_vec3("viewPos", self.camera.position())
            .set_float("time", self.clock.time())
            .set_float("disassembleDistance", animation.disassemble_distance)
            .set_float("ambientStrength", animation.ambient_strength)
            .set_float("materialShininess", animation.material_shininess);
        lighting.write(&mut set);
        set
    }

    /// One uniform set per point light marker
    pub fn lamp_uniforms(
        &self,
        lighting: &Lighting,
        aspect_ratio: f32,
    ) -> Vec<UniformSet<'static>> {
        let projection = self.projection(aspect_ratio);
        let view = self.camera.view();
        lighting
            .points
            .iter()
            .map(|light| {
                let mut set = UniformSet::new();
                set.set_mat4("projection", projection)
                    .set_mat4("view", view)
                    .set_mat4("model", light.marker_transform())
                    .set_vec3("lightColor", light.color);
                set
            })
            .collect()
    }

    /// Per-mesh parameters, regenerated first if they no longer match the mesh list
    pub fn mesh_animations(&mut self) -> &[MeshAnimationData] {
        self.animations.sync(self.model.meshes(), self.model.bounds().center())
    }

    pub fn draw_frame(
        &mut self,
        target: &mut Frame,
        scene: &GpuScene,
        programs: &Programs,
    ) -> Result<(), ViewerError> {
        let (width, height) = target.get_dimensions();
        #[allow(clippy::cast_precision_loss)]
        let aspect_ratio = width.max(1) as f32 / height.max(1) as f32;

        let clear = self.config.window.clear_color;
        target.clear_color_and_depth((clear[0], clear[1], clear[2], clear[3]), 1.0);

        let lighting = self.lighting();
        let mut car = self.car_uniforms(&lighting, aspect_ratio);
        car.set_texture("texture_diffuse1", &scene.diffuse);
        let lamps = self.lamp_uniforms(&lighting, aspect_ratio);

        let params = self.params.clone();
        for (buffers, animation) in scene.meshes.iter().zip(self.mesh_animations()) {
            target.draw(
                &buffers.vertices,
                &buffers.indices,
                &programs.car,
                &car.layered(animation),
                &params,
            )?;
        }

        let cube = NoIndices(PrimitiveType::TrianglesList);
        for lamp in &lamps {
            target.draw(&scene.lamp, &cube, &programs.lamp, lamp, &params)?;
        }

        trace!(time = self.clock.time(), "frame drawn");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::{Mesh, ModelVertex};
    use winit::keyboard::KeyCode;

    fn part(name: &str, at: [f32; 3]) -> Mesh {
        let vertex = |offset: f32| ModelVertex {
            position: [at[0] + offset, at[1] + offset, at[2] + offset],
            ..Default::default()
        };
        Mesh::new(name, vec![vertex(-0.25), vertex(0.25)], Vec::new()).unwrap()
    }

    fn viewer() -> Viewer {
        let model = Model::new(vec![
            part("hood", [0.0, 0.5, 2.0]),
            part("door", [1.0, 0.3, 0.0]),
            part("wing", [0.0, 1.2, -2.0]),
        ])
        .unwrap();
        Viewer::new(ViewerConfig::default(), model)
    }

    fn tap(viewer: &mut Viewer, key: KeyCode, delta: f32) {
        viewer.input_mut().set_key(key, true);
        viewer.update(delta);
        viewer.input_mut().set_key(key, false);
        viewer.update(0.0);
    }

    #[test]
    fn clock_runs_without_input() {
        let mut viewer = viewer();
        assert_eq!(viewer.update(0.5), FrameStatus::Continue);
        assert_eq!(viewer.update(0.25), FrameStatus::Continue);
        assert_eq!(viewer.clock().time(), 0.75);
    }

    #[test]
    fn space_pauses_once_per_press() {
        let mut viewer = viewer();
        viewer.input_mut().set_key(KeyCode::Space, true);
        for _ in 0..10 {
            viewer.update(0.1);
        }
        // paused on the first frame, holding the key does not toggle it back
        assert!(viewer.clock().is_paused());
        assert_eq!(viewer.clock().time(), 0.0);

        viewer.input_mut().set_key(KeyCode::Space, false);
        viewer.update(0.1);
        tap(&mut viewer, KeyCode::Space, 0.5);
        assert!(!viewer.clock().is_paused());
        assert_eq!(viewer.clock().time(), 0.5);
    }

    #[test]
    fn arrow_keys_step_speed() {
        let mut viewer = viewer();
        tap(&mut viewer, KeyCode::ArrowUp, 0.0);
        tap(&mut viewer, KeyCode::ArrowUp, 0.0);
        assert_eq!(viewer.clock().speed(), 1.5);
        for _ in 0..30 {
            tap(&mut viewer, KeyCode::ArrowDown, 0.0);
        }
        assert_eq!(viewer.clock().speed(), 0.25);
    }

    #[test]
    fn reset_key_restores_clock() {
        let mut viewer = viewer();
        tap(&mut viewer, KeyCode::ArrowUp, 1.0);
        tap(&mut viewer, KeyCode::Space, 1.0);
        assert!(viewer.clock().time() > 0.0);
        tap(&mut viewer, KeyCode::KeyR, 0.0);
        assert_eq!(*viewer.clock(), AnimationClock::default());
    }

    #[test]
    fn movement_keys_fly_the_camera() {
        let mut viewer = viewer();
        let start = viewer.camera().position();
        viewer.input_mut().set_key(KeyCode::KeyW, true);
        viewer.update(1.0);
        assert!(viewer.camera().position().z < start.z);

        let before_boost = viewer.camera().position();
        viewer.input_mut().set_key(KeyCode::ShiftLeft, true);
        viewer.update(1.0);
        let boosted = before_boost.z - viewer.camera().position().z;
        assert!((boosted - 2.5 * 2.5).abs() < 1e-4);
    }

    #[test]
    fn escape_requests_exit() {
        let mut viewer = viewer();
        viewer.input_mut().set_key(KeyCode::Escape, true);
        assert_eq!(viewer.update(0.016), FrameStatus::Exit);
    }

    #[test]
    fn car_uniforms_follow_clock_and_camera() {
        let mut viewer = viewer();
        viewer.update(2.0);
        let lighting = viewer.lighting();
        let set = viewer.car_uniforms(&lighting, 16.0 / 9.0);

        assert_eq!(set.float("time"), Some(2.0));
        assert_eq!(set.float("disassembleDistance"), Some(5.6));
        assert_eq!(set.float("ambientStrength"), Some(0.18));
        assert_eq!(set.float("materialShininess"), Some(64.0));
        assert_eq!(set.vec3("viewPos"), Some(viewer.camera().position()));
        assert_eq!(set.vec3("spotLight.direction"), Some(viewer.camera().front()));
        assert_eq!(
            set.vec3("pointLights[0].position"),
            Some(crate::lighting::point_light_positions(2.0)[0])
        );
        assert_eq!(
            set.mat4("model"),
            Some(Mat4::from_translation(Vec3::new(0.0, -0.8, 0.0)))
        );
        assert_eq!(set.mat4("view"), Some(viewer.camera().view()));
    }

    #[test]
    fn lamp_uniforms_per_light() {
        let viewer = viewer();
        let lighting = viewer.lighting();
        let lamps = viewer.lamp_uniforms(&lighting, 1.0);
        assert_eq!(lamps.len(), crate::lighting::POINT_LIGHT_COUNT);
        for (set, light) in lamps.iter().zip(&lighting.points) {
            assert_eq!(set.vec3("lightColor"), Some(light.color));
            assert_eq!(set.mat4("model"), Some(light.marker_transform()));
        }
    }

    #[test]
    fn mesh_animations_match_mesh_count() {
        let mut viewer = viewer();
        let count = viewer.model().meshes().len();
        let centers: Vec<Vec3> = viewer.mesh_animations().iter().map(|a| a.center).collect();
        assert_eq!(centers.len(), count);
        assert!(centers[1].abs_diff_eq(Vec3::new(1.0, 0.3, 0.0), 1e-6));
    }

    #[test]
    fn stale_animations_are_regenerated_before_use() {
        let mut viewer = viewer();
        viewer.animations = MeshAnimations::default();
        assert_eq!(viewer.mesh_animations().len(), 3);
    }
}
