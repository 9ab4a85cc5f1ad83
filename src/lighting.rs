//! Scene lights. Only the point light positions move, as closed-form functions of the
//! animation clock; everything else is fixed.

use std::f32::consts::PI;

use glam::{Mat4, Vec3};

use crate::uniforms::UniformSet;

pub const POINT_LIGHT_COUNT: usize = 4;

pub const LAMP_COLORS: [Vec3; POINT_LIGHT_COUNT] = [
    Vec3::new(1.0, 0.7, 0.3),
    Vec3::new(0.6, 0.8, 1.0),
    Vec3::new(0.9, 0.4, 0.8),
    Vec3::new(0.6, 1.0, 0.6),
];

/// Edge length of the marker cube drawn at each point light
pub const LAMP_SIZE: f32 = 0.15;

pub fn point_light_positions(time: f32) -> [Vec3; POINT_LIGHT_COUNT] {
    let t = time;
    let orbit = 0.32 * t + PI * 0.33;
    [
        Vec3::new(2.8 * (0.45 * t).sin(), 2.4, 2.8 * (0.45 * t).cos()),
        Vec3::new(
            -3.0 * orbit.sin(),
            1.6 + 0.2 * (1.5 * t).sin(),
            3.0 * orbit.cos(),
        ),
        Vec3::new(0.0, 3.6 + 0.5 * (0.9 * t).sin(), 3.4),
        Vec3::new(
            0.0,
            1.3 + 0.4 * (1.3 * t).sin(),
            -3.6 - 0.8 * (0.8 * t).sin(),
        ),
    ]
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Attenuation {
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Attenuation {
    fn write(&self, prefix: &str, set: &mut UniformSet) {
        set.set_float(format!("{prefix}.constant"), self.constant)
            .set_float(format!("{prefix}.linear"), self.linear)
            .set_float(format!("{prefix}.quadratic"), self.quadratic);
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DirectionalLight {
    pub direction: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            direction: Vec3::new(-0.35, -1.0, -0.4),
            ambient: Vec3::splat(0.12),
            diffuse: Vec3::new(0.35, 0.35, 0.4),
            specular: Vec3::splat(0.45),
        }
    }
}

impl DirectionalLight {
    pub fn write(&self, set: &mut UniformSet) {
        set.set_vec3("dirLight.direction", self.direction)
            .set_vec3("dirLight.ambient", self.ambient)
            .set_vec3("dirLight.diffuse", self.diffuse)
            .set_vec3("dirLight.specular", self.specular);
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Vec3,
    pub attenuation: Attenuation,
}

impl PointLight {
    pub fn new(position: Vec3, color: Vec3) -> Self {
        Self {
            position,
            color,
            attenuation: Attenuation {
                constant: 1.0,
                linear: 0.045,
                quadratic: 0.0075,
            },
        }
    }

    pub fn write(&self, index: usize, set: &mut UniformSet) {
        let prefix = format!("pointLights[{index}]");
        set.set_vec3(format!("{prefix}.position"), self.position)
            .set_vec3(format!("{prefix}.ambient"), self.color * 0.12)
            .set_vec3(format!("{prefix}.diffuse"), self.color * 0.9)
            .set_vec3(format!("{prefix}.specular"), Vec3::ONE);
        self.attenuation.write(&prefix, set);
    }

    /// Model matrix of the marker cube
    pub fn marker_transform(&self) -> Mat4 {
        Mat4::from_translation(self.position) * Mat4::from_scale(Vec3::splat(LAMP_SIZE))
    }
}

/// Flashlight fixed to the camera.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpotLight {
    pub position: Vec3,
    pub direction: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub attenuation: Attenuation,
    /// Degrees
    pub cut_off: f32,
    /// Degrees
    pub outer_cut_off: f32,
}

impl SpotLight {
    pub fn headlamp(position: Vec3, direction: Vec3) -> Self {
        Self {
            position,
            direction,
            ambient: Vec3::ZERO,
            diffuse: Vec3::splat(0.85),
            specular: Vec3::ONE,
            attenuation: Attenuation {
                constant: 1.0,
                linear: 0.045,
                quadratic: 0.010,
            },
            cut_off: 13.0,
            outer_cut_off: 17.5,
        }
    }

    /// Cut-offs are sent as cosines so the shader compares them against dot products
    pub fn write(&self, set: &mut UniformSet) {
        set.set_vec3("spotLight.position", self.position)
            .set_vec3("spotLight.direction", self.direction)
            .set_vec3("spotLight.ambient", self.ambient)
            .set_vec3("spotLight.diffuse", self.diffuse)
            .set_vec3("spotLight.specular", self.specular)
            .set_float("spotLight.cutOff", self.cut_off.to_radians().cos())
            .set_float("spotLight.outerCutOff", self.outer_cut_off.to_radians().cos());
        self.attenuation.write("spotLight", set);
    }
}

/// Every light in the scene for one frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Lighting {
    pub directional: DirectionalLight,
    pub points: [PointLight; POINT_LIGHT_COUNT],
    pub spot: SpotLight,
}

impl Lighting {
    pub fn at(time: f32, eye: Vec3, look: Vec3) -> Self {
        let positions = point_light_positions(time);
        Self {
            directional: DirectionalLight::default(),
            points: std::array::from_fn(|i| PointLight::new(positions[i], LAMP_COLORS[i])),
            spot: SpotLight::headlamp(eye, look),
        }
    }

    pub fn write(&self, set: &mut UniformSet) {
        self.directional.write(set);
        for (i, light) in self.points.iter().enumerate() {
            light.write(i, set);
        }
        self.spot.write(set);
    }
}
