//! Named uniform values for glium draw calls.
//!
//! `uniform!` only accepts identifiers, while the car shader reads struct and array
//! members such as `pointLights[2].position`, so values are collected under their
//! literal GLSL names instead.

use glam::{Mat4, Vec3};
use glium::{
    texture::SrgbTexture2d,
    uniforms::{UniformValue, Uniforms},
};

use crate::animation::MeshAnimationData;

#[derive(Default)]
pub struct UniformSet<'t> {
    values: Vec<(String, UniformValue<'t>)>,
}

impl<'t> UniformSet<'t> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name`, replacing an earlier value with the same name
    pub fn set(&mut self, name: impl Into<String>, value: UniformValue<'t>) -> &mut Self {
        let name = name.into();
        match self.values.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.values.push((name, value)),
        }
        self
    }

    pub fn set_mat4(&mut self, name: impl Into<String>, value: Mat4) -> &mut Self {
        self.set(name, UniformValue::Mat4(value.to_cols_array_2d()))
    }

    pub fn set_vec3(&mut self, name: impl Into<String>, value: Vec3) -> &mut Self {
        self.set(name, UniformValue::Vec3(value.to_array()))
    }

    pub fn set_float(&mut self, name: impl Into<String>, value: f32) -> &mut Self {
        self.set(name, UniformValue::Float(value))
    }

    pub fn set_texture(
        &mut self,
        name: impl Into<String>,
        texture: &'t SrgbTexture2d,
    ) -> &mut Self {
        self.set(name, UniformValue::SrgbTexture2d(texture, None))
    }

    /// Visit `self` first, then `top`, without copying either
    pub fn layered<'a, U: Uniforms>(&'a self, top: &'a U) -> Layered<'a, 't, U> {
        Layered { base: self, top }
    }
}

#[cfg(test)]
impl<'t> UniformSet<'t> {
    pub fn get(&self, name: &str) -> Option<UniformValue<'t>> {
        self.values
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| *value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        match self.get(name)? {
            UniformValue::Float(value) => Some(value),
            _ => None,
        }
    }

    pub fn vec3(&self, name: &str) -> Option<Vec3> {
        match self.get(name)? {
            UniformValue::Vec3(value) => Some(Vec3::from(value)),
            _ => None,
        }
    }

    pub fn mat4(&self, name: &str) -> Option<Mat4> {
        match self.get(name)? {
            UniformValue::Mat4(value) => Some(Mat4::from_cols_array_2d(&value)),
            _ => None,
        }
    }
}

impl Uniforms for UniformSet<'_> {
    fn visit_values<'a, F: FnMut(&str, UniformValue<'a>)>(&'a self, mut output: F) {
        for (name, value) in &self.values {
            output(name.as_str(), *value);
        }
    }
}

pub struct Layered<'a, 't, U> {
    base: &'a UniformSet<'t>,
    top: &'a U,
}

impl<U: Uniforms> Uniforms for Layered<'_, '_, U> {
    fn visit_values<'a, F: FnMut(&str, UniformValue<'a>)>(&'a self, mut output: F) {
        self.base.visit_values(&mut output);
        self.top.visit_values(&mut output);
    }
}

/// Per-mesh parameters read by the car vertex shader
impl Uniforms for MeshAnimationData {
    fn visit_values<'a, F: FnMut(&str, UniformValue<'a>)>(&'a self, mut output: F) {
        output("meshCenter", UniformValue::Vec3(self.center.to_array()));
        output("meshDirection", UniformValue::Vec3(self.direction.to_array()));
        output(
            "meshRotationAxis",
            UniformValue::Vec3(self.rotation_axis.to_array()),
        );
        output("meshRotationAmount", UniformValue::Float(self.rotation_amount));
        output("meshPhaseOffset", UniformValue::Float(self.phase_offset));
        output("meshTravelScale", UniformValue::Float(self.travel_scale));
    }
}
