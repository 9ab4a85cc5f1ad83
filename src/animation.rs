//! Per-mesh parameters for the disassemble/reassemble effect.
//!
//! Every value is hashed from the mesh's own bounding box center, so an unchanged model
//! always animates the same way.

use glam::Vec3;
use tracing::{debug, warn};

use crate::{
    geometry::{lerp, try_normalize},
    load::Mesh,
    noise::{scalar_noise, vector_noise, MIN_NOISE_LENGTH},
};

const SEED_DIRECTION: f32 = 2.57;
const SEED_AXIS_HINT: f32 = 9.31;
const SEED_AXIS_FALLBACK: f32 = 15.73;
const SEED_TRAVEL: f32 = 3.71;
const SEED_ROTATION: f32 = 6.42;
const SEED_PHASE: f32 = 9.88;

pub const TRAVEL_SCALE_RANGE: (f32, f32) = (0.7, 1.45);
pub const ROTATION_AMOUNT_RANGE: (f32, f32) = (0.2, 1.05);
pub const PHASE_OFFSET_SPREAD: f32 = 1.2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MeshAnimationData {
    /// Bounding box center of the mesh
    pub center: Vec3,
    /// Unit vector the mesh travels along while disassembling
    pub direction: Vec3,
    /// Unit vector the mesh spins around
    pub rotation_axis: Vec3,
    pub rotation_amount: f32,
    pub phase_offset: f32,
    pub travel_scale: f32,
}

impl MeshAnimationData {
    pub fn new(mesh_center: Vec3, model_center: Vec3) -> Self {
        let center = mesh_center;
        let direction = try_normalize(center - model_center, MIN_NOISE_LENGTH)
            .unwrap_or_else(|| vector_noise(center, SEED_DIRECTION));

        // checked before normalizing: a parallel hint gives a zero-length cross product
        let rotation_axis = try_normalize(
            direction.cross(vector_noise(center, SEED_AXIS_HINT)),
            MIN_NOISE_LENGTH,
        )
        .unwrap_or_else(|| vector_noise(center, SEED_AXIS_FALLBACK));

        let (travel_min, travel_max) = TRAVEL_SCALE_RANGE;
        let (rotation_min, rotation_max) = ROTATION_AMOUNT_RANGE;
        Self {
            center,
            direction,
            rotation_axis,
            rotation_amount: lerp(rotation_min, rotation_max, scalar_noise(center, SEED_ROTATION)),
            phase_offset: (scalar_noise(center, SEED_PHASE) - 0.5) * PHASE_OFFSET_SPREAD,
            travel_scale: lerp(travel_min, travel_max, scalar_noise(center, SEED_TRAVEL)),
        }
    }
}

/// One record per mesh, in mesh order.
pub fn compute_mesh_animation_data(meshes: &[Mesh], model_center: Vec3) -> Vec<MeshAnimationData> {
    meshes
        .iter()
        .map(|mesh| MeshAnimationData::new(mesh.bounds().center(), model_center))
        .collect()
}

/// Owns the generated parameters and keeps them in step with the mesh list.
#[derive(Clone, Debug, Default)]
pub struct MeshAnimations {
    data: Vec<MeshAnimationData>,
}

impl MeshAnimations {
    pub fn new(meshes: &[Mesh], model_center: Vec3) -> Self {
        let data = compute_mesh_animation_data(meshes, model_center);
        debug!("generated animation parameters for {} meshes", data.len());
        Self { data }
    }

    /// Regenerates everything if the stored count no longer matches `meshes`.
    ///
    /// Returns the parameters, guaranteed to be the same length as `meshes`.
    pub fn sync(&mut self, meshes: &[Mesh], model_center: Vec3) -> &[MeshAnimationData] {
        if self.data.len() != meshes.len() {
            warn!(
                "animation parameters out of sync ({} stored, {} meshes), regenerating",
                self.data.len(),
                meshes.len()
            );
            self.data = compute_mesh_animation_data(meshes, model_center);
        }
        &self.data
    }
}

#[cfg(test)]
impl MeshAnimations {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
