use std::path::Path;

use glium::{
    index::PrimitiveType, texture::RawImage2d, texture::SrgbTexture2d, Display, IndexBuffer,
    VertexBuffer,
};
use glutin::surface::WindowSurface;
use tracing::{debug, info};

use crate::{
    error::ViewerError,
    geometry::UNIT_CUBE,
    load::{self, Mesh, Model, ModelVertex},
};

pub struct DisplayMesh<'a>(pub &'a Mesh, pub &'a Display<WindowSurface>);

pub struct MeshBuffers {
    pub vertices: VertexBuffer<ModelVertex>,
    pub indices: IndexBuffer<u32>,
}

impl TryFrom<DisplayMesh<'_>> for MeshBuffers {
    type Error = ViewerError;
    fn try_from(DisplayMesh(mesh, display): DisplayMesh) -> Result<MeshBuffers, ViewerError> {
        Ok(MeshBuffers {
            vertices: VertexBuffer::new(display, mesh.vertices())?,
            indices: IndexBuffer::new(display, PrimitiveType::TrianglesList, mesh.indices())?,
        })
    }
}

#[derive(Copy, Clone, Debug)]
pub struct LampVertex {
    pub position: [f32; 3],
}

glium::implement_vertex!(LampVertex, position);

/// Everything the GPU needs to draw the scene, released when dropped.
pub struct GpuScene {
    /// Same order as the model's meshes
    pub meshes: Vec<MeshBuffers>,
    pub lamp: VertexBuffer<LampVertex>,
    pub diffuse: SrgbTexture2d,
}

impl GpuScene {
    pub fn upload(
        display: &Display<WindowSurface>,
        model: &Model,
        diffuse_texture: Option<&Path>,
    ) -> Result<Self, ViewerError> {
        let meshes = model
            .meshes()
            .iter()
            .map(|mesh| {
                debug!(
                    "uploading mesh '{}' ({} vertices)",
                    mesh.name(),
                    mesh.vertices().len()
                );
                MeshBuffers::try_from(DisplayMesh(mesh, display))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let cube: Vec<LampVertex> = UNIT_CUBE
            .iter()
            .map(|&position| LampVertex { position })
            .collect();
        let lamp = VertexBuffer::new(display, &cube)?;

        let image = match diffuse_texture {
            Some(path) => {
                info!("Loading diffuse texture {:?}", path);
                load::load_rgba(path)?
            }
            None => RawImage2d::from_raw_rgba(vec![255u8; 4], (1, 1)),
        };
        let diffuse = SrgbTexture2d::new(display, image)?;

        Ok(Self {
            meshes,
            lamp,
            diffuse,
        })
    }
}
