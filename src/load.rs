use std::path::{Path, PathBuf};

use glam::Vec3;
use tracing::{debug, warn};

use crate::{bounds::Bounds, error::ViewerError, geometry};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ModelVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coords: [f32; 2],
}

glium::implement_vertex!(ModelVertex, position, normal, tex_coords);

/// A named sub-part of the model, drawn with its own animation parameters.
///
/// Always holds at least one vertex with finite coordinates, so its bounds are always resolved.
#[derive(Clone, Debug)]
pub struct Mesh {
    name: String,
    vertices: Vec<ModelVertex>,
    indices: Vec<u32>,
    bounds: Bounds,
}

impl Mesh {
    pub fn new(
        name: impl Into<String>,
        vertices: Vec<ModelVertex>,
        indices: Vec<u32>,
    ) -> Result<Self, ViewerError> {
        let name = name.into();
        if let Some(vertex) = vertices
            .iter()
            .find(|v| !Vec3::from(v.position).is_finite())
        {
            return Err(ViewerError::NonFiniteVertex {
                mesh: name,
                position: vertex.position,
            });
        }
        let Some(bounds) = Bounds::from_points(vertices.iter().map(|v| Vec3::from(v.position)))
        else {
            return Err(ViewerError::EmptyMesh(name));
        };
        Ok(Self {
            name,
            vertices,
            indices,
            bounds,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertices(&self) -> &[ModelVertex] {
        &self.vertices
    }

    /// Triangle list into `vertices`
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}

/// Ordered list of meshes plus the bounds over all of their vertices.
#[derive(Clone, Debug)]
pub struct Model {
    meshes: Vec<Mesh>,
    bounds: Bounds,
}

impl Model {
    pub fn new(meshes: Vec<Mesh>) -> Result<Self, ViewerError> {
        let bounds = meshes
            .iter()
            .map(Mesh::bounds)
            .reduce(Bounds::union)
            .ok_or(ViewerError::EmptyModel)?;
        Ok(Self { meshes, bounds })
    }

    /// Load a Wavefront OBJ file, one mesh per group
    pub fn load(path: &Path) -> Result<Self, ViewerError> {
        let bytes = std::fs::read(path).map_err(|e| ViewerError::ModelRead(path.into(), e))?;
        let data = get_objdata(&bytes).map_err(|e| ViewerError::ModelParse(path.into(), e))?;
        Self::new(meshes_from_objdata(&data)?)
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}

/// Parse the byte stream from the obj file to an `ObjData` result
pub fn get_objdata(data: &[u8]) -> Result<obj::ObjData, obj::ObjError> {
    let mut data = ::std::io::BufReader::new(data);
    obj::ObjData::load_buf(&mut data)
}

/// Builds one `Mesh` per non-empty group, fan-triangulating every polygon.
///
/// Corners without a normal get the face normal of their polygon.
pub fn meshes_from_objdata(data: &obj::ObjData) -> Result<Vec<Mesh>, ViewerError> {
    let mut meshes = Vec::new();
    for object in &data.objects {
        for group in &object.groups {
            let name = format!("{}/{}", object.name, group.name);
            if group.polys.is_empty() {
                warn!("skipping mesh '{}' without faces", name);
                continue;
            }

            let mut vertices = Vec::<ModelVertex>::new();
            let mut indices = Vec::<u32>::new();
            for obj::SimplePolygon(corners) in &group.polys {
                let base = index_u32(vertices.len(), &name)?;
                let mut polygon = corners
                    .iter()
                    .map(|corner| vertex_at(data, corner, &name))
                    .collect::<Result<Vec<_>, _>>()?;

                let positions: Vec<Vec3> = polygon.iter().map(|v| v.position.into()).collect();
                let normal = geometry::face_normal(&positions);
                for (vertex, corner) in polygon.iter_mut().zip(corners) {
                    if corner.2.is_none() {
                        vertex.normal = normal.into();
                    }
                }

                let corner_count = index_u32(polygon.len(), &name)?;
                for i in 1..corner_count.saturating_sub(1) {
                    indices.extend([base, base + i, base + i + 1]);
                }
                vertices.append(&mut polygon);
            }

            debug!(
                "mesh '{}': {} vertices, {} triangles",
                name,
                vertices.len(),
                indices.len() / 3
            );
            meshes.push(Mesh::new(name, vertices, indices)?);
        }
    }
    Ok(meshes)
}

fn index_u32(len: usize, mesh: &str) -> Result<u32, ViewerError> {
    u32::try_from(len).map_err(|_| ViewerError::BadIndex {
        mesh: mesh.to_owned(),
        attribute: "vertex",
        index: len,
    })
}

fn vertex_at(
    data: &obj::ObjData,
    &obj::IndexTuple(p, t, n): &obj::IndexTuple,
    mesh: &str,
) -> Result<ModelVertex, ViewerError> {
    let missing = |attribute, index| ViewerError::BadIndex {
        mesh: mesh.to_owned(),
        attribute,
        index,
    };
    let position = *data.position.get(p).ok_or_else(|| missing("position", p))?;
    let tex_coords = t
        .map(|t| data.texture.get(t).copied().ok_or_else(|| missing("texture", t)))
        .transpose()?
        .unwrap_or_default();
    let normal = n
        .map(|n| data.normal.get(n).copied().ok_or_else(|| missing("normal", n)))
        .transpose()?
        .unwrap_or_default();
    Ok(ModelVertex {
        position,
        normal,
        tex_coords,
    })
}

/// Decode an image file into rows ready for upload as an OpenGL texture
pub fn load_rgba(path: &Path) -> Result<glium::texture::RawImage2d<'static, u8>, ViewerError> {
    let image = image::open(path)
        .map_err(|e| ViewerError::Image(PathBuf::from(path), e))?
        .to_rgba8();
    let image_dimensions = image.dimensions();
    Ok(glium::texture::RawImage2d::from_raw_rgba_reversed(
        &image.into_raw(),
        image_dimensions,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_PARTS: &str = "\
v -1.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 2.0 0.0
v -1.0 2.0 0.0
v 0.0 0.0 3.0
vt 0.0 0.0
vt 1.0 0.0
vt 1.0 1.0
vn 0.0 0.0 1.0
o car
g body
f 1/1/1 2/2/1 3/3/1 4/3/1
g wheel
f 1 2 5
";

    fn vertex(position: [f32; 3]) -> ModelVertex {
        ModelVertex {
            position,
            ..Default::default()
        }
    }

    #[test]
    fn groups_become_meshes() {
        let data = get_objdata(TWO_PARTS.as_bytes()).unwrap();
        let meshes = meshes_from_objdata(&data).unwrap();
        let names: Vec<&str> = meshes.iter().map(Mesh::name).collect();
        assert_eq!(names, ["car/body", "car/wheel"]);
    }

    #[test]
    fn quads_are_fan_triangulated() {
        let data = get_objdata(TWO_PARTS.as_bytes()).unwrap();
        let meshes = meshes_from_objdata(&data).unwrap();
        let body = &meshes[0];
        assert_eq!(body.vertices().len(), 4);
        assert_eq!(body.indices(), [0, 1, 2, 0, 2, 3]);
        assert_eq!(body.vertices()[1].tex_coords, [1.0, 0.0]);
        assert_eq!(body.vertices()[3].normal, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn missing_normals_use_face_normal() {
        let data = get_objdata(TWO_PARTS.as_bytes()).unwrap();
        let meshes = meshes_from_objdata(&data).unwrap();
        let wheel = &meshes[1];
        // (1,0,0) - (-1,0,0) crossed with (0,0,3) - (-1,0,0) points along -y
        for v in wheel.vertices() {
            assert_eq!(v.normal, [0.0, -1.0, 0.0]);
        }
    }

    #[test]
    fn model_bounds_cover_every_mesh() {
        let data = get_objdata(TWO_PARTS.as_bytes()).unwrap();
        let model = Model::new(meshes_from_objdata(&data).unwrap()).unwrap();
        assert_eq!(model.bounds().min, Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(model.bounds().max, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(model.bounds().center(), Vec3::new(0.0, 1.0, 1.5));
    }

    #[test]
    fn empty_mesh_is_rejected() {
        let err = Mesh::new("ghost", Vec::new(), Vec::new()).unwrap_err();
        assert!(matches!(err, ViewerError::EmptyMesh(name) if name == "ghost"));
    }

    #[test]
    fn non_finite_vertex_is_rejected() {
        let err = Mesh::new(
            "smudge",
            vec![vertex([f32::NAN, 1.0, 2.0]), vertex([0.0, 0.0, 0.0])],
            Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, ViewerError::NonFiniteVertex { mesh, .. } if mesh == "smudge"));
    }

    #[test]
    fn straight_corner_keeps_face_lit() {
        let obj = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 2.0 0.0 0.0
v 2.0 1.0 0.0
v 0.0 1.0 0.0
o car
g panel
f 1 2 3 4 5
";
        let data = get_objdata(obj.as_bytes()).unwrap();
        let meshes = meshes_from_objdata(&data).unwrap();
        assert_eq!(meshes[0].indices().len(), 9);
        for v in meshes[0].vertices() {
            assert_eq!(v.normal, [0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn empty_model_is_rejected() {
        assert!(matches!(Model::new(Vec::new()), Err(ViewerError::EmptyModel)));
    }

    #[test]
    fn mesh_bounds_are_computed_on_construction() {
        let mesh = Mesh::new(
            "part",
            vec![vertex([-1.0, 0.0, 0.0]), vertex([1.0, 2.0, 3.0])],
            Vec::new(),
        )
        .unwrap();
        assert_eq!(mesh.bounds().center(), Vec3::new(0.0, 1.0, 1.5));
    }
}
