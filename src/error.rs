use std::path::PathBuf;

/// Errors that can occur while setting up the viewer. The per-frame update itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("failed to read config file {0:?}: {1}")]
    ConfigRead(PathBuf, #[source] std::io::Error),

    #[error("failed to parse config file {0:?}: {1}")]
    ConfigParse(PathBuf, #[source] toml::de::Error),

    #[error("failed to open model {0:?}: {1}")]
    ModelRead(PathBuf, #[source] std::io::Error),

    #[error("failed to parse model {0:?}: {1}")]
    ModelParse(PathBuf, #[source] obj::ObjError),

    #[error("mesh '{0}' has no vertices")]
    EmptyMesh(String),

    #[error("mesh '{mesh}' has a non-finite vertex position {position:?}")]
    NonFiniteVertex { mesh: String, position: [f32; 3] },

    #[error("model contains no meshes")]
    EmptyModel,

    #[error("face in mesh '{mesh}' references missing {attribute} index {index}")]
    BadIndex {
        mesh: String,
        attribute: &'static str,
        index: usize,
    },

    #[error("failed to decode texture {0:?}: {1}")]
    Image(PathBuf, #[source] image::ImageError),

    #[error("failed to create texture: {0}")]
    Texture(#[from] glium::texture::TextureCreationError),

    #[error("failed to create vertex buffer: {0}")]
    VertexBuffer(#[from] glium::vertex::BufferCreationError),

    #[error("failed to create index buffer: {0}")]
    IndexBuffer(#[from] glium::index::BufferCreationError),

    #[error("failed to build shader program: {0}")]
    Program(#[from] glium::program::ProgramChooserCreationError),

    #[error("draw call failed: {0}")]
    Draw(#[from] glium::DrawError),
}
