//! Viewer configuration, read from a TOML file.
//!
//! Every field is optional in the file; missing fields keep their defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ViewerError;

/// Looked up in the working directory when no path is given on the command line
pub const DEFAULT_CONFIG_FILE: &str = "viewer.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub model: ModelConfig,
    pub camera: CameraConfig,
    pub animation: AnimationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Hide and lock the cursor for mouse look
    pub grab_cursor: bool,
    pub clear_color: [f32; 4],
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Car Assembly".to_owned(),
            width: 1280,
            height: 720,
            grab_cursor: true,
            clear_color: [0.018, 0.018, 0.032, 1.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Wavefront OBJ file, one mesh per group
    pub path: PathBuf,
    /// Optional diffuse texture; plain white when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diffuse_texture: Option<PathBuf>,
    pub offset: [f32; 3],
    pub scale: f32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("assets/car.obj"),
            diffuse_texture: None,
            offset: [0.0, -0.8, 0.0],
            scale: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    /// Degrees, -90 looks down negative z
    pub yaw: f32,
    pub pitch: f32,
    /// Starting field of view in degrees
    pub zoom: f32,
    /// Units per second
    pub movement_speed: f32,
    /// Degrees per pixel of mouse motion
    pub sensitivity: f32,
    /// Movement multiplier while the boost key is held
    pub boost: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 1.8, 8.0],
            yaw: -90.0,
            pitch: 0.0,
            zoom: 45.0,
            movement_speed: 2.5,
            sensitivity: 0.1,
            boost: 2.5,
            near: 0.1,
            far: 200.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// How far a mesh travels from its assembled position at full disassembly
    pub disassemble_distance: f32,
    pub ambient_strength: f32,
    pub material_shininess: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            disassemble_distance: 5.6,
            ambient_strength: 0.18,
            material_shininess: 64.0,
        }
    }
}

impl ViewerConfig {
    /// Load from `path`, or from `viewer.toml` if it exists, or fall back to defaults.
    ///
    /// An explicit path that cannot be read is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ViewerError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    info!("No config file found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self, ViewerError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ViewerError::ConfigRead(path.into(), e))?;
        let config =
            Self::from_toml(&content).map_err(|e| ViewerError::ConfigParse(path.into(), e))?;
        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
