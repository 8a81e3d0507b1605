//! Run-time configuration.
//!
//! Demos describe their scene set-up with a [`SceneConfig`]; the binary turns
//! command line flags into a [`RunConfig`].

use crate::{
    corpus::CorpusSource,
    data_structures::material::{Colour, hex},
    demos::tour_model::MODEL_FILE,
};

#[derive(Clone, Debug, PartialEq)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub target: [f32; 3],
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 5.0],
            target: [0.0, 0.0, 0.0],
            fov: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub background: Colour,
    pub camera: CameraConfig,
    /// Enable right-drag orbiting and wheel zoom.
    pub orbit: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            background: hex(0x000000),
            camera: CameraConfig::default(),
            orbit: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "flow-scenes".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Everything `launch` needs to start a demo.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    pub demo: String,
    pub corpus: CorpusSource,
    /// glTF file of the model tour, relative to `assets/` or absolute.
    pub model: String,
    pub window: WindowConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            demo: "spinning-cube".to_string(),
            corpus: CorpusSource::default(),
            model: MODEL_FILE.to_string(),
            window: WindowConfig::default(),
        }
    }
}
