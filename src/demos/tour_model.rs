//! Guided tour around an imported car model that turns to follow the cursor.
//!
//! The model is not bundled. Put a glTF file (with its `.bin` and textures
//! next to it) at `assets/car/scene.gltf`, or pass another file with
//! `--model`. Relative paths resolve against `./assets`, absolute paths are
//! read as they are. In the browser the file is fetched from `/assets/` on
//! the page origin. Without a model the scene still runs and logs the load
//! error.

use crate::{
    animation::FrameTime,
    config::{CameraConfig, SceneConfig},
    data_structures::{
        material::{Material, hex},
        scene_graph::{Light, ObjectId, Scene, SceneObject},
    },
    demos::{
        object,
        tour_cube::{TOUR_BUTTONS, press_tour_button},
    },
    flow::{Button, GraphicsFlow, Input, Out},
    resources::{self, primitives::MeshData},
    tour::{Advance, Tour},
};

/// Default glTF file, relative to `assets/`.
pub const MODEL_FILE: &str = "car/scene.gltf";

#[derive(Clone, Debug, PartialEq)]
pub struct ModelState {
    pub tour: Tour,
    /// Last cursor position, normalised to `[-0.5, 0.5]`.
    pub cursor: (f32, f32),
}

impl Default for ModelState {
    fn default() -> Self {
        Self {
            tour: Tour::new(3, Advance::Wrap),
            cursor: (0.0, 0.0),
        }
    }
}

/// Result of the background model import.
pub type ModelLoaded = anyhow::Result<MeshData>;

#[derive(Debug)]
pub struct TourModel {
    file: String,
    model: Option<ObjectId>,
}

impl Default for TourModel {
    fn default() -> Self {
        Self::new(MODEL_FILE)
    }
}

impl TourModel {
    pub fn new(file: &str) -> Self {
        Self {
            file: file.to_string(),
            model: None,
        }
    }

    pub fn model(&self) -> Option<ObjectId> {
        self.model
    }
}

impl GraphicsFlow<ModelState, ModelLoaded> for TourModel {
    fn config(&self) -> SceneConfig {
        SceneConfig {
            background: hex(0x000000),
            camera: CameraConfig {
                far: 100.0,
                ..Default::default()
            },
            orbit: false,
        }
    }

    fn buttons(&self) -> Vec<Button> {
        TOUR_BUTTONS.to_vec()
    }

    fn on_init(&mut self, scene: &mut Scene, _state: &mut ModelState) -> Out<ModelState, ModelLoaded> {
        scene.add_light(Light::directional(
            hex(0x404040),
            100.0,
            cgmath::Vector3::new(0.0, 1.0, 0.0),
        ));
        let file = self.file.clone();
        Out::FutEvent(vec![Box::new(async move { resources::load_gltf_mesh(&file).await })])
    }

    fn on_input(&mut self, _scene: &mut Scene, state: &mut ModelState, input: &Input) -> Out<ModelState, ModelLoaded> {
        match input {
            Input::Button(id) => press_tour_button(&mut state.tour, id),
            Input::Cursor { x, y } => state.cursor = (*x, *y),
            _ => (),
        }
        Out::Empty
    }

    fn on_update(&mut self, scene: &mut Scene, state: &ModelState, _time: FrameTime) -> Out<ModelState, ModelLoaded> {
        if let Some(model) = object(scene, self.model) {
            let (x, y) = state.cursor;
            model.rotation.y = x * 2.0;
            model.rotation.x = y + 0.25;
        }
        Out::Empty
    }

    fn on_custom_events(
        &mut self,
        scene: &mut Scene,
        _state: &mut ModelState,
        event: ModelLoaded,
    ) -> Option<ModelLoaded> {
        match event {
            Ok(mesh) => {
                log::info!("loaded {} with {} triangles", self.file, mesh.triangle_count());
                let geometry = scene.add_geometry(mesh);
                let material = scene.add_material(Material::standard(hex(0xcccccc)));
                self.model = Some(scene.add(SceneObject::new(geometry, material).at(-2.0, -0.5, 0.0)));
            }
            Err(e) => log::error!("Could not load {}: {:#}", self.file, e),
        }
        None
    }
}
