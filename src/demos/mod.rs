//! The classroom scenes.
//!
//! Every demo is a [`GraphicsFlow`](crate::flow::GraphicsFlow) with its own
//! interaction state. [`launch`] looks a demo up by name and runs it.

use std::f32::consts::FRAC_PI_2;

use crate::{
    config::{CameraConfig, RunConfig, SceneConfig, WindowConfig},
    data_structures::{
        material::{Material, MaterialId, hex},
        scene_graph::{ObjectId, Scene, SceneObject},
    },
    flow::run,
    resources::primitives,
};

pub mod bounce_cone;
pub mod cave;
pub mod flatland;
pub mod floating_sphere;
pub mod shape_gallery;
pub mod spinning_cube;
pub mod tour_cube;
pub mod tour_model;
pub mod traveler;
pub mod words;
pub mod xr_room;

use cave::CaveState;
use floating_sphere::SphereControls;
use shape_gallery::GalleryControls;
use tour_cube::TourState;
use tour_model::{ModelLoaded, ModelState};
use traveler::TravelerControls;
use words::{CorpusLoaded, Style, WordControls, WordScene};
use xr_room::XrState;

/// Every registered demo, in the order `--list` prints them.
pub const DEMOS: &[&str] = &[
    "spinning-cube",
    "flatland",
    "floating-sphere",
    "traveler",
    "shape-gallery",
    "bounce-cone",
    "tour-cube",
    "tour-model",
    "cave",
    "word-cubes-static",
    "word-cubes",
    "word-bubbles",
    "xr-room",
];

/// Run the demo named in `config` until its window closes.
pub fn launch(config: &RunConfig) -> anyhow::Result<()> {
    let window = WindowConfig {
        title: format!("{} - {}", config.window.title, config.demo),
        ..config.window.clone()
    };
    match config.demo.as_str() {
        "spinning-cube" => run::<(), ()>(Box::new(spinning_cube::SpinningCube::default()), window),
        "flatland" => run::<(), ()>(Box::new(flatland::Flatland), window),
        "floating-sphere" => run::<SphereControls, ()>(
            Box::new(floating_sphere::FloatingSphere::default()),
            window,
        ),
        "traveler" => run::<TravelerControls, ()>(Box::new(traveler::Traveler::default()), window),
        "shape-gallery" => run::<GalleryControls, ()>(
            Box::new(shape_gallery::ShapeGallery::default()),
            window,
        ),
        "bounce-cone" => run::<SphereControls, ()>(Box::new(bounce_cone::BounceCone::default()), window),
        "tour-cube" => run::<TourState, ()>(Box::new(tour_cube::TourCube::default()), window),
        "tour-model" => run::<ModelState, ModelLoaded>(
            Box::new(tour_model::TourModel::new(&config.model)),
            window,
        ),
        "cave" => run::<CaveState, ()>(Box::new(cave::Cave::default()), window),
        "word-cubes-static" => words(Style::StaticCubes, config, window),
        "word-cubes" => words(Style::Cubes, config, window),
        "word-bubbles" => words(Style::Bubbles, config, window),
        "xr-room" => run::<XrState, ()>(Box::new(xr_room::XrRoom::default()), window),
        other => anyhow::bail!("unknown demo {:?}, available: {}", other, DEMOS.join(", ")),
    }
}

fn words(style: Style, config: &RunConfig, window: WindowConfig) -> anyhow::Result<()> {
    run::<WordControls, CorpusLoaded>(
        Box::new(WordScene::new(style, config.corpus.clone())),
        window,
    )
}

pub(crate) const GRAY: u32 = 0x808080;
pub(crate) const WHITE: u32 = 0xffffff;

/// Gray background with the default 75° camera placed at `position`.
pub(crate) fn gray_scene(position: [f32; 3], orbit: bool) -> SceneConfig {
    SceneConfig {
        background: hex(GRAY),
        camera: CameraConfig {
            position,
            far: 100.0,
            ..Default::default()
        },
        orbit,
    }
}

/// The 10×10 white wireframe floor most lecture scenes stand on. Returns the
/// material so the scene can toggle its wireframe flag.
pub(crate) fn wire_floor(scene: &mut Scene) -> (MaterialId, ObjectId) {
    let geometry = scene.add_geometry(primitives::plane(10.0, 10.0, 50, 50));
    let material = scene.add_material(Material::basic(hex(WHITE)).wireframe(true));
    let floor = scene.add(SceneObject::new(geometry, material).rotated(FRAC_PI_2, 0.0, 0.0));
    (material, floor)
}

/// Mutable access through a handle the demo may not have created yet.
pub(crate) fn object(
    scene: &mut Scene,
    id: Option<ObjectId>,
) -> Option<&mut SceneObject> {
    id.and_then(move |id| scene.object_mut(id))
}

/// Default segment counts of the primitive constructors.
pub(crate) mod segments {
    pub const SPHERE: (u32, u32) = (32, 16);
    pub const TORUS: (u32, u32) = (12, 48);
    pub const KNOT: (u32, u32) = (64, 8);
    pub const CONE: u32 = 32;
}
