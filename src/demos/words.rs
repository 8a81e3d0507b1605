//! Scenes populated from a text corpus.
//!
//! The corpus is fetched in the background when the scene starts. Once it
//! arrives every occurrence of the three configured terms is turned into
//! five small shapes coloured by term and stacked by where in the text the
//! term appeared.

use cgmath::{Array, Vector3};
use rand::{SeedableRng, rngs::StdRng};
use winit::keyboard::KeyCode;

use crate::{
    animation::{FrameTime, orbit, spin},
    config::SceneConfig,
    corpus::{self, CorpusSource, Spawned},
    data_structures::{
        material::{Material, MaterialId, hex},
        scene_graph::{GeometryId, Light, Scene, SceneObject},
    },
    demos::{GRAY, WHITE, gray_scene},
    flow::{GraphicsFlow, Input, Out},
    panel::{Folder, Panel},
    resources::primitives,
};

/// Which of the three word scenes to build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Style {
    /// Cubes on a white background, no controls.
    StaticCubes,
    /// Cubes with visibility filters, rotation and a circling camera.
    Cubes,
    /// Spheres with visibility filters, pulsing and a circling camera.
    Bubbles,
}

impl Style {
    pub fn terms(self) -> [&'static str; 3] {
        match self {
            Style::StaticCubes | Style::Cubes => ["cupboard", "hat", "broom"],
            Style::Bubbles => ["dudley", "snape", "malfoy"],
        }
    }

    pub fn colours(self) -> [u32; 3] {
        match self {
            Style::StaticCubes | Style::Cubes => [0xff0000, 0x008000, 0x0000ff],
            Style::Bubbles => [0xffa500, 0xffc0cb, 0x00ffff],
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WordControls {
    /// Per-term material visibility.
    pub visible: [bool; 3],
    /// Rotate the cubes or pulse the bubbles.
    pub animate: bool,
    pub rotate_camera: bool,
}

impl Default for WordControls {
    fn default() -> Self {
        Self {
            visible: [true; 3],
            animate: false,
            rotate_camera: false,
        }
    }
}

/// The fetched corpus, or why it could not be fetched.
pub type CorpusLoaded = anyhow::Result<String>;

pub struct WordScene {
    style: Style,
    source: CorpusSource,
    rng: StdRng,
    geometry: Option<GeometryId>,
    materials: Vec<MaterialId>,
    spawned: Vec<Spawned>,
}

impl WordScene {
    pub fn new(style: Style, source: CorpusSource) -> Self {
        Self::with_rng(style, source, StdRng::from_os_rng())
    }

    /// Use `rng` for placements, so tests can seed it.
    pub fn with_rng(style: Style, source: CorpusSource, rng: StdRng) -> Self {
        Self {
            style,
            source,
            rng,
            geometry: None,
            materials: Vec::new(),
            spawned: Vec::new(),
        }
    }

    /// Objects spawned from the corpus so far.
    pub fn spawned(&self) -> &[Spawned] {
        &self.spawned
    }

    pub fn materials(&self) -> &[MaterialId] {
        &self.materials
    }
}

impl GraphicsFlow<WordControls, CorpusLoaded> for WordScene {
    fn config(&self) -> SceneConfig {
        let mut config = gray_scene([0.0, 0.0, -20.0], true);
        config.background = match self.style {
            Style::StaticCubes => hex(WHITE),
            Style::Cubes | Style::Bubbles => hex(GRAY),
        };
        config
    }

    fn panel(&self) -> Panel<WordControls> {
        if self.style == Style::StaticCubes {
            return Panel::new();
        }
        let [first, second, third] = self.style.terms();
        let animate = match self.style {
            Style::Bubbles => "Animate Bubbles",
            _ => "Rotate Cubes",
        };
        Panel::new()
            .folder(
                Folder::<WordControls>::new("Filter Terms")
                    .toggle(first, KeyCode::Digit1, |s| &mut s.visible[0])
                    .toggle(second, KeyCode::Digit2, |s| &mut s.visible[1])
                    .toggle(third, KeyCode::Digit3, |s| &mut s.visible[2])
                    .toggle(animate, KeyCode::KeyA, |s| &mut s.animate),
            )
            .folder(Folder::<WordControls>::new("Camera").toggle("Rotate Camera", KeyCode::KeyC, |s| &mut s.rotate_camera))
    }

    fn on_init(&mut self, scene: &mut Scene, _state: &mut WordControls) -> Out<WordControls, CorpusLoaded> {
        scene.add_light(Light::directional(hex(0x404040), 100.0, Vector3::new(0.0, 1.0, 0.0)));

        let mesh = match self.style {
            Style::StaticCubes | Style::Cubes => primitives::cuboid(0.5, 0.5, 0.5),
            Style::Bubbles => primitives::sphere(0.5, 32, 16),
        };
        let geometry = scene.add_geometry(mesh);
        self.geometry = Some(geometry);
        self.materials = self
            .style
            .colours()
            .iter()
            .map(|&rgb| scene.add_material(Material::standard(hex(rgb))))
            .collect();

        if self.style == Style::StaticCubes {
            // marker cube at the bottom of the stack
            scene.add(SceneObject::new(geometry, self.materials[0]).at(0.0, -10.0, 0.0));
        }

        let source = self.source.clone();
        log::info!("fetching corpus from {:?}", source);
        Out::FutEvent(vec![Box::new(async move { corpus::load(&source).await })])
    }

    fn on_input(
        &mut self,
        scene: &mut Scene,
        state: &mut WordControls,
        input: &Input,
    ) -> Out<WordControls, CorpusLoaded> {
        if let Input::Panel(_) = input {
            for (material, visible) in self.materials.iter().zip(state.visible) {
                if let Some(material) = scene.material_mut(*material) {
                    material.visible = visible;
                }
            }
        }
        Out::Empty
    }

    fn on_update(
        &mut self,
        scene: &mut Scene,
        state: &WordControls,
        time: FrameTime,
    ) -> Out<WordControls, CorpusLoaded> {
        let e = time.elapsed;
        if state.rotate_camera {
            let (x, z) = orbit(e, 0.2, 16.0);
            scene.camera.position.x = x;
            scene.camera.position.z = z;
            if let Some(orbit) = &mut scene.orbit {
                orbit.sync(&scene.camera);
            }
        }
        if state.animate {
            for spawned in &self.spawned {
                let Some(object) = scene.object_mut(spawned.object) else {
                    continue;
                };
                match self.style {
                    Style::Bubbles => object.scale = Vector3::from_value((e * spawned.phase).sin()),
                    _ => object.rotation = Vector3::from_value(spin(e, spawned.phase)),
                }
            }
        }
        Out::Empty
    }

    fn on_custom_events(
        &mut self,
        scene: &mut Scene,
        _state: &mut WordControls,
        event: CorpusLoaded,
    ) -> Option<CorpusLoaded> {
        let text = match event {
            Ok(text) => text,
            Err(e) => {
                log::error!("Could not load corpus: {:#}", e);
                return None;
            }
        };
        let Some(geometry) = self.geometry else {
            return Some(Ok(text));
        };
        let spawned = corpus::populate(
            scene,
            &text,
            &self.style.terms(),
            geometry,
            &self.materials,
            &mut self.rng,
        );
        self.spawned.extend(spawned);
        None
    }
}
