//! A sphere hovering over the wireframe floor, driven by the control panel.

use winit::keyboard::KeyCode;

use crate::{
    animation::{FrameTime, wave},
    config::SceneConfig,
    data_structures::{
        material::{Material, MaterialId},
        scene_graph::{ObjectId, Scene, SceneObject},
    },
    demos::{gray_scene, object, segments, wire_floor},
    flow::{GraphicsFlow, Input, Out},
    panel::{Folder, Panel},
    resources::primitives,
};

/// Panel state shared with the bounce-cone scene.
#[derive(Clone, Debug, PartialEq)]
pub struct SphereControls {
    pub wireframe: bool,
    pub play: bool,
    pub height: f32,
}

impl Default for SphereControls {
    fn default() -> Self {
        Self {
            wireframe: true,
            play: false,
            height: 0.0,
        }
    }
}

impl SphereControls {
    pub fn panel() -> Panel<Self> {
        Panel::new()
            .folder(Folder::<SphereControls>::new("Plane").toggle("wireframe", KeyCode::KeyW, |s| &mut s.wireframe))
            .folder(
                Folder::<SphereControls>::new("Sphere")
                    .toggle("Animate sphere", KeyCode::KeyP, |s| &mut s.play)
                    .slider(
                        "Height",
                        (-5.0, 5.0, 0.1),
                        KeyCode::ArrowDown,
                        KeyCode::ArrowUp,
                        |s| &mut s.height,
                    ),
            )
    }
}

/// Floor and sphere handles plus the panel syncing both scenes share.
#[derive(Debug, Default)]
pub(crate) struct SphereRig {
    floor: Option<MaterialId>,
    pub(crate) sphere: Option<ObjectId>,
}

impl SphereRig {
    pub(crate) fn build(&mut self, scene: &mut Scene) {
        let (floor, _) = wire_floor(scene);
        let (width, height) = segments::SPHERE;
        let geometry = scene.add_geometry(primitives::sphere(1.0, width, height));
        let normal = scene.add_material(Material::normal());
        self.floor = Some(floor);
        self.sphere = Some(scene.add(SceneObject::new(geometry, normal)));
    }

    pub(crate) fn on_input(&self, scene: &mut Scene, state: &SphereControls, input: &Input) {
        match input {
            Input::Panel("wireframe") => {
                if let Some(floor) = self.floor.and_then(|id| scene.material_mut(id)) {
                    floor.wireframe = state.wireframe;
                }
            }
            Input::Panel("Height") => {
                if let Some(sphere) = object(scene, self.sphere) {
                    sphere.position.y = state.height;
                }
            }
            _ => (),
        }
    }

    pub(crate) fn on_update(&self, scene: &mut Scene, state: &SphereControls, time: FrameTime) {
        if state.play {
            if let Some(sphere) = object(scene, self.sphere) {
                sphere.position.y = wave(time.elapsed, 0.5, 2.0);
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct FloatingSphere {
    rig: SphereRig,
}

impl GraphicsFlow<SphereControls, ()> for FloatingSphere {
    fn config(&self) -> SceneConfig {
        gray_scene([2.0, 2.0, 4.0], true)
    }

    fn panel(&self) -> Panel<SphereControls> {
        SphereControls::panel()
    }

    fn on_init(&mut self, scene: &mut Scene, _state: &mut SphereControls) -> Out<SphereControls, ()> {
        self.rig.build(scene);
        Out::Empty
    }

    fn on_input(
        &mut self,
        scene: &mut Scene,
        state: &mut SphereControls,
        input: &Input,
    ) -> Out<SphereControls, ()> {
        self.rig.on_input(scene, state, input);
        Out::Empty
    }

    fn on_update(&mut self, scene: &mut Scene, state: &SphereControls, time: FrameTime) -> Out<SphereControls, ()> {
        self.rig.on_update(scene, state, time);
        Out::Empty
    }
}
