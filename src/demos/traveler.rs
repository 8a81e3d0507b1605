//! A torus that travels up and down and tumbles, with every rate exposed on
//! the panel.

use cgmath::Vector3;
use winit::keyboard::KeyCode;

use crate::{
    animation::{FrameTime, spin, wave},
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

#[derive(Clone, Debug, PartialEq)]
pub struct TravelerControls {
    pub wireframe: bool,
    pub play: bool,
    pub rotate: bool,
    pub speed: f32,
    pub distance: f32,
    pub rotation_speed: f32,
}

impl Default for TravelerControls {
    fn default() -> Self {
        Self {
            wireframe: true,
            play: false,
            rotate: false,
            speed: 0.5,
            distance: 2.0,
            rotation_speed: 1.0,
        }
    }
}

impl TravelerControls {
    /// Restore the journey and rotation settings. The floor keeps its look.
    pub fn reset(&mut self) {
        *self = Self {
            wireframe: self.wireframe,
            ..Self::default()
        };
    }
}

#[derive(Debug, Default)]
pub struct Traveler {
    floor: Option<MaterialId>,
    torus: Option<ObjectId>,
}

impl Traveler {
    pub fn torus(&self) -> Option<ObjectId> {
        self.torus
    }
}

impl GraphicsFlow<TravelerControls, ()> for Traveler {
    fn config(&self) -> SceneConfig {
        gray_scene([2.0, 2.0, 4.0], true)
    }

    fn panel(&self) -> Panel<TravelerControls> {
        Panel::new()
            .folder(Folder::<TravelerControls>::new("Plane").toggle("Wireframe", KeyCode::KeyW, |s| &mut s.wireframe))
            .folder(
                Folder::<TravelerControls>::new("Traveler Rotation")
                    .toggle("Rotate", KeyCode::KeyR, |s| &mut s.rotate)
                    .slider(
                        "Rotation speed",
                        (0.1, 10.0, 0.1),
                        KeyCode::Comma,
                        KeyCode::Period,
                        |s| &mut s.rotation_speed,
                    ),
            )
            .folder(
                Folder::<TravelerControls>::new("Traveler Journey")
                    .toggle("Play", KeyCode::KeyP, |s| &mut s.play)
                    .slider("Speed", (0.1, 10.0, 0.1), KeyCode::Minus, KeyCode::Equal, |s| {
                        &mut s.speed
                    })
                    .slider(
                        "Distance",
                        (0.1, 10.0, 0.5),
                        KeyCode::BracketLeft,
                        KeyCode::BracketRight,
                        |s| &mut s.distance,
                    ),
            )
            .folder(Folder::<TravelerControls>::new("Reset").action("Reset", KeyCode::Backspace, TravelerControls::reset))
    }

    fn on_init(&mut self, scene: &mut Scene, _state: &mut TravelerControls) -> Out<TravelerControls, ()> {
        let (floor, _) = wire_floor(scene);
        let (radial, tubular) = segments::TORUS;
        let geometry = scene.add_geometry(primitives::torus(2.0, 0.5, radial, tubular));
        let normal = scene.add_material(Material::normal());
        self.floor = Some(floor);
        self.torus = Some(scene.add(SceneObject::new(geometry, normal)));
        Out::Empty
    }

    fn on_input(
        &mut self,
        scene: &mut Scene,
        state: &mut TravelerControls,
        input: &Input,
    ) -> Out<TravelerControls, ()> {
        if let Input::Panel("Wireframe") = input {
            if let Some(floor) = self.floor.and_then(|id| scene.material_mut(id)) {
                floor.wireframe = state.wireframe;
            }
        }
        Out::Empty
    }

    fn on_update(
        &mut self,
        scene: &mut Scene,
        state: &TravelerControls,
        time: FrameTime,
    ) -> Out<TravelerControls, ()> {
        let e = time.elapsed;
        let Some(torus) = object(scene, self.torus) else {
            return Out::Empty;
        };
        if state.play {
            torus.position.y = wave(e, state.speed, state.distance);
        }
        if state.rotate {
            let angle = spin(e, state.rotation_speed);
            torus.rotation = Vector3::new(angle, angle, torus.rotation.z);
        }
        Out::Empty
    }
}
