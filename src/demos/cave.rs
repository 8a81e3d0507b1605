//! Two-page story set in a cave. The first page looks at the back wall from
//! inside, the second shows the whole cave from outside. Four buttons change
//! the scene: spin the knot, bob it, park it, and let the sun set.

use std::f32::consts::FRAC_PI_2;

use cgmath::{Point3, Vector3};
use winit::keyboard::KeyCode;

use crate::{
    animation::{FrameTime, spin, wave},
    config::{CameraConfig, SceneConfig},
    data_structures::{
        material::{Material, hex},
        scene_graph::{Light, LightId, ObjectId, Scene, SceneObject},
    },
    demos::{WHITE, object, segments},
    flow::{Button, GraphicsFlow, Input, Out},
    resources::primitives,
    tour::{Advance, Tour},
};

/// Where the sun starts and where restart puts it back.
pub const SUN_START: Vector3<f32> = Vector3::new(15.0, 4.1, 0.0);

#[derive(Clone, Debug, PartialEq)]
pub struct CaveState {
    pub tour: Tour,
    pub first_change: bool,
    pub second_change: bool,
    pub third_change: bool,
    pub fourth_change: bool,
}

impl Default for CaveState {
    fn default() -> Self {
        Self {
            tour: Tour::new(2, Advance::Clamp),
            first_change: false,
            second_change: false,
            third_change: false,
            fourth_change: false,
        }
    }
}

#[derive(Debug, Default)]
pub struct Cave {
    knot: Option<ObjectId>,
    sun: Option<ObjectId>,
    light: Option<LightId>,
}

impl Cave {
    pub fn knot(&self) -> Option<ObjectId> {
        self.knot
    }

    pub fn sun(&self) -> Option<ObjectId> {
        self.sun
    }

    pub fn light(&self) -> Option<LightId> {
        self.light
    }
}

impl GraphicsFlow<CaveState, ()> for Cave {
    fn config(&self) -> SceneConfig {
        SceneConfig {
            background: hex(0x000000),
            camera: CameraConfig {
                position: [7.2, 1.2, 7.0],
                far: 100.0,
                ..Default::default()
            },
            orbit: true,
        }
    }

    fn buttons(&self) -> Vec<Button> {
        vec![
            Button::new("continue-reading", "Continue reading", KeyCode::KeyN),
            Button::new("restart", "Restart", KeyCode::KeyR),
            Button::new("first-change", "First change", KeyCode::Digit1),
            Button::new("second-change", "Second change", KeyCode::Digit2),
            Button::new("third-change", "Third change", KeyCode::Digit3),
            Button::new("fourth-change", "Fourth change", KeyCode::Digit4),
        ]
    }

    fn on_init(&mut self, scene: &mut Scene, _state: &mut CaveState) -> Out<CaveState, ()> {
        let cave = scene.add_material(Material::standard(hex(WHITE)));
        let wall = scene.add_geometry(primitives::plane(10.0, 5.0, 1, 1));
        let barrier = scene.add_geometry(primitives::plane(10.0, 2.0, 1, 1));
        let floor = scene.add_geometry(primitives::plane(10.0, 10.0, 1, 1));
        scene.add(SceneObject::new(wall, cave).at(-5.0, 0.0, 0.0).rotated(0.0, FRAC_PI_2, 0.0));
        scene.add(SceneObject::new(barrier, cave).at(5.0, -1.5, 0.0).rotated(0.0, FRAC_PI_2, 0.0));
        scene.add(SceneObject::new(floor, cave).at(0.0, -2.5, 0.0).rotated(FRAC_PI_2, 0.0, 0.0));

        let (tubular, radial) = segments::KNOT;
        let knot = scene.add_geometry(primitives::torus_knot(1.0, 0.2, tubular, radial, 2, 3));
        let normal = scene.add_material(Material::normal());
        self.knot = Some(scene.add(SceneObject::new(knot, normal).at(6.0, 2.0, 0.0)));

        let (width, height) = segments::SPHERE;
        let sun = scene.add_geometry(primitives::sphere(1.0, width, height));
        let glow = scene.add_material(Material::emissive(hex(0xffa500)));
        let mut sun_object = SceneObject::new(sun, glow);
        sun_object.position = SUN_START;
        self.sun = Some(scene.add(sun_object));

        self.light = Some(scene.add_light(Light::directional(hex(WHITE), 0.5, SUN_START)));
        Out::Empty
    }

    fn on_input(&mut self, scene: &mut Scene, state: &mut CaveState, input: &Input) -> Out<CaveState, ()> {
        let Input::Button(id) = input else {
            return Out::Empty;
        };
        match *id {
            "continue-reading" => {
                state.tour.jump(2);
            }
            "restart" => {
                *state = CaveState::default();
                if let Some(light) = self.light.and_then(|id| scene.light_mut(id)) {
                    light.position = SUN_START;
                }
            }
            "first-change" => state.first_change = true,
            "second-change" => state.second_change = true,
            "third-change" => state.third_change = true,
            "fourth-change" => state.fourth_change = true,
            other => log::warn!("unhandled button {:?}", other),
        }
        Out::Empty
    }

    fn on_update(&mut self, scene: &mut Scene, state: &CaveState, time: FrameTime) -> Out<CaveState, ()> {
        let e = time.elapsed;

        if state.fourth_change {
            if let Some(light) = self.light.and_then(|id| scene.light_mut(id)) {
                light.position.y -= e * 0.005;
            }
        }
        if let Some(position) = self.light.and_then(|id| scene.light(id)).map(|l| l.position) {
            if let Some(sun) = object(scene, self.sun) {
                sun.position = position;
            }
        }

        match state.tour.stage() {
            1 => scene.look_from(Point3::new(0.0, -1.0, 3.0), Point3::new(-6.0, 0.0, 3.0)),
            _ => scene.look_from(Point3::new(15.0, 4.0, 14.0), Point3::new(0.0, 0.0, 0.0)),
        }

        if let Some(knot) = object(scene, self.knot) {
            if state.first_change {
                knot.rotation.y = spin(e, 1.0);
            }
            if state.second_change {
                knot.position.y = wave(e, 0.5, 6.0);
            }
            if state.third_change {
                knot.position.y = 2.0;
            }
        }
        Out::Empty
    }
}
