//! A three-part guided tour. Each part turns the cube a quarter turn about
//! another axis; the first part unwinds both turns again.

use std::f32::consts::FRAC_PI_2;

use winit::keyboard::KeyCode;

use crate::{
    animation::{FrameTime, ramp},
    config::{CameraConfig, SceneConfig},
    data_structures::{
        material::{Material, hex},
        scene_graph::{ObjectId, Scene, SceneObject},
    },
    demos::object,
    flow::{Button, GraphicsFlow, Input, Out},
    resources::primitives,
    tour::{Advance, Tour},
};

const TURN_RATE: f32 = 0.02;

/// One button per part. Only the button of the current part is live.
pub(crate) const TOUR_BUTTONS: [Button; 3] = [
    Button::new("first", "Continue to part two", KeyCode::Digit1),
    Button::new("second", "Continue to part three", KeyCode::Digit2),
    Button::new("third", "Back to part one", KeyCode::Digit3),
];

/// Advance `tour` if `id` is the button shown for its current stage.
pub(crate) fn press_tour_button(tour: &mut Tour, id: &str) {
    let current = TOUR_BUTTONS.get(tour.stage() as usize - 1).map(|b| b.id);
    if current == Some(id) {
        let stage = tour.advance();
        log::info!("tour part {}", stage);
    } else {
        log::debug!("button {:?} is not shown in part {}", id, tour.stage());
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TourState {
    pub tour: Tour,
}

impl Default for TourState {
    fn default() -> Self {
        Self {
            tour: Tour::new(3, Advance::Wrap),
        }
    }
}

#[derive(Debug, Default)]
pub struct TourCube {
    cube: Option<ObjectId>,
}

impl TourCube {
    pub fn cube(&self) -> Option<ObjectId> {
        self.cube
    }
}

impl GraphicsFlow<TourState, ()> for TourCube {
    fn config(&self) -> SceneConfig {
        SceneConfig {
            background: hex(0x000000),
            camera: CameraConfig {
                position: [0.0, 0.0, 0.0],
                target: [0.0, 0.0, -1.0],
                far: 100.0,
                ..Default::default()
            },
            orbit: false,
        }
    }

    fn buttons(&self) -> Vec<Button> {
        TOUR_BUTTONS.to_vec()
    }

    fn on_init(&mut self, scene: &mut Scene, _state: &mut TourState) -> Out<TourState, ()> {
        let geometry = scene.add_geometry(primitives::cuboid(1.0, 1.0, 1.0));
        let normal = scene.add_material(Material::normal());
        self.cube = Some(scene.add(SceneObject::new(geometry, normal).at(-1.0, 0.0, -3.0)));
        Out::Empty
    }

    fn on_input(&mut self, _scene: &mut Scene, state: &mut TourState, input: &Input) -> Out<TourState, ()> {
        if let Input::Button(id) = input {
            press_tour_button(&mut state.tour, id);
        }
        Out::Empty
    }

    fn on_update(&mut self, scene: &mut Scene, state: &TourState, _time: FrameTime) -> Out<TourState, ()> {
        let Some(cube) = object(scene, self.cube) else {
            return Out::Empty;
        };
        match state.tour.stage() {
            1 => {
                if cube.rotation.y >= 0.0 && cube.rotation.z >= 0.0 {
                    cube.rotation.y -= TURN_RATE;
                    cube.rotation.z -= TURN_RATE;
                }
            }
            2 => cube.rotation.y = ramp(cube.rotation.y, TURN_RATE, FRAC_PI_2),
            _ => cube.rotation.z = ramp(cube.rotation.z, TURN_RATE, FRAC_PI_2),
        }
        Out::Empty
    }
}
