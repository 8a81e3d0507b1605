//! A line-drawn room with a floor and a spinning cube. Holding select (the
//! left mouse button on desktop) sends the cube circling around the room's
//! vertical axis.

use std::f32::consts::FRAC_PI_2;

use cgmath::{Array, Vector3};

use crate::{
    animation::{FrameTime, orbit, spin},
    config::{CameraConfig, SceneConfig},
    data_structures::{
        material::{Material, hex},
        scene_graph::{Light, ObjectId, Scene, SceneObject},
    },
    demos::{GRAY, WHITE, object},
    flow::{GraphicsFlow, Input, Out},
    resources::primitives,
};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct XrState {
    pub selected: bool,
}

#[derive(Debug, Default)]
pub struct XrRoom {
    cube: Option<ObjectId>,
}

impl XrRoom {
    pub fn cube(&self) -> Option<ObjectId> {
        self.cube
    }
}

impl GraphicsFlow<XrState, ()> for XrRoom {
    fn config(&self) -> SceneConfig {
        SceneConfig {
            background: hex(0x505050),
            camera: CameraConfig {
                position: [0.0, 1.6, -1.0],
                target: [0.0, 1.6, 0.0],
                fov: 50.0,
                near: 0.1,
                far: 10.0,
            },
            orbit: true,
        }
    }

    fn on_init(&mut self, scene: &mut Scene, _state: &mut XrState) -> Out<XrState, ()> {
        let room = scene.add_geometry(primitives::box_lines(2.0, 6.0, 2.0, 10, 30, 10).translate(0.0, 3.0, 0.0));
        let lines = scene.add_material(Material::basic(hex(0xbcbcbc)));
        scene.add(SceneObject::new(room, lines));

        scene.add_light(Light::directional(hex(WHITE), 3.0, Vector3::new(0.0, 5.0, 0.0)));

        let cube = scene.add_geometry(primitives::cuboid(0.25, 0.25, 0.25));
        let normal = scene.add_material(Material::normal());
        self.cube = Some(scene.add(SceneObject::new(cube, normal).at(0.0, 1.0, 0.5)));

        let floor = scene.add_geometry(primitives::plane(2.0, 2.0, 1, 1));
        let grey = scene.add_material(Material::standard(hex(GRAY)));
        scene.add(SceneObject::new(floor, grey).at(0.0, 0.1, 0.0).rotated(FRAC_PI_2, 0.0, 0.0));
        Out::Empty
    }

    fn on_input(&mut self, _scene: &mut Scene, state: &mut XrState, input: &Input) -> Out<XrState, ()> {
        if let Input::Select(active) = input {
            state.selected = *active;
        }
        Out::Empty
    }

    fn on_update(&mut self, scene: &mut Scene, state: &XrState, time: FrameTime) -> Out<XrState, ()> {
        let e = time.elapsed;
        if let Some(cube) = object(scene, self.cube) {
            cube.rotation = Vector3::from_value(spin(e, 0.2));
            if state.selected {
                let (x, z) = orbit(e, 0.2, 0.5);
                cube.position.x = x;
                cube.position.z = z;
            }
        }
        Out::Empty
    }
}
